use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use pihost::PihostError;
use pihost::logger::{LogLevel, Logger};
use pihost::system::lifetime;
use pihost::system::net::{self, AddrFamily};
use pihost::system::platform;
use pihost::system::serial::{self, SERIAL_SENTINEL};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

fn fixture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn serial_from_cpuinfo_fixture() {
    let file = fixture("processor\t: 0\nHardware\t: BCM2835\nSerial\t\t: 0000000031a2b3c4\n");
    let logger = Logger::new(LogLevel::None);

    let serial = serial::read_serial_from_path(file.path().to_str().unwrap(), &logger);
    assert_eq!(serial, "0000000031a2b3c4");
}

#[test]
fn missing_serial_line_yields_sentinel_and_one_error() {
    let file = fixture("processor\t: 0\nHardware\t: BCM2835\n");
    let buf = SharedBuf::default();
    let logger = Logger::with_sink(LogLevel::Error, Box::new(buf.clone()));

    let serial = serial::read_serial_from_path(file.path().to_str().unwrap(), &logger);

    assert_eq!(serial, SERIAL_SENTINEL);
    let out = buf.contents();
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("Failed to read serial"));
}

#[test]
fn unreadable_cpuinfo_yields_sentinel() {
    let buf = SharedBuf::default();
    let logger = Logger::with_sink(LogLevel::Error, Box::new(buf.clone()));

    let serial = serial::read_serial_from_path("/nonexistent/cpuinfo", &logger);

    assert_eq!(serial, SERIAL_SENTINEL);
    assert!(buf.contents().contains("Failed to read serial"));
}

#[test]
fn suppressed_logger_stays_silent_on_serial_failure() {
    let file = fixture("processor\t: 0\n");
    let buf = SharedBuf::default();
    let logger = Logger::with_sink(LogLevel::None, Box::new(buf.clone()));

    let serial = serial::read_serial_from_path(file.path().to_str().unwrap(), &logger);

    assert_eq!(serial, SERIAL_SENTINEL);
    assert!(buf.contents().is_empty());
}

#[test]
fn absent_interface_reports_none() {
    assert_eq!(net::ip_address("pihost-missing0", AddrFamily::V4), None);
    assert_eq!(net::ip_address("pihost-missing0", AddrFamily::V6), None);
}

#[cfg(target_os = "linux")]
#[test]
fn loopback_carries_the_v4_loopback_address() {
    let addr = net::ip_address("lo", AddrFamily::V4);
    assert_eq!(addr, Some("127.0.0.1".parse().unwrap()));
}

#[test]
fn restricted_platform_predicate() {
    assert!(platform::os_is_restricted("windows"));
    assert!(platform::os_is_restricted("win32"));
    assert!(platform::os_is_restricted("darwin"));
    assert!(platform::os_is_restricted("macos"));
    assert!(!platform::os_is_restricted("linux"));
}

#[cfg(target_os = "linux")]
#[test]
fn linux_host_is_the_target_platform() {
    assert!(!platform::not_pi());
}

#[test]
fn platform_name_is_populated() {
    assert!(!platform::platform_name().is_empty());
}

#[test]
fn install_hooks_outside_a_runtime_is_an_error() {
    let logger: &'static Logger = Box::leak(Box::new(Logger::new(LogLevel::None)));
    let err = lifetime::install_hooks(logger).unwrap_err();
    assert!(matches!(err, PihostError::SignalOperation(_)));
}

#[tokio::test]
async fn install_hooks_inside_a_runtime() {
    let logger: &'static Logger = Box::leak(Box::new(Logger::new(LogLevel::None)));
    lifetime::install_hooks(logger).unwrap();
}
