//! Board serial number
//!
//! Raspberry Pi boards expose their serial in `/proc/cpuinfo` as a
//! `Serial : <16 hex digits>` line, readable only with elevated
//! permissions. Failures collapse to a fixed sentinel so callers always
//! get a printable identifier.

use std::env;
use std::fs;

use crate::errors::{PihostError, Result};
use crate::log_error;
use crate::logger::Logger;
use crate::system::process;

/// Returned in place of a serial when the privileged read or the
/// extraction fails
pub const SERIAL_SENTINEL: &str = "ERROR000000000";

const CPUINFO_CMD: &str = "sudo cat /proc/cpuinfo";

/// Board serial from `/proc/cpuinfo`, or [`SERIAL_SENTINEL`] on any
/// failure (one Error-level line is logged). Single attempt, blocking.
///
/// `PIHOST_CPUINFO` points the reader at an alternate cpuinfo file,
/// bypassing the privileged command.
pub fn read_serial(logger: &Logger) -> String {
    let text = match env::var("PIHOST_CPUINFO") {
        Ok(path) => read_cpuinfo_file(&path),
        Err(_) => process::exec_sync(CPUINFO_CMD, logger),
    };
    extract(text, logger)
}

/// [`read_serial`] against an explicit cpuinfo-format file
pub fn read_serial_from_path(path: &str, logger: &Logger) -> String {
    extract(read_cpuinfo_file(path), logger)
}

fn read_cpuinfo_file(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| PihostError::file_operation(format!("{}: {}", path, e)))
}

fn extract(text: Result<String>, logger: &Logger) -> String {
    let serial = text.and_then(|t| {
        parse_serial(&t).ok_or_else(|| PihostError::not_found("no Serial line in cpuinfo output"))
    });
    match serial {
        Ok(serial) => serial,
        Err(e) => {
            log_error!(logger, "Failed to read serial : {}", e);
            SERIAL_SENTINEL.to_string()
        }
    }
}

/// Extract the 16-hex-digit token following the `Serial` label
pub fn parse_serial(cpuinfo: &str) -> Option<String> {
    for line in cpuinfo.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.trim_end() != "Serial" {
            continue;
        }
        let token = value.trim();
        if token.len() == 16 && token.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Some(token.to_string());
        }
    }
    None
}
