//! Interface address lookup
//!
//! Thin wrapper over the host's interface table. The scan keeps the
//! **last** address of the requested family bound to the named interface,
//! so callers must not assume a particular address when an interface
//! carries several of the same family.

use std::net::IpAddr;

/// Address family selector for [`ip_address`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddrFamily {
    #[default]
    V4,
    V6,
}

impl AddrFamily {
    fn matches(self, addr: &IpAddr) -> bool {
        match self {
            AddrFamily::V4 => addr.is_ipv4(),
            AddrFamily::V6 => addr.is_ipv6(),
        }
    }
}

/// Address of the given family on the named interface, or `None` when the
/// interface is absent or carries no matching address.
pub fn ip_address(interface: &str, family: AddrFamily) -> Option<IpAddr> {
    scan(host_addresses(), interface, family)
}

/// Last-match-wins scan over (interface name, address) entries
fn scan(
    entries: impl IntoIterator<Item = (String, IpAddr)>,
    interface: &str,
    family: AddrFamily,
) -> Option<IpAddr> {
    let mut found = None;
    for (name, addr) in entries {
        if name == interface && family.matches(&addr) {
            found = Some(addr);
        }
    }
    found
}

#[cfg(unix)]
fn host_addresses() -> Vec<(String, IpAddr)> {
    let Ok(ifaddrs) = nix::ifaddrs::getifaddrs() else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for ifaddr in ifaddrs {
        let Some(storage) = ifaddr.address else {
            continue;
        };
        if let Some(sin) = storage.as_sockaddr_in() {
            entries.push((ifaddr.interface_name, IpAddr::V4(sin.ip())));
        } else if let Some(sin6) = storage.as_sockaddr_in6() {
            entries.push((ifaddr.interface_name, IpAddr::V6(sin6.ip())));
        }
    }
    entries
}

#[cfg(not(unix))]
fn host_addresses() -> Vec<(String, IpAddr)> {
    // No enumeration on non-Unix hosts; lookups report absent interfaces.
    Vec::new()
}
