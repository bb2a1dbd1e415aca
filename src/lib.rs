//! Pihost - host platform utilities for Raspberry Pi appliances
//!
//! This library collects the small host-facing helpers Pi appliance
//! programs keep reimplementing: leveled console logging, the board
//! serial number, interface addresses, process launching that stays
//! harmless on development workstations, and exit/cleanup hooks.
//!
//! # Architecture
//! - `logger`: leveled, colorized console logging with an injectable sink
//! - `system::platform`: Pi target vs restricted workstation detection
//! - `system::serial`: board serial from `/proc/cpuinfo`
//! - `system::net`: interface address lookup
//! - `system::process`: guarded synchronous/asynchronous launching
//! - `system::lifetime`: interrupt/panic hooks and the cleanup registry
//! - `errors`: crate error type

pub mod errors;
pub mod logger;
pub mod system;

pub use errors::{PihostError, Result};
pub use logger::{LogLevel, Logger};
