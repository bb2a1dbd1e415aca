//! System-level modules
//!
//! This module contains the host-facing functionality:
//! - Platform detection (Pi target vs development workstation)
//! - Board serial number lookup
//! - Interface address queries
//! - Guarded process launching (live on the board, inert elsewhere)
//! - Lifecycle hooks (interrupt, panic, cleanup registry)

pub mod lifetime;
pub mod net;
pub mod platform;
pub mod process;
pub mod serial;
