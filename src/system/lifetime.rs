//! Process lifecycle hooks
//!
//! One-time wiring of the process-wide exit paths: a Ctrl-C listener, a
//! panic hook for anything nobody caught, and an additive registry of
//! cleanup callbacks both paths run before terminating. Meant to be
//! installed once near program start; registrations are never retracted.

use std::io::Write;
use std::panic;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::{PihostError, Result};
use crate::log_error;
use crate::logger::Logger;

/// Exit code after a Ctrl-C interrupt
pub const INTERRUPT_EXIT_CODE: i32 = 2;
/// Exit code after an uncaught panic
pub const PANIC_EXIT_CODE: i32 = 99;

type CleanupHook = Arc<dyn Fn() + Send + Sync>;

static CLEANUP_HOOKS: Mutex<Vec<CleanupHook>> = Mutex::new(Vec::new());

/// Register a callback to run before the process terminates. Additive:
/// repeated calls keep adding hooks, never replacing earlier ones.
pub fn register_cleanup<F>(callback: F)
where
    F: Fn() + Send + Sync + 'static,
{
    CLEANUP_HOOKS.lock().push(Arc::new(callback));
}

/// Run every registered cleanup hook in registration order.
///
/// The interrupt and panic paths call this themselves; an orderly
/// shutdown calls it directly before returning from `main`.
pub fn run_cleanup() {
    let hooks: Vec<CleanupHook> = CLEANUP_HOOKS.lock().clone();
    for hook in hooks {
        hook();
    }
}

/// Wire the interrupt listener and the panic hook.
///
/// Call once near program start, from inside a tokio runtime (the
/// listener is a spawned task). A missing runtime is reported as a
/// `SignalOperation` error.
///
/// - Ctrl-C: prints a fixed `Ctrl-C...` line, runs cleanup, exits 2.
/// - Uncaught panic: logs the panic at Error level, appends a timestamped
///   report to `crash.log`, runs cleanup, exits 99.
pub fn install_hooks(logger: &'static Logger) -> Result<()> {
    let handle = tokio::runtime::Handle::try_current().map_err(|e| {
        PihostError::signal_operation(format!("interrupt listener needs a tokio runtime: {}", e))
    })?;

    install_panic_hook(logger);

    handle.spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            let code = on_interrupt(&mut std::io::stdout());
            std::process::exit(code);
        }
    });

    Ok(())
}

/// Interrupt handler body, separated from the exit call
fn on_interrupt(console: &mut dyn Write) -> i32 {
    let _ = writeln!(console, "Ctrl-C...");
    run_cleanup();
    INTERRUPT_EXIT_CODE
}

/// Panic handler body, separated from the exit call
fn on_panic(logger: &Logger, message: &str, location: &str) -> i32 {
    log_error!(logger, "Uncaught panic at {}: {}", location, message);
    run_cleanup();
    PANIC_EXIT_CODE
}

fn install_panic_hook(logger: &'static Logger) {
    panic::set_hook(Box::new(move |panic_info| {
        let payload = panic_info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "Unknown location".to_string());

        let backtrace = std::backtrace::Backtrace::force_capture();
        let timestamp = chrono::Utc::now()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string();

        if let Err(e) = write_crash_log(&timestamp, &message, &location, &backtrace) {
            eprintln!("Failed to write crash log: {}", e);
        }

        let code = on_panic(logger, &message, &location);
        std::process::exit(code);
    }));
}

fn write_crash_log(
    timestamp: &str,
    message: &str,
    location: &str,
    backtrace: &std::backtrace::Backtrace,
) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("crash.log")?;

    writeln!(file, "==========================================")?;
    writeln!(file, "Crash Report - {}", timestamp)?;
    writeln!(file, "==========================================")?;
    writeln!(file, "Message: {}", message)?;
    writeln!(file, "Location: {}", location)?;
    writeln!(file, "\nBacktrace:")?;
    writeln!(file, "{:?}", backtrace)?;
    writeln!(file, "==========================================\n")?;

    Ok(())
}
