use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit status used after SIGINT or SIGTERM.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Defers SIGINT and SIGTERM while a request is running.
///
/// While idle (waiting for input) a signal exits at once. While busy it
/// only sets a flag, which the caller checks once the work is done.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    interrupted: Arc<AtomicBool>,
    idle: Arc<AtomicBool>,
}

impl Interrupt {
    /// Flags only, with no handlers attached.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install() -> Result<Self> {
        let interrupt = Self::new();

        // Handle SIGINT (Ctrl-C)
        let interrupted = Arc::clone(&interrupt.interrupted);
        let idle = Arc::clone(&interrupt.idle);
        ctrlc::set_handler(move || {
            interrupted.store(true, Ordering::SeqCst);
            if idle.load(Ordering::SeqCst) {
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
            eprintln!("\nReceived SIGINT. Finishing the current request...");
        })
        .context("Error setting SIGINT handler")?;

        // Handle SIGTERM: exit right away when idle, otherwise just record it
        signal_hook::flag::register_conditional_shutdown(
            signal_hook::consts::SIGTERM,
            INTERRUPTED_EXIT_CODE,
            Arc::clone(&interrupt.idle),
        )
        .context("Error setting SIGTERM handler")?;
        signal_hook::flag::register(
            signal_hook::consts::SIGTERM,
            Arc::clone(&interrupt.interrupted),
        )
        .context("Error setting SIGTERM handler")?;

        Ok(interrupt)
    }

    pub fn set_idle(&self, idle: bool) {
        self.idle.store(idle, Ordering::SeqCst);
    }

    pub fn was_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub fn trigger(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }
}
