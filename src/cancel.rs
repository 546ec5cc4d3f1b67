// src/cancel.rs

//! Process-wide cancellation
//!
//! A [`CancelToken`] is a one-shot flag shared between the interrupt listener
//! and every subprocess call. Once set it stays set.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use nix::sys::signal::{self as sig, SigHandler, Signal};
use std::thread;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{debug, warn};

/// Shared, one-shot cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that has not been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; returns `true` only for the call that flipped the flag
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::SeqCst)
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Cancel `token` on the first SIGINT received by this process
///
/// The handler is registered before this returns. The listener runs on a
/// background thread with its own single-threaded runtime and exits after
/// the first interrupt. It then puts back the default SIGINT disposition, so
/// a second interrupt terminates the process without waiting for cleanup.
pub fn cancel_on_interrupt(token: CancelToken) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut interrupt = {
        let _guard = runtime.enter();
        signal(SignalKind::interrupt())?
    };

    thread::Builder::new()
        .name("sigint-listener".to_string())
        .spawn(move || {
            runtime.block_on(async {
                if interrupt.recv().await.is_some() {
                    eprintln!("SIGINT received; stopping gracefully");
                    if token.cancel() {
                        debug!("Cancellation requested by interrupt");
                    }
                    // SAFETY: SigDfl installs no Rust handler code
                    if let Err(e) = unsafe { sig::signal(Signal::SIGINT, SigHandler::SigDfl) } {
                        warn!("Failed to restore default SIGINT handling: {}", e);
                    }
                } else {
                    warn!("SIGINT listener closed without a signal");
                }
            });
        })?;

    Ok(())
}
