//! Host window chrome and the fire-once readiness signal.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Window is already closing")]
    AlreadyClosing,
}

/// Window controls the title bar drives
pub trait WindowChrome: Send + Sync {
    fn minimize(&self) -> Result<(), HostError>;
    fn maximize(&self) -> Result<(), HostError>;
    fn close(&self) -> Result<(), HostError>;
    fn is_maximized(&self) -> bool;
}

/// Window chrome for a terminal host.
///
/// Minimizing is accepted and ignored, maximizing toggles a full-bleed layout
/// (sidebar hidden), and closing asks the event loop to quit.
#[derive(Debug, Default)]
pub struct TerminalChrome {
    maximized: AtomicBool,
    close_requested: AtomicBool,
}

impl TerminalChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested.load(Ordering::SeqCst)
    }
}

impl WindowChrome for TerminalChrome {
    fn minimize(&self) -> Result<(), HostError> {
        tracing::debug!("Minimize ignored in terminal host");
        Ok(())
    }

    fn maximize(&self) -> Result<(), HostError> {
        let was = self.maximized.fetch_xor(true, Ordering::SeqCst);
        tracing::debug!(maximized = !was, "Toggled maximized layout");
        Ok(())
    }

    fn close(&self) -> Result<(), HostError> {
        if self.close_requested.swap(true, Ordering::SeqCst) {
            return Err(HostError::AlreadyClosing);
        }
        Ok(())
    }

    fn is_maximized(&self) -> bool {
        self.maximized.load(Ordering::SeqCst)
    }
}

/// Sender half of the readiness signal; fires at most once
#[derive(Debug)]
pub struct ReadinessSignal {
    tx: Mutex<Option<oneshot::Sender<()>>>,
}

/// Receiver half, awaited by whoever dismisses the splash
#[derive(Debug)]
pub struct ReadinessListener {
    rx: oneshot::Receiver<()>,
}

pub fn readiness_channel() -> (ReadinessSignal, ReadinessListener) {
    let (tx, rx) = oneshot::channel();
    (
        ReadinessSignal {
            tx: Mutex::new(Some(tx)),
        },
        ReadinessListener { rx },
    )
}

impl ReadinessSignal {
    /// Signal readiness. Returns true only for the first call.
    pub fn fire(&self) -> bool {
        match self.tx.lock().take() {
            Some(tx) => {
                // The listener may already be gone; the signal still counts as fired
                let _ = tx.send(());
                true
            }
            None => false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.tx.lock().is_none()
    }
}

impl ReadinessListener {
    /// Resolves true when the shell signalled readiness, false if the signal
    /// was dropped without firing.
    pub async fn wait(self) -> bool {
        self.rx.await.is_ok()
    }
}
