//! Debounce timer and status indicator used by the auto-save loop.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Timing of the auto-save loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSaveConfig {
    /// Quiet period after the last edit before an auto-save fires.
    pub debounce: Duration,
    /// How long the `Saved` indicator stays up before reverting to `Idle`.
    pub saved_display: Duration,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_secs(5),
            saved_display: Duration::from_secs(3),
        }
    }
}

/// Auto-save indicator shown next to the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoSaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
}

/// A single cancellable pending timer.
///
/// Scheduling replaces (and aborts) whatever was pending. Dropping the slot
/// aborts the pending timer. Work started by `fire` is not owned by the
/// slot, so cancelling after the timer elapsed does not interrupt it.
#[derive(Debug, Default)]
pub struct DebounceSlot {
    pending: Option<JoinHandle<()>>,
}

impl DebounceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fire` after `delay` unless cancelled or replaced first.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire();
        }));
    }

    /// Abort the pending timer. Returns `true` if one had not fired yet.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DebounceSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Publishes [`AutoSaveStatus`] on a watch channel.
///
/// `Saved` reverts to `Idle` after the configured display period; any other
/// transition cancels a pending revert.
#[derive(Debug)]
pub struct StatusIndicator {
    tx: Arc<watch::Sender<AutoSaveStatus>>,
    revert: Mutex<Option<JoinHandle<()>>>,
    display: Duration,
}

impl StatusIndicator {
    pub fn new(display: Duration) -> Self {
        let (tx, _rx) = watch::channel(AutoSaveStatus::Idle);
        Self {
            tx: Arc::new(tx),
            revert: Mutex::new(None),
            display,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AutoSaveStatus> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> AutoSaveStatus {
        *self.tx.borrow()
    }

    pub fn idle(&self) {
        self.set(AutoSaveStatus::Idle);
    }

    pub fn saving(&self) {
        self.set(AutoSaveStatus::Saving);
    }

    /// Show `Saved`, then revert to `Idle` once the display period elapses.
    pub fn saved(&self) {
        self.set(AutoSaveStatus::Saved);

        let tx = Arc::clone(&self.tx);
        let display = self.display;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(display).await;
            tx.send_replace(AutoSaveStatus::Idle);
        });
        *self.revert.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    fn set(&self, status: AutoSaveStatus) {
        self.cancel_revert();
        self.tx.send_replace(status);
    }

    fn cancel_revert(&self) {
        if let Some(handle) = self
            .revert
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

impl Drop for StatusIndicator {
    fn drop(&mut self) {
        self.cancel_revert();
    }
}
