//! One-shot message hand-off between screens.
//!
//! A screen posts a message (for example "Customer added") just before
//! navigating away; the next screen takes it when it appears. The slot holds
//! at most one message and taking it clears the slot, so a message is shown at
//! most once.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Severity of a [`FlashMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    /// The previous action succeeded.
    Success,
    /// The previous action failed.
    Error,
}

/// A short notice carried from one screen to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    /// Severity used to style the notice.
    pub kind: FlashKind,
    /// Text shown to the user.
    pub text: String,
}

impl FlashMessage {
    /// A success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    /// An error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            text: text.into(),
        }
    }
}

/// Single-slot queue with atomic take-and-clear.
///
/// The relay is `Sync` and is normally held in a `static` for the lifetime of
/// the presentation layer.
///
/// # Examples
/// ```
/// use dropoff_core::{FlashMessage, FlashRelay};
///
/// static FLASH: FlashRelay<FlashMessage> = FlashRelay::new();
///
/// FLASH.post(FlashMessage::success("Customer added"));
/// assert_eq!(FLASH.take().map(|m| m.text), Some("Customer added".to_owned()));
/// assert!(FLASH.take().is_none());
/// ```
#[derive(Debug, Default)]
pub struct FlashRelay<T> {
    slot: Mutex<Option<T>>,
}

impl<T> FlashRelay<T> {
    /// An empty relay.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Store `message`, returning any message that was never taken.
    pub fn post(&self, message: T) -> Option<T> {
        self.lock().replace(message)
    }

    /// Remove and return the pending message, if any.
    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    /// Whether no message is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        // The slot is plain data; a panic elsewhere cannot leave it half-written.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
