//! Per-request context carrying a caller-controlled deactivation signal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{DomainError, DomainResult};

/// Request context threaded through every service call.
///
/// Services check it on entry and return [`DomainError::Cancelled`] instead
/// of doing work once the caller has cancelled. Nothing ever blocks on it.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancelled: Option<Arc<AtomicBool>>,
}

/// Handle used by the caller to deactivate a [`Context`].
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl Context {
    /// A context that can never be cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancel() -> (Self, CancelHandle) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Self {
                cancelled: Some(flag.clone()),
            },
            CancelHandle { flag },
        )
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    pub fn ensure_active(&self) -> DomainResult<()> {
        if self.is_cancelled() {
            Err(DomainError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }
}
