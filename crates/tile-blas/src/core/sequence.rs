//! Shared execution status for cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::{Result, TileError};

/// Status shared by every operation of one logical computation.
///
/// The status only moves from "in progress" to "failed". The first recorded
/// error is kept; later failures do not overwrite it.
#[derive(Debug, Default)]
pub struct Sequence {
    failed: AtomicBool,
    error: Mutex<Option<TileError>>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once any operation sharing this sequence has failed.
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }

    /// `Ok(())` while in progress, otherwise the first recorded error.
    pub fn status(&self) -> Result<()> {
        if !self.is_failed() {
            return Ok(());
        }
        let error = self.error.lock().unwrap_or_else(|e| e.into_inner());
        Err(error.clone().unwrap_or(TileError::Sequence))
    }

    /// Mark the sequence failed.
    pub fn fail(&self, err: TileError) {
        let mut error = self.error.lock().unwrap_or_else(|e| e.into_inner());
        if error.is_none() {
            tracing::warn!(error = %err, "sequence failed");
            *error = Some(err);
        }
        self.failed.store(true, Ordering::Release);
    }
}

/// Per-call record of the failure an operation caused or observed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Request {
    status: Option<TileError>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Ok(())` unless this request recorded a failure.
    pub fn status(&self) -> Result<()> {
        match &self.status {
            None => Ok(()),
            Some(err) => Err(err.clone()),
        }
    }

    /// Record `err` on this request and mark the sequence failed.
    pub fn fail(&mut self, sequence: &Sequence, err: TileError) {
        self.status = Some(err.clone());
        sequence.fail(err);
    }
}
