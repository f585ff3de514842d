//! Generation gating for asynchronous reference image loads.
//!
//! Decodes run off the render thread and may finish out of order. Each load
//! takes a [`LoadTicket`] stamped with a fresh generation; starting a new
//! load cancels the outstanding one. On completion the result is committed
//! through [`ImageLoader::commit`], which only lets the newest ticket through.
//!
//! ```rust
//! use xdr_cal::loader::{ImageLoader, LoadOutcome};
//!
//! let mut loader = ImageLoader::new();
//! let first = loader.begin();
//! let second = loader.begin();
//! assert!(first.is_cancelled());
//!
//! assert!(matches!(loader.commit(first, Ok(1)), LoadOutcome::Stale));
//! assert!(matches!(loader.commit(second, Ok(2)), LoadOutcome::Apply(2)));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::{debug, warn};
use xdr_core::DecodeError;

/// Monotonic generation counter.
#[derive(Debug, Default)]
pub struct Generation(AtomicU64);

impl Generation {
    /// Starts at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest issued generation.
    #[inline]
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Issues a new generation and returns it.
    #[inline]
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// True if `generation` is still the latest.
    #[inline]
    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// Handle carried by one in-flight load.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    cancel: Arc<AtomicBool>,
}

impl LoadTicket {
    /// Generation this load was issued under.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once a newer load started or the loader was shut down.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    /// Bails out of a decode between stages.
    pub fn check(&self, stage: &str) -> Result<(), DecodeError> {
        if self.is_cancelled() {
            Err(DecodeError::cancelled(stage))
        } else {
            Ok(())
        }
    }

    fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }
}

/// What to do with a finished load.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// Newest load succeeded; install `T`.
    Apply(T),
    /// A newer load was issued or this one was cancelled; dropped.
    Stale,
    /// Newest load failed; keep the previous image.
    Failed(DecodeError),
}

impl<T> LoadOutcome<T> {
    /// True for [`LoadOutcome::Apply`].
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Apply(_))
    }
}

/// Issues tickets and decides which completions land.
///
/// At most one load is outstanding: [`begin`](Self::begin) cancels the
/// previous ticket.
#[derive(Debug, Default)]
pub struct ImageLoader {
    generation: Generation,
    outstanding: Option<LoadTicket>,
}

impl ImageLoader {
    /// Creates an idle loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a load, cancelling any outstanding one.
    pub fn begin(&mut self) -> LoadTicket {
        if let Some(prev) = self.outstanding.take() {
            prev.cancel();
            debug!(generation = prev.generation, "load superseded");
        }
        let ticket = LoadTicket {
            generation: self.generation.bump(),
            cancel: Arc::new(AtomicBool::new(false)),
        };
        self.outstanding = Some(ticket.clone());
        ticket
    }

    /// True while the newest ticket has not been committed.
    pub fn is_pending(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Latest issued generation.
    pub fn generation(&self) -> u64 {
        self.generation.current()
    }

    /// Cancels the outstanding load, if any.
    pub fn cancel(&mut self) {
        if let Some(t) = self.outstanding.take() {
            t.cancel();
        }
    }

    /// True if `ticket` is the newest one issued and was not cancelled.
    pub fn is_live(&self, ticket: &LoadTicket) -> bool {
        self.generation.is_current(ticket.generation) && !ticket.is_cancelled()
    }

    /// Gates a finished load.
    pub fn commit<T>(&mut self, ticket: LoadTicket, result: Result<T, DecodeError>) -> LoadOutcome<T> {
        if !self.is_live(&ticket) {
            debug!(
                generation = ticket.generation,
                latest = self.generation.current(),
                "stale load dropped"
            );
            return LoadOutcome::Stale;
        }
        self.outstanding = None;

        match result {
            Ok(value) => LoadOutcome::Apply(value),
            Err(e) if e.is_cancelled() => LoadOutcome::Stale,
            Err(e) => {
                warn!(error = %e, "reference image load failed");
                LoadOutcome::Failed(e)
            }
        }
    }
}
