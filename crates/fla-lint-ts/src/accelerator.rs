//! The optional syntax accelerator handle.
//!
//! Grammar loading happens at most once per handle, on first use. A failed
//! load is remembered as [`AcceleratorState::Unavailable`] so later files go
//! straight to the scanner; [`Accelerator::reset`] forgets the outcome and
//! allows another attempt.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::extractor::{Declaration, DeclarationExtractor, Dialect};
use crate::scanner::ScannerExtractor;
use crate::typescript::TypeScriptExtractor;

/// Initialization state of an [`Accelerator`].
#[derive(Debug, Clone)]
pub enum AcceleratorState {
    /// No load attempted yet.
    Uninitialized,
    /// Grammars loaded.
    Ready(Arc<TypeScriptExtractor>),
    /// A load was attempted and failed, or the accelerator is switched off.
    Unavailable(String),
}

/// Shared, lazily-initialized syntax accelerator.
///
/// Share one handle per run behind an [`Arc`]; every method takes `&self`.
#[derive(Debug)]
pub struct Accelerator {
    state: Mutex<AcceleratorState>,
}

impl Default for Accelerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accelerator {
    /// Creates an uninitialized handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(AcceleratorState::Uninitialized),
        }
    }

    /// Creates a handle that never loads grammars.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            state: Mutex::new(AcceleratorState::Unavailable("disabled".to_string())),
        }
    }

    /// Creates a shared handle.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Returns the loaded extractor, attempting the load on first call.
    #[must_use]
    pub fn get(&self) -> Option<Arc<TypeScriptExtractor>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            AcceleratorState::Ready(extractor) => Some(Arc::clone(extractor)),
            AcceleratorState::Unavailable(_) => None,
            AcceleratorState::Uninitialized => match TypeScriptExtractor::load() {
                Ok(extractor) => {
                    debug!("Syntax accelerator ready");
                    let extractor = Arc::new(extractor);
                    *state = AcceleratorState::Ready(Arc::clone(&extractor));
                    Some(extractor)
                }
                Err(e) => {
                    warn!("Syntax accelerator unavailable, using scanner: {}", e);
                    *state = AcceleratorState::Unavailable(e.to_string());
                    None
                }
            },
        }
    }

    /// Forgets any previous load outcome.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = AcceleratorState::Uninitialized;
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AcceleratorState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Extracts declarations, preferring the syntax tree and falling back to
    /// the scanner when the accelerator is unavailable or the file does not
    /// parse cleanly.
    #[must_use]
    pub fn declarations(&self, source: &str, dialect: Dialect) -> Vec<Declaration> {
        if let Some(extractor) = self.get() {
            match extractor.extract(source, dialect) {
                Ok(found) => return found,
                Err(e) => debug!("Falling back to scanner: {}", e),
            }
        }
        ScannerExtractor::scan(source)
    }
}
