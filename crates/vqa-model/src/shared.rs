//! The model is loaded once per process and reused for every question.
//!
//! [`init`] is the single initialization step. It is safe to call more than once;
//! only the first successful call loads weights. There is no teardown: the model
//! lives until the process exits.

use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::paligemma::{Paligemma, PaligemmaConfig, PaligemmaError};

static MODEL: ModelSlot<Paligemma> = ModelSlot::new();

/// A slot holding a model that is loaded at most once.
pub struct ModelSlot<M> {
    cell: OnceLock<Mutex<M>>,
}

impl<M> ModelSlot<M> {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the loaded model, running `load` first if the slot is empty.
    ///
    /// A failed load leaves the slot empty so a later call can retry.
    pub fn get_or_load<E>(&self, load: impl FnOnce() -> Result<M, E>) -> Result<&Mutex<M>, E> {
        if let Some(model) = self.cell.get() {
            return Ok(model);
        }

        let model = load()?;
        Ok(self.cell.get_or_init(|| Mutex::new(model)))
    }

    /// The loaded model, if any.
    pub fn get(&self) -> Option<&Mutex<M>> {
        self.cell.get()
    }
}

impl<M> Default for ModelSlot<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the process-wide model if it is not loaded yet and return it.
///
/// Subsequent calls return the already loaded model and ignore `config`.
pub fn init(config: PaligemmaConfig) -> Result<&'static Mutex<Paligemma>, PaligemmaError> {
    MODEL.get_or_load(|| Paligemma::new(config))
}

/// The process-wide model, if [`init`] has succeeded.
pub fn get() -> Option<&'static Mutex<Paligemma>> {
    MODEL.get()
}

/// Lock a shared model for exclusive use during one batch.
pub fn lock<M>(model: &Mutex<M>) -> Result<MutexGuard<'_, M>, PaligemmaError> {
    model.lock().map_err(|_| PaligemmaError::Poisoned)
}
