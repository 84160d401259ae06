//! # Visual question answering models
//!
//! A [`VqaModel`] answers a free-text question about an RGB image in three steps:
//! encode the (image, question) pair, generate output tokens, decode them to text.
//!
//! - **PaliGemma**: Google's vision-language model, run with candle.
//!
//! The model is expensive to load, so the application keeps a single instance for
//! the whole process in [`shared`].

mod model;

/// PaliGemma visual question answering.
pub mod paligemma;

/// Process-wide model instance.
pub mod shared;

mod generation;
mod utils;

pub use model::VqaModel;
