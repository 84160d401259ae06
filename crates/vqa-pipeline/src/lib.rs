#![deny(missing_docs)]
//! The capture → inference → display pipeline.
//!
//! This crate knows nothing about windows or terminals. A presentation layer
//! drives it through [`Session`] (or the free functions) and renders the
//! [`AnswerRecord`]s it returns.

/// Error types for the pipeline.
pub mod error;

/// Parsing of the free-text question input.
pub mod questions;

/// Per-question isolated inference.
pub mod answer;

/// Session state: the latest capture and the latest answers.
pub mod session;

pub use crate::answer::{answer, Answer, AnswerRecord};
pub use crate::error::PipelineError;
pub use crate::questions::parse_questions;
pub use crate::session::Session;
