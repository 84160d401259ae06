#![deny(missing_docs)]
//! Image types and the pixel operations used between the camera and the model.

/// image representation for the captured frames.
pub mod image;

/// Error types for the image module.
pub mod error;

/// Channel order conversions.
pub mod color;

/// Image resizing.
pub mod resize;

mod parallel;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
