#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for camera capture.
///
/// Defines [`CaptureError`] variants for device access and frame reads.
pub mod error;

/// Raw camera frames and their native channel order.
pub mod frame;

/// Scoped single-frame capture over any camera backend.
///
/// See [`capture::capture`] for the open → read → release contract.
pub mod capture;

/// GStreamer V4L2 camera backend (feature-gated).
///
/// Requires the `gstreamer` feature flag and system GStreamer libraries.
#[cfg(feature = "gstreamer")]
pub mod gstreamer;

pub use crate::capture::{capture, capture_from, CameraBackend, CameraDevice, DEFAULT_CAMERA_INDEX};
pub use crate::error::CaptureError;
pub use crate::frame::{ChannelOrder, Frame};
