use vqa_image::Image;

use crate::{error::CaptureError, frame::Frame};

/// The index of the platform's default camera.
pub const DEFAULT_CAMERA_INDEX: u32 = 0;

/// A source of camera devices.
///
/// Opening a device acquires it exclusively; the returned [`CameraDevice`] holds
/// that acquisition until it is dropped.
pub trait CameraBackend {
    /// The device handle returned by [`CameraBackend::open`].
    type Device: CameraDevice;

    /// Open the camera with the given index.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::DeviceUnavailable`] if the device cannot be opened.
    fn open(&mut self, index: u32) -> Result<Self::Device, CaptureError>;
}

/// An opened, exclusively held camera device.
///
/// Implementors release the device in [`Drop`].
pub trait CameraDevice {
    /// Read exactly one frame from the device.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::FrameReadError`] if no frame is obtained.
    fn read_frame(&mut self) -> Result<Frame, CaptureError>;
}

/// Capture one RGB image from the default camera.
///
/// See [`capture_from`].
pub fn capture<B>(backend: &mut B) -> Result<Image<u8, 3>, CaptureError>
where
    B: CameraBackend + ?Sized,
{
    capture_from(backend, DEFAULT_CAMERA_INDEX)
}

/// Capture one RGB image from the camera with the given index.
///
/// The device is opened, exactly one frame is read and the device is released
/// before the frame is converted to RGB. The device is released on every path,
/// including a failed read. No retry is attempted.
///
/// # Errors
///
/// * [`CaptureError::DeviceUnavailable`] if the device cannot be opened.
/// * [`CaptureError::FrameReadError`] if the device yields no frame.
/// * [`CaptureError::InvalidFrame`] if the frame data does not match its size.
pub fn capture_from<B>(backend: &mut B, index: u32) -> Result<Image<u8, 3>, CaptureError>
where
    B: CameraBackend + ?Sized,
{
    let frame = {
        let mut device = backend.open(index)?;
        device.read_frame()?
    };

    log::debug!(
        "captured {} frame from camera {index} ({:?})",
        frame.size,
        frame.order
    );

    Ok(frame.into_rgb()?)
}
