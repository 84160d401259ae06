/// An error type for the capture module.
#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    /// The camera device could not be opened.
    #[error("Could not open webcam: {0}")]
    DeviceUnavailable(String),

    /// The camera device opened but did not yield a frame.
    #[error("Could not read frame: {0}")]
    FrameReadError(String),

    /// The frame delivered by the device does not describe a valid image.
    #[error("Invalid frame. {0}")]
    InvalidFrame(#[from] vqa_image::ImageError),
}
