/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the source and destination sizes differ.
    #[error("Image size mismatch: {0}x{1} vs {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when an image has no pixels.
    #[error("Image size cannot be zero")]
    ZeroSize,

    /// Error when the pixel layout has no resize kernel.
    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannels(usize),

    /// Error when the resizer rejects the source and destination pair.
    #[error("Incompatible pixel types")]
    IncompatiblePixelTypes,
}
