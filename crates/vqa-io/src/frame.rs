use vqa_image::{color, Image, ImageError, ImageSize};

/// Channel order of the interleaved pixels delivered by a camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    /// blue, green, red
    Bgr,
    /// red, green, blue
    Rgb,
}

/// A raw 8-bit, 3-channel frame as delivered by a camera device.
#[derive(Clone, Debug)]
pub struct Frame {
    /// The size of the frame in pixels.
    pub size: ImageSize,
    /// The native channel order of `data`.
    pub order: ChannelOrder,
    /// Interleaved, row-major pixel data without row padding.
    pub data: Vec<u8>,
}

impl Frame {
    /// Create a new frame.
    pub fn new(size: ImageSize, order: ChannelOrder, data: Vec<u8>) -> Self {
        Self { size, order, data }
    }

    /// Convert the frame into an RGB image.
    ///
    /// # Errors
    ///
    /// Returns an error if the data length does not match the frame size.
    pub fn into_rgb(self) -> Result<Image<u8, 3>, ImageError> {
        let image = Image::<u8, 3>::new(self.size, self.data)?;
        match self.order {
            ChannelOrder::Rgb => Ok(image),
            ChannelOrder::Bgr => {
                let mut rgb = Image::from_size_val(image.size(), 0u8)?;
                color::rgb_from_bgr(&image, &mut rgb)?;
                Ok(rgb)
            }
        }
    }
}
