use crate::error::ImageError;

/// Image size in pixels
///
/// # Examples
///
/// ```
/// use vqa_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [u32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as u32, size.height as u32]
    }
}

/// Represents an image with interleaved pixel data.
///
/// The pixels are stored row-major with shape (H, W, C). A captured frame is an
/// `Image<u8, 3>` in RGB order.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the image is empty or the length of the pixel data does not match the
    /// image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use vqa_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize { width: 10, height: 20 },
    ///     vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.width(), 10);
    /// assert_eq!(image.height(), 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::ZeroSize);
        }

        let expected = size.width * size.height * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size filled with `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data of the image.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the mutable pixel data of the image.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get the channels of the pixel at column `x` and row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let start = (y * self.width() + x) * CHANNELS;
        Some(&self.data[start..start + CHANNELS])
    }
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageSize};
    use crate::ImageError;

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.to_string(), "10x20");
        let wh: [u32; 2] = image_size.into();
        assert_eq!(wh, [10, 20]);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(ImageSize::from([2, 1]), vec![1, 2, 3, 4, 5, 6])?;
        assert_eq!(image.cols(), 2);
        assert_eq!(image.rows(), 1);
        assert_eq!(image.pixel(1, 0), Some(&[4u8, 5, 6][..]));
        assert_eq!(image.pixel(2, 0), None);
        Ok(())
    }

    #[test]
    fn image_invalid_shape() {
        let image = Image::<u8, 3>::new(ImageSize::from([2, 2]), vec![0; 5]);
        assert_eq!(image, Err(ImageError::InvalidChannelShape(5, 12)));
    }

    #[test]
    fn image_zero_size() {
        let image = Image::<u8, 3>::from_size_val(ImageSize::from([0, 4]), 0);
        assert_eq!(image, Err(ImageError::ZeroSize));
    }
}
