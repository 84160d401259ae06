use fast_image_resize as fr;

use crate::{Image, ImageError};

/// Resize an 8-bit image to the size of `dst` with bilinear interpolation.
///
/// The bilinear kernel is stretched by the scale factor when shrinking, so every
/// source pixel under the footprint of an output pixel contributes to it.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, already allocated at the target size.
///
/// # Example
///
/// ```
/// use vqa_image::{Image, ImageSize};
/// use vqa_image::resize::resize_bilinear;
///
/// let image = Image::<u8, 3>::from_size_val(ImageSize { width: 4, height: 5 }, 7).unwrap();
/// let mut resized = Image::<u8, 3>::from_size_val(ImageSize { width: 2, height: 3 }, 0).unwrap();
///
/// resize_bilinear(&image, &mut resized).unwrap();
///
/// assert_eq!(resized.size().width, 2);
/// assert!(resized.as_slice().iter().all(|&v| v == 7));
/// ```
///
/// # Errors
///
/// Returns an error if the image has more than four channels.
pub fn resize_bilinear<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    let pixel_type = match C {
        1 => fr::PixelType::U8,
        2 => fr::PixelType::U8x2,
        3 => fr::PixelType::U8x3,
        4 => fr::PixelType::U8x4,
        _ => return Err(ImageError::UnsupportedChannels(C)),
    };

    if src.size() == dst.size() {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    // wrap both buffers without copying
    let src_len = src.as_slice().len();
    let src_image = fr::images::ImageRef::new(
        src.width() as u32,
        src.height() as u32,
        src.as_slice(),
        pixel_type,
    )
    .map_err(|_| ImageError::InvalidChannelShape(src_len, src.width() * src.height() * C))?;

    let (dst_width, dst_height) = (dst.width(), dst.height());
    let dst_len = dst.as_slice().len();
    let mut dst_image = fr::images::Image::from_slice_u8(
        dst_width as u32,
        dst_height as u32,
        dst.as_slice_mut(),
        pixel_type,
    )
    .map_err(|_| ImageError::InvalidChannelShape(dst_len, dst_width * dst_height * C))?;

    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Bilinear));

    fr::Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|_| ImageError::IncompatiblePixelTypes)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{Image, ImageError, ImageSize};

    #[test]
    fn resize_identity() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(ImageSize::from([2, 1]), vec![1, 2, 3, 4, 5, 6])?;
        let mut resized = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        super::resize_bilinear(&image, &mut resized)?;

        assert_eq!(resized.as_slice(), image.as_slice());
        Ok(())
    }

    #[test]
    fn resize_downscale_averages() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(ImageSize::from([2, 1]), vec![0, 100])?;
        let mut resized = Image::<u8, 1>::from_size_val(ImageSize::from([1, 1]), 0)?;

        super::resize_bilinear(&image, &mut resized)?;

        assert_eq!(resized.as_slice(), &[50]);
        Ok(())
    }

    #[test]
    fn resize_downscale_filters_stripes() -> Result<(), ImageError> {
        // one-pixel stripes carry more detail than the output can hold
        let stripes = (0..640).map(|x| if x % 2 == 0 { 0 } else { 255 }).collect();
        let image = Image::<u8, 1>::new(ImageSize::from([640, 1]), stripes)?;
        let mut resized = Image::<u8, 1>::from_size_val(ImageSize::from([224, 1]), 0)?;

        super::resize_bilinear(&image, &mut resized)?;

        let values = resized.as_slice();
        let (min, max) = (values.iter().min(), values.iter().max());
        assert!(values.iter().all(|&v| (100..=155).contains(&v)), "{min:?}..{max:?}");
        Ok(())
    }

    #[test]
    fn resize_downscale_rgb_to_model_input() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(ImageSize::from([640, 480]), 42)?;
        let mut resized = Image::<u8, 3>::from_size_val(ImageSize::from([224, 224]), 0)?;

        super::resize_bilinear(&image, &mut resized)?;

        assert!(resized.as_slice().iter().all(|&v| v == 42));
        Ok(())
    }

    #[test]
    fn resize_upscale_keeps_borders() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(ImageSize::from([2, 2]), vec![10, 10, 10, 10])?;
        let mut resized = Image::<u8, 1>::from_size_val(ImageSize::from([5, 7]), 0)?;

        super::resize_bilinear(&image, &mut resized)?;

        assert!(resized.as_slice().iter().all(|&v| v == 10));
        Ok(())
    }

    #[test]
    fn resize_rejects_wide_pixels() -> Result<(), ImageError> {
        let image = Image::<u8, 5>::from_size_val(ImageSize::from([2, 2]), 0)?;
        let mut resized = Image::<u8, 5>::from_size_val(ImageSize::from([1, 1]), 0)?;

        let result = super::resize_bilinear(&image, &mut resized);

        assert_eq!(result, Err(ImageError::UnsupportedChannels(5)));
        Ok(())
    }
}
