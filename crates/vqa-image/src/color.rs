use crate::{parallel, Image, ImageError};

/// Convert a BGR image to RGB by swapping the red and blue channels.
///
/// Camera stacks commonly deliver frames in BGR order; models expect RGB.
///
/// # Arguments
///
/// * `src` - The input BGR image.
/// * `dst` - The output RGB image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use vqa_image::{Image, ImageSize};
/// use vqa_image::color::rgb_from_bgr;
///
/// let src = Image::<u8, 3>::new(ImageSize { width: 1, height: 1 }, vec![0, 1, 2]).unwrap();
/// let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0).unwrap();
///
/// rgb_from_bgr(&src, &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[2, 1, 0]);
/// ```
pub fn rgb_from_bgr<T>(src: &Image<T, 3>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel
            .iter_mut()
            .zip(src_pixel.iter().rev())
            .for_each(|(d, s)| {
                *d = *s;
            });
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{Image, ImageError, ImageSize};

    #[test]
    fn rgb_from_bgr() -> Result<(), Box<dyn std::error::Error>> {
        #[rustfmt::skip]
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 1,
                height: 3,
            },
            vec![
                0, 1, 2,
                3, 4, 5,
                6, 7, 8,
            ],
        )?;

        let mut rgb = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        super::rgb_from_bgr(&image, &mut rgb)?;

        #[rustfmt::skip]
        assert_eq!(
            rgb.as_slice(),
            &[
                2, 1, 0,
                5, 4, 3,
                8, 7, 6,
            ]
        );

        Ok(())
    }

    #[test]
    fn rgb_from_bgr_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(ImageSize::from([2, 2]), 0)?;
        let mut rgb = Image::<u8, 3>::from_size_val(ImageSize::from([3, 2]), 0)?;

        assert_eq!(
            super::rgb_from_bgr(&image, &mut rgb),
            Err(ImageError::InvalidImageSize(2, 2, 3, 2))
        );

        Ok(())
    }
}
