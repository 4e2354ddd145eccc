//! Thumbnail resizing.
//!
//! Resampling is done by `fast_image_resize` on the RGBA buffer. All functions
//! return new `DecodedImage` instances without modifying the input.

use std::f64::consts::PI;

use fast_image_resize as fr;

use super::{DecodeError, DecodedImage, Interpolation};
use crate::params::ResizeSpec;

/// Apply the resize stage described by `spec`.
///
/// An unrecognized interpolation selector (`spec.interpolation == None`)
/// leaves the image at its decoded size.
pub fn apply_resize(image: DecodedImage, spec: &ResizeSpec) -> Result<DecodedImage, DecodeError> {
    match spec.interpolation {
        Some(interp) => thumbnail(image, spec.max_width, spec.max_height, interp),
        None => Ok(image),
    }
}

/// Shrink an image to fit within `max_width` x `max_height`, preserving aspect ratio.
///
/// Images that already fit are returned unchanged; this never upscales. The
/// pixel buffer is moved into the resizer, never copied.
///
/// # Errors
///
/// Returns `DecodeError::Resize` if the pixel buffer does not match the
/// image dimensions.
pub fn thumbnail(
    image: DecodedImage,
    max_width: u32,
    max_height: u32,
    interp: Interpolation,
) -> Result<DecodedImage, DecodeError> {
    if max_width >= image.width && max_height >= image.height {
        return Ok(image);
    }

    let (width, height) = thumbnail_dimensions(image.width, image.height, max_width, max_height);
    resize(image, width, height, interp)
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::Resize` for zero target dimensions or a pixel buffer
/// that does not match the source dimensions.
pub fn resize(
    image: DecodedImage,
    width: u32,
    height: u32,
    interp: Interpolation,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::Resize(format!(
            "invalid target size {width}x{height}"
        )));
    }

    if image.width == width && image.height == height {
        return Ok(image);
    }

    let src = fr::images::Image::from_vec_u8(
        image.width,
        image.height,
        image.pixels,
        fr::PixelType::U8x4,
    )
    .map_err(|e| DecodeError::Resize(e.to_string()))?;
    let mut dst = fr::images::Image::new(width, height, fr::PixelType::U8x4);

    let options = fr::ResizeOptions::new().resize_alg(resize_alg(interp)?);
    fr::Resizer::new()
        .resize(&src, &mut dst, Some(&options))
        .map_err(|e| DecodeError::Resize(e.to_string()))?;

    Ok(DecodedImage::new(width, height, dst.into_vec()))
}

fn resize_alg(interp: Interpolation) -> Result<fr::ResizeAlg, DecodeError> {
    let filter = match interp {
        Interpolation::NearestNeighbor => return Ok(fr::ResizeAlg::Nearest),
        Interpolation::Bilinear => fr::FilterType::Bilinear,
        Interpolation::Bicubic => fr::FilterType::CatmullRom,
        Interpolation::MitchellNetravali => fr::FilterType::Mitchell,
        Interpolation::Lanczos2 => fr::FilterType::Custom(
            fr::Filter::new("Lanczos2", lanczos2, 2.0)
                .map_err(|_| DecodeError::Resize("invalid Lanczos2 filter".to_string()))?,
        ),
        Interpolation::Lanczos3 => fr::FilterType::Lanczos3,
    };
    Ok(fr::ResizeAlg::Convolution(filter))
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let x = x * PI;
        x.sin() / x
    }
}

fn lanczos2(x: f64) -> f64 {
    if x.abs() < 2.0 {
        sinc(x) * sinc(x / 2.0)
    } else {
        0.0
    }
}

/// Compute the thumbnail size for a `width` x `height` image bounded by
/// `max_width` x `max_height`.
///
/// The width is constrained first, then the height; integer division
/// truncates and each side is at least 1.
pub fn thumbnail_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let (mut new_width, mut new_height) = (width as u64, height as u64);
    let (max_width, max_height) = (max_width as u64, max_height as u64);

    if new_width > max_width {
        new_height = (height as u64 * max_width / width as u64).max(1);
        new_width = max_width;
    }
    if new_height > max_height {
        new_width = (new_width * max_height / new_height).max(1);
        new_height = max_height;
    }

    (new_width.max(1) as u32, new_height.max(1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        // Create a simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
                pixels.push(255); // A
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(img, 50, 25, Interpolation::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(img.clone(), 0, 50, Interpolation::Bilinear).is_err());
        assert!(resize(img, 50, 0, Interpolation::Bilinear).is_err());
    }

    #[test]
    fn test_resize_rejects_bad_buffer() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0; 12],
        };
        assert!(matches!(
            resize(img, 5, 5, Interpolation::Bilinear),
            Err(DecodeError::Resize(_))
        ));
    }

    #[test]
    fn test_thumbnail_landscape() {
        let img = create_test_image(600, 400);
        let thumb = thumbnail(img, 200, 200, Interpolation::Lanczos3).unwrap();

        assert_eq!((thumb.width, thumb.height), (200, 133));
    }

    #[test]
    fn test_thumbnail_portrait() {
        let img = create_test_image(400, 600);
        let thumb = thumbnail(img, 200, 200, Interpolation::Bicubic).unwrap();

        assert_eq!((thumb.width, thumb.height), (133, 200));
    }

    #[test]
    fn test_thumbnail_already_smaller() {
        let img = create_test_image(100, 50);
        let thumb = thumbnail(img.clone(), 200, 200, Interpolation::NearestNeighbor).unwrap();

        // Small images should not be upscaled
        assert_eq!((thumb.width, thumb.height), (100, 50));
        assert_eq!(thumb.pixels, img.pixels);
    }

    #[test]
    fn test_thumbnail_that_fits_keeps_its_buffer() {
        let img = create_test_image(100, 50);
        let buffer = img.pixels.as_ptr();

        let thumb = thumbnail(img, 200, 200, Interpolation::Lanczos3).unwrap();
        assert_eq!(thumb.pixels.as_ptr(), buffer);
    }

    #[test]
    fn test_thumbnail_only_one_side_too_large() {
        let img = create_test_image(100, 500);
        let thumb = thumbnail(img, 200, 200, Interpolation::Bilinear).unwrap();

        assert_eq!((thumb.width, thumb.height), (40, 200));
    }

    #[test]
    fn test_all_interpolations() {
        let img = create_test_image(300, 150);

        for interp in Interpolation::ALL {
            let thumb = thumbnail(img.clone(), 100, 100, interp).unwrap();
            assert_eq!((thumb.width, thumb.height), (100, 50), "{interp:?}");
            assert_eq!(thumb.pixels.len(), 100 * 50 * 4);
        }
    }

    #[test]
    fn test_apply_resize_unknown_selector_is_noop() {
        let img = create_test_image(640, 480);
        let spec = ResizeSpec {
            max_width: 200,
            max_height: 200,
            interpolation: None,
        };

        let out = apply_resize(img, &spec).unwrap();
        assert_eq!((out.width, out.height), (640, 480));
    }

    #[test]
    fn test_apply_resize_with_selector() {
        let img = create_test_image(640, 480);
        let spec = ResizeSpec {
            max_width: 200,
            max_height: 200,
            interpolation: Some(Interpolation::MitchellNetravali),
        };

        let out = apply_resize(img, &spec).unwrap();
        assert_eq!((out.width, out.height), (200, 150));
    }

    #[test]
    fn test_thumbnail_dimensions_truncates() {
        // 4000 * 2560 / 6000 = 1706.67, truncated
        assert_eq!(thumbnail_dimensions(6000, 4000, 2560, 2560), (2560, 1706));
        assert_eq!(thumbnail_dimensions(4000, 6000, 2560, 2560), (1706, 2560));
    }

    #[test]
    fn test_thumbnail_dimensions_height_step_uses_constrained_width() {
        // 4x21 -> 3x15 after the width step, then 3 * 10 / 15 = 2
        assert_eq!(thumbnail_dimensions(4, 21, 3, 10), (2, 10));
    }

    #[test]
    fn test_thumbnail_dimensions_square() {
        assert_eq!(thumbnail_dimensions(4000, 4000, 256, 256), (256, 256));
    }

    #[test]
    fn test_thumbnail_dimensions_never_zero() {
        assert_eq!(thumbnail_dimensions(10000, 1, 100, 100), (100, 1));
        assert_eq!(thumbnail_dimensions(100, 100, 0, 0), (1, 1));
    }

    #[test]
    fn test_lanczos2_kernel() {
        assert_eq!(lanczos2(0.0), 1.0);
        assert!(lanczos2(1.0).abs() < 1e-12);
        assert_eq!(lanczos2(2.0), 0.0);
        assert_eq!(lanczos2(-3.5), 0.0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
