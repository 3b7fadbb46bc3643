//! Grayscale preparation: transparency → white, blur, aspect-corrected
//! downscale, BT.601 luma.

use anyhow::{Context, Result};
use ds_core::color::{luma, over_white};
use ds_core::config::ResizeConfig;
use ds_core::{GrayFrame, RgbaFrame};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbImage;

/// Output size for a `width × height` source.
///
/// The height is first squashed by `height_ratio` (glyph cells are taller
/// than wide), then both sides are scaled down, never up, to fit inside
/// `max_width × max_height` keeping the aspect ratio. Sides never drop
/// below one pixel.
///
/// # Example
/// ```
/// use ds_core::config::ResizeConfig;
/// use ds_source::resize::target_size;
/// let cfg = ResizeConfig::default();
/// assert_eq!(target_size(100, 90, &cfg), (100, 55));
/// assert_eq!(target_size(600, 900, &cfg), (300, 275));
/// ```
#[must_use]
pub fn target_size(width: u32, height: u32, config: &ResizeConfig) -> (u32, u32) {
    let w = width.max(1);
    let h = ((f64::from(height) * config.height_ratio) as u32).max(1);
    let (max_w, max_h) = (config.max_width.max(1), config.max_height.max(1));
    if w <= max_w && h <= max_h {
        return (w, h);
    }
    let scale = (f64::from(max_w) / f64::from(w)).min(f64::from(max_h) / f64::from(h));
    (
        ((f64::from(w) * scale) as u32).max(1),
        ((f64::from(h) * scale) as u32).max(1),
    )
}

/// Turn a decoded RGBA frame into the grayscale frame fed to the glyph
/// conversion.
///
/// # Errors
/// Returns an error if the buffers are inconsistent or the resize fails.
///
/// # Example
/// ```
/// use ds_core::RgbaFrame;
/// use ds_core::config::ResizeConfig;
/// use ds_source::resize::prepare_grayscale;
/// let frame = RgbaFrame::new(40, 30);
/// let gray = prepare_grayscale(&frame, &ResizeConfig::default()).unwrap();
/// assert_eq!((gray.width, gray.height), (40, 18));
/// ```
pub fn prepare_grayscale(frame: &RgbaFrame, config: &ResizeConfig) -> Result<GrayFrame> {
    let rgb = flatten(frame, config)?;
    let rgb = if config.blur_sigma > 0.0 {
        image::imageops::blur(&rgb, config.blur_sigma)
    } else {
        rgb
    };

    let (tw, th) = target_size(frame.width, frame.height, config);
    let pixels = if (tw, th) == (frame.width, frame.height) {
        rgb.into_raw()
    } else {
        resize_rgb(rgb, tw, th)?
    };

    let data = pixels.chunks_exact(3).map(|p| luma(p[0], p[1], p[2])).collect();
    GrayFrame::from_raw(tw, th, data).context("grayscale buffer size mismatch")
}

/// Drop the alpha channel according to the configured policy.
fn flatten(frame: &RgbaFrame, config: &ResizeConfig) -> Result<RgbImage> {
    let data = frame
        .data
        .chunks_exact(4)
        .flat_map(|p| {
            let (r, g, b) = over_white(p[0], p[1], p[2], p[3], config.alpha);
            [r, g, b]
        })
        .collect();
    RgbImage::from_raw(frame.width, frame.height, data).context("RGBA buffer size mismatch")
}

fn resize_rgb(rgb: RgbImage, width: u32, height: u32) -> Result<Vec<u8>> {
    let (sw, sh) = rgb.dimensions();
    let src = Image::from_vec_u8(sw, sh, rgb.into_raw(), PixelType::U8x3)?;
    let mut dst = Image::new(width, height, PixelType::U8x3);
    let options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::CatmullRom));
    Resizer::new().resize(&src, &mut dst, &options)?;
    log::debug!("Resized {sw}x{sh} -> {width}x{height}");
    Ok(dst.into_vec())
}
