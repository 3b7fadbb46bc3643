/// Conversions couleur → luminance et gestion de la transparence.
use crate::config::AlphaPolicy;

/// BT.601 luma (`0.299 R + 0.587 G + 0.114 B`), fixed-point, rounded.
///
/// # Example
/// ```
/// use ds_core::color::luma;
/// assert_eq!(luma(255, 255, 255), 255);
/// assert_eq!(luma(0, 0, 0), 0);
/// assert_eq!(luma(255, 0, 0), 76);
/// ```
#[inline(always)]
#[must_use]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    // Weights scaled by 2^14: 4899 + 9617 + 1868 = 16384.
    let y = 4899 * u32::from(r) + 9617 * u32::from(g) + 1868 * u32::from(b);
    ((y + (1 << 13)) >> 14) as u8
}

/// Resolve a pixel's transparency against a white background.
///
/// `Flatten` turns any pixel that is not fully opaque into pure white.
/// `Blend` composites the colour over white proportionally to alpha.
#[inline(always)]
#[must_use]
pub fn over_white(r: u8, g: u8, b: u8, a: u8, policy: AlphaPolicy) -> (u8, u8, u8) {
    match policy {
        AlphaPolicy::Flatten => {
            if a < 255 {
                (255, 255, 255)
            } else {
                (r, g, b)
            }
        }
        AlphaPolicy::Blend => {
            let a = u32::from(a);
            let mix = |c: u8| ((u32::from(c) * a + 255 * (255 - a) + 127) / 255) as u8;
            (mix(r), mix(g), mix(b))
        }
    }
}
