//! Perceptually ordered color map for matrix cells and the colorbar.

use image::Rgb;

/// Viridis sampled at nine evenly spaced stops.
const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

/// Color for `t` in `[0, 1]`; values outside are clamped and NaN maps to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn viridis(t: f64) -> Rgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let last = VIRIDIS.len() - 1;
    #[allow(clippy::cast_precision_loss)]
    let pos = t * last as f64;
    let lo = (pos.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    let frac = pos - pos.floor();

    let mix = |a: u8, b: u8| -> u8 {
        let v = f64::from(a) + (f64::from(b) - f64::from(a)) * frac;
        v.round().clamp(0.0, 255.0) as u8
    };

    let (a, b) = (VIRIDIS[lo], VIRIDIS[hi]);
    Rgb([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])])
}

/// Black or white, whichever reads better on `bg`.
#[must_use]
pub fn contrast_text(bg: Rgb<u8>) -> Rgb<u8> {
    let [r, g, b] = bg.0;
    let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luma > 140.0 {
        Rgb([0, 0, 0])
    } else {
        Rgb([255, 255, 255])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_stops() {
        assert_eq!(viridis(0.0), Rgb([68, 1, 84]));
        assert_eq!(viridis(1.0), Rgb([253, 231, 37]));
        assert_eq!(viridis(0.5), Rgb([33, 144, 141]));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.5), viridis(1.0));
        assert_eq!(viridis(f64::NAN), viridis(0.0));
    }

    #[test]
    fn interpolates_between_stops() {
        // Halfway between the first two stops.
        assert_eq!(viridis(0.0625), Rgb([70, 23, 103]));
    }

    #[test]
    fn text_contrast_flips_with_brightness() {
        assert_eq!(contrast_text(viridis(0.0)), Rgb([255, 255, 255]));
        assert_eq!(contrast_text(viridis(1.0)), Rgb([0, 0, 0]));
    }
}
