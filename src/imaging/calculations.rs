//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Trig values are rounded to this many decimal places before use so that
/// quarter turns produce exact zeros and ones instead of `6.1e-17`.
const TRIG_PRECISION: f64 = 1e12;

/// Calculate output dimensions for a width-fit resize.
///
/// The width becomes `target_width`; the height is scaled by the same ratio
/// and rounded to the nearest pixel (never below 1). Upscaling is allowed.
///
/// # Examples
/// ```
/// # use image_prep::imaging::calculate_width_fit_dimensions;
/// assert_eq!(calculate_width_fit_dimensions((1400, 1000), 2800), (2800, 2000));
/// assert_eq!(calculate_width_fit_dimensions((3000, 1001), 2800), (2800, 934));
/// ```
pub fn calculate_width_fit_dimensions(original: (u32, u32), target_width: u32) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    let ratio = target_width as f64 / orig_w as f64;
    let h = (orig_h as f64 * ratio).round().max(1.0) as u32;
    (target_width, h)
}

/// Number of counter-clockwise quarter turns (0–3) when `degrees` is an
/// exact multiple of 90, `None` otherwise.
pub fn quarter_turns(degrees: f32) -> Option<u8> {
    let normalized = degrees.rem_euclid(360.0);
    if normalized.fract() != 0.0 || normalized as u32 % 90 != 0 {
        return None;
    }
    // A tiny negative angle wraps to exactly 360.0 in f32.
    Some(((normalized as u32 / 90) % 4) as u8)
}

fn rounded_trig(radians: f64) -> (f64, f64) {
    let cos = (radians.cos() * TRIG_PRECISION).round() / TRIG_PRECISION;
    let sin = (radians.sin() * TRIG_PRECISION).round() / TRIG_PRECISION;
    (cos, sin)
}

/// Calculate the canvas needed to hold an image rotated by `degrees`
/// counter-clockwise about its center.
///
/// With `expand` off the canvas is the original size and the corners are
/// clipped. With `expand` on, the four corners are rotated about the center
/// `(w/2, h/2)` and the canvas spans `ceil(max) - floor(min)` on each axis,
/// so the rotated image always fits without cropping.
///
/// # Examples
/// ```
/// # use image_prep::imaging::calculate_rotated_bounds;
/// assert_eq!(calculate_rotated_bounds((200, 100), 90.0, true), (100, 200));
/// assert_eq!(calculate_rotated_bounds((200, 100), 135.0, true), (214, 214));
/// assert_eq!(calculate_rotated_bounds((200, 100), 135.0, false), (200, 100));
/// ```
pub fn calculate_rotated_bounds(original: (u32, u32), degrees: f32, expand: bool) -> (u32, u32) {
    if !expand {
        return original;
    }

    let (w, h) = (original.0 as f64, original.1 as f64);
    let (cx, cy) = (w / 2.0, h / 2.0);
    let (cos, sin) = rounded_trig((degrees as f64).to_radians());

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for (x, y) in [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)] {
        // Counter-clockwise on screen is clockwise in y-down coordinates
        let (dx, dy) = (x - cx, y - cy);
        let rx = cx + dx * cos + dy * sin;
        let ry = cy - dx * sin + dy * cos;
        min_x = min_x.min(rx);
        max_x = max_x.max(rx);
        min_y = min_y.min(ry);
        max_y = max_y.max(ry);
    }

    let new_w = (max_x.ceil() - min_x.floor()) as u32;
    let new_h = (max_y.ceil() - min_y.floor()) as u32;
    (new_w.max(1), new_h.max(1))
}
