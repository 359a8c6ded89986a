/// Largest preview edge in pixels.
pub const MAX_PREVIEW_EDGE: u32 = 256;

/// Scales `width × height` down so neither edge exceeds `max_edge`,
/// keeping the aspect ratio.
///
/// The larger edge decides the constraining axis; a square image is
/// constrained by its height. Fractional sizes are truncated, and an edge
/// never drops below one pixel. Images already inside the box come back
/// unchanged.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let (mut w, mut h) = (width as f64, height as f64);
    let max = max_edge as f64;

    if w > h {
        if w > max {
            h *= max / w;
            w = max;
        }
    } else if h > max {
        w *= max / h;
        h = max;
    }

    (to_pixels(w), to_pixels(h))
}

fn to_pixels(v: f64) -> u32 {
    (v.trunc() as u32).max(1)
}
