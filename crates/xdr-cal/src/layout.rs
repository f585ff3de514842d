//! Surface sizing.
//!
//! The UI works in device-independent pixels (DIPs). Generators need device
//! pixels, so scaling is applied here, before any pattern runs.

/// DIPs to device pixels, rounded to nearest.
#[inline]
pub fn to_device_pixels(dips: f32, scale: f32) -> u32 {
    let px = (dips * scale).round();
    if px.is_finite() && px > 0.0 { px as u32 } else { 0 }
}

/// Enforces an optional minimum on both surface edges.
#[inline]
pub fn min_surface_size(width: u32, height: u32, min: Option<u32>) -> (u32, u32) {
    match min {
        Some(m) => (width.max(m), height.max(m)),
        None => (width, height),
    }
}

/// Size of the calibration area, in DIPs.
///
/// The area covers `percent` of the window (`window_w * window_h`), square
/// when it fits inside the available box, otherwise stretched along the
/// longer available edge. `None` when the result would be empty.
pub fn calibration_size(
    available_w: f32,
    available_h: f32,
    window_w: f32,
    window_h: f32,
    percent: f32,
) -> Option<(f32, f32)> {
    let target_area = window_w * window_h * percent / 100.0;
    let square = target_area.sqrt();

    let (w, h) = if square <= available_w.min(available_h) {
        (square, square)
    } else if available_w > available_h {
        ((target_area / available_h).min(available_w), available_h)
    } else {
        (available_w, (target_area / available_w).min(available_h))
    };

    (w > 0.0 && h > 0.0).then_some((w, h))
}
