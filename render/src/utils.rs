//! Common helpers for label rendering

use tiny_skia::Color;

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Whether a box with top-left `origin` and `size` overlaps a
/// `width` x `height` canvas. NaN never overlaps.
pub fn box_on_canvas(origin: (f32, f32), size: (f32, f32), width: u32, height: u32) -> bool {
    let (x, y) = origin;
    let (w, h) = size;
    x < width as f32 && y < height as f32 && x + w > 0.0 && y + h > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_on_canvas() {
        assert!(box_on_canvas((10.0, 10.0), (5.0, 5.0), 100, 100));
        // Partly off the left and top edges
        assert!(box_on_canvas((-4.0, -4.0), (5.0, 5.0), 100, 100));
        assert!(!box_on_canvas((-5.0, 10.0), (5.0, 5.0), 100, 100));
        assert!(!box_on_canvas((100.0, 10.0), (5.0, 5.0), 100, 100));
        assert!(!box_on_canvas((3.0e9, 10.0), (5.0, 5.0), 100, 100));
        assert!(!box_on_canvas((f32::NAN, 10.0), (5.0, 5.0), 100, 100));
    }

    #[test]
    fn test_color_from_rgba() {
        let color = color_from_rgba([0, 0, 0, 255]).to_color_u8();
        assert_eq!(
            (color.red(), color.green(), color.blue(), color.alpha()),
            (0, 0, 0, 255)
        );
    }
}
