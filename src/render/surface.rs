use ratatui::style::Color;

/// A fixed-size 2D drawing surface addressed in pixels
///
/// Mirrors the handful of canvas primitives the game needs. Shapes are
/// clipped to the surface; drawing never fails.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);

    /// Reset a rectangle to the empty background
    fn clear_rect(&mut self, x: i32, y: i32, width: u32, height: u32);
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32);
    /// One-pixel outline along the inside edge of the rectangle
    fn stroke_rect(&mut self, x: i32, y: i32, width: u32, height: u32);
    /// Filled circular sector, angles in radians measured clockwise from +x
    fn fill_arc(&mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32);
}
