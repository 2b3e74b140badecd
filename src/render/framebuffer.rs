use std::f32::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use super::surface::Surface;

/// In-memory pixel surface; `None` is the cleared background
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Option<Color>>,
    fill: Color,
    stroke: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width as usize * height as usize],
            fill: Color::White,
            stroke: Color::White,
        }
    }

    /// Colour of a pixel, `None` if cleared or outside the surface
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Terminal presentation sampling the centre pixel of every cell
    pub fn view(&self, cell_size: u32) -> FramebufferView<'_> {
        FramebufferView {
            framebuffer: self,
            cell_size: cell_size.max(1),
        }
    }

    fn paint(&mut self, x: i32, y: i32, color: Option<Color>) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = color;
    }

    /// Clip a rectangle to the surface as half-open pixel ranges
    fn clip(&self, x: i32, y: i32, width: u32, height: u32) -> (i64, i64, i64, i64) {
        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + width as i64).min(self.width as i64);
        let y1 = (y as i64 + height as i64).min(self.height as i64);
        (x0, y0, x1, y1)
    }

    fn paint_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Option<Color>) {
        let (x0, y0, x1, y1) = self.clip(x, y, width, height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.paint(px as i32, py as i32, color);
            }
        }
    }
}

impl Surface for Framebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn clear_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.paint_rect(x, y, width, height, None);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.paint_rect(x, y, width, height, Some(self.fill));
    }

    fn stroke_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let color = Some(self.stroke);
        let right = x + width as i32 - 1;
        let bottom = y + height as i32 - 1;

        self.paint_rect(x, y, width, 1, color);
        self.paint_rect(x, bottom, width, 1, color);
        self.paint_rect(x, y, 1, height, color);
        self.paint_rect(right, y, 1, height, color);
    }

    fn fill_arc(&mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32) {
        if radius <= 0.0 {
            return;
        }
        let sweep = end_angle - start_angle;
        let full_circle = sweep >= TAU;
        let color = Some(self.fill);

        let x0 = (cx - radius).floor() as i32;
        let y0 = (cy - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y1 = (cy + radius).ceil() as i32;

        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                if !full_circle {
                    let angle = (dy.atan2(dx) - start_angle).rem_euclid(TAU);
                    if angle > sweep {
                        continue;
                    }
                }
                self.paint(px, py, color);
            }
        }
    }
}

/// Draws one grid cell as two terminal columns so cells look square
pub struct FramebufferView<'a> {
    framebuffer: &'a Framebuffer,
    cell_size: u32,
}

impl FramebufferView<'_> {
    pub fn columns(&self) -> u32 {
        self.framebuffer.width / self.cell_size
    }

    pub fn rows(&self) -> u32 {
        self.framebuffer.height / self.cell_size
    }
}

impl Widget for FramebufferView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let half = (self.cell_size / 2) as i32;

        for row in 0..self.rows() {
            let y = area.y as u32 + row;
            if y >= area.bottom() as u32 {
                break;
            }

            for column in 0..self.columns() {
                let x = area.x as u32 + column * 2;
                if x + 1 >= area.right() as u32 {
                    break;
                }

                let px = (column * self.cell_size) as i32 + half;
                let py = (row * self.cell_size) as i32 + half;
                let (symbol, style) = match self.framebuffer.pixel(px, py) {
                    Some(color) => ("██", Style::default().fg(color)),
                    None => ("· ", Style::default().fg(Color::DarkGray)),
                };
                buf.set_string(x as u16, y as u16, symbol, style);
            }
        }
    }
}
