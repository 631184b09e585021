//! Pure-computation rasterisation of a [`Frame`] into an RGBA8 buffer.
//!
//! This module is always available (no feature gate) so that both the `png`
//! snapshot path and any in-memory consumer share the same conversion.
//! Lines are drawn with Xiaolin Wu's anti-aliasing and composited
//! source-over onto a premultiplied buffer.

use wave_field_core::{DrawCommand, Frame, Rgba};

/// Premultiplied RGBA canvas in linear [0, 1] floats.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    background: Rgba,
    data: Vec<[f64; 4]>,
}

impl Raster {
    /// A `width` x `height` buffer filled with `background`.
    pub fn new(width: usize, height: usize, background: Rgba) -> Self {
        Self {
            width,
            height,
            background,
            data: vec![premultiply(background); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Replays `frame`, keeping path state between commands like a 2D canvas.
    pub fn execute(&mut self, frame: &Frame) {
        let mut stroke = Rgba::TRANSPARENT;
        let mut cursor: Option<(f64, f64)> = None;
        let mut segments: Vec<[f64; 4]> = Vec::new();

        for command in &frame.commands {
            match *command {
                DrawCommand::Clear { width, height } => self.clear_rect(width, height),
                DrawCommand::BeginPath => {
                    segments.clear();
                    cursor = None;
                }
                DrawCommand::SetStroke { color, .. } => stroke = color,
                DrawCommand::MoveTo { x, y } => cursor = Some((x, y)),
                DrawCommand::LineTo { x, y } => {
                    if let Some((cx, cy)) = cursor {
                        segments.push([cx, cy, x, y]);
                    }
                    cursor = Some((x, y));
                }
                DrawCommand::Stroke => {
                    for &[x0, y0, x1, y1] in &segments {
                        self.draw_line(x0, y0, x1, y1, stroke);
                    }
                }
            }
        }
    }

    /// Resets the rectangle `(0, 0, width, height)` to the background.
    fn clear_rect(&mut self, width: f64, height: f64) {
        let w = (width.max(0.0).ceil() as usize).min(self.width);
        let h = (height.max(0.0).ceil() as usize).min(self.height);
        let bg = premultiply(self.background);
        for row in self.data.chunks_mut(self.width.max(1)).take(h) {
            row[..w].fill(bg);
        }
    }

    /// Anti-aliased line from `(x0, y0)` to `(x1, y1)`.
    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba) {
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) || color.is_transparent() {
            return;
        }
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }
        let dx = x1 - x0;
        let gradient = if dx == 0.0 { 1.0 } else { (y1 - y0) / dx };

        let major_len = if steep { self.height } else { self.width } as f64;
        let start = x0.round().max(-1.0);
        let end = x1.round().min(major_len);
        let mut x = start;
        while x <= end {
            let y = y0 + gradient * (x - x0);
            let y_floor = y.floor();
            let frac = y - y_floor;
            self.plot(steep, x, y_floor, 1.0 - frac, color);
            self.plot(steep, x, y_floor + 1.0, frac, color);
            x += 1.0;
        }
    }

    fn plot(&mut self, steep: bool, major: f64, minor: f64, coverage: f64, color: Rgba) {
        let (px, py) = if steep { (minor, major) } else { (major, minor) };
        if px < 0.0 || py < 0.0 || coverage <= 0.0 {
            return;
        }
        let (px, py) = (px as usize, py as usize);
        if px >= self.width || py >= self.height {
            return;
        }
        let alpha = color.a * coverage;
        let dst = &mut self.data[py * self.width + px];
        let src = [color.r * alpha, color.g * alpha, color.b * alpha, alpha];
        for (d, s) in dst.iter_mut().zip(src) {
            *d = s + *d * (1.0 - alpha);
        }
    }

    /// Straight-alpha RGBA8 bytes, row-major, `width * height * 4` long.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|&[r, g, b, a]| {
                let straight = |c: f64| {
                    if a > 0.0 {
                        ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8
                    } else {
                        0
                    }
                };
                [
                    straight(r),
                    straight(g),
                    straight(b),
                    (a.clamp(0.0, 1.0) * 255.0).round() as u8,
                ]
            })
            .collect()
    }
}

fn premultiply(c: Rgba) -> [f64; 4] {
    [c.r * c.a, c.g * c.a, c.b * c.a, c.a]
}

/// Rasterises `frame` onto a `width` x `height` buffer over `background`.
pub fn frame_to_rgba(frame: &Frame, width: usize, height: usize, background: Rgba) -> Vec<u8> {
    let mut raster = Raster::new(width, height, background);
    raster.execute(frame);
    raster.to_rgba8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_field_core::{Seed, Viewport, WaveConfig, WaveField};

    fn white() -> Rgba {
        Rgba::from_rgb8(255, 255, 255, 1.0)
    }

    fn pixel(buf: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
        let i = (y * width + x) * 4;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    fn line_frame(x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba) -> Frame {
        Frame {
            commands: vec![
                DrawCommand::BeginPath,
                DrawCommand::SetStroke { color, width: 1.0 },
                DrawCommand::MoveTo { x: x0, y: y0 },
                DrawCommand::LineTo { x: x1, y: y1 },
                DrawCommand::Stroke,
            ],
        }
    }

    #[test]
    fn buffer_has_four_bytes_per_pixel() {
        let buf = frame_to_rgba(&Frame::default(), 8, 4, Rgba::TRANSPARENT);
        assert_eq!(buf.len(), 8 * 4 * 4);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn background_fills_every_pixel() {
        let bg = Rgba::from_rgb8(10, 20, 30, 1.0);
        let buf = frame_to_rgba(&Frame::default(), 3, 3, bg);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(pixel(&buf, 3, x, y), [10, 20, 30, 255]);
            }
        }
    }

    #[test]
    fn horizontal_line_covers_its_row() {
        let frame = line_frame(0.0, 2.0, 9.0, 2.0, white());
        let buf = frame_to_rgba(&frame, 10, 5, Rgba::TRANSPARENT);
        for x in 0..10 {
            assert_eq!(pixel(&buf, 10, x, 2), [255, 255, 255, 255], "x = {x}");
            assert_eq!(pixel(&buf, 10, x, 0)[3], 0);
        }
    }

    #[test]
    fn vertical_line_covers_its_column() {
        let frame = line_frame(4.0, 0.0, 4.0, 7.0, white());
        let buf = frame_to_rgba(&frame, 8, 8, Rgba::TRANSPARENT);
        for y in 0..8 {
            assert_eq!(pixel(&buf, 8, 4, y)[3], 255, "y = {y}");
        }
        assert_eq!(pixel(&buf, 8, 0, 0)[3], 0);
    }

    #[test]
    fn translucent_stroke_blends_over_background() {
        let bg = Rgba::from_rgb8(0, 0, 0, 1.0);
        let frame = line_frame(0.0, 1.0, 4.0, 1.0, Rgba::from_rgb8(255, 255, 255, 0.5));
        let buf = frame_to_rgba(&frame, 5, 3, bg);
        let p = pixel(&buf, 5, 2, 1);
        assert_eq!(p[3], 255);
        assert!((i32::from(p[0]) - 128).abs() <= 1, "got {p:?}");
    }

    #[test]
    fn lines_outside_the_buffer_are_clipped() {
        let frame = line_frame(-500.0, -500.0, -100.0, 900.0, white());
        let buf = frame_to_rgba(&frame, 16, 16, Rgba::TRANSPARENT);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn move_to_breaks_the_path() {
        let frame = Frame {
            commands: vec![
                DrawCommand::SetStroke {
                    color: white(),
                    width: 1.0,
                },
                DrawCommand::MoveTo { x: 0.0, y: 0.0 },
                DrawCommand::LineTo { x: 2.0, y: 0.0 },
                DrawCommand::MoveTo { x: 0.0, y: 4.0 },
                DrawCommand::LineTo { x: 2.0, y: 4.0 },
                DrawCommand::Stroke,
            ],
        };
        let buf = frame_to_rgba(&frame, 5, 5, Rgba::TRANSPARENT);
        assert_eq!(pixel(&buf, 5, 1, 2)[3], 0, "path should not join rows");
        assert_eq!(pixel(&buf, 5, 1, 0)[3], 255);
        assert_eq!(pixel(&buf, 5, 1, 4)[3], 255);
    }

    #[test]
    fn clear_resets_to_background() {
        let bg = Rgba::from_rgb8(0, 0, 255, 1.0);
        let mut frame = line_frame(0.0, 1.0, 3.0, 1.0, white());
        frame.commands.push(DrawCommand::Clear {
            width: 4.0,
            height: 4.0,
        });
        let buf = frame_to_rgba(&frame, 4, 4, bg);
        assert_eq!(pixel(&buf, 4, 1, 1), [0, 0, 255, 255]);
    }

    #[test]
    fn rendered_field_marks_some_pixels() {
        let field =
            WaveField::new(WaveConfig::default(), 42.0, Viewport::new(64.0, 48.0).unwrap())
                .unwrap();
        let mut field = field;
        let frame = field.tick(1000.0);
        let buf = frame_to_rgba(&frame, 64, 48, Rgba::TRANSPARENT);
        let lit = buf.chunks(4).filter(|p| p[3] > 0).count();
        assert!(lit > 0 && lit < 64 * 48, "lit pixels: {lit}");
    }

    #[test]
    fn same_seed_same_pixels() {
        let mut seed = Seed::new(48.0, 32.0, 7.0);
        seed.frames = 5;
        let (_, a) = seed.replay().unwrap();
        let (_, b) = seed.replay().unwrap();
        assert_eq!(
            frame_to_rgba(&a, 48, 32, Rgba::TRANSPARENT),
            frame_to_rgba(&b, 48, 32, Rgba::TRANSPARENT)
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_line_keeps_bytes_consistent(
                x0 in -50.0_f64..150.0,
                y0 in -50.0_f64..150.0,
                x1 in -50.0_f64..150.0,
                y1 in -50.0_f64..150.0,
                alpha in 0.0_f64..=1.0,
            ) {
                let frame = line_frame(x0, y0, x1, y1, Rgba::from_rgb8(255, 0, 0, alpha));
                let buf = frame_to_rgba(&frame, 100, 100, Rgba::TRANSPARENT);
                prop_assert_eq!(buf.len(), 100 * 100 * 4);
                for p in buf.chunks(4) {
                    prop_assert!(p[0] == 0 || p[0] == 255, "red was {}", p[0]);
                    prop_assert_eq!(p[1], 0);
                    prop_assert_eq!(p[2], 0);
                }
            }
        }
    }
}
