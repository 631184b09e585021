//! Turning a grid into drawing commands.
//!
//! [`render`] is a pure function from grid state to a [`Frame`], a flat list
//! of 2D-canvas style path commands. Hosts replay the frame on a real
//! surface; tests inspect it directly.

use crate::color::Rgba;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// Stroke width of the field lines in pixels.
pub const LINE_WIDTH: f64 = 1.0;

/// One drawing operation, mirroring the 2D canvas path API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Erase the rectangle `(0, 0, width, height)` to transparent.
    Clear { width: f64, height: f64 },
    /// Start a new, empty path.
    BeginPath,
    /// Set stroke color and width for the next `Stroke`.
    SetStroke { color: Rgba, width: f64 },
    /// Start a new subpath at `(x, y)`.
    MoveTo { x: f64, y: f64 },
    /// Extend the current subpath to `(x, y)`.
    LineTo { x: f64, y: f64 },
    /// Stroke every subpath of the current path.
    Stroke,
}

/// Commands for one animation frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Number of `LineTo` segments in the frame.
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::LineTo { .. }))
            .count()
    }
}

/// Emits the commands that clear a `width` x `height` surface and stroke
/// every grid line.
///
/// Each line opens with a `MoveTo` to its first point without the cursor
/// offset, visits every point (the last one again without the cursor
/// offset) and closes with a `MoveTo` onto that last point.
pub fn render(grid: &Grid, line_color: Rgba, width: f64, height: f64) -> Frame {
    let mut commands = Vec::with_capacity(grid.point_count() + 2 * grid.line_count() + 4);
    commands.push(DrawCommand::Clear { width, height });
    commands.push(DrawCommand::BeginPath);
    commands.push(DrawCommand::SetStroke {
        color: line_color,
        width: LINE_WIDTH,
    });

    for points in grid.lines() {
        let Some(first) = points.first() else {
            continue;
        };
        let start = first.displaced(false);
        commands.push(DrawCommand::MoveTo {
            x: start.x,
            y: start.y,
        });

        let last_index = points.len() - 1;
        for (idx, p) in points.iter().enumerate() {
            let is_last = idx == last_index;
            let at = p.displaced(!is_last);
            commands.push(DrawCommand::LineTo { x: at.x, y: at.y });
            if is_last {
                commands.push(DrawCommand::MoveTo { x: at.x, y: at.y });
            }
        }
    }

    commands.push(DrawCommand::Stroke);
    Frame { commands }
}
