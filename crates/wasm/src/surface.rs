//! Canvas 2D [`Surface`] plus the pointer follower dot.

use glam::DVec2;
use wasm_bindgen::{JsCast, JsValue};
use wave_field_core::{DrawCommand, Frame, Rgba, Surface, WaveError};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

const FOLLOWER_STYLE: &str = "position: absolute; top: 0; left: 0; width: 8px; height: 8px; \
     background: rgba(255, 255, 255, 0.1); border-radius: 50%; pointer-events: none; \
     transform: translate3d(-50%, -50%, 0); will-change: transform; z-index: 10;";

const CANVAS_STYLE: &str = "display: block; width: 100%; height: 100%;";

fn host_err(what: &str, e: JsValue) -> WaveError {
    WaveError::Host(format!("{what}: {e:?}"))
}

/// CSS transform placing an element's top-left corner at `p`.
fn translate(p: DVec2) -> String {
    format!("translate3d({}px, {}px, 0)", p.x, p.y)
}

pub struct CanvasSurface {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    follower: HtmlElement,
}

impl CanvasSurface {
    /// Appends the follower dot and a canvas to `container` and paints the
    /// container background.
    pub fn attach(
        document: &Document,
        container: HtmlElement,
        background: Rgba,
    ) -> Result<Self, WaveError> {
        let follower: HtmlElement = document
            .create_element("div")
            .map_err(|e| host_err("create follower", e))?
            .dyn_into()
            .map_err(|_| WaveError::Host("follower is not an HtmlElement".into()))?;
        follower.style().set_css_text(FOLLOWER_STYLE);
        container
            .append_child(&follower)
            .map_err(|e| host_err("append follower", e))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| host_err("create canvas", e))?
            .dyn_into()
            .map_err(|_| WaveError::Host("canvas is not an HtmlCanvasElement".into()))?;
        canvas.style().set_css_text(CANVAS_STYLE);
        container
            .append_child(&canvas)
            .map_err(|e| host_err("append canvas", e))?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| host_err("getContext", e))?
            .ok_or_else(|| WaveError::Host("2d context not supported".into()))?
            .dyn_into()
            .map_err(|_| WaveError::Host("context is not 2d".into()))?;

        container
            .style()
            .set_property("background-color", &background.to_css())
            .map_err(|e| host_err("set background", e))?;

        Ok(Self {
            container,
            canvas,
            ctx,
            follower,
        })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: f64, height: f64) -> Result<(), WaveError> {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        Ok(())
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), WaveError> {
        for command in &frame.commands {
            match *command {
                DrawCommand::Clear { width, height } => self.ctx.clear_rect(0.0, 0.0, width, height),
                DrawCommand::BeginPath => self.ctx.begin_path(),
                DrawCommand::SetStroke { color, width } => {
                    self.ctx.set_stroke_style_str(&color.to_css());
                    self.ctx.set_line_width(width);
                }
                DrawCommand::MoveTo { x, y } => self.ctx.move_to(x, y),
                DrawCommand::LineTo { x, y } => self.ctx.line_to(x, y),
                DrawCommand::Stroke => self.ctx.stroke(),
            }
        }
        Ok(())
    }

    fn move_follower(&mut self, top_left: DVec2) -> Result<(), WaveError> {
        self.follower
            .style()
            .set_property("transform", &translate(top_left))
            .map_err(|e| host_err("move follower", e))
    }

    fn clear(&mut self) {
        self.container.set_inner_html("");
    }
}
