//! Canvas 2D surface
//!
//! Uses the `<img>` art embedded in the page when it has loaded and falls back
//! to flat shapes otherwise.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::{DrawCommand, RenderSurface, Scene};

/// Fallback background gradient (top, bottom)
const SKY_TOP: &str = "#4facfe";
const SKY_BOTTOM: &str = "#00f2fe";
const FALLBACK_AVATAR: &str = "#f1c40f";
const FALLBACK_OBSTACLE: &str = "#2ecc71";

/// Page art used by the surface
struct Art {
    avatar: Option<HtmlImageElement>,
    background: Option<HtmlImageElement>,
    obstacle: Option<HtmlImageElement>,
}

fn image_by_id(document: &Document, id: &str) -> Option<HtmlImageElement> {
    let img = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
    if img.is_none() {
        log::warn!("Image #{} missing, using fallback shapes", id);
    }
    img
}

/// Loaded and decodable
fn ready(img: &Option<HtmlImageElement>) -> Option<&HtmlImageElement> {
    img.as_ref().filter(|img| img.complete() && img.natural_width() > 0)
}

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    art: Art,
}

impl CanvasSurface {
    /// Size the canvas to the play field and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, document: &Document, width: u32, height: u32) -> Option<Self> {
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            art: Art {
                avatar: image_by_id(document, "bird-img"),
                background: image_by_id(document, "bg-img"),
                obstacle: image_by_id(document, "pipe-img"),
            },
        })
    }

    fn draw_background(&self, width: f64, height: f64) {
        let ctx = &self.ctx;
        if let Some(img) = ready(&self.art.background) {
            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, width, height);
            return;
        }
        let grad = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
        let _ = grad.add_color_stop(0.0, SKY_TOP);
        let _ = grad.add_color_stop(1.0, SKY_BOTTOM);
        ctx.set_fill_style_canvas_gradient(&grad);
        ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn draw_obstacle_pair(&self, x: f64, width: f64, upper_height: f64, lower_top: f64, lower_height: f64) {
        let ctx = &self.ctx;
        let Some(img) = ready(&self.art.obstacle) else {
            ctx.set_fill_style_str(FALLBACK_OBSTACLE);
            ctx.fill_rect(x, 0.0, width, upper_height);
            ctx.fill_rect(x, lower_top, width, lower_height);
            return;
        };

        // Upper segment: same art, flipped so the rim faces the gap
        ctx.save();
        let _ = ctx.translate(x + width / 2.0, upper_height);
        let _ = ctx.scale(1.0, -1.0);
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            -width / 2.0,
            0.0,
            width,
            upper_height,
        );
        ctx.restore();

        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, lower_top, width, lower_height);
    }

    fn draw_avatar(&self, x: f64, y: f64, w: f64, h: f64, rotation: f64) {
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.translate(x + w / 2.0, y + h / 2.0);
        // Art faces left; mirror it
        let _ = ctx.scale(-1.0, 1.0);
        let _ = ctx.rotate(rotation);
        match ready(&self.art.avatar) {
            Some(img) => {
                let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, -h / 2.0, w, h);
            }
            None => {
                ctx.set_fill_style_str(FALLBACK_AVATAR);
                ctx.begin_path();
                let _ = ctx.arc(0.0, 0.0, w / 2.0, 0.0, std::f64::consts::TAU);
                ctx.fill();
            }
        }
        ctx.restore();
    }
}

impl RenderSurface for CanvasSurface {
    fn render(&mut self, scene: &Scene) {
        for command in &scene.commands {
            match *command {
                DrawCommand::Background { width, height } => {
                    self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
                    self.draw_background(width as f64, height as f64);
                }
                DrawCommand::ObstaclePair {
                    x,
                    width,
                    upper_height,
                    lower_top,
                    lower_height,
                } => self.draw_obstacle_pair(
                    x as f64,
                    width as f64,
                    upper_height as f64,
                    lower_top as f64,
                    lower_height as f64,
                ),
                DrawCommand::Avatar { pos, size, rotation } => self.draw_avatar(
                    pos.x as f64,
                    pos.y as f64,
                    size.x as f64,
                    size.y as f64,
                    rotation as f64,
                ),
            }
        }
    }
}
