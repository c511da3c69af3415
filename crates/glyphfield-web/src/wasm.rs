#![forbid(unsafe_code)]

use glyphfield_engine::Engine;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::canvas::CanvasSurface;
use crate::{CanvasSize, WebError, WebOptions, timestamp};

/// Glyph field bound to a `<canvas>`.
///
/// Until `init` succeeds every other method is a no-op and `frame` returns
/// `false`, so a page that failed to initialize never starts its loop.
#[wasm_bindgen]
pub struct GlyphFieldWeb {
    canvas: Option<HtmlCanvasElement>,
    surface: Option<CanvasSurface>,
    engine: Option<Engine>,
    options: WebOptions,
}

#[wasm_bindgen]
impl GlyphFieldWeb {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            canvas: None,
            surface: None,
            engine: None,
            options: WebOptions::default(),
        }
    }

    /// Bind to `canvas` and build the grid for its current client size.
    ///
    /// `options` is a plain object or a JSON string; omitted fields keep their
    /// defaults. Fails when the options are invalid or the canvas has no 2D
    /// context.
    pub fn init(
        &mut self,
        canvas: HtmlCanvasElement,
        options: Option<JsValue>,
    ) -> Result<(), JsValue> {
        self.destroy();

        let options = WebOptions::from_json(&options_json(options)?).map_err(to_js)?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| to_js(WebError::MissingContext))?
            .dyn_into()
            .map_err(|_| to_js(WebError::MissingContext))?;

        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let size = CanvasSize::new(
            f64::from(canvas.client_width()),
            f64::from(canvas.client_height()),
            dpr,
        );
        set_backing_size(&canvas, size);

        let mut surface = CanvasSurface::new(ctx, size);
        surface.configure(size, &options.css_font())?;
        let engine = Engine::new(options.engine.clone(), size.viewport())
            .map_err(|err| to_js(WebError::Config(err)))?;

        self.canvas = Some(canvas);
        self.surface = Some(surface);
        self.engine = Some(engine);
        self.options = options;
        Ok(())
    }

    /// The element's client size or `devicePixelRatio` changed.
    ///
    /// The backing store follows immediately (and is repainted from the
    /// current grid); the grid itself is rebuilt once resizing settles.
    pub fn resize(&mut self, css_width: f64, css_height: f64, dpr: f64, now_ms: f64) {
        let (Some(canvas), Some(surface), Some(engine)) =
            (&self.canvas, &mut self.surface, &mut self.engine)
        else {
            return;
        };
        let size = CanvasSize::new(css_width, css_height, dpr);
        if canvas.width() != size.backing_width || canvas.height() != size.backing_height {
            set_backing_size(canvas, size);
            if surface.configure(size, &self.options.css_font()).is_err() {
                glyphfield_core::warn!("canvas context rejected transform");
            }
            engine.full_draw(surface);
        }
        engine.handle_resize(size.viewport(), timestamp(now_ms));
    }

    /// Pointer position in CSS pixels relative to the canvas.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(engine) = self.engine.as_mut() {
            engine.pointer_moved(x, y);
        }
    }

    /// Pointer left the canvas.
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.pointer_left();
        }
    }

    /// Advance one display frame. Returns `false` once the page should stop
    /// requesting animation frames.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        match (self.engine.as_mut(), self.surface.as_mut()) {
            (Some(engine), Some(surface)) => engine.frame(surface, timestamp(now_ms)).keep_running,
            _ => false,
        }
    }

    /// Number of cells currently animating.
    #[wasm_bindgen(js_name = activeCells)]
    pub fn active_cells(&self) -> u32 {
        self.engine
            .as_ref()
            .map_or(0, |engine| engine.dirty().len() as u32)
    }

    /// Explicit teardown for JS callers. Stops the loop and releases the
    /// canvas.
    pub fn destroy(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.stop();
        }
        self.engine = None;
        self.surface = None;
        self.canvas = None;
    }
}

impl Default for GlyphFieldWeb {
    fn default() -> Self {
        Self::new()
    }
}

fn set_backing_size(canvas: &HtmlCanvasElement, size: CanvasSize) {
    canvas.set_width(size.backing_width);
    canvas.set_height(size.backing_height);
}

fn options_json(options: Option<JsValue>) -> Result<String, JsValue> {
    let Some(value) = options else {
        return Ok(String::new());
    };
    if value.is_undefined() || value.is_null() {
        return Ok(String::new());
    }
    if let Some(text) = value.as_string() {
        return Ok(text);
    }
    Ok(js_sys::JSON::stringify(&value)?.into())
}

fn to_js(err: WebError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
