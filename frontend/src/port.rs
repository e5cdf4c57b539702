//! Browser implementations of the controller's host traits.

use std::f64::consts::TAU;

use seed::{prelude::*, *};
use tripgen_shared::{
    animator::{Canvas, FrameHandle, FrameScheduler, Pen},
    backdrop::{ImageLoader, LoadOutcome, PreloadRequest},
    bridge::{ChatRequest, HttpReply, HttpTransport, TransportError},
    geometry::{Point, Viewport},
    AiSettings, TripForm, ViewPort,
};
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::{Msg, Output, Ui};

/// Borrows the UI state and the seed orders for the length of one update.
pub struct SeedPort<'a, O: Orders<Msg>> {
    ui: &'a mut Ui,
    orders: &'a mut O,
}

impl<'a, O: Orders<Msg>> SeedPort<'a, O> {
    pub fn new(ui: &'a mut Ui, orders: &'a mut O) -> Self {
        Self { ui, orders }
    }
}

impl<O: Orders<Msg>> ImageLoader for SeedPort<'_, O> {
    fn load_image(&mut self, request: PreloadRequest) {
        self.orders.perform_cmd(async move {
            let outcome = preload(&request.url).await;
            Msg::BackdropLoaded(request.token, outcome)
        });
    }
}

impl<O: Orders<Msg>> FrameScheduler for SeedPort<'_, O> {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let sender = self.orders.msg_sender();
        let callback =
            Closure::once_into_js(move |timestamp: f64| sender(Some(Msg::Frame(timestamp))));
        window()
            .request_animation_frame(callback.unchecked_ref())
            .ok()
            .map(FrameHandle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = window().cancel_animation_frame(handle.0);
    }
}

impl<O: Orders<Msg>> ViewPort for SeedPort<'_, O> {
    fn read_form(&self) -> TripForm {
        self.ui.form.clone()
    }

    fn read_ai_settings(&self) -> AiSettings {
        self.ui.ai.clone()
    }

    fn show_markup(&mut self, markup: &str) {
        self.ui.output = Output::Markup(markup.to_string());
    }

    fn show_text(&mut self, text: &str) {
        self.ui.output = Output::Text(text.to_string());
    }

    fn alert(&mut self, message: &str) {
        let _ = window().alert_with_message(message);
    }

    fn log(&mut self, message: &str) {
        let time = js_sys::Date::new_0().to_locale_time_string("en-US");
        self.ui.push_log(&String::from(time), message);
    }

    fn console_error(&mut self, message: &str) {
        web_sys::console::error_1(&message.into());
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        let text = text.to_string();
        self.orders.perform_cmd(async move {
            let clipboard = window().navigator().clipboard();
            match JsFuture::from(clipboard.write_text(&text)).await {
                Ok(_) => Msg::PromptCopied,
                Err(err) => Msg::CopyFailed(format!("{err:?}")),
            }
        });
    }

    fn reset_form(&mut self) {
        self.ui.reset();
    }
}

async fn preload(url: &str) -> LoadOutcome {
    let Ok(img) = HtmlImageElement::new() else {
        return LoadOutcome::Failed;
    };
    img.set_referrer_policy("no-referrer");
    img.set_src(url);
    match JsFuture::from(img.decode()).await {
        Ok(_) => LoadOutcome::Loaded,
        Err(_) => {
            web_sys::console::debug_1(&format!("[frontend] backdrop failed: {url}").into());
            LoadOutcome::Failed
        }
    }
}

/// 2D context of the route canvas, scaled for the device pixel ratio.
pub struct Ctx2d {
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
    dpr: f64,
}

impl Ctx2d {
    pub fn from_canvas(canvas: &HtmlCanvasElement, viewport: Viewport, dpr: f64) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx, viewport, dpr })
    }

    fn apply(&self, pen: &Pen) {
        self.ctx.set_shadow_color(&pen.glow.to_css());
        self.ctx.set_shadow_blur(pen.blur);
        self.ctx.set_global_alpha(pen.alpha);
    }
}

impl Canvas for Ctx2d {
    fn clear(&mut self) {
        let _ = self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
        let _ = self.ctx.set_global_composite_operation("source-over");
        self.ctx
            .clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
        let _ = self.ctx.set_global_composite_operation("lighter");
    }

    fn stroke_path(&mut self, points: &[Point], pen: &Pen) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.apply(pen);
        self.ctx.set_line_width(pen.width);
        self.ctx.set_stroke_style_str(&pen.color.to_css());
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, pen: &Pen) {
        self.apply(pen);
        self.ctx.set_fill_style_str(&pen.color.to_css());
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.fill();
    }
}

/// Chat-completion transport over the browser's `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl HttpTransport for FetchTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        api_key: &str,
        payload: &ChatRequest,
    ) -> Result<HttpReply, TransportError> {
        let request = Request::new(endpoint)
            .method(Method::Post)
            .header(Header::bearer(api_key))
            .json(payload)
            .map_err(fetch_error)?;
        let response = request.fetch().await.map_err(fetch_error)?;
        let status = response.status().code;
        let body = response.text().await.map_err(fetch_error)?;
        Ok(HttpReply { status, body })
    }
}

fn fetch_error(err: FetchError) -> TransportError {
    TransportError(format!("{err:?}"))
}
