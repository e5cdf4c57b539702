use rand::Rng;

use crate::{
    animator::{Canvas, FrameScheduler, RouteAnimator, SceneParams},
    backdrop::{BackdropLoader, BackdropStyle, ImageLoader, LoadOutcome, LoadToken},
    bridge::{AiConfig, AiSettings, BridgeError, HttpTransport, call_external_generator},
    debounce::{DebounceTicket, Debouncer},
    geometry::Viewport,
    model::{TripForm, TripRequest},
    planner::generate_plan,
    prompt::{build_prompt_template, build_system_prompt, combine_prompt},
    render::render_plan,
};

pub const CLEARED_MESSAGE: &str = "Cleared. Enter details and generate again.";

/// Everything the controller needs from the host UI.
///
/// A browser implements this over the DOM; tests implement it in memory.
pub trait ViewPort: ImageLoader + FrameScheduler {
    fn read_form(&self) -> TripForm;
    fn read_ai_settings(&self) -> AiSettings;
    fn show_markup(&mut self, markup: &str);
    fn show_text(&mut self, text: &str);
    /// Blocking notice for errors and confirmations.
    fn alert(&mut self, message: &str);
    /// Appends a line to the activity log.
    fn log(&mut self, message: &str);
    /// Developer-facing error record, separate from what the user sees.
    fn console_error(&mut self, message: &str);
    /// Starts writing `text` to the clipboard; the host reports completion
    /// through [`FormController::prompt_copied`].
    fn copy_to_clipboard(&mut self, text: &str);
    /// Resets every form field and empties the log.
    fn reset_form(&mut self);
}

/// A validated request waiting on the external generator.
#[derive(Debug, Clone)]
pub struct AiJob {
    pub config: AiConfig,
    pub request: TripRequest,
}

impl AiJob {
    pub async fn run<T: HttpTransport>(&self, transport: &T) -> Result<String, BridgeError> {
        call_external_generator(transport, &self.config, &self.request).await
    }
}

/// Wires the form to the generators, the backdrop and the route scene.
#[derive(Debug)]
pub struct FormController {
    backdrop: BackdropLoader,
    animator: RouteAnimator,
    city_debounce: Debouncer,
}

impl FormController {
    pub fn new(viewport: Viewport, reduced_motion: bool) -> Self {
        Self {
            backdrop: BackdropLoader::new(),
            animator: RouteAnimator::new(viewport, reduced_motion),
            city_debounce: Debouncer::default(),
        }
    }

    pub fn backdrop(&self) -> &BackdropStyle {
        self.backdrop.style()
    }

    pub fn animator(&self) -> &RouteAnimator {
        &self.animator
    }

    pub fn debounce_ms(&self) -> u32 {
        self.city_debounce.wait_ms()
    }

    /// Builds the initial scene so the page is alive before any input.
    pub fn init<P: ViewPort + ?Sized, R: Rng + ?Sized>(&mut self, port: &mut P, rng: &mut R) {
        let scene = SceneParams::from_form(&port.read_form());
        self.animator.update(&scene, rng, port);
    }

    /// Handles the Generate action.
    ///
    /// A local plan is rendered straight away. When AI mode is on and fully
    /// configured, the returned [`AiJob`] must be run by the host and its
    /// result passed to [`finish_ai`](Self::finish_ai).
    pub fn generate<P: ViewPort + ?Sized, R: Rng + ?Sized>(
        &mut self,
        port: &mut P,
        rng: &mut R,
    ) -> Option<AiJob> {
        let form = port.read_form();
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => {
                port.alert(&err.to_string());
                return None;
            }
        };

        self.backdrop.set_backdrop(&request.city, port);
        self.animator.update(&SceneParams::from_form(&form), rng, port);

        let settings = port.read_ai_settings();
        if settings.enabled {
            return match AiConfig::from_settings(&settings) {
                Ok(config) => {
                    port.log("Calling AI endpoint…");
                    Some(AiJob { config, request })
                }
                Err(err) => {
                    report_error(port, &err);
                    None
                }
            };
        }

        let plan = generate_plan(&request, rng);
        port.show_markup(&render_plan(&plan, &request));
        port.log("Local plan generated.");
        None
    }

    pub fn finish_ai<P: ViewPort + ?Sized>(&mut self, result: Result<String, BridgeError>, port: &mut P) {
        match result {
            Ok(text) => {
                port.show_text(text.trim());
                port.log("AI response rendered.");
            }
            Err(err) => report_error(port, &err),
        }
    }

    pub fn copy_prompt<P: ViewPort + ?Sized>(&self, port: &mut P) {
        let user = build_prompt_template(&port.read_form());
        port.copy_to_clipboard(&combine_prompt(build_system_prompt(), &user));
    }

    pub fn prompt_copied<P: ViewPort + ?Sized>(&self, port: &mut P) {
        port.log("Prompt copied to clipboard.");
        port.alert("AI prompt copied. Paste it into your model playground or backend.");
    }

    pub fn clear<P: ViewPort + ?Sized>(&mut self, port: &mut P) {
        port.reset_form();
        port.show_markup(CLEARED_MESSAGE);
        self.backdrop.set_backdrop("", port);
    }

    /// Records a city keystroke. The host waits [`debounce_ms`](Self::debounce_ms)
    /// and then calls [`city_settled`](Self::city_settled) with the ticket.
    pub fn city_input(&mut self) -> DebounceTicket {
        self.city_debounce.trigger()
    }

    pub fn city_settled<P: ViewPort + ?Sized, R: Rng + ?Sized>(
        &mut self,
        ticket: DebounceTicket,
        port: &mut P,
        rng: &mut R,
    ) {
        if !self.city_debounce.settle(ticket) {
            return;
        }
        let form = port.read_form();
        self.backdrop.set_backdrop(&form.city, port);
        self.animator.update(&SceneParams::from_form(&form), rng, port);
    }

    /// Style, budget, pace or days changed.
    pub fn options_changed<P: ViewPort + ?Sized, R: Rng + ?Sized>(&mut self, port: &mut P, rng: &mut R) {
        let scene = SceneParams::from_form(&port.read_form());
        self.animator.update(&scene, rng, port);
    }

    pub fn animation_frame<P, R, C>(&mut self, timestamp_ms: f64, rng: &mut R, canvas: &mut C, port: &mut P)
    where
        P: ViewPort + ?Sized,
        R: Rng + ?Sized,
        C: Canvas + ?Sized,
    {
        self.animator.frame(timestamp_ms, rng, canvas, port);
    }

    pub fn backdrop_loaded(&mut self, token: LoadToken, outcome: LoadOutcome) -> bool {
        self.backdrop.finish(token, outcome)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.animator.resize(viewport);
    }
}

fn report_error<P: ViewPort + ?Sized>(port: &mut P, err: &BridgeError) {
    tracing::error!(error = %err, "AI generation failed");
    let message = err.to_string();
    port.console_error(&format!("AI generation failed: {message}"));
    port.log(&message);
    port.alert(&message);
}
