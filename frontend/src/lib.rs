use seed::{prelude::*, virtual_dom::AtValue, *};
use tripgen_shared::{
    backdrop::{BackdropStyle, LoadOutcome, LoadToken},
    debounce::DebounceTicket,
    geometry::Viewport,
    animator::SceneParams,
    AiSettings, BridgeError, FormController, TripForm,
};
use web_sys::HtmlCanvasElement;

mod port;

use port::{Ctx2d, FetchTransport, SeedPort};

const BUDGET_OPTIONS: &[(&str, &str)] = &[
    ("", "Select budget"),
    ("low", "Low"),
    ("medium", "Medium"),
    ("high", "High"),
];
const STYLE_OPTIONS: &[(&str, &str)] = &[
    ("balanced", "Balanced"),
    ("family", "Family"),
    ("adventure", "Adventure"),
    ("luxury", "Luxury"),
    ("budget", "Budget"),
    ("cultural", "Cultural"),
];
const PACE_OPTIONS: &[(&str, &str)] = &[
    ("relaxed", "Relaxed"),
    ("moderate", "Moderate"),
    ("packed", "Packed"),
];

pub struct Model {
    controller: FormController,
    ui: Ui,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Markup(String),
    Text(String),
}

/// Everything the page shows apart from the backdrop and the route scene.
pub struct Ui {
    form: TripForm,
    ai: AiSettings,
    output: Output,
    log: Vec<String>,
    /// Days text the current scene was built from.
    scene_days: String,
    viewport: Viewport,
    dpr: f64,
    canvas: ElRef<HtmlCanvasElement>,
}

impl Ui {
    fn new(viewport: Viewport, dpr: f64) -> Self {
        let form = default_form();
        Self {
            scene_days: form.days.clone(),
            form,
            ai: AiSettings::default(),
            output: Output::Markup(String::new()),
            log: Vec::new(),
            viewport,
            dpr,
            canvas: ElRef::default(),
        }
    }

    /// Whether the committed days value yields a different scene than the
    /// one on screen.
    fn days_change_rebuilds(&self) -> bool {
        let shown = TripForm {
            days: self.scene_days.clone(),
            ..self.form.clone()
        };
        SceneParams::from_form(&shown) != SceneParams::from_form(&self.form)
    }

    fn push_log(&mut self, time: &str, message: &str) {
        self.log.push(format!("{time} → {message}"));
    }

    /// Blanks the text fields and the AI credentials, puts style and pace
    /// back to their defaults and empties the log. The budget select is left
    /// unselected and reads as medium.
    fn reset(&mut self) {
        self.form = TripForm {
            style: "balanced".into(),
            pace: "moderate".into(),
            ..TripForm::default()
        };
        self.ai.endpoint.clear();
        self.ai.model.clear();
        self.ai.api_key.clear();
        self.log.clear();
    }

    fn canvas_context(&self) -> Option<Ctx2d> {
        let canvas = self.canvas.get()?;
        Ctx2d::from_canvas(&canvas, self.viewport, self.dpr)
    }
}

fn default_form() -> TripForm {
    TripForm {
        budget: "medium".into(),
        style: "balanced".into(),
        pace: "moderate".into(),
        ..TripForm::default()
    }
}

pub enum Msg {
    CityChanged(String),
    DaysInput(String),
    DaysChanged(String),
    BudgetChanged(String),
    StyleChanged(String),
    DietChanged(String),
    PaceChanged(String),
    UseAiToggled,
    AiEndpointChanged(String),
    AiModelChanged(String),
    AiKeyChanged(String),
    MaxTokensChanged(String),
    Generate,
    AiFinished(Result<String, BridgeError>),
    CopyPrompt,
    PromptCopied,
    CopyFailed(String),
    Clear,
    CitySettled(DebounceTicket),
    Frame(f64),
    BackdropLoaded(LoadToken, LoadOutcome),
    Resized,
}

pub fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.stream(streams::window_event(Ev::Resize, |_| Msg::Resized));

    let mut ui = Ui::new(window_viewport(), device_pixel_ratio());
    let mut controller = FormController::new(ui.viewport, prefers_reduced_motion());
    controller.init(
        &mut SeedPort::new(&mut ui, orders),
        &mut rand::thread_rng(),
    );
    Model { controller, ui }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    let Model { controller, ui } = model;
    let mut rng = rand::thread_rng();

    match msg {
        Msg::CityChanged(val) => {
            ui.form.city = val;
            let ticket = controller.city_input();
            orders.perform_cmd(cmds::timeout(controller.debounce_ms(), move || {
                Msg::CitySettled(ticket)
            }));
        }
        Msg::CitySettled(ticket) => {
            controller.city_settled(ticket, &mut SeedPort::new(ui, orders), &mut rng);
            ui.scene_days = ui.form.days.clone();
        }
        Msg::DaysInput(val) => ui.form.days = val,
        Msg::DaysChanged(val) => {
            ui.form.days = val;
            if ui.days_change_rebuilds() {
                controller.options_changed(&mut SeedPort::new(ui, orders), &mut rng);
                ui.scene_days = ui.form.days.clone();
            }
        }
        Msg::BudgetChanged(val) => {
            ui.form.budget = val;
            controller.options_changed(&mut SeedPort::new(ui, orders), &mut rng);
            ui.scene_days = ui.form.days.clone();
        }
        Msg::StyleChanged(val) => {
            ui.form.style = val;
            controller.options_changed(&mut SeedPort::new(ui, orders), &mut rng);
            ui.scene_days = ui.form.days.clone();
        }
        Msg::PaceChanged(val) => {
            ui.form.pace = val;
            controller.options_changed(&mut SeedPort::new(ui, orders), &mut rng);
            ui.scene_days = ui.form.days.clone();
        }
        Msg::DietChanged(val) => ui.form.diet = val,
        Msg::UseAiToggled => ui.ai.enabled = !ui.ai.enabled,
        Msg::AiEndpointChanged(val) => ui.ai.endpoint = val,
        Msg::AiModelChanged(val) => ui.ai.model = val,
        Msg::AiKeyChanged(val) => ui.ai.api_key = val,
        Msg::MaxTokensChanged(val) => ui.ai.max_tokens = val,
        Msg::Generate => {
            let job = controller.generate(&mut SeedPort::new(ui, orders), &mut rng);
            if let Some(job) = job {
                web_sys::console::debug_1(
                    &format!("[frontend] AI request to {}", job.config.endpoint).into(),
                );
                orders.perform_cmd(async move { Msg::AiFinished(job.run(&FetchTransport).await) });
            }
        }
        Msg::AiFinished(result) => {
            controller.finish_ai(result, &mut SeedPort::new(ui, orders));
        }
        Msg::CopyPrompt => {
            controller.copy_prompt(&mut SeedPort::new(ui, orders));
        }
        Msg::PromptCopied => {
            controller.prompt_copied(&mut SeedPort::new(ui, orders));
        }
        Msg::CopyFailed(err) => {
            web_sys::console::error_1(&format!("Failed to copy prompt: {err}").into());
        }
        Msg::Clear => {
            controller.clear(&mut SeedPort::new(ui, orders));
        }
        Msg::Frame(timestamp) => {
            // drawing is imperative; the vdom has nothing to patch
            orders.skip();
            let Some(mut canvas) = ui.canvas_context() else {
                return;
            };
            controller.animation_frame(
                timestamp,
                &mut rng,
                &mut canvas,
                &mut SeedPort::new(ui, orders),
            );
        }
        Msg::BackdropLoaded(token, outcome) => {
            if !controller.backdrop_loaded(token, outcome) {
                orders.skip();
            }
        }
        Msg::Resized => {
            ui.viewport = window_viewport();
            ui.dpr = device_pixel_ratio();
            controller.resize(ui.viewport);
        }
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    let scene = (!model.controller.animator().reduced_motion()).then(|| view_canvas(&model.ui));

    div![
        C!["app-container"],
        view_backdrop(model.controller.backdrop()),
        scene,
        div![
            C!["content"],
            h1!["Trip Itinerary Generator"],
            view_form(&model.ui),
            view_output(&model.ui.output),
            view_log(&model.ui.log),
        ]
    ]
}

fn view_backdrop(backdrop: &BackdropStyle) -> Node<Msg> {
    div![
        id!("cityBg"),
        C!["city-bg"],
        style! {
            St::Opacity => backdrop.opacity.to_string(),
            St::Transform => backdrop.transform_css(),
            St::BackgroundImage => backdrop.background_css(),
        }
    ]
}

fn view_canvas(ui: &Ui) -> Node<Msg> {
    let (w, h) = (ui.viewport.width, ui.viewport.height);
    canvas![
        el_ref(&ui.canvas),
        C!["travel-canvas"],
        attrs! {
            At::Width => surface_px(w, ui.dpr).to_string(),
            At::Height => surface_px(h, ui.dpr).to_string(),
        },
        style! {
            St::Width => format!("{w}px"),
            St::Height => format!("{h}px"),
        }
    ]
}

fn view_form(ui: &Ui) -> Node<Msg> {
    let input_field = |label: &str, value: &str, msg: fn(String) -> Msg| {
        div![
            C!["input-field"],
            label![label],
            input![
                attrs! {
                    At::Value => value,
                    At::AutoComplete => "off",
                    At::SpellCheck => "false",
                },
                input_ev(Ev::Input, msg),
            ]
        ]
    };

    form![
        C!["controls"],
        fieldset![
            legend!["Trip"],
            input_field("City", &ui.form.city, Msg::CityChanged),
            div![
                C!["input-field"],
                label!["Days"],
                input![
                    attrs! {
                        At::Value => &ui.form.days,
                        At::AutoComplete => "off",
                        At::SpellCheck => "false",
                    },
                    input_ev(Ev::Input, Msg::DaysInput),
                    input_ev(Ev::Change, Msg::DaysChanged),
                ]
            ],
            select_field("Budget", &ui.form.budget, BUDGET_OPTIONS, Msg::BudgetChanged),
            select_field("Style", &ui.form.style, STYLE_OPTIONS, Msg::StyleChanged),
            input_field("Diet", &ui.form.diet, Msg::DietChanged),
            select_field("Pace", &ui.form.pace, PACE_OPTIONS, Msg::PaceChanged),
        ],
        fieldset![
            legend!["AI"],
            label![
                input![
                    attrs! {
                        At::Type => "checkbox",
                        At::Checked => bool_attr(ui.ai.enabled),
                    },
                    ev(Ev::Change, |_| Msg::UseAiToggled),
                ],
                "Use AI"
            ],
            input_field("Endpoint", &ui.ai.endpoint, Msg::AiEndpointChanged),
            input_field("Model", &ui.ai.model, Msg::AiModelChanged),
            div![
                C!["input-field"],
                label!["API key"],
                input![
                    attrs! {
                        At::Type => "password",
                        At::Value => &ui.ai.api_key,
                        At::AutoComplete => "off",
                    },
                    input_ev(Ev::Input, Msg::AiKeyChanged),
                ]
            ],
            input_field("Max tokens", &ui.ai.max_tokens, Msg::MaxTokensChanged),
        ],
        div![
            C!["actions"],
            action_button("Generate", || Msg::Generate),
            action_button("Copy AI prompt", || Msg::CopyPrompt),
            action_button("Clear", || Msg::Clear),
        ]
    ]
}

fn select_field(
    label: &str,
    value: &str,
    options: &[(&str, &str)],
    msg: fn(String) -> Msg,
) -> Node<Msg> {
    div![
        C!["input-field"],
        label![label],
        select![
            options.iter().map(|&(key, text)| {
                option![
                    attrs! {
                        At::Value => key,
                        At::Selected => bool_attr(key == value),
                    },
                    text
                ]
            }),
            input_ev(Ev::Change, msg),
        ]
    ]
}

fn action_button(text: &str, msg: fn() -> Msg) -> Node<Msg> {
    button![
        attrs! { At::Type => "button" },
        text,
        ev(Ev::Click, move |_| msg()),
    ]
}

fn view_output(output: &Output) -> Node<Msg> {
    match output {
        Output::Markup(markup) => div![id!("output"), C!["output"], raw!(markup.as_str())],
        Output::Text(text) => div![id!("output"), C!["output"], pre![text.as_str()]],
    }
}

fn view_log(lines: &[String]) -> Node<Msg> {
    if lines.is_empty() {
        return empty![];
    }
    pre![id!("log"), C!["log"], lines.join("\n")]
}

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

fn window_viewport() -> Viewport {
    let window = window();
    let dimension = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64());
    Viewport::new(
        dimension(window.inner_width()).unwrap_or(0.0),
        dimension(window.inner_height()).unwrap_or(0.0),
    )
}

fn device_pixel_ratio() -> f64 {
    clamp_dpr(window().device_pixel_ratio())
}

fn prefers_reduced_motion() -> bool {
    window()
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

/// Pixel ratio used for the canvas backing store, capped at 2.
fn clamp_dpr(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.clamp(1.0, 2.0)
    } else {
        1.0
    }
}

fn surface_px(css: f64, dpr: f64) -> u32 {
    (css * dpr).floor().max(0.0) as u32
}
