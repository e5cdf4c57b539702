//! Trip itinerary core shared by the browser app and the native tools.
//!
//! Nothing in here touches a DOM, a socket or a clock directly: randomness is
//! injected as `R: Rng`, HTTP goes through [`bridge::HttpTransport`] and every
//! UI effect goes through [`controller::ViewPort`].

pub mod animator;
pub mod backdrop;
pub mod bridge;
pub mod controller;
pub mod debounce;
pub mod geometry;
pub mod links;
pub mod model;
pub mod planner;
pub mod prompt;
pub mod render;
pub mod theme;

pub use bridge::{AiConfig, AiSettings, BridgeError, HttpTransport, call_external_generator};
pub use controller::{AiJob, FormController, ViewPort};
pub use model::{
    Activity, Budget, FormError, ItineraryDay, Meal, MealKind, Pace, Style, TravelMode, TripForm,
    TripRequest,
};
pub use planner::generate_plan;
pub use prompt::{build_prompt_template, build_system_prompt, build_user_prompt, combine_prompt};
pub use render::{render_plan, render_plan_text};
