use crate::model::{Budget, Pace, Style, TripForm, TripRequest};

const SYSTEM_PROMPT: &str = "You are a smart travel planner. Cover exactly one region per day for the chosen city.

For each day (region):
- List top activities/sights with place names (openable in Google Maps)
- For each item include: region name, approximate distance, suggested travel option (walking or public transport), and the best time to visit
- Dining: breakfast, lunch, dinner suggestions with the same distance/mode/best-time fields
- Where to Stay IN THAT REGION: 1–2 area/property recommendations aligned to the user's budget

Also provide a short day-by-day summary that sequences regions logically to minimize travel.

Rules:
- Make the plan realistic (consider travel time, cost, and opening hours)
- Prefer walking if the distance is short; otherwise suggest public transport
- Mix popular attractions with hidden gems
- Adjust style (family, luxury, budget, adventure, cultural) if the user asks
- If details are missing, ask the user first
- Return the final plan in a clean, easy-to-read format";

pub fn build_system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

pub fn build_user_prompt(request: &TripRequest) -> String {
    user_prompt(
        &request.city,
        &request.clamped_days().to_string(),
        request.budget,
        request.style,
        request.pace,
        request.diet(),
    )
}

/// User prompt for copying out of an incomplete form: blank city and days
/// become placeholders the reader fills in.
pub fn build_prompt_template(form: &TripForm) -> String {
    let city = form.city.trim();
    let days = form.days.trim();
    let diet = form.diet.trim();
    user_prompt(
        if city.is_empty() { "<City>" } else { city },
        if days.is_empty() { "<Days>" } else { days },
        Budget::from_form(&form.budget),
        Style::from_form(&form.style),
        Pace::from_form(&form.pace),
        Some(if diet.is_empty() { "none" } else { diet }),
    )
}

pub fn combine_prompt(system: &str, user: &str) -> String {
    format!("SYSTEM:\n{system}\n\nUSER:\n{user}")
}

fn user_prompt(
    city: &str,
    days: &str,
    budget: Budget,
    style: Style,
    pace: Pace,
    diet: Option<&str>,
) -> String {
    let diet = diet.unwrap_or("none specified");
    format!(
        "Plan a trip to {city} for {days} days with a {budget} budget.
Style: {style}; Pace: {pace}; Diet: {diet}.
Cover exactly one region per day. For each region include activities (with place names that can open in Google Maps), dining (breakfast/lunch/dinner), and WHERE TO STAY IN THAT REGION aligned to the budget. For every item include: region, approximate distance, suggested travel option (walking or public transport), and the best time to visit/eat. End with a short day-by-day summary that sequences regions to minimize travel."
    )
}
