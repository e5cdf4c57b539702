use rand::Rng;

use crate::{
    links::map_search_link,
    model::{
        Activity, Budget, ItineraryDay, Lodging, Meal, MealKind, Pace, Style, TravelMode,
        TripRequest,
    },
};

pub const REGIONS_PER_TRIP: usize = 4;
pub const ACTIVITY_DISTANCE_KM: (f64, f64) = (0.4, 3.5);
pub const MEAL_DISTANCE_KM: (f64, f64) = (0.2, 2.0);
/// Anything up to this distance is considered walkable.
pub const WALKING_LIMIT_KM: f64 = 1.7;

const BALANCED: &[&str] = &[
    "landmark",
    "museum",
    "park",
    "market",
    "neighborhood",
    "viewpoint",
    "riverfront",
    "hidden gem",
];
const FAMILY: &[&str] = &[
    "zoo",
    "theme park",
    "interactive museum",
    "park",
    "aquarium",
    "neighborhood",
    "market",
    "viewpoint",
];
const ADVENTURE: &[&str] = &[
    "hiking trail",
    "bike tour",
    "water activity",
    "city viewpoint",
    "market",
    "local street food",
    "sunset spot",
];
const LUXURY: &[&str] = &[
    "iconic landmark",
    "art museum",
    "boutique district",
    "fine dining",
    "spa",
    "sky bar",
    "river cruise",
];
const BUDGET: &[&str] = &[
    "free walking tour",
    "public park",
    "local market",
    "street food lane",
    "neighborhood",
    "viewpoint",
];
const CULTURAL: &[&str] = &[
    "historic district",
    "temple or church",
    "national museum",
    "local craft market",
    "heritage walk",
    "traditional performance",
];

pub const DEFAULT_REGIONS: &[&str] = &[
    "Central District",
    "Old Town",
    "Riverside",
    "Business District",
    "University Area",
    "Historic District",
    "Waterfront",
    "Arts District",
    "Market Quarter",
    "Garden District",
];

const PACKED_SLOTS: &[&str] = &["Morning", "Midday", "Afternoon", "Evening"];
const RELAXED_SLOTS: &[&str] = &["Late Morning", "Afternoon", "Evening"];
const MODERATE_SLOTS: &[&str] = &["Morning", "Afternoon", "Evening"];

pub fn categories(style: Style) -> &'static [&'static str] {
    match style {
        Style::Balanced => BALANCED,
        Style::Family => FAMILY,
        Style::Adventure => ADVENTURE,
        Style::Luxury => LUXURY,
        Style::Budget => BUDGET,
        Style::Cultural => CULTURAL,
    }
}

pub fn slots(pace: Pace) -> &'static [&'static str] {
    match pace {
        Pace::Packed => PACKED_SLOTS,
        Pace::Relaxed => RELAXED_SLOTS,
        Pace::Moderate => MODERATE_SLOTS,
    }
}

/// Builds a day-by-day itinerary for `request`.
///
/// One region is the focus of each day. Four distinct regions are drawn per
/// trip and reused cyclically, so day `d` and day `d + 4` share a region.
/// Distances, travel modes and best times are heuristics rather than
/// measurements.
pub fn generate_plan<R: Rng + ?Sized>(request: &TripRequest, rng: &mut R) -> Vec<ItineraryDay> {
    let days = request.clamped_days();
    let pool = categories(request.style);
    let slots = slots(request.pace);
    let regions = pick_regions(rng);
    let city = request.city.as_str();

    tracing::debug!(
        city,
        days,
        style = %request.style,
        pace = %request.pace,
        ?regions,
        "generating local plan"
    );

    let plan: Vec<ItineraryDay> = (1..=days)
        .map(|day_number| {
            let region = regions[(day_number as usize - 1) % regions.len()];
            let tags = pick(pool, slots.len(), rng);
            let activities: Vec<Activity> = slots
                .iter()
                .zip(tags)
                .map(|(slot, tag)| activity(slot, tag, city, region, rng))
                .collect();
            let meals = MealKind::ALL
                .iter()
                .map(|&kind| meal(kind, request, region, rng))
                .collect();
            let summary = day_summary(day_number, &activities, request);

            ItineraryDay {
                day_number,
                region: region.to_string(),
                activities,
                meals,
                summary,
            }
        })
        .collect();

    tracing::info!(city, days = plan.len(), "local plan generated");
    plan
}

fn activity<R: Rng + ?Sized>(
    slot: &str,
    tag: &str,
    city: &str,
    region: &str,
    rng: &mut R,
) -> Activity {
    let distance_km = random_km(rng, ACTIVITY_DISTANCE_KM);
    Activity {
        slot: slot.to_string(),
        label: capitalize(tag),
        link: map_search_link(&format!("{tag} in {city}")),
        distance_km,
        mode: travel_mode_for_km(distance_km),
        best_time: best_time_for_slot(slot).to_string(),
        region: region.to_string(),
    }
}

fn meal<R: Rng + ?Sized>(
    kind: MealKind,
    request: &TripRequest,
    region: &str,
    rng: &mut R,
) -> Meal {
    let distance_km = random_km(rng, MEAL_DISTANCE_KM);
    Meal {
        kind,
        label: kind.label().to_string(),
        link: map_search_link(&meal_query(kind, request)),
        distance_km,
        mode: travel_mode_for_km(distance_km),
        best_time: best_time_for_meal(kind).to_string(),
        region: region.to_string(),
    }
}

fn meal_query(kind: MealKind, request: &TripRequest) -> String {
    let meal = kind.label().to_ascii_lowercase();
    let price = request.budget.price_marker();
    match request.diet() {
        Some(diet) => format!("{price} {diet} {meal} restaurants {}", request.city),
        None => format!("{price} {meal} restaurants {}", request.city),
    }
}

fn day_summary(day_number: u32, activities: &[Activity], request: &TripRequest) -> String {
    let titles = activities
        .iter()
        .map(|a| a.label.to_lowercase())
        .collect::<Vec<_>>()
        .join(", ");
    let diet = request
        .diet()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default();
    format!(
        "Day {day_number} blends {titles} with {} budget meals{diet}.",
        request.budget
    )
}

pub fn pick_regions<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static str> {
    pick(DEFAULT_REGIONS, REGIONS_PER_TRIP, rng)
}

/// Draws `n` entries without replacement, refilling from the full pool only
/// once it has been exhausted.
pub fn pick<'a, R: Rng + ?Sized>(pool: &[&'a str], n: usize, rng: &mut R) -> Vec<&'a str> {
    if pool.is_empty() {
        return Vec::new();
    }
    let mut remaining = pool.to_vec();
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        if remaining.is_empty() {
            remaining.extend_from_slice(pool);
        }
        let idx = rng.gen_range(0..remaining.len());
        out.push(remaining.remove(idx));
    }
    out
}

/// Uniform draw within `bounds`, rounded to one decimal place.
fn random_km<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    let raw = rng.gen_range(min..=max);
    ((raw * 10.0).round() / 10.0).clamp(min, max)
}

pub fn travel_mode_for_km(km: f64) -> TravelMode {
    if km <= WALKING_LIMIT_KM {
        TravelMode::Walking
    } else {
        TravelMode::PublicTransport
    }
}

pub fn best_time_for_slot(slot: &str) -> &'static str {
    let slot = slot.to_lowercase();
    // "late" wins over "morning", so "Late Morning" is a midday slot
    if slot.contains("late") || slot == "midday" {
        "midday (12–2pm)"
    } else if slot.contains("morning") {
        "morning (8–11am)"
    } else if slot.contains("afternoon") {
        "afternoon (1–4pm)"
    } else if slot.contains("evening") {
        "evening (5–8pm)"
    } else {
        "anytime"
    }
}

pub fn best_time_for_meal(kind: MealKind) -> &'static str {
    match kind {
        MealKind::Breakfast => "morning (8–10am)",
        MealKind::Lunch => "midday (12–2pm)",
        MealKind::Dinner => "evening (7–9pm)",
    }
}

pub fn stay_type(budget: Budget) -> &'static str {
    match budget {
        Budget::Low => "hostel or guesthouse",
        Budget::High => "luxury 5-star hotel",
        Budget::Medium => "boutique 3–4 star hotel",
    }
}

/// One place to stay inside the day's region, sized to the budget.
pub fn lodging_for(budget: Budget, city: &str, region: &str) -> Lodging {
    let stay_type = stay_type(budget);
    Lodging {
        stay_type: stay_type.to_string(),
        area: region.to_string(),
        link: map_search_link(&format!("{stay_type} {city} {region}")),
    }
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn request(days: u32, style: Style, pace: Pace) -> TripRequest {
        TripRequest {
            city: "Rome".into(),
            days,
            budget: Budget::Medium,
            style,
            diet: None,
            pace,
        }
    }

    #[test]
    fn test_day_count_is_clamped() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate_plan(&request(0, Style::Balanced, Pace::Moderate), &mut rng).len(), 1);
        assert_eq!(generate_plan(&request(45, Style::Balanced, Pace::Moderate), &mut rng).len(), 30);
    }

    #[test]
    fn test_slot_counts_follow_pace() {
        let mut rng = StdRng::seed_from_u64(11);
        for (pace, expected) in [(Pace::Packed, 4), (Pace::Relaxed, 3), (Pace::Moderate, 3)] {
            for day in generate_plan(&request(5, Style::Family, pace), &mut rng) {
                assert_eq!(day.activities.len(), expected);
                assert_eq!(day.meals.len(), 3);
            }
        }
    }

    #[test]
    fn test_regions_cycle_every_four_days() {
        let mut rng = StdRng::seed_from_u64(3);
        let plan = generate_plan(&request(12, Style::Cultural, Pace::Relaxed), &mut rng);
        let first_four: HashSet<_> = plan.iter().take(4).map(|d| d.region.clone()).collect();
        assert_eq!(first_four.len(), 4, "regions are drawn without duplicates");
        for d in 0..plan.len() - 4 {
            assert_eq!(plan[d].region, plan[d + 4].region);
        }
        for day in &plan {
            assert!(day.activities.iter().all(|a| a.region == day.region));
            assert!(day.meals.iter().all(|m| m.region == day.region));
        }
    }

    #[test]
    fn test_tags_are_unique_within_a_day() {
        let mut rng = StdRng::seed_from_u64(99);
        for day in generate_plan(&request(10, Style::Budget, Pace::Packed), &mut rng) {
            let labels: HashSet<_> = day.activities.iter().map(|a| &a.label).collect();
            assert_eq!(labels.len(), day.activities.len());
        }
    }

    #[test]
    fn test_pick_refills_when_exhausted() {
        let mut rng = StdRng::seed_from_u64(5);
        let picked = pick(&["a", "b"], 5, &mut rng);
        assert_eq!(picked.len(), 5);
        let first_two: HashSet<_> = picked[..2].iter().collect();
        assert_eq!(first_two.len(), 2);
        assert!(pick(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn test_best_time_for_slot() {
        assert_eq!(best_time_for_slot("Morning"), "morning (8–11am)");
        assert_eq!(best_time_for_slot("Late Morning"), "midday (12–2pm)");
        assert_eq!(best_time_for_slot("Midday"), "midday (12–2pm)");
        assert_eq!(best_time_for_slot("Afternoon"), "afternoon (1–4pm)");
        assert_eq!(best_time_for_slot("Evening"), "evening (5–8pm)");
        assert_eq!(best_time_for_slot("Night"), "anytime");
    }

    #[test]
    fn test_best_time_for_meal() {
        assert_eq!(best_time_for_meal(MealKind::Breakfast), "morning (8–10am)");
        assert_eq!(best_time_for_meal(MealKind::Lunch), "midday (12–2pm)");
        assert_eq!(best_time_for_meal(MealKind::Dinner), "evening (7–9pm)");
    }

    #[test]
    fn test_summary_mentions_budget_and_diet() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut req = request(1, Style::Luxury, Pace::Moderate);
        req.budget = Budget::High;
        req.diet = Some("vegan".into());
        let day = &generate_plan(&req, &mut rng)[0];
        assert!(day.summary.starts_with("Day 1 blends "));
        assert!(day.summary.ends_with(" with high budget meals (vegan)."));
        for activity in &day.activities {
            assert!(day.summary.contains(&activity.label.to_lowercase()));
        }
    }

    #[test]
    fn test_meal_links_carry_price_and_diet() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut req = request(1, Style::Balanced, Pace::Moderate);
        req.budget = Budget::Low;
        req.diet = Some("halal".into());
        let day = &generate_plan(&req, &mut rng)[0];
        assert_eq!(
            day.meals[0].link,
            map_search_link("$ halal breakfast restaurants Rome")
        );
        let labels: Vec<_> = day.meals.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["Breakfast", "Lunch", "Dinner"]);
    }

    #[test]
    fn test_activity_link_is_tag_in_city() {
        let mut rng = StdRng::seed_from_u64(8);
        let day = &generate_plan(&request(1, Style::Adventure, Pace::Moderate), &mut rng)[0];
        for activity in &day.activities {
            let tag = activity.label.to_lowercase();
            assert!(ADVENTURE.contains(&tag.as_str()));
            assert_eq!(activity.link, map_search_link(&format!("{tag} in Rome")));
        }
    }

    #[test]
    fn test_lodging_follows_budget() {
        assert_eq!(lodging_for(Budget::Low, "Rome", "Old Town").stay_type, "hostel or guesthouse");
        assert_eq!(lodging_for(Budget::High, "Rome", "Old Town").stay_type, "luxury 5-star hotel");
        let mid = lodging_for(Budget::Medium, "Rome", "Old Town");
        assert_eq!(mid.stay_type, "boutique 3–4 star hotel");
        assert_eq!(mid.link, map_search_link("boutique 3–4 star hotel Rome Old Town"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hidden gem"), "Hidden gem");
        assert_eq!(capitalize(""), "");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn style() -> impl Strategy<Value = Style> {
            prop::sample::select(Style::ALL.to_vec())
        }

        fn pace() -> impl Strategy<Value = Pace> {
            prop::sample::select(vec![Pace::Relaxed, Pace::Moderate, Pace::Packed])
        }

        proptest! {
            #[test]
            fn prop_plan_has_requested_days(seed in any::<u64>(), days in 1u32..=30, style in style(), pace in pace()) {
                let mut rng = StdRng::seed_from_u64(seed);
                let plan = generate_plan(&request(days, style, pace), &mut rng);
                prop_assert_eq!(plan.len(), days as usize);
                for (idx, day) in plan.iter().enumerate() {
                    prop_assert_eq!(day.day_number as usize, idx + 1);
                    prop_assert_eq!(day.meals.len(), 3);
                }
            }

            #[test]
            fn prop_distances_and_modes(seed in any::<u64>(), style in style(), pace in pace()) {
                let mut rng = StdRng::seed_from_u64(seed);
                for day in generate_plan(&request(6, style, pace), &mut rng) {
                    for a in &day.activities {
                        prop_assert!(a.distance_km >= 0.4 && a.distance_km <= 3.5);
                        prop_assert_eq!(a.mode == TravelMode::Walking, a.distance_km <= 1.7);
                    }
                    for m in &day.meals {
                        prop_assert!(m.distance_km >= 0.2 && m.distance_km <= 2.0);
                        prop_assert_eq!(m.mode == TravelMode::Walking, m.distance_km <= 1.7);
                    }
                }
            }
        }
    }
}
