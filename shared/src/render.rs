use std::fmt::Write as _;

use crate::{
    model::{ItineraryDay, TripRequest},
    planner::lodging_for,
};

pub const NO_PLAN_MESSAGE: &str = "No plan generated.";
const FALLBACK_REGION: &str = "City Center";

/// Renders the itinerary as HTML for the output panel.
///
/// Every entry links to a map search. An empty plan renders [`NO_PLAN_MESSAGE`].
pub fn render_plan(days: &[ItineraryDay], request: &TripRequest) -> String {
    if days.is_empty() {
        return NO_PLAN_MESSAGE.to_string();
    }
    let city = escape_html(&request.city);
    let mut html = String::new();

    for day in days {
        let region = escape_html(day_region(day));
        let _ = write!(
            html,
            "<div class=\"day\"><h3>Day {} — Region: {region}</h3>\
             <div class=\"meta\">Tap links to open Google Maps searches.</div>\
             <h4>Highlights</h4><ul>",
            day.day_number
        );
        for item in &day.activities {
            let _ = write!(
                html,
                "<li><span class=\"pill\">{}</span> {} <span class=\"meta\">• region: {} • ~{} km • {} • best: {}</span></li>",
                escape_html(&item.slot),
                anchor(&item.link, &escape_html(&item.label)),
                escape_html(&item.region),
                item.distance_km,
                item.mode,
                item.best_time,
            );
        }
        html.push_str("</ul><h4>Eating</h4><ul>");
        for meal in &day.meals {
            let _ = write!(
                html,
                "<li><span class=\"pill\">{label}</span> {} <span class=\"meta\">• region: {} • ~{} km • {} • best: {}</span></li>",
                anchor(&meal.link, &format!("Open {label} options near {city}", label = meal.label)),
                escape_html(&meal.region),
                meal.distance_km,
                meal.mode,
                meal.best_time,
                label = meal.label,
            );
        }
        let stay = lodging_for(request.budget, &request.city, day_region(day));
        let _ = write!(
            html,
            "</ul><h4>Where to Stay</h4><ul><li><span class=\"pill\">Stay</span> {} <span class=\"meta\">• budget: {}</span></li></ul>\
             <div class=\"meta\">Summary: {}</div></div>",
            anchor(&stay.link, &format!("{} in {region}", stay.stay_type)),
            request.budget,
            escape_html(&day.summary),
        );
    }

    html
}

/// Plain-text rendition for terminals.
pub fn render_plan_text(days: &[ItineraryDay], request: &TripRequest) -> String {
    if days.is_empty() {
        return NO_PLAN_MESSAGE.to_string();
    }
    let mut out = String::new();
    for day in days {
        let region = day_region(day);
        let _ = writeln!(out, "Day {} — Region: {region}", day.day_number);
        let _ = writeln!(out, "  Highlights");
        for item in &day.activities {
            let _ = writeln!(
                out,
                "    [{}] {} (~{} km, {}, best: {})\n      {}",
                item.slot, item.label, item.distance_km, item.mode, item.best_time, item.link
            );
        }
        let _ = writeln!(out, "  Eating");
        for meal in &day.meals {
            let _ = writeln!(
                out,
                "    [{}] ~{} km, {}, best: {}\n      {}",
                meal.label, meal.distance_km, meal.mode, meal.best_time, meal.link
            );
        }
        let stay = lodging_for(request.budget, &request.city, region);
        let _ = writeln!(out, "  Where to Stay");
        let _ = writeln!(out, "    {} in {region}\n      {}", stay.stay_type, stay.link);
        let _ = writeln!(out, "  Summary: {}\n", day.summary);
    }
    out
}

fn day_region(day: &ItineraryDay) -> &str {
    if day.region.is_empty() {
        FALLBACK_REGION
    } else {
        &day.region
    }
}

fn anchor(href: &str, text: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{text}</a>",
        escape_html(href)
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Budget, Pace, Style};
    use crate::planner::generate_plan;
    use rand::{SeedableRng, rngs::StdRng};

    fn request(budget: Budget) -> TripRequest {
        TripRequest {
            city: "Rome".into(),
            days: 2,
            budget,
            style: Style::Cultural,
            diet: None,
            pace: Pace::Packed,
        }
    }

    #[test]
    fn test_empty_plan_message() {
        assert_eq!(render_plan(&[], &request(Budget::Low)), "No plan generated.");
        assert_eq!(render_plan_text(&[], &request(Budget::Low)), "No plan generated.");
    }

    #[test]
    fn test_one_lodging_per_day() {
        let req = request(Budget::Low);
        let plan = generate_plan(&req, &mut StdRng::seed_from_u64(4));
        let html = render_plan(&plan, &req);
        assert_eq!(html.matches("<h4>Where to Stay</h4>").count(), 2);
        assert_eq!(html.matches("hostel or guesthouse in ").count(), 2);
        for day in &plan {
            assert!(html.contains(&format!("Day {} — Region: {}", day.day_number, day.region)));
            assert!(html.contains(&day.summary));
        }
    }

    #[test]
    fn test_every_entry_is_a_link() {
        let req = request(Budget::High);
        let plan = generate_plan(&req, &mut StdRng::seed_from_u64(12));
        let html = render_plan(&plan, &req);
        // 4 activities + 3 meals + 1 stay per day
        assert_eq!(html.matches("target=\"_blank\"").count(), 2 * (4 + 3 + 1));
        assert!(html.contains("Open Dinner options near Rome"));
        assert!(html.contains("luxury 5-star hotel in "));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut req = request(Budget::Medium);
        req.city = "<script>alert(1)</script>".into();
        let plan = generate_plan(&req, &mut StdRng::seed_from_u64(1));
        let html = render_plan(&plan, &req);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_text_rendering_lists_links() {
        let req = request(Budget::Medium);
        let plan = generate_plan(&req, &mut StdRng::seed_from_u64(6));
        let text = render_plan_text(&plan, &req);
        assert!(text.starts_with("Day 1 — Region: "));
        assert_eq!(text.matches("https://www.google.com/maps/search/").count(), 2 * 8);
    }
}
