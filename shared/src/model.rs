use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    #[default]
    Medium,
    High,
}

impl Budget {
    pub fn as_str(self) -> &'static str {
        match self {
            Budget::Low => "low",
            Budget::Medium => "medium",
            Budget::High => "high",
        }
    }

    /// Lenient parse used for form values: blank or unknown input is `Medium`.
    pub fn from_form(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Price marker prepended to restaurant searches.
    pub fn price_marker(self) -> &'static str {
        match self {
            Budget::Low => "$",
            Budget::Medium => "$$",
            Budget::High => "$$$",
        }
    }
}

impl FromStr for Budget {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Budget::Low),
            "medium" => Ok(Budget::Medium),
            "high" => Ok(Budget::High),
            _ => Err(UnknownVariant::new("budget", s)),
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Balanced,
    Family,
    Adventure,
    Luxury,
    Budget,
    Cultural,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::Balanced,
        Style::Family,
        Style::Adventure,
        Style::Luxury,
        Style::Budget,
        Style::Cultural,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Balanced => "balanced",
            Style::Family => "family",
            Style::Adventure => "adventure",
            Style::Luxury => "luxury",
            Style::Budget => "budget",
            Style::Cultural => "cultural",
        }
    }

    pub fn from_form(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for Style {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(Style::Balanced),
            "family" => Ok(Style::Family),
            "adventure" => Ok(Style::Adventure),
            "luxury" => Ok(Style::Luxury),
            "budget" => Ok(Style::Budget),
            "cultural" => Ok(Style::Cultural),
            _ => Err(UnknownVariant::new("style", s)),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    #[default]
    Moderate,
    Packed,
}

impl Pace {
    pub fn as_str(self) -> &'static str {
        match self {
            Pace::Relaxed => "relaxed",
            Pace::Moderate => "moderate",
            Pace::Packed => "packed",
        }
    }

    pub fn from_form(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for Pace {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relaxed" => Ok(Pace::Relaxed),
            "moderate" => Ok(Pace::Moderate),
            "packed" => Ok(Pace::Packed),
            _ => Err(UnknownVariant::new("pace", s)),
        }
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelMode {
    Walking,
    #[serde(rename = "Public transport")]
    PublicTransport,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walking => "Walking",
            TravelMode::PublicTransport => "Public transport",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealKind {
    pub const ALL: [MealKind; 3] = [MealKind::Breakfast, MealKind::Lunch, MealKind::Dinner];

    pub fn label(self) -> &'static str {
        match self {
            MealKind::Breakfast => "Breakfast",
            MealKind::Lunch => "Lunch",
            MealKind::Dinner => "Dinner",
        }
    }
}

/// Validated trip parameters, rebuilt from the form on every action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub city: String,
    pub days: u32,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    #[serde(default)]
    pub pace: Pace,
}

impl TripRequest {
    pub fn clamped_days(&self) -> u32 {
        self.days.clamp(MIN_DAYS, MAX_DAYS)
    }

    pub fn diet(&self) -> Option<&str> {
        self.diet.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter a city.")]
    MissingCity,
    #[error("Please enter number of days.")]
    MissingDays,
}

/// Raw form snapshot. Every field is the text the user typed or selected.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripForm {
    pub city: String,
    pub days: String,
    pub budget: String,
    pub style: String,
    pub diet: String,
    pub pace: String,
}

impl TripForm {
    pub fn validate(&self) -> Result<TripRequest, FormError> {
        let city = self.city.trim();
        if city.is_empty() {
            return Err(FormError::MissingCity);
        }
        let days = self.days.trim();
        if days.is_empty() {
            return Err(FormError::MissingDays);
        }
        let diet = self.diet.trim();

        Ok(TripRequest {
            city: city.to_string(),
            days: parse_days(days),
            budget: Budget::from_form(&self.budget),
            style: Style::from_form(&self.style),
            diet: (!diet.is_empty()).then(|| diet.to_string()),
            pace: Pace::from_form(&self.pace),
        })
    }
}

/// Parses the leading integer of `value` (so `"12 days"` is 12) and clamps it
/// to the supported range. Anything without a leading integer, or zero, is 1.
pub fn parse_days(value: &str) -> u32 {
    match parse_leading_int(value) {
        Some(n) if n > 0 => n.clamp(MIN_DAYS as i64, MAX_DAYS as i64) as u32,
        _ => MIN_DAYS,
    }
}

pub(crate) fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // saturate instead of failing on absurdly long digit runs
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub slot: String,
    pub label: String,
    pub link: String,
    pub distance_km: f64,
    pub mode: TravelMode,
    pub best_time: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub kind: MealKind,
    pub label: String,
    pub link: String,
    pub distance_km: f64,
    pub mode: TravelMode,
    pub best_time: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day_number: u32,
    pub region: String,
    pub activities: Vec<Activity>,
    pub meals: Vec<Meal>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lodging {
    pub stay_type: String,
    pub area: String,
    pub link: String,
}
