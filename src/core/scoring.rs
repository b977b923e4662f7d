use crate::models::{CompatibilityResult, EventRecord, ScoringWeights, VolunteerProfile};
use chrono::{DateTime, Datelike, Utc, Weekday};
use std::collections::HashSet;

/// Upper bound of a compatibility score
pub const MAX_SCORE: f64 = 100.0;

/// Score how well an event fits a volunteer (0-100) and explain why
///
/// Factors are evaluated in order and each adds independently:
/// 1. skills: `weights.skill` per required skill the volunteer has
/// 2. interests: `weights.interest` when the category is an interest
/// 3. location: `weights.proximity - km` within the travel radius when both
///    sides have coordinates, otherwise `weights.remote` for a remote event
///    and a remote-friendly volunteer
/// 4. time commitment: reason only, no points
/// 5. availability: `weights.availability` when the event falls on an
///    available weekday
///
/// Missing data on either record means the factor contributes nothing.
pub fn calculate_compatibility(
    volunteer: &VolunteerProfile,
    event: &EventRecord,
    weights: &ScoringWeights,
) -> CompatibilityResult {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    let matched = matching_skills(volunteer, event);
    if !matched.is_empty() {
        score += weights.skill * matched.len() as f64;
        reasons.push(format!("Matches your skills: {}", matched.join(", ")));
    }

    if let Some(category) = matching_interest(volunteer, event) {
        score += weights.interest;
        reasons.push(format!("Aligns with your interest in {}", category));
    }

    match (volunteer.coordinates(), event.coordinates()) {
        (Some(home), Some(venue)) => {
            score += proximity_score(
                home.distance_km(&venue),
                volunteer.travel_distance_km(),
                weights.proximity,
            );
        }
        _ => {
            if event.is_remote() && volunteer.remote_work() {
                score += weights.remote;
                reasons.push("Remote opportunity matches your preferences".to_string());
            }
        }
    }

    if let Some(commitment) = event.time_commitment {
        if volunteer.time_commitment() == Some(commitment) {
            reasons.push(format!("Perfect time commitment match: {}", commitment));
        }
    }

    if let Some(day) = event.date.and_then(|date| available_weekday(volunteer, date)) {
        score += weights.availability;
        reasons.push(format!("Available on {}s", day));
    }

    CompatibilityResult {
        score: clamp_score(score),
        reasons,
    }
}

/// Required skills of `event` the volunteer has, compared by lowercased name
///
/// Names are returned as written on the event, in event order.
pub fn matching_skills<'a>(volunteer: &VolunteerProfile, event: &'a EventRecord) -> Vec<&'a str> {
    let required = event.required_skills();
    if required.is_empty() {
        return Vec::new();
    }

    let held: HashSet<String> = volunteer
        .skills()
        .iter()
        .map(|skill| skill.name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    required
        .iter()
        .filter(|skill| held.contains(&skill.name.trim().to_lowercase()))
        .map(|skill| skill.name.as_str())
        .collect()
}

/// The event category, if it is one of the volunteer's interests
pub fn matching_interest<'a>(volunteer: &VolunteerProfile, event: &'a EventRecord) -> Option<&'a str> {
    let category = event.category.as_deref()?;
    let normalized = category.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    volunteer
        .interests()
        .iter()
        .any(|interest| interest.trim().to_lowercase() == normalized)
        .then_some(category)
}

/// Proximity bonus for an event `distance_km` away
///
/// Zero outside the travel radius. Inside it the bonus is `max_bonus` minus
/// the distance, floored at zero, so it reaches zero at `max_bonus` km
/// regardless of the radius.
#[inline]
pub fn proximity_score(distance_km: f64, travel_distance_km: f64, max_bonus: f64) -> f64 {
    if distance_km.is_nan() || distance_km > travel_distance_km {
        return 0.0;
    }
    (max_bonus - distance_km).max(0.0)
}

/// Long English weekday name, e.g. "Saturday"
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weekday of `date` (UTC) if the volunteer lists it as available
fn available_weekday(volunteer: &VolunteerProfile, date: DateTime<Utc>) -> Option<&'static str> {
    let day = weekday_name(date.weekday());
    volunteer
        .availability_days()
        .iter()
        .any(|available| available == day)
        .then_some(day)
}

#[inline]
fn clamp_score(raw: f64) -> u8 {
    raw.max(0.0).min(MAX_SCORE).round() as u8
}
