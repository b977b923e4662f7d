use crate::models::{EventRecord, EventStatus};
use chrono::{DateTime, Utc};

/// Check if an event can be recommended to a volunteer at `now`
///
/// This is the candidate stage of the recommendation pipeline: the event
/// must be upcoming, published, organized by someone else and still have
/// room for accepted volunteers.
#[inline]
pub fn is_recommendable(
    event: &EventRecord,
    volunteer_id: Option<&str>,
    now: DateTime<Utc>,
) -> bool {
    is_upcoming(event, now)
        && is_published(event)
        && !is_organized_by(event, volunteer_id)
        && has_open_slots(event)
}

/// Event takes place at or after `now`; undated events never qualify
#[inline]
pub fn is_upcoming(event: &EventRecord, now: DateTime<Utc>) -> bool {
    event.date.map_or(false, |date| date >= now)
}

#[inline]
pub fn is_published(event: &EventRecord) -> bool {
    event.status == Some(EventStatus::Published)
}

/// Whether `volunteer_id` organizes the event; unknown ids never match
#[inline]
pub fn is_organized_by(event: &EventRecord, volunteer_id: Option<&str>) -> bool {
    match (event.organizer.as_deref(), volunteer_id) {
        (Some(organizer), Some(volunteer)) => organizer == volunteer,
        _ => false,
    }
}

/// Number of accepted applications on the event
pub fn accepted_count(event: &EventRecord) -> usize {
    event
        .volunteers()
        .iter()
        .filter(|participant| participant.is_accepted())
        .count()
}

/// Accepted volunteers are below capacity; events without a capacity are
/// treated as closed
#[inline]
pub fn has_open_slots(event: &EventRecord) -> bool {
    event
        .capacity
        .map_or(false, |capacity| accepted_count(event) < capacity as usize)
}
