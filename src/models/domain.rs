use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::lenient;

/// Travel radius applied when a volunteer has not configured one
pub const DEFAULT_TRAVEL_DISTANCE_KM: f64 = 25.0;

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Coordinates as stored on a document, where either half may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCoordinates {
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl RawCoordinates {
    /// Both halves, or nothing
    pub fn resolve(&self) -> Option<Coordinates> {
        Some(Coordinates {
            lat: self.lat?,
            lng: self.lng?,
        })
    }
}

impl From<Coordinates> for RawCoordinates {
    fn from(value: Coordinates) -> Self {
        Self {
            lat: Some(value.lat),
            lng: Some(value.lng),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    #[serde(alias = "beginner")]
    Beginner,
    #[serde(alias = "intermediate")]
    Intermediate,
    #[serde(alias = "advanced")]
    Advanced,
    #[serde(alias = "expert")]
    Expert,
}

/// How much time a volunteer wants to give, or an event asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeCommitment {
    #[serde(rename = "1-2 hours")]
    OneToTwoHours,
    #[serde(rename = "3-5 hours")]
    ThreeToFiveHours,
    #[serde(rename = "6-8 hours")]
    SixToEightHours,
    #[serde(rename = "Full day")]
    FullDay,
    #[serde(rename = "Multiple days")]
    MultipleDays,
}

impl TimeCommitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeCommitment::OneToTwoHours => "1-2 hours",
            TimeCommitment::ThreeToFiveHours => "3-5 hours",
            TimeCommitment::SixToEightHours => "6-8 hours",
            TimeCommitment::FullDay => "Full day",
            TimeCommitment::MultipleDays => "Multiple days",
        }
    }
}

impl fmt::Display for TimeCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A skill held by a volunteer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub level: SkillLevel,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub verified: bool,
}

/// Volunteering preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerPreferences {
    #[serde(default, deserialize_with = "lenient::sequence")]
    pub availability_days: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub time_commitment: Option<TimeCommitment>,
    #[serde(
        rename = "travelDistance",
        alias = "travelDistanceKm",
        default,
        deserialize_with = "lenient::optional"
    )]
    pub travel_distance_km: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub remote_work: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolunteerLocation {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub coordinates: Option<RawCoordinates>,
}

/// Volunteer profile as read from the user store
///
/// Older documents predate most of these fields, so everything is optional and
/// read through the accessors below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolunteerProfile {
    #[serde(alias = "_id", default, deserialize_with = "lenient::optional")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::sequence")]
    pub skills: Option<Vec<Skill>>,
    #[serde(default, deserialize_with = "lenient::sequence")]
    pub interests: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub preferences: Option<VolunteerPreferences>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub location: Option<VolunteerLocation>,
}

impl VolunteerProfile {
    pub fn skills(&self) -> &[Skill] {
        self.skills.as_deref().unwrap_or_default()
    }

    pub fn interests(&self) -> &[String] {
        self.interests.as_deref().unwrap_or_default()
    }

    pub fn availability_days(&self) -> &[String] {
        self.preferences
            .as_ref()
            .and_then(|p| p.availability_days.as_deref())
            .unwrap_or_default()
    }

    pub fn time_commitment(&self) -> Option<TimeCommitment> {
        self.preferences.as_ref().and_then(|p| p.time_commitment)
    }

    /// Configured travel radius in kilometers, defaulting to 25
    pub fn travel_distance_km(&self) -> f64 {
        self.preferences
            .as_ref()
            .and_then(|p| p.travel_distance_km)
            .unwrap_or(DEFAULT_TRAVEL_DISTANCE_KM)
    }

    pub fn remote_work(&self) -> bool {
        self.preferences
            .as_ref()
            .and_then(|p| p.remote_work)
            .unwrap_or(false)
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location
            .as_ref()
            .and_then(|l| l.coordinates.as_ref())
            .and_then(RawCoordinates::resolve)
    }
}

/// A skill an event asks for
///
/// Documents store these either as a bare name or as an object; both decode
/// into this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RequiredSkillRepr")]
pub struct RequiredSkill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
    pub mandatory: bool,
}

impl RequiredSkill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            mandatory: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequiredSkillRepr {
    Name(String),
    Detailed {
        #[serde(default)]
        name: String,
        #[serde(default, deserialize_with = "lenient::optional")]
        level: Option<SkillLevel>,
        #[serde(default, deserialize_with = "lenient::or_default")]
        mandatory: bool,
    },
}

impl From<RequiredSkillRepr> for RequiredSkill {
    fn from(value: RequiredSkillRepr) -> Self {
        match value {
            RequiredSkillRepr::Name(name) => RequiredSkill::named(name),
            RequiredSkillRepr::Detailed {
                name,
                level,
                mandatory,
            } => RequiredSkill {
                name,
                level,
                mandatory,
            },
        }
    }
}

/// Structured event venue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventVenue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<RawCoordinates>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_remote: bool,
}

/// Event location: legacy documents hold a free-form address string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventLocation {
    Address(String),
    Venue(EventVenue),
}

impl EventLocation {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            EventLocation::Address(_) => None,
            EventLocation::Venue(venue) => venue.coordinates.as_ref().and_then(RawCoordinates::resolve),
        }
    }

    pub fn is_remote(&self) -> bool {
        match self {
            EventLocation::Address(_) => false,
            EventLocation::Venue(venue) => venue.is_remote,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Completed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationStatus {
    Pending,
    Applied,
    Accepted,
    Rejected,
    Completed,
    #[serde(other)]
    Unknown,
}

/// Application record attached to an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// User id, or a populated user document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub status: Option<ParticipationStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry in an event's volunteer list: a bare user id on legacy documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Participant {
    UserId(String),
    Application(Application),
}

impl Participant {
    pub fn status(&self) -> Option<ParticipationStatus> {
        match self {
            Participant::UserId(_) => None,
            Participant::Application(application) => application.status,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status() == Some(ParticipationStatus::Accepted)
    }
}

/// Event document as published by organizers
///
/// Fields the recommender does not read are kept in `extra` so the annotated
/// output echoes the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(default, deserialize_with = "lenient::sequence", skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<Vec<RequiredSkill>>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub time_commitment: Option<TimeCommitment>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub location: Option<EventLocation>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, deserialize_with = "lenient::sequence", skip_serializing_if = "Option::is_none")]
    pub volunteers: Option<Vec<Participant>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventRecord {
    pub fn required_skills(&self) -> &[RequiredSkill] {
        self.required_skills.as_deref().unwrap_or_default()
    }

    pub fn volunteers(&self) -> &[Participant] {
        self.volunteers.as_deref().unwrap_or_default()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.as_ref().and_then(EventLocation::coordinates)
    }

    pub fn is_remote(&self) -> bool {
        self.location.as_ref().map_or(false, EventLocation::is_remote)
    }
}

/// Outcome of scoring one event for one volunteer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Event annotated with its compatibility for the requesting volunteer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEvent {
    #[serde(flatten)]
    pub event: EventRecord,
    pub compatibility_score: u8,
    pub match_reasons: Vec<String>,
}

impl ScoredEvent {
    pub fn new(event: EventRecord, result: CompatibilityResult) -> Self {
        Self {
            event,
            compatibility_score: result.score,
            match_reasons: result.reasons,
        }
    }
}

/// Scoring weights
///
/// `proximity` is the bonus for an event at zero distance; it decays by one
/// point per kilometer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skill: f64,
    pub interest: f64,
    pub proximity: f64,
    pub remote: f64,
    pub availability: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 20.0,
            interest: 30.0,
            proximity: 20.0,
            remote: 25.0,
            availability: 15.0,
        }
    }
}
