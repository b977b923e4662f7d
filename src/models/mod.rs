// Model exports
pub mod domain;
pub mod lenient;
pub mod requests;
pub mod responses;

pub use domain::{
    Application, CompatibilityResult, Coordinates, EventLocation, EventRecord, EventStatus,
    EventVenue, Participant, ParticipationStatus, RawCoordinates, RequiredSkill, ScoredEvent,
    ScoringWeights, Skill, SkillLevel, TimeCommitment, VolunteerLocation, VolunteerPreferences,
    VolunteerProfile, DEFAULT_TRAVEL_DISTANCE_KM,
};
pub use requests::RecommendationsRequest;
pub use responses::{ErrorResponse, HealthResponse};
