//! Voluntrix - event recommendation service for the Voluntrix volunteer platform
//!
//! This library scores published events against a volunteer's profile
//! (skills, interests, location, availability) and ranks them into a short
//! list of recommendations.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{calculate_compatibility, haversine_distance, Recommender, RecommendationResult};
pub use models::{CompatibilityResult, EventRecord, ScoredEvent, ScoringWeights, VolunteerProfile};
