// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod recommender;
pub mod scoring;

pub use distance::haversine_distance;
pub use filters::{accepted_count, has_open_slots, is_recommendable};
pub use recommender::{rank_scored, RecommendationResult, Recommender, DEFAULT_RECOMMENDATION_LIMIT};
pub use scoring::{calculate_compatibility, proximity_score};
