use crate::core::{filters::is_recommendable, scoring::calculate_compatibility};
use crate::models::{CompatibilityResult, EventRecord, ScoredEvent, ScoringWeights, VolunteerProfile};
use chrono::{DateTime, Utc};

/// Number of recommendations returned when the caller does not ask otherwise
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

/// Result of the recommendation process
#[derive(Debug)]
pub struct RecommendationResult {
    pub recommendations: Vec<ScoredEvent>,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
}

/// Recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Eligibility filter (upcoming, published, not own, not full)
/// 2. Compatibility scoring
/// 3. Stable ranking by score and truncation
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single event for a volunteer
    pub fn score(&self, volunteer: &VolunteerProfile, event: &EventRecord) -> CompatibilityResult {
        calculate_compatibility(volunteer, event, &self.weights)
    }

    /// Recommend events for a volunteer
    ///
    /// # Arguments
    /// * `volunteer` - The requesting volunteer's profile
    /// * `candidates` - Candidate events, not yet filtered
    /// * `limit` - Maximum number of recommendations to return
    /// * `now` - Reference instant for the upcoming-event check
    pub fn recommend(
        &self,
        volunteer: &VolunteerProfile,
        candidates: Vec<EventRecord>,
        limit: usize,
        now: DateTime<Utc>,
    ) -> RecommendationResult {
        let total_candidates = candidates.len();
        let volunteer_id = volunteer.id.as_deref();

        let eligible: Vec<EventRecord> = candidates
            .into_iter()
            .filter(|event| is_recommendable(event, volunteer_id, now))
            .collect();

        let mut result = self.rank(volunteer, eligible, limit);
        result.total_candidates = total_candidates;
        result
    }

    /// Score and rank candidates that were already filtered upstream
    pub fn rank(
        &self,
        volunteer: &VolunteerProfile,
        candidates: Vec<EventRecord>,
        limit: usize,
    ) -> RecommendationResult {
        let eligible_candidates = candidates.len();

        let scored: Vec<ScoredEvent> = candidates
            .into_iter()
            .map(|event| {
                let result = self.score(volunteer, &event);
                ScoredEvent::new(event, result)
            })
            .collect();

        let recommendations = rank_scored(scored, limit);

        tracing::debug!(
            "Ranked {} candidates, keeping {}",
            eligible_candidates,
            recommendations.len()
        );

        RecommendationResult {
            recommendations,
            total_candidates: eligible_candidates,
            eligible_candidates,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Sort by score (descending) and keep the first `limit`
///
/// The sort is stable, so events with equal scores keep their candidate
/// order.
pub fn rank_scored(mut scored: Vec<ScoredEvent>, limit: usize) -> Vec<ScoredEvent> {
    scored.sort_by(|a, b| b.compatibility_score.cmp(&a.compatibility_score));
    scored.truncate(limit);
    scored
}
