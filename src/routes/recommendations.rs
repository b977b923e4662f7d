use actix_web::{error::BlockingError, http::StatusCode, web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use thiserror::Error;
use crate::core::{Recommender, DEFAULT_RECOMMENDATION_LIMIT};
use crate::models::{ErrorResponse, HealthResponse, RecommendationsRequest};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl AppState {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            recommender,
            default_limit: DEFAULT_RECOMMENDATION_LIMIT,
            max_limit: 100,
        }
    }

    /// Requested limit, or the default, capped at the configured maximum
    fn effective_limit(&self, requested: Option<u16>) -> usize {
        requested
            .map(usize::from)
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}

/// Errors that can occur while serving recommendations
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Scoring task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for RecommendationError {
    fn status_code(&self) -> StatusCode {
        match self {
            RecommendationError::Validation(_) => StatusCode::BAD_REQUEST,
            RecommendationError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            RecommendationError::Validation(_) => "Validation failed",
            RecommendationError::Blocking(_) => "Failed to score events",
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error.to_string(),
            message: self.to_string(),
            status_code: self.status_code().as_u16(),
        })
    }
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend_events));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Recommend events endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "volunteer": { "skills": [...], "interests": [...], "preferences": {...} },
///   "events": [ { "category": "Education", "date": "2025-11-15T09:00:00Z", ... } ],
///   "limit": 10,
///   "applyFilters": true
/// }
/// ```
///
/// Responds with the events annotated with `compatibilityScore` and
/// `matchReasons`, best first.
async fn recommend_events(
    state: web::Data<AppState>,
    req: web::Json<RecommendationsRequest>,
) -> Result<HttpResponse, RecommendationError> {
    if let Err(errors) = req.validate_with_max_limit(state.max_limit) {
        tracing::info!("Validation failed for recommendations request: field_errors={:?}", errors);
        return Err(errors.into());
    }

    let RecommendationsRequest {
        volunteer,
        events,
        limit,
        apply_filters,
    } = req.into_inner();
    let limit = state.effective_limit(limit);
    let volunteer_id = volunteer.id.clone().unwrap_or_else(|| "anonymous".to_string());

    tracing::info!(
        "Recommending events for volunteer: {}, candidates: {}, limit: {}",
        volunteer_id,
        events.len(),
        limit
    );

    let recommender = state.recommender.clone();
    let result = web::block(move || {
        if apply_filters {
            recommender.recommend(&volunteer, events, limit, Utc::now())
        } else {
            recommender.rank(&volunteer, events, limit)
        }
    })
    .await?;

    tracing::info!(
        "Returning {} recommendations for volunteer {} ({} of {} candidates eligible)",
        result.recommendations.len(),
        volunteer_id,
        result.eligible_candidates,
        result.total_candidates
    );

    Ok(HttpResponse::Ok().json(result.recommendations))
}
