use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};
use crate::models::domain::{EventRecord, VolunteerProfile};

/// Largest candidate batch accepted in one request
pub const MAX_CANDIDATES: u64 = 1000;

/// Request to rank candidate events for a volunteer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationsRequest {
    pub volunteer: VolunteerProfile,
    #[validate(length(max = MAX_CANDIDATES))]
    #[serde(default)]
    pub events: Vec<EventRecord>,
    /// Upper bound comes from configuration, see `validate_with_max_limit`
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
    /// Drop past, unpublished, full and own events before scoring
    #[serde(default = "default_apply_filters")]
    #[serde(alias = "apply_filters", rename = "applyFilters")]
    pub apply_filters: bool,
}

fn default_apply_filters() -> bool {
    true
}

impl RecommendationsRequest {
    /// Field validation plus the configured ceiling on `limit`
    pub fn validate_with_max_limit(&self, max_limit: usize) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if let Some(limit) = self.limit {
            if usize::from(limit) > max_limit {
                let mut error = ValidationError::new("range");
                error.add_param(Cow::from("max"), &max_limit);
                error.add_param(Cow::from("value"), &limit);
                errors.add("limit", error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
