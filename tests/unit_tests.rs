// Unit tests for Voluntrix

use voluntrix::core::{
    distance::haversine_distance,
    filters::{accepted_count, is_recommendable},
    rank_scored,
    scoring::{calculate_compatibility, matching_skills, proximity_score},
};
use voluntrix::models::{
    Coordinates, EventRecord, RequiredSkill, ScoredEvent, ScoringWeights, Skill, SkillLevel,
    VolunteerProfile,
};
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

/// Kilometers per degree of latitude on the haversine sphere
const KM_PER_DEGREE: f64 = 6371.0 * std::f64::consts::PI / 180.0;

fn volunteer_from(value: serde_json::Value) -> VolunteerProfile {
    serde_json::from_value(value).expect("valid volunteer document")
}

fn event_from(value: serde_json::Value) -> EventRecord {
    serde_json::from_value(value).expect("valid event document")
}

fn tutor_volunteer() -> VolunteerProfile {
    volunteer_from(json!({
        "skills": [{ "name": "Teaching", "level": "Advanced" }],
        "interests": ["Education"],
        "preferences": { "availabilityDays": ["Saturday"], "travelDistance": 25 }
    }))
}

fn saturday_event() -> EventRecord {
    event_from(json!({
        "requiredSkills": [{ "name": "teaching" }],
        "category": "Education",
        "date": "2025-11-15T09:00:00Z",
        "location": { "isRemote": false }
    }))
}

fn score(volunteer: &VolunteerProfile, event: &EventRecord) -> u8 {
    calculate_compatibility(volunteer, event, &ScoringWeights::default()).score
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(40.7128, -74.0060, 40.7128, -74.0060);
    assert_eq!(distance, 0.0);
}

#[test]
fn test_haversine_distance_manhattan_to_brooklyn() {
    // Manhattan to Brooklyn is approximately 5-10 km
    let distance = haversine_distance(40.7580, -73.9855, 40.6782, -73.9442);
    assert!(distance > 5.0 && distance < 15.0);
}

#[test]
fn test_reference_scenario_from_documents() {
    let result = calculate_compatibility(&tutor_volunteer(), &saturday_event(), &ScoringWeights::default());

    assert_eq!(result.score, 65);
    assert_eq!(
        result.reasons,
        vec![
            "Matches your skills: teaching",
            "Aligns with your interest in Education",
            "Available on Saturdays",
        ]
    );
}

#[test]
fn test_no_skills_other_category_scores_nothing_for_those_factors() {
    let mut event = saturday_event();
    event.required_skills = Some(vec![]);
    event.category = Some("Health".to_string());

    let result = calculate_compatibility(&tutor_volunteer(), &event, &ScoringWeights::default());

    // Only availability remains
    assert_eq!(result.score, 15);
    assert!(!result.reasons.iter().any(|r| r.starts_with("Matches")));
    assert!(!result.reasons.iter().any(|r| r.starts_with("Aligns")));
}

#[test]
fn test_bare_string_required_skills() {
    let event = event_from(json!({ "requiredSkills": ["TEACHING", "Driving"] }));

    assert_eq!(matching_skills(&tutor_volunteer(), &event), vec!["TEACHING"]);
    assert_eq!(score(&tutor_volunteer(), &event), 20);
}

#[test]
fn test_case_insensitive_category() {
    let event = event_from(json!({ "category": "EDUCATION" }));
    let result = calculate_compatibility(&tutor_volunteer(), &event, &ScoringWeights::default());

    assert_eq!(result.score, 30);
    assert_eq!(result.reasons, vec!["Aligns with your interest in EDUCATION"]);
}

#[test]
fn test_interest_bonus_is_binary() {
    let mut volunteer = tutor_volunteer();
    volunteer.interests = Some(vec![
        "Education".to_string(),
        "education".to_string(),
        "Health".to_string(),
    ]);
    let event = event_from(json!({ "category": "Education" }));

    assert_eq!(score(&volunteer, &event), 30);
}

#[test]
fn test_each_matching_skill_adds_twenty() {
    let skill_names = ["Teaching", "Tutoring", "Mentoring", "Coaching"];
    let mut volunteer = tutor_volunteer();
    volunteer.skills = Some(
        skill_names
            .iter()
            .map(|name| Skill {
                name: name.to_string(),
                level: SkillLevel::Expert,
                verified: false,
            })
            .collect(),
    );

    let mut previous: Option<u8> = None;
    for count in 0..=skill_names.len() {
        let event = EventRecord {
            required_skills: Some(skill_names[..count].iter().map(|n| RequiredSkill::named(*n)).collect()),
            ..Default::default()
        };
        let current = score(&volunteer, &event);
        if let Some(previous) = previous {
            assert_eq!(current, (previous + 20).min(100));
        }
        previous = Some(current);
    }
}

#[test]
fn test_skill_level_is_ignored_for_points() {
    let event = event_from(json!({
        "requiredSkills": [{ "name": "Teaching", "level": "Expert", "mandatory": true }]
    }));
    let volunteer = volunteer_from(json!({ "skills": [{ "name": "teaching", "level": "Beginner" }] }));

    assert_eq!(score(&volunteer, &event), 20);
}

#[test]
fn test_distance_quirk() {
    assert_eq!(proximity_score(25.0, 25.0, 20.0), 0.0);
    assert_eq!(proximity_score(5.0, 25.0, 20.0), 15.0);
}

#[test]
fn test_geo_bonus_from_coordinates() {
    let home = Coordinates::new(37.7749, -122.4194);
    let volunteer = volunteer_from(json!({
        "location": { "coordinates": { "lat": home.lat, "lng": home.lng } }
    }));

    let event_at = |km: f64| {
        event_from(json!({
            "location": {
                "coordinates": { "lat": home.lat + km / KM_PER_DEGREE, "lng": home.lng },
                "isRemote": false
            }
        }))
    };

    assert_eq!(score(&volunteer, &event_at(5.0)), 15);
    assert_eq!(score(&volunteer, &event_at(20.0)), 0);
    assert_eq!(score(&volunteer, &event_at(25.0)), 0);
    assert_eq!(score(&volunteer, &event_at(80.0)), 0);
}

#[test]
fn test_remote_fallback_without_coordinates() {
    let volunteer = volunteer_from(json!({ "preferences": { "remoteWork": true } }));
    let event = event_from(json!({ "location": { "isRemote": true } }));

    let result = calculate_compatibility(&volunteer, &event, &ScoringWeights::default());

    assert_eq!(result.score, 25);
    assert_eq!(result.reasons, vec!["Remote opportunity matches your preferences"]);
}

#[test]
fn test_remote_requires_volunteer_preference() {
    let volunteer = volunteer_from(json!({ "preferences": { "remoteWork": false } }));
    let event = event_from(json!({ "location": { "isRemote": true } }));

    assert_eq!(score(&volunteer, &event), 0);
}

#[test]
fn test_availability_bonus_is_flat() {
    let volunteer = volunteer_from(json!({
        "preferences": {
            "availabilityDays": ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        }
    }));

    assert_eq!(score(&volunteer, &saturday_event()), 15);
    let sunday = event_from(json!({ "date": "2025-11-16T09:00:00Z" }));
    assert_eq!(score(&volunteer, &sunday), 15);
}

#[test]
fn test_reason_order() {
    let volunteer = volunteer_from(json!({
        "skills": [{ "name": "Cooking" }],
        "interests": ["Hunger"],
        "preferences": {
            "availabilityDays": ["Saturday"],
            "timeCommitment": "1-2 hours",
            "remoteWork": true
        }
    }));
    let event = event_from(json!({
        "requiredSkills": ["Cooking"],
        "category": "Hunger",
        "date": "2025-11-15T09:00:00Z",
        "timeCommitment": "1-2 hours",
        "location": { "isRemote": true }
    }));

    let result = calculate_compatibility(&volunteer, &event, &ScoringWeights::default());

    assert_eq!(result.score, 90);
    assert_eq!(
        result.reasons,
        vec![
            "Matches your skills: Cooking",
            "Aligns with your interest in Hunger",
            "Remote opportunity matches your preferences",
            "Perfect time commitment match: 1-2 hours",
            "Available on Saturdays",
        ]
    );
}

#[test]
fn test_score_bounds_and_determinism() {
    let volunteers = vec![
        VolunteerProfile::default(),
        tutor_volunteer(),
        volunteer_from(json!({
            "skills": [{ "name": "A" }, { "name": "B" }, { "name": "C" }, { "name": "D" }, { "name": "E" }],
            "interests": ["X"],
            "preferences": { "availabilityDays": ["Saturday"], "remoteWork": true }
        })),
    ];
    let events = vec![
        EventRecord::default(),
        saturday_event(),
        event_from(json!({
            "requiredSkills": ["a", "b", "c", "d", "e"],
            "category": "x",
            "date": "2025-11-15T09:00:00Z",
            "location": { "isRemote": true }
        })),
        event_from(json!({ "location": "123 Legacy Street" })),
    ];

    for volunteer in &volunteers {
        for event in &events {
            let first = calculate_compatibility(volunteer, event, &ScoringWeights::default());
            let second = calculate_compatibility(volunteer, event, &ScoringWeights::default());
            assert!(first.score <= 100);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_legacy_documents_never_fail() {
    let volunteer = volunteer_from(json!({
        "_id": "64f1c0ffee",
        "name": "Legacy User",
        "skills": null,
        "preferences": null
    }));
    let event = event_from(json!({
        "title": "Old event",
        "location": "Community hall",
        "volunteers": ["64f1beef"],
        "capacity": 10
    }));

    assert_eq!(volunteer.id.as_deref(), Some("64f1c0ffee"));
    assert_eq!(score(&volunteer, &event), 0);
    assert_eq!(accepted_count(&event), 0);
}

#[test]
fn test_ranking_is_idempotent() {
    let scored: Vec<ScoredEvent> = (0..15u8)
        .map(|i| ScoredEvent {
            event: EventRecord {
                id: Some(i.to_string()),
                ..Default::default()
            },
            compatibility_score: (i * 7) % 50,
            match_reasons: vec![],
        })
        .collect();

    let once = rank_scored(scored, 10);
    let twice = rank_scored(once.clone(), 10);

    let ids = |events: &[ScoredEvent]| -> Vec<Option<String>> {
        events.iter().map(|e| e.event.id.clone()).collect()
    };
    assert_eq!(once.len(), 10);
    assert_eq!(ids(&once), ids(&twice));
    assert!(once.windows(2).all(|w| w[0].compatibility_score >= w[1].compatibility_score));
}

#[test]
fn test_eligibility_from_documents() {
    let now: DateTime<Utc> = "2025-11-01T00:00:00Z".parse().unwrap();
    let event = event_from(json!({
        "status": "published",
        "organizer": "org_1",
        "date": (now + Duration::days(14)).to_rfc3339(),
        "capacity": 1,
        "volunteers": [{ "user": "v_2", "status": "pending" }]
    }));

    assert!(is_recommendable(&event, Some("v_1"), now));
    assert!(!is_recommendable(&event, Some("org_1"), now));
    assert!(!is_recommendable(&event, Some("v_1"), now + Duration::days(15)));
}
