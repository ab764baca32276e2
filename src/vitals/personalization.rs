use serde::Serialize;

use crate::models::measurement::MeasurementRecord;
use crate::models::user::{Gender, UserProfile};

pub const FEVER_TEMPERATURE: f64 = 37.5;
pub const HIGH_HEART_RATE: i32 = 100;
pub const LOW_OXYGEN: i32 = 95;

pub const DEFAULT_AGE: u32 = 30;

/// Picks two recipe ingredients from the latest measurement.
/// First matching rule wins: fever, then high heart rate, then low oxygen.
pub fn recipe_ingredients(latest: &MeasurementRecord) -> [&'static str; 2] {
    if latest.temperature > FEVER_TEMPERATURE {
        ["Chicken", "Lemon"]
    } else if latest.heart_rate > HIGH_HEART_RATE {
        ["Oats", "Banana"]
    } else if latest.oxygen < LOW_OXYGEN {
        ["Spinach", "Broccoli"]
    } else {
        ["Salmon", "Avocado"]
    }
}

/// Query parameters for workout recommendations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutQuery {
    pub age: u32,
    pub gender: Gender,
    pub heart_rate: i32,
}

pub fn workout_query(profile: &UserProfile, latest: &MeasurementRecord) -> WorkoutQuery {
    WorkoutQuery {
        age: profile.age.unwrap_or(DEFAULT_AGE),
        gender: profile.gender.unwrap_or(Gender::Male),
        heart_rate: latest.heart_rate,
    }
}
