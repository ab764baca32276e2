use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("{} is not a supported gender.", other)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    /// centimetres
    #[serde(default)]
    pub height: Option<f64>,
    /// kilograms
    #[serde(default)]
    pub weight: Option<f64>,
}

impl UserProfile {
    pub fn complete(age: u32, gender: Gender, height: f64, weight: f64) -> Self {
        Self {
            age: Some(age),
            gender: Some(gender),
            height: Some(height),
            weight: Some(weight),
        }
    }
}

/// Identity a measurement session is owned by. Passed in explicitly, never read from ambient state.
#[derive(Debug, Clone, PartialEq)]
pub struct UserIdentity {
    pub email: String,
    pub profile: UserProfile,
}

impl UserIdentity {
    pub fn new(email: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            email: email.into(),
            profile,
        }
    }

    /// Fields that must be filled in before a measurement may start.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            missing.push("email");
        }
        if self.profile.age.is_none() {
            missing.push("age");
        }
        if self.profile.gender.is_none() {
            missing.push("gender");
        }
        if !self.profile.height.is_some_and(|h| h > 0.0) {
            missing.push("height");
        }
        if !self.profile.weight.is_some_and(|w| w > 0.0) {
            missing.push("weight");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Email: {}", self.email)
    }
}
