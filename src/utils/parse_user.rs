use std::io::{Error, ErrorKind};

use crate::models::user::{Gender, UserIdentity, UserProfile};

/// Builds a user from `<email> [age] [gender] [height_cm] [weight_kg]`.
/// Omitted profile fields stay empty; the session refuses to start until they are filled in.
pub fn parse_user_from_args(args: &[String]) -> Result<UserIdentity, Error> {
    let email = match args.first() {
        Some(email) => email.trim().to_string(),
        None => {
            tracing::error!("No email given");
            return Err(Error::new(ErrorKind::InvalidInput, "Missing user email"));
        }
    };

    let profile = UserProfile {
        age: parse_field(args.get(1), "age")?,
        gender: match args.get(2) {
            Some(raw) => Some(raw.parse::<Gender>().map_err(|e| {
                tracing::error!("Failed to parse gender: {}", e);
                Error::new(ErrorKind::InvalidInput, e)
            })?),
            None => None,
        },
        height: parse_field(args.get(3), "height")?,
        weight: parse_field(args.get(4), "weight")?,
    };

    tracing::info!("User parsed successfully: {}", email);
    Ok(UserIdentity::new(email, profile))
}

fn parse_field<T: std::str::FromStr>(raw: Option<&String>, name: &str) -> Result<Option<T>, Error> {
    match raw {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                tracing::error!("Failed to parse {}: {}", name, raw);
                Err(Error::new(ErrorKind::InvalidInput, format!("Invalid {}", name)))
            }
        },
        None => Ok(None),
    }
}
