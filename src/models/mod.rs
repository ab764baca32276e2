pub mod error;
pub mod measurement;
pub mod sensor;
pub mod user;
