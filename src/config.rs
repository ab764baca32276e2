pub mod settings;
pub mod sensor;
pub mod backend;
pub mod relay;
