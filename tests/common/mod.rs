#![allow(dead_code)]

pub mod utils;
pub mod session_helpers;
