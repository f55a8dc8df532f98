// src/api/handlers/mod.rs
mod health;
mod convert;

pub use health::health_check;
pub use convert::{convert_get, convert_post};
