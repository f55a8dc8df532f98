// src/lib.rs
pub mod config;
pub mod errors;
pub mod compiler;
pub mod banner;
pub mod api;
