// Domain module - Data model, configuration and errors
pub mod config;
pub mod error;
pub mod model;
