//! Configuration and domain types shared across the crate

pub mod config;
pub mod models;
