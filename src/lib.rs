//! RecipeHarvest library.
//!
//! Core crawler subsystem: selector-driven discovery and extraction of
//! structured recipes from configured websites, with SQLite persistence.

pub mod cli;
pub mod config;
pub mod crawler;
pub mod models;
pub mod repository;
