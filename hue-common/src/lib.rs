//! # HUE Common Library
//!
//! Shared code for the HUE color-analysis services including:
//! - Season model and the questionnaire classifier pipeline
//! - Built-in seasonal palettes and default profiles
//! - Persisted analysis documents and durable stores
//! - The owner-scoped profile repository
//! - Collaborator contracts (auth, image store, vision analysis)
//! - Configuration loading and database initialization

pub mod classify;
pub mod collaborators;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod palette;
pub mod repository;
pub mod season;
pub mod store;
pub mod time;

pub use classify::{ClassificationOutcome, ClassificationRequest, ColorAnalyzer};
pub use error::{Error, Result};
pub use models::{Analysis, ColorInfo, OwnerId, PersistedAnalysis, SeasonalProfile};
pub use repository::ProfileRepository;
pub use season::Season;
