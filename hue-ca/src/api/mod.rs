//! HTTP API handlers for hue-ca

pub mod analysis;
pub mod classify;
pub mod error;
pub mod health;

pub use analysis::{
    add_color, add_image, add_note, delete_analysis, delete_image, delete_note, get_analysis, get_document,
    put_analysis, remove_color, save_combination, toggle_favorite,
};
pub use classify::classify;
pub use error::ApiError;
pub use health::health_routes;
