//! Web layer for the TfL dashboard.
//!
//! Serves the HTML dashboard and JSON endpoints for each of its panels.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
