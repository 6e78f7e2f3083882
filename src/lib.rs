pub mod api;
pub mod config;
pub mod error;
pub mod frontend;
pub mod models;
pub mod services;
pub mod telemetry;

pub use error::{AppError, AppResult};
