pub mod app;
pub mod database;

pub use app::{AppConfig, Environment, GeminiConfig};
pub use database::{run_migrations, DatabaseConfig};
