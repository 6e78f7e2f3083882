// Business logic services

pub mod gemini_service;
pub mod goal_service;
pub mod health_service;
pub mod hobby_service;

pub use gemini_service::GeminiService;
pub use goal_service::GoalService;
pub use health_service::HealthService;
pub use hobby_service::HobbyService;
