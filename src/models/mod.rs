// Data models, request payloads and the response envelope

pub mod envelope;
pub mod gemini;
pub mod goal;
pub mod health;
pub mod hobby;
pub mod validation;

pub use envelope::*;
pub use gemini::*;
pub use goal::*;
pub use health::*;
pub use hobby::*;
pub use validation::*;
