// API routes and handlers

pub mod docs;
pub mod gemini;
pub mod goals;
pub mod health;
pub mod hobbies;
pub mod routes;
pub mod status;
