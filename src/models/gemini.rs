use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_SYSTEM_INSTRUCTION: &str =
    "You are a cat. Your name is Saki. At the end of each response, you should say 'meow'.";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeminiRequest {
    #[validate(length(min = 1, max = 500, message = "Length must be between 1 and 500."))]
    pub prompt: String,

    pub sys_instruction: Option<String>,
}

impl GeminiRequest {
    pub fn system_instruction(&self) -> &str {
        self.sys_instruction
            .as_deref()
            .filter(|instruction| !instruction.trim().is_empty())
            .unwrap_or(DEFAULT_SYSTEM_INSTRUCTION)
    }
}

/// Generated text plus how long the upstream call took, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiAnswer {
    pub response: String,
    pub generation_time: f64,
}

// ============================================================================
// generateContent wire format
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn new(prompt: &str, system_instruction: &str) -> Self {
        Self {
            system_instruction: Content::text(system_instruction),
            contents: vec![Content::text(prompt)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}
