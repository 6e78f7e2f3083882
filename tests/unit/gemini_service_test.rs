use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use life_tracker::config::GeminiConfig;
use life_tracker::services::GeminiService;

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn service_for(server: &MockServer) -> GeminiService {
    GeminiService::new(GeminiConfig {
        api_key: Some("test-key".to_string()),
        model: "gemini-2.0-flash".to_string(),
        base_url: server.uri(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_generate_returns_first_candidate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "system_instruction": {"parts": [{"text": "Answer in one word."}]},
            "contents": [{"parts": [{"text": "Favourite animal?"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Cat. meow"}]}},
                {"content": {"role": "model", "parts": [{"text": "Dog"}]}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = service_for(&server)
        .generate("Favourite animal?", "Answer in one word.")
        .await
        .unwrap();

    assert_eq!(answer.response, "Cat. meow");
    assert!(answer.generation_time >= 0.0);
}

#[tokio::test]
async fn test_upstream_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = service_for(&server).generate("hi", "be brief").await.unwrap_err();
    let message = format!("{:#}", err);

    assert!(message.contains("403"), "unexpected error: {}", message);
    assert!(message.contains("API key not valid"));
}

#[tokio::test]
async fn test_response_without_text_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let err = service_for(&server).generate("hi", "be brief").await.unwrap_err();
    assert!(err.to_string().contains("no text candidate"));
}

#[tokio::test]
async fn test_invalid_json_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = service_for(&server).generate("hi", "be brief").await.unwrap_err();
    assert!(err.to_string().contains("could not decode response"));
}
