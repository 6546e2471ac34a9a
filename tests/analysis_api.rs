//! Integration tests for the furniture analysis API client.

use furniture_analyzer::analysis::{
    AnalysisClient, AnalysisRequest, Hints, ModelName, PromptLanguage,
};
use furniture_analyzer::config::Config;
use furniture_analyzer::error::AnalysisError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AnalysisClient {
    AnalysisClient::new(&Config::new("test-key", "http://unused", server.uri()))
}

fn sample_request() -> AnalysisRequest {
    AnalysisRequest {
        image_urls: vec![
            "https://i.ibb.co/x1/front.png".to_string(),
            "https://i.ibb.co/x2/side.png".to_string(),
        ],
        hints: Hints {
            designer: vec!["Eames".to_string()],
            manufacturer: vec!["Vitra".to_string()],
            ..Hints::default()
        },
        prompt: "".to_string(),
        def_prompt_lang: PromptLanguage::German,
        model_name: ModelName::Gpt41,
    }
}

#[tokio::test]
async fn analyze_posts_wire_format_and_decodes_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-furniture"))
        .and(body_partial_json(json!({
            "image_urls": ["https://i.ibb.co/x1/front.png", "https://i.ibb.co/x2/side.png"],
            "def_prompt_lang": "German",
            "model_name": "gpt-4.1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_metadata": {
                "custom_prompt_used": false,
                "hints_provided": true,
                "prompt_language": "German"
            },
            "condition": "very good",
            "description": "A molded plywood lounge chair with leather upholstery.",
            "designer": "Charles & Ray Eames",
            "hints_used": {
                "description_keywords": [],
                "designer": ["Eames"],
                "manufacturer": ["Vitra"],
                "name_keywords": []
            },
            "manufacturer": "Vitra",
            "name": "Eames Lounge Chair",
            "price_range_chf": "4000-7000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .analyze(&sample_request())
        .await
        .unwrap();

    assert_eq!(response.name, "Eames Lounge Chair");
    assert_eq!(response.designer, "Charles & Ray Eames");
    assert_eq!(response.price_range_chf, "4000-7000");
    assert!(response.metadata.hints_provided);
    assert!(!response.metadata.custom_prompt_used);
}

#[tokio::test]
async fn structured_error_body_surfaces_its_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-furniture"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Bad Request",
            "message": "No image URLs provided",
            "status": 400
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .analyze(&sample_request())
        .await
        .unwrap_err();

    match error {
        AnalysisError::Api {
            ref error,
            ref message,
            status,
        } => {
            assert_eq!(error, "Bad Request");
            assert_eq!(message, "No image URLs provided");
            assert_eq!(status, 400);
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert_eq!(error.to_string(), "No image URLs provided");
}

#[tokio::test]
async fn plain_failure_status_is_reported_by_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-furniture"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .analyze(&sample_request())
        .await
        .unwrap_err();

    assert!(matches!(error, AnalysisError::Status(500)));
    assert_eq!(error.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-furniture"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .analyze(&sample_request())
        .await
        .unwrap_err();

    assert!(matches!(error, AnalysisError::Decode(_)));
    assert_eq!(error.to_string(), "Failed to parse response JSON");
}

#[tokio::test]
async fn unreachable_server_is_a_connect_error() {
    let client = AnalysisClient::new(&Config::new("test-key", "http://unused", "http://127.0.0.1:1"));

    let error = client.analyze(&sample_request()).await.unwrap_err();

    assert!(matches!(error, AnalysisError::Connect { .. }));
    assert!(error
        .to_string()
        .starts_with("Unable to connect to furniture analysis API at"));
}

#[tokio::test]
async fn prompt_templates_are_fetched_and_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prompt-templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "custom_prompt_examples": {
                "english": ["Focus on the upholstery condition."],
                "german": ["Beschreibe den Zustand der Polsterung."]
            },
            "default_templates": {
                "english": "Describe the furniture piece in the images.",
                "german": "Beschreibe das Möbelstück auf den Bildern."
            },
            "supported_languages": {
                "english": ["English"],
                "german": ["German"]
            },
            "usage_notes": ["Hints are optional."]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let templates = client_for(&server).prompt_templates().await.unwrap();

    assert_eq!(
        templates.default_templates.english,
        "Describe the furniture piece in the images."
    );
    assert_eq!(templates.custom_prompt_examples.german.len(), 1);
    assert_eq!(templates.usage_notes, vec!["Hints are optional."]);
}
