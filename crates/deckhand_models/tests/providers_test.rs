//! Provider clients against a local stand-in server.

use axum::Router;
use axum::extract::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use deckhand_core::{GenerateRequestBuilder, ImagePayload, ImageRequest, ImageResponseFormat, Message, Output};
use deckhand_error::{ProviderErrorKind, RetryableError};
use deckhand_interface::{ImageDriver, TextDriver};
use deckhand_models::{AnthropicClient, OpenAiImageClient, StabilityImageClient};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::time::Duration;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind local listener");
    let addr = listener.local_addr().expect("Local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server runs");
    });
    format!("http://{}", addr)
}

fn openai(base_url: &str, format: ImageResponseFormat) -> OpenAiImageClient {
    OpenAiImageClient::new("test-key", "dall-e-3", "1024x1024", format).with_base_url(base_url)
}

#[tokio::test]
async fn test_openai_rate_limit_carries_reset_hint() {
    let app = Router::new().route(
        "/v1/images/generations",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                [
                    ("x-ratelimit-reset-images", "2"),
                    ("x-ratelimit-remaining-images", "0"),
                ],
                "Rate limit exceeded for images per minute",
            )
        }),
    );
    let base = serve(app).await;

    let err = openai(&base, ImageResponseFormat::Url)
        .generate_image(&ImageRequest::new("A walrus in a hot tub"))
        .await
        .expect_err("429 is an error");

    assert!(err.is_retryable());
    assert_eq!(err.retry_after(), Some(Duration::from_secs(2)));
}

#[tokio::test]
async fn test_openai_client_error_is_permanent() {
    let app = Router::new().route(
        "/v1/images/generations",
        post(|| async { (StatusCode::BAD_REQUEST, "content policy violation") }),
    );
    let base = serve(app).await;

    let err = openai(&base, ImageResponseFormat::Url)
        .generate_image(&ImageRequest::new("anything"))
        .await
        .expect_err("400 is an error");

    assert!(!err.is_retryable());
    match &err.as_provider().expect("Provider error").kind {
        ProviderErrorKind::Api { status, .. } => assert_eq!(*status, 400),
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_openai_request_shape_and_url_payload() {
    let app = Router::new().route(
        "/v1/images/generations",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            assert_eq!(
                headers.get("authorization").and_then(|v| v.to_str().ok()),
                Some("Bearer test-key")
            );
            assert_eq!(body["model"], "dall-e-3");
            assert_eq!(body["n"], 1);
            assert_eq!(body["size"], "1024x1024");
            assert_eq!(body["response_format"], "url");
            Json(json!({
                "created": 1,
                "data": [{"url": format!("https://images.test/{}", body["prompt"].as_str().unwrap_or_default().len())}]
            }))
        }),
    );
    let base = serve(app).await;

    let payload = openai(&base, ImageResponseFormat::Url)
        .generate_image(&ImageRequest::new("abcd"))
        .await
        .expect("Image payload");

    assert_eq!(payload, ImagePayload::Url("https://images.test/4".to_string()));
}

#[tokio::test]
async fn test_openai_b64_payload_is_decoded() {
    let app = Router::new().route(
        "/v1/images/generations",
        post(|| async { Json(json!({"created": 1, "data": [{"b64_json": "iVBORw=="}]})) }),
    );
    let base = serve(app).await;

    let payload = openai(&base, ImageResponseFormat::B64Json)
        .generate_image(&ImageRequest::new("x"))
        .await
        .expect("Image payload");

    match payload {
        ImagePayload::Bytes { mime, data } => {
            assert_eq!(mime, "image/png");
            assert_eq!(data, vec![0x89, b'P', b'N', b'G']);
        }
        other => panic!("Expected bytes, got {:?}", other),
    }
}

#[tokio::test]
async fn test_openai_empty_data_is_parse_error() {
    let app = Router::new().route(
        "/v1/images/generations",
        post(|| async { Json(json!({"created": 1, "data": []})) }),
    );
    let base = serve(app).await;

    let err = openai(&base, ImageResponseFormat::Url)
        .generate_image(&ImageRequest::new("x"))
        .await
        .expect_err("No images");
    assert!(matches!(
        err.as_provider().map(|e| &e.kind),
        Some(ProviderErrorKind::Parse(_))
    ));
}

#[tokio::test]
async fn test_download_reads_content_type() {
    let app = Router::new()
        .route(
            "/hosted/image",
            get(|| async { ([("content-type", "image/jpeg")], vec![1u8, 2, 3]).into_response() }),
        )
        .route("/hosted/expired", get(|| async { StatusCode::FORBIDDEN }));
    let base = serve(app).await;
    let client = openai(&base, ImageResponseFormat::Url);

    let (mime, data) = client
        .download(&format!("{}/hosted/image", base))
        .await
        .expect("Downloaded");
    assert_eq!(mime, "image/jpeg");
    assert_eq!(data, vec![1, 2, 3]);

    let err = client
        .download(&format!("{}/hosted/expired", base))
        .await
        .expect_err("Expired URL");
    assert!(matches!(
        err.as_provider().map(|e| &e.kind),
        Some(ProviderErrorKind::Download(_))
    ));
}

#[tokio::test]
async fn test_stability_returns_bytes() {
    let app = Router::new().route(
        "/v2beta/stable-image/generate/ultra",
        post(|headers: HeaderMap| async move {
            assert_eq!(
                headers.get("accept").and_then(|v| v.to_str().ok()),
                Some("image/*")
            );
            ([("content-type", "image/webp")], vec![9u8, 9, 9])
        }),
    );
    let base = serve(app).await;

    let payload = StabilityImageClient::new("sk-test")
        .with_base_url(&base)
        .generate_image(&ImageRequest::new("A castle made of toast"))
        .await
        .expect("Image payload");

    assert_eq!(
        payload,
        ImagePayload::Bytes {
            mime: "image/webp".to_string(),
            data: vec![9, 9, 9],
        }
    );
}

#[tokio::test]
async fn test_stability_has_no_hosted_images() {
    let client = StabilityImageClient::new("sk-test");
    let err = client
        .download("https://example.invalid/x.png")
        .await
        .expect_err("Unsupported");
    assert!(matches!(
        err.as_provider().map(|e| &e.kind),
        Some(ProviderErrorKind::UnsupportedOutput(_))
    ));
}

#[tokio::test]
async fn test_anthropic_forwards_headers_and_settings() {
    let app = Router::new().route(
        "/v1/messages",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let beta = headers
                .get("anthropic-beta")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("none")
                .to_string();
            assert_eq!(
                headers.get("anthropic-version").and_then(|v| v.to_str().ok()),
                Some("2023-06-01")
            );
            Json(json!({
                "id": "msg_1",
                "model": body["model"],
                "content": [
                    {"type": "text", "text": format!("beta={} max={} temp={}", beta, body["max_tokens"], body["temperature"])}
                ],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 10, "output_tokens": 5}
            }))
        }),
    );
    let base = serve(app).await;

    let mut extra = BTreeMap::new();
    extra.insert(
        "anthropic-beta".to_string(),
        "max-tokens-3-5-sonnet-2024-07-15".to_string(),
    );
    let request = GenerateRequestBuilder::default()
        .messages(vec![Message::user("outline please")])
        .max_tokens(8000u32)
        .temperature(0.5f32)
        .extra_headers(extra)
        .build()
        .expect("Valid request");

    let client = AnthropicClient::new("test-key", "claude-3-5-sonnet-20240620").with_base_url(&base);
    let response = client.generate(&request).await.expect("Response");

    assert_eq!(
        response.first(),
        Some(&Output::Text(
            "beta=max-tokens-3-5-sonnet-2024-07-15 max=8000 temp=0.5".to_string()
        ))
    );
}

#[test]
fn test_anthropic_block_conversion_keeps_order() {
    let response: deckhand_models::AnthropicResponse = serde_json::from_value(json!({
        "id": "msg_2",
        "content": [
            {"type": "tool_use", "id": "tu_1", "name": "lookup", "input": {"q": "x"}},
            {"type": "text", "text": "hello"},
            {"type": "thinking", "thinking": "..."}
        ]
    }))
    .expect("Valid response");

    let converted = AnthropicClient::convert_response(&response);
    let kinds: Vec<&str> = converted.outputs.iter().map(Output::kind_name).collect();
    assert_eq!(kinds, vec!["tool_calls", "text", "json"]);
}
