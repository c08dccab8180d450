//! HTTP API integration tests: health, keyword configuration, voiceprint
//! enrollment, and one-shot recognition.

mod common;

use serde_json::{Value, json};

use common::{scripted_state, silence_chunk, spawn_server, wake_chunk};

#[tokio::test]
async fn test_health_reports_loaded_engines() {
    let addr = spawn_server(scripted_state(true)).await;

    let body: Value = reqwest::get(format!("http://{addr}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    let engines = body["loaded_engines"].as_array().unwrap();
    assert!(engines.contains(&json!("scripted-transcriber")));
    assert!(engines.contains(&json!("scripted-encoder")));
}

#[tokio::test]
async fn test_health_without_encoder() {
    let addr = spawn_server(scripted_state(false)).await;

    let body: Value = reqwest::get(format!("http://{addr}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let engines = body["loaded_engines"].as_array().unwrap();
    assert_eq!(engines.len(), 1);
    assert!(!engines.contains(&json!("scripted-encoder")));
}

#[tokio::test]
async fn test_set_wake_word_round_trip() {
    let addr = spawn_server(scripted_state(true)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/set_wake_word"))
        .json(&json!({ "user_id": "alice", "wake_word": "小语小语" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = reqwest::get(format!("http://{addr}/get_keywords/alice"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["keywords"], json!(["小语小语"]));
}

#[tokio::test]
async fn test_get_keywords_default() {
    let addr = spawn_server(scripted_state(true)).await;

    let body: Value = reqwest::get(format!("http://{addr}/get_keywords/fresh-user"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["keywords"], json!(["你好星年"]));
}

#[tokio::test]
async fn test_set_keywords_accepts_list_and_csv() {
    let addr = spawn_server(scripted_state(true)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/set_keywords"))
        .json(&json!({ "user_id": "alice", "keywords": ["一号词", "二号词"] }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["keywords"], json!(["一号词", "二号词"]));

    let response = client
        .post(format!("http://{addr}/set_keywords"))
        .json(&json!({ "user_id": "alice", "keywords": "三号词, 四号词" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = reqwest::get(format!("http://{addr}/get_keywords/alice"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["keywords"], json!(["三号词", "四号词"]));
}

#[tokio::test]
async fn test_set_keywords_rejects_empty() {
    let state = scripted_state(true);
    let addr = spawn_server(state.clone()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/set_keywords"))
        .json(&json!({ "user_id": "alice", "keywords": " , " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // Session untouched: still the default keyword
    let session = state.sessions.get_or_create("alice");
    assert_eq!(session.keywords(), vec!["你好星年".to_string()]);
}

#[tokio::test]
async fn test_set_wake_word_rejects_blank() {
    let addr = spawn_server(scripted_state(true)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/set_wake_word"))
        .json(&json!({ "user_id": "alice", "wake_word": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_voice_enrolls_and_enables_verification() {
    let state = scripted_state(true);
    let addr = spawn_server(state.clone()).await;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new()
        .text("user_id", "alice")
        .part(
            "audio",
            reqwest::multipart::Part::bytes(wake_chunk()).file_name("sample.pcm"),
        );

    let response = client
        .post(format!("http://{addr}/register_voice"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let session = state.sessions.get_or_create("alice");
    assert!(session.verification_enabled());
    assert!(session.voiceprint().is_some());
}

#[tokio::test]
async fn test_register_voice_without_encoder_is_server_error() {
    let addr = spawn_server(scripted_state(false)).await;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new()
        .text("user_id", "alice")
        .part(
            "audio",
            reqwest::multipart::Part::bytes(wake_chunk()).file_name("sample.pcm"),
        );

    let response = client
        .post(format!("http://{addr}/register_voice"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.status(),
        reqwest::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_register_voice_missing_fields_is_bad_request() {
    let addr = spawn_server(scripted_state(true)).await;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new().text("user_id", "alice");
    let response = client
        .post(format!("http://{addr}/register_voice"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_voice_malformed_audio_is_bad_request() {
    let addr = spawn_server(scripted_state(true)).await;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new()
        .text("user_id", "alice")
        .part(
            "audio",
            reqwest::multipart::Part::bytes(vec![0x01u8]).file_name("odd.pcm"),
        );

    let response = client
        .post(format!("http://{addr}/register_voice"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recognize_one_shot_decision() {
    let addr = spawn_server(scripted_state(true)).await;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new()
        .text("user_id", "alice")
        .part(
            "audio",
            reqwest::multipart::Part::bytes(wake_chunk()).file_name("sample.pcm"),
        );

    let response = client
        .post(format!("http://{addr}/recognize"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["text"], "你好星年，开灯");
    assert_eq!(body["wake_detected"], true);
    assert_eq!(body["wake_word"], "你好星年");
    assert_eq!(body["speaker_verified"], false);
}

#[tokio::test]
async fn test_recognize_no_wake_names_configured_wake_word() {
    let addr = spawn_server(scripted_state(true)).await;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new()
        .text("user_id", "alice")
        .part(
            "audio",
            reqwest::multipart::Part::bytes(silence_chunk()).file_name("sample.pcm"),
        );

    let response = client
        .post(format!("http://{addr}/recognize"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["text"], "现在几点了");
    assert_eq!(body["wake_detected"], false);
    // No match, but the reply still reports which phrase was listened for
    assert_eq!(body["wake_word"], "你好星年");
}

#[tokio::test]
async fn test_register_voice_twice_is_idempotent() {
    let addr = spawn_server(scripted_state(true)).await;
    let client = reqwest::Client::new();

    let enroll = || async {
        let form = reqwest::multipart::Form::new()
            .text("user_id", "alice")
            .part(
                "audio",
                reqwest::multipart::Part::bytes(wake_chunk()).file_name("sample.pcm"),
            );
        let response = client
            .post(format!("http://{addr}/register_voice"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    };
    let recognize = || async {
        let form = reqwest::multipart::Form::new()
            .text("user_id", "alice")
            .part(
                "audio",
                reqwest::multipart::Part::bytes(wake_chunk()).file_name("sample.pcm"),
            );
        let response = client
            .post(format!("http://{addr}/recognize"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        response.json::<Value>().await.unwrap()
    };

    enroll().await;
    let first = recognize().await;
    assert_eq!(first["speaker_verified"], true);

    // Enrolling the same audio again must not change the outcome
    enroll().await;
    let second = recognize().await;
    assert_eq!(second["speaker_verified"], first["speaker_verified"]);
    assert_eq!(second["speaker_score"], first["speaker_score"]);
}
