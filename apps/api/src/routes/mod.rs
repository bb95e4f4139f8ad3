pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::pipeline::handlers as evaluations;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Evaluation API
        .route("/api/v1/evaluations", post(evaluations::handle_evaluate))
        .route(
            "/api/v1/evaluations/upload",
            post(evaluations::handle_evaluate_upload),
        )
        // Chat API
        .route("/api/v1/chat", post(chat::handle_chat))
        .route(
            "/api/v1/conversations",
            get(chat::handle_list_conversations),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::chat::prompts::{CHAT_ROLE, FALLBACK_RESPONSE};
    use crate::config::Config;
    use crate::conversation::ConversationLog;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::pipeline::prompts::*;

    fn config() -> Config {
        Config {
            database_url: None,
            llm_api_key: "test-key".to_string(),
            llm_base_url: "http://localhost".to_string(),
            llm_model: "test-model".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn app(generator: ScriptedGenerator) -> (Router, ConversationLog) {
        let log = ConversationLog::in_memory();
        let state = AppState::new(config(), Arc::new(generator), log.clone());
        (build_router(state), log)
    }

    fn full_script() -> ScriptedGenerator {
        ScriptedGenerator::new()
            .reply(PARSER_ROLE, "Skills: Python")
            .reply(ANALYZER_ROLE, "Needs: Python, AWS")
            .reply(DETECTOR_ROLE, "ATS Score: 64/100")
            .reply(
                RECOMMENDER_ROLE,
                "**ATS Compatibility Score: 64/100**\n\n**Top Missing Skills:**\n1. AWS\n\nTip: say &quot;impact&quot;",
            )
            .reply(CHAT_ROLE, "Consider an AWS certification. Which region are you in?")
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let (router, _) = app(ScriptedGenerator::new());
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "test-model");
    }

    #[tokio::test]
    async fn test_evaluate_returns_report() {
        let (router, log) = app(full_script());
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/v1/evaluations",
                json!({
                    "resume_text": "John Doe, john@x.com, 555-123-4567, 5 years Python",
                    "job_description": "Need 5 years Python, AWS"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ats_score"], 64);
        assert_eq!(body["missing_skills"], json!(["AWS"]));
        assert!(body["report"].as_str().unwrap().contains("say \"impact\""));
        assert_eq!(body["stages"].as_array().unwrap().len(), 4);
        assert_eq!(log.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_rejects_blank_input() {
        let (router, log) = app(full_script());
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/v1/evaluations",
                json!({"resume_text": "  ", "job_description": "Need AWS"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(log.entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_stage_failure_is_500() {
        let (router, log) = app(full_script().fail(RECOMMENDER_ROLE, "boom"));
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/v1/evaluations",
                json!({"resume_text": "Python dev", "job_description": "Need AWS"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["code"], "LLM_ERROR");
        assert!(log.entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_with_unreadable_pdf_is_422() {
        let (router, _) = app(full_script());
        let boundary = "career-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"resume.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             not a pdf\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"job_description\"\r\n\r\n\
             Need AWS\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/evaluations/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Error reading PDF:"));
    }

    #[tokio::test]
    async fn test_chat_then_conversations_lists_turn() {
        let (router, _) = app(full_script());
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/chat",
                json!({"question": "Should I get certified?"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["response"],
            "Consider an AWS certification. Which region are you in?"
        );

        let response = router
            .oneshot(Request::get("/api/v1/conversations").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let entries = body_json(response).await;
        assert_eq!(entries.as_array().unwrap().len(), 1);
        assert_eq!(entries[0]["kind"], "chat");
        assert_eq!(entries[0]["question"], "Should I get certified?");
    }

    #[tokio::test]
    async fn test_chat_generation_failure_returns_fallback() {
        let (router, log) = app(ScriptedGenerator::new().fail(CHAT_ROLE, "down"));
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/v1/chat",
                json!({"question": "Any tips?", "resume_text": null}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["response"], FALLBACK_RESPONSE);
        assert_eq!(log.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_question() {
        let (router, _) = app(full_script());
        let response = router
            .oneshot(json_request("POST", "/api/v1/chat", json!({"question": ""})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
