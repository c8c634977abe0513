pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::enhancer::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tailor", post(handlers::handle_tailor))
        .route("/api/v1/keywords", post(handlers::handle_keywords))
        .route(
            "/api/v1/resumes/enhance",
            post(handlers::handle_enhance_resume),
        )
        .route("/api/v1/cover-letters", post(handlers::handle_cover_letter))
        .route("/api/v1/export", post(handlers::handle_export))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::lexicon::Lexicon;
    use crate::config::Config;
    use crate::enhancer::LocalEnhancer;

    const BOUNDARY: &str = "tailor-test-boundary";

    const RESUME: &str = "Jane Doe\n\n\
        • Managed a team of five engineers\n\
        • Developed internal tooling using Go";

    const JOB: &str = "Senior Python engineer. Python, Django and Kubernetes experience required. \
        Python services at scale.";

    fn app() -> Router {
        let enhancer = LocalEnhancer::new(&Lexicon::default(), Some(7)).unwrap();
        build_router(AppState {
            enhancer: Arc::new(enhancer),
            config: Config::from_lookup(|_| None).unwrap(),
        })
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(parts: &[(&str, Option<(&str, &str)>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, file, value) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file {
                Some((file_name, content_type)) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: {content_type}\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::post("/api/v1/tailor")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["backend"], "local");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_tailor_runs_all_stages_on_text_upload() {
        let request = multipart_request(&[
            ("resume", Some(("resume.txt", "text/plain")), RESUME),
            ("job_description", None, JOB),
            ("company_name", None, "Acme"),
        ]);
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["backend"], "local");
        assert_eq!(body["document"]["kind"], "text");
        assert!(body["keywords"]["content"]
            .as_str()
            .unwrap()
            .contains("python"));
        assert_eq!(body["enhanced_resume"]["kind"], "enhanced_resume");
        assert!(body["enhanced_resume"]["file_name"]
            .as_str()
            .unwrap()
            .starts_with("enhanced_resume_"));
        assert!(body["cover_letter"]["content"]
            .as_str()
            .unwrap()
            .contains("Acme"));
    }

    #[tokio::test]
    async fn test_tailor_requires_resume_and_job_description() {
        let response = app()
            .oneshot(multipart_request(&[("job_description", None, JOB)]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app()
            .oneshot(multipart_request(&[
                ("resume", Some(("resume.txt", "text/plain")), RESUME),
                ("job_description", None, "   "),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_tailor_rejects_unreadable_documents() {
        let response = app()
            .oneshot(multipart_request(&[
                ("resume", Some(("resume.rtf", "application/rtf")), RESUME),
                ("job_description", None, JOB),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = app()
            .oneshot(multipart_request(&[
                ("resume", Some(("resume.pdf", "application/pdf")), "not a pdf"),
                ("job_description", None, JOB),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
    }

    #[tokio::test]
    async fn test_keywords_endpoint() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/keywords",
                json!({ "job_description": JOB }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["report"]["degraded"], false);
        let report = body["report"]["content"].as_str().unwrap();
        assert!(report.starts_with("**KEY KEYWORDS & SKILLS ANALYSIS**"));
        assert!(report.contains("**Top Keywords:**"));
    }

    #[tokio::test]
    async fn test_enhance_and_cover_letter_endpoints() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/resumes/enhance",
                json!({ "resume_text": RESUME, "job_description": JOB }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["artifact"]["kind"], "enhanced_resume");
        assert!(body["artifact"]["content"]
            .as_str()
            .unwrap()
            .starts_with("Jane Doe"));

        let response = app()
            .oneshot(json_request(
                "/api/v1/cover-letters",
                json!({
                    "resume_text": RESUME,
                    "job_description": JOB,
                    "position_title": "Platform Engineer"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["artifact"]["kind"], "cover_letter");
        assert!(body["artifact"]["content"]
            .as_str()
            .unwrap()
            .contains("Platform Engineer"));
    }

    #[tokio::test]
    async fn test_json_endpoints_reject_blank_input() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/resumes/enhance",
                json!({ "resume_text": "", "job_description": JOB }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_returns_attachment() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/export",
                json!({ "kind": "cover_letter", "content": "Dear Hiring Manager," }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"cover_letter_"));
        assert!(disposition.ends_with(".txt\""));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Dear Hiring Manager,");
    }
}
