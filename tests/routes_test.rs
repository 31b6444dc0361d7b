mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{app, body_string, htmx_post, session_cookie, upload_request};
use tower::ServiceExt;

const TWO_QUESTIONS: &str = r#"[
    {"prompt": "What is 1+1?", "options": ["1", "2"], "correct_answer": 1, "explanation": "Basic arithmetic"},
    {"prompt": "Fire is cold", "kind": "true_false", "correct_answer": "Falso"}
]"#;

#[tokio::test]
async fn homepage_without_session_shows_upload_form() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("request build should succeed"),
        )
        .await
        .expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("name=\"quiz_file\""));
}

#[tokio::test]
async fn state_changing_requests_require_htmx_header() {
    let app = app();

    for uri in ["/upload", "/answer", "/previous", "/next", "/reset", "/new"] {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request build should succeed"),
            )
            .await
            .expect("router should respond");

        assert_eq!(
            resp.status(),
            StatusCode::FORBIDDEN,
            "expected FORBIDDEN for {uri}",
        );
    }
}

#[tokio::test]
async fn malformed_upload_shows_parse_message() {
    let resp = app()
        .oneshot(upload_request(r#"[{"prompt": "Broken""#, None))
        .await
        .expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    let body = body_string(resp).await;
    assert!(body.contains("Invalid JSON file"));
}

#[tokio::test]
async fn upload_errors_are_localized() {
    let mut req = upload_request(r#"{"prompt": "Not a list"}"#, None);
    req.headers_mut()
        .insert(header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9".parse().unwrap());

    let resp = app().oneshot(req).await.expect("router should respond");
    let body = body_string(resp).await;
    assert!(body.contains("Formato inválido"));
}

#[tokio::test]
async fn valid_upload_starts_a_session() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(upload_request(TWO_QUESTIONS, None))
        .await
        .expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);
    assert!(cookie.starts_with("quiz_session="));

    let body = body_string(resp).await;
    assert!(body.contains("Question 1: "));
    assert!(body.contains("What is 1+1?"));
    assert!(body.contains("Progress: 0/2 questions answered"));

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .expect("request build should succeed"),
        )
        .await
        .expect("router should respond");
    let body = body_string(resp).await;
    assert!(body.contains("What is 1+1?"));
}

#[tokio::test]
async fn answering_every_question_shows_final_score() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(upload_request(TWO_QUESTIONS, None))
        .await
        .expect("router should respond");
    let cookie = session_cookie(&resp);

    let resp = app
        .clone()
        .oneshot(htmx_post("/answer", &cookie, "option=1"))
        .await
        .expect("router should respond");
    let body = body_string(resp).await;
    assert!(body.contains("Correct answer!"));
    assert!(body.contains("Basic arithmetic"));
    assert!(!body.contains("Quiz completed!"));

    let resp = app
        .clone()
        .oneshot(htmx_post("/next", &cookie, ""))
        .await
        .expect("router should respond");
    let body = body_string(resp).await;
    assert!(body.contains("Fire is cold"));
    assert!(body.contains("Verdadeiro"));

    let resp = app
        .clone()
        .oneshot(htmx_post("/answer", &cookie, "option=0"))
        .await
        .expect("router should respond");
    let body = body_string(resp).await;
    assert!(body.contains("The correct answer is: Falso"));
    assert!(body.contains("Progress: 2/2 questions answered"));
    assert!(body.contains("Quiz completed! Score: 1/2 (50%)"));
}

#[tokio::test]
async fn answer_out_of_range_is_rejected() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(upload_request(TWO_QUESTIONS, None))
        .await
        .expect("router should respond");
    let cookie = session_cookie(&resp);

    let resp = app
        .oneshot(htmx_post("/answer", &cookie, "option=9"))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reset_clears_progress() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(upload_request(TWO_QUESTIONS, None))
        .await
        .expect("router should respond");
    let cookie = session_cookie(&resp);

    app.clone()
        .oneshot(htmx_post("/answer", &cookie, "option=0"))
        .await
        .expect("router should respond");

    let resp = app
        .oneshot(htmx_post("/reset", &cookie, ""))
        .await
        .expect("router should respond");
    let body = body_string(resp).await;
    assert!(body.contains("Progress: 0/2 questions answered"));
}

#[tokio::test]
async fn unknown_session_falls_back_to_upload_form() {
    let resp = app()
        .oneshot(htmx_post("/answer", "quiz_session=missing", "option=0"))
        .await
        .expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Your quiz session has expired"));
}

#[tokio::test]
async fn static_files_are_served() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/static/index.css")
                .body(Body::empty())
                .expect("request build should succeed"),
        )
        .await
        .expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css"
    );

    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/static/missing.css")
                .body(Body::empty())
                .expect("request build should succeed"),
        )
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn question_link_without_htmx_renders_one_full_page() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(upload_request(TWO_QUESTIONS, None))
        .await
        .expect("router should respond");
    let cookie = session_cookie(&resp);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/question/1")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .expect("request build should succeed"),
        )
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("Fire is cold"));
    assert_eq!(body.matches("<title>").count(), 1);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/question/0")
                .header(header::COOKIE, &cookie)
                .header("HX-Request", "true")
                .body(Body::empty())
                .expect("request build should succeed"),
        )
        .await
        .expect("router should respond");
    let body = body_string(resp).await;
    assert!(!body.contains("<!DOCTYPE html>"));
    assert!(body.contains("What is 1+1?"));
    assert_eq!(body.matches("<title>").count(), 1);
}
