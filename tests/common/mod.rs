use axum::{
    body::Body,
    http::{header, Method, Request, Response},
};
use quizdrop::{
    models::{CorrectAnswer, Question, QuestionKind, DEFAULT_TRUE_FALSE_OPTIONS},
    router, AppState,
};
use serde_json::{Map, Value};

pub fn multiple_choice(prompt: &str, options: &[&str], correct: usize) -> Question {
    Question {
        prompt: prompt.to_string(),
        kind: QuestionKind::MultipleChoice,
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: CorrectAnswer::Index(correct),
        explanation: None,
    }
}

pub fn true_false(prompt: &str, correct: &str) -> Question {
    Question {
        prompt: prompt.to_string(),
        kind: QuestionKind::TrueFalse,
        options: DEFAULT_TRUE_FALSE_OPTIONS.iter().map(|o| o.to_string()).collect(),
        correct_answer: CorrectAnswer::Text(correct.to_string()),
        explanation: None,
    }
}

pub fn sample_questions() -> Vec<Question> {
    vec![
        multiple_choice("What is 1+1?", &["1", "2", "3"], 1),
        true_false("The Earth orbits the Sun", "Verdadeiro"),
        multiple_choice("Which is a primary color?", &["Green", "Red"], 1),
    ]
}

/// Cut `text` into single-key string objects of `chunk` characters each,
/// the way the broken producer emits them.
pub fn fragmented(text: &str, chunk: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let items: Vec<Value> = chars
        .chunks(chunk)
        .enumerate()
        .map(|(i, piece)| {
            let mut map = Map::new();
            map.insert(i.to_string(), Value::String(piece.iter().collect()));
            Value::Object(map)
        })
        .collect();
    serde_json::to_string(&items).expect("fragments should serialize")
}

pub fn app() -> axum::Router {
    router(AppState::new(16))
}

pub fn upload_request(json: &str, cookie: Option<&str>) -> Request<Body> {
    let boundary = "quizdrop-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"quiz_file\"; filename=\"quiz.json\"\r\n\
         Content-Type: application/json\r\n\r\n\
         {json}\r\n\
         --{boundary}--\r\n"
    );

    let mut req = Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header("HX-Request", "true");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::from(body)).expect("request build should succeed")
}

pub fn htmx_post(uri: &str, cookie: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, cookie)
        .header("HX-Request", "true")
        .body(Body::from(form.to_string()))
        .expect("request build should succeed")
}

/// `name=value` part of the session cookie set by a response.
pub fn session_cookie(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("response should set a cookie")
        .to_string()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}
