use axum::{
    extract::{Form, Multipart, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    extractors::{match_supported_locale, IsHtmx, Locale, QuizToken},
    loader::{self, LoadError},
    names,
    rejections::{AppError, ResultExt},
    session::QuizSession,
    utils, views,
    views::{quiz as quiz_views, quiz::QuizData, upload as upload_views},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route(names::UPLOAD_URL, post(upload))
        .route(names::NEW_QUIZ_URL, post(new_quiz))
        .route(names::SET_LOCALE_URL, post(set_locale))
}

async fn homepage(
    State(state): State<AppState>,
    QuizToken(token): QuizToken,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> maud::Markup {
    if let Some(token) = token {
        if let Some(data) = state.store.read(&token, QuizData::from_session).await {
            return views::render(is_htmx, "Quiz", quiz_views::quiz(data, &locale), &locale);
        }
    }

    views::render(
        is_htmx,
        "Upload",
        upload_views::upload(None, &locale),
        &locale,
    )
}

async fn upload(
    State(state): State<AppState>,
    QuizToken(previous): QuizToken,
    Locale(locale): Locale,
    mut multipart: Multipart,
) -> Result<axum::response::Response, AppError> {
    let mut quiz_file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .reject_input("failed to read multipart field")?
    {
        let name = field.name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .reject_input("failed to read field data")?;
        if name == "quiz_file" {
            quiz_file = Some(bytes);
        }
    }

    let quiz_file = quiz_file.ok_or(AppError::Input("missing quiz_file field"))?;

    let questions = match loader::load_questions(&quiz_file) {
        Ok(questions) => questions,
        Err(e) => {
            tracing::warn!("rejected quiz upload: {e}");
            let msg = match e {
                LoadError::Parse(_) => t!("upload.error_parse", locale = &locale),
                LoadError::Format => t!("upload.error_format", locale = &locale),
                LoadError::EmptyResult => t!("upload.error_empty", locale = &locale),
            };
            return Ok(
                views::titled("Upload", upload_views::upload(Some(&*msg), &locale))
                    .into_response(),
            );
        }
    };

    let session =
        QuizSession::new(questions).ok_or(AppError::Internal("quiz file produced no questions"))?;
    let data = QuizData::from_session(&session);

    if let Some(previous) = previous {
        state.store.remove(&previous).await;
    }
    let token = state.store.create(session).await;
    tracing::info!(
        "created quiz session {token} with {} questions",
        data.questions_count
    );

    let cookie = utils::cookie(names::QUIZ_SESSION_COOKIE_NAME, &token, state.secure_cookies)
        .reject("could not build session cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((
        headers,
        views::titled("Quiz", quiz_views::quiz(data, &locale)),
    )
        .into_response())
}

async fn new_quiz(
    State(state): State<AppState>,
    QuizToken(token): QuizToken,
    Locale(locale): Locale,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = token {
        if state.store.remove(&token).await {
            tracing::info!("discarded quiz session {token}");
        }
    }

    let cookie = utils::clear_cookie(names::QUIZ_SESSION_COOKIE_NAME, state.secure_cookies)
        .reject("could not build session cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((
        headers,
        views::titled("Upload", upload_views::upload(None, &locale)),
    ))
}

#[derive(Deserialize)]
struct SetLocaleBody {
    locale: String,
}

async fn set_locale(
    State(state): State<AppState>,
    Form(body): Form<SetLocaleBody>,
) -> Result<impl IntoResponse, AppError> {
    let locale = match_supported_locale(&body.locale).unwrap_or(names::DEFAULT_LOCALE);
    let cookie = utils::cookie(names::LOCALE_COOKIE_NAME, locale, state.secure_cookies)
        .reject("could not build locale cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert("HX-Refresh", HeaderValue::from_static("true"));

    Ok((headers, ""))
}
