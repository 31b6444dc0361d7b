use axum::{
    extract::{Form, Path, State},
    routing::{get, post},
    Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    extractors::{IsHtmx, Locale, QuizToken},
    names,
    rejections::AppError,
    session::{AnswerError, QuizSession},
    views,
    views::{quiz as quiz_views, quiz::QuizData},
    AppState,
};

use super::session_expired;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::ANSWER_URL, post(answer))
        .route(names::PREVIOUS_URL, post(previous))
        .route(names::NEXT_URL, post(next))
        .route(names::RESET_URL, post(reset))
        .route("/question/{idx}", get(go_to))
}

#[derive(Deserialize)]
struct AnswerBody {
    option: usize,
}

async fn answer(
    State(state): State<AppState>,
    QuizToken(token): QuizToken,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Form(body): Form<AnswerBody>,
) -> Result<Markup, AppError> {
    let Some(token) = token else {
        return Ok(session_expired(is_htmx, &locale));
    };

    let outcome = state
        .store
        .update(&token, |session| {
            let result = session.answer(body.option);
            (result, session.current_index(), QuizData::from_session(session))
        })
        .await;

    let Some((result, question_idx, data)) = outcome else {
        return Ok(session_expired(is_htmx, &locale));
    };

    match result {
        Ok(is_correct) => {
            tracing::debug!("session {token} answered question {question_idx}, correct={is_correct}");
        }
        Err(e @ AnswerError::AlreadyAnswered(_)) => {
            tracing::warn!("ignoring answer for session {token}: {e}");
        }
        Err(e @ AnswerError::OptionOutOfRange { .. }) => {
            tracing::warn!("rejected answer for session {token}: {e}");
            return Err(AppError::Input("option out of range"));
        }
    }

    Ok(views::render(
        is_htmx,
        "Quiz",
        quiz_views::quiz(data, &locale),
        &locale,
    ))
}

async fn previous(
    State(state): State<AppState>,
    QuizToken(token): QuizToken,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Markup {
    render_after(&state, token, is_htmx, &locale, |session| {
        session.previous();
    })
    .await
}

async fn next(
    State(state): State<AppState>,
    QuizToken(token): QuizToken,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Markup {
    render_after(&state, token, is_htmx, &locale, |session| {
        session.next();
    })
    .await
}

async fn reset(
    State(state): State<AppState>,
    QuizToken(token): QuizToken,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Markup {
    render_after(&state, token, is_htmx, &locale, QuizSession::reset).await
}

async fn go_to(
    State(state): State<AppState>,
    QuizToken(token): QuizToken,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
    Path(idx): Path<usize>,
) -> Markup {
    render_after(&state, token, is_htmx, &locale, |session| session.go_to(idx)).await
}

/// Apply `f` to the caller's session and render the quiz page it ends up on,
/// as a fragment for htmx swaps and as a full page otherwise.
async fn render_after(
    state: &AppState,
    token: Option<String>,
    is_htmx: bool,
    locale: &str,
    f: impl FnOnce(&mut QuizSession),
) -> Markup {
    let Some(token) = token else {
        return session_expired(is_htmx, locale);
    };

    let data = state
        .store
        .update(&token, |session| {
            f(session);
            QuizData::from_session(session)
        })
        .await;

    match data {
        Some(data) => views::render(is_htmx, "Quiz", quiz_views::quiz(data, locale), locale),
        None => session_expired(is_htmx, locale),
    }
}
