pub const UPLOAD_URL: &str = "/upload";
pub const ANSWER_URL: &str = "/answer";
pub const PREVIOUS_URL: &str = "/previous";
pub const NEXT_URL: &str = "/next";
pub const RESET_URL: &str = "/reset";
pub const NEW_QUIZ_URL: &str = "/new";
pub const SET_LOCALE_URL: &str = "/set-locale";

pub fn question_url(idx: usize) -> String {
    format!("/question/{idx}")
}

pub const QUIZ_SESSION_COOKIE_NAME: &str = "quiz_session";

// i18n
pub const LOCALE_COOKIE_NAME: &str = "lang";
pub const DEFAULT_LOCALE: &str = "en";
pub const SUPPORTED_LOCALES: &[(&str, &str)] = &[("en", "English"), ("pt-BR", "Português")];

// Server defaults
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:1414";
pub const DEFAULT_MAX_SESSIONS: usize = 1000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
