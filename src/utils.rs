use axum::http::{header::InvalidHeaderValue, HeaderValue};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn cookie(name: &str, value: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = if secure { " Secure;" } else { "" };
    format!("{name}={value}; HttpOnly; Max-Age=3600;{secure} Path=/; SameSite=Strict").parse()
}

pub fn clear_cookie(name: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = if secure { " Secure;" } else { "" };
    format!("{name}=; HttpOnly; Max-Age=0;{secure} Path=/; SameSite=Strict").parse()
}
