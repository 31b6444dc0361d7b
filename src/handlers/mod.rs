pub mod homepage;
pub mod quiz;

use maud::Markup;
use rust_i18n::t;

use crate::views::{self, upload as upload_views};

/// Upload form shown in place of the quiz when the session cookie points
/// nowhere, e.g. after a restart or eviction.
pub(crate) fn session_expired(is_htmx: bool, locale: &str) -> Markup {
    tracing::debug!("quiz session missing, showing upload form");
    let msg = t!("upload.session_expired", locale = locale);
    views::render(
        is_htmx,
        "Upload",
        upload_views::upload(Some(&*msg), locale),
        locale,
    )
}
