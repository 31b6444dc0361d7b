use maud::{html, Markup};

use crate::names;

/// Numbered shortcut to one question; answered questions are marked.
pub fn question_link(idx: usize, is_current: bool, is_answered: bool) -> Markup {
    let class = match (is_current, is_answered) {
        (true, _) => "question-link current",
        (false, true) => "question-link answered",
        (false, false) => "question-link",
    };
    html! {
        a class=(class)
          href="#"
          hx-get=(names::question_url(idx))
          hx-target="main"
          hx-swap="innerHTML" {
            (idx + 1)
        }
    }
}
