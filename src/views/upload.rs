use maud::{html, Markup};
use rust_i18n::t;

use crate::names;

const SAMPLE_QUIZ: &str = r#"[
  {
    "prompt": "Which planet is the largest?",
    "options": ["Mars", "Jupiter", "Venus"],
    "correct_answer": 1,
    "explanation": "Jupiter is more than twice as massive as all other planets combined."
  },
  {
    "prompt": "Water boils at 100 degrees Celsius at sea level.",
    "kind": "true_false",
    "correct_answer": "Verdadeiro"
  }
]"#;

pub fn upload(error: Option<&str>, locale: &str) -> Markup {
    html! {
        h1 { (t!("upload.title", locale = locale)) }
        p { (t!("upload.description", locale = locale)) }

        @if let Some(msg) = error {
            article."error-box" {
                p { (msg) }
            }
        }

        article style="width: fit-content;" {
            form hx-post=(names::UPLOAD_URL)
                 hx-target="main"
                 enctype="multipart/form-data"
                 hx-swap="innerHTML" {
                label {
                    (t!("upload.quiz_file", locale = locale))
                    input name="quiz_file"
                          type="file"
                          required="true"
                          accept="application/json,.json"
                          aria-label=(t!("upload.quiz_file", locale = locale));
                }
                input type="submit" value=(t!("upload.submit", locale = locale));
            }
        }

        details {
            summary { (t!("upload.format_title", locale = locale)) }
            p { (t!("upload.format_hint", locale = locale)) }
            pre { code { (SAMPLE_QUIZ) } }
        }
    }
}
