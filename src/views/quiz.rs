use maud::{html, Markup};
use rust_i18n::t;

use crate::{
    models::Question,
    names,
    session::{Progress, QuizSession, Score},
    views::components,
};

/// Everything the quiz page shows, copied out of the session so the store
/// lock is not held while rendering.
pub struct QuizData {
    pub question: Question,
    pub question_idx: usize,
    pub questions_count: usize,
    pub selected: Option<usize>,
    pub answered: Vec<bool>,
    pub progress: Progress,
    pub score: Option<Score>,
}

impl QuizData {
    pub fn from_session(session: &QuizSession) -> Self {
        let question_idx = session.current_index();
        Self {
            question: session.current().clone(),
            question_idx,
            questions_count: session.len(),
            selected: session.selected(question_idx),
            answered: (0..session.len()).map(|idx| session.is_answered(idx)).collect(),
            progress: session.progress(),
            score: session.score(),
        }
    }
}

pub fn quiz(data: QuizData, locale: &str) -> Markup {
    html! {
        (progress(data.progress, locale))
        (navigation(&data, locale))

        article {
            h3 {
                (t!("quiz.question_heading", locale = locale, number = data.question_idx + 1))
                (data.question.prompt)
            }

            @match data.selected {
                Some(selected) => {
                    (feedback(&data.question, selected, locale))
                },
                None => {
                    (options(&data.question, locale))
                },
            }
        }

        @if let Some(score) = data.score {
            (final_score(score, locale))
        }

        div."quiz-actions" {
            button."secondary outline"
                   hx-post=(names::RESET_URL)
                   hx-target="main"
                   hx-swap="innerHTML"
                   hx-confirm=(t!("quiz.reset_confirm", locale = locale)) {
                (t!("quiz.reset", locale = locale))
            }
            button."secondary outline"
                   hx-post=(names::NEW_QUIZ_URL)
                   hx-target="main"
                   hx-swap="innerHTML" {
                (t!("quiz.new_quiz", locale = locale))
            }
        }
    }
}

fn progress(progress: Progress, locale: &str) -> Markup {
    html! {
        progress value=(progress.answered) max=(progress.total) {}
        small."progress-caption" {
            (t!("quiz.progress", locale = locale, answered = progress.answered, total = progress.total))
        }
    }
}

fn navigation(data: &QuizData, locale: &str) -> Markup {
    let is_first = data.question_idx == 0;
    let is_last = data.question_idx + 1 >= data.questions_count;

    html! {
        div."quiz-nav" {
            button."nav-btn"
                   hx-post=(names::PREVIOUS_URL)
                   hx-target="main"
                   hx-swap="innerHTML"
                   disabled[is_first] {
                (t!("quiz.previous", locale = locale))
            }
            span {
                (t!("quiz.position", locale = locale, current = data.question_idx + 1, total = data.questions_count))
            }
            button."nav-btn"
                   hx-post=(names::NEXT_URL)
                   hx-target="main"
                   hx-swap="innerHTML"
                   disabled[is_last] {
                (t!("quiz.next", locale = locale))
            }
        }
        div."question-links" {
            @for (idx, answered) in data.answered.iter().enumerate() {
                (components::question_link(idx, idx == data.question_idx, *answered))
            }
        }
    }
}

fn options(question: &Question, locale: &str) -> Markup {
    html! {
        @if question.is_true_false() {
            p."kind-hint" { (t!("quiz.true_false", locale = locale)) }
        }
        div."option-grid" {
            @for (idx, option) in question.options.iter().enumerate() {
                button."option-btn"
                       hx-post=(names::ANSWER_URL)
                       hx-vals=(format!(r#"{{"option": "{idx}"}}"#))
                       hx-target="main"
                       hx-swap="innerHTML" {
                    (option)
                }
            }
        }
    }
}

fn feedback(question: &Question, selected: usize, locale: &str) -> Markup {
    let is_correct = question.is_correct(selected);

    html! {
        div."option-grid" {
            @for (idx, option) in question.options.iter().enumerate() {
                @if question.is_correct(idx) {
                    div."option-correct" { (option) " \u{2713}" }
                } @else if idx == selected {
                    div."option-incorrect" { (option) " \u{274C}" }
                } @else {
                    div."option-neutral" { (option) }
                }
            }
        }

        @if is_correct {
            p."feedback-correct" { "\u{2705} " (t!("quiz.correct_answer", locale = locale)) }
        } @else {
            p."feedback-incorrect" {
                "\u{274C} "
                (t!("quiz.incorrect_answer", locale = locale, answer = question.correct_text()))
            }
        }

        @if let Some(explanation) = &question.explanation {
            div."explanation" {
                strong { (t!("quiz.explanation", locale = locale)) }
                " " (explanation)
            }
        }
    }
}

fn final_score(score: Score, locale: &str) -> Markup {
    html! {
        article."final-score" {
            h3 {
                "\u{1F389} "
                (t!("quiz.completed", locale = locale,
                    correct = score.correct,
                    total = score.total,
                    percent = score.percent()))
            }
        }
    }
}
