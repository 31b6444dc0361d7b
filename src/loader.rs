//! Lenient loading of uploaded quiz files.
//!
//! Two input shapes are understood: a flat array of question objects, and
//! the "fragmented" shape where one array was cut into many small string
//! values (`[{"0": "[{\"pergunta\": ..."}, {"1": "...}{..."}]`) that have to
//! be glued back together and re-split on `}{`.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{CorrectAnswer, Question, QuestionKind, Questions, DEFAULT_TRUE_FALSE_OPTIONS};

const PROMPT_KEYS: [&str; 2] = ["prompt", "pergunta"];
const ANSWER_KEYS: [&str; 2] = ["correct_answer", "resposta_correta"];

/// Portuguese key and the English key it stands for. The English key wins
/// when a record carries both.
const KEY_ALIASES: [(&str, &str); 5] = [
    ("pergunta", "prompt"),
    ("tipo", "kind"),
    ("opcoes", "options"),
    ("resposta_correta", "correct_answer"),
    ("explicacao", "explanation"),
];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("the quiz file must contain an array of questions")]
    Format,
    #[error("no valid questions found in the quiz file")]
    EmptyResult,
}

#[derive(Deserialize)]
struct RawQuestion {
    prompt: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    correct_answer: Value,
    #[serde(default)]
    explanation: Option<String>,
}

/// Turn the bytes of an uploaded file into a non-empty list of questions.
pub fn load_questions(bytes: &[u8]) -> Result<Questions, LoadError> {
    let data: Value = serde_json::from_slice(bytes)?;

    let Value::Array(items) = data else {
        return Err(LoadError::Format);
    };

    if is_fragmented(&items) {
        let recovered = normalize_all(reassemble_fragments(&items));
        if !recovered.is_empty() {
            tracing::info!("recovered {} questions from fragmented input", recovered.len());
            return Ok(recovered);
        }
        tracing::debug!("fragmented recovery found nothing, reading input as a flat list");
    }

    let questions = normalize_all(items);
    if questions.is_empty() {
        return Err(LoadError::EmptyResult);
    }

    tracing::info!("loaded {} questions", questions.len());
    Ok(questions)
}

fn is_fragmented(items: &[Value]) -> bool {
    let Some(Value::Object(first)) = items.first() else {
        return false;
    };

    !first.is_empty()
        && first.values().all(Value::is_string)
        && first
            .values()
            .filter_map(Value::as_str)
            .any(|s| s.contains('['))
}

/// Glue every string fragment back into one buffer and cut it into objects.
///
/// Pieces that do not parse are skipped so one broken object does not cost
/// the whole upload.
fn reassemble_fragments(items: &[Value]) -> Vec<Value> {
    let raw: String = items
        .iter()
        .filter_map(Value::as_object)
        .flat_map(Map::values)
        .filter_map(Value::as_str)
        .collect();

    let text = raw.replace(['[', ']'], "");
    let blocks: Vec<&str> = text.split("}{").collect();
    let last = blocks.len() - 1;

    blocks
        .iter()
        .enumerate()
        .filter_map(|(i, block)| {
            let block = match (i == 0, i == last) {
                (true, true) => block.to_string(),
                (true, false) => format!("{block}}}"),
                (false, true) => format!("{{{block}"),
                (false, false) => format!("{{{block}}}"),
            };

            match serde_json::from_str::<Value>(&block) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!("skipping unparseable fragment {i}: {e}");
                    None
                }
            }
        })
        .filter(|value| has_any_key(value, &PROMPT_KEYS) && has_any_key(value, &ANSWER_KEYS))
        .collect()
}

fn has_any_key(value: &Value, keys: &[&str]) -> bool {
    value
        .as_object()
        .is_some_and(|map| keys.iter().any(|key| map.contains_key(*key)))
}

fn normalize_all(items: Vec<Value>) -> Questions {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let question = normalize(item);
            if question.is_none() {
                tracing::debug!("dropping invalid question record {i}");
            }
            question
        })
        .collect()
}

fn canonical_keys(mut map: Map<String, Value>) -> Map<String, Value> {
    for (alias, key) in KEY_ALIASES {
        if let Some(value) = map.remove(alias) {
            map.entry(key).or_insert(value);
        }
    }
    map
}

fn normalize(item: Value) -> Option<Question> {
    let Value::Object(map) = item else {
        return None;
    };
    let raw: RawQuestion = serde_json::from_value(Value::Object(canonical_keys(map))).ok()?;

    if raw.prompt.trim().is_empty() {
        return None;
    }

    let kind = match raw.kind.as_deref() {
        Some(kind) => kind.parse().ok()?,
        None => QuestionKind::default(),
    };

    let (options, correct_answer) = match kind {
        QuestionKind::TrueFalse => {
            let options = raw
                .options
                .filter(|options| !options.is_empty())
                .unwrap_or_else(|| DEFAULT_TRUE_FALSE_OPTIONS.map(String::from).to_vec());
            let answer = match raw.correct_answer {
                Value::String(text) => text,
                Value::Number(n) => {
                    let idx = usize::try_from(n.as_u64()?).ok()?;
                    options.get(idx)?.clone()
                }
                _ => return None,
            };
            (options, CorrectAnswer::Text(answer))
        }
        QuestionKind::MultipleChoice => {
            let options = raw.options.filter(|options| !options.is_empty())?;
            let idx = match &raw.correct_answer {
                Value::Number(n) => usize::try_from(n.as_u64()?).ok()?,
                Value::String(text) => options.iter().position(|o| o == text)?,
                _ => return None,
            };
            if idx >= options.len() {
                return None;
            }
            (options, CorrectAnswer::Index(idx))
        }
    };

    Some(Question {
        prompt: raw.prompt,
        kind,
        options,
        correct_answer,
        explanation: raw.explanation,
    })
}
