use crate::models::{Question, Questions};

/// One upload's questions together with the answers given so far.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Questions,
    answers: Vec<Option<usize>>,
    current: usize,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("question {0} has already been answered")]
    AlreadyAnswered(usize),
    #[error("option {index} does not exist, the question has {len} options")]
    OptionOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.answered as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct as f64 * 100.0 / self.total as f64).round() as u32
    }
}

impl QuizSession {
    /// Returns `None` for an empty question list.
    pub fn new(questions: Questions) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        let answers = vec![None; questions.len()];
        Some(Self {
            questions,
            answers,
            current: 0,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Question {
        &self.questions[self.current]
    }

    /// Record the chosen option for the current question.
    ///
    /// Answers are final: a question that already has one rejects another.
    pub fn answer(&mut self, option: usize) -> Result<bool, AnswerError> {
        let idx = self.current;
        if self.answers[idx].is_some() {
            return Err(AnswerError::AlreadyAnswered(idx));
        }

        let question = &self.questions[idx];
        if option >= question.options.len() {
            return Err(AnswerError::OptionOutOfRange {
                index: option,
                len: question.options.len(),
            });
        }

        self.answers[idx] = Some(option);
        Ok(question.is_correct(option))
    }

    pub fn selected(&self, idx: usize) -> Option<usize> {
        self.answers.get(idx).copied().flatten()
    }

    pub fn is_answered(&self, idx: usize) -> bool {
        self.selected(idx).is_some()
    }

    pub fn is_correct_at(&self, idx: usize) -> bool {
        self.selected(idx)
            .is_some_and(|option| self.questions[idx].is_correct(option))
    }

    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn next(&mut self) -> bool {
        if self.current + 1 >= self.questions.len() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Jump to a question, clamped to the last one.
    pub fn go_to(&mut self, idx: usize) {
        self.current = idx.min(self.questions.len() - 1);
    }

    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.answers.iter().filter(|a| a.is_some()).count(),
            total: self.questions.len(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    /// Final score, available once every question has an answer.
    pub fn score(&self) -> Option<Score> {
        if !self.is_complete() {
            return None;
        }
        let correct = (0..self.questions.len())
            .filter(|idx| self.is_correct_at(*idx))
            .count();
        Some(Score {
            correct,
            total: self.questions.len(),
        })
    }

    pub fn reset(&mut self) {
        self.answers.iter_mut().for_each(|a| *a = None);
        self.current = 0;
    }
}
