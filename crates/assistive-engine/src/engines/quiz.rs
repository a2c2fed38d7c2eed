//! Linear multiple-choice quiz with first-answer lock-in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    #[serde(default)]
    pub hint: String,
}

impl Question {
    pub fn new(prompt: &str, options: &[&str], correct_option_index: usize, hint: &str) -> Self {
        Self {
            prompt: prompt.to_owned(),
            options: options.iter().map(|o| (*o).to_owned()).collect(),
            correct_option_index,
            hint: hint.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizProgress {
    pub question_index: usize,
    pub picked_answer_index: Option<usize>,
    pub score: usize,
}

/// Read-only snapshot for the host UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView<'a> {
    #[serde(flatten)]
    pub progress: QuizProgress,
    pub total: usize,
    pub finished: bool,
    pub question: Option<&'a Question>,
    pub feedback: Option<String>,
}

pub struct QuizEngine {
    questions: Vec<Question>,
    progress: QuizProgress,
}

impl QuizEngine {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            progress: QuizProgress::default(),
        }
    }

    /// Parse a question list from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Situational questions about supporting autistic classmates.
    pub fn situations() -> Self {
        Self::new(vec![
            Question::new(
                "Prijatelj je uznemiren jer se plan promijenio. Što je najbolje?",
                &[
                    "Reći: “Nije ništa” i ignorirati",
                    "Pitati: “Želiš pauzu ili novi plan?”",
                    "Smijati se jer je nervozan",
                ],
                1,
                "Ponudi izbor i podršku (pauza / novi plan).",
            ),
            Question::new(
                "U učionici je preglasno. Koja opcija je najprikladnija?",
                &["Pojačati zvuk", "Trebam pauzu / tiše mjesto", "Ostati bez riječi i trpjeti"],
                1,
                "Jasna poruka + izlazna strategija.",
            ),
            Question::new(
                "Netko govori prebrzo. Što možeš reći?",
                &["Možeš ponoviti sporije?", "Ne zanima me", "Šutjeti"],
                0,
                "Traži ponavljanje sporije.",
            ),
        ])
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.progress.question_index)
    }

    /// Lock in an answer for the active question. Later picks on the same
    /// question, picks after the last question, and out-of-range options are
    /// ignored.
    pub fn pick(&mut self, option_index: usize) -> bool {
        if self.progress.picked_answer_index.is_some() {
            return false;
        }
        let Some(question) = self.current() else {
            return false;
        };
        if option_index >= question.options.len() {
            return false;
        }
        let correct = option_index == question.correct_option_index;
        self.progress.picked_answer_index = Some(option_index);
        if correct {
            self.progress.score += 1;
        }
        true
    }

    /// Move to the next question. Requires an answer on the current one.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() || self.progress.picked_answer_index.is_none() {
            return false;
        }
        self.progress.picked_answer_index = None;
        self.progress.question_index += 1;
        true
    }

    pub fn reset(&mut self) {
        self.progress = QuizProgress::default();
    }

    /// Results state: every question has been answered and advanced past.
    pub fn is_finished(&self) -> bool {
        self.progress.question_index >= self.questions.len()
    }

    pub fn progress(&self) -> QuizProgress {
        self.progress
    }

    pub fn score(&self) -> usize {
        self.progress.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Verdict and hint for the locked-in answer.
    pub fn feedback(&self) -> Option<String> {
        let picked = self.progress.picked_answer_index?;
        let question = self.current()?;
        let verdict = if picked == question.correct_option_index {
            "✅ Točno!"
        } else {
            "❌ Nije točno."
        };
        Some(format!("{} {}", verdict, question.hint))
    }

    pub fn view(&self) -> QuizView<'_> {
        QuizView {
            progress: self.progress,
            total: self.total(),
            finished: self.is_finished(),
            question: self.current(),
            feedback: self.feedback(),
        }
    }
}
