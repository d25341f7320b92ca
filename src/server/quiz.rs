use rand::Rng;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::db::Question;

/// Category id meaning "questions from every category".
pub const ANY_CATEGORY: i64 = 0;

/// Body of `POST /quizzes`. The client carries the whole session: every
/// question already shown plus the category being played.
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub previous_questions: Vec<i64>,
    pub quiz_category: QuizCategory,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    // web clients send select values as strings
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub id: i64,
}

impl QuizCategory {
    /// The category to restrict the pool to, if any.
    pub fn filter(&self) -> Option<i64> {
        (self.id != ANY_CATEGORY).then_some(self.id)
    }
}

/// Picks one candidate uniformly at random. `None` means the pool is exhausted.
pub fn pick_next<R: Rng + ?Sized>(mut candidates: Vec<Question>, rng: &mut R) -> Option<Question> {
    if candidates.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..candidates.len());
    Some(candidates.swap_remove(index))
}
