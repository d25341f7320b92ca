use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::{Category, Question};

/// Public shape of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Category id to category name. Serializes as a JSON object keyed by the id.
pub type CategoryMap = BTreeMap<i64, String>;

impl From<Question> for QuestionRecord {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            answer: q.answer,
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

pub fn format_questions(records: Vec<Question>) -> Vec<QuestionRecord> {
    records.into_iter().map(QuestionRecord::from).collect()
}

/// Later duplicates of an id overwrite earlier ones.
pub fn format_categories(records: Vec<Category>) -> CategoryMap {
    records.into_iter().map(|c| (c.id, c.kind)).collect()
}
