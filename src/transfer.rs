//! Moving categories and questions between the store and CSV files, used to
//! seed a fresh database and to back one up.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, insert_category};
use crate::db::queries::questions::{get_all_questions, import_question};
use crate::db::{Category, Question};

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const QUESTIONS_FILE: &str = "questions.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transferred {
    pub categories: usize,
    pub questions: usize,
}

fn write_to<T: Serialize>(path: &Path, data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let mut rdr =
        csv::Reader::from_path(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record.with_context(|| format!("Bad record in {}", path.display()))?;
        out.push(record);
    }
    Ok(out)
}

pub async fn export_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<Transferred> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create directory {}", dir.display()))?;
    }
    write_to(&dir.join(CATEGORIES_FILE), &categories)?;
    write_to(&dir.join(QUESTIONS_FILE), &questions)?;
    Ok(Transferred {
        categories: categories.len(),
        questions: questions.len(),
    })
}

/// Ids are kept as they are in the files. Nothing is written unless every
/// row goes in.
pub async fn import_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<Transferred> {
    let categories: Vec<Category> = read_from(&dir.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_from(&dir.join(QUESTIONS_FILE))?;

    let mut tx = pool.begin().await?;
    for category in &categories {
        insert_category(&mut *tx, category)
            .await
            .with_context(|| format!("Cannot import category {}", category.id))?;
    }
    for question in &questions {
        import_question(&mut *tx, question)
            .await
            .with_context(|| format!("Cannot import question {}", question.id))?;
    }
    tx.commit().await?;

    Ok(Transferred {
        categories: categories.len(),
        questions: questions.len(),
    })
}
