mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::get_all_categories;

use super::error::{ApiError, ApiResult, OrApi};
use super::format::{format_categories, CategoryMap, QuestionRecord};

/// Questions listed for one category or one search, with the name of the
/// category the client should show as current.
#[derive(Serialize)]
struct QuestionList {
    success: bool,
    questions: Vec<QuestionRecord>,
    #[serde(rename = "totalQuestions")]
    total_questions: i64,
    current_category: String,
}

/// All categories, or `NotFound` when there are none.
async fn load_categories(pool: &SqlitePool, fallback: ApiError) -> ApiResult<CategoryMap> {
    let categories = format_categories(get_all_categories(pool).await.or_api(fallback)?);
    if categories.is_empty() {
        tracing::debug!("No categories stored");
        return Err(ApiError::NotFound);
    }
    Ok(categories)
}

// a dangling category reference is a failed lookup, not a missing resource
fn category_name(categories: &CategoryMap, id: i64, fallback: ApiError) -> ApiResult<String> {
    categories
        .get(&id)
        .cloned()
        .ok_or_else(|| format!("category {id} is referenced but does not exist"))
        .or_api(fallback)
}
