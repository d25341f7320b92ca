use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::questions::{count_questions, get_questions_for_category};
use crate::server::{
    app::AppState,
    error::{ApiError, ApiResult, OrApi},
    extractors::ApiPath,
    format::{format_questions, CategoryMap},
};

use super::{category_name, load_categories, QuestionList};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: CategoryMap,
    total_categories: usize,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResult<Json<CategoriesResponse>> {
    let categories = load_categories(&pool, ApiError::BadRequest).await?;
    Ok(Json(CategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    ApiPath(category_id): ApiPath<i64>,
) -> ApiResult<Json<QuestionList>> {
    let questions = format_questions(
        get_questions_for_category(&pool, category_id)
            .await
            .or_api(ApiError::BadRequest)?,
    );
    if questions.is_empty() {
        tracing::debug!(category_id, "Category has no questions");
        return Err(ApiError::NotFound);
    }

    let categories = load_categories(&pool, ApiError::BadRequest).await?;
    let total_questions = count_questions(&pool).await.or_api(ApiError::BadRequest)?;

    Ok(Json(QuestionList {
        success: true,
        questions,
        total_questions,
        current_category: category_name(&categories, category_id, ApiError::BadRequest)?,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
}
