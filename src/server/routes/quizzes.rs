use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::questions::get_quiz_candidates;
use crate::server::{
    app::AppState,
    error::{ApiError, ApiResult, OrApi},
    extractors::ApiJson,
    format::QuestionRecord,
    quiz::{pick_next, QuizRequest},
};
use crate::telemetry::{QUIZ_POOL_EXHAUSTED, QUIZ_QUESTIONS_SERVED};

#[derive(Serialize)]
struct NextQuestion {
    success: bool,
    /// `null` once every eligible question has been asked.
    question: Option<QuestionRecord>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResult<Json<NextQuestion>> {
    let category = request.quiz_category.filter();
    let candidates = get_quiz_candidates(&pool, &request.previous_questions, category)
        .await
        .or_api(ApiError::BadRequest)?;
    let pool_size = candidates.len();

    let question = pick_next(candidates, &mut rand::thread_rng()).map(QuestionRecord::from);

    let scope = if category.is_some() { "category" } else { "any" };
    match &question {
        Some(q) => {
            QUIZ_QUESTIONS_SERVED.with_label_values(&[scope]).inc();
            tracing::debug!(question_id = q.id, pool_size, ?category, "Picked quiz question");
        }
        None => {
            QUIZ_POOL_EXHAUSTED.with_label_values(&[scope]).inc();
            tracing::info!(
                asked = request.previous_questions.len(),
                ?category,
                "Quiz pool exhausted"
            );
        }
    }

    Ok(Json(NextQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_question))
}
