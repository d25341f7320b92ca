use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::questions::{
    self, count_questions, get_all_questions, get_question, search_questions,
};
use crate::db::NewQuestion;
use crate::server::{
    app::AppState,
    error::{ApiError, ApiResult, OrApi},
    extractors::{ApiJson, ApiPath, ApiQuery},
    format::{format_questions, CategoryMap, QuestionRecord},
    pagination::{paginate, PageParams},
};

use super::{category_name, load_categories, QuestionList};

/// `POST /questions` either creates a question or, when `searchTerm` is
/// present, searches. The question fields are ignored while searching.
#[derive(Deserialize)]
struct QuestionsBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
    question: Option<String>,
    answer: Option<String>,
    difficulty: Option<LooseInt>,
    category: Option<LooseInt>,
}

/// A number as the web client sends it: a JSON integer, a numeric string, or
/// something else entirely. Anything that is not an integer is refused at
/// insert time, like any other value the store cannot take.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseInt {
    Int(i64),
    Other(serde_json::Value),
}

impl LooseInt {
    fn into_int(self) -> Result<i64, String> {
        match self {
            LooseInt::Int(n) => Ok(n),
            LooseInt::Other(serde_json::Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| format!("{s:?} is not an integer")),
            LooseInt::Other(other) => Err(format!("{other} is not an integer")),
        }
    }
}

fn loose_int(value: Option<LooseInt>) -> ApiResult<Option<i64>> {
    value
        .map(LooseInt::into_int)
        .transpose()
        .or_api(ApiError::Unprocessable)
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<QuestionRecord>,
    #[serde(rename = "totalQuestions")]
    total_questions: i64,
    categories: CategoryMap,
    // category of the first question on this page
    #[serde(rename = "currentCategory")]
    current_category: String,
}

#[derive(Serialize)]
struct Created {
    success: bool,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    question_id: i64,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<QuestionsPage>> {
    let all = format_questions(get_all_questions(&pool).await.or_api(ApiError::BadRequest)?);
    let page = paginate(&all, params.page);
    let Some(first) = page.first() else {
        tracing::debug!(page = params.page, total = all.len(), "Page is out of range");
        return Err(ApiError::NotFound);
    };

    let categories = load_categories(&pool, ApiError::BadRequest).await?;
    let current_category = category_name(&categories, first.category, ApiError::BadRequest)?;

    Ok(Json(QuestionsPage {
        success: true,
        questions: page.to_vec(),
        total_questions: all.len() as i64,
        categories,
        current_category,
    }))
}

async fn create_or_search(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuestionsBody>,
) -> ApiResult<Response> {
    match body {
        QuestionsBody {
            search_term: Some(term),
            ..
        } => search(&pool, &term).await.map(IntoResponse::into_response),
        QuestionsBody {
            search_term: None,
            question: Some(question),
            answer,
            difficulty,
            category,
        } => {
            let new = NewQuestion {
                question: Some(question),
                answer,
                difficulty: loose_int(difficulty)?,
                category: loose_int(category)?,
            };
            create(&pool, &new).await.map(IntoResponse::into_response)
        }
        _ => {
            tracing::debug!("Neither a search term nor a question was supplied");
            Err(ApiError::BadRequest)
        }
    }
}

async fn create(pool: &SqlitePool, new: &NewQuestion) -> ApiResult<Json<Created>> {
    let id = questions::create_question(pool, new)
        .await
        .or_api(ApiError::Unprocessable)?;
    tracing::info!(question_id = id, "Created question");
    Ok(Json(Created { success: true }))
}

async fn search(pool: &SqlitePool, term: &str) -> ApiResult<Json<QuestionList>> {
    let found = format_questions(
        search_questions(pool, term)
            .await
            .or_api(ApiError::Unprocessable)?,
    );
    let Some(first) = found.first() else {
        tracing::debug!(term, "Search found nothing");
        return Err(ApiError::NotFound);
    };

    let categories = load_categories(pool, ApiError::Unprocessable).await?;
    let current_category = category_name(&categories, first.category, ApiError::Unprocessable)?;
    let total_questions = count_questions(pool).await.or_api(ApiError::Unprocessable)?;

    Ok(Json(QuestionList {
        success: true,
        questions: found,
        total_questions,
        current_category,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(question_id): ApiPath<i64>,
) -> ApiResult<Json<Deleted>> {
    if get_question(&pool, question_id)
        .await
        .or_api(ApiError::Unprocessable)?
        .is_none()
    {
        tracing::debug!(question_id, "No question to delete");
        return Err(ApiError::NotFound);
    }

    let deleted = questions::delete_question(&pool, question_id)
        .await
        .or_api(ApiError::Unprocessable)?;
    // someone else got there between the lookup and the delete
    if deleted == 0 {
        return Err(ApiError::NotFound);
    }
    tracing::info!(question_id, "Deleted question");

    Ok(Json(Deleted {
        success: true,
        question_id,
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(get_questions).post(create_or_search))
        .route("/questions/{id}", delete(delete_question))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_term_wins_over_question_fields() {
        let body: QuestionsBody = serde_json::from_str(
            r#"{"searchTerm": "title", "question": "q", "answer": "a", "difficulty": 1, "category": 1}"#,
        )
        .unwrap();
        assert_eq!(body.search_term.as_deref(), Some("title"));
    }

    #[test]
    fn numeric_fields_accept_strings_and_nulls() {
        let body: QuestionsBody = serde_json::from_str(
            r#"{"question": "q", "answer": "a", "difficulty": "3", "category": null}"#,
        )
        .unwrap();
        assert_eq!(loose_int(body.difficulty), Ok(Some(3)));
        assert_eq!(loose_int(body.category), Ok(None));
    }

    #[test]
    fn non_numeric_fields_parse_but_do_not_convert() {
        let body: QuestionsBody = serde_json::from_str(
            r#"{"question": "q", "answer": "a", "difficulty": "hard", "category": 2.5}"#,
        )
        .unwrap();
        assert_eq!(loose_int(body.difficulty), Err(ApiError::Unprocessable));
        assert_eq!(loose_int(body.category), Err(ApiError::Unprocessable));
    }

    #[test]
    fn empty_object_parses_to_nothing() {
        let body: QuestionsBody = serde_json::from_str("{}").unwrap();
        assert!(body.search_term.is_none());
        assert!(body.question.is_none());
    }
}
