//! Wrappers around axum's extractors whose rejections render as [`ApiError`],
//! so a malformed body, path or query string gets the same JSON error body as
//! every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Query};
use axum::Json;

use super::error::ApiError;

#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
