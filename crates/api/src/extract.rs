//! Request extractors whose rejections render as [`AppError`] bodies.
//!
//! Drop-in replacements for axum's `Json`, `Query` and `Path` so a malformed
//! body, query string or path segment answers with the usual
//! `{"error": ..., "code": "VALIDATION_ERROR"}` instead of plain text.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
