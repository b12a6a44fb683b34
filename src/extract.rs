use axum::extract::FromRequest;

use crate::error::Error;

/// JSON body extractor whose rejections render as `{"error": ...}` with a
/// 400 status instead of axum's plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);
