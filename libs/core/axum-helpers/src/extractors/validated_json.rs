//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::body::HttpBody;
use axum::extract::{FromRequest, Json, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Deserialization failures (wrong types, unknown fields when the target uses
/// `deny_unknown_fields`, malformed JSON) become `JSON_EXTRACTION` errors.
/// Failed `Validate` rules become `VALIDATION_ERROR` with per-field details.
/// An empty body sent without a content type is a `BAD_REQUEST`, since every
/// field is missing; a non-empty body without one keeps axum's 415.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Restock {
///     #[validate(range(min = 0))]
///     stock: i32,
/// }
///
/// async fn restock(ValidatedJson(payload): ValidatedJson<Restock>) -> String {
///     format!("stock: {}", payload.stock)
/// }
///
/// let app = Router::new().route("/restock", post(restock));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let empty_body = req.body().size_hint().exact() == Some(0);
        if empty_body && !req.headers().contains_key(CONTENT_TYPE) {
            return Err(AppError::BadRequest("Request body is required".to_string()));
        }

        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
