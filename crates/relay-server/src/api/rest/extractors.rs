//! Custom extractors
//!
//! JSON body extractor that reports parse failures through the route's
//! standard failure response.

use crate::error::{Route, ServerError};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use tracing::warn;

/// JSON extractor whose rejection is a [`ServerError::InvalidRequest`]
pub struct JsonExtractor<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let route = Route::from_path(req.uri().path());

        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => {
                let message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        format!("Invalid JSON data: {}", err.body_text())
                    }
                    JsonRejection::JsonSyntaxError(err) => {
                        format!("JSON syntax error: {}", err.body_text())
                    }
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing 'Content-Type: application/json' header".to_string()
                    }
                    _ => format!("Failed to parse JSON: {}", rejection.body_text()),
                };

                warn!(
                    route = route.map(Route::path).unwrap_or("unknown"),
                    %message,
                    "Rejected request body"
                );

                Err(ServerError::InvalidRequest { route, message })
            }
        }
    }
}
