use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, Error, HttpRequest,
};

use crate::core::AppError;

use super::request_id::RequestIdValue;

/// Render malformed JSON bodies in the standard error shape
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(
        request_id = ?RequestIdValue::of(req),
        path = %req.path(),
        error = %err,
        "Rejected JSON body"
    );

    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
        _ => format!("Invalid request body: {}", err),
    };

    AppError::validation(message).into()
}

/// Render malformed query strings in the standard error shape
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(
        request_id = ?RequestIdValue::of(req),
        path = %req.path(),
        error = %err,
        "Rejected query string"
    );
    AppError::validation(format!("Invalid query string: {}", err)).into()
}

/// JSON extractor config wired to [`json_error_handler`]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Query extractor config wired to [`query_error_handler`]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}
