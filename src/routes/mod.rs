//! JSON API consumed by the single-page front end.
//!
//! Handlers stay thin: they extract the user and payload, call into
//! [`crate::services`] and translate the outcome into an HTTP response.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use serde_json::json;

use crate::services::{ServiceError, ServiceResult};

pub mod categories;
pub mod chat;
pub mod companies;
pub mod customers;
pub mod dashboard;
pub mod menu;
pub mod orders;
pub mod products;
pub mod settings;
pub mod tables;

/// Body returned for every failed request.
pub fn error_body(message: impl Into<String>) -> serde_json::Value {
    json!({ "error": message.into() })
}

/// Map a service failure to its HTTP status. `action` completes the log line
/// "Failed to ..." for unexpected errors.
pub fn service_error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(error_body("Insufficient permissions"))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(error_body("Not found")),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(error_body(message)),
        ServiceError::Conflict => {
            HttpResponse::Conflict().json(error_body("A record with this name already exists"))
        }
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().json(error_body("Internal server error"))
        }
    }
}

pub fn json_response<T: Serialize>(result: ServiceResult<T>, action: &str) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(err) => service_error_response(err, action),
    }
}

pub fn created_response<T: Serialize>(result: ServiceResult<T>, action: &str) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Created().json(value),
        Err(err) => service_error_response(err, action),
    }
}

pub fn no_content_response(result: ServiceResult<()>, action: &str) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err, action),
    }
}

/// JSON extractor settings that report malformed bodies in the API error format.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(1024 * 1024)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            let response = HttpResponse::BadRequest().json(error_body(err.to_string()));
            InternalError::from_response(err, response).into()
        })
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    use super::*;

    #[actix_web::test]
    async fn form_errors_are_bad_requests_with_message() {
        let response =
            service_error_response(ServiceError::Form("name is empty".to_string()), "save");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value["error"], "name is empty");
    }

    #[test]
    fn known_errors_map_to_statuses() {
        assert_eq!(
            service_error_response(ServiceError::Unauthorized, "x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            service_error_response(ServiceError::NotFound, "x").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            service_error_response(ServiceError::Conflict, "x").status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn successful_deletes_have_no_content() {
        assert_eq!(
            no_content_response(Ok(()), "delete").status(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(
            created_response(Ok(json!({ "id": 1 })), "create").status(),
            StatusCode::CREATED
        );
    }
}
