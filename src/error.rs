use rocket::response::{Responder, Response};
use rocket::{
    http::{ContentType, Status},
    response,
    serde::json::Json,
    Request,
};
use serde::Serialize;

use crate::service::ServiceError;
use crate::store::models::FieldConfig;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldConfig>>,
}

impl ApiError {
    pub(crate) fn new(err: impl Into<String>) -> ApiError {
        ApiError {
            error: err.into(),
            current_version: None,
            fields: None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ErrorResponse<T = ApiError> {
    json: Json<T>,
    status: Status,
}

impl ErrorResponse<ApiError> {
    pub(crate) fn new(status: Status, err: impl Into<String>) -> ErrorResponse<ApiError> {
        ErrorResponse {
            json: Json(ApiError::new(err)),
            status,
        }
    }
}

impl From<ServiceError> for ErrorResponse<ApiError> {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => ErrorResponse::new(Status { code: 404 }, msg),
            ServiceError::Forbidden(msg) => ErrorResponse::new(Status { code: 403 }, msg),
            ServiceError::VersionConflict {
                current_version,
                fields,
            } => ErrorResponse {
                json: Json(ApiError {
                    error: "Version conflict".to_string(),
                    current_version: Some(current_version),
                    fields: Some(fields),
                }),
                status: Status { code: 409 },
            },
            ServiceError::Conflict(msg) => ErrorResponse::new(Status { code: 409 }, msg),
            ServiceError::Validation(msg) => ErrorResponse::new(Status { code: 400 }, msg),
            ServiceError::Database(err) => {
                log::error!("database failure: {}", err);
                ErrorResponse::new(Status { code: 500 }, "Server error")
            }
        }
    }
}

impl<'r, T: serde::Serialize> Responder<'r, 'r> for ErrorResponse<T> {
    fn respond_to(self, req: &'r Request) -> response::Result<'r> {
        Response::build_from(self.json.respond_to(req)?)
            .status(self.status)
            .header(ContentType::JSON)
            .ok()
    }
}

#[catch(400)]
pub(crate) fn bad_request() -> Json<ApiError> {
    Json(ApiError::new("Malformed request"))
}

/// Message a failing request guard leaves for the catcher to report.
pub(crate) struct GuardMessage(pub(crate) &'static str);

#[catch(401)]
pub(crate) fn unauthorized(req: &Request) -> Json<ApiError> {
    Json(ApiError::new(req.local_cache(|| GuardMessage("Login required")).0))
}

#[catch(403)]
pub(crate) fn forbidden(req: &Request) -> Json<ApiError> {
    Json(ApiError::new(req.local_cache(|| GuardMessage("Forbidden")).0))
}

#[catch(404)]
pub(crate) fn not_found() -> Json<ApiError> {
    Json(ApiError::new("Not found"))
}

#[catch(422)]
pub(crate) fn unprocessable() -> Json<ApiError> {
    Json(ApiError::new("Invalid request body"))
}

#[catch(500)]
pub(crate) fn internal_error() -> Json<ApiError> {
    Json(ApiError::new("Server error"))
}
