//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent `{"error": <message>}`
//! JSON responses and status codes. Unauthenticated callers are redirected
//! to the login entry point instead of receiving a JSON body.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode};

use super::schemas::ErrorBody;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::ForbiddenOperation => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidToken => StatusCode::UNAUTHORIZED,
        ErrorCode::Unauthenticated => StatusCode::SEE_OTHER,
        ErrorCode::NotAuthorized | ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::Unauthenticated {
            let location = self.location().unwrap_or("/login").to_owned();
            return HttpResponse::SeeOther()
                .insert_header((header::LOCATION, location))
                .finish();
        }

        if self.code() == ErrorCode::InternalError {
            error!(message = %self.message(), "request failed unexpectedly");
        }

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.message().to_owned(),
        })
    }
}
