use rocket::http::Status;
use rocket::response::{Redirect, Responder};
use rocket::{Request, Response};
use std::io::Cursor;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error")]
    Db {
        message: String,
        #[source]
        source: sqlx::error::Error,
    },
    /// The session cookie is present but fails decryption or authentication.
    #[error("Internal server error")]
    InvalidSession,
    #[error("Internal server error")]
    SessionEncoding {
        #[source]
        source: serde_json::Error,
    },
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Username {0} is already taken")]
    UsernameTaken(String),
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AppError {
    pub fn db(message: impl Into<String>, source: sqlx::error::Error) -> Self {
        Self::Db {
            message: message.into(),
            source,
        }
    }
}

impl From<&AppError> for Status {
    fn from(e: &AppError) -> Self {
        match e {
            AppError::Db { .. } => Status::InternalServerError,
            AppError::InvalidSession => Status::InternalServerError,
            AppError::SessionEncoding { .. } => Status::InternalServerError,
            AppError::Unauthenticated => Status::SeeOther,
            AppError::UsernameTaken(_) => Status::Conflict,
            AppError::ValidationError(_) => Status::BadRequest,
            AppError::ConfigurationError(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &Request<'_>) -> rocket::response::Result<'static> {
        if matches!(self, AppError::Unauthenticated) {
            return Redirect::to("/").respond_to(req);
        }

        let method = req.method();
        let uri = req.uri();

        let request_id = req
            .local_cache(|| None::<crate::middleware::RequestId>)
            .as_ref()
            .map(|r| r.0.as_str())
            .unwrap_or("unknown");

        let user_id = req
            .local_cache(|| None::<crate::auth::CurrentUser>)
            .as_ref()
            .map(|u| u.id.to_string())
            .unwrap_or_else(|| "anonymous".to_string());

        error!(
            error = ?self,
            request_id = %request_id,
            user_id = %user_id,
            method = %method,
            uri = %uri,
            "request failed"
        );

        let status = Status::from(&self);
        let body = self.to_string();

        Response::build().status(status).sized_body(body.len(), Cursor::new(body)).ok()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::SessionEncoding { source: e }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::db("Database error", e)
    }
}
