use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    UnauthorizedAccess,
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                write!(f, "validation error: {}", join_field_errors(errors))
            }
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::UnauthorizedAccess => write!(f, "Unauthorized access"),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// The human-readable part that goes into the `error` field of a response.
    pub fn message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "Validation failed".to_string(),
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InternalError(msg) => msg.clone(),
            AppError::UnauthorizedAccess => "Missing or invalid credentials".to_string(),
        }
    }

    /// Maps a storage failure. Name collisions and bad names keep their own
    /// status; backend faults are logged and answered with `context` only.
    pub fn storage(context: &str, err: StoreError) -> Self {
        tracing::error!("{}: {}", context, err);
        match err {
            StoreError::AlreadyExists(_) | StoreError::InvalidName(_) => err.into(),
            _ => AppError::InternalError(context.to_string()),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": self.message(),
                    "details": errors
                })
            }
            _ => {
                serde_json::json!({"error": self.message()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UnauthorizedAccess => StatusCode::UNAUTHORIZED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(FieldError::from_validation(&errors))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(name) => {
                AppError::Conflict(format!("File {name} already exists"))
            }
            StoreError::InvalidName(name) => {
                AppError::BadRequest(format!("Invalid object name: {name}"))
            }
            _ => AppError::InternalError(err.to_string()),
        }
    }
}

/// Failures raised by the key-value and blob backends.
#[derive(Debug, Display)]
pub enum StoreError {
    #[display("Storage connection failed: {_0}")]
    Connection(String),

    #[display("Storage operation failed: {_0}")]
    Operation(String),

    #[display("Stored value is not valid JSON: {_0}")]
    Serialization(String),

    #[display("Object already exists: {_0}")]
    AlreadyExists(String),

    #[display("Invalid object name: {_0}")]
    InvalidName(String),

    #[display("IO error: {_0}")]
    Io(String),
}

impl std::error::Error for StoreError {}

impl From<deadpool_redis::PoolError> for StoreError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        StoreError::Connection(err.to_string())
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Operation(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// Failures while issuing or checking signed image URLs.
#[derive(Debug, Display)]
pub enum SignatureError {
    #[display("Signature creation failed: {_0}")]
    Creation(String),

    #[display("Signature expired")]
    Expired,

    #[display("Invalid signature")]
    Invalid,
}

impl std::error::Error for SignatureError {}

impl From<jsonwebtoken::errors::Error> for SignatureError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => SignatureError::Expired,
            _ => SignatureError::Invalid,
        }
    }
}

impl From<SignatureError> for AppError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::Creation(msg) => AppError::InternalError(msg),
            _ => AppError::UnauthorizedAccess,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn from_validation(errors: &ValidationErrors) -> Vec<FieldError> {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        field_errors.sort_by(|a, b| a.field.cmp(&b.field));
        field_errors
    }
}

pub fn join_field_errors(errors: &[FieldError]) -> String {
    errors.iter()
        .map(|e| format!("{}:{}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failures seen by the HTTP client talking to the catalog service.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ClientError {
    /// The service answered 404: the record is not there.
    #[display("{_0}")]
    NotFound(String),

    #[display("{message}")]
    Api { status: u16, message: String },

    #[display("Request failed: {_0}")]
    Transport(String),

    #[display("Unexpected response: {_0}")]
    Decode(String),

    /// Rejected locally before any request was made.
    #[display("{_0}")]
    InvalidInput(String),
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Failures of a catalog mutation as reported to the admin screens.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerError {
    Validation(Vec<FieldError>),
    Api(ClientError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Validation(errors) => {
                write!(f, "validation error: {}", join_field_errors(errors))
            }
            ControllerError::Api(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ControllerError {}

impl From<ValidationErrors> for ControllerError {
    fn from(errors: ValidationErrors) -> Self {
        ControllerError::Validation(FieldError::from_validation(&errors))
    }
}

impl From<ClientError> for ControllerError {
    fn from(err: ClientError) -> Self {
        ControllerError::Api(err)
    }
}
