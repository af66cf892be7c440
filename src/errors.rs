use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::HourOutOfRange { .. } => Self::bad_request(err.to_string()),
            ScheduleError::Encode(_) => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Failures of the schedule core. Malformed stored data is not one of them:
/// it is reported as an empty default by the storage adapter.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("hour {hour} is outside the schedule ({start}-{end})")]
    HourOutOfRange { hour: u8, start: u8, end: u8 },
    #[error("failed to encode schedule: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid hour range {start}-{end}: expected start <= end <= 23")]
    InvalidHourRange { start: u8, end: u8 },
    #[error("{name} must be {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("storage prefix must not be empty")]
    EmptyPrefix,
}
