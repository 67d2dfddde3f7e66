use std::fmt;

use actix_web::{HttpResponse, http::StatusCode};
use leaderboard_lib::{error::LeaderboardError, validation::ValidationError};
use tracing_actix_web::RequestId;

/// The message sent instead of the real one for the internal server errors.
const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(thiserror::Error, Debug)]
#[repr(i32)] // i32 to be used with clients that don't support unsigned integers
#[rustfmt::skip]
pub enum ApiErrorKind {
    // Caution: when creating a new error, you must ensure its code isn't
    // in conflict with the ones mapped from `leaderboard_lib::error::LeaderboardError`.

    // --------
    // --- Internal server errors
    // --------

    // ...Errors from leaderboard_lib

    #[error("unable to access the session: {0}")]
    Session(String) = 102,

    // --------
    // --- Authentication errors
    // --------

    #[error("wrong password")]
    WrongPassword = 201,

    // ...Error from leaderboard_lib

    // --------
    // --- Logical errors
    // --------

    #[error("not found")]
    EndpointNotFound = 301,

    // ...Errors from leaderboard_lib

    /// The query string or the form of the request couldn't be read.
    #[error("invalid request: {0}")]
    InvalidRequest(String) = 308,

    #[error(transparent)]
    Lib(#[from] LeaderboardError),
}

impl ApiErrorKind {
    pub fn get_err_type_and_status_code(&self) -> (i32, StatusCode) {
        use ApiErrorKind as E;
        use LeaderboardError as LE;
        use StatusCode as S;
        use ValidationError as VE;

        match self {
            E::Lib(LE::DbError(_)) => (101, S::INTERNAL_SERVER_ERROR),
            E::Session(_) => (102, S::INTERNAL_SERVER_ERROR),

            E::WrongPassword => (201, S::UNAUTHORIZED),
            E::Lib(LE::Forbidden(_)) => (202, S::FORBIDDEN),

            E::EndpointNotFound => (301, S::NOT_FOUND),
            E::Lib(LE::Validation(VE::EmptyNickname)) => (302, S::BAD_REQUEST),
            E::Lib(LE::Validation(VE::NicknameTooLong(_))) => (303, S::BAD_REQUEST),
            E::Lib(LE::Validation(VE::NotANumber(_, _))) => (304, S::BAD_REQUEST),
            E::Lib(LE::Validation(VE::Negative(_))) => (305, S::BAD_REQUEST),
            E::Lib(LE::Validation(VE::TooLarge(_))) => (306, S::BAD_REQUEST),
            E::Lib(LE::Validation(VE::WinsExceedGames { .. })) => (307, S::BAD_REQUEST),
            E::InvalidRequest(_) => (308, S::BAD_REQUEST),
        }
    }

    /// Returns true if the error must not be exposed to the client.
    pub fn is_internal(&self) -> bool {
        let (r#type, status_code) = self.get_err_type_and_status_code();
        (100..200).contains(&r#type) || status_code.is_server_error()
    }
}

impl From<sea_orm::DbErr> for ApiErrorKind {
    fn from(value: sea_orm::DbErr) -> Self {
        Self::Lib(value.into())
    }
}

impl From<ValidationError> for ApiErrorKind {
    fn from(value: ValidationError) -> Self {
        Self::Lib(value.into())
    }
}

/// An [`ApiErrorKind`] bound to the request that raised it.
#[derive(Debug)]
pub struct ApiError {
    pub request_id: RequestId,
    pub kind: ApiErrorKind,
}

impl fmt::Display for ApiError {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub r#type: i32,
    pub message: String,
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.kind.get_err_type_and_status_code().1
    }

    fn error_response(&self) -> HttpResponse {
        let (r#type, status_code) = self.kind.get_err_type_and_status_code();

        let message = if self.kind.is_internal() {
            tracing::error!(
                request_id = %self.request_id,
                error_type = r#type,
                "Internal error: {}",
                self.kind,
            );
            INTERNAL_ERROR_MESSAGE.to_owned()
        } else {
            self.kind.to_string()
        };

        HttpResponse::build(status_code).json(ErrorResponse {
            request_id: self.request_id.to_string(),
            r#type,
            message,
        })
    }
}

pub type ApiResult<T> = Result<T, ApiErrorKind>;

/// The type returned by the route handlers.
pub type ApiResponse<T> = Result<T, ApiError>;

/// Attaches the ID of the current request to an error.
pub trait FitRequestId<T> {
    fn fit(self, request_id: RequestId) -> ApiResponse<T>;
}

impl<T, E> FitRequestId<T> for Result<T, E>
where
    ApiErrorKind: From<E>,
{
    fn fit(self, request_id: RequestId) -> ApiResponse<T> {
        self.map_err(|e| ApiError {
            request_id,
            kind: e.into(),
        })
    }
}

/// Converts a `Result<T, E>` in which `E` is convertible to [`LeaderboardError`]
/// into an [`ApiResult<T>`].
pub trait ApiResultExt<T> {
    fn with_api_err(self) -> ApiResult<T>;
}

impl<T, E> ApiResultExt<T> for Result<T, E>
where
    LeaderboardError: From<E>,
{
    fn with_api_err(self) -> ApiResult<T> {
        self.map_err(LeaderboardError::from).map_err(Into::into)
    }
}
