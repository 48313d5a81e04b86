use thiserror::Error;

use crate::model::ValidationError;
use crate::providers::ProviderError;

pub const MESSAGE_EMPTY_INPUT: &str = "Please enter a city name.";
pub const MESSAGE_NOT_FOUND: &str = "City not found. Check spelling and try again.";
pub const MESSAGE_GEOCODING_FAILED: &str = "Network error. Please try again later.";
pub const MESSAGE_UNAVAILABLE: &str = "Weather data unavailable for this location.";
pub const MESSAGE_FORECAST_FAILED: &str = "Failed to load weather data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Geocoding,
    Forecast,
}

impl Upstream {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Geocoding => "geocoding",
            Self::Forecast => "forecast",
        }
    }
}

/// Outcome of a failed lookup; each variant maps to one inline message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("query must not be empty")]
    EmptyInput,
    #[error("no location matches '{0}'")]
    NotFound(String),
    #[error("forecast response has no current conditions")]
    Unavailable,
    #[error("{} request failed: {source}", upstream.as_str())]
    Transport {
        upstream: Upstream,
        #[source]
        source: ProviderError,
    },
}

impl LookupError {
    pub fn transport(upstream: Upstream, source: ProviderError) -> Self {
        Self::Transport { upstream, source }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyInput => MESSAGE_EMPTY_INPUT,
            Self::NotFound(_) => MESSAGE_NOT_FOUND,
            Self::Unavailable => MESSAGE_UNAVAILABLE,
            Self::Transport {
                upstream: Upstream::Geocoding,
                ..
            } => MESSAGE_GEOCODING_FAILED,
            Self::Transport {
                upstream: Upstream::Forecast,
                ..
            } => MESSAGE_FORECAST_FAILED,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput | Self::NotFound(_) => ErrorKind::User,
            Self::Unavailable | Self::Transport { .. } => ErrorKind::Runtime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    User,
    Runtime,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Runtime => "runtime",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn user(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::User,
            code,
            message: message.into(),
        }
    }

    pub fn runtime(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::User => 2,
            ErrorKind::Runtime => 1,
        }
    }
}

pub const ERROR_CODE_USER_INVALID_INPUT: &str = "user.invalid_input";
pub const ERROR_CODE_USER_OUTPUT_MODE_CONFLICT: &str = "user.output_mode_conflict";
pub const ERROR_CODE_USER_NOT_FOUND: &str = "user.not_found";
pub const ERROR_CODE_RUNTIME_UNAVAILABLE: &str = "runtime.weather_unavailable";
pub const ERROR_CODE_RUNTIME_TRANSPORT: &str = "runtime.transport_failed";
pub const ERROR_CODE_RUNTIME_PROVIDER_INIT: &str = "runtime.provider_init_failed";
pub const ERROR_CODE_RUNTIME_SERIALIZE: &str = "runtime.serialize_failed";
pub const ERROR_CODE_RUNTIME_IO: &str = "runtime.io_failed";

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::user(ERROR_CODE_USER_INVALID_INPUT, value.to_string())
    }
}

impl From<LookupError> for AppError {
    fn from(value: LookupError) -> Self {
        let code = match &value {
            LookupError::EmptyInput => ERROR_CODE_USER_INVALID_INPUT,
            LookupError::NotFound(_) => ERROR_CODE_USER_NOT_FOUND,
            LookupError::Unavailable => ERROR_CODE_RUNTIME_UNAVAILABLE,
            LookupError::Transport { .. } => ERROR_CODE_RUNTIME_TRANSPORT,
        };
        Self {
            kind: value.kind(),
            code,
            message: value.user_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_messages_match_inline_copy() {
        assert_eq!(
            LookupError::NotFound("Qzxv".to_string()).user_message(),
            "City not found. Check spelling and try again."
        );
        assert_eq!(
            LookupError::transport(
                Upstream::Geocoding,
                ProviderError::Transport("dns".to_string())
            )
            .user_message(),
            "Network error. Please try again later."
        );
        assert_eq!(
            LookupError::transport(
                Upstream::Forecast,
                ProviderError::InvalidResponse("eof".to_string())
            )
            .user_message(),
            "Failed to load weather data."
        );
        assert_eq!(
            LookupError::Unavailable.user_message(),
            "Weather data unavailable for this location."
        );
        assert_eq!(
            LookupError::EmptyInput.user_message(),
            "Please enter a city name."
        );
    }

    #[test]
    fn lookup_error_transport_display_names_upstream() {
        let error = LookupError::transport(
            Upstream::Forecast,
            ProviderError::Http {
                status: 503,
                message: "down".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "forecast request failed: http error (503): down"
        );
    }

    #[test]
    fn app_error_maps_lookup_kinds_to_exit_codes() {
        let not_found = AppError::from(LookupError::NotFound("x".to_string()));
        assert_eq!(not_found.kind, ErrorKind::User);
        assert_eq!(not_found.code, ERROR_CODE_USER_NOT_FOUND);
        assert_eq!(not_found.exit_code(), 2);

        let unavailable = AppError::from(LookupError::Unavailable);
        assert_eq!(unavailable.kind, ErrorKind::Runtime);
        assert_eq!(unavailable.code, ERROR_CODE_RUNTIME_UNAVAILABLE);
        assert_eq!(unavailable.exit_code(), 1);
    }

    #[test]
    fn app_error_from_validation_is_user_error() {
        let error = AppError::from(ValidationError::EmptyCity);
        assert_eq!(error.code, ERROR_CODE_USER_INVALID_INPUT);
        assert_eq!(error.message, "Please enter a city name.");
    }
}
