use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Uniform response envelope returned by every endpoint.
///
/// Clients decide success by `status`, never by `data` presence: many
/// successful operations (signup, login, deletes) carry no payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseDto<T> {
    pub status: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ResponseDto<T> {
    pub fn success(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::success(StatusCode::OK, message, Some(data))
    }

    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self::success(StatusCode::OK, message, None)
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_success_serializes_with_null_data() {
        let dto = ResponseDto::<()>::ok_empty("signup success");
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["status"], 200);
        assert_eq!(json["message"], "signup success");
        assert!(json["data"].is_null());
    }

    #[test]
    fn success_carries_payload() {
        let dto = ResponseDto::ok("found", 42);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn error_has_matching_status() {
        let dto = ResponseDto::<()>::error(StatusCode::CONFLICT, "nickname is already in use");
        assert_eq!(dto.status, 409);
        assert!(dto.data.is_none());
    }
}
