use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Uniform error mapping, `{"error": true, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            error: true,
            message: message.into(),
        }
    }
}

impl From<ClientError> for ErrorResponse {
    fn from(err: ClientError) -> Self {
        err.to_error_response()
    }
}

impl From<&ClientError> for ErrorResponse {
    fn from(err: &ClientError) -> Self {
        err.to_error_response()
    }
}

/// Payload for creating or updating an organization user.
///
/// Unset fields are left out of the JSON body, so a partial update only
/// sends what changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn role<S: Into<String>>(mut self, role: S) -> Self {
        self.role = Some(role.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_shape() {
        let value = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(value, json!({ "error": true, "message": "boom" }));
    }

    #[test]
    fn test_invalid_id_message() {
        let err = ClientError::InvalidId {
            id: "abc".to_string(),
        };
        let response = ErrorResponse::from(err);
        assert!(response.error);
        assert_eq!(response.message, "invalid id");
    }

    #[test]
    fn test_http_error_uses_raw_body() {
        let err = ClientError::Http {
            status: 404,
            body: "{\"detail\":\"not found\"}".to_string(),
        };
        assert_eq!(err.message(), "{\"detail\":\"not found\"}");
        assert_eq!(err.to_string(), "HTTP 404: {\"detail\":\"not found\"}");

        let empty = ClientError::Http {
            status: 500,
            body: String::new(),
        };
        assert_eq!(empty.to_error_response().message, "");
    }

    #[test]
    fn test_user_data_skips_unset_fields() {
        let full = UserData::new()
            .name("John Doe")
            .email("john.doe@example.com")
            .role("admin");
        assert_eq!(
            serde_json::to_value(&full).unwrap(),
            json!({
                "name": "John Doe",
                "email": "john.doe@example.com",
                "role": "admin"
            })
        );

        let partial = UserData::new().role("user");
        assert_eq!(
            serde_json::to_value(&partial).unwrap(),
            json!({ "role": "user" })
        );
    }
}
