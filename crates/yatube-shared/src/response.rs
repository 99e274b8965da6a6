//! Response envelopes: rendered views and RFC 7807 errors.

use serde::{Deserialize, Serialize};

/// A named template together with the context it is rendered with.
///
/// Turning this into HTML is left to whatever sits in front of the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateResponse<C> {
    pub template: String,
    pub context: C,
}

impl<C> TemplateResponse<C> {
    pub fn new(template: impl Into<String>, context: C) -> Self {
        Self {
            template: template.into(),
            context,
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    pub fn forbidden() -> Self {
        Self::new(403, "Forbidden")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::not_found("Group test-slug")).unwrap();
        assert_eq!(body["type"], "about:blank");
        assert_eq!(body["status"], 404);
        assert_eq!(body["detail"], "Group test-slug");

        let bare = serde_json::to_value(ErrorResponse::unauthorized()).unwrap();
        assert!(bare.get("detail").is_none());
    }

    #[test]
    fn test_template_response_shape() {
        let body = serde_json::to_value(TemplateResponse::new(
            "posts/index.html",
            serde_json::json!({ "total_item_count": 3 }),
        ))
        .unwrap();
        assert_eq!(body["template"], "posts/index.html");
        assert_eq!(body["context"]["total_item_count"], 3);
    }
}
