//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Error conversions work correctly
//! - Error matching allows callers to handle specific cases

use axum::http::StatusCode;
use axum::response::IntoResponse;
use library_web::core::{ConfigError, RequestError, ValidationError};
use library_web::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;
use validator::Validate;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_not_found_returns_404() {
        let err = LibraryError::Backend(BackendError::not_found("Book", "b-1"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_returns_409() {
        let err = LibraryError::Backend(BackendError::Conflict {
            message: "Book has active loans".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_rejected_returns_400() {
        let err = LibraryError::Backend(BackendError::Rejected {
            message: "Maximum number of extensions (3) exceeded".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_transport_and_payload_failures_return_502() {
        for err in [
            BackendError::Transport {
                message: "connection refused".to_string(),
            },
            BackendError::UnrecognizedShape {
                message: "got a string".to_string(),
            },
            BackendError::Decode {
                message: "missing field `title`".to_string(),
            },
        ] {
            assert_eq!(LibraryError::Backend(err).status_code(), StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn test_backend_status_is_passed_through() {
        let err = LibraryError::Backend(BackendError::Status {
            status: 503,
            message: "maintenance".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_client_side_errors_return_400() {
        let criterion = LibraryError::Criterion(CriterionError::ZeroPageSize);
        let request = LibraryError::Request(RequestError::MissingParameter {
            name: "userId".to_string(),
        });
        assert_eq!(criterion.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(request.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_config_and_internal_errors_return_500() {
        let config = LibraryError::Config(ConfigError::FileNotFound {
            path: "library.yaml".to_string(),
        });
        let internal = LibraryError::Internal("lock poisoned".to_string());
        assert_eq!(config.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_backend_error_codes() {
        assert_eq!(BackendError::not_found("Loan", "l-1").error_code(), "NOT_FOUND");
        assert_eq!(
            BackendError::Conflict {
                message: "x".to_string()
            }
            .error_code(),
            "CONFLICT"
        );
        assert_eq!(
            BackendError::Transport {
                message: "x".to_string()
            }
            .error_code(),
            "BACKEND_UNREACHABLE"
        );
        assert_eq!(
            BackendError::UnrecognizedShape {
                message: "x".to_string()
            }
            .error_code(),
            "UNRECOGNIZED_PAYLOAD"
        );
    }

    #[test]
    fn test_request_error_codes() {
        assert_eq!(
            RequestError::MissingParameter {
                name: "userId".to_string()
            }
            .error_code(),
            "MISSING_PARAMETER"
        );
        assert_eq!(
            RequestError::InvalidParameter {
                name: "size".to_string(),
                message: "zero".to_string()
            }
            .error_code(),
            "INVALID_PARAMETER"
        );
    }

    #[test]
    fn test_criterion_error_code() {
        let err: LibraryError = CriterionError::UnknownSortField("isbn".to_string()).into();
        assert_eq!(err.error_code(), "INVALID_CRITERION");
    }
}

// =============================================================================
// Error Response Format Tests
// =============================================================================

mod error_response_tests {
    use super::*;

    #[test]
    fn test_error_response_has_code_and_message() {
        let err = LibraryError::Backend(BackendError::not_found("Book", "b-7"));

        let response = err.to_response();

        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.error.contains("Book"));
        assert!(response.error.contains("not found"));
    }

    #[test]
    fn test_error_response_includes_details_for_not_found() {
        let err = LibraryError::Backend(BackendError::not_found("Reservation", "r-9"));

        let details = err.to_response().details.unwrap();
        assert_eq!(details["resource"], "Reservation");
        assert_eq!(details["id"], "r-9");
    }

    #[test]
    fn test_validation_errors_include_field_details() {
        let mut fields = BTreeMap::new();
        fields.insert("isbn".to_string(), vec!["not a valid ISBN".to_string()]);
        fields.insert("title".to_string(), vec!["title is required".to_string()]);
        let err = LibraryError::Validation(ValidationError::FieldErrors(fields));

        let response = err.to_response();

        let details = response.details.unwrap();
        let fields = details["fields"].as_object().unwrap();
        assert_eq!(fields.len(), 2);
        assert!(response.error.contains("isbn, title"));
    }

    #[test]
    fn test_simple_errors_have_no_details() {
        let err = LibraryError::Backend(BackendError::Conflict {
            message: "Username already exists".to_string(),
        });
        assert!(err.to_response().details.is_none());
    }
}

// =============================================================================
// Error Conversion Tests
// =============================================================================

mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_backend_error_converts_to_library_error() {
        let err: LibraryError = BackendError::not_found("User", "u-1").into();
        assert!(matches!(err, LibraryError::Backend(BackendError::NotFound { .. })));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validator_errors_convert_to_field_errors() {
        let request = BookCreateRequest {
            title: String::new(),
            author: "Someone".to_string(),
            isbn: "0-306-40615-2".to_string(),
            published_date: "2020-13-45".to_string(),
            category: "History".to_string(),
            copies_available: -1,
            description: None,
        };

        let err: LibraryError = request.validate().unwrap_err().into();

        match err {
            LibraryError::Validation(ValidationError::FieldErrors(fields)) => {
                let names: Vec<&str> = fields.keys().map(String::as_str).collect();
                assert_eq!(names, vec!["copies_available", "published_date", "title"]);
                assert_eq!(fields["title"], vec!["title is required"]);
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }
}

// =============================================================================
// Error Pattern Matching Tests
// =============================================================================

mod error_matching_tests {
    use super::*;

    fn describe(err: &BackendError) -> &'static str {
        match err {
            BackendError::NotFound { .. } => "gone",
            BackendError::Conflict { message } if message.contains("loans") => "on loan",
            BackendError::Conflict { .. } => "conflict",
            BackendError::Transport { .. } => "offline",
            _ => "other",
        }
    }

    #[test]
    fn test_can_match_specific_backend_errors() {
        assert_eq!(describe(&BackendError::not_found("Book", "b-1")), "gone");
        assert_eq!(
            describe(&BackendError::Conflict {
                message: "Book has active loans".to_string()
            }),
            "on loan"
        );
        assert_eq!(
            describe(&BackendError::Conflict {
                message: "Book has active reservations".to_string()
            }),
            "conflict"
        );
        assert_eq!(
            describe(&BackendError::Decode {
                message: "bad".to_string()
            }),
            "other"
        );
    }
}

// =============================================================================
// IntoResponse Tests
// =============================================================================

mod into_response_tests {
    use super::*;

    async fn body_of(err: LibraryError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_library_error_into_response() {
        let (status, body) = body_of(LibraryError::Request(RequestError::MissingParameter {
            name: "userId".to_string(),
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_PARAMETER");
        assert_eq!(body["error"], "Missing required parameter: userId");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_transport_error_into_response() {
        let (status, body) = body_of(LibraryError::Backend(BackendError::Transport {
            message: "connection refused".to_string(),
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "BACKEND_UNREACHABLE");
    }
}
