//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Error conversions work correctly

use axum::http::StatusCode;
use axum::response::IntoResponse;
use dashboard::prelude::*;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_invoice_not_found_returns_404() {
        let err = DashboardError::invoice_not_found("inv-9");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_error_returns_500() {
        let err = DashboardError::Storage(StorageError::FetchFailed {
            resource: "customers".to_string(),
            message: "timeout".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DashboardError::invoice_not_found("x").error_code(),
            "INVOICE_NOT_FOUND"
        );
        assert_eq!(
            DashboardError::from(StorageError::FetchFailed {
                resource: "invoices".to_string(),
                message: "x".to_string()
            })
            .error_code(),
            "STORAGE_ERROR"
        );
    }
}

// =============================================================================
// Error Response Format Tests
// =============================================================================

mod error_response_tests {
    use super::*;

    #[test]
    fn test_error_response_has_code_and_message() {
        let response = DashboardError::invoice_not_found("inv-9").to_response();

        assert_eq!(response.code, "INVOICE_NOT_FOUND");
        assert_eq!(response.message, "Invoice with id 'inv-9' not found");
    }

    #[test]
    fn test_not_found_details_carry_the_id() {
        let err = DashboardError::from(InvoiceError::NotFound {
            id: "inv-9".to_string(),
        });
        let details = err.to_response().details.expect("details expected");

        assert_eq!(details["id"], "inv-9");
    }

    #[test]
    fn test_storage_error_response_is_500() {
        let response = DashboardError::from(StorageError::FetchFailed {
            resource: "customers".to_string(),
            message: "timeout".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_sets_status() {
        let response = DashboardError::invoice_not_found("inv-9").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
