//! End-to-end tests of the `/api/v1` proxy over the in-memory backend

#![cfg(feature = "in-memory")]

use axum::http::StatusCode;
use axum_test::TestServer;
use library_web::core::model::User;
use library_web::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Fixtures
// =============================================================================

fn book(id: &str, title: &str, category: &str, copies: i32) -> Book {
    Book {
        book_id: id.to_string(),
        title: title.to_string(),
        author: format!("Author of {}", title),
        isbn: format!("isbn-{}", id),
        published_date: Some("2001-01-01".to_string()),
        category: Some(category.to_string()),
        copies_available: copies,
        description: None,
    }
}

fn create_backend() -> InMemoryBackend {
    let backend = InMemoryBackend::new();
    backend
        .seed_books((1..=25).map(|i| {
            let category = if i % 2 == 0 { "Fiction" } else { "Science" };
            let copies = if i == 25 { 0 } else { 2 };
            book(&format!("b-{}", i), &format!("Book {:02}", i), category, copies)
        }))
        .expect("seed books");
    backend
        .seed_users([User {
            user_id: "u-1".to_string(),
            username: "reader".to_string(),
            email: "reader@example.org".to_string(),
            full_name: "Reader".to_string(),
            ..User::default()
        }])
        .expect("seed users");
    backend
}

fn create_test_server() -> TestServer {
    let app = ServerBuilder::new()
        .with_backend(create_backend())
        .build()
        .expect("Failed to build app");
    TestServer::try_new(app).expect("Failed to create test server")
}

// =============================================================================
// Health Check Tests
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = create_test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "library-web");
    }

    #[tokio::test]
    async fn test_monitor_routes() {
        let server = create_test_server();

        let status: Value = server.get("/api/v1/monitor/status").await.json();
        assert_eq!(status["database"]["status"], "UP");

        let health: Value = server.get("/api/v1/monitor/health").await.json();
        assert_eq!(health["status"], "UP");
    }
}

// =============================================================================
// Book Listing Tests
// =============================================================================

mod book_listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_default_listing_is_an_envelope_of_twenty() {
        let server = create_test_server();

        let response = server.get("/api/v1/books").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["content"].as_array().unwrap().len(), 20);
        assert_eq!(body["totalElements"], 25);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["size"], 20);
        assert_eq!(body["number"], 0);
        assert_eq!(body["hasNext"], true);
    }

    #[tokio::test]
    async fn test_last_page_has_no_next() {
        let server = create_test_server();

        let body: Value = server
            .get("/api/v1/books")
            .add_query_param("page", 2)
            .add_query_param("size", 10)
            .await
            .json();
        assert_eq!(body["content"].as_array().unwrap().len(), 5);
        assert_eq!(body["hasNext"], false);
    }

    #[tokio::test]
    async fn test_array_format_returns_everything() {
        let server = create_test_server();

        let body: Vec<Book> = server
            .get("/api/v1/books")
            .add_query_param("format", "array")
            .await
            .json();
        assert_eq!(body.len(), 25);
    }

    #[tokio::test]
    async fn test_zero_size_is_a_bad_request() {
        let server = create_test_server();

        let response = server.get("/api/v1/books").add_query_param("size", 0).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_PARAMETER");
    }

    #[tokio::test]
    async fn test_category_and_reservable_books() {
        let server = create_test_server();

        let fiction: Vec<Book> = server.get("/api/v1/books/category/Fiction").await.json();
        assert_eq!(fiction.len(), 12);

        let reservable: Vec<Value> = server
            .get("/api/v1/books/available-for-reservation")
            .add_query_param("userId", "u-1")
            .await
            .json();
        assert_eq!(reservable.len(), 1);
        assert_eq!(reservable[0]["bookId"], "b-25");
        assert_eq!(reservable[0]["currentReservations"], 0);
    }

    #[tokio::test]
    async fn test_search_pages_server_side() {
        let server = create_test_server();

        let body: Value = server
            .get("/api/v1/search/books")
            .add_query_param("keyword", "book 1")
            .add_query_param("size", 5)
            .await
            .json();
        assert_eq!(body["totalElements"], 10);
        assert_eq!(body["books"].as_array().unwrap().len(), 5);
        assert_eq!(body["hasNext"], true);
    }
}

// =============================================================================
// Book Mutation Tests
// =============================================================================

mod book_mutation_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_book() {
        let server = create_test_server();

        let response = server
            .post("/api/v1/books")
            .json(&json!({
                "title": "Solaris",
                "author": "Stanisław Lem",
                "isbn": "978-0156027601",
                "publishedDate": "1961-01-01",
                "category": "Science",
                "copiesAvailable": 2
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["title"], "Solaris");
        assert!(body["bookId"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_create_book_with_invalid_fields_is_rejected() {
        let server = create_test_server();

        let response = server
            .post("/api/v1/books")
            .json(&json!({
                "title": "",
                "author": "Someone",
                "isbn": "not-an-isbn",
                "publishedDate": "yesterday",
                "category": "Science",
                "copiesAvailable": 1
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let fields = body["details"]["fields"].as_object().unwrap();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("isbn"));
        assert!(fields.contains_key("published_date"));
    }

    #[tokio::test]
    async fn test_mistyped_body_is_rejected() {
        let server = create_test_server();

        let response = server
            .post("/api/v1/books")
            .json(&json!({ "title": 5, "copiesAvailable": "many" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_PARAMETER");
    }

    #[tokio::test]
    async fn test_update_normalizes_published_date() {
        let server = create_test_server();

        let response = server
            .put("/api/v1/books/b-1")
            .json(&json!({ "publishedDate": "1999-12-31T23:59:59", "copiesAvailable": 7 }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["publishedDate"], "1999-12-31");
        assert_eq!(body["copiesAvailable"], 7);
        assert_eq!(body["title"], "Book 01");
    }

    #[tokio::test]
    async fn test_delete_book_then_not_found() {
        let server = create_test_server();

        server
            .delete("/api/v1/books/b-3")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let response = server.get("/api/v1/books/b-3").await;
        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["details"]["id"], "b-3");
    }

    #[tokio::test]
    async fn test_delete_book_on_loan_is_a_conflict() {
        let server = create_test_server();

        server
            .post("/api/v1/loans")
            .json(&json!({
                "userId": "u-1",
                "bookId": "b-4",
                "loanDate": "2024-01-01",
                "dueDate": "2024-01-31"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.delete("/api/v1/books/b-4").await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("active loans"));
    }
}

// =============================================================================
// Circulation Tests
// =============================================================================

mod circulation_tests {
    use super::*;

    async fn borrow(server: &TestServer, book_id: &str) -> Value {
        let response = server
            .post("/api/v1/loans")
            .json(&json!({
                "userId": "u-1",
                "bookId": book_id,
                "loanDate": "2024-01-01",
                "dueDate": "2024-01-31"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    #[tokio::test]
    async fn test_list_loans_requires_user_id() {
        let server = create_test_server();

        let response = server.get("/api/v1/loans").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "MISSING_PARAMETER");
    }

    #[tokio::test]
    async fn test_loan_lifecycle() {
        let server = create_test_server();
        let loan = borrow(&server, "b-1").await;
        let loan_id = loan["loanId"].as_str().unwrap();
        assert_eq!(loan["status"], "LOANED");

        let loans: Vec<Value> = server
            .get("/api/v1/loans")
            .add_query_param("userId", "u-1")
            .await
            .json();
        assert_eq!(loans.len(), 1);

        let extended: Value = server
            .post(&format!("/api/v1/loans/{}/extend", loan_id))
            .json(&json!({ "days": 7 }))
            .await
            .json();
        assert_eq!(extended["dueDate"], "2024-02-07");

        let extended: Value = server
            .post(&format!("/api/v1/loans/{}/extend/default", loan_id))
            .await
            .json();
        assert_eq!(extended["dueDate"], "2024-02-21");
        assert_eq!(extended["extensionCount"], 2);

        let returned: Value = server
            .post(&format!("/api/v1/loans/{}/return", loan_id))
            .json(&json!({ "returnDate": "2024-02-10" }))
            .await
            .json();
        assert_eq!(returned["status"], "RETURNED");

        server
            .post(&format!("/api/v1/loans/{}/return", loan_id))
            .json(&json!({ "returnDate": "2024-02-10" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_zero_day_extension_fails_validation() {
        let server = create_test_server();
        let loan = borrow(&server, "b-2").await;

        let response = server
            .post(&format!("/api/v1/loans/{}/extend", loan["loanId"].as_str().unwrap()))
            .json(&json!({ "days": 0 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_oversized_extension_fails_validation() {
        let server = create_test_server();
        let loan = borrow(&server, "b-2").await;
        let loan_id = loan["loanId"].as_str().unwrap();

        let response = server
            .post(&format!("/api/v1/loans/{}/extend", loan_id))
            .json(&json!({ "days": u32::MAX }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");

        server.get("/api/v1/books?format=array").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_reservation_is_stamped_and_cancelled() {
        let server = create_test_server();

        let response = server
            .post("/api/v1/reservations")
            .json(&json!({ "userId": "u-1", "bookId": "b-25" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let reservation: Value = response.json();
        assert!(!reservation["reservationDate"].as_str().unwrap().is_empty());
        assert_eq!(reservation["status"], "RESERVED");

        let reservable: Vec<Value> = server
            .get("/api/v1/books/available-for-reservation")
            .add_query_param("userId", "u-1")
            .await
            .json();
        assert_eq!(reservable[0]["currentReservations"], 1);
        assert_eq!(reservable[0]["userReservationOrder"], 1);

        let id = reservation["reservationId"].as_str().unwrap();
        server
            .post(&format!("/api/v1/reservations/{}/cancel", id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let mine: Vec<Value> = server
            .get("/api/v1/reservations/users/u-1")
            .await
            .json();
        assert_eq!(mine[0]["status"], "CANCELLED");

        server
            .delete(&format!("/api/v1/reservations/{}", id))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reserving_an_available_book_is_rejected() {
        let server = create_test_server();

        let response = server
            .post("/api/v1/reservations")
            .json(&json!({ "userId": "u-1", "bookId": "b-1" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("available for loan"));
    }

    #[tokio::test]
    async fn test_complete_reservation() {
        let server = create_test_server();

        let reservation: Value = server
            .post("/api/v1/reservations")
            .json(&json!({ "userId": "u-1", "bookId": "b-25" }))
            .await
            .json();
        let id = reservation["reservationId"].as_str().unwrap();

        server
            .post(&format!("/api/v1/reservations/{}/complete", id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let mine: Vec<Value> = server.get("/api/v1/reservations/users/u-1").await.json();
        assert_eq!(mine[0]["status"], "COMPLETED");
    }
}

// =============================================================================
// User and Report Tests
// =============================================================================

mod user_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_update_delete_user() {
        let server = create_test_server();

        let response = server
            .post("/api/v1/users/register")
            .json(&json!({
                "username": "newreader",
                "email": "new@example.org",
                "password": "secret",
                "fullName": "New Reader"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let user: Value = response.json();
        let user_id = user["userId"].as_str().unwrap();

        let users: Vec<Value> = server.get("/api/v1/users").await.json();
        assert_eq!(users.len(), 2);

        let updated: Value = server
            .put(&format!("/api/v1/users/{}", user_id))
            .json(&json!({ "fullName": "Renamed Reader" }))
            .await
            .json();
        assert_eq!(updated["fullName"], "Renamed Reader");
        assert_eq!(updated["email"], "new@example.org");

        server
            .delete(&format!("/api/v1/users/{}", user_id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/v1/users/{}", user_id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_conflict() {
        let server = create_test_server();

        let response = server
            .post("/api/v1/users/register")
            .json(&json!({
                "username": "reader",
                "email": "other@example.org",
                "password": "secret",
                "fullName": "Someone Else"
            }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_summary_report() {
        let server = create_test_server();

        let stats: Value = server.get("/api/v1/admin/reports/summary").await.json();
        assert_eq!(stats["totalBooks"], 25);
        assert_eq!(stats["booksByCategory"]["Fiction"], 12);
        assert_eq!(stats["activeUsers"], 1);
    }
}
