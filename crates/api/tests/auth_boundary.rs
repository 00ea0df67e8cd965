//! Integration tests for the authentication boundary.
//!
//! Every resource route must reject requests without a valid bearer token
//! before touching the database, and admin routes must reject non-admin
//! callers. These tests drive the full router with a lazy pool.

mod common;

use axum::http::{Method, StatusCode};
use common::{create_test_app, request_with_token, request_without_auth, TEST_JWT_SECRET};
use shared::jwt::JwtConfig;
use tower::ServiceExt;
use uuid::Uuid;

const PROTECTED_ROUTES: &[(&str, &str)] = &[
    ("GET", "/api/businesses"),
    ("GET", "/api/businesses/c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1"),
    ("PUT", "/api/businesses/c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1"),
    ("DELETE", "/api/businesses/c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1"),
    ("POST", "/api/business-memberships"),
    ("GET", "/api/business-memberships"),
    ("POST", "/api/teams"),
    ("GET", "/api/teams"),
    ("POST", "/api/team-memberships"),
    ("GET", "/api/team-memberships"),
    ("POST", "/api/roles"),
    ("GET", "/api/roles"),
    ("POST", "/api/permissions"),
    ("GET", "/api/permissions"),
    ("POST", "/api/role-permissions"),
    ("GET", "/api/role-permissions"),
    ("POST", "/api/projects"),
    ("GET", "/api/projects"),
    ("POST", "/api/project-memberships"),
    ("GET", "/api/project-memberships"),
    ("POST", "/api/milestones"),
    ("GET", "/api/milestones"),
    ("POST", "/api/chat-messages"),
    ("GET", "/api/chat-messages"),
    ("DELETE", "/api/chat-messages/c0a80121-7ac0-4e1c-9d31-9f0db8f0e1a1"),
];

fn method(name: &str) -> Method {
    name.parse().expect("Invalid method")
}

#[tokio::test]
async fn test_protected_routes_reject_missing_token() {
    for (verb, uri) in PROTECTED_ROUTES {
        let app = create_test_app();
        let response = app
            .oneshot(request_without_auth(method(verb), uri))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should require authentication",
            verb,
            uri
        );
    }
}

#[tokio::test]
async fn test_protected_routes_reject_garbage_token() {
    for (verb, uri) in PROTECTED_ROUTES {
        let app = create_test_app();
        let response = app
            .oneshot(request_with_token(method(verb), uri, "not.a.jwt"))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should reject an invalid token",
            verb,
            uri
        );
    }
}

#[tokio::test]
async fn test_protected_routes_reject_token_with_wrong_secret() {
    let wrong = JwtConfig::with_leeway("a-different-secret", 3600, 0);
    let (token, _) = wrong
        .generate_access_token(Uuid::new_v4(), "user")
        .unwrap();

    let app = create_test_app();
    let response = app
        .oneshot(request_with_token(Method::GET, "/api/businesses", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_missing_token() {
    for (verb, uri) in [("PUT", "/api/admin/set-role"), ("POST", "/api/businesses")] {
        let app = create_test_app();
        let response = app
            .oneshot(request_without_auth(method(verb), uri))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should require authentication",
            verb,
            uri
        );
    }
}

#[tokio::test]
async fn test_admin_routes_reject_non_admin_caller() {
    let jwt = JwtConfig::with_leeway(TEST_JWT_SECRET, 3600, 0);
    let (token, _) = jwt.generate_access_token(Uuid::new_v4(), "user").unwrap();

    for (verb, uri) in [("PUT", "/api/admin/set-role"), ("POST", "/api/businesses")] {
        let app = create_test_app();
        let response = app
            .oneshot(request_with_token(method(verb), uri, &token))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::FORBIDDEN,
            "{} {} should reject a non-admin caller",
            verb,
            uri
        );
    }
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let jwt = JwtConfig::with_leeway(TEST_JWT_SECRET, -60, 0);
    let (token, _) = jwt.generate_access_token(Uuid::new_v4(), "user").unwrap();

    let app = create_test_app();
    let response = app
        .oneshot(request_with_token(Method::GET, "/api/teams", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();
    let response = app
        .oneshot(request_without_auth(Method::GET, "/api/unknown"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
