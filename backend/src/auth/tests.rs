use super::*;
use axum::http::Request;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::env;

const TEST_SECRET: &str = "supersecretjwtsecretforunittesting123";
const TEST_USER: &str = "123e4567-e89b-12d3-a456-426614174000";

fn set_env_vars() {
    unsafe {
        env::set_var("JWT_SECRET", TEST_SECRET);
        env::remove_var("JWT_AUDIENCE");
    }
}

fn token_for(secret: &str, role: &str, exp: usize) -> String {
    let claims = AccessClaims {
        sub: TEST_USER.to_string(),
        role: role.to_string(),
        email: Some("test@example.com".to_string()),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn parts_with_bearer(token: &str) -> Parts {
    let (parts, _) = Request::builder()
        .header("Authorization", format!("Bearer {}", token))
        .body(())
        .unwrap()
        .into_parts();
    parts
}

#[test]
fn test_validate_access_token_success() {
    set_env_vars();
    let token = token_for(TEST_SECRET, "authenticated", 9999999999);

    let claims = validate_access_token(&token).expect("Valid token should pass");
    assert_eq!(claims.sub, TEST_USER);
    assert_eq!(claims.email.as_deref(), Some("test@example.com"));
}

#[test]
fn test_validate_access_token_expired() {
    set_env_vars();
    let token = token_for(TEST_SECRET, "authenticated", 1);

    assert!(validate_access_token(&token).is_err());
}

#[test]
fn test_validate_access_token_invalid_signature() {
    set_env_vars();
    let token = token_for("wrongsecret", "authenticated", 9999999999);

    assert!(validate_access_token(&token).is_err());
}

#[tokio::test]
async fn test_auth_user_extracts_owner() {
    set_env_vars();
    let mut parts = parts_with_bearer(&token_for(TEST_SECRET, "authenticated", 9999999999));

    let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
    let owner = user.as_owner();
    assert_eq!(owner.user_id.to_string(), TEST_USER);
    assert!(!owner.is_admin);
}

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

    let (status, _) = AuthUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_extractor_rejects_customers() {
    set_env_vars();
    let mut parts = parts_with_bearer(&token_for(TEST_SECRET, "authenticated", 9999999999));

    let (status, _) = AdminUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_extractor_accepts_admins() {
    set_env_vars();
    let mut parts = parts_with_bearer(&token_for(TEST_SECRET, ADMIN_ROLE, 9999999999));

    let AdminUser(user) = AdminUser::from_request_parts(&mut parts, &())
        .await
        .unwrap();
    assert!(user.is_admin());
}
