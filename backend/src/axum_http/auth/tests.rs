use super::*;
use crate::config::config_model::AuthSecret;
use axum::http::{HeaderValue, Request, header::AUTHORIZATION};
use jsonwebtoken::{EncodingKey, Header, encode};

const SECRET: &str = "supersecretjwtsecretforunittesting123";

fn token(claims: &WorkspaceClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn claims(role: UserRole, exp: usize) -> WorkspaceClaims {
    WorkspaceClaims {
        sub: "2vxsx-fae".to_string(),
        role,
        exp,
    }
}

#[test]
fn test_validate_jwt_success() {
    let my_claims = claims(UserRole::Admin, 9999999999);

    let validated = validate_jwt(&token(&my_claims, SECRET), SECRET).expect("Valid token should pass");
    assert_eq!(validated.sub, my_claims.sub);
    assert_eq!(validated.role, UserRole::Admin);
}

#[test]
fn test_validate_jwt_expired() {
    let result = validate_jwt(&token(&claims(UserRole::User, 1), SECRET), SECRET);
    assert!(result.is_err());
}

#[test]
fn test_validate_jwt_invalid_signature() {
    let result = validate_jwt(&token(&claims(UserRole::User, 9999999999), "wrongsecret"), SECRET);
    assert!(result.is_err());
}

#[test]
fn test_validate_jwt_empty_subject() {
    let mut empty = claims(UserRole::User, 9999999999);
    empty.sub = " ".to_string();

    assert!(validate_jwt(&token(&empty, SECRET), SECRET).is_err());
}

#[test]
fn test_bearer_token_requires_scheme() {
    let mut headers = HeaderMap::new();
    assert_eq!(bearer_token(&headers).unwrap_err().0, StatusCode::UNAUTHORIZED);

    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
    assert_eq!(bearer_token(&headers).unwrap_err().0, StatusCode::UNAUTHORIZED);

    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
    assert_eq!(bearer_token(&headers).unwrap(), "abc.def");
}

fn request_parts(bearer: &str, secret: Option<&str>) -> Parts {
    let mut builder = Request::builder().header(AUTHORIZATION, bearer);
    if let Some(secret) = secret {
        builder = builder.extension(AuthSecret {
            jwt_secret: secret.to_string(),
        });
    }
    builder.body(()).unwrap().into_parts().0
}

#[tokio::test]
async fn test_extractor_reads_owner_and_role() {
    let bearer = format!("Bearer {}", token(&claims(UserRole::Guest, 9999999999), SECRET));
    let mut parts = request_parts(&bearer, Some(SECRET));

    let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();

    assert_eq!(user.owner, "2vxsx-fae");
    assert_eq!(user.role, UserRole::Guest);
    assert!(!user.is_admin());
}

#[tokio::test]
async fn test_extractor_uses_the_configured_secret() {
    let bearer = format!("Bearer {}", token(&claims(UserRole::Admin, 9999999999), SECRET));

    let mut wrong = request_parts(&bearer, Some("a-different-configured-secret"));
    let rejection = AuthUser::from_request_parts(&mut wrong, &()).await.unwrap_err();
    assert_eq!(rejection.0, StatusCode::UNAUTHORIZED);

    let mut missing = request_parts(&bearer, None);
    let rejection = AuthUser::from_request_parts(&mut missing, &()).await.unwrap_err();
    assert_eq!(rejection.0, StatusCode::INTERNAL_SERVER_ERROR);
}
