//! Unit tests for JWT claims.

use crate::auth::{Claims, LoginResponse, TokenKind, TokenPair, UserInfo};
use crate::config;
use crate::jwt::JwtConfig;
use chrono::{Duration, Utc};
use uuid::Uuid;

#[test]
fn test_claims_new_sets_correct_fields() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, "bruno@example.com", TokenKind::Access, expires_at);

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "bruno@example.com");
    assert_eq!(claims.kind, TokenKind::Access);
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_claims_iat_is_current_time() {
    let before = Utc::now().timestamp();
    let claims = Claims::new(
        Uuid::new_v4(),
        "bruno@example.com",
        TokenKind::Refresh,
        Utc::now() + Duration::hours(1),
    );
    let after = Utc::now().timestamp();

    assert!(claims.iat >= before);
    assert!(claims.iat <= after);
}

#[test]
fn test_claims_have_distinct_token_ids() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);
    let first = Claims::new(user_id, "bruno@example.com", TokenKind::Access, expires_at);
    let second = Claims::new(user_id, "bruno@example.com", TokenKind::Access, expires_at);

    assert_ne!(first.jti, second.jti);
}

#[test]
fn test_jwt_config_from_app_config() {
    let app = config::JwtConfig {
        secret: "s3cret".to_string(),
        access_token_expiry_secs: 1800,
        refresh_token_expiry_secs: 1_209_600,
    };
    let jwt = JwtConfig::from(&app);

    assert_eq!(jwt.secret, "s3cret");
    assert_eq!(jwt.access_token_expires_minutes, 30);
    assert_eq!(jwt.refresh_token_expires_days, 14);
}

#[test]
fn test_token_pair_serializes() {
    let pair = TokenPair::new("a".to_string(), "r".to_string(), 900);
    let json = serde_json::to_value(&pair).unwrap();
    assert_eq!(json["expires_in"], 900);
    assert_eq!(json["access_token"], "a");
}

#[test]
fn test_claims_serialize_kind_as_typ() {
    let claims = Claims::new(
        Uuid::new_v4(),
        "bruno@example.com",
        TokenKind::Refresh,
        Utc::now() + Duration::hours(1),
    );
    let json = serde_json::to_value(&claims).unwrap();
    assert_eq!(json["typ"], "refresh");
}

#[test]
fn test_login_response_flattens_tokens() {
    let response = LoginResponse {
        user: UserInfo {
            id: Uuid::new_v4(),
            email: "bruno@example.com".to_string(),
            full_name: "Bruno".to_string(),
        },
        tokens: TokenPair::new("a".to_string(), "r".to_string(), 900),
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["access_token"], "a");
    assert_eq!(json["refresh_token"], "r");
    assert_eq!(json["user"]["full_name"], "Bruno");
}
