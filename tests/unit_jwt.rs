use storehouse::config::jwt::JwtConfig;
use storehouse::modules::auth::model::TokenType;
use storehouse::utils::jwt::{create_access_token, create_refresh_token, verify_token};

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604_800,
    }
}

#[test]
fn test_access_token_round_trip() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(42, true, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, "42");
    assert_eq!(claims.typ, TokenType::Access);
    assert!(claims.fresh);
    assert!(!claims.jti.is_empty());
}

#[test]
fn test_refresh_token_is_never_fresh() {
    let jwt_config = get_test_jwt_config();

    let token = create_refresh_token(42, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.typ, TokenType::Refresh);
    assert!(!claims.fresh);
}

#[test]
fn test_admin_claim_derived_from_identity() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(1, true, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();
    assert!(claims.is_admin);

    for user_id in [2, 42, 0, -5] {
        let token = create_access_token(user_id, true, &jwt_config).unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();
        assert!(!claims.is_admin);
    }
}

#[test]
fn test_token_expiry_matches_config() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(42, true, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(
        claims.exp - claims.iat,
        jwt_config.access_token_expiry as usize
    );

    let token = create_refresh_token(42, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(
        claims.exp - claims.iat,
        jwt_config.refresh_token_expiry as usize
    );
}

#[test]
fn test_expired_token_reports_token_expired() {
    let expired_config = JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        // Far enough in the past to clear the default validation leeway.
        access_token_expiry: -600,
        refresh_token_expiry: 604_800,
    };

    let token = create_access_token(42, true, &expired_config).unwrap();
    let err = verify_token(&token, &expired_config).unwrap_err();

    assert_eq!(err.code, "token_expired");
}

#[test]
fn test_wrong_secret_is_rejected() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(42, true, &jwt_config).unwrap();

    let other_config = JwtConfig {
        secret: "a_completely_different_secret".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604_800,
    };

    let err = verify_token(&token, &other_config).unwrap_err();
    assert_eq!(err.code, "invalid_token");
}

#[test]
fn test_malformed_tokens_are_rejected() {
    let jwt_config = get_test_jwt_config();

    let malformed_tokens = vec![
        "",
        "not.enough",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
    ];

    for token in malformed_tokens {
        let err = verify_token(token, &jwt_config).unwrap_err();
        assert_eq!(err.code, "invalid_token");
    }
}

#[test]
fn test_every_token_gets_a_unique_jti() {
    let jwt_config = get_test_jwt_config();

    let token1 = create_access_token(42, true, &jwt_config).unwrap();
    let token2 = create_access_token(42, true, &jwt_config).unwrap();

    let claims1 = verify_token(&token1, &jwt_config).unwrap();
    let claims2 = verify_token(&token2, &jwt_config).unwrap();

    assert_ne!(claims1.jti, claims2.jti);
}
