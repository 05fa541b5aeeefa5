use calorie_tracker::{AppError, ErrorKind, TokenError, TokenService};
use chrono::Duration;

const SECRET: &str = "black-box-secret";
const NOW: i64 = 1_714_521_600; // 2024-05-01T00:00:00Z

fn service() -> TokenService {
    TokenService::with_default_ttl(SECRET).unwrap()
}

#[test]
fn session_token_round_trip() {
    let tokens = service();
    let token = tokens.issue_session_token_at(42, NOW).unwrap();

    let claims = tokens.verify_token_at(&token, NOW + 60).unwrap();
    assert_eq!(claims.user_id().unwrap(), 42);
    assert_eq!(claims.iat, NOW);
    assert_eq!(claims.exp, Some(NOW + Duration::days(30).num_seconds()));
}

#[test]
fn session_token_valid_until_exact_expiry() {
    let tokens = service();
    let token = tokens.issue_session_token_at(7, NOW).unwrap();
    let exp = NOW + tokens.session_ttl().num_seconds();

    assert!(tokens.verify_token_at(&token, exp).is_ok());
    assert_eq!(
        tokens.verify_token_at(&token, exp + 1),
        Err(TokenError::Expired)
    );
}

#[test]
fn custom_ttl_is_honoured() {
    let tokens = TokenService::new(SECRET, Duration::hours(1)).unwrap();
    let token = tokens.issue_session_token_at(1, NOW).unwrap();

    assert!(tokens.verify_token_at(&token, NOW + 3600).is_ok());
    assert_eq!(
        tokens.verify_token_at(&token, NOW + 3601),
        Err(TokenError::Expired)
    );
}

#[test]
fn service_token_has_no_expiry() {
    let tokens = service();
    let token = tokens.issue_service_token_at(3, NOW).unwrap();

    let claims = tokens
        .verify_token_at(&token, NOW + Duration::days(3650).num_seconds())
        .unwrap();
    assert_eq!(claims.exp, None);
    assert_eq!(claims.user_id().unwrap(), 3);
}

#[test]
fn tokens_are_bound_to_the_secret() {
    let token = service().issue_session_token_at(5, NOW).unwrap();
    let other = TokenService::with_default_ttl("another-secret").unwrap();

    assert_eq!(
        other.verify_token_at(&token, NOW),
        Err(TokenError::InvalidSignature)
    );
}

#[test]
fn tampered_signature_is_rejected() {
    let tokens = service();
    let token = tokens.issue_session_token_at(5, NOW).unwrap();

    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let sig = parts[2].clone();
    let first = sig.chars().next().unwrap();
    let replacement = if first == 'A' { 'B' } else { 'A' };
    parts[2] = format!("{}{}", replacement, &sig[1..]);
    let tampered = parts.join(".");

    assert_eq!(
        tokens.verify_token_at(&tampered, NOW),
        Err(TokenError::InvalidSignature)
    );
}

#[test]
fn empty_secret_is_refused() {
    assert_eq!(
        TokenService::with_default_ttl("").unwrap_err(),
        TokenError::EmptySecret
    );
}

#[test]
fn token_errors_map_to_unauthorized() {
    for err in [TokenError::Expired, TokenError::InvalidSignature] {
        let app_err = AppError::from(err);
        assert_eq!(app_err.kind(), ErrorKind::Authentication);
        assert_eq!(app_err.kind().http_status().as_u16(), 401);
    }
}
