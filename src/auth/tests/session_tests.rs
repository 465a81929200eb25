//! Unit tests for the session token codec.

use crate::auth::{
    domain::{SessionClaims, SessionError},
    services::{SessionCodec, SessionConfigError, SessionSecret},
};
use crate::clock::FixedClock;
use crate::directory::domain::{
    ClientId, EmailAddress, PasswordHash, User, UserProfile, UserRole,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> FixedClock {
    let start = Utc
        .with_ymd_and_hms(2026, 3, 2, 8, 30, 0)
        .single()
        .expect("valid timestamp");
    FixedClock::at(start)
}

#[fixture]
fn codec() -> SessionCodec {
    let secret = SessionSecret::new(vec![7_u8; 32]).expect("long enough");
    SessionCodec::new(&secret, Duration::minutes(30)).expect("positive ttl")
}

fn client_user(clock: &FixedClock) -> User {
    let email = EmailAddress::new("pat@acme.test").expect("valid email");
    let profile = UserProfile::new(email, "Pat", UserRole::Client, Some(ClientId::new()))
        .expect("valid profile");
    User::new(profile, PasswordHash::from_phc("$test$"), clock)
}

#[rstest]
fn issued_token_verifies_to_same_claims(codec: SessionCodec, clock: FixedClock) {
    let user = client_user(&clock);
    let (token, claims) = codec.issue(&user, &clock);

    let verified = codec.verify(token.as_str(), &clock).expect("token verifies");

    assert_eq!(verified, claims);
    assert_eq!(verified.user_id, user.id());
    assert_eq!(verified.client_id, user.client_id());
    assert_eq!(verified.expires_at - verified.issued_at, Duration::minutes(30));
}

#[rstest]
fn token_payload_uses_descriptive_claim_names(codec: SessionCodec, clock: FixedClock) {
    let user = client_user(&clock);
    let (token, claims) = codec.issue(&user, &clock);
    let (payload, _) = token.as_str().split_once('.').expect("two segments");

    let json = URL_SAFE_NO_PAD.decode(payload).expect("payload is base64url");
    let fields: serde_json::Value = serde_json::from_slice(&json).expect("payload is json");

    assert_eq!(fields["user_id"], user.id().to_string());
    assert_eq!(fields["role"], "client");
    assert_eq!(fields["issued_at"], claims.issued_at.timestamp());
    assert_eq!(fields["expires_at"], claims.expires_at.timestamp());
}

#[rstest]
fn token_expires_after_ttl(codec: SessionCodec, clock: FixedClock) {
    let (token, _) = codec.issue(&client_user(&clock), &clock);

    clock.advance(Duration::minutes(29));
    assert!(codec.verify(token.as_str(), &clock).is_ok());

    clock.advance(Duration::minutes(1));
    assert_eq!(
        codec.verify(token.as_str(), &clock),
        Err(SessionError::Expired)
    );
}

#[rstest]
fn forged_payload_fails_signature_check(codec: SessionCodec, clock: FixedClock) {
    let user = client_user(&clock);
    let (token, claims) = codec.issue(&user, &clock);
    let (_, signature) = token.as_str().split_once('.').expect("two segments");

    let escalated = SessionClaims {
        role: UserRole::Admin,
        client_id: None,
        ..claims
    };
    let forged_payload =
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&escalated).expect("claims serialise"));
    let forged = format!("{forged_payload}.{signature}");

    assert_eq!(
        codec.verify(&forged, &clock),
        Err(SessionError::BadSignature)
    );
}

#[rstest]
fn unsigned_base64_json_cookie_is_rejected(codec: SessionCodec, clock: FixedClock) {
    let legacy = URL_SAFE_NO_PAD.encode(br#"{"userId":"1","role":"admin"}"#);
    assert_eq!(codec.verify(&legacy, &clock), Err(SessionError::Malformed));
}

#[rstest]
fn token_from_other_secret_is_rejected(codec: SessionCodec, clock: FixedClock) {
    let other_secret = SessionSecret::new(vec![9_u8; 48]).expect("long enough");
    let other = SessionCodec::new(&other_secret, Duration::minutes(30)).expect("positive ttl");
    let (token, _) = other.issue(&client_user(&clock), &clock);

    assert_eq!(
        codec.verify(token.as_str(), &clock),
        Err(SessionError::BadSignature)
    );
}

#[rstest]
#[case("")]
#[case("no-dot")]
#[case(".sig")]
#[case("payload.")]
#[case("a.b.c")]
#[case("payload.!!!not-base64!!!")]
fn malformed_tokens_are_rejected(codec: SessionCodec, clock: FixedClock, #[case] token: &str) {
    assert_eq!(codec.verify(token, &clock), Err(SessionError::Malformed));
}

#[test]
fn short_secret_is_rejected() {
    assert_eq!(
        SessionSecret::new(b"too-short".to_vec()),
        Err(SessionConfigError::SecretTooShort { min: 32, actual: 9 })
    );
}

#[test]
fn zero_ttl_is_rejected() {
    let secret = SessionSecret::generate();
    assert!(matches!(
        SessionCodec::new(&secret, Duration::zero()),
        Err(SessionConfigError::NonPositiveTtl)
    ));
}

#[test]
fn secret_debug_is_redacted() {
    let secret = SessionSecret::new(b"0123456789abcdef0123456789abcdef".to_vec()).expect("32 bytes");
    assert!(!format!("{secret:?}").contains("0123"));
}
