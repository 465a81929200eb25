//! Unit tests for directory domain values.

use crate::directory::domain::{
    ClientId, ClientSlug, DirectoryDomainError, EmailAddress, UserProfile, UserRole,
};
use rstest::rstest;

#[rstest]
#[case("northwind", "northwind")]
#[case("  Acme-Corp ", "acme-corp")]
#[case("a1", "a1")]
fn slug_accepts_and_normalises(#[case] input: &str, #[case] expected: &str) {
    let slug = ClientSlug::new(input).expect("valid slug");
    assert_eq!(slug.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("-leading")]
#[case("trailing-")]
#[case("under_score")]
#[case("spa ce")]
fn slug_rejects_malformed_input(#[case] input: &str) {
    assert!(matches!(
        ClientSlug::new(input),
        Err(DirectoryDomainError::InvalidSlug(_))
    ));
}

#[rstest]
#[case("ada@example.com")]
#[case("Grace.Hopper@Navy.MIL")]
fn email_accepts_plain_addresses(#[case] input: &str) {
    let email = EmailAddress::new(input).expect("valid email");
    assert_eq!(email.as_str(), input.to_ascii_lowercase());
}

#[rstest]
#[case("no-at-sign")]
#[case("@example.com")]
#[case("a@b@example.com")]
#[case("ada@localhost")]
#[case("ada@.example.com")]
#[case("ada @example.com")]
fn email_rejects_malformed_addresses(#[case] input: &str) {
    assert!(EmailAddress::new(input).is_err());
}

#[rstest]
#[case(UserRole::Client, false)]
#[case(UserRole::Employee, true)]
#[case(UserRole::Admin, true)]
fn staff_roles(#[case] role: UserRole, #[case] expected: bool) {
    assert_eq!(role.is_staff(), expected);
}

#[rstest]
#[case("client", UserRole::Client)]
#[case(" Employee ", UserRole::Employee)]
#[case("ADMIN", UserRole::Admin)]
fn role_parses_case_insensitively(#[case] input: &str, #[case] expected: UserRole) {
    assert_eq!(UserRole::try_from(input), Ok(expected));
}

#[test]
fn client_profile_requires_tenant() {
    let email = EmailAddress::new("c@client.test").expect("valid email");
    let result = UserProfile::new(email, "Client User", UserRole::Client, None);
    assert_eq!(result, Err(DirectoryDomainError::MissingTenant));
}

#[test]
fn staff_profile_rejects_tenant() {
    let email = EmailAddress::new("e@firm.test").expect("valid email");
    let result = UserProfile::new(email, "Employee", UserRole::Employee, Some(ClientId::new()));
    assert_eq!(result, Err(DirectoryDomainError::UnexpectedTenant));
}

#[test]
fn profile_rejects_blank_display_name() {
    let email = EmailAddress::new("e@firm.test").expect("valid email");
    let result = UserProfile::new(email, "   ", UserRole::Admin, None);
    assert_eq!(result, Err(DirectoryDomainError::EmptyDisplayName));
}
