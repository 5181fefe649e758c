//! Tests for the domain user model.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn draft() -> UserDraft {
    UserDraft {
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        is_admin: false,
    }
}

#[rstest]
fn create_assigns_id_and_timestamps(draft: UserDraft) {
    let user = User::create(draft, at(9)).expect("valid user");
    assert_eq!(user.first_name(), "Ada");
    assert_eq!(user.email().as_ref(), "ada@example.com");
    assert_eq!(user.created_at(), at(9));
    assert_eq!(user.updated_at(), at(9));
    assert!(user.password().is_none());
}

#[rstest]
#[case::blank_first("   ", "Lovelace", UserValidationError::FirstNameRequired)]
#[case::blank_last("Ada", "", UserValidationError::LastNameRequired)]
#[case::long_first(&"a".repeat(NAME_MAX + 1), "Lovelace", UserValidationError::FirstNameTooLong { max: NAME_MAX })]
#[case::long_last("Ada", &"b".repeat(NAME_MAX + 1), UserValidationError::LastNameTooLong { max: NAME_MAX })]
#[case::nul_first("A\u{0}da", "Lovelace", UserValidationError::ContainsNul { field: "first_name" })]
#[case::nul_last("Ada", "Love\u{0}", UserValidationError::ContainsNul { field: "last_name" })]
fn create_rejects_invalid_names(
    mut draft: UserDraft,
    #[case] first_name: &str,
    #[case] last_name: &str,
    #[case] expected: UserValidationError,
) {
    draft.first_name = first_name.to_owned();
    draft.last_name = last_name.to_owned();
    let err = User::create(draft, at(9)).expect_err("invalid names");
    assert_eq!(err, expected);
}

#[rstest]
#[case("plainaddress")]
#[case("@missing-local.org")]
#[case("ada@")]
#[case("ada@example")]
#[case("ada lovelace@example.com")]
#[case("ada@-example.com")]
fn create_rejects_malformed_email(mut draft: UserDraft, #[case] email: &str) {
    draft.email = email.to_owned();
    let err = User::create(draft, at(9)).expect_err("invalid email");
    assert_eq!(err, UserValidationError::InvalidEmail);
    assert_eq!(err.field(), "email");
    assert_eq!(err.to_string(), "email must be a valid email address");
}

#[rstest]
#[case("ada@example.com")]
#[case("ada.lovelace+hbnb@mail.example.co.uk")]
#[case("A_B%C@sub-domain.example.io")]
fn create_accepts_common_email_forms(mut draft: UserDraft, #[case] email: &str) {
    draft.email = email.to_owned();
    assert!(User::create(draft, at(9)).is_ok());
}

#[rstest]
fn names_at_the_limit_are_accepted(mut draft: UserDraft) {
    draft.first_name = "a".repeat(NAME_MAX);
    draft.last_name = "b".repeat(NAME_MAX);
    assert!(User::create(draft, at(9)).is_ok());
}

#[rstest]
fn apply_merges_and_bumps_updated_at(draft: UserDraft) {
    let mut user = User::create(draft, at(9)).expect("valid user");
    let id = user.id().clone();
    user.apply(
        UserUpdate {
            last_name: Some("Byron".to_owned()),
            email: Some("ADA@BYRON.ORG".to_owned()),
            ..UserUpdate::default()
        },
        at(10),
    )
    .expect("valid update");

    assert_eq!(user.id(), &id);
    assert_eq!(user.first_name(), "Ada");
    assert_eq!(user.last_name(), "Byron");
    assert_eq!(user.email().as_ref(), "ada@byron.org");
    assert_eq!(user.created_at(), at(9));
    assert_eq!(user.updated_at(), at(10));
}

#[rstest]
fn apply_leaves_user_untouched_on_failure(draft: UserDraft) {
    let mut user = User::create(draft, at(9)).expect("valid user");
    let err = user
        .apply(
            UserUpdate {
                first_name: Some("Grace".to_owned()),
                email: Some("broken".to_owned()),
                ..UserUpdate::default()
            },
            at(10),
        )
        .expect_err("invalid email");

    assert_eq!(err, UserValidationError::InvalidEmail);
    assert_eq!(user.first_name(), "Ada");
    assert_eq!(user.updated_at(), at(9));
}
