use super::common::*;
use rand::SeedableRng;
use crate::intake::catalog::UNKNOWN_PROGRAM;
use crate::intake::domain::{FieldKey, SubmissionInput, REFERENCE_MAX, REFERENCE_MIN};
use crate::intake::evaluator::draw_reference_id;
use crate::intake::normalizer::normalize_phone;
use crate::intake::rules::{
    BIO_TOO_LONG, EMAIL_REQUIRED, FULL_NAME_INVALID, FULL_NAME_REQUIRED, PHONE_INVALID,
    PHONE_REQUIRED, PROGRAM_REQUIRED,
};

#[test]
fn valid_submission_is_accepted_with_normalized_phone() {
    let result = evaluate(&valid_input());

    assert!(result.accepted());
    assert!(result.errors().is_empty());
    assert_eq!(result.program_name(), Some("Computer Science"));
    assert_eq!(result.normalized_values().phone.as_str(), "+919876543210");
    assert_eq!(result.normalized_values().full_name.as_str(), "Alice Rao");
}

#[test]
fn reference_id_has_expected_shape() {
    for seed in 0..50 {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let result = crate::intake::SubmissionEvaluator::default().evaluate(&valid_input(), &mut rng);
        let reference = result.reference_id().expect("accepted submissions carry a reference");
        let text = reference.as_str();
        assert_eq!(text.len(), 9);
        assert!(text.starts_with("SAP-"));
        assert!(text[4..].chars().all(|ch| ch.is_ascii_digit()));
        let number = reference.number().expect("numeric suffix");
        assert!((REFERENCE_MIN..=REFERENCE_MAX).contains(&number));
    }
}

#[test]
fn same_seed_yields_same_reference() {
    let first = evaluate(&valid_input());
    let second = evaluate(&valid_input());
    assert_eq!(first.reference_id(), second.reference_id());
}

#[test]
fn reference_draws_stay_within_bounds() {
    let mut rng = seeded_rng();
    for _ in 0..1_000 {
        let number = draw_reference_id(&mut rng).number().expect("numeric");
        assert!((REFERENCE_MIN..=REFERENCE_MAX).contains(&number));
    }
}

#[test]
fn missing_full_name_reports_required_regardless_of_other_fields() {
    let mut input = SubmissionInput::default();
    input.email = "not an email".to_string();
    let result = evaluate(&input);
    assert_eq!(result.errors().get(FieldKey::FullName), Some(FULL_NAME_REQUIRED));

    let mut input = valid_input();
    input.full_name = "   ".to_string();
    let result = evaluate(&input);
    assert_eq!(result.errors().get(FieldKey::FullName), Some(FULL_NAME_REQUIRED));
    assert_eq!(result.errors().len(), 1);
}

#[test]
fn name_with_digit_is_rejected() {
    let mut input = valid_input();
    input.full_name = "A1ice".to_string();
    let result = evaluate(&input);

    assert!(!result.accepted());
    assert_eq!(result.errors().get(FieldKey::FullName), Some(FULL_NAME_INVALID));
    assert!(result.reference_id().is_none());
    assert!(result.program_name().is_none());
}

#[test]
fn short_phone_is_rejected_and_kept_as_typed() {
    let mut input = valid_input();
    input.phone = "12345".to_string();
    let result = evaluate(&input);

    assert_eq!(result.errors().get(FieldKey::Phone), Some(PHONE_INVALID));
    assert!(PHONE_INVALID.contains("7–15 digits"));
    assert_eq!(result.normalized_values().phone.as_str(), "12345");
}

#[test]
fn empty_program_is_the_only_error() {
    let mut input = valid_input();
    input.program = String::new();
    let result = evaluate(&input);

    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors().get(FieldKey::Program), Some(PROGRAM_REQUIRED));
}

#[test]
fn every_field_is_checked_even_after_a_failure() {
    let input = SubmissionInput {
        full_name: "R2D2".to_string(),
        email: "droid".to_string(),
        program: String::new(),
        phone: "beep".to_string(),
        bio: "x".repeat(501),
    };
    let result = evaluate(&input);

    let failed: Vec<FieldKey> = result.errors().keys().collect();
    assert_eq!(failed, FieldKey::ALL.to_vec());
    assert!(!result.accepted());
}

#[test]
fn uncatalogued_program_falls_back_to_unknown_label() {
    let mut input = valid_input();
    input.program = "ME".to_string();
    let result = evaluate(&input);

    assert!(result.accepted());
    assert_eq!(result.program_name(), Some(UNKNOWN_PROGRAM));
}

#[test]
fn bio_length_counts_the_escaped_value() {
    let mut input = valid_input();
    input.bio = "&".repeat(100);
    let result = evaluate(&input);
    assert!(result.accepted(), "100 ampersands escape to exactly 500 chars");

    input.bio = "&".repeat(101);
    let result = evaluate(&input);
    assert_eq!(result.errors().get(FieldKey::Bio), Some(BIO_TOO_LONG));
}

#[test]
fn bio_boundary_on_plain_text() {
    let mut input = valid_input();
    input.bio = "b".repeat(500);
    assert!(evaluate(&input).accepted());

    input.bio = "b".repeat(501);
    assert_eq!(
        evaluate(&input).errors().get(FieldKey::Bio),
        Some(BIO_TOO_LONG)
    );
}

#[test]
fn omitted_bio_is_treated_as_empty() {
    let input: SubmissionInput = serde_json::from_value(serde_json::json!({
        "fullName": "Alice Rao",
        "email": "alice@x.com",
        "program": "IT",
        "phone": "9876543210",
    }))
    .expect("payload deserializes");

    let result = evaluate(&input);
    assert!(result.accepted());
    assert_eq!(result.normalized_values().bio.as_str(), "");
    assert_eq!(result.program_name(), Some("Information Technology"));
}

#[test]
fn markup_is_escaped_in_normalized_values() {
    let mut input = valid_input();
    input.bio = "<script>alert('x')</script>".to_string();
    let result = evaluate(&input);

    assert!(result.accepted());
    assert_eq!(
        result.normalized_values().bio.as_str(),
        "&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"
    );
}

#[test]
fn accepted_matches_error_emptiness() {
    let mut samples = vec![valid_input(), SubmissionInput::default()];
    let mut bad_email = valid_input();
    bad_email.email = "alice@".to_string();
    samples.push(bad_email);

    for input in samples {
        let result = evaluate(&input);
        assert_eq!(result.accepted(), result.errors().is_empty());
        assert_eq!(result.accepted(), result.reference_id().is_some());
        assert_eq!(result.accepted(), result.program_name().is_some());
    }
}

#[test]
fn zero_program_is_reported_as_missing() {
    let mut input = valid_input();
    input.program = "0".to_string();
    let result = evaluate(&input);

    assert!(!result.accepted());
    assert_eq!(result.program_name(), None);
    assert_eq!(result.errors().get(FieldKey::Program), Some(PROGRAM_REQUIRED));
    assert_eq!(result.errors().len(), 1);
}

#[test]
fn zero_in_required_text_fields_is_reported_as_missing() {
    let cases = [
        (FieldKey::FullName, FULL_NAME_REQUIRED),
        (FieldKey::Email, EMAIL_REQUIRED),
        (FieldKey::Phone, PHONE_REQUIRED),
    ];
    for (field, message) in cases {
        let mut input = valid_input();
        match field {
            FieldKey::FullName => input.full_name = " 0 ".to_string(),
            FieldKey::Email => input.email = "0".to_string(),
            _ => input.phone = "0".to_string(),
        }
        let result = evaluate(&input);
        assert_eq!(result.errors().get(field), Some(message), "{field}");
        assert_eq!(result.errors().len(), 1, "{field}");
    }
}

#[test]
fn zero_bio_is_accepted() {
    let mut input = valid_input();
    input.bio = "0".to_string();
    let result = evaluate(&input);

    assert!(result.accepted());
    assert_eq!(result.normalized_values().bio.as_str(), "0");
}

#[test]
fn accepted_phone_is_stable_under_renormalization() {
    let mut input = valid_input();
    input.phone = " (555) 010-9999 ".to_string();
    let result = evaluate(&input);

    let phone = result.normalized_values().phone.as_str();
    assert_eq!(phone, "5550109999");
    assert_eq!(normalize_phone(phone), phone);
}
