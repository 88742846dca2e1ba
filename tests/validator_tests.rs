use onboarding_forms::{FieldSnapshot, Flow, validate};

use crate::common::utils::{valid_snapshot, valid_values};

mod common;

// =========================================================================
// Whole-form properties
// =========================================================================

#[test]
fn valid_snapshots_pass_for_every_flow() {
    for flow in Flow::ALL {
        let errors = validate(&valid_snapshot(flow), flow);
        assert!(errors.is_empty(), "{} reported {:?}", flow, errors);
    }
}

#[test]
fn clearing_any_required_text_field_reports_that_field() {
    for flow in Flow::ALL {
        for (name, _) in valid_values(flow) {
            if name == "portfolioUrl" {
                continue; // optional
            }
            let mut snapshot = valid_snapshot(flow);
            snapshot.set_text(name, "").unwrap();

            let errors = validate(&snapshot, flow);
            assert!(errors.contains(name), "{}: clearing {} gave {:?}", flow, name, errors);
        }
    }
}

#[test]
fn empty_form_reports_every_checked_field() {
    let flow = Flow::FreelancerRegistration;
    let errors = validate(&FieldSnapshot::new(flow), flow);

    for field in [
        "fullName",
        "email",
        "password",
        "confirmPassword",
        "professionalTitle",
        "phoneNumber",
        "skills",
        "agreedToTerms",
    ] {
        assert!(errors.contains(field), "missing error for {}", field);
    }
    assert!(!errors.contains("portfolioUrl"));
    assert!(!errors.contains("bio"));
    assert_eq!(errors.len(), 8);
}

#[test]
fn validate_is_idempotent() {
    let flow = Flow::AdminRegistration;
    let mut snapshot = valid_snapshot(flow);
    snapshot.set_text("email", "nope").unwrap();
    snapshot.set_text("confirmPassword", "different1").unwrap();

    let first = validate(&snapshot, flow);
    let second = validate(&snapshot, flow);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

// =========================================================================
// Email
// =========================================================================

#[test]
fn malformed_email_on_login_is_the_only_error() {
    let flow = Flow::ClientLogin;
    let mut snapshot = FieldSnapshot::new(flow);
    snapshot.set_text("email", "bad-email").unwrap();
    snapshot.set_text("password", "longenough1").unwrap();

    let errors = validate(&snapshot, flow);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("email"), Some("Email is invalid"));
}

#[test]
fn blank_email_is_required_not_invalid() {
    let flow = Flow::AdminLogin;
    let mut snapshot = valid_snapshot(flow);
    snapshot.set_text("email", "   ").unwrap();

    assert_eq!(validate(&snapshot, flow).get("email"), Some("Email is required"));
}

#[test]
fn email_shape_check_is_loose() {
    let flow = Flow::FreelancerLogin;
    for (email, ok) in [
        ("a@b.c", true),
        ("first.last+tag@sub.example.org", true),
        ("no-at-sign.com", false),
        ("missing@dot", false),
        ("@example.com", false),
        ("user@.com", false),
    ] {
        let mut snapshot = valid_snapshot(flow);
        snapshot.set_text("email", email).unwrap();
        assert_eq!(validate(&snapshot, flow).is_empty(), ok, "email {:?}", email);
    }
}

// =========================================================================
// Passwords
// =========================================================================

#[test]
fn short_password_fails_on_registration_regardless_of_other_fields() {
    let flow = Flow::ClientRegistration;

    let mut snapshot = FieldSnapshot::new(flow);
    snapshot.set_text("password", "short").unwrap();
    let errors = validate(&snapshot, flow);
    assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));

    let mut snapshot = valid_snapshot(flow);
    snapshot.set_text("password", "short").unwrap();
    let errors = validate(&snapshot, flow);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));
}

#[test]
fn login_password_has_no_minimum_length() {
    let flow = Flow::FreelancerLogin;
    let mut snapshot = valid_snapshot(flow);
    snapshot.set_text("password", "short").unwrap();
    assert!(validate(&snapshot, flow).is_empty());

    snapshot.set_text("password", "").unwrap();
    assert_eq!(validate(&snapshot, flow).get("password"), Some("Password is required"));
}

#[test]
fn password_length_counts_characters() {
    let flow = Flow::ClientRegistration;
    let mut snapshot = valid_snapshot(flow);
    // 8 characters, 16 bytes
    snapshot.set_text("password", "пароль12").unwrap();
    assert!(validate(&snapshot, flow).is_empty());
}

#[test]
fn confirm_password_must_match_exactly() {
    let flow = Flow::FreelancerRegistration;

    let mut snapshot = valid_snapshot(flow);
    snapshot.set_text("confirmPassword", "longenough1 ").unwrap();
    assert_eq!(
        validate(&snapshot, flow).get("confirmPassword"),
        Some("Passwords do not match")
    );

    snapshot.set_text("confirmPassword", "").unwrap();
    assert_eq!(
        validate(&snapshot, flow).get("confirmPassword"),
        Some("Please confirm your password")
    );
}

// =========================================================================
// Skills, portfolio, terms
// =========================================================================

#[test]
fn duplicate_skills_count_once() {
    let flow = Flow::FreelancerRegistration;
    let mut snapshot = valid_snapshot(flow);
    snapshot.set_text("skills", "React, React, Node").unwrap();

    let errors = validate(&snapshot, flow);
    assert_eq!(errors.get("skills"), Some("Please add at least 3 skills"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn blank_skill_parts_are_ignored() {
    let flow = Flow::FreelancerRegistration;
    let mut snapshot = valid_snapshot(flow);

    snapshot.set_text("skills", " , ,React,, ").unwrap();
    assert_eq!(validate(&snapshot, flow).get("skills"), Some("Please add at least 3 skills"));

    snapshot.set_text("skills", "  ").unwrap();
    assert_eq!(validate(&snapshot, flow).get("skills"), Some("Please add at least one skill"));

    snapshot.set_text("skills", "Rust,,Go , Zig").unwrap();
    assert!(validate(&snapshot, flow).is_empty());
}

#[test]
fn portfolio_url_is_optional_but_checked_when_present() {
    let flow = Flow::FreelancerRegistration;
    let mut snapshot = valid_snapshot(flow);

    snapshot.set_text("portfolioUrl", "").unwrap();
    assert!(validate(&snapshot, flow).is_empty());

    snapshot.set_text("portfolioUrl", "http://x").unwrap();
    assert!(validate(&snapshot, flow).is_empty());

    for bad in ["jane.dev", "ftp://jane.dev", "https://"] {
        snapshot.set_text("portfolioUrl", bad).unwrap();
        assert_eq!(
            validate(&snapshot, flow).get("portfolioUrl"),
            Some("Please enter a valid URL (http:// or https://)"),
            "url {:?}",
            bad
        );
    }
}

#[test]
fn unchecked_terms_are_reported() {
    for flow in [Flow::ClientRegistration, Flow::FreelancerRegistration, Flow::AdminRegistration] {
        let mut snapshot = valid_snapshot(flow);
        snapshot.set_toggle("agreedToTerms", false).unwrap();
        assert_eq!(
            validate(&snapshot, flow).get("agreedToTerms"),
            Some("You must agree to the terms and conditions")
        );
    }
}

#[test]
fn admin_specific_fields_use_their_messages() {
    let flow = Flow::AdminRegistration;
    let mut snapshot = valid_snapshot(flow);
    snapshot.set_text("adminCode", " ").unwrap();
    snapshot.set_text("department", "").unwrap();

    let errors = validate(&snapshot, flow);
    assert_eq!(errors.get("adminCode"), Some("Admin registration code is required"));
    assert_eq!(errors.get("department"), Some("Department is required"));
}
