use onboarding_forms::{
    FieldSnapshot, FieldValue, Flow, FormError, InputKind,
    form::field_store::{POPULAR_SKILLS, skills_list},
};

#[test]
fn new_snapshot_has_closed_empty_key_set() {
    let snapshot = FieldSnapshot::new(Flow::ClientRegistration);
    let keys: Vec<&str> = snapshot.iter().map(|(k, _)| k).collect();

    assert_eq!(
        keys,
        vec!["agreedToTerms", "companyName", "email", "fullName", "password", "phoneNumber"]
    );
    assert_eq!(snapshot.get("fullName"), Some(&FieldValue::Text(String::new())));
    assert_eq!(snapshot.get("agreedToTerms"), Some(&FieldValue::Toggle(false)));
}

#[test]
fn text_values_are_stored_verbatim() {
    let mut snapshot = FieldSnapshot::new(Flow::FreelancerRegistration);
    snapshot.update("fullName", "  Jane  Doe ", InputKind::Text).unwrap();
    snapshot.update("skills", "React,,  Rust", InputKind::Text).unwrap();

    assert_eq!(snapshot.text("fullName"), "  Jane  Doe ");
    assert_eq!(snapshot.text("skills"), "React,,  Rust");
}

#[test]
fn toggles_store_checked_state_and_ignore_raw_value() {
    let mut snapshot = FieldSnapshot::new(Flow::AdminLogin);
    snapshot
        .update("rememberMe", "on", InputKind::Toggle { checked: true })
        .unwrap();
    assert!(snapshot.toggle("rememberMe"));

    snapshot
        .update("rememberMe", "on", InputKind::Toggle { checked: false })
        .unwrap();
    assert!(!snapshot.toggle("rememberMe"));
}

#[test]
fn update_returns_the_new_snapshot() {
    let mut snapshot = FieldSnapshot::new(Flow::ClientLogin);
    let updated = snapshot.set_text("email", "a@b.co").unwrap();
    assert_eq!(updated.text("email"), "a@b.co");
}

#[test]
fn unknown_field_is_a_configuration_error() {
    let mut snapshot = FieldSnapshot::new(Flow::ClientLogin);
    let before = snapshot.clone();

    let err = snapshot.set_text("companyName", "Acme").unwrap_err();
    assert!(matches!(err, FormError::UnknownField { ref field, .. } if field == "companyName"));
    assert_eq!(snapshot, before);
}

#[test]
fn input_kind_must_match_declared_kind() {
    let mut snapshot = FieldSnapshot::new(Flow::AdminRegistration);

    let err = snapshot.set_toggle("department", true).unwrap_err();
    assert!(matches!(err, FormError::KindMismatch { expected: "text", .. }));

    let err = snapshot.set_text("agreedToTerms", "true").unwrap_err();
    assert!(matches!(err, FormError::KindMismatch { expected: "toggle", .. }));
}

// =========================================================================
// Skills helpers
// =========================================================================

#[test]
fn skills_list_trims_and_drops_blanks() {
    assert_eq!(skills_list(" React ,, Node.js ,"), vec!["React", "Node.js"]);
    assert!(skills_list("").is_empty());
    assert_eq!(skills_list("Go, Go"), vec!["Go", "Go"]);
}

#[test]
fn add_skill_appends_once_and_rewrites_field() {
    let mut snapshot = FieldSnapshot::new(Flow::FreelancerRegistration);
    snapshot.set_text("skills", "React,Node.js").unwrap();

    snapshot.add_skill(POPULAR_SKILLS[2]).unwrap();
    assert_eq!(snapshot.text("skills"), "React, Node.js, Python");

    snapshot.add_skill("React").unwrap();
    assert_eq!(snapshot.text("skills"), "React, Node.js, Python");
}

#[test]
fn remove_skill_rewrites_field() {
    let mut snapshot = FieldSnapshot::new(Flow::FreelancerRegistration);
    snapshot.set_text("skills", "React, Node.js, Python").unwrap();

    snapshot.remove_skill("Node.js").unwrap();
    assert_eq!(snapshot.text("skills"), "React, Python");
}

#[test]
fn skills_helpers_reject_flows_without_skills() {
    let mut snapshot = FieldSnapshot::new(Flow::ClientRegistration);
    assert!(snapshot.add_skill("React").is_err());
}
