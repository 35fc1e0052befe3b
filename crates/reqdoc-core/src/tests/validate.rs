use crate::*;
use serde_json::json;

fn payload() -> serde_json::Value {
    json!({
        "name": "Customer Portal",
        "domain": "E-commerce",
        "description": "Redesign",
        "stakeholders": [{ "id": "s1", "name": "Alice", "role": "PM" }],
        "functionalRequirements": [{ "id": "f1", "stakeholderId": "s1", "description": "Login" }],
        "nonFunctionalRequirements": []
    })
}

#[test]
fn valid_payload_parses() {
    let insert = parse_insert_payload(&payload()).unwrap();
    assert_eq!(insert.name, "Customer Portal");
    assert_eq!(insert.stakeholders.len(), 1);
}

#[test]
fn empty_name_is_rejected() {
    let mut value = payload();
    value["name"] = json!("   ");
    let err = parse_insert_payload(&value).unwrap_err().to_string();
    assert_eq!(err, "Invalid project payload: name must not be empty");
}

#[test]
fn missing_domain_is_rejected() {
    let mut value = payload();
    value.as_object_mut().unwrap().remove("domain");
    let err = parse_insert_payload(&value).unwrap_err().to_string();
    assert_eq!(err, "Invalid project payload: domain is required");
}

#[test]
fn non_array_list_is_rejected() {
    let mut value = payload();
    value["stakeholders"] = json!({ "id": "s1" });
    let err = parse_insert_payload(&value).unwrap_err().to_string();
    assert_eq!(err, "Invalid project payload: stakeholders must be an array");
}

#[test]
fn null_lists_are_treated_as_absent() {
    let mut value = payload();
    value["nonFunctionalRequirements"] = json!(null);
    let insert = parse_insert_payload(&value).unwrap();
    assert!(insert.non_functional_requirements.is_empty());
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut value = payload();
    value["functionalRequirements"] = json!([
        { "id": "f1", "stakeholderId": "s1", "description": "Login" },
        { "id": "f1", "stakeholderId": "s1", "description": "Logout" }
    ]);
    let err = parse_insert_payload(&value).unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateId { collection: "functionalRequirements", ref id } if id == "f1"
    ));
}

#[test]
fn second_requirement_for_a_category_is_rejected() {
    let mut value = payload();
    value["nonFunctionalRequirements"] = json!([
        { "id": "n1", "category": "security", "description": "TLS" },
        { "id": "n2", "category": "security", "description": "MFA" }
    ]);
    let err = parse_insert_payload(&value).unwrap_err().to_string();
    assert_eq!(
        err,
        "More than one non-functional requirement for category: security"
    );
}

#[test]
fn dangling_stakeholder_reference_is_valid() {
    let mut value = payload();
    value["functionalRequirements"] = json!([
        { "id": "f1", "stakeholderId": "nobody", "description": "Login" }
    ]);
    assert!(parse_insert_payload(&value).is_ok());
}

#[test]
fn patch_payload_only_checks_present_fields() {
    let patch = parse_patch_payload(&json!({ "domain": "Healthcare" })).unwrap();
    assert_eq!(patch.domain.as_deref(), Some("Healthcare"));
    assert!(patch.name.is_none());

    let err = parse_patch_payload(&json!({ "description": "" }))
        .unwrap_err()
        .to_string();
    assert_eq!(err, "Invalid project payload: description must not be empty");
}
