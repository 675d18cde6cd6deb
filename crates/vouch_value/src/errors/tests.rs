use super::*;
use pretty_assertions::assert_eq;

#[test]
fn mismatch_message_names_parameter_and_kind() {
    let err = type_mismatch(
        "distance_to",
        MismatchLocation::Parameter {
            index: 0,
            name: Some("other".into()),
        },
        "{x: number, y: number}",
        "string",
    );
    assert_eq!(
        err.to_string(),
        "type mismatch in `distance_to`: parameter 0 (`other`) \
         expected {x: number, y: number}, got string"
    );
    assert_eq!(err.message, err.kind.to_string());
}

#[test]
fn mismatch_on_unnamed_parameter() {
    let location = MismatchLocation::Parameter {
        index: 3,
        name: None,
    };
    assert_eq!(location.to_string(), "parameter 3");
}

#[test]
fn return_mismatch_is_structured() {
    let err = type_mismatch("area", MismatchLocation::ReturnValue, "number", "null");
    let mismatch = err.as_type_mismatch();
    assert_eq!(
        mismatch.map(|m| (m.location.clone(), m.expected.as_str(), m.got.as_str())),
        Some((MismatchLocation::ReturnValue, "number", "null"))
    );
}

#[test]
fn custom_errors_are_not_mismatches() {
    let err = custom("boom");
    assert!(!err.is_type_mismatch());
    assert_eq!(err.to_string(), "boom");
    assert_eq!(
        err.kind,
        EvalErrorKind::Custom {
            message: "boom".into()
        }
    );
}
