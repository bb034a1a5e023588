use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// The persisted record, shared with the storage layer unchanged.
pub use models::character::Model as Character;

pub const MAX_NAME_LEN: usize = 128;

/// Create input. `character_value` is never accepted from callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCharacterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character_code: i64,
    #[serde(default)]
    pub character_power: i64,
}

/// Update input. The code is fixed at creation and cannot be changed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCharacterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character_power: i64,
}

/// A single field constraint: `check` must hold or the input is rejected
/// with `"<field>: <message>"`.
pub struct FieldRule<T> {
    pub field: &'static str,
    pub check: fn(&T) -> bool,
    pub message: &'static str,
}

/// Evaluate rules in order and stop at the first violation.
pub fn validate<T>(input: &T, rules: &[FieldRule<T>]) -> Result<(), ServiceError> {
    match rules.iter().find(|rule| !(rule.check)(input)) {
        Some(rule) => Err(ServiceError::invalid(rule.field, rule.message)),
        None => Ok(()),
    }
}

fn name_present(name: &str) -> bool { !name.is_empty() }

fn name_within_limit(name: &str) -> bool { name.chars().count() <= MAX_NAME_LEN }

pub const CREATE_RULES: &[FieldRule<CreateCharacterRequest>] = &[
    FieldRule { field: "name", check: |r| name_present(&r.name), message: "cannot be blank" },
    FieldRule { field: "name", check: |r| name_within_limit(&r.name), message: "the length must be no more than 128" },
];

pub const UPDATE_RULES: &[FieldRule<UpdateCharacterRequest>] = &[
    FieldRule { field: "name", check: |r| name_present(&r.name), message: "cannot be blank" },
    FieldRule { field: "name", check: |r| name_within_limit(&r.name), message: "the length must be no more than 128" },
];

impl CreateCharacterRequest {
    pub fn validate(&self) -> Result<(), ServiceError> { validate(self, CREATE_RULES) }
}

impl UpdateCharacterRequest {
    pub fn validate(&self) -> Result<(), ServiceError> { validate(self, UPDATE_RULES) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_validation() {
        let cases = [
            ("success", CreateCharacterRequest { name: "test".into(), character_code: 1, character_power: 100 }, false),
            ("required", CreateCharacterRequest { name: "".into(), character_code: 1, character_power: 100 }, true),
            ("too long", CreateCharacterRequest { name: "x".repeat(129), ..Default::default() }, true),
            ("at limit", CreateCharacterRequest { name: "x".repeat(128), ..Default::default() }, false),
        ];
        for (label, req, want_err) in cases {
            assert_eq!(req.validate().is_err(), want_err, "{label}");
        }
    }

    #[test]
    fn update_request_validation() {
        assert!(UpdateCharacterRequest { name: "test".into(), character_power: 0 }.validate().is_ok());
        assert!(UpdateCharacterRequest { name: "".into(), character_power: 0 }.validate().is_err());
        assert!(UpdateCharacterRequest { name: "y".repeat(130), character_power: 0 }.validate().is_err());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let req = UpdateCharacterRequest { name: "é".repeat(128), character_power: 0 };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn error_names_the_field() {
        let err = CreateCharacterRequest::default().validate().unwrap_err();
        match err {
            ServiceError::Validation(msg) => assert_eq!(msg, "name: cannot be blank"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn value_is_not_read_from_request_body() {
        let req: CreateCharacterRequest =
            serde_json::from_str(r#"{"name":"Gandalf","character_code":1,"character_power":100,"character_value":9999}"#).unwrap();
        assert_eq!(req.name, "Gandalf");
        assert_eq!(req.character_power, 100);
    }

    #[test]
    fn omitted_numbers_default_to_zero() {
        let req: UpdateCharacterRequest = serde_json::from_str(r#"{"name":"Frodo"}"#).unwrap();
        assert_eq!(req.character_power, 0);
    }
}
