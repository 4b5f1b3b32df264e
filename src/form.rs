//! Customization form state
//!
//! Holds the canonical customization fields and the validation results derived
//! from them. Widgets never write here directly; they describe a change as a
//! [`FieldChange`] and the owner applies it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of characters accepted in the custom text field
pub const MAX_CUSTOM_TEXT_CHARS: usize = 100;

/// Number of rows shown for the custom text area and printed on the shirt
pub const CUSTOM_TEXT_LINES: usize = 3;

/// Largest value the numeric inputs accept while typing
pub const MAX_MEASUREMENT: u32 = 9999;

/// Body build selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Build {
    Slim,
    #[default]
    Athletic,
    Regular,
    Large,
}

impl Build {
    pub fn name(&self) -> &'static str {
        match self {
            Build::Slim => "slim",
            Build::Athletic => "athletic",
            Build::Regular => "regular",
            Build::Large => "large",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Build::Slim => "Slim",
            Build::Athletic => "Athletic",
            Build::Regular => "Regular",
            Build::Large => "Large",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Build::Slim => Build::Athletic,
            Build::Athletic => Build::Regular,
            Build::Regular => Build::Large,
            Build::Large => Build::Slim,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Build::Slim => Build::Large,
            Build::Athletic => Build::Slim,
            Build::Regular => Build::Athletic,
            Build::Large => Build::Regular,
        }
    }
}

/// The user's customization choices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationData {
    /// Height in centimetres
    pub height: u32,
    /// Weight in kilograms
    pub weight: u32,
    pub build: Build,
    pub custom_text: String,
}

impl Default for CustomizationData {
    fn default() -> Self {
        Self {
            height: 180,
            weight: 80,
            build: Build::Athletic,
            custom_text: String::new(),
        }
    }
}

/// Identifies a single form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Height,
    Weight,
    Build,
    CustomText,
}

impl FormField {
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Height => "height",
            FormField::Weight => "weight",
            FormField::Build => "build",
            FormField::CustomText => "customText",
        }
    }
}

/// Validation failures surfaced next to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Text is too long")]
    TextTooLong,
}

pub type ValidationErrors = BTreeMap<FormField, ValidationError>;

/// A single-field update produced by an input widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Height(u32),
    Weight(u32),
    Build(Build),
    CustomText(String),
}

impl FieldChange {
    pub fn field(&self) -> FormField {
        match self {
            FieldChange::Height(_) => FormField::Height,
            FieldChange::Weight(_) => FormField::Weight,
            FieldChange::Build(_) => FormField::Build,
            FieldChange::CustomText(_) => FormField::CustomText,
        }
    }
}

/// Compute the validation errors for a set of values
pub fn validate(data: &CustomizationData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if data.custom_text.chars().count() > MAX_CUSTOM_TEXT_CHARS {
        errors.insert(FormField::CustomText, ValidationError::TextTooLong);
    }
    errors
}

/// Canonical form values plus their derived validation errors
#[derive(Debug, Clone, Default)]
pub struct FormState {
    data: CustomizationData,
    errors: ValidationErrors,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &CustomizationData {
        &self.data
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, field: FormField) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Apply a single-field change and revalidate.
    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::Height(v) => self.data.height = v,
            FieldChange::Weight(v) => self.data.weight = v,
            FieldChange::Build(b) => self.data.build = b,
            FieldChange::CustomText(text) => self.data.custom_text = text,
        }
        self.errors = validate(&self.data);
    }

    /// Immutable copy of the current values, taken at submit time
    pub fn snapshot(&self) -> CustomizationData {
        self.data.clone()
    }
}

/// Append a typed digit to a numeric value, ignoring input that would overflow the field.
pub fn push_digit(value: u32, digit: u32) -> u32 {
    value
        .checked_mul(10)
        .and_then(|v| v.checked_add(digit))
        .filter(|v| *v <= MAX_MEASUREMENT)
        .unwrap_or(value)
}

/// Remove the last typed digit from a numeric value.
pub fn pop_digit(value: u32) -> u32 {
    value / 10
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let form = FormState::new();
        assert_eq!(form.data().height, 180);
        assert_eq!(form.data().weight, 80);
        assert_eq!(form.data().build, Build::Athletic);
        assert!(form.data().custom_text.is_empty());
        assert!(!form.has_errors());
    }

    #[test]
    fn test_text_length_boundary() {
        let mut form = FormState::new();
        form.apply(FieldChange::CustomText("A".repeat(100)));
        assert_eq!(form.error_for(FormField::CustomText), None);

        form.apply(FieldChange::CustomText("A".repeat(101)));
        assert_eq!(
            form.error_for(FormField::CustomText),
            Some(ValidationError::TextTooLong)
        );

        form.apply(FieldChange::CustomText("short".to_string()));
        assert!(!form.has_errors());
    }

    #[test]
    fn test_text_length_counts_characters() {
        let mut form = FormState::new();
        form.apply(FieldChange::CustomText("é".repeat(100)));
        assert!(!form.has_errors());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(ValidationError::TextTooLong.to_string(), "Text is too long");
    }

    #[test]
    fn test_field_names_match_payload_keys() {
        let json = serde_json::to_value(CustomizationData::default()).unwrap();
        for field in [
            FormField::Height,
            FormField::Weight,
            FormField::Build,
            FormField::CustomText,
        ] {
            assert!(json.get(field.name()).is_some(), "{}", field.name());
        }
    }

    #[test]
    fn test_snapshot_serializes_like_form_payload() {
        let data = CustomizationData {
            height: 190,
            weight: 90,
            build: Build::Slim,
            custom_text: "HELLO".to_string(),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "height": 190,
                "weight": 90,
                "build": "slim",
                "customText": "HELLO"
            })
        );
    }

    #[test]
    fn test_build_cycling() {
        let build = Build::Large;
        assert_eq!(build.next(), Build::Slim);
        assert_eq!(Build::Slim.prev(), Build::Large);
        assert_eq!(Build::Athletic.next().prev(), Build::Athletic);
    }

    #[test]
    fn test_digit_editing() {
        assert_eq!(push_digit(18, 5), 185);
        assert_eq!(push_digit(0, 7), 7);
        assert_eq!(push_digit(9999, 1), 9999);
        assert_eq!(pop_digit(185), 18);
        assert_eq!(pop_digit(7), 0);
    }

    fn arb_change() -> impl Strategy<Value = FieldChange> {
        prop_oneof![
            (0u32..400).prop_map(FieldChange::Height),
            (0u32..400).prop_map(FieldChange::Weight),
            prop_oneof![
                Just(Build::Slim),
                Just(Build::Athletic),
                Just(Build::Regular),
                Just(Build::Large),
            ]
            .prop_map(FieldChange::Build),
        ]
    }

    proptest! {
        #[test]
        fn prop_change_touches_only_its_field(change in arb_change()) {
            let mut form = FormState::new();
            let before = form.snapshot();
            let field = change.field();
            form.apply(change);
            let after = form.snapshot();

            if field != FormField::Height {
                prop_assert_eq!(after.height, before.height);
            }
            if field != FormField::Weight {
                prop_assert_eq!(after.weight, before.weight);
            }
            if field != FormField::Build {
                prop_assert_eq!(after.build, before.build);
            }
            prop_assert_eq!(after.custom_text, before.custom_text);
        }
    }
}
