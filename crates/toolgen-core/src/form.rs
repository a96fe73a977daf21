//! Live, uncommitted form values and the single place a [`ToolSpec`] is built.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::FormError;
use crate::error::ValidationError;
use crate::schema::coerce;
use crate::schema::fields;
use crate::schema::split_set;
use crate::schema::validate;
use crate::schema::FieldId;
use crate::schema::FieldKind;
use crate::schema::FieldValue;
use crate::tool_spec::CodeStyle;
use crate::tool_spec::ToolSpec;

/// Scalars hold the raw string from the control, untouched until
/// [`FormController::validate_and_build`] coerces them. Sets hold normalized
/// entries in insertion order and never contain duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormController {
    scalars: BTreeMap<FieldId, String>,
    sets: BTreeMap<FieldId, Vec<String>>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        let mut scalars = BTreeMap::new();
        let mut sets = BTreeMap::new();
        for spec in fields() {
            if spec.is_set() {
                sets.insert(spec.id, normalized_set(spec.default));
            } else {
                scalars.insert(spec.id, spec.default.to_string());
            }
        }
        Self { scalars, sets }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn set_field(&mut self, field: FieldId, value: impl Into<String>) -> Result<(), FormError> {
        if field.spec().is_set() {
            return Err(FormError::NotScalar(field));
        }
        self.scalars.insert(field, value.into());
        Ok(())
    }

    pub fn set_flag(&mut self, field: FieldId, value: bool) -> Result<(), FormError> {
        if field.spec().kind != FieldKind::Flag {
            return Err(FormError::NotScalar(field));
        }
        self.set_field(field, if value { "true" } else { "false" })
    }

    /// Adds `value` to a set field. Returns `Ok(false)` when the value was
    /// already present or blank.
    pub fn toggle_set_field(&mut self, field: FieldId, value: &str) -> Result<bool, FormError> {
        let items = self.set_mut(field)?;
        let Some(item) = normalize_item(value) else {
            return Ok(false);
        };
        if items.contains(&item) {
            return Ok(false);
        }
        items.push(item);
        Ok(true)
    }

    pub fn remove_set_value(&mut self, field: FieldId, value: &str) -> Result<bool, FormError> {
        let items = self.set_mut(field)?;
        let Some(item) = normalize_item(value) else {
            return Ok(false);
        };
        let before = items.len();
        items.retain(|existing| *existing != item);
        Ok(items.len() != before)
    }

    pub fn contains(&self, field: FieldId, value: &str) -> bool {
        normalize_item(value).is_some_and(|item| self.set_values(field).contains(&item))
    }

    /// Raw scalar value; `None` for set fields.
    pub fn value(&self, field: FieldId) -> Option<&str> {
        self.scalars.get(&field).map(String::as_str)
    }

    /// Set entries; empty for scalar fields.
    pub fn set_values(&self, field: FieldId) -> &[String] {
        self.sets.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Display form of any field.
    pub fn display_value(&self, field: FieldId) -> String {
        if field.spec().is_set() {
            self.set_values(field).join(", ")
        } else {
            self.value(field).unwrap_or_default().to_string()
        }
    }

    /// Overwrites every field the preset names. Set fields named by the
    /// preset are replaced, not merged.
    pub fn apply_preset(&mut self, preset: &FormPreset) {
        for (field, raw) in preset.entries() {
            if field.spec().is_set() {
                self.sets.insert(field, normalized_set(&raw));
            } else {
                self.scalars.insert(field, raw);
            }
        }
    }

    /// Runs every field through the schema. Reports one violation per
    /// invalid field, in declaration order. Never mutates the form.
    pub fn validate_and_build(&self) -> Result<ToolSpec, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut values: BTreeMap<FieldId, FieldValue> = BTreeMap::new();

        for spec in fields() {
            let coerced = if spec.is_set() {
                Ok(FieldValue::Set(self.set_values(spec.id).to_vec()))
            } else {
                coerce(spec.id, self.value(spec.id).unwrap_or_default())
            };
            match coerced.and_then(|value| validate(spec.id, &value).map(|()| value)) {
                Ok(value) => {
                    values.insert(spec.id, value);
                }
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ToolSpec {
            tool_name: take_text(&mut values, FieldId::ToolName),
            description: take_text(&mut values, FieldId::Description),
            language: take_text(&mut values, FieldId::Language),
            frameworks: take_set(&mut values, FieldId::Frameworks),
            input_type: take_text(&mut values, FieldId::InputType),
            output_type: take_text(&mut values, FieldId::OutputType),
            additional_features: take_set(&mut values, FieldId::AdditionalFeatures),
            include_comments: matches!(
                values.remove(&FieldId::IncludeComments),
                Some(FieldValue::Flag(true))
            ),
            code_style: take_text(&mut values, FieldId::CodeStyle)
                .parse::<CodeStyle>()
                .unwrap_or_default(),
        })
    }

    fn set_mut(&mut self, field: FieldId) -> Result<&mut Vec<String>, FormError> {
        self.sets.get_mut(&field).ok_or(FormError::NotASet(field))
    }
}

fn normalize_item(value: &str) -> Option<String> {
    let item = value.trim().to_ascii_lowercase();
    (!item.is_empty()).then_some(item)
}

fn normalized_set(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in split_set(raw).iter().filter_map(|item| normalize_item(item)) {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn take_text(values: &mut BTreeMap<FieldId, FieldValue>, field: FieldId) -> String {
    match values.remove(&field) {
        Some(FieldValue::Text(text)) => text,
        _ => String::new(),
    }
}

fn take_set(values: &mut BTreeMap<FieldId, FieldValue>, field: FieldId) -> Vec<String> {
    match values.remove(&field) {
        Some(FieldValue::Set(items)) => items,
        _ => Vec::new(),
    }
}

/// A set field written either as a list or as one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PresetList {
    Items(Vec<String>),
    Joined(String),
}

impl PresetList {
    fn to_raw(&self) -> String {
        match self {
            Self::Items(items) => items.join(","),
            Self::Joined(raw) => raw.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PresetFlag {
    Bool(bool),
    Raw(String),
}

/// Partially filled form loaded from a file. Keys follow the wire names;
/// the snake_case spellings are accepted too. Any other key is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FormPreset {
    #[serde(alias = "tool_name")]
    pub tool_name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub frameworks: Option<PresetList>,
    #[serde(alias = "input_type")]
    pub input_type: Option<String>,
    #[serde(alias = "output_type")]
    pub output_type: Option<String>,
    #[serde(alias = "additional_features")]
    pub additional_features: Option<PresetList>,
    #[serde(alias = "include_comments")]
    pub include_comments: Option<PresetFlag>,
    #[serde(alias = "code_style")]
    pub code_style: Option<String>,
}

impl FormPreset {
    fn entries(&self) -> Vec<(FieldId, String)> {
        let mut out = Vec::new();
        let mut push = |field: FieldId, raw: Option<String>| {
            if let Some(raw) = raw {
                out.push((field, raw));
            }
        };
        push(FieldId::ToolName, self.tool_name.clone());
        push(FieldId::Description, self.description.clone());
        push(FieldId::Language, self.language.clone());
        push(
            FieldId::Frameworks,
            self.frameworks.as_ref().map(PresetList::to_raw),
        );
        push(FieldId::InputType, self.input_type.clone());
        push(FieldId::OutputType, self.output_type.clone());
        push(
            FieldId::AdditionalFeatures,
            self.additional_features.as_ref().map(PresetList::to_raw),
        );
        push(
            FieldId::IncludeComments,
            self.include_comments.as_ref().map(|flag| match flag {
                PresetFlag::Bool(value) => value.to_string(),
                PresetFlag::Raw(raw) => raw.clone(),
            }),
        );
        push(FieldId::CodeStyle, self.code_style.clone());
        out
    }
}
