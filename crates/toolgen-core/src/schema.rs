//! Declarative field table for the tool generator form.
//!
//! Every rule the form enforces lives here, independent of how the form is
//! rendered: each field's semantic kind, whether it is required, its default,
//! and for choice/set fields the closed list of values the service accepts.
//! Raw control values always arrive as strings; [`coerce`] turns them into
//! typed [`FieldValue`]s and [`validate`] checks those against the table.

use std::fmt;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    ToolName,
    Description,
    Language,
    Frameworks,
    InputType,
    OutputType,
    AdditionalFeatures,
    IncludeComments,
    CodeStyle,
}

impl FieldId {
    /// Declaration order. Violations are reported in this order.
    pub const ALL: [FieldId; 9] = [
        Self::ToolName,
        Self::Description,
        Self::Language,
        Self::Frameworks,
        Self::InputType,
        Self::OutputType,
        Self::AdditionalFeatures,
        Self::IncludeComments,
        Self::CodeStyle,
    ];

    /// Wire name, identical to the JSON key in the request body.
    pub fn key(self) -> &'static str {
        match self {
            Self::ToolName => "toolName",
            Self::Description => "description",
            Self::Language => "language",
            Self::Frameworks => "frameworks",
            Self::InputType => "inputType",
            Self::OutputType => "outputType",
            Self::AdditionalFeatures => "additionalFeatures",
            Self::IncludeComments => "includeComments",
            Self::CodeStyle => "codeStyle",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|id| *id == self)
            .unwrap_or_default()
    }

    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_SPECS[self.index()]
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Exactly one value out of `options`.
    Choice,
    /// Any number of distinct values out of `options`.
    Set,
    /// Boolean checkbox.
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    pub help: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Raw default; sets use a comma-separated list, flags `"true"`/`"false"`.
    pub default: &'static str,
    pub options: &'static [FieldOption],
    pub required_message: &'static str,
    /// Used in "Unsupported <noun> 'x'" messages.
    pub noun: &'static str,
}

impl FieldSpec {
    pub fn allows(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    pub fn option_label(&self, value: &str) -> Option<&'static str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label)
    }

    pub fn is_set(&self) -> bool {
        self.kind == FieldKind::Set
    }
}

pub const LANGUAGE_OPTIONS: &[FieldOption] = &[
    FieldOption {
        value: "python",
        label: "Python",
    },
    FieldOption {
        value: "javascript",
        label: "JavaScript",
    },
    FieldOption {
        value: "java",
        label: "Java",
    },
    FieldOption {
        value: "csharp",
        label: "C#",
    },
];

pub const FRAMEWORK_OPTIONS: &[FieldOption] = &[
    FieldOption {
        value: "react",
        label: "React",
    },
    FieldOption {
        value: "vue",
        label: "Vue",
    },
    FieldOption {
        value: "angular",
        label: "Angular",
    },
    FieldOption {
        value: "express",
        label: "Express",
    },
    FieldOption {
        value: "django",
        label: "Django",
    },
    FieldOption {
        value: "flask",
        label: "Flask",
    },
    FieldOption {
        value: "fastapi",
        label: "FastAPI",
    },
    FieldOption {
        value: "spring",
        label: "Spring",
    },
    FieldOption {
        value: "dotnet",
        label: ".NET",
    },
];

pub const DATA_TYPE_OPTIONS: &[FieldOption] = &[
    FieldOption {
        value: "text",
        label: "Text",
    },
    FieldOption {
        value: "json",
        label: "JSON",
    },
    FieldOption {
        value: "csv",
        label: "CSV",
    },
    FieldOption {
        value: "xml",
        label: "XML",
    },
    FieldOption {
        value: "file",
        label: "File",
    },
    FieldOption {
        value: "number",
        label: "Number",
    },
];

pub const FEATURE_OPTIONS: &[FieldOption] = &[
    FieldOption {
        value: "logging",
        label: "Logging",
    },
    FieldOption {
        value: "error-handling",
        label: "Error handling",
    },
    FieldOption {
        value: "unit-tests",
        label: "Unit tests",
    },
    FieldOption {
        value: "cli",
        label: "Command-line interface",
    },
    FieldOption {
        value: "config-file",
        label: "Config file",
    },
    FieldOption {
        value: "docs",
        label: "Documentation",
    },
];

pub const CODE_STYLE_OPTIONS: &[FieldOption] = &[
    FieldOption {
        value: "standard",
        label: "Standard",
    },
    FieldOption {
        value: "compact",
        label: "Compact",
    },
    FieldOption {
        value: "verbose",
        label: "Verbose",
    },
];

const FIELD_SPECS: [FieldSpec; 9] = [
    FieldSpec {
        id: FieldId::ToolName,
        label: "Tool Name",
        help: "Enter a unique name for your tool",
        kind: FieldKind::Text,
        required: true,
        default: "",
        options: &[],
        required_message: "Tool name is required",
        noun: "tool name",
    },
    FieldSpec {
        id: FieldId::Description,
        label: "Description",
        help: "Provide a brief description of your tool's functionality",
        kind: FieldKind::Text,
        required: true,
        default: "",
        options: &[],
        required_message: "Description is required",
        noun: "description",
    },
    FieldSpec {
        id: FieldId::Language,
        label: "Primary Programming Language",
        help: "Choose the main programming language for your tool",
        kind: FieldKind::Choice,
        required: true,
        default: "",
        options: LANGUAGE_OPTIONS,
        required_message: "Language is required",
        noun: "language",
    },
    FieldSpec {
        id: FieldId::Frameworks,
        label: "Frameworks",
        help: "List any frameworks or libraries your tool will use",
        kind: FieldKind::Set,
        required: true,
        default: "",
        options: FRAMEWORK_OPTIONS,
        required_message: "Select at least one framework",
        noun: "framework",
    },
    FieldSpec {
        id: FieldId::InputType,
        label: "Input Type",
        help: "Describe the type of input your tool will accept",
        kind: FieldKind::Choice,
        required: true,
        default: "",
        options: DATA_TYPE_OPTIONS,
        required_message: "Input type is required",
        noun: "input type",
    },
    FieldSpec {
        id: FieldId::OutputType,
        label: "Output Type",
        help: "Describe the type of output your tool will produce",
        kind: FieldKind::Choice,
        required: true,
        default: "",
        options: DATA_TYPE_OPTIONS,
        required_message: "Output type is required",
        noun: "output type",
    },
    FieldSpec {
        id: FieldId::AdditionalFeatures,
        label: "Additional Features",
        help: "Specify any extra features or requirements for your tool",
        kind: FieldKind::Set,
        required: false,
        default: "",
        options: FEATURE_OPTIONS,
        required_message: "",
        noun: "feature",
    },
    FieldSpec {
        id: FieldId::IncludeComments,
        label: "Include Comments",
        help: "Annotate the generated code with explanatory comments",
        kind: FieldKind::Flag,
        required: false,
        default: "false",
        options: &[],
        required_message: "",
        noun: "comment preference",
    },
    FieldSpec {
        id: FieldId::CodeStyle,
        label: "Code Style",
        help: "Pick how terse or verbose the generated code should be",
        kind: FieldKind::Choice,
        required: true,
        default: "standard",
        options: CODE_STYLE_OPTIONS,
        required_message: "Code style is required",
        noun: "code style",
    },
];

pub fn fields() -> &'static [FieldSpec] {
    &FIELD_SPECS
}

/// Typed value of a field after boundary coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Set(Vec<String>),
    Flag(bool),
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Some(false),
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Splits a comma-separated list, trimming items and dropping empties and
/// repeats. First occurrence wins.
pub fn split_set(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in raw.split(',') {
        let item = item.trim();
        if item.is_empty() || out.iter().any(|existing| existing == item) {
            continue;
        }
        out.push(item.to_string());
    }
    out
}

/// Turns the raw string a UI control produced into a typed value.
pub fn coerce(field: FieldId, raw: &str) -> Result<FieldValue, ValidationError> {
    let spec = field.spec();
    match spec.kind {
        FieldKind::Text => Ok(FieldValue::Text(raw.trim().to_string())),
        FieldKind::Choice => {
            let raw = raw.trim();
            let raw = if raw.is_empty() { spec.default } else { raw };
            Ok(FieldValue::Text(raw.to_ascii_lowercase()))
        }
        FieldKind::Set => Ok(FieldValue::Set(
            split_set(raw)
                .into_iter()
                .map(|item| item.to_ascii_lowercase())
                .fold(Vec::new(), |mut acc, item| {
                    if !acc.contains(&item) {
                        acc.push(item);
                    }
                    acc
                }),
        )),
        FieldKind::Flag => parse_flag(raw).map(FieldValue::Flag).ok_or_else(|| {
            ValidationError::new(field, format!("{} must be true or false", spec.label))
        }),
    }
}

/// Checks a coerced value against the field's rules.
pub fn validate(field: FieldId, value: &FieldValue) -> Result<(), ValidationError> {
    let spec = field.spec();
    match (spec.kind, value) {
        (FieldKind::Text, FieldValue::Text(text)) => {
            if spec.required && text.trim().is_empty() {
                return Err(ValidationError::new(field, spec.required_message));
            }
            Ok(())
        }
        (FieldKind::Choice, FieldValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                if spec.required {
                    return Err(ValidationError::new(field, spec.required_message));
                }
                return Ok(());
            }
            if !spec.allows(text) {
                return Err(unsupported(spec, text));
            }
            Ok(())
        }
        (FieldKind::Set, FieldValue::Set(items)) => {
            if spec.required && items.is_empty() {
                return Err(ValidationError::new(field, spec.required_message));
            }
            for (idx, item) in items.iter().enumerate() {
                if items[..idx].contains(item) {
                    return Err(ValidationError::new(
                        field,
                        format!("Duplicate {} '{}'", spec.noun, item),
                    ));
                }
                if !spec.allows(item) {
                    return Err(unsupported(spec, item));
                }
            }
            Ok(())
        }
        (FieldKind::Flag, FieldValue::Flag(_)) => Ok(()),
        _ => Err(ValidationError::new(
            field,
            format!("Invalid value for {}", spec.label),
        )),
    }
}

fn unsupported(spec: &FieldSpec, value: &str) -> ValidationError {
    ValidationError::new(spec.id, format!("Unsupported {} '{}'", spec.noun, value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn field_table_follows_declaration_order() {
        let keys: Vec<&'static str> = fields().iter().map(|spec| spec.id.key()).collect();
        assert_eq!(
            keys,
            vec![
                "toolName",
                "description",
                "language",
                "frameworks",
                "inputType",
                "outputType",
                "additionalFeatures",
                "includeComments",
                "codeStyle",
            ]
        );
        for id in FieldId::ALL {
            assert_eq!(id.spec().id, id);
        }
    }

    #[test]
    fn required_text_rejects_empty_and_whitespace() {
        for raw in ["", "   ", "\t\n"] {
            let value = coerce(FieldId::ToolName, raw).expect("text always coerces");
            let err = validate(FieldId::ToolName, &value).expect_err("blank name");
            assert_eq!(err.message, "Tool name is required");
            assert_eq!(err.field, FieldId::ToolName);
        }
    }

    #[test]
    fn blank_choice_takes_the_default_when_one_exists() {
        assert_eq!(
            coerce(FieldId::CodeStyle, " "),
            Ok(FieldValue::Text("standard".to_string()))
        );
        let language = coerce(FieldId::Language, "").expect("choice coerces");
        assert!(validate(FieldId::Language, &language).is_err());
    }

    #[test]
    fn empty_set_is_invalid_only_for_frameworks() {
        let empty = FieldValue::Set(Vec::new());
        assert!(validate(FieldId::Frameworks, &empty).is_err());
        assert!(validate(FieldId::AdditionalFeatures, &empty).is_ok());
    }

    #[test]
    fn choice_outside_options_is_rejected() {
        let value = coerce(FieldId::Language, "COBOL").expect("choice coerces");
        let err = validate(FieldId::Language, &value).expect_err("unsupported");
        assert_eq!(err.message, "Unsupported language 'cobol'");

        let value = coerce(FieldId::Language, " Python ").expect("choice coerces");
        assert_eq!(value, FieldValue::Text("python".to_string()));
        assert!(validate(FieldId::Language, &value).is_ok());
    }

    #[test]
    fn flag_coercion_accepts_common_spellings() {
        for (raw, expected) in [
            ("", false),
            ("true", true),
            ("ON", true),
            ("1", true),
            ("no", false),
            ("off", false),
        ] {
            assert_eq!(
                coerce(FieldId::IncludeComments, raw),
                Ok(FieldValue::Flag(expected)),
                "raw {raw:?}"
            );
        }
        assert!(coerce(FieldId::IncludeComments, "maybe").is_err());
    }

    #[test]
    fn set_coercion_splits_trims_and_dedups() {
        let value = coerce(FieldId::Frameworks, " Flask, react ,flask,, ").expect("set");
        assert_eq!(
            value,
            FieldValue::Set(vec!["flask".to_string(), "react".to_string()])
        );
    }

    #[test]
    fn set_with_unknown_entry_names_that_entry() {
        let value = FieldValue::Set(vec!["react".to_string(), "rails".to_string()]);
        let err = validate(FieldId::Frameworks, &value).expect_err("rails not offered");
        assert_eq!(err.message, "Unsupported framework 'rails'");
    }

    #[test]
    fn kind_mismatch_is_reported_not_panicked() {
        let err = validate(FieldId::ToolName, &FieldValue::Flag(true)).expect_err("mismatch");
        assert_eq!(err.field, FieldId::ToolName);
    }
}
