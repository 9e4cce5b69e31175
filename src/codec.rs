//! Conversion between raw edited values and schema-typed instance values.
//!
//! Every scalar field keeps its value as the string a control would show. The
//! codec turns instance values into that string when a tree is hydrated and
//! turns the string back into a typed value when the tree is dehydrated.

use crate::error::CoercionError;
use crate::schema::{ScalarKind, SchemaIndex};
use itertools::Itertools;
use serde_json::{Number, Value};

/// Cron expression shown for cron fields that have no value yet.
pub const DEFAULT_CRON: &str = "0 * * * *";

/// Single-valued enumerations with more options than this are edited by label
/// instead of being picked from a list of ids.
pub const DEFAULT_AUTOCOMPLETE_THRESHOLD: usize = 10;

/// The scalar kind of a field node, with enumeration details resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Cron,
    Enumeration { enum_type: String, multiselect: bool },
}

impl FieldKind {
    pub fn resolve(kind: &ScalarKind, index: &SchemaIndex) -> Self {
        match kind {
            ScalarKind::String => FieldKind::String,
            ScalarKind::Integer => FieldKind::Integer,
            ScalarKind::Float => FieldKind::Float,
            ScalarKind::Boolean => FieldKind::Boolean,
            ScalarKind::Date => FieldKind::Date,
            ScalarKind::Cron => FieldKind::Cron,
            ScalarKind::Enumeration(name) => FieldKind::Enumeration {
                enum_type: name.clone(),
                multiselect: index.is_multiselect(name),
            },
        }
    }

    /// Raw value of a field that has neither data nor a declared default.
    pub fn empty_raw(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "false",
            FieldKind::Cron => DEFAULT_CRON,
            _ => "",
        }
    }

    /// Instance value matching [`FieldKind::empty_raw`] after dehydration.
    pub fn empty_value(&self) -> Value {
        match self {
            FieldKind::Boolean => Value::Bool(false),
            other => Value::String(other.empty_raw().to_string()),
        }
    }
}

/// How a control presents an enumeration value: by option id or by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationMode {
    #[default]
    Id,
    Label,
}

impl PresentationMode {
    pub fn for_kind(kind: &FieldKind, index: &SchemaIndex, threshold: usize) -> Self {
        match kind {
            FieldKind::Enumeration {
                enum_type,
                multiselect: false,
            } => match index.options_for(enum_type) {
                Ok(options) if options.len() > threshold => PresentationMode::Label,
                _ => PresentationMode::Id,
            },
            _ => PresentationMode::Id,
        }
    }
}

/// Converts values in both directions for one schema.
pub struct FieldCodec<'a> {
    index: &'a SchemaIndex,
}

impl<'a> FieldCodec<'a> {
    pub fn new(index: &'a SchemaIndex) -> Self {
        Self { index }
    }

    /// Instance value to raw display string. Returns `None` when the value is
    /// absent or empty so the caller can fall back to a default.
    pub fn to_raw(&self, kind: &FieldKind, mode: PresentationMode, value: &Value) -> Option<String> {
        match (kind, value) {
            (_, Value::Null) => None,
            (_, Value::String(s)) if s.is_empty() => None,
            (FieldKind::Enumeration { multiselect: true, .. }, Value::Array(ids)) => {
                let joined = ids.iter().filter_map(scalar_text).join(",");
                (!joined.is_empty()).then_some(joined)
            }
            (FieldKind::Enumeration { enum_type, .. }, value) if mode == PresentationMode::Label => {
                let id = scalar_text(value)?;
                match self.index.label_for_id(enum_type, &id) {
                    Some(label) => Some(label.to_string()),
                    None => {
                        tracing::warn!(%enum_type, %id, "option id has no label; showing the id");
                        Some(id)
                    }
                }
            }
            (_, value) => scalar_text(value),
        }
    }

    /// Normalizes a declared `default_value` to the raw text a field starts with
    /// and the instance value saving that text produces.
    ///
    /// Returns `None` for empty defaults and for defaults that do not coerce to
    /// the field's kind, so callers fall back to the kind's empty value.
    pub fn normalize_default(
        &self,
        kind: &FieldKind,
        mode: PresentationMode,
        default: &Value,
    ) -> Option<(String, Value)> {
        let raw = self.to_raw(kind, mode, default)?;
        match self.to_value(kind, mode, &raw) {
            Ok(value) => Some((raw, value)),
            Err(reason) => {
                tracing::warn!(%default, %reason, "declared default does not fit its field; ignoring it");
                None
            }
        }
    }

    /// Raw display string to instance value.
    pub fn to_value(
        &self,
        kind: &FieldKind,
        mode: PresentationMode,
        raw: &str,
    ) -> Result<Value, CoercionError> {
        match kind {
            FieldKind::String | FieldKind::Date | FieldKind::Cron => Ok(Value::String(raw.to_string())),
            FieldKind::Integer => parse_integer(raw),
            FieldKind::Float => parse_float(raw),
            FieldKind::Boolean => parse_bool(raw),
            FieldKind::Enumeration { .. } if raw.is_empty() => Ok(Value::String(String::new())),
            FieldKind::Enumeration {
                enum_type,
                multiselect: false,
            } if mode == PresentationMode::Label => self
                .index
                .id_for_label(enum_type, raw)
                .map(|id| Value::String(id.to_string())),
            FieldKind::Enumeration { .. } => Ok(Value::String(raw.to_string())),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            tracing::warn!(value = %other, "structured value in a scalar field; keeping its JSON text");
            Some(other.to_string())
        }
    }
}

fn parse_integer(raw: &str) -> Result<Value, CoercionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::String(String::new()));
    }
    trimmed
        .parse::<i64>()
        .map(Value::from)
        .map_err(|_| CoercionError::InvalidInteger {
            value: raw.to_string(),
        })
}

fn parse_float(raw: &str) -> Result<Value, CoercionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::String(String::new()));
    }
    // Integral text stays integral so `2` does not come back as `2.0`.
    if let Ok(whole) = trimmed.parse::<i64>() {
        return Ok(Value::from(whole));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| CoercionError::InvalidFloat {
            value: raw.to_string(),
        })
}

fn parse_bool(raw: &str) -> Result<Value, CoercionError> {
    match raw.trim() {
        "true" => Ok(Value::Bool(true)),
        "false" | "" => Ok(Value::Bool(false)),
        _ => Err(CoercionError::InvalidBoolean {
            value: raw.to_string(),
        }),
    }
}
