use super::definition::Schema;
use crate::error::SchemaError;
use std::fs;

/// A trait for custom schema models that can be converted into a formwork `Schema`.
///
/// Implement this on your own configuration structs when your schemas are not stored
/// in the JSON layout that [`Schema::from_json`] understands.
///
/// # Example
///
/// ```rust
/// use formwork::error::SchemaError;
/// use formwork::schema::{IntoSchema, Parameter, ScalarKind, Schema};
///
/// struct Columns(Vec<(String, String)>);
///
/// impl IntoSchema for Columns {
///     fn into_schema(self) -> Result<Schema, SchemaError> {
///         let parameters = self
///             .0
///             .into_iter()
///             .map(|(name, ty)| Parameter::scalar(name, ScalarKind::from_type_name(&ty)))
///             .collect();
///         Ok(Schema { parameters, enum_types: vec![] })
///     }
/// }
///
/// let schema = Columns(vec![("port".into(), "integer".into())]).into_schema().unwrap();
/// assert_eq!(schema.parameters.len(), 1);
/// ```
pub trait IntoSchema {
    /// Consumes the object and converts it into a formwork schema.
    fn into_schema(self) -> Result<Schema, SchemaError>;
}

impl IntoSchema for Schema {
    fn into_schema(self) -> Result<Schema, SchemaError> {
        Ok(self)
    }
}

impl IntoSchema for serde_json::Value {
    fn into_schema(self) -> Result<Schema, SchemaError> {
        serde_json::from_value(self).map_err(|e| SchemaError::JsonParseError(e.to_string()))
    }
}

impl Schema {
    /// Parses a schema from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::JsonParseError(e.to_string()))
    }

    /// Loads a schema from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}
