use crate::tree::NodeId;
use thiserror::Error;

/// Errors that can occur while loading a schema or resolving paths inside it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Failed to parse schema JSON: {0}")]
    JsonParseError(String),

    #[error("Failed to read schema file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("No list-valued parameter matches the schema path '{path}'")]
    SchemaPathNotFound { path: String },

    #[error("Parameter '{parameter}' refers to undeclared enumeration type '{type_name}'")]
    UnknownEnumType {
        parameter: String,
        type_name: String,
    },

    #[error("Enumeration type '{0}' is declared more than once")]
    DuplicateEnumType(String),

    #[error("Enumeration type '{enum_type}' declares the option {kind} '{value}' more than once")]
    DuplicateEnumOption {
        enum_type: String,
        kind: &'static str,
        value: String,
    },

    #[error("Parameter name '{name}' must not contain '.'")]
    InvalidParameterName { name: String },
}

/// Errors raised when a raw edited value cannot be turned into a schema-typed value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("Invalid integer value '{value}'")]
    InvalidInteger { value: String },

    #[error("Invalid float value '{value}'")]
    InvalidFloat { value: String },

    #[error("Invalid boolean value '{value}', expected 'true' or 'false'")]
    InvalidBoolean { value: String },

    #[error("Label '{label}' has no matching option in enumeration '{enum_type}'")]
    UnknownLabel { enum_type: String, label: String },

    #[error("Enumeration type '{0}' is not declared in the schema")]
    UnknownEnumType(String),
}

/// A coercion failure attached to the field that produced it.
///
/// Dehydration collects these instead of stopping at the first bad field, so the
/// host can re-prompt the user without losing unrelated edits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Field '{path}': {reason}")]
pub struct FieldCoercionError {
    pub node: NodeId,
    pub field: String,
    /// Dotted location of the field, e.g. `routes.1.path`.
    pub path: String,
    #[source]
    pub reason: CoercionError,
}

/// Errors that can occur while a session mutates or inspects its node tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Node {0} does not exist in this tree")]
    NodeNotFound(NodeId),

    #[error("Node {id} is not a {expected} node")]
    UnexpectedNodeKind { id: NodeId, expected: &'static str },

    #[error("The root group cannot be deleted")]
    RootGroupNotDeletable,

    #[error("The root list holds exactly one group and cannot be extended")]
    RootListNotExtendable,

    #[error("The session is read-only")]
    ReadOnly,

    #[error("Field '{field}' is read-only")]
    ReadOnlyField { field: String },

    #[error("Path '{0}' does not resolve to a node")]
    PathNotFound(String),
}
