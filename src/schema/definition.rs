use serde::{Deserialize, Serialize};

/// The complete, canonical definition of an editable document shape.
///
/// The JSON form also accepts the legacy editor field names
/// (`option_types`, `option_name`) as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub parameters: Vec<Parameter>,
    #[serde(default, alias = "option_types")]
    pub enum_types: Vec<EnumType>,
}

/// One field declaration, either scalar or list-valued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub readonly: bool,
}

impl Parameter {
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            kind: ParameterType::Scalar(kind),
            default_value: None,
            readonly: false,
        }
    }

    pub fn list(name: impl Into<String>, children: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            kind: ParameterType::List(children),
            default_value: None,
            readonly: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_default(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// The label shown to users, falling back to the parameter name.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Child parameters when this parameter is list-valued.
    pub fn children(&self) -> Option<&[Parameter]> {
        match &self.kind {
            ParameterType::List(children) => Some(children),
            ParameterType::Scalar(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, ParameterType::List(_))
    }
}

/// The `type` of a parameter: a scalar kind or a nested parameter sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawParameterType", into = "RawParameterType")]
pub enum ParameterType {
    Scalar(ScalarKind),
    List(Vec<Parameter>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Cron,
    /// A reference to a declared [`EnumType`] by name.
    Enumeration(String),
}

impl ScalarKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "string" => ScalarKind::String,
            "integer" => ScalarKind::Integer,
            "float" => ScalarKind::Float,
            "boolean" => ScalarKind::Boolean,
            "date" => ScalarKind::Date,
            "cron" => ScalarKind::Cron,
            other => ScalarKind::Enumeration(other.to_string()),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Date => "date",
            ScalarKind::Cron => "cron",
            ScalarKind::Enumeration(name) => name,
        }
    }
}

/// Wire representation: a type name string or an array of child parameters.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawParameterType {
    Children(Vec<Parameter>),
    Name(String),
}

impl From<RawParameterType> for ParameterType {
    fn from(raw: RawParameterType) -> Self {
        match raw {
            RawParameterType::Children(children) => ParameterType::List(children),
            RawParameterType::Name(name) => ParameterType::Scalar(ScalarKind::from_type_name(&name)),
        }
    }
}

impl From<ParameterType> for RawParameterType {
    fn from(kind: ParameterType) -> Self {
        match kind {
            ParameterType::List(children) => RawParameterType::Children(children),
            ParameterType::Scalar(scalar) => RawParameterType::Name(scalar.type_name().to_string()),
        }
    }
}

/// A named catalog of selectable options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    #[serde(alias = "option_name")]
    pub name: String,
    #[serde(default)]
    pub multiselect: bool,
    pub options: Vec<EnumOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub id: String,
    pub label: String,
}

impl EnumOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
