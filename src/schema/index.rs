use super::definition::{EnumOption, EnumType, Parameter, ParameterType, ScalarKind, Schema};
use crate::error::{CoercionError, SchemaError};
use ahash::AHashMap;
use itertools::Itertools;

/// Name given to the top-level list node.
pub const ROOT_LIST_NAME: &str = "root";

/// Separator of dotted node paths. Parameter names may not contain it.
pub const PATH_SEPARATOR: char = '.';

struct IndexedEnum {
    multiselect: bool,
    options: Vec<EnumOption>,
    ids_by_label: AHashMap<String, usize>,
    labels_by_id: AHashMap<String, usize>,
}

/// Lookup tables derived once from a schema's enumeration declarations.
pub struct SchemaIndex {
    enums: AHashMap<String, IndexedEnum>,
}

impl SchemaIndex {
    /// Builds the index and checks the parameter tree: names must be usable as
    /// path segments and every enumeration reference must point at a declared type.
    pub fn new(schema: &Schema) -> Result<Self, SchemaError> {
        let mut enums = AHashMap::with_capacity(schema.enum_types.len());
        for enum_type in &schema.enum_types {
            if enums.contains_key(&enum_type.name) {
                return Err(SchemaError::DuplicateEnumType(enum_type.name.clone()));
            }
            enums.insert(enum_type.name.clone(), Self::index_enum(enum_type)?);
        }

        let index = Self { enums };
        index.check_parameters(&schema.parameters)?;
        Ok(index)
    }

    /// Ids and labels are each unique within one enumeration.
    fn index_enum(enum_type: &EnumType) -> Result<IndexedEnum, SchemaError> {
        let mut ids_by_label = AHashMap::with_capacity(enum_type.options.len());
        let mut labels_by_id = AHashMap::with_capacity(enum_type.options.len());
        for (position, option) in enum_type.options.iter().enumerate() {
            let duplicate = |kind: &'static str, value: &str| SchemaError::DuplicateEnumOption {
                enum_type: enum_type.name.clone(),
                kind,
                value: value.to_string(),
            };
            if labels_by_id.insert(option.id.clone(), position).is_some() {
                return Err(duplicate("id", &option.id));
            }
            if ids_by_label.insert(option.label.clone(), position).is_some() {
                return Err(duplicate("label", &option.label));
            }
        }
        Ok(IndexedEnum {
            multiselect: enum_type.multiselect,
            options: enum_type.options.clone(),
            ids_by_label,
            labels_by_id,
        })
    }

    fn check_parameters(&self, parameters: &[Parameter]) -> Result<(), SchemaError> {
        for parameter in parameters {
            if parameter.name.contains(PATH_SEPARATOR) {
                return Err(SchemaError::InvalidParameterName {
                    name: parameter.name.clone(),
                });
            }
            match &parameter.kind {
                ParameterType::List(children) => self.check_parameters(children)?,
                ParameterType::Scalar(ScalarKind::Enumeration(type_name)) => {
                    if !self.enums.contains_key(type_name) {
                        return Err(SchemaError::UnknownEnumType {
                            parameter: parameter.name.clone(),
                            type_name: type_name.clone(),
                        });
                    }
                }
                ParameterType::Scalar(_) => {}
            }
        }
        Ok(())
    }

    pub fn contains(&self, enum_type: &str) -> bool {
        self.enums.contains_key(enum_type)
    }

    /// The ordered option catalog of an enumeration type.
    pub fn options_for(&self, enum_type: &str) -> Result<&[EnumOption], CoercionError> {
        self.lookup(enum_type).map(|e| e.options.as_slice())
    }

    /// Unknown types are reported as single-valued.
    pub fn is_multiselect(&self, enum_type: &str) -> bool {
        self.enums.get(enum_type).is_some_and(|e| e.multiselect)
    }

    /// Resolves a displayed label back to its option id.
    ///
    /// A miss means the presentation layer and the catalog disagree, which is a
    /// defect rather than a user error.
    pub fn id_for_label(&self, enum_type: &str, label: &str) -> Result<&str, CoercionError> {
        let indexed = self.lookup(enum_type)?;
        indexed
            .ids_by_label
            .get(label)
            .map(|&position| indexed.options[position].id.as_str())
            .ok_or_else(|| CoercionError::UnknownLabel {
                enum_type: enum_type.to_string(),
                label: label.to_string(),
            })
    }

    pub fn label_for_id(&self, enum_type: &str, id: &str) -> Option<&str> {
        let indexed = self.enums.get(enum_type)?;
        indexed
            .labels_by_id
            .get(id)
            .map(|&position| indexed.options[position].label.as_str())
    }

    fn lookup(&self, enum_type: &str) -> Result<&IndexedEnum, CoercionError> {
        self.enums
            .get(enum_type)
            .ok_or_else(|| CoercionError::UnknownEnumType(enum_type.to_string()))
    }

    /// Resolves the parameter sequence governing a nested list.
    ///
    /// `names` is the chain of list-valued parameter names leading down from
    /// `root`, as returned by [`NodeTree::schema_path`](crate::tree::NodeTree::schema_path).
    /// An empty chain yields `root` itself.
    pub fn find_parameter_sequence<'s, S: AsRef<str>>(
        root: &'s [Parameter],
        names: &[S],
    ) -> Result<&'s [Parameter], SchemaError> {
        let mut current = root;
        for name in names {
            current = current
                .iter()
                .find(|p| p.name == AsRef::<str>::as_ref(name))
                .and_then(Parameter::children)
                .ok_or_else(|| SchemaError::SchemaPathNotFound {
                    path: names.iter().map(AsRef::<str>::as_ref).join("."),
                })?;
        }
        Ok(current)
    }
}
