use crate::codec::{DEFAULT_AUTOCOMPLETE_THRESHOLD, FieldKind};
use crate::dehydrate::dehydrate;
use crate::error::{FieldCoercionError, SchemaError, SessionError};
use crate::hydrate::hydrate;
use crate::mutator::Mutator;
use crate::render::{self, OutlineRenderer, TreeVisitor};
use crate::schema::{EnumOption, IntoSchema, Schema, SchemaIndex};
use crate::template::{Group, instantiate};
use crate::tree::{FieldNode, IdAllocator, NodeId, NodeTree};
use itertools::Itertools;
use serde_json::Value;

/// Settings that shape how a tree is hydrated and edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// Every field is read-only and groups cannot be added or deleted.
    pub readonly: bool,
    /// Single-valued enumerations with more options than this are edited by label.
    pub autocomplete_threshold: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            readonly: false,
            autocomplete_threshold: DEFAULT_AUTOCOMPLETE_THRESHOLD,
        }
    }
}

/// The data handed back by [`Session::save`].
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub instance: Group,
    pub errors: Vec<FieldCoercionError>,
}

impl SaveOutcome {
    /// `instance` may only be treated as schema-conformant when this holds.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct SessionBuilder {
    schema: Schema,
    instance: Option<Group>,
    options: EditorOptions,
}

impl SessionBuilder {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            instance: None,
            options: EditorOptions::default(),
        }
    }

    /// Edit an existing instance instead of a fresh template.
    pub fn instance(mut self, instance: Group) -> Self {
        self.instance = Some(instance);
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.options.readonly = readonly;
        self
    }

    pub fn autocomplete_threshold(mut self, threshold: usize) -> Self {
        self.options.autocomplete_threshold = threshold;
        self
    }

    pub fn build(self) -> Result<Session, SchemaError> {
        let index = SchemaIndex::new(&self.schema)?;
        let instance = self
            .instance
            .unwrap_or_else(|| instantiate(&self.schema.parameters, &index, &self.options));

        let mut ids = IdAllocator::new();
        let tree = hydrate(
            &self.schema.parameters,
            &[Value::Object(instance)],
            &index,
            &mut ids,
            &self.options,
        );
        tracing::debug!(nodes = tree.len(), readonly = self.options.readonly, "session created");

        Ok(Session {
            schema: self.schema,
            index,
            ids,
            tree,
            options: self.options,
        })
    }
}

/// One editing session: a schema, its index and the live node tree.
pub struct Session {
    schema: Schema,
    index: SchemaIndex,
    ids: IdAllocator,
    tree: NodeTree,
    options: EditorOptions,
}

impl Session {
    pub fn builder(schema: Schema) -> SessionBuilder {
        SessionBuilder::new(schema)
    }

    /// Starts a session from any schema source. With no instance a default
    /// template is edited.
    pub fn create(
        schema: impl IntoSchema,
        instance: Option<Group>,
        readonly: bool,
    ) -> Result<Self, SchemaError> {
        let mut builder = Self::builder(schema.into_schema()?).readonly(readonly);
        if let Some(instance) = instance {
            builder = builder.instance(instance);
        }
        builder.build()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn index(&self) -> &SchemaIndex {
        &self.index
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn is_readonly(&self) -> bool {
        self.options.readonly
    }

    pub fn root_group(&self) -> Result<NodeId, SessionError> {
        let root = self.tree.root();
        self.tree
            .root_group()
            .ok_or(SessionError::UnexpectedNodeKind {
                id: root,
                expected: "non-empty root list",
            })
    }

    /// Resolves a dotted path such as `routes.1.path`.
    pub fn locate(&self, path: &str) -> Result<NodeId, SessionError> {
        self.tree.locate(path)
    }

    pub fn field(&self, id: NodeId) -> Result<&FieldNode, SessionError> {
        self.tree.field(id)
    }

    /// Option catalog for an enumeration field.
    pub fn options_for(&self, id: NodeId) -> Result<&[EnumOption], SessionError> {
        let field = self.tree.field(id)?;
        match &field.kind {
            FieldKind::Enumeration { enum_type, .. } => {
                self.index.options_for(enum_type).map_err(|_| {
                    SessionError::Schema(SchemaError::UnknownEnumType {
                        parameter: field.name.clone(),
                        type_name: enum_type.clone(),
                    })
                })
            }
            _ => Err(SessionError::UnexpectedNodeKind {
                id,
                expected: "enumeration field",
            }),
        }
    }

    /// Records a raw value reported by a control. Coercion happens on save.
    pub fn set_value(&mut self, id: NodeId, raw: impl Into<String>) -> Result<(), SessionError> {
        let field = self.tree.field_mut(id)?;
        if field.readonly {
            return Err(SessionError::ReadOnlyField {
                field: field.name.clone(),
            });
        }
        field.raw = raw.into();
        Ok(())
    }

    pub fn set_bool(&mut self, id: NodeId, value: bool) -> Result<(), SessionError> {
        self.set_value(id, value.to_string())
    }

    /// Records the selected option ids of a multiselect field.
    pub fn set_selected<I, S>(&mut self, id: NodeId, selected: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = selected.into_iter().map(|s| s.as_ref().to_string()).join(",");
        self.set_value(id, joined)
    }

    /// Appends a default group to a nested list.
    pub fn add_group(&mut self, list_id: NodeId) -> Result<NodeId, SessionError> {
        if self.options.readonly {
            return Err(SessionError::ReadOnly);
        }
        Mutator::new(&self.schema, &self.index, &self.options).add_group(&mut self.tree, &mut self.ids, list_id)
    }

    pub fn delete_group(&mut self, group_id: NodeId) -> Result<(), SessionError> {
        if self.options.readonly {
            return Err(SessionError::ReadOnly);
        }
        Mutator::new(&self.schema, &self.index, &self.options).delete_group(&mut self.tree, group_id)
    }

    /// Hands every list, group and field to `visitor` in schema order.
    pub fn walk<V: TreeVisitor + ?Sized>(&self, visitor: &mut V) -> Result<(), SessionError> {
        render::walk(&self.tree, &self.index, self.options.readonly, visitor)
    }

    pub fn outline(&self) -> Result<String, SessionError> {
        let mut renderer = OutlineRenderer::new();
        self.walk(&mut renderer)?;
        Ok(renderer.finish())
    }

    /// Extracts the edited instance. Coercion failures are returned next to a
    /// best-effort instance rather than aborting the walk.
    pub fn save(&self) -> Result<SaveOutcome, SessionError> {
        let dehydrated = dehydrate(&self.tree, &self.index, self.tree.root())?;
        let instance = dehydrated.groups.into_iter().next().unwrap_or_default();
        tracing::debug!(errors = dehydrated.errors.len(), "session saved");
        Ok(SaveOutcome {
            instance,
            errors: dehydrated.errors,
        })
    }

    /// Abandons the session without producing output.
    pub fn cancel(self) {
        tracing::debug!(nodes = self.tree.len(), "session cancelled");
    }
}
