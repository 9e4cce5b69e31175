use crate::codec::{FieldCodec, FieldKind, PresentationMode};
use crate::schema::{Parameter, ParameterType, ROOT_LIST_NAME, ScalarKind, SchemaIndex};
use crate::session::EditorOptions;
use crate::tree::{
    FieldNode, GroupEntry, GroupNode, IdAllocator, ListNode, Node, NodeId, NodeTree,
};
use serde_json::Value;

static MISSING: Value = Value::Null;

/// Builds node subtrees that mirror the schema, seeded from instance data.
///
/// Nodes are staged rather than written into a tree, so a caller can attach the
/// result in one step or throw it away.
pub struct Hydrator<'a> {
    index: &'a SchemaIndex,
    ids: &'a mut IdAllocator,
    options: &'a EditorOptions,
    nodes: Vec<Node>,
}

impl<'a> Hydrator<'a> {
    pub fn new(index: &'a SchemaIndex, ids: &'a mut IdAllocator, options: &'a EditorOptions) -> Self {
        Self {
            index,
            ids,
            options,
            nodes: Vec::new(),
        }
    }

    /// Creates a list node holding one group node per entry of `groups`.
    pub fn hydrate_list(
        &mut self,
        name: &str,
        label: &str,
        parent: Option<NodeId>,
        parameters: &[Parameter],
        groups: &[Value],
    ) -> NodeId {
        let id = self.ids.next_id();
        let groups = groups
            .iter()
            .map(|group| self.hydrate_group(id, parameters, group))
            .collect();
        self.nodes.push(Node::List(ListNode {
            id,
            name: name.to_string(),
            label: label.to_string(),
            parent,
            groups,
        }));
        id
    }

    /// Creates a group node whose entries follow `parameters`, whatever keys and
    /// key order `data` carries.
    pub fn hydrate_group(&mut self, parent: NodeId, parameters: &[Parameter], data: &Value) -> NodeId {
        let fields = match data {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                tracing::warn!(value = %other, "group data is not an object; using defaults");
                None
            }
        };

        let id = self.ids.next_id();
        let mut entries = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            let value = fields
                .and_then(|map| map.get(&parameter.name))
                .unwrap_or(&MISSING);
            let node = match &parameter.kind {
                ParameterType::List(children) => {
                    let items: &[Value] = match value {
                        Value::Array(items) => items.as_slice(),
                        Value::Null => &[],
                        other => {
                            tracing::warn!(
                                list = %parameter.name,
                                value = %other,
                                "list data is not an array; starting empty"
                            );
                            &[]
                        }
                    };
                    self.hydrate_list(&parameter.name, parameter.display_label(), Some(id), children, items)
                }
                ParameterType::Scalar(kind) => self.hydrate_field(parameter, kind, value),
            };
            entries.push(GroupEntry {
                name: parameter.name.clone(),
                node,
            });
        }

        self.nodes.push(Node::Group(GroupNode { id, parent, entries }));
        id
    }

    fn hydrate_field(&mut self, parameter: &Parameter, kind: &ScalarKind, value: &Value) -> NodeId {
        let kind = FieldKind::resolve(kind, self.index);
        let mode = PresentationMode::for_kind(&kind, self.index, self.options.autocomplete_threshold);
        let codec = FieldCodec::new(self.index);
        let raw = codec
            .to_raw(&kind, mode, value)
            .or_else(|| {
                parameter
                    .default_value
                    .as_ref()
                    .and_then(|default| codec.normalize_default(&kind, mode, default))
                    .map(|(raw, _)| raw)
            })
            .unwrap_or_else(|| kind.empty_raw().to_string());

        let id = self.ids.next_id();
        self.nodes.push(Node::Field(FieldNode {
            id,
            name: parameter.name.clone(),
            label: parameter.display_label().to_string(),
            kind,
            mode,
            raw,
            readonly: parameter.readonly || self.options.readonly,
        }));
        id
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

/// Hydrates a complete tree. The returned tree's root list holds one group per
/// entry of `groups`; sessions pass exactly one.
pub fn hydrate(
    parameters: &[Parameter],
    groups: &[Value],
    index: &SchemaIndex,
    ids: &mut IdAllocator,
    options: &EditorOptions,
) -> NodeTree {
    let mut hydrator = Hydrator::new(index, ids, options);
    let root = hydrator.hydrate_list(ROOT_LIST_NAME, "", None, parameters, groups);
    let nodes = hydrator.into_nodes();
    tracing::debug!(nodes = nodes.len(), groups = groups.len(), "hydrated node tree");
    NodeTree::from_nodes(root, nodes)
}
