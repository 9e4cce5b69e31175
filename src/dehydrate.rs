use crate::codec::FieldCodec;
use crate::error::{FieldCoercionError, SessionError};
use crate::schema::SchemaIndex;
use crate::template::Group;
use crate::tree::{Node, NodeId, NodeTree};
use serde_json::Value;

/// Result of walking a list back into instance data.
///
/// `groups` is best effort: fields that failed to coerce are left out of their
/// group and reported in `errors` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Dehydrated {
    pub groups: Vec<Group>,
    pub errors: Vec<FieldCoercionError>,
}

impl Dehydrated {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Walks a node tree into instance values, accumulating coercion errors.
pub struct Dehydrator<'a> {
    tree: &'a NodeTree,
    codec: FieldCodec<'a>,
    errors: Vec<FieldCoercionError>,
}

impl<'a> Dehydrator<'a> {
    pub fn new(tree: &'a NodeTree, index: &'a SchemaIndex) -> Self {
        Self {
            tree,
            codec: FieldCodec::new(index),
            errors: Vec::new(),
        }
    }

    pub fn dehydrate(mut self, list_id: NodeId) -> Result<Dehydrated, SessionError> {
        let base = self.tree.path_of(list_id)?;
        let groups = self.dehydrate_list(list_id, &base)?;
        tracing::debug!(
            groups = groups.len(),
            errors = self.errors.len(),
            "dehydrated list {list_id}"
        );
        Ok(Dehydrated {
            groups,
            errors: self.errors,
        })
    }

    fn dehydrate_list(&mut self, list_id: NodeId, path: &str) -> Result<Vec<Group>, SessionError> {
        let tree = self.tree;
        let list = tree.list(list_id)?;
        let is_root = list.parent.is_none();
        list.groups
            .iter()
            .enumerate()
            .map(|(position, &group_id)| {
                // The root list's single group is the document itself.
                let group_path = if is_root {
                    String::new()
                } else {
                    join_path(path, &position.to_string())
                };
                self.dehydrate_group(group_id, &group_path)
            })
            .collect()
    }

    fn dehydrate_group(&mut self, group_id: NodeId, path: &str) -> Result<Group, SessionError> {
        let tree = self.tree;
        let group = tree.group(group_id)?;
        let mut values = Group::new();
        for entry in &group.entries {
            let entry_path = join_path(path, &entry.name);
            match tree.get(entry.node)? {
                Node::List(_) => {
                    let items = self.dehydrate_list(entry.node, &entry_path)?;
                    values.insert(
                        entry.name.clone(),
                        Value::Array(items.into_iter().map(Value::Object).collect()),
                    );
                }
                Node::Field(field) => match self.codec.to_value(&field.kind, field.mode, &field.raw) {
                    Ok(value) => {
                        values.insert(entry.name.clone(), value);
                    }
                    Err(reason) => self.errors.push(FieldCoercionError {
                        node: field.id,
                        field: field.name.clone(),
                        path: entry_path,
                        reason,
                    }),
                },
                Node::Group(_) => {
                    return Err(SessionError::UnexpectedNodeKind {
                        id: entry.node,
                        expected: "field or list",
                    });
                }
            }
        }
        Ok(values)
    }
}

fn join_path(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{base}.{segment}")
    }
}

/// Dehydrates `list_id` and everything below it.
pub fn dehydrate(tree: &NodeTree, index: &SchemaIndex, list_id: NodeId) -> Result<Dehydrated, SessionError> {
    Dehydrator::new(tree, index).dehydrate(list_id)
}
