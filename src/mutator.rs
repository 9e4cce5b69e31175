use crate::error::SessionError;
use crate::hydrate::Hydrator;
use crate::schema::{Parameter, Schema, SchemaIndex};
use crate::session::EditorOptions;
use crate::template::instantiate;
use crate::tree::{IdAllocator, NodeId, NodeTree};
use serde_json::Value;

/// Adds and removes groups, always building new groups from the schema.
pub struct Mutator<'a> {
    schema: &'a Schema,
    index: &'a SchemaIndex,
    options: &'a EditorOptions,
}

impl<'a> Mutator<'a> {
    pub fn new(schema: &'a Schema, index: &'a SchemaIndex, options: &'a EditorOptions) -> Self {
        Self {
            schema,
            index,
            options,
        }
    }

    /// Finds the parameter sequence that shapes the groups of `list_id` by
    /// walking its ancestor list names up to the root.
    pub fn resolve_parameters(&self, tree: &NodeTree, list_id: NodeId) -> Result<&'a [Parameter], SessionError> {
        let names = tree.schema_path(list_id)?;
        Ok(SchemaIndex::find_parameter_sequence(&self.schema.parameters, &names)?)
    }

    /// Appends one default group to `list_id` and returns its id.
    ///
    /// Existing groups keep their order and ids. On error the tree is untouched.
    pub fn add_group(
        &self,
        tree: &mut NodeTree,
        ids: &mut IdAllocator,
        list_id: NodeId,
    ) -> Result<NodeId, SessionError> {
        if tree.list(list_id)?.parent.is_none() {
            return Err(SessionError::RootListNotExtendable);
        }
        let parameters = self.resolve_parameters(tree, list_id)?;
        let template = Value::Object(instantiate(parameters, self.index, self.options));

        let mut hydrator = Hydrator::new(self.index, ids, self.options);
        let group_id = hydrator.hydrate_group(list_id, parameters, &template);
        let nodes = hydrator.into_nodes();
        let staged = nodes.len();

        tree.list_mut(list_id)?.groups.push(group_id);
        tree.extend(nodes);
        tracing::debug!(list = %list_id, group = %group_id, nodes = staged, "added group");
        Ok(group_id)
    }

    /// Detaches `group_id` and drops its whole subtree.
    pub fn delete_group(&self, tree: &mut NodeTree, group_id: NodeId) -> Result<(), SessionError> {
        let list_id = tree.group(group_id)?.parent;
        if tree.list(list_id)?.parent.is_none() {
            return Err(SessionError::RootGroupNotDeletable);
        }

        tree.list_mut(list_id)?.groups.retain(|&g| g != group_id);
        let removed = tree.remove_subtree(group_id);
        tracing::debug!(list = %list_id, group = %group_id, nodes = removed, "deleted group");
        Ok(())
    }
}
