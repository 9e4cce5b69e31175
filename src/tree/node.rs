use super::ids::NodeId;
use crate::codec::{FieldKind, PresentationMode};
use crate::error::SessionError;
use ahash::AHashMap;

/// A node of the live editing tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    List(ListNode),
    Group(GroupNode),
    Field(FieldNode),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::List(list) => list.id,
            Node::Group(group) => group.id,
            Node::Field(field) => field.id,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::List(_) => "list",
            Node::Group(_) => "group",
            Node::Field(_) => "field",
        }
    }
}

/// The ordered groups of one list-valued parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub id: NodeId,
    pub name: String,
    pub label: String,
    /// Owning group; `None` only for the root list.
    pub parent: Option<NodeId>,
    pub groups: Vec<NodeId>,
}

/// One repeatable-section instance. Entries follow schema declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    pub id: NodeId,
    pub parent: NodeId,
    pub entries: Vec<GroupEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub name: String,
    pub node: NodeId,
}

/// An editable scalar holding the raw value as the user sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub id: NodeId,
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub mode: PresentationMode,
    pub raw: String,
    pub readonly: bool,
}

/// Arena holding every node of an editing session, keyed by id.
#[derive(Debug, Clone)]
pub struct NodeTree {
    root: NodeId,
    nodes: AHashMap<NodeId, Node>,
}

impl NodeTree {
    pub(crate) fn from_nodes(root: NodeId, nodes: Vec<Node>) -> Self {
        let mut tree = Self {
            root,
            nodes: AHashMap::with_capacity(nodes.len()),
        };
        tree.extend(nodes);
        tree
    }

    /// The root list. It holds the single implicit root group.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_group(&self) -> Option<NodeId> {
        self.list(self.root)
            .ok()
            .and_then(|list| list.groups.first().copied())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, SessionError> {
        self.nodes.get(&id).ok_or(SessionError::NodeNotFound(id))
    }

    pub fn list(&self, id: NodeId) -> Result<&ListNode, SessionError> {
        match self.get(id)? {
            Node::List(list) => Ok(list),
            _ => Err(SessionError::UnexpectedNodeKind { id, expected: "list" }),
        }
    }

    pub fn group(&self, id: NodeId) -> Result<&GroupNode, SessionError> {
        match self.get(id)? {
            Node::Group(group) => Ok(group),
            _ => Err(SessionError::UnexpectedNodeKind { id, expected: "group" }),
        }
    }

    pub fn field(&self, id: NodeId) -> Result<&FieldNode, SessionError> {
        match self.get(id)? {
            Node::Field(field) => Ok(field),
            _ => Err(SessionError::UnexpectedNodeKind { id, expected: "field" }),
        }
    }

    pub(crate) fn field_mut(&mut self, id: NodeId) -> Result<&mut FieldNode, SessionError> {
        match self.nodes.get_mut(&id) {
            Some(Node::Field(field)) => Ok(field),
            Some(_) => Err(SessionError::UnexpectedNodeKind { id, expected: "field" }),
            None => Err(SessionError::NodeNotFound(id)),
        }
    }

    pub(crate) fn list_mut(&mut self, id: NodeId) -> Result<&mut ListNode, SessionError> {
        match self.nodes.get_mut(&id) {
            Some(Node::List(list)) => Ok(list),
            Some(_) => Err(SessionError::UnexpectedNodeKind { id, expected: "list" }),
            None => Err(SessionError::NodeNotFound(id)),
        }
    }

    pub(crate) fn extend(&mut self, nodes: Vec<Node>) {
        for node in nodes {
            self.nodes.insert(node.id(), node);
        }
    }

    /// Drops a node and everything below it from the arena. The caller is
    /// responsible for unlinking it from its parent.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) -> usize {
        let mut pending = vec![id];
        let mut removed = 0;
        while let Some(next) = pending.pop() {
            let Some(node) = self.nodes.remove(&next) else {
                continue;
            };
            removed += 1;
            match node {
                Node::List(list) => pending.extend(list.groups),
                Node::Group(group) => pending.extend(group.entries.into_iter().map(|e| e.node)),
                Node::Field(_) => {}
            }
        }
        removed
    }

    /// Chain of list names from the root down to `list_id`, as understood by
    /// [`SchemaIndex::find_parameter_sequence`](crate::schema::SchemaIndex::find_parameter_sequence).
    /// The root list itself maps to the empty chain.
    pub fn schema_path(&self, list_id: NodeId) -> Result<Vec<&str>, SessionError> {
        let mut names = Vec::new();
        let mut current = self.list(list_id)?;
        while let Some(parent_group) = current.parent {
            names.push(current.name.as_str());
            let group = self.group(parent_group)?;
            current = self.list(group.parent)?;
        }
        names.reverse();
        Ok(names)
    }

    /// Inverse of [`NodeTree::locate`] for list and group nodes.
    pub fn path_of(&self, id: NodeId) -> Result<String, SessionError> {
        match self.get(id)? {
            Node::List(list) => match list.parent {
                None => Ok(String::new()),
                Some(group) => Ok(join_segment(self.path_of(group)?, &list.name)),
            },
            Node::Group(group) => {
                let list = self.list(group.parent)?;
                if list.parent.is_none() {
                    return Ok(String::new());
                }
                let position = list
                    .groups
                    .iter()
                    .position(|&g| g == id)
                    .ok_or(SessionError::NodeNotFound(id))?;
                Ok(join_segment(self.path_of(list.id)?, &position.to_string()))
            }
            Node::Field(_) => Err(SessionError::UnexpectedNodeKind {
                id,
                expected: "list or group",
            }),
        }
    }

    /// Resolves a dotted path such as `routes.1.path` to a node id.
    ///
    /// Names select entries of a group, numbers select groups of a list. The
    /// empty path is the root group.
    pub fn locate(&self, path: &str) -> Result<NodeId, SessionError> {
        let not_found = || SessionError::PathNotFound(path.to_string());
        let mut current = self.root_group().ok_or_else(not_found)?;
        if path.is_empty() {
            return Ok(current);
        }

        for segment in path.split('.') {
            current = match self.get(current)? {
                Node::Group(group) => group
                    .entries
                    .iter()
                    .find(|entry| entry.name == segment)
                    .map(|entry| entry.node)
                    .ok_or_else(not_found)?,
                Node::List(list) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|position| list.groups.get(position).copied())
                    .ok_or_else(not_found)?,
                Node::Field(_) => return Err(not_found()),
            };
        }
        Ok(current)
    }
}

fn join_segment(mut base: String, segment: &str) -> String {
    if !base.is_empty() {
        base.push('.');
    }
    base.push_str(segment);
    base
}
