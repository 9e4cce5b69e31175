//! Structural rendering boundary.
//!
//! The core never draws controls. A rendering substrate implements
//! [`TreeVisitor`] and receives every list, group and field in schema order,
//! together with the affordances it should offer.

mod outline;

pub use outline::OutlineRenderer;

use crate::codec::FieldKind;
use crate::error::SessionError;
use crate::schema::{EnumOption, SchemaIndex};
use crate::tree::{FieldNode, GroupNode, ListNode, Node, NodeId, NodeTree};

/// A list as handed to a [`TreeVisitor`].
pub struct ListView<'t> {
    pub list: &'t ListNode,
    pub depth: usize,
    /// Whether an "add group" control should be offered.
    pub can_add: bool,
}

/// A group as handed to a [`TreeVisitor`]. `position` is its index in the owning list.
pub struct GroupView<'t> {
    pub group: &'t GroupNode,
    pub depth: usize,
    pub position: usize,
    /// False for the root group and in read-only sessions.
    pub can_delete: bool,
}

/// A field together with what a control needs to present it.
pub struct FieldView<'t> {
    pub field: &'t FieldNode,
    pub depth: usize,
    /// Option catalog for enumeration fields.
    pub options: Option<&'t [EnumOption]>,
}

/// Receives the tree in schema order. Only `field` is required; list and group
/// callbacks bracket their children.
pub trait TreeVisitor {
    fn enter_list(&mut self, _list: &ListView<'_>) {}
    fn exit_list(&mut self, _list: &ListView<'_>) {}
    fn enter_group(&mut self, _group: &GroupView<'_>) {}
    fn exit_group(&mut self, _group: &GroupView<'_>) {}
    fn field(&mut self, field: &FieldView<'_>);
}

/// Walks the tree from the root group down, in schema order.
pub fn walk<V: TreeVisitor + ?Sized>(
    tree: &NodeTree,
    index: &SchemaIndex,
    readonly: bool,
    visitor: &mut V,
) -> Result<(), SessionError> {
    let mut walker = Walker {
        tree,
        index,
        readonly,
        visitor,
    };
    let root = tree.list(tree.root())?;
    for (position, &group_id) in root.groups.iter().enumerate() {
        walker.group(group_id, 0, position, false)?;
    }
    Ok(())
}

struct Walker<'t, 'v, V: ?Sized> {
    tree: &'t NodeTree,
    index: &'t SchemaIndex,
    readonly: bool,
    visitor: &'v mut V,
}

impl<'t, V: TreeVisitor + ?Sized> Walker<'t, '_, V> {
    fn group(&mut self, id: NodeId, depth: usize, position: usize, deletable: bool) -> Result<(), SessionError> {
        let tree = self.tree;
        let view = GroupView {
            group: tree.group(id)?,
            depth,
            position,
            can_delete: deletable && !self.readonly,
        };
        self.visitor.enter_group(&view);
        for entry in &view.group.entries {
            match tree.get(entry.node)? {
                Node::List(list) => self.list(list, depth + 1)?,
                Node::Field(field) => {
                    let options = match &field.kind {
                        FieldKind::Enumeration { enum_type, .. } => self.index.options_for(enum_type).ok(),
                        _ => None,
                    };
                    self.visitor.field(&FieldView {
                        field,
                        depth: depth + 1,
                        options,
                    });
                }
                Node::Group(_) => {
                    return Err(SessionError::UnexpectedNodeKind {
                        id: entry.node,
                        expected: "field or list",
                    });
                }
            }
        }
        self.visitor.exit_group(&view);
        Ok(())
    }

    fn list(&mut self, list: &'t ListNode, depth: usize) -> Result<(), SessionError> {
        let view = ListView {
            list,
            depth,
            can_add: !self.readonly,
        };
        self.visitor.enter_list(&view);
        for (position, &group_id) in list.groups.iter().enumerate() {
            self.group(group_id, depth + 1, position, true)?;
        }
        self.visitor.exit_list(&view);
        Ok(())
    }
}
