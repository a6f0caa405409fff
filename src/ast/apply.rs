//! Read/write depth-first traversal with an editing cursor.

use std::ops::ControlFlow;

use crate::ast::children::apply_children;
use crate::ast::nodes::Node;
use crate::ast::walk::{RED_ZONE, STACK_SIZE};

type Callback<'f> = &'f mut dyn FnMut(&mut Cursor<'_>) -> bool;

/// Position of a list item being applied; shared with the cursor so that
/// edits can shift the iteration.
struct ListIter {
    index: usize,
    step: usize,
}

enum Slot<'a> {
    Field(&'a mut Node),
    Item { list: &'a mut Vec<Node>, iter: &'a mut ListIter },
}

/// Handle on the node currently being applied.
///
/// A cursor is only valid for the duration of the callback it is passed to.
/// Its edits write straight into the parent's field or list.
pub struct Cursor<'a> {
    parent: Option<&'static str>,
    name: &'static str,
    slot: Slot<'a>,
    replaced: bool,
    deleted: bool,
}

impl<'a> Cursor<'a> {
    fn check_live(&self) {
        if self.deleted {
            panic!("cursor used after its node was deleted");
        }
    }

    /// The current node.
    pub fn node(&self) -> &Node {
        self.check_live();
        match &self.slot {
            Slot::Field(node) => node,
            Slot::Item { list, iter } => &list[iter.index],
        }
    }

    pub fn node_mut(&mut self) -> &mut Node {
        self.check_live();
        match &mut self.slot {
            Slot::Field(node) => node,
            Slot::Item { list, iter } => &mut list[iter.index],
        }
    }

    /// Variant name of the parent node; `None` at the root.
    pub fn parent(&self) -> Option<&'static str> {
        self.parent
    }

    /// Name of the parent field holding the current node.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Position within the parent's list field, if the field is a list.
    pub fn index(&self) -> Option<usize> {
        match &self.slot {
            Slot::Field(_) => None,
            Slot::Item { iter, .. } => Some(iter.index),
        }
    }

    /// Overwrites the current slot. The replacement is not traversed.
    pub fn replace(&mut self, node: Node) {
        *self.node_mut() = node;
        self.replaced = true;
    }

    /// Inserts `node` before the current list item. It is not traversed.
    ///
    /// # Panics
    ///
    /// If the current node is not a list item.
    pub fn insert_before(&mut self, node: Node) {
        self.check_live();
        match &mut self.slot {
            Slot::Item { list, iter } => {
                list.insert(iter.index, node);
                iter.index += 1;
            }
            Slot::Field(_) => panic!("insert_before on non-list field {}", self.name),
        }
    }

    /// Inserts `node` after the current list item. It is not traversed.
    ///
    /// # Panics
    ///
    /// If the current node is not a list item.
    pub fn insert_after(&mut self, node: Node) {
        self.check_live();
        match &mut self.slot {
            Slot::Item { list, iter } => {
                list.insert(iter.index + 1, node);
                iter.step += 1;
            }
            Slot::Field(_) => panic!("insert_after on non-list field {}", self.name),
        }
    }

    /// Removes the current list item. `post` is not called for it.
    ///
    /// # Panics
    ///
    /// If the current node is not a list item.
    pub fn delete(&mut self) {
        self.check_live();
        match &mut self.slot {
            Slot::Item { list, iter } => {
                list.remove(iter.index);
                iter.step -= 1;
                self.deleted = true;
            }
            Slot::Field(_) => panic!("delete on non-list field {}", self.name),
        }
    }
}

pub(crate) struct Applier<'f> {
    pre: Callback<'f>,
    post: Callback<'f>,
}

impl<'f> Applier<'f> {
    pub(crate) fn apply_field(&mut self, node: &mut Node, parent: &'static str, name: &'static str) -> ControlFlow<()> {
        let mut cursor = Cursor { parent: Some(parent), name, slot: Slot::Field(node), replaced: false, deleted: false };
        self.apply_cursor(&mut cursor)
    }

    pub(crate) fn apply_list(&mut self, list: &mut Vec<Node>, parent: &'static str, name: &'static str) -> ControlFlow<()> {
        let mut iter = ListIter { index: 0, step: 1 };
        while iter.index < list.len() {
            iter.step = 1;
            {
                let slot = Slot::Item { list: &mut *list, iter: &mut iter };
                let mut cursor = Cursor { parent: Some(parent), name, slot, replaced: false, deleted: false };
                self.apply_cursor(&mut cursor)?;
            }
            iter.index += iter.step;
        }
        ControlFlow::Continue(())
    }

    fn apply_cursor(&mut self, cursor: &mut Cursor<'_>) -> ControlFlow<()> {
        if matches!(cursor.node(), Node::Null) {
            return ControlFlow::Continue(());
        }
        if !(self.pre)(cursor) {
            return ControlFlow::Continue(());
        }
        if cursor.deleted {
            return ControlFlow::Continue(());
        }
        if !cursor.replaced {
            stacker::maybe_grow(RED_ZONE, STACK_SIZE, || apply_children(cursor.node_mut(), self))?;
        }
        if !(self.post)(cursor) {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

/// Traverses `root` depth-first, letting `pre` and `post` edit the tree
/// through a [`Cursor`], and returns the resulting tree.
///
/// `pre` runs before a node's children; returning `false` skips the
/// children and `post` for that node. `post` runs after the children;
/// returning `false` ends the whole traversal at once. A node replaced in
/// `pre` is not descended into.
///
/// ```rust
/// use sqlc_core::ast::{apply, Node};
///
/// let tree = Node::list(vec![Node::integer(1), Node::integer(2)]);
/// let tree = apply(
///     tree,
///     |cursor| {
///         if matches!(cursor.node(), Node::Integer(i) if i.ival == 2) {
///             cursor.replace(Node::string("two"));
///         }
///         true
///     },
///     |_| true,
/// );
/// assert_eq!(tree, Node::list(vec![Node::integer(1), Node::string("two")]));
/// ```
pub fn apply<Pre, Post>(root: Node, mut pre: Pre, mut post: Post) -> Node
where
    Pre: FnMut(&mut Cursor<'_>) -> bool,
    Post: FnMut(&mut Cursor<'_>) -> bool,
{
    let mut root = root;
    let mut applier = Applier { pre: &mut pre, post: &mut post };
    let mut cursor = Cursor { parent: None, name: "", slot: Slot::Field(&mut root), replaced: false, deleted: false };
    // An aborted traversal still returns the edits made so far.
    let _ = applier.apply_cursor(&mut cursor);
    root
}
