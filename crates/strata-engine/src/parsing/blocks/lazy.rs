use crate::parsing::tree::{DepthTree, NodeId};

use super::types::BlockNode;

/// Walks a freshly built strand from its innermost node outwards and records
/// on every list and quote whether the content below it accepts lazy
/// continuation lines.
///
/// Lists and quotes do not decide for themselves; they take the flag granted
/// by the nearest inner node. List items are transparent. Any other node
/// grants the flag only if it is an open paragraph.
pub fn propagate(tree: &mut DepthTree<BlockNode>, strand: &[NodeId]) {
    let mut granted = true;
    for &id in strand.iter().rev() {
        match tree.get_mut(id) {
            BlockNode::List(list) => list.allows_lazy_continuation = granted,
            BlockNode::Quote(quote) => quote.allows_lazy_continuation = granted,
            BlockNode::ListItem(_) => {}
            other => granted = other.allows_lazy_continuation(),
        }
    }
}
