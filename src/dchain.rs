//! DChains: doubly linked lists stored in one generational arena.
//!
//! Same layout as [`Chains`](crate::chain::Chains), plus a `prev` link on
//! every node. The back-link makes unlinking a known node O(1): no walk
//! from the head is needed to find its predecessor.

use crate::chain::{Link, NodeId};
use slotmap::SlotMap;

#[derive(Debug)]
struct DNode<T> {
    item: T,
    prev: Link,
    next: Link,
}

#[derive(Debug)]
pub struct DChains<T> {
    nodes: SlotMap<NodeId, DNode<T>>,
}

impl<T> Default for DChains<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over one list, head to tail.
pub struct DChainIter<'a, T> {
    nodes: &'a SlotMap<NodeId, DNode<T>>,
    cursor: Link,
}

impl<'a, T> Iterator for DChainIter<'a, T> {
    type Item = (NodeId, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.nodes.get(id)?;
        self.cursor = node.next;
        Some((id, &node.item))
    }
}

impl<T> DChains<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A detached node with no neighbours.
    pub fn insert(&mut self, item: T) -> NodeId {
        self.nodes.insert(DNode {
            item,
            prev: None,
            next: None,
        })
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|n| &n.item)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|n| &mut n.item)
    }

    pub fn next(&self, id: NodeId) -> Link {
        self.nodes.get(id)?.next
    }

    pub fn prev(&self, id: NodeId) -> Link {
        self.nodes.get(id)?.prev
    }

    pub fn has_next(&self, at: NodeId) -> bool {
        self.next(at).is_some()
    }

    pub fn has_prev(&self, at: NodeId) -> bool {
        self.prev(at).is_some()
    }

    /// Link a new node in front of `head`.
    pub fn push_front(&mut self, head: &mut Link, item: T) -> NodeId {
        let id = self.nodes.insert(DNode {
            item,
            prev: None,
            next: *head,
        });
        if let Some(node) = (*head).and_then(|old| self.nodes.get_mut(old)) {
            node.prev = Some(id);
        }
        *head = Some(id);
        id
    }

    /// Link a new node directly after `at`, patching the back-link of the
    /// node that followed it. Returns `None` if `at` is stale.
    pub fn insert_after(&mut self, at: NodeId, item: T) -> Option<NodeId> {
        let next = self.nodes.get(at)?.next;
        let id = self.nodes.insert(DNode {
            item,
            prev: Some(at),
            next,
        });
        if let Some(node) = self.nodes.get_mut(at) {
            node.next = Some(id);
        }
        if let Some(node) = next.and_then(|n| self.nodes.get_mut(n)) {
            node.prev = Some(id);
        }
        Some(id)
    }

    /// Unlink and return the node after `at`, if any. The node after the
    /// removed one gets `at` as its new predecessor.
    pub fn remove_next(&mut self, at: NodeId) -> Option<T> {
        let victim = self.nodes.get(at)?.next?;
        let removed = self.nodes.remove(victim)?;
        if let Some(node) = self.nodes.get_mut(at) {
            node.next = removed.next;
        }
        if let Some(node) = removed.next.and_then(|n| self.nodes.get_mut(n)) {
            node.prev = Some(at);
        }
        Some(removed.item)
    }

    /// Unlink `id` from the list starting at `head` in O(1).
    ///
    /// `head` is only rewritten when `id` is the first node. Returns `None`
    /// if `id` is stale.
    pub fn unlink_node(&mut self, head: &mut Link, id: NodeId) -> Option<T> {
        let removed = self.nodes.remove(id)?;
        match removed.prev {
            Some(p) => {
                if let Some(node) = self.nodes.get_mut(p) {
                    node.next = removed.next;
                }
            }
            None => {
                if *head == Some(id) {
                    *head = removed.next;
                }
            }
        }
        if let Some(node) = removed.next.and_then(|n| self.nodes.get_mut(n)) {
            node.prev = removed.prev;
        }
        Some(removed.item)
    }

    pub fn iter(&self, head: Link) -> DChainIter<'_, T> {
        DChainIter {
            nodes: &self.nodes,
            cursor: head,
        }
    }

    /// Free every node of one list and reset `head`. Returns how many were freed.
    pub fn clear_chain(&mut self, head: &mut Link) -> usize {
        let mut freed = 0;
        let mut cursor = head.take();
        while let Some(id) = cursor {
            cursor = self.nodes.remove(id).and_then(|n| n.next);
            freed += 1;
        }
        freed
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
