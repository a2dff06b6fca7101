//! Chains: singly linked lists stored in one generational arena.
//!
//! Nodes live in a `SlotMap` and link to each other by `NodeId`. A list is
//! identified by its head link (`Link`), which the caller owns; many lists
//! can share one arena. Removing a node frees its slot and bumps the slot
//! generation, so an id held past removal resolves to `None` rather than to
//! whatever is stored there next.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Generational index of a node in [`Chains`].
    pub struct NodeId;
}

/// Head of a chain, or the `next` field of a node.
pub type Link = Option<NodeId>;

#[derive(Debug)]
struct Node<T> {
    item: T,
    next: Link,
}

#[derive(Debug)]
pub struct Chains<T> {
    nodes: SlotMap<NodeId, Node<T>>,
}

impl<T> Default for Chains<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over one chain, head to tail.
pub struct ChainIter<'a, T> {
    nodes: &'a SlotMap<NodeId, Node<T>>,
    cursor: Link,
}

impl<'a, T> Iterator for ChainIter<'a, T> {
    type Item = (NodeId, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.nodes.get(id)?;
        self.cursor = node.next;
        Some((id, &node.item))
    }
}

impl<T> Chains<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Total nodes across every chain in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|n| &n.item)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|n| &mut n.item)
    }

    /// Link a new node in front of `head`. O(1).
    pub fn push_front(&mut self, head: &mut Link, item: T) -> NodeId {
        let id = self.nodes.insert(Node { item, next: *head });
        *head = Some(id);
        id
    }

    /// Link a new node directly after `at`. Returns `None` if `at` is stale.
    pub fn insert_after(&mut self, at: NodeId, item: T) -> Option<NodeId> {
        let next = self.nodes.get(at)?.next;
        let id = self.nodes.insert(Node { item, next });
        if let Some(node) = self.nodes.get_mut(at) {
            node.next = Some(id);
        }
        Some(id)
    }

    /// Unlink and return the node after `at`, if any.
    pub fn remove_next(&mut self, at: NodeId) -> Option<T> {
        let victim = self.nodes.get(at)?.next?;
        let removed = self.nodes.remove(victim)?;
        if let Some(node) = self.nodes.get_mut(at) {
            node.next = removed.next;
        }
        Some(removed.item)
    }

    pub fn has_next(&self, at: NodeId) -> bool {
        self.nodes.get(at).is_some_and(|n| n.next.is_some())
    }

    pub fn iter(&self, head: Link) -> ChainIter<'_, T> {
        ChainIter {
            nodes: &self.nodes,
            cursor: head,
        }
    }

    /// First node in the chain whose item satisfies `pred`.
    pub fn find<P>(&self, head: Link, mut pred: P) -> Option<NodeId>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter(head).find(|(_, item)| pred(item)).map(|(id, _)| id)
    }

    /// Unlink the first node whose item satisfies `pred` and return its item.
    pub fn unlink<P>(&mut self, head: &mut Link, mut pred: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut prev: Link = None;
        let mut cursor = *head;
        while let Some(id) = cursor {
            let node = self.nodes.get(id)?;
            let (hit, next) = (pred(&node.item), node.next);
            if hit {
                return self.splice_out(head, prev, id);
            }
            prev = Some(id);
            cursor = next;
        }
        None
    }

    /// Unlink the node `id` from the chain starting at `head`.
    ///
    /// Returns `None`, leaving the chain as is, if `id` is stale or is not
    /// reachable from `head`.
    pub fn unlink_node(&mut self, head: &mut Link, id: NodeId) -> Option<T> {
        let mut prev: Link = None;
        let mut cursor = *head;
        while let Some(cur) = cursor {
            if cur == id {
                return self.splice_out(head, prev, id);
            }
            prev = Some(cur);
            cursor = self.nodes.get(cur)?.next;
        }
        None
    }

    fn splice_out(&mut self, head: &mut Link, prev: Link, id: NodeId) -> Option<T> {
        let removed = self.nodes.remove(id)?;
        match prev {
            None => *head = removed.next,
            Some(p) => {
                if let Some(node) = self.nodes.get_mut(p) {
                    node.next = removed.next;
                }
            }
        }
        Some(removed.item)
    }

    /// Free every node of one chain and reset `head`. Returns how many were freed.
    pub fn clear_chain(&mut self, head: &mut Link) -> usize {
        let mut freed = 0;
        let mut cursor = head.take();
        while let Some(id) = cursor {
            cursor = self.nodes.remove(id).and_then(|n| n.next);
            freed += 1;
        }
        freed
    }

    /// Free every node of every chain. Heads held by callers become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
