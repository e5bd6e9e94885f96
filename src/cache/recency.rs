//! Recency List Module
//!
//! Doubly-linked recency order for LRU eviction, stored in an arena.
//!
//! Nodes live in a `Vec` of slots and point at each other by index, so the
//! list owns every node outright and `prev`/`next` never form ownership
//! cycles. Freed slots are recycled through a free list.

/// Stable handle to a node in a [`RecencyList`].
pub type NodeIndex = usize;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<NodeIndex>,
    next: Option<NodeIndex>,
}

// == Recency List ==
/// Tracks entries by recency of use.
///
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Every operation is O(1).
#[derive(Debug)]
pub struct RecencyList<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeIndex>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push Front ==
    /// Inserts a new node as the most recently used and returns its handle.
    pub fn push_front(&mut self, key: K, value: V) -> NodeIndex {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.attach_front(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    ///
    /// Unknown handles are ignored.
    pub fn move_to_front(&mut self, idx: NodeIndex) {
        if self.head == Some(idx) || self.node(idx).is_none() {
            return;
        }
        self.detach(idx);
        self.attach_front(idx);
    }

    // == Unlink ==
    /// Removes a node from the list, returning its key and value.
    ///
    /// The handle becomes invalid and its slot is reused by a later push.
    pub fn unlink(&mut self, idx: NodeIndex) -> Option<(K, V)> {
        self.node(idx)?;
        self.detach(idx);

        let node = self.slots.get_mut(idx).and_then(Option::take)?;
        self.free.push(idx);
        self.len -= 1;
        Some((node.key, node.value))
    }

    // == Pop Back ==
    /// Removes and returns the least recently used node.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        self.unlink(tail)
    }

    // == Peek Back ==
    /// Returns the least recently used node without removing it.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.tail
            .and_then(|idx| self.node(idx))
            .map(|node| (&node.key, &node.value))
    }

    /// Value stored at `idx`.
    pub fn get(&self, idx: NodeIndex) -> Option<&V> {
        self.node(idx).map(|node| &node.value)
    }

    /// Mutable value stored at `idx`. Does not change recency.
    pub fn get_mut(&mut self, idx: NodeIndex) -> Option<&mut V> {
        self.node_mut(idx).map(|node| &mut node.value)
    }

    /// Key stored at `idx`.
    pub fn key(&self, idx: NodeIndex) -> Option<&K> {
        self.node(idx).map(|node| &node.key)
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn node(&self, idx: NodeIndex) -> Option<&Node<K, V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: NodeIndex) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Splices a node out of the chain, leaving it in its slot.
    fn detach(&mut self, idx: NodeIndex) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, idx: NodeIndex) {
        let old_head = self.head;
        match self.node_mut(idx) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            }
            None => return,
        }

        match old_head {
            Some(h) => {
                if let Some(node) = self.node_mut(h) {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<NodeIndex>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some((&node.key, &node.value))
    }
}
