//! Default bucket: a singly linked sequence with slotmap-backed nodes.
//!
//! The links that an intrusive list would embed in the object live in a
//! `SlotMap` arena instead, so stored pointers stay untouched and node
//! handles are stable and generational: a cursor to an erased element
//! resolves to "not found" rather than aliasing a reused slot.

use slotmap::{DefaultKey, SlotMap};

use crate::bucket::Bucket;
use crate::pointer::Pointer;

struct Node<P> {
    ptr: P,
    next: Option<DefaultKey>,
}

/// Singly linked bucket. Push-to-front is O(1); predicate search,
/// cursor-based erase, and backward cursor steps are linear in the
/// chain length, which stays short under a reasonable hash.
pub struct SlotList<P> {
    nodes: SlotMap<DefaultKey, Node<P>>,
    head: Option<DefaultKey>,
}

impl<P> SlotList<P> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::new(),
            head: None,
        }
    }

    fn unlink(&mut self, prev: Option<DefaultKey>, k: DefaultKey) -> Option<P> {
        let node = self.nodes.remove(k)?;
        match prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        Some(node.ptr)
    }
}

impl<P> Default for SlotList<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Pointer> Bucket<P> for SlotList<P> {
    /// `None` is the end-of-sequence cursor.
    type Cursor = Option<DefaultKey>;

    const SUPPORTS_CONSTANT_ORDER_ERASE: bool = false;

    fn push_front(&mut self, ptr: P) {
        let next = self.head;
        let k = self.nodes.insert(Node { ptr, next });
        self.head = Some(k);
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
    }

    fn cursor_front(&self) -> Self::Cursor {
        self.head
    }

    fn cursor_end(&self) -> Self::Cursor {
        None
    }

    fn next(&self, c: Self::Cursor) -> Self::Cursor {
        c.and_then(|k| self.nodes.get(k)).and_then(|n| n.next)
    }

    fn prev(&self, c: Self::Cursor) -> Self::Cursor {
        if c == self.head {
            // Backing up from the front (or within an empty bucket)
            // yields end.
            return None;
        }
        let mut cur = self.head;
        while let Some(k) = cur {
            let next = self.nodes[k].next;
            if next == c {
                return cur;
            }
            cur = next;
        }
        None
    }

    fn get(&self, c: Self::Cursor) -> Option<&P> {
        c.and_then(|k| self.nodes.get(k)).map(|n| &n.ptr)
    }

    fn cursor_to(&self, target: *const P::Target) -> Option<Self::Cursor> {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if core::ptr::eq(node.ptr.as_ptr(), target) {
                return Some(cur);
            }
            cur = node.next;
        }
        None
    }

    fn find_if<F>(&self, mut pred: F) -> Option<&P>
    where
        F: FnMut(&P::Target) -> bool,
    {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if pred(&*node.ptr) {
                return Some(&node.ptr);
            }
            cur = node.next;
        }
        None
    }

    fn erase_if<F>(&mut self, mut pred: F) -> Option<P>
    where
        F: FnMut(&P::Target) -> bool,
    {
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.head;
        while let Some(k) = cur {
            if pred(&*self.nodes[k].ptr) {
                return self.unlink(prev, k);
            }
            prev = cur;
            cur = self.nodes[k].next;
        }
        None
    }

    fn erase_at(&mut self, c: Self::Cursor) -> Option<P> {
        let k = c?;
        if !self.nodes.contains_key(k) {
            return None;
        }
        // Predecessor scan; the flag above advertises this as linear.
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.head;
        while let Some(ck) = cur {
            if ck == k {
                return self.unlink(prev, k);
            }
            prev = cur;
            cur = self.nodes[ck].next;
        }
        None
    }
}
