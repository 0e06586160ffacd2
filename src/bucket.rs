//! The bucket contract and the erase algorithms shared across bucket
//! implementations.
//!
//! A bucket is one slot of the table's fixed array: a short sequence
//! with O(1) push-to-front, linear predicate search/removal, and a
//! cursor over its elements. The table never reaches into a bucket's
//! node structure; everything goes through this trait.

use crate::pointer::Pointer;
use crate::traits::KeyTraits;

/// A sequence container usable as one hash bucket.
///
/// Cursors are small detached values: they borrow nothing and are
/// resolved against the bucket on each use. The end-of-sequence cursor
/// is a well-defined value ([`Bucket::cursor_end`]); a cursor that no
/// longer resolves (its element was erased) behaves like end.
pub trait Bucket<P: Pointer>: Default {
    /// Position within the bucket. `cursor_end()` is the one canonical
    /// invalid value.
    type Cursor: Copy + Eq + core::fmt::Debug;

    /// True when [`Bucket::erase_at`] runs in constant time. Singly
    /// linked buckets need a predecessor scan and report false.
    const SUPPORTS_CONSTANT_ORDER_ERASE: bool;

    fn push_front(&mut self, ptr: P);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn clear(&mut self);

    /// Cursor at the first element, or `cursor_end()` when empty.
    fn cursor_front(&self) -> Self::Cursor;
    /// The canonical one-past-the-last cursor.
    fn cursor_end(&self) -> Self::Cursor;
    /// Step forward. At end this is a no-op returning end.
    fn next(&self, c: Self::Cursor) -> Self::Cursor;
    /// Step backward. From end this yields the last element; from the
    /// front it yields end.
    fn prev(&self, c: Self::Cursor) -> Self::Cursor;
    /// Resolve a cursor to its element, `None` for end/stale cursors.
    fn get(&self, c: Self::Cursor) -> Option<&P>;
    /// Locate a member by object identity.
    fn cursor_to(&self, target: *const P::Target) -> Option<Self::Cursor>;

    /// First element satisfying `pred`, front to back.
    fn find_if<F>(&self, pred: F) -> Option<&P>
    where
        F: FnMut(&P::Target) -> bool;
    /// Remove and return the first element satisfying `pred`.
    fn erase_if<F>(&mut self, pred: F) -> Option<P>
    where
        F: FnMut(&P::Target) -> bool;
    /// Remove and return the element at `c`; `None` for end/stale.
    fn erase_at(&mut self, c: Self::Cursor) -> Option<P>;
}

/// Remove the first element of `bucket` whose key is `equal_to` `key`.
///
/// Key equality may match any one of several colliding duplicates; use
/// [`erase_by_identity`] to remove a specific object.
pub fn erase_by_key<P, B, KT>(bucket: &mut B, key: &KT::Key) -> Option<P>
where
    P: Pointer,
    B: Bucket<P>,
    KT: KeyTraits<P::Target>,
{
    bucket.erase_if(|obj| KT::equal_to(key, &KT::get_key(obj)))
}

/// Remove the element of `bucket` at address `target`, matching by
/// pointer identity.
///
/// Dispatches on the bucket's erase capability: constant-order buckets
/// locate the node by cursor and unlink it directly, others fall back to
/// a linear identity scan.
pub fn erase_by_identity<P, B>(bucket: &mut B, target: *const P::Target) -> Option<P>
where
    P: Pointer,
    B: Bucket<P>,
{
    if B::SUPPORTS_CONSTANT_ORDER_ERASE {
        let c = bucket.cursor_to(target)?;
        bucket.erase_at(c)
    } else {
        bucket.erase_if(|obj| core::ptr::eq(obj, target))
    }
}
