//! Fixed-bucket hash table over externally allocated objects.
//!
//! The table owns a compile-time-sized array of buckets and a live
//! element counter, and delegates all storage to the bucket type. It
//! never allocates or copies the indexed objects; it only moves
//! [`Pointer`] handles in and out of buckets.
//!
//! Invariant: `len() == Σ buckets[i].len()` at every public-API
//! boundary ([`HashTable::len_slow`] recomputes the sum for audits).

use core::marker::PhantomData;

use crate::bucket::{self, Bucket};
use crate::checks::DebugChecks;
use crate::pointer::Pointer;
use crate::slot_list::SlotList;
use crate::traits::{DefaultHashTraits, DefaultKeyTraits, HashTraits, KeyTraits};

/// Hash table keyed by the stored objects' own keys.
///
/// Type parameters:
/// - `P`: stored pointer kind (`Box<T>`, `Rc<T>`, or `&T`).
/// - `KT`: key extraction/comparison strategy.
/// - `HT`: hash strategy mapping keys to `[0, N)`.
/// - `B`: bucket container; any [`Bucket`] implementation qualifies.
/// - `N`: bucket count, fixed for the table's lifetime. Prefer a prime
///   (37, 211, 389); the mod-prime reduction papers over the hidden
///   periods of cheap hash functions.
///
/// The caller contract mirrors the container's kernel heritage: an
/// object may be inside at most one table at a time, and its key must
/// not change while it is stored. Both are debug-asserted where cheap
/// enough, undefined (but memory-safe) otherwise.
pub struct HashTable<
    P,
    KT = DefaultKeyTraits,
    HT = DefaultHashTraits,
    B = SlotList<P>,
    const N: usize = 37,
> where
    P: Pointer,
{
    buckets: [B; N],
    count: usize,
    checks: DebugChecks,
    _strategies: PhantomData<(P, KT, HT)>,
}

impl<P, KT, HT, B, const N: usize> HashTable<P, KT, HT, B, N>
where
    P: Pointer,
    B: Bucket<P>,
{
    /// Create an empty table. Panics if `N == 0`.
    pub fn new() -> Self {
        assert!(N > 0, "hash tables must have at least one bucket");
        Self {
            buckets: core::array::from_fn(|_| B::default()),
            count: 0,
            checks: DebugChecks::new(),
            _strategies: PhantomData,
        }
    }

    /// Number of stored elements, from the maintained counter.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Recount by summing bucket sizes. O(N); test/audit aid.
    pub fn len_slow(&self) -> usize {
        self.buckets.iter().map(B::len).sum()
    }

    /// Empty every bucket. O(N + len): each bucket is visited even when
    /// it holds nothing.
    pub fn clear(&mut self) {
        let _g = self.checks.enter();
        for b in &mut self.buckets {
            b.clear();
        }
        self.count = 0;
    }

    /// Cursor at the first element in bucket order, or [`HashTable::end`]
    /// when the table is empty.
    pub fn first(&self) -> Cursor<B::Cursor> {
        let mut c = Cursor {
            bucket: 0,
            pos: self.buckets[0].cursor_front(),
        };
        c.skip_forward(self);
        c
    }

    /// The canonical end cursor: one past the last element of the last
    /// bucket, regardless of which buckets are empty. Every exhausted
    /// cursor the table hands out normalizes to this value, so cursor
    /// equality against `end()` is the loop condition.
    pub fn end(&self) -> Cursor<B::Cursor> {
        Cursor {
            bucket: N - 1,
            pos: self.buckets[N - 1].cursor_end(),
        }
    }

    /// Iterate every element: buckets in ascending index order, each
    /// bucket front to back (most recently inserted first).
    pub fn iter(&self) -> Iter<'_, P, KT, HT, B, N> {
        Iter {
            table: self,
            cursor: self.first(),
        }
    }

    /// Remove the element the cursor designates. A cursor at end, or one
    /// whose element was already erased, is a no-op returning `None`.
    /// Linear within the bucket unless the bucket supports constant-order
    /// erase.
    pub fn erase_at(&mut self, cursor: Cursor<B::Cursor>) -> Option<P> {
        let _g = self.checks.enter();
        let ret = self.buckets[cursor.bucket].erase_at(cursor.pos);
        if ret.is_some() {
            self.count -= 1;
        }
        ret
    }

    /// First element satisfying `pred`, scanning buckets in ascending
    /// index order and each bucket front to back. O(N + len) worst case.
    pub fn find_if<F>(&self, mut pred: F) -> Option<&P>
    where
        F: FnMut(&P::Target) -> bool,
    {
        let _g = self.checks.enter();
        if self.is_empty() {
            return None;
        }
        self.buckets
            .iter()
            .filter(|b| !b.is_empty())
            .find_map(move |b| b.find_if(&mut pred))
    }

    /// Remove and return the first element satisfying `pred`, in
    /// [`HashTable::find_if`] order.
    pub fn erase_if<F>(&mut self, mut pred: F) -> Option<P>
    where
        F: FnMut(&P::Target) -> bool,
    {
        let _g = self.checks.enter();
        if self.count == 0 {
            return None;
        }
        for b in &mut self.buckets {
            if b.is_empty() {
                continue;
            }
            if let Some(ret) = b.erase_if(&mut pred) {
                self.count -= 1;
                return Some(ret);
            }
        }
        None
    }

    fn contains_object(&self, target: *const P::Target) -> bool {
        self.buckets.iter().any(|b| b.cursor_to(target).is_some())
    }
}

impl<P, KT, HT, B, const N: usize> HashTable<P, KT, HT, B, N>
where
    P: Pointer,
    KT: KeyTraits<P::Target>,
    HT: HashTraits<KT::Key>,
    B: Bucket<P>,
{
    fn bucket_index(key: &KT::Key) -> usize {
        let ndx = HT::bucket_of(key, N);
        // A hash strategy that leaves [0, N) is broken, not unlucky.
        assert!(ndx < N, "hash strategy produced out-of-range bucket index");
        ndx
    }

    /// Store `ptr`, pushed to the front of its bucket. O(1).
    ///
    /// The object must not already be inside a container (debug-asserted
    /// with a full identity scan; unchecked in release builds).
    pub fn insert(&mut self, ptr: P) {
        let _g = self.checks.enter();
        debug_assert!(
            !self.contains_object(ptr.as_ptr()),
            "inserted object is already a member of this table"
        );
        let ndx = Self::bucket_index(&KT::get_key(&*ptr));
        self.buckets[ndx].push_front(ptr);
        self.count += 1;
    }

    /// First element whose key is `equal_to` `key`. The element stays in
    /// the table. O(1 + chain length).
    pub fn find(&self, key: &KT::Key) -> Option<&P> {
        let _g = self.checks.enter();
        self.buckets[Self::bucket_index(key)]
            .find_if(|obj| KT::equal_to(key, &KT::get_key(obj)))
    }

    /// Remove and return the first element whose key is `equal_to` `key`.
    /// With colliding duplicates this removes whichever scans first; use
    /// [`HashTable::erase_object`] to remove a specific object.
    pub fn erase(&mut self, key: &KT::Key) -> Option<P> {
        let _g = self.checks.enter();
        let ndx = Self::bucket_index(key);
        let ret = bucket::erase_by_key::<P, B, KT>(&mut self.buckets[ndx], key);
        if ret.is_some() {
            self.count -= 1;
        }
        ret
    }

    /// Remove `obj` by pointer identity, deriving the bucket from the
    /// object's own key. `None` when the object is not a member.
    pub fn erase_object(&mut self, obj: &P::Target) -> Option<P> {
        let _g = self.checks.enter();
        let ndx = Self::bucket_index(&KT::get_key(obj));
        let ret = bucket::erase_by_identity(&mut self.buckets[ndx], obj);
        if ret.is_some() {
            self.count -= 1;
        }
        ret
    }

    /// Position a cursor at a known member, recomputing its bucket from
    /// its key. Returns `None` when `obj` is not in the table (or its
    /// key moved since insertion).
    pub fn make_cursor(&self, obj: &P::Target) -> Option<Cursor<B::Cursor>> {
        let _g = self.checks.enter();
        let ndx = Self::bucket_index(&KT::get_key(obj));
        let pos = self.buckets[ndx].cursor_to(obj)?;
        Some(Cursor { bucket: ndx, pos })
    }
}

impl<P, KT, HT, B, const N: usize> Default for HashTable<P, KT, HT, B, N>
where
    P: Pointer,
    B: Bucket<P>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, KT, HT, B, const N: usize> Drop for HashTable<P, KT, HT, B, N>
where
    P: Pointer,
{
    fn drop(&mut self) {
        // Owning pointer kinds release leftovers via the buckets' own
        // drop glue. A non-owning table dropped non-empty means the
        // caller lost track of members.
        debug_assert!(
            P::MANAGES_LIFETIME || self.count == 0,
            "non-owning hash table dropped while still holding elements"
        );
    }
}

/// Bidirectional cursor over the whole table.
///
/// Pairs a bucket index with a bucket-local position and hides bucket
/// boundaries: stepping off one bucket skips to the next (or previous)
/// non-empty one. Like bucket cursors, it is a small detached value;
/// every operation takes the owning table by reference, and using it
/// with any other table is a caller error (it may panic or resolve to
/// arbitrary `None`s, but stays memory-safe).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Cursor<C> {
    bucket: usize,
    pos: C,
}

impl<C: Copy + Eq + core::fmt::Debug> Cursor<C> {
    /// Borrow the designated element, `None` at end (or when the element
    /// has since been erased).
    pub fn get<'a, P, KT, HT, B, const N: usize>(
        &self,
        table: &'a HashTable<P, KT, HT, B, N>,
    ) -> Option<&'a P>
    where
        P: Pointer,
        B: Bucket<P, Cursor = C>,
    {
        table.buckets[self.bucket].get(self.pos)
    }

    pub fn is_valid<P, KT, HT, B, const N: usize>(
        &self,
        table: &HashTable<P, KT, HT, B, N>,
    ) -> bool
    where
        P: Pointer,
        B: Bucket<P, Cursor = C>,
    {
        self.get(table).is_some()
    }

    /// Clone the underlying handle out of the table (shared-ownership
    /// kinds). The element itself stays stored.
    pub fn copy_pointer<P, KT, HT, B, const N: usize>(
        &self,
        table: &HashTable<P, KT, HT, B, N>,
    ) -> Option<P>
    where
        P: Pointer + Clone,
        B: Bucket<P, Cursor = C>,
    {
        self.get(table).cloned()
    }

    /// Advance to the next element, skipping forward over empty buckets.
    /// At end this is a no-op.
    pub fn move_next<P, KT, HT, B, const N: usize>(&mut self, table: &HashTable<P, KT, HT, B, N>)
    where
        P: Pointer,
        B: Bucket<P, Cursor = C>,
    {
        if table.buckets[self.bucket].get(self.pos).is_none() {
            return;
        }
        self.pos = table.buckets[self.bucket].next(self.pos);
        self.skip_forward(table);
    }

    /// Step back to the previous element, skipping backward over empty
    /// buckets. Stepping back from `end()` lands on the last element;
    /// stepping back past the logical beginning wraps to the canonical
    /// end sentinel.
    pub fn move_prev<P, KT, HT, B, const N: usize>(&mut self, table: &HashTable<P, KT, HT, B, N>)
    where
        P: Pointer,
        B: Bucket<P, Cursor = C>,
    {
        let b = &table.buckets[self.bucket];
        self.pos = b.prev(self.pos);
        if b.get(self.pos).is_some() {
            return;
        }

        // The current bucket is exhausted going backward; look for the
        // last element of an earlier non-empty bucket.
        while self.bucket > 0 {
            self.bucket -= 1;
            let b = &table.buckets[self.bucket];
            if !b.is_empty() {
                self.pos = b.prev(b.cursor_end());
                return;
            }
        }

        // Backed up past the beginning: settle at the canonical end.
        self.bucket = N - 1;
        self.pos = table.buckets[N - 1].cursor_end();
    }

    /// Normalize an exhausted bucket-local position: scan ascending for
    /// the first non-empty bucket, settling at the canonical end when
    /// none remain.
    fn skip_forward<P, KT, HT, B, const N: usize>(&mut self, table: &HashTable<P, KT, HT, B, N>)
    where
        P: Pointer,
        B: Bucket<P, Cursor = C>,
    {
        if table.buckets[self.bucket].get(self.pos).is_some() {
            return;
        }
        while self.bucket < N - 1 {
            self.bucket += 1;
            let b = &table.buckets[self.bucket];
            if !b.is_empty() {
                self.pos = b.cursor_front();
                return;
            }
        }
        self.pos = table.buckets[N - 1].cursor_end();
    }
}

/// Forward iterator from [`HashTable::first`] to [`HashTable::end`],
/// yielding the stored pointers.
pub struct Iter<'a, P, KT, HT, B, const N: usize>
where
    P: Pointer,
    B: Bucket<P>,
{
    table: &'a HashTable<P, KT, HT, B, N>,
    cursor: Cursor<B::Cursor>,
}

impl<'a, P, KT, HT, B, const N: usize> Iterator for Iter<'a, P, KT, HT, B, N>
where
    P: Pointer,
    B: Bucket<P>,
{
    type Item = &'a P;

    fn next(&mut self) -> Option<&'a P> {
        let item = self.table.buckets[self.cursor.bucket].get(self.cursor.pos)?;
        self.cursor.move_next(self.table);
        Some(item)
    }
}
