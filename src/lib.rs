//! bucket-table: a single-threaded, fixed-bucket hash table that
//! indexes externally allocated objects by pointer, without ever
//! copying or allocating the objects itself.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: the kernel-style "container of already-allocated objects"
//!   pattern, rebuilt in safe, verifiable layers so each piece can be
//!   reasoned about independently.
//! - Layers:
//!   - Pointer: the stored-reference ownership kinds. `Box<T>` makes
//!     the table the exclusive owner, `Rc<T>` a shared owner, `&T` a
//!     pure index over objects owned elsewhere.
//!   - Bucket + SlotList<P>: the per-bucket sequence contract and its
//!     default implementation, a singly linked list whose links live in
//!     a slotmap arena (stable generational node handles instead of
//!     link fields embedded in the object).
//!   - HashTable<P, KT, HT, B, N>: a fixed array of N buckets plus a
//!     live counter; insert/find/erase/clear/erase_if/find_if and
//!     bucket-index computation. N is a const generic, so the bucket
//!     array never resizes or rehashes.
//!   - Cursor: a bidirectional cursor pairing a bucket index with a
//!     bucket-local position, hiding bucket boundaries behind
//!     skip-forward/skip-backward transitions.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` by design (Rc pointers, Cell
//!   guard); callers serialize externally if they must share.
//! - The table allocates bucket nodes only, never the indexed objects.
//! - Keys are immutable while stored; an object belongs to at most one
//!   container at a time (debug-asserted on insert).
//! - Absent keys are ordinary `None` results, never errors.
//!
//! Strategy traits
//! - KeyTraits: key extraction plus `less_than`/`equal_to`, an
//!   equivalence relation with a consistent strict weak ordering. The
//!   hash table itself only calls `equal_to`; buckets are unordered.
//! - HashTraits: maps a key into `[0, N)`. An out-of-range result is a
//!   fatal assertion, not a tolerated condition. The default hashes
//!   with the (deterministic) std `DefaultHasher` and reduces mod N.
//!
//! Cursor semantics
//! - `first()` normalizes forward from bucket 0; `end()` is always the
//!   end position of the last bucket. Every exhausted cursor the crate
//!   produces is normalized to that canonical end, so `first() == end()`
//!   exactly when the table is empty.
//! - Stepping forward at end is a no-op; stepping backward from end
//!   lands on the last element; stepping backward past the beginning
//!   wraps to the canonical end.
//! - Cursors are detached values resolved against the table on each
//!   use. Thanks to generational node handles, a cursor whose element
//!   was erased resolves to `None` instead of aliasing a reused slot.
//!
//! Validation
//! - Debug builds carry a reentrancy guard on public entry points and
//!   membership/emptiness assertions (duplicate insert, non-owning drop
//!   while non-empty). Release builds compile all of it out.
//!
//! Notes and non-goals
//! - No thread-safety, no persistence, no resizing or rehashing; the
//!   bucket count is fixed for the table's lifetime.
//! - Bucket implementations beyond SlotList plug in via the Bucket
//!   trait; constant-order erase is advertised through a capability
//!   flag and exploited by the shared erase helpers.

mod bucket;
mod checks;
mod hash_table;
mod hash_table_proptest;
mod pointer;
mod slot_list;
mod traits;

// Public surface
pub use bucket::{erase_by_identity, erase_by_key, Bucket};
pub use hash_table::{Cursor, HashTable, Iter};
pub use pointer::Pointer;
pub use slot_list::SlotList;
pub use traits::{DefaultHashTraits, DefaultKeyTraits, HashTraits, KeyTraits, Keyed};
