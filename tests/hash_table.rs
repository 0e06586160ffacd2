// HashTable integration suite (consolidated).
//
// Each test documents the behavior being verified and the invariants it
// leans on. Core invariants exercised:
// - Counting: len() equals net inserts and equals the per-bucket sum.
// - Identity: find/erase return the exact inserted object, never a
//   key-equal impostor.
// - Ownership kinds: Box tables release leftovers on drop, Rc tables
//   share, &T tables index without owning (and assert empty-on-drop in
//   debug builds).
// - Iteration: every member exactly once, bucket-ascending, LIFO within
//   a bucket, for both skewed and uniform hash distributions.

use bucket_table::{DefaultKeyTraits, HashTable, HashTraits, Keyed, SlotList};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug)]
struct Handle {
    id: u64,
    drops: Option<Rc<Cell<u32>>>,
}

impl Handle {
    fn new(id: u64) -> Self {
        Handle { id, drops: None }
    }

    fn probed(id: u64, drops: &Rc<Cell<u32>>) -> Self {
        Handle {
            id,
            drops: Some(Rc::clone(drops)),
        }
    }
}

impl Keyed for Handle {
    type Key = u64;
    fn key(&self) -> u64 {
        self.id
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if let Some(d) = &self.drops {
            d.set(d.get() + 1);
        }
    }
}

struct ModHash;
impl HashTraits<u64> for ModHash {
    fn bucket_of(key: &u64, num_buckets: usize) -> usize {
        (key % num_buckets as u64) as usize
    }
}

type BoxTable<const N: usize> =
    HashTable<Box<Handle>, DefaultKeyTraits, ModHash, SlotList<Box<Handle>>, N>;
type RcTable<const N: usize> =
    HashTable<Rc<Handle>, DefaultKeyTraits, ModHash, SlotList<Rc<Handle>>, N>;
type RefTable<'a, const N: usize> =
    HashTable<&'a Handle, DefaultKeyTraits, ModHash, SlotList<&'a Handle>, N>;

// Test: the canonical collision scenario. 4 buckets, key mod 4, keys
// {1, 5, 9, 2}: 1/5/9 collide into bucket 1, 2 lands in bucket 2.
#[test]
fn four_bucket_reference_scenario() {
    let mut t: RcTable<4> = HashTable::new();
    for id in [1u64, 5, 9, 2] {
        t.insert(Rc::new(Handle::new(id)));
    }
    assert_eq!(t.len(), 4);
    assert_eq!(t.len_slow(), 4);
    assert!(t.find(&5).is_some());

    let removed = t.erase(&9).expect("present");
    assert_eq!(removed.id, 9);
    assert_eq!(t.len(), 3);

    // Bucket 1 survivors most-recently-inserted first, then bucket 2.
    let order: Vec<u64> = t.iter().map(|p| p.id).collect();
    assert_eq!(order, vec![5, 1, 2]);
}

// Test: exclusive ownership. Erasing hands the Box back; dropping a
// non-empty Box table releases the rest exactly once.
#[test]
fn box_table_owns_and_releases() {
    let drops = Rc::new(Cell::new(0));
    {
        let mut t: BoxTable<4> = HashTable::new();
        for id in 0u64..6 {
            t.insert(Box::new(Handle::probed(id, &drops)));
        }

        let out = t.erase(&3).expect("present");
        assert_eq!(out.id, 3);
        drop(out);
        assert_eq!(drops.get(), 1, "erased element back in caller hands");
        assert_eq!(t.len(), 5);
        // Table dropped here while still holding five elements.
    }
    assert_eq!(drops.get(), 6, "owning drop releases every leftover once");
}

// Test: shared ownership. The table holds one strong count per entry;
// erase returns that share, clear drops the table's shares only.
#[test]
fn rc_table_shares_ownership() {
    let mut t: RcTable<4> = HashTable::new();
    let a = Rc::new(Handle::new(1));
    t.insert(Rc::clone(&a));
    assert_eq!(Rc::strong_count(&a), 2);

    let back = t.erase(&1).expect("present");
    assert!(Rc::ptr_eq(&back, &a));
    assert_eq!(Rc::strong_count(&a), 2, "share moved, not dropped");
    drop(back);
    assert_eq!(Rc::strong_count(&a), 1);

    t.insert(Rc::clone(&a));
    t.clear();
    assert_eq!(Rc::strong_count(&a), 1, "clear releases the table's share");
    assert!(a.id == 1, "object itself outlives table membership");
}

// Test: non-owning tables index objects that live elsewhere. Members
// must be removed before the table goes away.
#[test]
fn ref_table_is_a_pure_index() {
    let objs: Vec<Handle> = (0u64..8).map(Handle::new).collect();
    let mut t: RefTable<'_, 4> = HashTable::new();
    for o in &objs {
        t.insert(o);
    }
    assert_eq!(t.len(), 8);

    let found = t.find(&6).expect("present");
    assert!(std::ptr::eq(*found, &objs[6]), "find is identity-preserving");

    let removed = t.erase(&6).expect("present");
    assert!(std::ptr::eq(removed, &objs[6]));
    assert_eq!(t.len(), 7);

    t.clear();
    assert!(t.is_empty());
    // Table drops empty; the objects are untouched in the Vec.
    assert_eq!(objs.len(), 8);
}

// Test (debug-only): dropping a non-owning table that still holds
// members is a programming error.
#[cfg(debug_assertions)]
#[test]
fn ref_table_nonempty_drop_asserts() {
    let objs: Vec<Handle> = (0u64..3).map(Handle::new).collect();
    let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut t: RefTable<'_, 4> = HashTable::new();
        for o in &objs {
            t.insert(o);
        }
        // Dropped non-empty on scope exit.
    }));
    assert!(res.is_err(), "expected empty-on-drop assertion in debug builds");
}

// Test: erase(key) with colliding duplicate keys removes one element
// per call, most recently inserted first; identity-based erase picks
// the exact duplicate.
#[test]
fn duplicate_keys_coexist() {
    let mut t: RcTable<4> = HashTable::new();
    let older = Rc::new(Handle::new(5));
    let newer = Rc::new(Handle::new(5));
    t.insert(Rc::clone(&older));
    t.insert(Rc::clone(&newer));
    assert_eq!(t.len(), 2);

    let first_out = t.erase(&5).expect("present");
    assert!(Rc::ptr_eq(&first_out, &newer), "front of the bucket goes first");

    t.insert(Rc::clone(&newer));
    let by_identity = t.erase_object(&older).expect("member");
    assert!(Rc::ptr_eq(&by_identity, &older));
    assert_eq!(t.find(&5).map(|p| Rc::ptr_eq(p, &newer)), Some(true));
}

// Test: erase via cursor, then re-find: the key must be gone; the
// remaining members are untouched.
#[test]
fn erase_at_then_refind_misses() {
    let mut t: RcTable<4> = HashTable::new();
    let victim = Rc::new(Handle::new(9));
    t.insert(Rc::new(Handle::new(1)));
    t.insert(Rc::clone(&victim));
    t.insert(Rc::new(Handle::new(2)));

    let c = t.make_cursor(&victim).expect("member");
    let removed = t.erase_at(c).expect("present");
    assert!(Rc::ptr_eq(&removed, &victim));

    assert!(t.find(&9).is_none());
    assert!(t.find(&1).is_some());
    assert!(t.find(&2).is_some());
    assert_eq!(t.len(), 2);
    assert_eq!(t.len_slow(), 2);
}

// Test: iteration visits the full content set exactly once for a
// uniform spread, a partial spread with gaps, and the empty table.
#[test]
fn iteration_covers_content_set() {
    let mut t: RcTable<7> = HashTable::new();
    assert_eq!(t.iter().count(), 0);

    let keys = [0u64, 3, 8, 10, 13, 20, 27];
    for &id in &keys {
        t.insert(Rc::new(Handle::new(id)));
    }
    let mut seen: Vec<u64> = t.iter().map(|p| p.id).collect();
    assert_eq!(seen.len(), keys.len(), "each member exactly once");
    seen.sort_unstable();
    let mut expected = keys.to_vec();
    expected.sort_unstable();
    assert_eq!(seen, expected);
}

// Test: clear on a non-empty table resets everything, and the table is
// immediately reusable.
#[test]
fn clear_resets_and_reuses() {
    let mut t: RcTable<4> = HashTable::new();
    for id in 0u64..5 {
        t.insert(Rc::new(Handle::new(id)));
    }
    t.clear();
    assert_eq!(t.len(), 0);
    assert_eq!(t.len_slow(), 0);
    assert_eq!(t.first(), t.end());
    assert!(t.find(&2).is_none());

    t.insert(Rc::new(Handle::new(2)));
    assert_eq!(t.len(), 1);
    assert!(t.find(&2).is_some());
}

// Test: default strategies end to end — Keyed + Ord keys, DefaultHasher
// placement, default bucket count of 37.
#[test]
fn default_strategies_work() {
    let mut t: HashTable<Rc<Handle>> = HashTable::new();
    for id in 0u64..50 {
        t.insert(Rc::new(Handle::new(id)));
    }
    assert_eq!(t.len(), 50);
    assert_eq!(t.len_slow(), 50);
    for id in 0u64..50 {
        assert_eq!(t.find(&id).map(|p| p.id), Some(id));
    }
    assert!(t.find(&99).is_none());
    assert_eq!(t.erase(&25).map(|p| p.id), Some(25));
    assert_eq!(t.len(), 49);
}
