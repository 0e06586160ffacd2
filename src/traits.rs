//! Key and hash strategy traits.
//!
//! Both strategies are zero-sized types selected as generic parameters,
//! so a table's key handling is fixed at compile time and monomorphized
//! away. Defaults are provided for objects that expose their own key
//! ([`Keyed`]) and for keys that implement the std `Hash` trait.

use core::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

/// Implemented by objects that carry their own key.
///
/// The key of an object must not change while the object is inside a
/// container; a moved key silently strands the object in a stale bucket.
pub trait Keyed {
    type Key;

    fn key(&self) -> Self::Key;
}

/// Key extraction and comparison strategy for objects of type `T`.
///
/// Contract: `equal_to` is an equivalence relation (symmetric and
/// transitive) and `less_than` is a strict weak ordering consistent with
/// it. The hash table only ever calls `equal_to` (buckets are unordered);
/// `less_than` is part of the contract so the same strategy type can
/// drive ordered containers.
pub trait KeyTraits<T: ?Sized> {
    type Key;

    fn get_key(obj: &T) -> Self::Key;
    fn less_than(a: &Self::Key, b: &Self::Key) -> bool;
    fn equal_to(a: &Self::Key, b: &Self::Key) -> bool;
}

/// Default key strategy: delegate extraction to [`Keyed`] and comparison
/// to `Ord`.
pub struct DefaultKeyTraits;

impl<T> KeyTraits<T> for DefaultKeyTraits
where
    T: Keyed,
    T::Key: Ord,
{
    type Key = T::Key;

    #[inline]
    fn get_key(obj: &T) -> T::Key {
        obj.key()
    }

    #[inline]
    fn less_than(a: &T::Key, b: &T::Key) -> bool {
        a < b
    }

    #[inline]
    fn equal_to(a: &T::Key, b: &T::Key) -> bool {
        a == b
    }
}

/// Hash strategy mapping a key to a bucket index.
pub trait HashTraits<K> {
    /// Must return a value in `[0, num_buckets)`. The table treats an
    /// out-of-range result as a fatal bug in the strategy, not a
    /// recoverable condition.
    fn bucket_of(key: &K, num_buckets: usize) -> usize;
}

/// Default hash strategy: run the std `DefaultHasher` over the key and
/// reduce mod the bucket count.
///
/// `DefaultHasher::new()` is deterministic, so bucket placement is stable
/// for a given key across tables and runs. Strategies whose hash already
/// lands in range can skip the reduction by implementing [`HashTraits`]
/// directly.
pub struct DefaultHashTraits;

impl<K: Hash> HashTraits<K> for DefaultHashTraits {
    #[inline]
    fn bucket_of(key: &K, num_buckets: usize) -> usize {
        let mut h = DefaultHasher::new();
        key.hash(&mut h);
        (h.finish() % num_buckets as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Obj {
        id: u64,
    }

    impl Keyed for Obj {
        type Key = u64;
        fn key(&self) -> u64 {
            self.id
        }
    }

    #[test]
    fn default_key_traits_delegate() {
        let o = Obj { id: 42 };
        assert_eq!(<DefaultKeyTraits as KeyTraits<Obj>>::get_key(&o), 42);
        assert!(<DefaultKeyTraits as KeyTraits<Obj>>::less_than(&1, &2));
        assert!(!<DefaultKeyTraits as KeyTraits<Obj>>::less_than(&2, &2));
        assert!(<DefaultKeyTraits as KeyTraits<Obj>>::equal_to(&2, &2));
    }

    #[test]
    fn default_hash_is_deterministic_and_in_range() {
        for n in [1usize, 7, 37] {
            for key in 0u64..100 {
                let a = <DefaultHashTraits as HashTraits<u64>>::bucket_of(&key, n);
                let b = <DefaultHashTraits as HashTraits<u64>>::bucket_of(&key, n);
                assert_eq!(a, b);
                assert!(a < n);
            }
        }
    }
}
