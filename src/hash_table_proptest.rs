#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can reach
// internals-adjacent helpers (len_slow, make_cursor) without feature
// gates.

use crate::hash_table::HashTable;
use crate::slot_list::SlotList;
use crate::traits::{DefaultKeyTraits, HashTraits, Keyed};
use proptest::prelude::*;
use std::rc::Rc;

#[derive(Debug)]
struct Obj {
    id: u64,
}

impl Keyed for Obj {
    type Key = u64;
    fn key(&self) -> u64 {
        self.id
    }
}

// Small bucket count + mod hash so collisions are the norm, not the
// exception.
struct ModHash;
impl HashTraits<u64> for ModHash {
    fn bucket_of(key: &u64, num_buckets: usize) -> usize {
        (key % num_buckets as u64) as usize
    }
}

type Table = HashTable<Rc<Obj>, DefaultKeyTraits, ModHash, SlotList<Rc<Obj>>, 7>;

// Keys drawn from a tiny domain; duplicates are allowed by the table
// (it stores objects, not unique keys), so the model is a member list,
// not a map.
#[derive(Clone, Debug)]
enum Op {
    Insert(u64),
    EraseKey(u64),
    EraseObject(usize),
    EraseAt(usize),
    Find(u64),
    FindIf(u64),
    EraseIf(u64),
    Clear,
    Iterate,
    WalkBackward,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let key = 0u64..12;
    let idx = 0usize..24;
    let op = prop_oneof![
        4 => key.clone().prop_map(Op::Insert),
        2 => key.clone().prop_map(Op::EraseKey),
        2 => idx.clone().prop_map(Op::EraseObject),
        2 => idx.prop_map(Op::EraseAt),
        2 => key.clone().prop_map(Op::Find),
        1 => key.clone().prop_map(Op::FindIf),
        1 => key.prop_map(Op::EraseIf),
        1 => Just(Op::Clear),
        2 => Just(Op::Iterate),
        1 => Just(Op::WalkBackward),
    ];
    proptest::collection::vec(op, 1..80)
}

fn member_ptrs(model: &[Rc<Obj>]) -> Vec<*const Obj> {
    let mut v: Vec<*const Obj> = model.iter().map(Rc::as_ptr).collect();
    v.sort();
    v
}

// Property: state-machine equivalence against a plain member list.
// Invariants exercised across random operation sequences:
// - len() == len_slow() == model size after every op.
// - find/erase by key hit iff the model holds that key, and always
//   return an actual member with the requested key.
// - erase_object/erase_at remove exactly the designated member by
//   identity; stale cursors and strangers are clean no-ops.
// - Full iteration visits each member exactly once, independent of how
//   keys collided into buckets; backward walking from end() visits the
//   same sequence reversed.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let mut sut = Table::new();
        let mut model: Vec<Rc<Obj>> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(id) => {
                    let obj = Rc::new(Obj { id });
                    sut.insert(Rc::clone(&obj));
                    model.push(obj);
                }
                Op::EraseKey(id) => {
                    let expect = model.iter().any(|o| o.id == id);
                    match sut.erase(&id) {
                        Some(removed) => {
                            prop_assert!(expect, "erase hit a key the model lacks");
                            prop_assert_eq!(removed.id, id);
                            let i = model
                                .iter()
                                .position(|o| Rc::ptr_eq(o, &removed))
                                .expect("removed element must be a member");
                            let _ = model.swap_remove(i);
                        }
                        None => prop_assert!(!expect, "erase missed a present key"),
                    }
                }
                Op::EraseObject(i) => {
                    if model.is_empty() {
                        continue;
                    }
                    let victim = Rc::clone(&model[i % model.len()]);
                    let removed = sut.erase_object(&victim).expect("member erase");
                    prop_assert!(Rc::ptr_eq(&removed, &victim));
                    let j = model.iter().position(|o| Rc::ptr_eq(o, &victim)).unwrap();
                    let _ = model.swap_remove(j);

                    // A fresh object with the same key is not a member.
                    let stranger = Obj { id: victim.id };
                    prop_assert!(sut.erase_object(&stranger).is_none());
                }
                Op::EraseAt(i) => {
                    if model.is_empty() {
                        continue;
                    }
                    let victim = Rc::clone(&model[i % model.len()]);
                    let c = sut.make_cursor(&victim).expect("member cursor");
                    let removed = sut.erase_at(c).expect("cursor erase");
                    prop_assert!(Rc::ptr_eq(&removed, &victim));
                    let j = model.iter().position(|o| Rc::ptr_eq(o, &victim)).unwrap();
                    let _ = model.swap_remove(j);

                    // The cursor is now stale; erasing again must no-op.
                    let before = sut.len();
                    prop_assert!(sut.erase_at(c).is_none());
                    prop_assert_eq!(sut.len(), before);
                }
                Op::Find(id) => {
                    let expect = model.iter().any(|o| o.id == id);
                    match sut.find(&id) {
                        Some(found) => {
                            prop_assert!(expect);
                            prop_assert_eq!(found.id, id);
                            prop_assert!(model.iter().any(|o| Rc::ptr_eq(o, found)));
                        }
                        None => prop_assert!(!expect),
                    }
                }
                Op::FindIf(id) => {
                    let expect = model.iter().any(|o| o.id == id);
                    let hit = sut.find_if(|o| o.id == id);
                    prop_assert_eq!(hit.is_some(), expect);
                    if let Some(found) = hit {
                        prop_assert_eq!(found.id, id);
                    }
                }
                Op::EraseIf(id) => {
                    let expect = model.iter().any(|o| o.id == id);
                    match sut.erase_if(|o| o.id == id) {
                        Some(removed) => {
                            prop_assert!(expect);
                            prop_assert_eq!(removed.id, id);
                            let j = model
                                .iter()
                                .position(|o| Rc::ptr_eq(o, &removed))
                                .expect("member");
                            let _ = model.swap_remove(j);
                        }
                        None => prop_assert!(!expect),
                    }
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.first(), sut.end());
                }
                Op::Iterate => {
                    let mut seen: Vec<*const Obj> =
                        sut.iter().map(|p| Rc::as_ptr(p)).collect();
                    seen.sort();
                    prop_assert_eq!(seen, member_ptrs(&model));
                }
                Op::WalkBackward => {
                    let forward: Vec<*const Obj> =
                        sut.iter().map(|p| Rc::as_ptr(p)).collect();
                    let mut backward = Vec::new();
                    let mut c = sut.end();
                    for _ in 0..model.len() {
                        c.move_prev(&sut);
                        let p = c.get(&sut).expect("backward walk stays valid");
                        backward.push(Rc::as_ptr(p));
                    }
                    backward.reverse();
                    prop_assert_eq!(backward, forward);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.len_slow(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.first() == sut.end(), model.is_empty());
        }
    }
}
