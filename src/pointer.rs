//! Stored-reference ownership kinds.
//!
//! The table never allocates or copies the objects it indexes; it moves
//! pointer-like handles to objects that were allocated elsewhere. The
//! [`Pointer`] trait abstracts over the three ownership kinds:
//!
//! - `Box<T>`: the table is the exclusive owner; erasing transfers
//!   ownership back to the caller, dropping the table releases whatever
//!   is left inside.
//! - `Rc<T>`: shared ownership; the table holds one strong count per
//!   stored entry.
//! - `&'a T`: non-owning; the object's lifetime is managed elsewhere and
//!   must outlive the table's use of it.
//!
//! An object must be inside at most one container at a time. That is a
//! caller contract; the table debug-asserts it on insert.

use core::ops::Deref;
use std::rc::Rc;

/// A pointer-like handle the table can store, move, and compare by
/// identity. Dereferences to the indexed object.
pub trait Pointer: Deref {
    /// True when dropping this handle participates in releasing the
    /// object (exclusive or shared owners). Non-owning handles leave
    /// lifetime management entirely to the caller, so dropping a
    /// non-empty table of them is treated as a caller bug.
    const MANAGES_LIFETIME: bool;

    /// Address of the pointed-to object, used for identity comparisons
    /// (erase-by-object, `make_cursor`). Never dereferenced by the table.
    fn as_ptr(&self) -> *const Self::Target;
}

impl<T> Pointer for Box<T> {
    const MANAGES_LIFETIME: bool = true;

    #[inline]
    fn as_ptr(&self) -> *const T {
        &**self
    }
}

impl<T> Pointer for Rc<T> {
    const MANAGES_LIFETIME: bool = true;

    #[inline]
    fn as_ptr(&self) -> *const T {
        Rc::as_ptr(self)
    }
}

impl<T> Pointer for &T {
    const MANAGES_LIFETIME: bool = false;

    #[inline]
    fn as_ptr(&self) -> *const T {
        *self
    }
}
