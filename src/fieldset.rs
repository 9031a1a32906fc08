//! Presence tracking for optional record fields
//!
//! Every record carries a [`FieldSet`] recording which optional fields were
//! explicitly set. A field that was set to its zero value is present; a field
//! that was never set is absent, whatever its storage holds.

use core::fmt;
use core::marker::PhantomData;

/// Maximum fields a [`FieldSet`] can track
pub const MAX_FIELDS: usize = 16;

/// A field identifier of one record kind
///
/// Implemented by the per-record field enums. `ALL` lists the fields in the
/// canonical serialization order, and `index()` is the field's bit position.
pub trait Field: Copy + fmt::Debug + 'static {
    /// Number of fields of this record kind
    const COUNT: usize;

    /// All fields, in canonical order
    const ALL: &'static [Self];

    /// Bit position of this field
    fn index(self) -> usize;
}

/// Bit-per-field presence set for a record kind `F`
///
/// Sets only ever grow: [`FieldSet::with`] returns a new set with the bit
/// added. The set is `Copy`, so records derived from a common ancestor each
/// own an independent copy.
pub struct FieldSet<F> {
    bits: u16,
    _kind: PhantomData<F>,
}

impl<F: Field> FieldSet<F> {
    /// Create an empty set
    #[inline]
    pub const fn empty() -> Self {
        Self {
            bits: 0,
            _kind: PhantomData,
        }
    }

    /// Create from raw bits; bits beyond `F::COUNT` are discarded
    #[inline]
    pub fn from_bits(bits: u16) -> Self {
        Self {
            bits: bits & Self::mask(),
            _kind: PhantomData,
        }
    }

    /// Get raw bits value
    #[inline]
    pub const fn bits(&self) -> u16 {
        self.bits
    }

    /// Return a copy of this set with `field` marked present
    #[inline]
    #[must_use]
    pub fn with(self, field: F) -> Self {
        Self {
            bits: self.bits | Self::bit(field),
            _kind: PhantomData,
        }
    }

    /// Check if a field is present
    #[inline]
    pub fn contains(&self, field: F) -> bool {
        self.bits & Self::bit(field) != 0
    }

    /// Union of two sets
    #[inline]
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
            _kind: PhantomData,
        }
    }

    /// Number of present fields
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Check if no field is present
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate over present fields in canonical order
    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        F::ALL.iter().copied().filter(move |&f| self.contains(f))
    }

    #[inline]
    fn bit(field: F) -> u16 {
        debug_assert!(field.index() < F::COUNT && F::COUNT <= MAX_FIELDS);
        1 << field.index()
    }

    #[inline]
    fn mask() -> u16 {
        if F::COUNT >= MAX_FIELDS {
            u16::MAX
        } else {
            (1u16 << F::COUNT) - 1
        }
    }
}

// Manual impls: derives would put bounds on `F` itself.

impl<F> Clone for FieldSet<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for FieldSet<F> {}

impl<F> PartialEq for FieldSet<F> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<F> Eq for FieldSet<F> {}

impl<F: Field> Default for FieldSet<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: Field> fmt::Debug for FieldSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<F: Field> FromIterator<F> for FieldSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}
