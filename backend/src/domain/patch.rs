//! Tri-state patch field.
//!
//! A plain `Option` cannot express a nullable column in a partial update:
//! it collapses "key absent, leave unchanged" and "key present but null,
//! erase" into one state. [`FieldPatch`] keeps all three apart.

/// One field of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Leave the stored value unchanged.
    #[default]
    Keep,
    /// Erase the stored value to null.
    Erase,
    /// Replace the stored value.
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Whether the field leaves the stored value untouched.
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// The column assignment this field resolves to, if any.
    ///
    /// `None` means no assignment; `Some(None)` assigns null;
    /// `Some(Some(value))` assigns the value.
    pub const fn as_assignment(&self) -> Option<Option<&T>> {
        match self {
            Self::Keep => None,
            Self::Erase => Some(None),
            Self::Set(value) => Some(Some(value)),
        }
    }
}
