//! Invariant checks for catalog indices.

use crate::catalog_error::CatalogError;

/// Types whose internal indices must stay mutually consistent.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation encountered.
    fn validate_invariants(&self) -> Result<(), CatalogError>;

    /// Panic on the first violation in debug builds or when the
    /// `strict-invariants` / `check-invariants` features are enabled.
    /// A no-op otherwise.
    #[inline]
    fn debug_assert_invariants(&self) {
        #[cfg(any(
            debug_assertions,
            feature = "strict-invariants",
            feature = "check-invariants"
        ))]
        if let Err(e) = self.validate_invariants() {
            panic!("[invariants] {e}");
        }
    }
}
