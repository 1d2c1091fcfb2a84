//! Errors reported at the creation boundary
//!
//! The engine itself has no error paths: missing ids are skipped.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A family was submitted without a (non-blank) name.
    #[error("name required")]
    MissingName,

    /// An age whose birth year falls outside the calendar's range.
    #[error("age {0} out of range")]
    AgeOutOfRange(u32),
}
