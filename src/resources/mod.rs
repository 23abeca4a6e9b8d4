//! Idempotent resource primitives (check + apply pattern).
pub mod helpers;
pub mod symlink;

use crate::error::LinkError;

/// State of a resource on disk.
///
/// # Examples
///
/// ```
/// use dotlink::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "points to /other".into() };
///
/// assert_ne!(missing, correct);
/// assert_ne!(wrong, correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing exists at the resource's location.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Something exists but does not match the desired state.
    Incorrect {
        /// Description of what is there now.
        current: String,
    },
    /// Resource cannot be applied as configured.
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource change.
///
/// # Examples
///
/// ```
/// use dotlink::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let skipped = ResourceChange::Skipped { reason: "destination exists".into() };
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, skipped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or replaced.
    Applied,
    /// Resource was already correct and left as is.
    AlreadyCorrect,
    /// Resource was deliberately left untouched.
    Skipped {
        /// Reason why the resource was skipped.
        reason: String,
    },
}

/// Interface for resources that can be checked and applied.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource without changing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined due to I/O failures.
    fn current_state(&self) -> std::io::Result<ResourceState>;

    /// Report what [`apply`](Self::apply) would do, without side effects.
    ///
    /// # Errors
    ///
    /// Returns the error `apply` would fail with before touching the
    /// filesystem (for example a missing source).
    fn plan(&self) -> Result<ResourceChange, LinkError>;

    /// Bring the resource to its desired state.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to a missing
    /// source, I/O failures, or permission issues.
    fn apply(&self) -> Result<ResourceChange, LinkError>;
}
