//! Mapping class names between the host namespace and the sandbox namespace.
//!
//! All prefixes below are written in dotted form.

pub mod array_names;
pub mod renamer;

pub use array_names::{ArrayNameMapper, HiddenArrayType};
pub use renamer::{ClassRenamer, ClassRenamerConfig};

/// Prefix of user-defined classes when renaming is enabled.
pub const USER_PREFIX: &str = "user.";
/// Prefix of the shadow standard library and shadow exceptions.
pub const SHADOW_PREFIX: &str = "s.";
/// Prefix of the host-facing API types.
pub const API_PREFIX: &str = "p.";
/// Prefix of the hand-written sandbox-internal types.
pub const INTERNAL_PREFIX: &str = "i.";
/// Prefix of precise array wrappers and of the hidden array base types.
pub const ARRAY_WRAPPER_PREFIX: &str = "a.";
/// Prefix of unifying array wrappers.
pub const UNIFYING_ARRAY_PREFIX: &str = "w.";
/// Prefix of the wrappers carrying a rethrowable host exception.
pub const EXCEPTION_WRAPPER_PREFIX: &str = "e.";

/// An error raised while mapping a name between namespaces.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum RenameError {
    /// The host type may not be used inside the sandbox. This indicates an internal error: the
    /// type should have been rejected when the contract was admitted.
    #[error("Class {0} is not whitelisted")]
    NotWhitelisted(String),
    /// The contract references a host type that is not available in the sandbox.
    #[error("Class {0} is not available to contracts")]
    RejectedClass(String),
    /// The name is already in the host namespace.
    #[error("Name {0} is already in its original form")]
    AlreadyOriginal(String),
    /// The name denotes a sandbox-internal type with no host counterpart.
    #[error("Name {0} has no original form")]
    NoOriginalForm(String),
    /// An array name was given together with [`ArrayKind::NotArray`](crate::types::ArrayKind).
    #[error("An array kind is required to rename {0}")]
    MissingArrayKind(String),
    /// The name looks like an array but can not be decoded.
    #[error("Malformed array name: {0}")]
    MalformedArrayName(String),
    /// The renamer configuration is inconsistent.
    #[error("Invalid renamer configuration: {0}")]
    InvalidConfig(String),
}
