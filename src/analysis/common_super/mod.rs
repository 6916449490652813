//! Tightest common super classes, as needed when merging stack map frames.
//!
//! [`CommonSuperClassResolver`] is the single entry point. It dispatches to
//! [`ArraySuperResolver`] when either operand is array-shaped and to [`PlainTypeSuperResolver`]
//! otherwise, so its answers are exactly those of the resolver that applies.

use crate::{
    hierarchy::{ClassHierarchy, HierarchyError},
    renaming::{ClassRenamer, RenameError},
};

mod array;
mod plain;

pub use array::ArraySuperResolver;
pub use plain::PlainTypeSuperResolver;

/// An error raised while resolving a common super class.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum ResolveError {
    /// An operand could not be mapped into the sandbox namespace.
    #[error(transparent)]
    Rename(#[from] RenameError),
    /// An operand is not in the class hierarchy.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

/// A provider of common super classes, as consumed by a stack map frame computer.
pub trait CommonSuperClass {
    /// Returns the most specific type both `a` and `b` are assignable to.
    /// # Errors
    /// See [`ResolveError`].
    fn common_super_class(&self, a: &str, b: &str) -> Result<String, ResolveError>;
}

/// Resolves common super classes against a class hierarchy, reading and writing names in the
/// style of its renamer.
#[derive(Debug, Clone, Copy)]
pub struct CommonSuperClassResolver<'a> {
    hierarchy: &'a ClassHierarchy,
    renamer: &'a ClassRenamer,
}

impl<'a> CommonSuperClassResolver<'a> {
    /// Creates a resolver.
    #[must_use]
    pub const fn new(hierarchy: &'a ClassHierarchy, renamer: &'a ClassRenamer) -> Self {
        Self { hierarchy, renamer }
    }

    /// Returns the resolver used for array-shaped operands.
    #[must_use]
    pub const fn arrays(&self) -> ArraySuperResolver<'a> {
        ArraySuperResolver::new(self.hierarchy, self.renamer)
    }

    /// Returns the resolver used for plain operands.
    #[must_use]
    pub const fn plain(&self) -> PlainTypeSuperResolver<'a> {
        PlainTypeSuperResolver::new(self.hierarchy, self.renamer)
    }
}

impl CommonSuperClass for CommonSuperClassResolver<'_> {
    fn common_super_class(&self, a: &str, b: &str) -> Result<String, ResolveError> {
        let style = self.renamer.style();
        let (lhs, rhs) = (style.to_dotted(a), style.to_dotted(b));
        if lhs == rhs {
            return Ok(a.to_owned());
        }
        let resolved = match self.arrays().resolve_array_dotted(&lhs, &rhs)? {
            Some(resolved) => resolved,
            // The array resolver only declines when neither operand is array-shaped.
            None => self.plain().merge_dotted(&lhs, &rhs)?,
        };
        tracing::trace!(a, b, %resolved, "resolved common super class");
        Ok(style.from_dotted(&resolved))
    }
}
