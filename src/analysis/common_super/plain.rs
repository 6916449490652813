//! Common super classes of two plain (non-array) types.

use super::ResolveError;
use crate::{
    hierarchy::{Ancestry, ClassHierarchy, HierarchyError},
    renaming::{ClassRenamer, renamer::is_array_shaped_dotted},
    types::{ArrayKind, I_OBJECT, JAVA_LANG_OBJECT, JAVA_LANG_THROWABLE, SHADOW_OBJECT},
};

/// The namespace an operand was given in.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Universe {
    /// A host name that had to be renamed before querying the hierarchy.
    Pre,
    /// A name that is already a hierarchy node.
    Post,
}

/// An operand mapped onto a hierarchy node.
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct Canonical {
    pub name: String,
    pub universe: Universe,
}

/// Computes the tightest common super class of two plain class or interface names.
#[derive(Debug, Clone, Copy)]
pub struct PlainTypeSuperResolver<'a> {
    hierarchy: &'a ClassHierarchy,
    renamer: &'a ClassRenamer,
}

impl<'a> PlainTypeSuperResolver<'a> {
    /// Creates a resolver over the given hierarchy. Names are read and written in the style of
    /// `renamer`.
    #[must_use]
    pub const fn new(hierarchy: &'a ClassHierarchy, renamer: &'a ClassRenamer) -> Self {
        Self { hierarchy, renamer }
    }

    /// Returns the tightest common super class of `candidate` and `other`, or `None` when either
    /// of them is an array or a hidden array base type.
    ///
    /// Operands may be given in either namespace. When both are host names the answer is a
    /// host name as well; otherwise it is a sandbox name. An ambiguous answer becomes
    /// [`I_OBJECT`] in the sandbox and `java.lang.Object` on the host.
    /// # Errors
    /// - [`ResolveError::Rename`] if a host name is not whitelisted.
    /// - [`ResolveError::Hierarchy`] if a sandbox name is not in the hierarchy.
    pub fn resolve_plain(
        &self,
        candidate: &str,
        other: &str,
    ) -> Result<Option<String>, ResolveError> {
        let style = self.renamer.style();
        let resolved =
            self.resolve_plain_dotted(&style.to_dotted(candidate), &style.to_dotted(other))?;
        Ok(resolved.map(|it| style.from_dotted(&it)))
    }

    pub(crate) fn resolve_plain_dotted(
        &self,
        a: &str,
        b: &str,
    ) -> Result<Option<String>, ResolveError> {
        if is_array_shaped_dotted(a) || is_array_shaped_dotted(b) {
            return Ok(None);
        }
        self.merge_dotted(a, b).map(Some)
    }

    /// Resolves two dotted names already known not to be array-shaped.
    pub(crate) fn merge_dotted(&self, a: &str, b: &str) -> Result<String, ResolveError> {
        if a == b {
            return Ok(a.to_owned());
        }
        if a == JAVA_LANG_OBJECT || b == JAVA_LANG_OBJECT {
            return Ok(JAVA_LANG_OBJECT.to_owned());
        }
        let (lhs, rhs) = (self.canonicalize(a)?, self.canonicalize(b)?);
        let ancestry = self.hierarchy.common_ancestry(&lhs.name, &rhs.name)?;
        if lhs.universe == Universe::Pre && rhs.universe == Universe::Pre {
            self.host_name_of(ancestry)
        } else {
            Ok(ancestry.unique_or(I_OBJECT))
        }
    }

    /// The tightest common super class of two host names, as a host name.
    pub(crate) fn host_common_super_class(&self, a: &str, b: &str) -> Result<String, ResolveError> {
        if a == b {
            return Ok(a.to_owned());
        }
        if a == JAVA_LANG_OBJECT || b == JAVA_LANG_OBJECT {
            return Ok(JAVA_LANG_OBJECT.to_owned());
        }
        let lhs = self.renamer.post_rename_dotted(a, ArrayKind::NotArray)?;
        let rhs = self.renamer.post_rename_dotted(b, ArrayKind::NotArray)?;
        let ancestry = self.hierarchy.common_ancestry(&lhs, &rhs)?;
        self.host_name_of(ancestry)
    }

    /// The ancestry of two hierarchy nodes.
    pub(crate) fn ancestry(&self, a: &str, b: &str) -> Result<Ancestry, ResolveError> {
        Ok(self.hierarchy.common_ancestry(a, b)?)
    }

    /// Maps a plain name onto a hierarchy node, renaming it if it is a host name.
    pub(crate) fn canonicalize(&self, name: &str) -> Result<Canonical, ResolveError> {
        if self.hierarchy.contains(name) {
            return Ok(Canonical {
                name: name.to_owned(),
                universe: Universe::Post,
            });
        }
        // A sandbox name that the hierarchy has never seen.
        if self.renamer.pre_rename_dotted(name).is_ok() {
            return Err(HierarchyError::UnknownClass(name.to_owned()).into());
        }
        let renamed = self.renamer.post_rename_dotted(name, ArrayKind::NotArray)?;
        Ok(Canonical {
            name: renamed,
            universe: Universe::Pre,
        })
    }

    fn host_name_of(&self, ancestry: Ancestry) -> Result<String, ResolveError> {
        match ancestry {
            Ancestry::Ambiguous(_) => Ok(JAVA_LANG_OBJECT.to_owned()),
            Ancestry::Unique(name)
                if [I_OBJECT, SHADOW_OBJECT, JAVA_LANG_OBJECT].contains(&name.as_str()) =>
            {
                Ok(JAVA_LANG_OBJECT.to_owned())
            }
            Ancestry::Unique(name) if name == JAVA_LANG_THROWABLE => Ok(name),
            Ancestry::Unique(name) => Ok(self.renamer.pre_rename_dotted(&name)?),
        }
    }
}
