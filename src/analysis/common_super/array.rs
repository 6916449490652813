//! Common super classes involving arrays.
//!
//! Inside the sandbox an array is an ordinary wrapper class, so two arrays of different shapes
//! only meet at one of the hierarchy roots. Host arrays keep the covariance rules of the host
//! VM.

use super::{
    ResolveError,
    plain::{PlainTypeSuperResolver, Universe},
};
use crate::{
    hierarchy::{Ancestry, ClassHierarchy},
    renaming::{ArrayNameMapper, ClassRenamer, HiddenArrayType, RenameError},
    types::{ArrayKind, ArrayType, ElementType, I_OBJECT, JAVA_LANG_OBJECT, SHADOW_OBJECT},
};

/// An array operand with its dimension and element recovered from its name.
#[derive(Debug, PartialEq, Eq, Clone)]
struct RegularArray {
    array: ArrayType,
    kind: ArrayKind,
    universe: Universe,
}

impl RegularArray {
    const fn is_unifying(&self) -> bool {
        matches!(self.kind, ArrayKind::Unifying)
    }

    fn is_one_dimensional_primitive(&self) -> bool {
        self.array.dimension == 1 && self.array.is_primitive()
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
enum ArrayShape {
    Hidden(HiddenArrayType),
    Regular(RegularArray),
}

impl ArrayShape {
    fn parse(name: &str) -> Result<Option<Self>, ResolveError> {
        if let Some(hidden) = HiddenArrayType::from_name(name) {
            return Ok(Some(Self::Hidden(hidden)));
        }
        if let Some((array, kind)) = ArrayNameMapper::decode(name) {
            return Ok(Some(Self::Regular(RegularArray {
                array,
                kind,
                universe: Universe::Post,
            })));
        }
        if name.starts_with('[') {
            let array = name
                .parse()
                .map_err(|_| RenameError::MalformedArrayName(name.to_owned()))?;
            return Ok(Some(Self::Regular(RegularArray {
                array,
                kind: ArrayKind::Precise,
                universe: Universe::Pre,
            })));
        }
        Ok(None)
    }
}

/// Computes the tightest common super class of two types when at least one of them is an array
/// or a hidden array base type.
#[derive(Debug, Clone, Copy)]
pub struct ArraySuperResolver<'a> {
    hierarchy: &'a ClassHierarchy,
    renamer: &'a ClassRenamer,
    plain: PlainTypeSuperResolver<'a>,
}

impl<'a> ArraySuperResolver<'a> {
    /// Creates a resolver over the given hierarchy. Names are read and written in the style of
    /// `renamer`.
    #[must_use]
    pub const fn new(hierarchy: &'a ClassHierarchy, renamer: &'a ClassRenamer) -> Self {
        Self {
            hierarchy,
            renamer,
            plain: PlainTypeSuperResolver::new(hierarchy, renamer),
        }
    }

    /// Returns the tightest common super class of `a` and `b`, or `None` when neither of them
    /// is array-shaped.
    ///
    /// Host array descriptors (`[I`, `[Ljava.lang.String;`) and sandbox wrappers may be mixed;
    /// a host array meeting a sandbox array is renamed as a precise array first.
    /// # Errors
    /// - [`ResolveError::Rename`] if a host element type is not whitelisted or an array name
    ///   can not be decoded.
    /// - [`ResolveError::Hierarchy`] if an element type is not in the hierarchy.
    pub fn resolve_array(&self, a: &str, b: &str) -> Result<Option<String>, ResolveError> {
        let style = self.renamer.style();
        let resolved = self.resolve_array_dotted(&style.to_dotted(a), &style.to_dotted(b))?;
        Ok(resolved.map(|it| style.from_dotted(&it)))
    }

    pub(crate) fn resolve_array_dotted(
        &self,
        a: &str,
        b: &str,
    ) -> Result<Option<String>, ResolveError> {
        let resolved = match (ArrayShape::parse(a)?, ArrayShape::parse(b)?) {
            (None, None) => return Ok(None),
            _ if a == b => a.to_owned(),
            (Some(lhs), Some(rhs)) => self.resolve_arrays(lhs, rhs)?,
            (Some(array), None) => self.resolve_with_plain(array, b)?,
            (None, Some(array)) => self.resolve_with_plain(array, a)?,
        };
        tracing::trace!(a, b, %resolved, "resolved array super class");
        Ok(Some(resolved))
    }

    fn resolve_arrays(&self, lhs: ArrayShape, rhs: ArrayShape) -> Result<String, ResolveError> {
        match (lhs, rhs) {
            (ArrayShape::Hidden(lhs), ArrayShape::Hidden(rhs)) => {
                Ok(hidden_super_class(lhs, rhs).name().to_owned())
            }
            (ArrayShape::Hidden(hidden), ArrayShape::Regular(array))
            | (ArrayShape::Regular(array), ArrayShape::Hidden(hidden)) => {
                let array = self.renamed_to_sandbox(array)?;
                let resolved = if hidden == HiddenArrayType::Array
                    && array.is_one_dimensional_primitive()
                {
                    hidden.name()
                } else if hidden.is_interface() || array.is_unifying() {
                    I_OBJECT
                } else {
                    SHADOW_OBJECT
                };
                Ok(resolved.to_owned())
            }
            (ArrayShape::Regular(lhs), ArrayShape::Regular(rhs)) => {
                if lhs.universe == Universe::Pre && rhs.universe == Universe::Pre {
                    self.resolve_host_arrays(&lhs, &rhs)
                } else {
                    let (lhs, rhs) = (self.renamed_to_sandbox(lhs)?, self.renamed_to_sandbox(rhs)?);
                    self.resolve_sandbox_arrays(&lhs, &rhs)
                }
            }
        }
    }

    fn resolve_sandbox_arrays(
        &self,
        lhs: &RegularArray,
        rhs: &RegularArray,
    ) -> Result<String, ResolveError> {
        if lhs == rhs {
            return Ok(ArrayNameMapper::wrapper_name(&lhs.array, lhs.kind)?);
        }
        let dimension = lhs.array.dimension;
        if dimension != rhs.array.dimension {
            return Ok(root_of(lhs.is_unifying() || rhs.is_unifying()).to_owned());
        }
        match (&lhs.array.element, &rhs.array.element) {
            (ElementType::Primitive(_), ElementType::Primitive(_)) => Ok(SHADOW_OBJECT.to_owned()),
            (ElementType::Primitive(_), ElementType::Object(_)) => {
                Ok(root_of(rhs.is_unifying()).to_owned())
            }
            (ElementType::Object(_), ElementType::Primitive(_)) => {
                Ok(root_of(lhs.is_unifying()).to_owned())
            }
            (ElementType::Object(lhs_base), ElementType::Object(rhs_base))
                if lhs_base == rhs_base =>
            {
                // Only the kinds differ, and precise arrays are assignable to the unifying one.
                Ok(ArrayNameMapper::wrapper_name(&lhs.array, ArrayKind::Unifying)?)
            }
            (ElementType::Object(lhs_base), ElementType::Object(rhs_base)) => {
                let (base, kind) = match self.plain.ancestry(lhs_base, rhs_base)? {
                    Ancestry::Ambiguous(_) => (I_OBJECT.to_owned(), ArrayKind::Unifying),
                    Ancestry::Unique(base) => {
                        let both_precise =
                            lhs.kind == ArrayKind::Precise && rhs.kind == ArrayKind::Precise;
                        let kind = if both_precise {
                            ArrayKind::Precise
                        } else {
                            ArrayKind::Unifying
                        };
                        (base, kind)
                    }
                };
                let array = ArrayType {
                    dimension,
                    element: ElementType::Object(base),
                };
                Ok(ArrayNameMapper::wrapper_name(&array, kind)?)
            }
        }
    }

    fn resolve_host_arrays(
        &self,
        lhs: &RegularArray,
        rhs: &RegularArray,
    ) -> Result<String, ResolveError> {
        let dimension = lhs.array.dimension;
        if dimension != rhs.array.dimension {
            return Ok(host_object_array(dimension.min(rhs.array.dimension)));
        }
        match (lhs.array.base_class(), rhs.array.base_class()) {
            (Some(lhs_base), Some(rhs_base)) => {
                let base = self.plain.host_common_super_class(lhs_base, rhs_base)?;
                Ok(ArrayType {
                    dimension,
                    element: ElementType::Object(base),
                }
                .descriptor())
            }
            // Host arrays are always precise, so a primitive operand meets at the class root.
            _ => Ok(SHADOW_OBJECT.to_owned()),
        }
    }

    fn resolve_with_plain(&self, array: ArrayShape, plain: &str) -> Result<String, ResolveError> {
        if plain == JAVA_LANG_OBJECT {
            return Ok(JAVA_LANG_OBJECT.to_owned());
        }
        let plain = self.plain.canonicalize(plain)?;
        let representative = match array {
            ArrayShape::Regular(RegularArray {
                universe: Universe::Pre,
                ..
            }) if plain.universe == Universe::Pre => return Ok(JAVA_LANG_OBJECT.to_owned()),
            ArrayShape::Hidden(hidden) => hidden.name(),
            ArrayShape::Regular(array) if array.is_one_dimensional_primitive() => {
                HiddenArrayType::Array.name()
            }
            ArrayShape::Regular(array) => root_of(array.is_unifying()),
        };
        let representative = if self.hierarchy.contains(representative) {
            representative
        } else {
            let is_interface = HiddenArrayType::from_name(representative)
                .is_some_and(HiddenArrayType::is_interface);
            root_of(is_interface || representative == I_OBJECT)
        };
        Ok(self
            .plain
            .ancestry(representative, &plain.name)?
            .unique_or(I_OBJECT))
    }

    /// Renames a host array into a precise sandbox array.
    fn renamed_to_sandbox(&self, array: RegularArray) -> Result<RegularArray, ResolveError> {
        if array.universe == Universe::Post {
            return Ok(array);
        }
        let element = match array.array.element {
            ElementType::Object(base) => ElementType::Object(
                self.renamer
                    .post_rename_dotted(&base, ArrayKind::NotArray)?,
            ),
            primitive @ ElementType::Primitive(_) => primitive,
        };
        Ok(RegularArray {
            array: ArrayType {
                dimension: array.array.dimension,
                element,
            },
            kind: ArrayKind::Precise,
            universe: Universe::Post,
        })
    }
}

const fn root_of(is_interface_shaped: bool) -> &'static str {
    if is_interface_shaped {
        I_OBJECT
    } else {
        SHADOW_OBJECT
    }
}

fn hidden_super_class(lhs: HiddenArrayType, rhs: HiddenArrayType) -> HiddenArrayType {
    use HiddenArrayType::{Array, IArray, IObjectArray, ObjectArray};

    let (lo, hi) = if lhs <= rhs { (lhs, rhs) } else { (rhs, lhs) };
    match (lo, hi) {
        _ if lo == hi => lo,
        (Array, ObjectArray) => Array,
        (ObjectArray, IObjectArray) => IObjectArray,
        // Every remaining pair only meets at the interface root of all arrays.
        _ => IArray,
    }
}

/// An array of `java.lang.Object` with the given dimension.
fn host_object_array(dimension: u8) -> String {
    ArrayType {
        dimension,
        element: ElementType::Object(JAVA_LANG_OBJECT.to_owned()),
    }
    .descriptor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        tests::{contract_hierarchy, contract_renamer},
        types::NameStyle,
    };
    use proptest::prelude::*;

    fn resolve(a: &str, b: &str) -> Result<Option<String>, ResolveError> {
        let hierarchy = contract_hierarchy();
        let renamer = contract_renamer(NameStyle::Dotted);
        ArraySuperResolver::new(&hierarchy, &renamer).resolve_array(a, b)
    }

    fn assert_resolves(cases: &[(&str, &str, &str)]) {
        let hierarchy = contract_hierarchy();
        let renamer = contract_renamer(NameStyle::Dotted);
        let resolver = ArraySuperResolver::new(&hierarchy, &renamer);
        for &(a, b, expected) in cases {
            assert_eq!(
                resolver.resolve_array(a, b).unwrap().as_deref(),
                Some(expected),
                "{a} and {b}"
            );
            assert_eq!(
                resolver.resolve_array(b, a).unwrap().as_deref(),
                Some(expected),
                "{b} and {a}"
            );
        }
    }

    #[test]
    fn plain_types_are_not_applicable() {
        assert_eq!(resolve("s.java.lang.String", "java.lang.Object"), Ok(None));
        assert_eq!(resolve("i.IObject", "user.com.example.Shape"), Ok(None));
    }

    #[test]
    fn same_array_is_returned_unchanged() {
        for name in ["a.IntArray", "[I", "a.$$Ls.java.lang.String", "a.IArray"] {
            assert_eq!(resolve(name, name).unwrap().as_deref(), Some(name));
        }
    }

    #[test]
    fn hidden_array_table() {
        assert_resolves(&[
            ("a.Array", "a.IArray", "a.IArray"),
            ("a.ObjectArray", "a.Array", "a.Array"),
            ("a.ObjectArray", "a.IArray", "a.IArray"),
            ("a.ObjectArray", "a.IObjectArray", "a.IObjectArray"),
            ("a.IObjectArray", "a.IArray", "a.IArray"),
            ("a.Array", "a.IObjectArray", "a.IArray"),
        ]);
    }

    #[test]
    fn hidden_against_regular_arrays() {
        assert_resolves(&[
            ("a.Array", "a.IntArray", "a.Array"),
            ("a.Array", "[J", "a.Array"),
            ("a.Array", "a.$$I", SHADOW_OBJECT),
            ("a.Array", "a.$Ls.java.lang.String", SHADOW_OBJECT),
            ("a.ObjectArray", "a.$Ls.java.lang.String", SHADOW_OBJECT),
            ("a.ObjectArray", "w._Ls.java.lang.String", I_OBJECT),
            ("a.IArray", "a.IntArray", I_OBJECT),
            ("a.IObjectArray", "a.$Ls.java.lang.String", I_OBJECT),
        ]);
    }

    #[test]
    fn sandbox_arrays_of_different_dimensions() {
        assert_resolves(&[
            ("a.$$Z", "a.$Ls.java.lang.String", SHADOW_OBJECT),
            ("a.$$Z", "w._Ls.java.lang.String", I_OBJECT),
            ("a.IntArray", "a.$$I", SHADOW_OBJECT),
            ("a.$Ls.java.lang.String", "a.$$Ls.java.lang.String", SHADOW_OBJECT),
            ("w._Ls.java.lang.String", "w.__Ls.java.lang.String", I_OBJECT),
        ]);
    }

    #[test]
    fn sandbox_arrays_of_the_same_dimension() {
        assert_resolves(&[
            ("a.IntArray", "a.ByteArray", SHADOW_OBJECT),
            ("a.$$I", "a.$$Ls.java.lang.String", SHADOW_OBJECT),
            ("a.$$I", "w.__Ls.java.lang.String", I_OBJECT),
            ("a.$Ls.java.lang.String", "w._Ls.java.lang.String", "w._Ls.java.lang.String"),
            (
                "a.$Luser.com.example.Circle",
                "a.$Luser.com.example.Square",
                "a.$Luser.com.example.Shape",
            ),
            (
                "a.$Luser.com.example.Circle",
                "w._Luser.com.example.Square",
                "w._Luser.com.example.Shape",
            ),
            (
                "a.$$Ls.java.lang.ArithmeticException",
                "a.$$Ls.java.lang.ClassCastException",
                "a.$$Ls.java.lang.RuntimeException",
            ),
            (
                "a.$Ls.java.lang.Boolean",
                "a.$Ls.java.lang.Character",
                "w._Li.IObject",
            ),
        ]);
    }

    #[test]
    fn host_array_covariance() {
        assert_resolves(&[
            (
                "[Ljava.lang.OutOfMemoryError;",
                "[[Ljava.lang.StackOverflowError;",
                "[Ljava.lang.Object;",
            ),
            (
                "[Ljava.lang.OutOfMemoryError;",
                "[Ljava.lang.StackOverflowError;",
                "[Ljava.lang.VirtualMachineError;",
            ),
            ("[I", "[B", SHADOW_OBJECT),
            ("[[I", "[[Ljava.lang.String;", SHADOW_OBJECT),
            ("[I", "[[Ljava.lang.String;", "[Ljava.lang.Object;"),
            ("[[I", "[I", "[Ljava.lang.Object;"),
            ("[Z", "[[[J", "[Ljava.lang.Object;"),
            ("[[Z", "[Ljava.lang.String;", "[Ljava.lang.Object;"),
            ("[[[J", "[[[[D", "[[[Ljava.lang.Object;"),
            (
                "[Ljava.lang.Boolean;",
                "[Ljava.lang.Character;",
                "[Ljava.lang.Object;",
            ),
            (
                "[[Lcom.example.Circle;",
                "[[Lcom.example.Square;",
                "[[Lcom.example.Shape;",
            ),
        ]);
    }

    #[test]
    fn mixed_universes_are_renamed() {
        assert_resolves(&[
            ("[I", "a.ByteArray", SHADOW_OBJECT),
            ("[I", "a.IntArray", "a.IntArray"),
            (
                "[Lcom.example.Circle;",
                "w._Luser.com.example.Circle",
                "w._Luser.com.example.Circle",
            ),
            (
                "[Lcom.example.Circle;",
                "a.$Luser.com.example.Square",
                "a.$Luser.com.example.Shape",
            ),
        ]);
    }

    #[test]
    fn arrays_against_plain_types() {
        assert_resolves(&[
            ("a.IntArray", "java.lang.Object", "java.lang.Object"),
            ("[Ljava.lang.String;", "java.lang.String", "java.lang.Object"),
            ("a.IntArray", "s.java.lang.String", SHADOW_OBJECT),
            ("a.IntArray", "a.Array", "a.Array"),
            ("w._Ls.java.lang.String", "s.java.lang.String", I_OBJECT),
            ("a.$Ls.java.lang.String", "user.com.example.Named", I_OBJECT),
            ("a.$Ls.java.lang.String", "user.com.example.Shape", SHADOW_OBJECT),
            ("a.$Ls.java.lang.String", "s.java.lang.Throwable", SHADOW_OBJECT),
            ("a.IArray", "s.java.lang.String", I_OBJECT),
            ("[I", "s.java.lang.String", SHADOW_OBJECT),
        ]);
    }

    #[test]
    fn malformed_and_unknown_arrays() {
        assert_eq!(
            resolve("[Q", "a.IntArray"),
            Err(ResolveError::Rename(RenameError::MalformedArrayName(
                "[Q".to_owned()
            )))
        );
        assert_eq!(
            resolve("[Ljava.lang.Thread;", "[Ljava.lang.String;"),
            Err(ResolveError::Rename(RenameError::NotWhitelisted(
                "java.lang.Thread".to_owned()
            )))
        );
    }

    #[test]
    fn minimal_hierarchy_falls_back_to_roots() {
        let hierarchy = ClassHierarchy::build(crate::hierarchy::ClassHierarchyConfig::minimal())
            .unwrap();
        let renamer = contract_renamer(NameStyle::Dotted);
        let resolver = ArraySuperResolver::new(&hierarchy, &renamer);
        assert_eq!(
            resolver
                .resolve_array("a.IntArray", "s.java.lang.RuntimeException")
                .unwrap()
                .as_deref(),
            Some(SHADOW_OBJECT)
        );
        assert_eq!(
            resolver
                .resolve_array("a.IObjectArray", "s.java.lang.RuntimeException")
                .unwrap()
                .as_deref(),
            Some(I_OBJECT)
        );
    }

    proptest! {
        #[test]
        fn hidden_table_is_commutative(
            lhs in any::<HiddenArrayType>(),
            rhs in any::<HiddenArrayType>(),
        ) {
            assert_eq!(hidden_super_class(lhs, rhs), hidden_super_class(rhs, lhs));
        }

        #[test]
        fn host_primitive_arrays(
            lhs in any::<crate::types::PrimitiveType>(),
            rhs in any::<crate::types::PrimitiveType>(),
            lhs_dim in 1..=6u8,
            rhs_dim in 1..=6u8,
        ) {
            prop_assume!(lhs != rhs || lhs_dim != rhs_dim);
            let a = ArrayType::primitive(lhs_dim, lhs).unwrap().descriptor();
            let b = ArrayType::primitive(rhs_dim, rhs).unwrap().descriptor();
            let expected = if lhs_dim == rhs_dim {
                SHADOW_OBJECT.to_owned()
            } else {
                host_object_array(lhs_dim.min(rhs_dim))
            };
            assert_eq!(resolve(&a, &b).unwrap(), Some(expected));
        }
    }
}
