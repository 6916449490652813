//! Names of the wrapper classes standing in for arrays inside the sandbox.
//!
//! Arrays are not host arrays once renamed: each one becomes an ordinary class. The wrapper
//! name encodes the dimension and the innermost element type as follows.
//!
//! | Array                          | Wrapper                    |
//! |--------------------------------|----------------------------|
//! | `int[]`                        | `a.IntArray`               |
//! | `int[][]`                      | `a.$$I`                    |
//! | `s.java.lang.String[][]`       | `a.$$Ls.java.lang.String`  |
//! | unifying `s.java.lang.String[]`| `w._Ls.java.lang.String`   |

use itertools::Itertools;

use super::{ARRAY_WRAPPER_PREFIX, RenameError, UNIFYING_ARRAY_PREFIX};
use crate::types::{ArrayKind, ArrayType, ElementType, PrimitiveType};

const PRECISE_DIMENSION_MARKER: char = '$';
const UNIFYING_DIMENSION_MARKER: char = '_';
const OBJECT_ELEMENT_MARKER: char = 'L';

/// The hand-written array base types. They carry no dimension and are recognized by name.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, derive_more::Display)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum HiddenArrayType {
    /// The base class of every precise array wrapper.
    #[display("a.Array")]
    Array,
    /// The interface counterpart of [`HiddenArrayType::Array`].
    #[display("a.IArray")]
    IArray,
    /// The base class of object array wrappers.
    #[display("a.ObjectArray")]
    ObjectArray,
    /// The interface counterpart of [`HiddenArrayType::ObjectArray`].
    #[display("a.IObjectArray")]
    IObjectArray,
}

impl HiddenArrayType {
    /// All the hidden array types.
    pub const ALL: [Self; 4] = [Self::Array, Self::IArray, Self::ObjectArray, Self::IObjectArray];

    /// Returns the dotted name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Array => "a.Array",
            Self::IArray => "a.IArray",
            Self::ObjectArray => "a.ObjectArray",
            Self::IObjectArray => "a.IObjectArray",
        }
    }

    /// Finds the hidden array type with the given dotted name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|it| it.name() == name)
    }

    /// Checks if the type is an interface.
    #[must_use]
    pub const fn is_interface(self) -> bool {
        matches!(self, Self::IArray | Self::IObjectArray)
    }
}

/// Encodes and decodes array wrapper names.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayNameMapper;

impl ArrayNameMapper {
    /// Returns the wrapper name of `array`, whose element is already in the sandbox namespace.
    ///
    /// Primitive arrays have a single wrapper family, so `kind` only selects between
    /// [`ArrayKind::Precise`] and [`ArrayKind::Unifying`] for object arrays.
    /// # Errors
    /// - [`RenameError::MissingArrayKind`] if `kind` is [`ArrayKind::NotArray`].
    pub fn wrapper_name(array: &ArrayType, kind: ArrayKind) -> Result<String, RenameError> {
        let dimension = usize::from(array.dimension);
        match (&array.element, kind) {
            (_, ArrayKind::NotArray) => Err(RenameError::MissingArrayKind(array.descriptor())),
            (ElementType::Primitive(p), _) if dimension == 1 => Ok(format!(
                "{ARRAY_WRAPPER_PREFIX}{}",
                p.array_wrapper_simple_name()
            )),
            (ElementType::Primitive(p), _) => Ok(format!(
                "{ARRAY_WRAPPER_PREFIX}{}{}",
                PRECISE_DIMENSION_MARKER.to_string().repeat(dimension),
                p.descriptor_char()
            )),
            (ElementType::Object(base), ArrayKind::Precise) => Ok(format!(
                "{ARRAY_WRAPPER_PREFIX}{}{OBJECT_ELEMENT_MARKER}{base}",
                PRECISE_DIMENSION_MARKER.to_string().repeat(dimension),
            )),
            (ElementType::Object(base), ArrayKind::Unifying) => Ok(format!(
                "{UNIFYING_ARRAY_PREFIX}{}{OBJECT_ELEMENT_MARKER}{base}",
                UNIFYING_DIMENSION_MARKER.to_string().repeat(dimension),
            )),
        }
    }

    /// Decodes a wrapper name into the array it stands for and the family it belongs to.
    ///
    /// Returns `None` if the name is not an array wrapper. The hidden array base types are not
    /// array wrappers.
    #[must_use]
    pub fn decode(name: &str) -> Option<(ArrayType, ArrayKind)> {
        if let Some(rest) = name.strip_prefix(UNIFYING_ARRAY_PREFIX) {
            let (dimension, element) = split_dimension(rest, UNIFYING_DIMENSION_MARKER)?;
            let base = element.strip_prefix(OBJECT_ELEMENT_MARKER)?;
            let array = ArrayType::object(dimension, base).ok()?;
            return (!base.is_empty()).then_some((array, ArrayKind::Unifying));
        }
        let rest = name.strip_prefix(ARRAY_WRAPPER_PREFIX)?;
        if !rest.starts_with(PRECISE_DIMENSION_MARKER) {
            let primitive = PrimitiveType::from_array_wrapper_simple_name(rest)?;
            let array = ArrayType::primitive(1, primitive).ok()?;
            return Some((array, ArrayKind::Precise));
        }
        let (dimension, element) = split_dimension(rest, PRECISE_DIMENSION_MARKER)?;
        let array = match element.strip_prefix(OBJECT_ELEMENT_MARKER) {
            Some(base) if !base.is_empty() => ArrayType::object(dimension, base).ok()?,
            Some(_) => return None,
            None => {
                let tag = element.chars().exactly_one().ok()?;
                let primitive = PrimitiveType::try_from(tag).ok()?;
                // One-dimensional primitive arrays only have the hand-written wrappers.
                if dimension < 2 {
                    return None;
                }
                ArrayType::primitive(dimension, primitive).ok()?
            }
        };
        Some((array, ArrayKind::Precise))
    }

    /// Checks if the name is an array wrapper of either family.
    #[must_use]
    pub fn is_array_wrapper(name: &str) -> bool {
        Self::decode(name).is_some()
    }

    /// Recovers the array descriptor a wrapper was produced from. The element keeps the
    /// namespace it had inside the wrapper.
    /// # Errors
    /// - [`RenameError::MalformedArrayName`] if `wrapper` is not an array wrapper.
    pub fn get_original_name_of(wrapper: &str) -> Result<String, RenameError> {
        Self::decode(wrapper)
            .map(|(array, _)| array.descriptor())
            .ok_or_else(|| RenameError::MalformedArrayName(wrapper.to_owned()))
    }
}

fn split_dimension(name: &str, marker: char) -> Option<(u8, &str)> {
    let element = name.trim_start_matches(marker);
    let dimension = u8::try_from(name.len() - element.len()).ok()?;
    (dimension > 0).then_some((dimension, element))
}
