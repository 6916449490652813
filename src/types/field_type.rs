//! Primitive types and array descriptors.

use std::{fmt::Display, str::FromStr};

use itertools::Itertools;

/// A primitive type in Java.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum PrimitiveType {
    /// The `boolean` type.
    Boolean,
    /// The `char` type.
    Char,
    /// The `float` type.
    Float,
    /// The `double` type.
    Double,
    /// The `byte` type.
    Byte,
    /// The `short` type.
    Short,
    /// The `int` type.
    Int,
    /// The `long` type.
    Long,
}

impl PrimitiveType {
    /// All the primitive types.
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Char,
        Self::Float,
        Self::Double,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
    ];

    /// Returns the descriptor tag of the primitive type.
    #[must_use]
    pub const fn descriptor_char(self) -> char {
        match self {
            Self::Boolean => 'Z',
            Self::Char => 'C',
            Self::Float => 'F',
            Self::Double => 'D',
            Self::Byte => 'B',
            Self::Short => 'S',
            Self::Int => 'I',
            Self::Long => 'J',
        }
    }

    /// Returns the simple name of the hand-written wrapper class for one-dimensional arrays of
    /// this type.
    #[must_use]
    pub const fn array_wrapper_simple_name(self) -> &'static str {
        match self {
            Self::Boolean => "BooleanArray",
            Self::Char => "CharArray",
            Self::Float => "FloatArray",
            Self::Double => "DoubleArray",
            Self::Byte => "ByteArray",
            Self::Short => "ShortArray",
            Self::Int => "IntArray",
            Self::Long => "LongArray",
        }
    }

    /// Finds the primitive type whose one-dimensional array wrapper has the given simple name.
    #[must_use]
    pub fn from_array_wrapper_simple_name(simple_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|it| it.array_wrapper_simple_name() == simple_name)
    }
}

impl TryFrom<char> for PrimitiveType {
    type Error = InvalidDescriptor;

    fn try_from(descriptor: char) -> Result<Self, Self::Error> {
        match descriptor {
            'Z' => Ok(Self::Boolean),
            'C' => Ok(Self::Char),
            'F' => Ok(Self::Float),
            'D' => Ok(Self::Double),
            'B' => Ok(Self::Byte),
            'S' => Ok(Self::Short),
            'I' => Ok(Self::Int),
            'J' => Ok(Self::Long),
            _ => Err(InvalidDescriptor),
        }
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
        };
        write!(f, "{name}")
    }
}

/// The innermost element of an array type.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub enum ElementType {
    /// A primitive element.
    Primitive(PrimitiveType),
    /// A class or interface element, named in dotted form.
    Object(String),
}

/// An array type, described by its dimension and innermost element type.
///
/// The object element name is kept in whatever namespace the array was written in; renaming the
/// element is the job of the [`ClassRenamer`](crate::renaming::ClassRenamer).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ArrayType {
    /// The number of dimensions, at least one.
    pub dimension: u8,
    /// The innermost element type.
    pub element: ElementType,
}

impl ArrayType {
    /// Creates an array type.
    /// # Errors
    /// - [`InvalidDescriptor`] if `dimension` is zero.
    pub fn new(dimension: u8, element: ElementType) -> Result<Self, InvalidDescriptor> {
        if dimension == 0 {
            return Err(InvalidDescriptor);
        }
        Ok(Self { dimension, element })
    }

    /// Creates an array of primitives.
    /// # Errors
    /// - [`InvalidDescriptor`] if `dimension` is zero.
    pub fn primitive(dimension: u8, primitive: PrimitiveType) -> Result<Self, InvalidDescriptor> {
        Self::new(dimension, ElementType::Primitive(primitive))
    }

    /// Creates an array of objects.
    /// # Errors
    /// - [`InvalidDescriptor`] if `dimension` is zero.
    pub fn object(dimension: u8, base: impl Into<String>) -> Result<Self, InvalidDescriptor> {
        Self::new(dimension, ElementType::Object(base.into()))
    }

    /// Checks if the innermost element is a primitive type.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self.element, ElementType::Primitive(_))
    }

    /// Returns the innermost class name, if the element is an object type.
    #[must_use]
    pub fn base_class(&self) -> Option<&str> {
        match &self.element {
            ElementType::Object(name) => Some(name),
            ElementType::Primitive(_) => None,
        }
    }

    /// Returns the JVM descriptor of this array type, in dotted form.
    #[must_use]
    pub fn descriptor(&self) -> String {
        let dims = "[".repeat(usize::from(self.dimension));
        match &self.element {
            ElementType::Primitive(p) => format!("{dims}{}", p.descriptor_char()),
            ElementType::Object(name) => format!("{dims}L{name};"),
        }
    }
}

impl FromStr for ArrayType {
    type Err = InvalidDescriptor;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let mut chars = descriptor.chars();
        let dimension = chars.take_while_ref(|c| *c == '[').count();
        let dimension = u8::try_from(dimension).map_err(|_| InvalidDescriptor)?;
        let element = match chars.next() {
            Some('L') => {
                let name: String = chars.take_while_ref(|c| *c != ';').collect();
                match (chars.next(), chars.next()) {
                    (Some(';'), None) if !name.is_empty() => ElementType::Object(name),
                    _ => Err(InvalidDescriptor)?,
                }
            }
            Some(c) if chars.next().is_none() => ElementType::Primitive(c.try_into()?),
            _ => Err(InvalidDescriptor)?,
        };
        Self::new(dimension, element)
    }
}

impl Display for ArrayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.descriptor())
    }
}

/// An error indicating that the descriptor string is invalid.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Invalid descriptor")]
pub struct InvalidDescriptor;
