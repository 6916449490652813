//! Module containing the type-level vocabulary shared by the renamer and the resolvers.
pub mod common_type;
pub mod field_type;
pub mod name_style;

pub use common_type::{
    CommonType, I_OBJECT, JAVA_LANG_OBJECT, JAVA_LANG_THROWABLE, SHADOW_OBJECT,
};
pub use field_type::{ArrayType, ElementType, InvalidDescriptor, PrimitiveType};
pub use name_style::NameStyle;

/// The wrapper family an array is renamed into.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, derive_more::Display)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum ArrayKind {
    /// The name does not denote an array.
    #[default]
    #[display("not-array")]
    NotArray,
    /// A concrete array wrapper that keeps its exact element type.
    #[display("precise")]
    Precise,
    /// A covariant wrapper shared by the precise arrays of one base type and dimension.
    #[display("unifying")]
    Unifying,
}

/// The namespace a class name is written in.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, derive_more::Display)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum ClassOrigin {
    /// The original namespace of the host or of the contract.
    #[display("pre-rename")]
    PreRename,
    /// The sandbox namespace.
    #[display("post-rename")]
    PostRename,
}
