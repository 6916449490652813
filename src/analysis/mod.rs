//! APIs for the type queries issued while re-verifying rewritten bytecode.

pub mod common_super;

pub use common_super::{
    ArraySuperResolver, CommonSuperClass, CommonSuperClassResolver, PlainTypeSuperResolver,
    ResolveError,
};
