//! Fixed identities of the sandbox class hierarchy.

/// The host root class.
pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";
/// The root interface of the sandbox object model.
pub const I_OBJECT: &str = "i.IObject";
/// The sandbox replacement of the host root class.
pub const SHADOW_OBJECT: &str = "s.java.lang.Object";
/// The host root of exceptions. It stays outside the shadow world because the host VM only
/// propagates real exception types.
pub const JAVA_LANG_THROWABLE: &str = "java.lang.Throwable";

/// A type whose name and position in the hierarchy never change.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, derive_more::Display)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum CommonType {
    /// `java.lang.Object`
    #[display("java.lang.Object")]
    JavaLangObject,
    /// `i.IObject`
    #[display("i.IObject")]
    IObject,
    /// `s.java.lang.Object`
    #[display("s.java.lang.Object")]
    ShadowObject,
    /// `java.lang.Throwable`
    #[display("java.lang.Throwable")]
    JavaLangThrowable,
    /// `s.java.lang.Throwable`
    #[display("s.java.lang.Throwable")]
    ShadowThrowable,
    /// `s.java.lang.Error`
    #[display("s.java.lang.Error")]
    ShadowError,
    /// `s.java.lang.Exception`
    #[display("s.java.lang.Exception")]
    ShadowException,
    /// `s.java.lang.RuntimeException`
    #[display("s.java.lang.RuntimeException")]
    ShadowRuntimeException,
}

impl CommonType {
    /// The roots every hierarchy starts with.
    pub const ROOTS: [Self; 4] = [
        Self::JavaLangObject,
        Self::IObject,
        Self::ShadowObject,
        Self::JavaLangThrowable,
    ];

    /// All the common types.
    pub const ALL: [Self; 8] = [
        Self::JavaLangObject,
        Self::IObject,
        Self::ShadowObject,
        Self::JavaLangThrowable,
        Self::ShadowThrowable,
        Self::ShadowError,
        Self::ShadowException,
        Self::ShadowRuntimeException,
    ];

    /// Returns the dotted, post-rename name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::JavaLangObject => JAVA_LANG_OBJECT,
            Self::IObject => I_OBJECT,
            Self::ShadowObject => SHADOW_OBJECT,
            Self::JavaLangThrowable => JAVA_LANG_THROWABLE,
            Self::ShadowThrowable => "s.java.lang.Throwable",
            Self::ShadowError => "s.java.lang.Error",
            Self::ShadowException => "s.java.lang.Exception",
            Self::ShadowRuntimeException => "s.java.lang.RuntimeException",
        }
    }

    /// Finds the common type with the given dotted name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|it| it.name() == name)
    }

    /// Checks if the type is one of the four fixed roots.
    #[must_use]
    pub const fn is_root(self) -> bool {
        matches!(
            self,
            Self::JavaLangObject | Self::IObject | Self::ShadowObject | Self::JavaLangThrowable
        )
    }

    /// Checks if the type is an interface.
    #[must_use]
    pub const fn is_interface(self) -> bool {
        matches!(self, Self::IObject)
    }

    /// Checks if the type is a shadow exception that is seeded into every hierarchy, whether or
    /// not the rest of the shadow exceptions are.
    #[must_use]
    pub const fn is_shadow_exception_root(self) -> bool {
        matches!(
            self,
            Self::ShadowThrowable
                | Self::ShadowError
                | Self::ShadowException
                | Self::ShadowRuntimeException
        )
    }
}
