//! Serialization styles of class names.

use std::borrow::Cow;

/// The separator used between the package segments of a class name.
///
/// This is purely a serialization choice; every component reasons about dotted names
/// internally and converts at its public boundary.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, derive_more::Display)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum NameStyle {
    /// `java.lang.Object`
    #[default]
    #[display("dotted")]
    Dotted,
    /// `java/lang/Object`, the internal form used in class files and stack map frames.
    #[display("slashed")]
    Slashed,
}

impl NameStyle {
    /// Returns the package separator of this style.
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Dotted => '.',
            Self::Slashed => '/',
        }
    }

    /// Converts a name written in this style into dotted form.
    #[must_use]
    pub fn to_dotted(self, name: &str) -> Cow<'_, str> {
        match self {
            Self::Dotted => Cow::Borrowed(name),
            Self::Slashed => Cow::Owned(name.replace('/', ".")),
        }
    }

    /// Converts a dotted name into this style.
    #[must_use]
    pub fn from_dotted(self, name: &str) -> String {
        match self {
            Self::Dotted => name.to_owned(),
            Self::Slashed => name.replace('.', "/"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slashed_round_trip() {
        let style = NameStyle::Slashed;
        assert_eq!(style.to_dotted("java/lang/String"), "java.lang.String");
        assert_eq!(style.from_dotted("a.$$Ls.java.lang.String"), "a/$$Ls/java/lang/String");
        assert_eq!(style.to_dotted("[Ljava/lang/Object;"), "[Ljava.lang.Object;");
    }

    #[test]
    fn dotted_is_identity() {
        let style = NameStyle::Dotted;
        assert!(matches!(style.to_dotted("java.lang.Object"), Cow::Borrowed(_)));
        assert_eq!(style.from_dotted("user.Foo"), "user.Foo");
    }
}
