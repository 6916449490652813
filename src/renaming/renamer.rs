//! The bidirectional mapping between original names and sandbox names.

use std::collections::HashSet;

use super::{
    API_PREFIX, ARRAY_WRAPPER_PREFIX, EXCEPTION_WRAPPER_PREFIX, INTERNAL_PREFIX, RenameError,
    SHADOW_PREFIX, UNIFYING_ARRAY_PREFIX, USER_PREFIX,
    array_names::{ArrayNameMapper, HiddenArrayType},
};
use crate::{
    library::{API_CLASSES, SHADOW_EXCEPTIONS, SHADOW_LIBRARY},
    types::{ArrayKind, ArrayType, ClassOrigin, ElementType, JAVA_LANG_OBJECT, NameStyle},
};

/// The inputs a [`ClassRenamer`] is built from.
///
/// Every name is written in [`ClassRenamerConfig::style`]. User classes and shadow exceptions may
/// be given in either namespace; the renamer normalizes them to their original names.
#[derive(Debug, Default, Clone)]
pub struct ClassRenamerConfig {
    /// The style of every name given to and returned by the renamer.
    pub style: NameStyle,
    /// When set, user classes keep their original names.
    pub debug_mode: bool,
    /// The classes and interfaces defined by the contract.
    pub user_classes: Vec<(String, ClassOrigin)>,
    /// The host exceptions that have a shadow counterpart.
    pub shadow_exceptions: Vec<(String, ClassOrigin)>,
    /// The original names of the other shadowed standard library types.
    pub shadow_classes: Vec<String>,
    /// The original names of the host-facing API types.
    pub api_classes: Vec<String>,
}

impl ClassRenamerConfig {
    /// Creates an empty configuration using the given name style.
    #[must_use]
    pub fn new(style: NameStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Enables or disables debug mode.
    #[must_use]
    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Adds a user-defined class or interface.
    #[must_use]
    pub fn with_user_class(mut self, name: impl Into<String>, origin: ClassOrigin) -> Self {
        self.user_classes.push((name.into(), origin));
        self
    }

    /// Adds several user-defined classes or interfaces written in the same namespace.
    #[must_use]
    pub fn with_user_classes<I>(mut self, names: I, origin: ClassOrigin) -> Self
    where
        I: IntoIterator<Item: Into<String>>,
    {
        self.user_classes
            .extend(names.into_iter().map(|it| (it.into(), origin)));
        self
    }

    /// Adds a shadow exception.
    #[must_use]
    pub fn with_shadow_exception(mut self, name: impl Into<String>, origin: ClassOrigin) -> Self {
        self.shadow_exceptions.push((name.into(), origin));
        self
    }

    /// Adds the default host whitelist from [`crate::library`].
    #[must_use]
    pub fn with_host_library(mut self) -> Self {
        let style = self.style;
        self.shadow_classes
            .extend(SHADOW_LIBRARY.iter().map(|it| style.from_dotted(it.name)));
        self.shadow_exceptions.extend(
            SHADOW_EXCEPTIONS
                .iter()
                .map(|it| (style.from_dotted(it.name), ClassOrigin::PreRename)),
        );
        self.api_classes
            .extend(API_CLASSES.iter().map(|it| style.from_dotted(it.name)));
        self
    }
}

/// Maps class names between the host namespace and the sandbox namespace.
///
/// A renamer is immutable once built and can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct ClassRenamer {
    style: NameStyle,
    debug_mode: bool,
    user_classes: HashSet<String>,
    shadow_exceptions: HashSet<String>,
    shadow_classes: HashSet<String>,
    api_classes: HashSet<String>,
}

impl ClassRenamer {
    /// Builds a renamer from its configuration.
    /// # Errors
    /// - [`RenameError::InvalidConfig`] if a post-rename name lacks its namespace prefix.
    pub fn new(config: ClassRenamerConfig) -> Result<Self, RenameError> {
        let ClassRenamerConfig {
            style,
            debug_mode,
            user_classes,
            shadow_exceptions,
            shadow_classes,
            api_classes,
        } = config;
        let user_prefix = if debug_mode { "" } else { USER_PREFIX };
        let user_classes = user_classes
            .into_iter()
            .map(|(name, origin)| normalize(style, &name, origin, user_prefix))
            .collect::<Result<HashSet<_>, _>>()?;
        let shadow_exceptions = shadow_exceptions
            .into_iter()
            .map(|(name, origin)| normalize(style, &name, origin, SHADOW_PREFIX))
            .collect::<Result<HashSet<_>, _>>()?;
        let to_dotted = |name: String| style.to_dotted(&name).into_owned();
        let renamer = Self {
            style,
            debug_mode,
            user_classes,
            shadow_exceptions,
            shadow_classes: shadow_classes.into_iter().map(to_dotted).collect(),
            api_classes: api_classes.into_iter().map(to_dotted).collect(),
        };
        tracing::debug!(
            %style,
            debug_mode,
            user_classes = renamer.user_classes.len(),
            shadow_exceptions = renamer.shadow_exceptions.len(),
            "built class renamer"
        );
        Ok(renamer)
    }

    /// Returns the name style of this renamer.
    #[must_use]
    pub const fn style(&self) -> NameStyle {
        self.style
    }

    /// Checks if user classes keep their original names.
    #[must_use]
    pub const fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Maps an original name to its sandbox name.
    ///
    /// Plain names ignore `array_kind`. Array descriptors are renamed element-wise and wrapped
    /// according to `array_kind`.
    /// # Errors
    /// - [`RenameError::NotWhitelisted`] if the class (or the array element) may not be used in
    ///   the sandbox.
    /// - [`RenameError::MissingArrayKind`] if an array is renamed with [`ArrayKind::NotArray`].
    /// - [`RenameError::MalformedArrayName`] if an array descriptor can not be parsed.
    pub fn to_post_rename(&self, name: &str, array_kind: ArrayKind) -> Result<String, RenameError> {
        let dotted = self.style.to_dotted(name);
        self.post_rename_dotted(&dotted, array_kind)
            .map(|it| self.style.from_dotted(&it))
    }

    /// Same as [`ClassRenamer::to_post_rename`], but a class outside the whitelist is reported as
    /// [`RenameError::RejectedClass`]. This is the variant used while admitting a contract.
    /// # Errors
    /// See [`ClassRenamer::to_post_rename`].
    pub fn to_post_rename_or_reject(
        &self,
        name: &str,
        array_kind: ArrayKind,
    ) -> Result<String, RenameError> {
        self.to_post_rename(name, array_kind).map_err(|err| match err {
            RenameError::NotWhitelisted(name) => RenameError::RejectedClass(name),
            other => other,
        })
    }

    /// Maps a sandbox name back to its original name.
    /// # Errors
    /// - [`RenameError::AlreadyOriginal`] if the name is already in the host namespace.
    /// - [`RenameError::NoOriginalForm`] if the name denotes a sandbox-internal type.
    /// - [`RenameError::MalformedArrayName`] if the name looks like an array wrapper but can not
    ///   be decoded.
    pub fn to_pre_rename(&self, name: &str) -> Result<String, RenameError> {
        let dotted = self.style.to_dotted(name);
        self.pre_rename_dotted(&dotted)
            .map(|it| self.style.from_dotted(&it))
    }

    /// Returns the name of the wrapper that carries the given host exception when it is rethrown
    /// inside the sandbox. [`ClassRenamer::to_pre_rename`] inverts it.
    /// # Errors
    /// - [`RenameError::NotWhitelisted`] if the name is neither a shadow exception nor a user
    ///   class.
    pub fn to_exception_wrapper(&self, name: &str) -> Result<String, RenameError> {
        let dotted = self.style.to_dotted(name);
        if self.shadow_exceptions.contains(&*dotted)
            || self.user_classes.contains(&*dotted)
        {
            Ok(self
                .style
                .from_dotted(&format!("{EXCEPTION_WRAPPER_PREFIX}{dotted}")))
        } else {
            Err(RenameError::NotWhitelisted(dotted.into_owned()))
        }
    }

    /// Checks if the name denotes an array in either namespace or one of the hidden array base
    /// types.
    #[must_use]
    pub fn is_array_shaped(&self, name: &str) -> bool {
        is_array_shaped_dotted(&self.style.to_dotted(name))
    }

    pub(crate) fn post_rename_dotted(
        &self,
        name: &str,
        array_kind: ArrayKind,
    ) -> Result<String, RenameError> {
        if !name.starts_with('[') {
            return self.post_rename_plain(name);
        }
        let array: ArrayType = name
            .parse()
            .map_err(|_| RenameError::MalformedArrayName(name.to_owned()))?;
        let element = match array.element {
            ElementType::Object(base) => ElementType::Object(self.post_rename_plain(&base)?),
            primitive @ ElementType::Primitive(_) => primitive,
        };
        let renamed = ArrayType {
            dimension: array.dimension,
            element,
        };
        ArrayNameMapper::wrapper_name(&renamed, array_kind)
    }

    fn post_rename_plain(&self, name: &str) -> Result<String, RenameError> {
        if self.user_classes.contains(name) {
            if self.debug_mode {
                Ok(name.to_owned())
            } else {
                Ok(format!("{USER_PREFIX}{name}"))
            }
        } else if name == JAVA_LANG_OBJECT
            || self.shadow_exceptions.contains(name)
            || self.shadow_classes.contains(name)
        {
            Ok(format!("{SHADOW_PREFIX}{name}"))
        } else if self.api_classes.contains(name) {
            Ok(format!("{API_PREFIX}{name}"))
        } else {
            Err(RenameError::NotWhitelisted(name.to_owned()))
        }
    }

    pub(crate) fn pre_rename_dotted(&self, name: &str) -> Result<String, RenameError> {
        if self.debug_mode && self.user_classes.contains(name) {
            return Ok(name.to_owned());
        }
        if let Some(original) = name.strip_prefix(EXCEPTION_WRAPPER_PREFIX) {
            return Ok(original.to_owned());
        }
        if HiddenArrayType::from_name(name).is_some() {
            return Err(RenameError::NoOriginalForm(name.to_owned()));
        }
        if let Some((array, _)) = ArrayNameMapper::decode(name) {
            let element = match array.element {
                ElementType::Object(base) => ElementType::Object(self.pre_rename_plain(&base)?),
                primitive @ ElementType::Primitive(_) => primitive,
            };
            let original = ArrayType {
                dimension: array.dimension,
                element,
            };
            return Ok(original.descriptor());
        }
        if name.starts_with(ARRAY_WRAPPER_PREFIX) || name.starts_with(UNIFYING_ARRAY_PREFIX) {
            return Err(RenameError::MalformedArrayName(name.to_owned()));
        }
        self.pre_rename_plain(name)
    }

    fn pre_rename_plain(&self, name: &str) -> Result<String, RenameError> {
        if self.debug_mode && self.user_classes.contains(name) {
            return Ok(name.to_owned());
        }
        let user = (!self.debug_mode)
            .then(|| name.strip_prefix(USER_PREFIX))
            .flatten();
        if let Some(original) = user
            .or_else(|| name.strip_prefix(SHADOW_PREFIX))
            .or_else(|| name.strip_prefix(API_PREFIX))
        {
            Ok(original.to_owned())
        } else if name.starts_with(INTERNAL_PREFIX) {
            Err(RenameError::NoOriginalForm(name.to_owned()))
        } else {
            Err(RenameError::AlreadyOriginal(name.to_owned()))
        }
    }
}

pub(crate) fn is_array_shaped_dotted(name: &str) -> bool {
    name.starts_with('[')
        || ArrayNameMapper::is_array_wrapper(name)
        || HiddenArrayType::from_name(name).is_some()
}

fn normalize(
    style: NameStyle,
    name: &str,
    origin: ClassOrigin,
    prefix: &str,
) -> Result<String, RenameError> {
    let dotted = style.to_dotted(name);
    match origin {
        ClassOrigin::PreRename => Ok(dotted.into_owned()),
        ClassOrigin::PostRename => dotted
            .strip_prefix(prefix)
            .map(ToOwned::to_owned)
            .ok_or_else(|| {
                RenameError::InvalidConfig(format!("{dotted} does not start with `{prefix}`"))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{arb_array_kind, arb_dotted_class_name};
    use proptest::prelude::*;

    fn renamer(style: NameStyle, debug_mode: bool) -> ClassRenamer {
        let config = ClassRenamerConfig::new(style)
            .with_debug_mode(debug_mode)
            .with_host_library()
            .with_user_class(
                style.from_dotted("com.example.Token"),
                ClassOrigin::PreRename,
            );
        ClassRenamer::new(config).unwrap()
    }

    #[test]
    fn user_classes_are_prefixed_in_release_mode() {
        let renamer = renamer(NameStyle::Dotted, false);
        assert_eq!(
            renamer
                .to_post_rename("com.example.Token", ArrayKind::NotArray)
                .unwrap(),
            "user.com.example.Token"
        );
    }

    #[test]
    fn user_classes_are_unchanged_in_debug_mode() {
        let renamer = renamer(NameStyle::Dotted, true);
        assert_eq!(
            renamer
                .to_post_rename("com.example.Token", ArrayKind::NotArray)
                .unwrap(),
            "com.example.Token"
        );
        assert_eq!(
            renamer.to_pre_rename("com.example.Token").unwrap(),
            "com.example.Token"
        );
    }

    #[test]
    fn host_types_use_their_namespace() {
        let renamer = renamer(NameStyle::Dotted, false);
        let cases = [
            ("java.lang.Object", "s.java.lang.Object"),
            ("java.lang.String", "s.java.lang.String"),
            ("java.lang.ArithmeticException", "s.java.lang.ArithmeticException"),
            ("avm.Address", "p.avm.Address"),
        ];
        for (original, renamed) in cases {
            assert_eq!(
                renamer.to_post_rename(original, ArrayKind::NotArray).unwrap(),
                renamed
            );
            assert_eq!(renamer.to_pre_rename(renamed).unwrap(), original);
        }
    }

    #[test]
    fn slashed_style() {
        let renamer = renamer(NameStyle::Slashed, false);
        assert_eq!(
            renamer
                .to_post_rename("[[Ljava/lang/String;", ArrayKind::Unifying)
                .unwrap(),
            "w/__Ls/java/lang/String"
        );
        assert_eq!(
            renamer.to_pre_rename("a/$Luser/com/example/Token").unwrap(),
            "[Lcom/example/Token;"
        );
    }

    #[test]
    fn arrays() {
        let renamer = renamer(NameStyle::Dotted, false);
        assert_eq!(
            renamer.to_post_rename("[I", ArrayKind::Precise).unwrap(),
            "a.IntArray"
        );
        assert_eq!(
            renamer.to_post_rename("[[J", ArrayKind::Precise).unwrap(),
            "a.$$J"
        );
        assert_eq!(
            renamer
                .to_post_rename("[Lcom.example.Token;", ArrayKind::Precise)
                .unwrap(),
            "a.$Luser.com.example.Token"
        );
        assert_eq!(
            renamer.to_post_rename("[I", ArrayKind::NotArray),
            Err(RenameError::MissingArrayKind("[I".to_owned()))
        );
        assert_eq!(
            renamer.to_post_rename("[Ljava.lang.String", ArrayKind::Precise),
            Err(RenameError::MalformedArrayName("[Ljava.lang.String".to_owned()))
        );
    }

    #[test]
    fn unknown_host_types() {
        let renamer = renamer(NameStyle::Dotted, false);
        assert_eq!(
            renamer.to_post_rename("java.lang.Thread", ArrayKind::NotArray),
            Err(RenameError::NotWhitelisted("java.lang.Thread".to_owned()))
        );
        assert_eq!(
            renamer.to_post_rename_or_reject("java.lang.Thread", ArrayKind::NotArray),
            Err(RenameError::RejectedClass("java.lang.Thread".to_owned()))
        );
        assert_eq!(
            renamer.to_post_rename_or_reject("[[Ljava.lang.Thread;", ArrayKind::Precise),
            Err(RenameError::RejectedClass("java.lang.Thread".to_owned()))
        );
        assert_eq!(
            renamer
                .to_post_rename_or_reject("java.lang.String", ArrayKind::NotArray)
                .unwrap(),
            "s.java.lang.String"
        );
    }

    #[test]
    fn already_original_names() {
        let renamer = renamer(NameStyle::Dotted, false);
        for name in ["java.lang.String", "com.example.Token", "[I"] {
            assert_eq!(
                renamer.to_pre_rename(name),
                Err(RenameError::AlreadyOriginal(name.to_owned()))
            );
        }
    }

    #[test]
    fn internal_types_have_no_original_form() {
        let renamer = renamer(NameStyle::Dotted, false);
        for name in ["i.IObject", "a.Array", "a.IObjectArray"] {
            assert_eq!(
                renamer.to_pre_rename(name),
                Err(RenameError::NoOriginalForm(name.to_owned()))
            );
        }
        assert_eq!(
            renamer.to_pre_rename("a.$X"),
            Err(RenameError::MalformedArrayName("a.$X".to_owned()))
        );
    }

    #[test]
    fn exception_wrappers() {
        let renamer = renamer(NameStyle::Dotted, false);
        let wrapper = renamer
            .to_exception_wrapper("java.lang.ArithmeticException")
            .unwrap();
        assert_eq!(wrapper, "e.java.lang.ArithmeticException");
        assert_eq!(
            renamer.to_pre_rename(&wrapper).unwrap(),
            "java.lang.ArithmeticException"
        );
        assert_eq!(
            renamer.to_exception_wrapper("java.lang.String"),
            Err(RenameError::NotWhitelisted("java.lang.String".to_owned()))
        );
    }

    #[test]
    fn post_rename_config_entries_are_normalized() {
        let config = ClassRenamerConfig::new(NameStyle::Slashed)
            .with_user_class("user/org/Foo", ClassOrigin::PostRename)
            .with_shadow_exception("s/java/lang/Error", ClassOrigin::PostRename);
        let renamer = ClassRenamer::new(config).unwrap();
        assert_eq!(
            renamer.to_post_rename("org/Foo", ArrayKind::NotArray).unwrap(),
            "user/org/Foo"
        );
        assert_eq!(
            renamer
                .to_post_rename("java/lang/Error", ArrayKind::NotArray)
                .unwrap(),
            "s/java/lang/Error"
        );
    }

    #[test]
    fn post_rename_config_entries_need_their_prefix() {
        let config = ClassRenamerConfig::default()
            .with_shadow_exception("java.lang.Error", ClassOrigin::PostRename);
        assert!(matches!(
            ClassRenamer::new(config),
            Err(RenameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn array_shapes() {
        let renamer = renamer(NameStyle::Slashed, false);
        for name in ["[I", "a/IntArray", "a/$$Ls/java/lang/String", "w/_Lp/avm/Address", "a/Array"] {
            assert!(renamer.is_array_shaped(name), "{name}");
        }
        for name in ["java/lang/String", "s/java/lang/String", "i/IObject"] {
            assert!(!renamer.is_array_shaped(name), "{name}");
        }
    }

    proptest! {
        #[test]
        fn user_class_round_trip(
            name in arb_dotted_class_name(),
            debug_mode in any::<bool>(),
            style in any::<NameStyle>(),
        ) {
            let styled = style.from_dotted(&name);
            let config = ClassRenamerConfig::new(style)
                .with_debug_mode(debug_mode)
                .with_user_class(styled.clone(), ClassOrigin::PreRename);
            let renamer = ClassRenamer::new(config).unwrap();
            let renamed = renamer.to_post_rename(&styled, ArrayKind::NotArray).unwrap();
            assert_eq!(renamer.to_pre_rename(&renamed).unwrap(), styled);
        }

        #[test]
        fn user_array_round_trip(
            name in arb_dotted_class_name(),
            dimension in 1..=6u8,
            kind in arb_array_kind(),
            debug_mode in any::<bool>(),
        ) {
            let config = ClassRenamerConfig::default()
                .with_debug_mode(debug_mode)
                .with_user_class(name.clone(), ClassOrigin::PreRename);
            let renamer = ClassRenamer::new(config).unwrap();
            let descriptor = ArrayType::object(dimension, name).unwrap().descriptor();
            let renamed = renamer.to_post_rename(&descriptor, kind).unwrap();
            assert_eq!(renamer.to_pre_rename(&renamed).unwrap(), descriptor);
        }

        #[test]
        fn primitive_array_round_trip(
            p in any::<crate::types::PrimitiveType>(),
            dimension in 1..=6u8,
            kind in arb_array_kind(),
        ) {
            let renamer = ClassRenamer::new(ClassRenamerConfig::default()).unwrap();
            let descriptor = ArrayType::primitive(dimension, p).unwrap().descriptor();
            let renamed = renamer.to_post_rename(&descriptor, kind).unwrap();
            assert_eq!(renamer.to_pre_rename(&renamed).unwrap(), descriptor);
        }
    }
}
