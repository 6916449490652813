//! Seeding a hierarchy from the host library tables.

use super::{ClassHierarchy, ClassInformation, HierarchyError};
use crate::{
    library::{API_CLASSES, HostClass, SHADOW_EXCEPTIONS, SHADOW_LIBRARY},
    renaming::{API_PREFIX, ARRAY_WRAPPER_PREFIX, HiddenArrayType, SHADOW_PREFIX},
    types::{CommonType, I_OBJECT, PrimitiveType, SHADOW_OBJECT},
};

/// What a freshly built [`ClassHierarchy`] is seeded with, on top of the four fixed roots.
#[derive(Debug, Clone)]
pub struct ClassHierarchyConfig {
    /// Seed the shadow standard library from [`SHADOW_LIBRARY`].
    pub shadow_library: bool,
    /// Seed every shadow exception from [`SHADOW_EXCEPTIONS`]. The exception subtree roots
    /// flagged by [`CommonType::is_shadow_exception_root`] are seeded regardless.
    pub shadow_exceptions: bool,
    /// Seed the host-facing API types from [`API_CLASSES`].
    pub api_classes: bool,
    /// Seed the hidden array base types and the one-dimensional primitive array wrappers.
    pub array_types: bool,
    /// Additional post-rename types, in any order.
    pub extra_classes: Vec<ClassInformation>,
    /// User-defined types as `(pre-rename, post-rename)` pairs, parents first.
    pub user_classes: Vec<(ClassInformation, ClassInformation)>,
}

impl Default for ClassHierarchyConfig {
    fn default() -> Self {
        Self {
            shadow_library: true,
            shadow_exceptions: true,
            api_classes: true,
            array_types: true,
            extra_classes: Vec::new(),
            user_classes: Vec::new(),
        }
    }
}

impl ClassHierarchyConfig {
    /// A configuration that seeds nothing but the roots and the exception subtree roots.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            shadow_library: false,
            shadow_exceptions: false,
            api_classes: false,
            array_types: false,
            ..Self::default()
        }
    }

    /// Adds post-rename types.
    #[must_use]
    pub fn with_classes<I>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = ClassInformation>,
    {
        self.extra_classes.extend(classes);
        self
    }

    /// Adds a user-defined type.
    #[must_use]
    pub fn with_user_class(
        mut self,
        pre_rename: ClassInformation,
        post_rename: ClassInformation,
    ) -> Self {
        self.user_classes.push((pre_rename, post_rename));
        self
    }
}

impl ClassHierarchy {
    /// Builds a hierarchy according to `config`.
    /// # Errors
    /// See [`ClassHierarchy::insert_all`] and [`ClassHierarchy::insert_user_defined`].
    pub fn build(config: ClassHierarchyConfig) -> Result<Self, HierarchyError> {
        let mut hierarchy = Self::new();
        let exceptions = SHADOW_EXCEPTIONS.iter().filter(|it| {
            config.shadow_exceptions
                || CommonType::from_name(&post_rename_name(it.name))
                    .is_some_and(CommonType::is_shadow_exception_root)
        });
        let library = SHADOW_LIBRARY
            .iter()
            .filter(|_| config.shadow_library)
            .chain(exceptions)
            .chain(API_CLASSES.iter().filter(|_| config.api_classes))
            .map(host_class_information);
        hierarchy.insert_all(library)?;
        if config.array_types {
            hierarchy.insert_all(array_types())?;
        }
        hierarchy.insert_all(config.extra_classes)?;
        for (pre_rename, post_rename) in config.user_classes {
            hierarchy.insert_user_defined(pre_rename, post_rename)?;
        }
        tracing::debug!(classes = hierarchy.len(), "built class hierarchy");
        Ok(hierarchy)
    }
}

fn post_rename_name(original: &str) -> String {
    let prefix = if API_CLASSES.iter().any(|it| it.name == original) {
        API_PREFIX
    } else {
        SHADOW_PREFIX
    };
    format!("{prefix}{original}")
}

fn host_class_information(host: &HostClass) -> ClassInformation {
    let interfaces = host.interfaces.iter().map(|it| post_rename_name(it));
    match host.super_class {
        Some(super_class) => ClassInformation::post_rename_class(
            post_rename_name(host.name),
            post_rename_name(super_class),
            interfaces,
        ),
        None => ClassInformation::post_rename_interface(post_rename_name(host.name), interfaces),
    }
}

fn array_types() -> Vec<ClassInformation> {
    let hidden = HiddenArrayType::ALL.map(|hidden| match hidden {
        HiddenArrayType::IArray => {
            ClassInformation::post_rename_interface(hidden.name(), [I_OBJECT])
        }
        HiddenArrayType::Array => ClassInformation::post_rename_class(
            hidden.name(),
            SHADOW_OBJECT,
            [HiddenArrayType::IArray.name()],
        ),
        HiddenArrayType::IObjectArray => ClassInformation::post_rename_interface(
            hidden.name(),
            [HiddenArrayType::IArray.name()],
        ),
        HiddenArrayType::ObjectArray => ClassInformation::post_rename_class(
            hidden.name(),
            HiddenArrayType::Array.name(),
            [HiddenArrayType::IObjectArray.name()],
        ),
    });
    let primitives = PrimitiveType::ALL.map(|p| {
        ClassInformation::post_rename_class(
            format!("{ARRAY_WRAPPER_PREFIX}{}", p.array_wrapper_simple_name()),
            HiddenArrayType::Array.name(),
            Vec::<String>::new(),
        )
    });
    hidden.into_iter().chain(primitives).collect()
}
