use proptest::prelude::*;

use crate::{
    hierarchy::{ClassHierarchy, ClassHierarchyConfig, ClassInformation},
    renaming::{ClassRenamer, ClassRenamerConfig},
    types::{ArrayKind, ClassOrigin, NameStyle, SHADOW_OBJECT},
};

pub(crate) fn arb_dotted_class_name() -> impl Strategy<Value = String> {
    let arb_ident =
        prop::string::string_regex(r"[a-zA-Z][a-zA-Z0-9_\$]{0,8}").expect("The regex is invalid");
    prop::collection::vec(arb_ident, 1..=4).prop_map(|v| v.join("."))
}

pub(crate) fn arb_array_kind() -> impl Strategy<Value = ArrayKind> {
    prop_oneof![Just(ArrayKind::Precise), Just(ArrayKind::Unifying)]
}

/// The user-defined types of the test contract, as `(pre-rename, post-rename)` pairs.
///
/// `Circle`, `Square` and `Label` extend `Shape`. `Label` also implements the interface `Named`.
/// `Failure` is a user exception.
pub(crate) fn contract_classes() -> Vec<(ClassInformation, ClassInformation)> {
    let none = Vec::<String>::new;
    vec![
        (
            ClassInformation::pre_rename_class("com.example.Shape", "java.lang.Object", none()),
            ClassInformation::post_rename_class("user.com.example.Shape", SHADOW_OBJECT, none()),
        ),
        (
            ClassInformation::pre_rename_interface("com.example.Named", none()),
            ClassInformation::post_rename_interface("user.com.example.Named", none()),
        ),
        (
            ClassInformation::pre_rename_class(
                "com.example.Circle",
                "com.example.Shape",
                none(),
            ),
            ClassInformation::post_rename_class(
                "user.com.example.Circle",
                "user.com.example.Shape",
                none(),
            ),
        ),
        (
            ClassInformation::pre_rename_class(
                "com.example.Square",
                "com.example.Shape",
                none(),
            ),
            ClassInformation::post_rename_class(
                "user.com.example.Square",
                "user.com.example.Shape",
                none(),
            ),
        ),
        (
            ClassInformation::pre_rename_class(
                "com.example.Label",
                "com.example.Shape",
                ["com.example.Named"],
            ),
            ClassInformation::post_rename_class(
                "user.com.example.Label",
                "user.com.example.Shape",
                ["user.com.example.Named"],
            ),
        ),
        (
            ClassInformation::pre_rename_class(
                "com.example.Failure",
                "java.lang.RuntimeException",
                none(),
            ),
            ClassInformation::post_rename_class(
                "user.com.example.Failure",
                "s.java.lang.RuntimeException",
                none(),
            ),
        ),
    ]
}

/// A hierarchy seeded with the host library and the test contract.
pub(crate) fn contract_hierarchy() -> ClassHierarchy {
    let config = contract_classes()
        .into_iter()
        .fold(ClassHierarchyConfig::default(), |config, (pre, post)| {
            config.with_user_class(pre, post)
        });
    ClassHierarchy::build(config).expect("The test contract is well-formed")
}

/// A renamer that knows the host library and the test contract.
pub(crate) fn contract_renamer(style: NameStyle) -> ClassRenamer {
    let config = ClassRenamerConfig::new(style)
        .with_host_library()
        .with_user_classes(
            contract_classes()
                .into_iter()
                .map(|(pre, _)| style.from_dotted(&pre.name)),
            ClassOrigin::PreRename,
        );
    ClassRenamer::new(config).expect("The test contract is well-formed")
}
