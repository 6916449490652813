//! Host types that are allowed to cross into the sandbox.
//!
//! These tables are the default whitelist. They are handed to
//! [`ClassRenamerConfig::with_host_library`](crate::renaming::ClassRenamerConfig::with_host_library)
//! and [`ClassHierarchyConfig`](crate::hierarchy::ClassHierarchyConfig) explicitly so that a
//! sandbox configuration can be reproduced from its inputs alone.

/// A whitelisted host class or interface, described with its original (dotted) names.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct HostClass {
    /// The original name.
    pub name: &'static str,
    /// Whether the type is an interface.
    pub is_interface: bool,
    /// The original name of the super class. `None` for interfaces.
    pub super_class: Option<&'static str>,
    /// The original names of the directly implemented or extended interfaces.
    pub interfaces: &'static [&'static str],
}

const fn class(
    name: &'static str,
    super_class: &'static str,
    interfaces: &'static [&'static str],
) -> HostClass {
    HostClass {
        name,
        is_interface: false,
        super_class: Some(super_class),
        interfaces,
    }
}

const fn interface(name: &'static str, interfaces: &'static [&'static str]) -> HostClass {
    HostClass {
        name,
        is_interface: true,
        super_class: None,
        interfaces,
    }
}

const OBJECT: &str = "java.lang.Object";
const COMPARABLE: &str = "java.lang.Comparable";
const SERIALIZABLE: &str = "java.io.Serializable";
const CHAR_SEQUENCE: &str = "java.lang.CharSequence";

/// Standard library types that have a shadow counterpart in the `s.` namespace.
///
/// `java.lang.Object` is not listed: its counterpart is a fixed hierarchy root.
pub const SHADOW_LIBRARY: &[HostClass] = &[
    interface(COMPARABLE, &[]),
    interface(SERIALIZABLE, &[]),
    interface(CHAR_SEQUENCE, &[]),
    interface("java.lang.Iterable", &[]),
    interface("java.lang.Runnable", &[]),
    interface("java.lang.AutoCloseable", &[]),
    interface("java.util.Collection", &["java.lang.Iterable"]),
    interface("java.util.List", &["java.util.Collection"]),
    interface("java.util.Set", &["java.util.Collection"]),
    interface("java.util.Map", &[]),
    interface("java.util.Iterator", &[]),
    interface("java.util.function.Function", &[]),
    class("java.lang.Number", OBJECT, &[SERIALIZABLE]),
    class("java.lang.Byte", "java.lang.Number", &[COMPARABLE]),
    class("java.lang.Short", "java.lang.Number", &[COMPARABLE]),
    class("java.lang.Integer", "java.lang.Number", &[COMPARABLE]),
    class("java.lang.Long", "java.lang.Number", &[COMPARABLE]),
    class("java.lang.Float", "java.lang.Number", &[COMPARABLE]),
    class("java.lang.Double", "java.lang.Number", &[COMPARABLE]),
    class("java.lang.Boolean", OBJECT, &[SERIALIZABLE, COMPARABLE]),
    class("java.lang.Character", OBJECT, &[SERIALIZABLE, COMPARABLE]),
    class(
        "java.lang.String",
        OBJECT,
        &[SERIALIZABLE, COMPARABLE, CHAR_SEQUENCE],
    ),
    class("java.lang.StringBuilder", OBJECT, &[SERIALIZABLE, CHAR_SEQUENCE]),
    class("java.lang.Class", OBJECT, &[SERIALIZABLE]),
    class("java.lang.Enum", OBJECT, &[COMPARABLE, SERIALIZABLE]),
    class("java.lang.Math", OBJECT, &[]),
    class("java.lang.System", OBJECT, &[]),
    class("java.math.BigInteger", "java.lang.Number", &[COMPARABLE]),
    class("java.math.BigDecimal", "java.lang.Number", &[COMPARABLE]),
    class("java.math.MathContext", OBJECT, &[SERIALIZABLE]),
    class("java.math.RoundingMode", "java.lang.Enum", &[]),
    class("java.util.Arrays", OBJECT, &[]),
];

/// Host exceptions that have a shadow counterpart in the `s.` namespace.
pub const SHADOW_EXCEPTIONS: &[HostClass] = &[
    class("java.lang.Throwable", OBJECT, &[]),
    class("java.lang.Error", "java.lang.Throwable", &[]),
    class("java.lang.Exception", "java.lang.Throwable", &[]),
    class("java.lang.RuntimeException", "java.lang.Exception", &[]),
    class("java.lang.AssertionError", "java.lang.Error", &[]),
    class("java.lang.LinkageError", "java.lang.Error", &[]),
    class("java.lang.NoClassDefFoundError", "java.lang.LinkageError", &[]),
    class(
        "java.lang.ExceptionInInitializerError",
        "java.lang.LinkageError",
        &[],
    ),
    class("java.lang.VirtualMachineError", "java.lang.Error", &[]),
    class(
        "java.lang.OutOfMemoryError",
        "java.lang.VirtualMachineError",
        &[],
    ),
    class(
        "java.lang.StackOverflowError",
        "java.lang.VirtualMachineError",
        &[],
    ),
    class("java.lang.ReflectiveOperationException", "java.lang.Exception", &[]),
    class(
        "java.lang.ClassNotFoundException",
        "java.lang.ReflectiveOperationException",
        &[],
    ),
    class(
        "java.lang.NoSuchFieldException",
        "java.lang.ReflectiveOperationException",
        &[],
    ),
    class("java.lang.CloneNotSupportedException", "java.lang.Exception", &[]),
    class("java.lang.InterruptedException", "java.lang.Exception", &[]),
    class("java.lang.ArithmeticException", "java.lang.RuntimeException", &[]),
    class("java.lang.ArrayStoreException", "java.lang.RuntimeException", &[]),
    class("java.lang.ClassCastException", "java.lang.RuntimeException", &[]),
    class(
        "java.lang.IllegalArgumentException",
        "java.lang.RuntimeException",
        &[],
    ),
    class(
        "java.lang.NumberFormatException",
        "java.lang.IllegalArgumentException",
        &[],
    ),
    class(
        "java.lang.IllegalStateException",
        "java.lang.RuntimeException",
        &[],
    ),
    class(
        "java.lang.IndexOutOfBoundsException",
        "java.lang.RuntimeException",
        &[],
    ),
    class(
        "java.lang.ArrayIndexOutOfBoundsException",
        "java.lang.IndexOutOfBoundsException",
        &[],
    ),
    class(
        "java.lang.StringIndexOutOfBoundsException",
        "java.lang.IndexOutOfBoundsException",
        &[],
    ),
    class(
        "java.lang.NegativeArraySizeException",
        "java.lang.RuntimeException",
        &[],
    ),
    class(
        "java.lang.NullPointerException",
        "java.lang.RuntimeException",
        &[],
    ),
    class(
        "java.lang.UnsupportedOperationException",
        "java.lang.RuntimeException",
        &[],
    ),
    class(
        "java.util.NoSuchElementException",
        "java.lang.RuntimeException",
        &[],
    ),
    class(
        "java.util.ConcurrentModificationException",
        "java.lang.RuntimeException",
        &[],
    ),
];

/// Host-facing API types, renamed into the `p.` namespace.
pub const API_CLASSES: &[HostClass] = &[
    class("avm.Address", OBJECT, &[]),
    class("avm.Blockchain", OBJECT, &[]),
    class("avm.Result", OBJECT, &[]),
    class(
        "avm.RequireFailedException",
        "java.lang.RuntimeException",
        &[],
    ),
];
