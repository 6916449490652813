//! The class hierarchy of the sandbox namespace.
//!
//! Nodes are post-rename classes and interfaces. Edges point from a type to its super class and
//! to each of its super-interfaces, so the hierarchy is a DAG rather than a tree.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use itertools::Itertools;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::{Control, Dfs, DfsEvent, Reversed, depth_first_search},
};

use crate::types::{ClassOrigin, CommonType, I_OBJECT, JAVA_LANG_OBJECT};

mod builder;

pub use builder::ClassHierarchyConfig;

/// Describes a class or interface to be recorded in a [`ClassHierarchy`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ClassInformation {
    /// The dotted name of the type.
    pub name: String,
    /// Whether the type is an interface.
    pub is_interface: bool,
    /// The dotted name of the super class. `None` for interfaces and for the hierarchy roots.
    pub super_class_name: Option<String>,
    /// The dotted names of the directly implemented or extended interfaces.
    pub super_interfaces: BTreeSet<String>,
    /// The namespace the names above are written in.
    pub origin: ClassOrigin,
}

impl ClassInformation {
    /// Describes a post-rename class.
    #[must_use]
    pub fn post_rename_class<I>(
        name: impl Into<String>,
        super_class_name: impl Into<String>,
        super_interfaces: I,
    ) -> Self
    where
        I: IntoIterator<Item: Into<String>>,
    {
        Self::class(name, super_class_name, super_interfaces, ClassOrigin::PostRename)
    }

    /// Describes a post-rename interface.
    #[must_use]
    pub fn post_rename_interface<I>(name: impl Into<String>, super_interfaces: I) -> Self
    where
        I: IntoIterator<Item: Into<String>>,
    {
        Self::interface(name, super_interfaces, ClassOrigin::PostRename)
    }

    /// Describes a pre-rename class.
    #[must_use]
    pub fn pre_rename_class<I>(
        name: impl Into<String>,
        super_class_name: impl Into<String>,
        super_interfaces: I,
    ) -> Self
    where
        I: IntoIterator<Item: Into<String>>,
    {
        Self::class(name, super_class_name, super_interfaces, ClassOrigin::PreRename)
    }

    /// Describes a pre-rename interface.
    #[must_use]
    pub fn pre_rename_interface<I>(name: impl Into<String>, super_interfaces: I) -> Self
    where
        I: IntoIterator<Item: Into<String>>,
    {
        Self::interface(name, super_interfaces, ClassOrigin::PreRename)
    }

    fn class<I>(
        name: impl Into<String>,
        super_class_name: impl Into<String>,
        super_interfaces: I,
        origin: ClassOrigin,
    ) -> Self
    where
        I: IntoIterator<Item: Into<String>>,
    {
        Self {
            name: name.into(),
            is_interface: false,
            super_class_name: Some(super_class_name.into()),
            super_interfaces: super_interfaces.into_iter().map(Into::into).collect(),
            origin,
        }
    }

    fn interface<I>(name: impl Into<String>, super_interfaces: I, origin: ClassOrigin) -> Self
    where
        I: IntoIterator<Item: Into<String>>,
    {
        Self {
            name: name.into(),
            is_interface: true,
            super_class_name: None,
            super_interfaces: super_interfaces.into_iter().map(Into::into).collect(),
            origin,
        }
    }

    /// Returns the names of the direct parents of the type.
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.super_class_name
            .iter()
            .chain(&self.super_interfaces)
            .map(String::as_str)
    }
}

/// An error raised when a hierarchy invariant would be violated.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum HierarchyError {
    /// The type is already in the hierarchy.
    #[error("Class {0} is already in the hierarchy")]
    DuplicateClass(String),
    /// Only the hierarchy roots may name the host root class as a direct parent.
    #[error("Class {0} extends or implements java.lang.Object directly")]
    ExtendsHostRoot(String),
    /// A class was declared without a super class.
    #[error("Class {0} has no super class")]
    MissingSuperClass(String),
    /// An interface was declared with a super class.
    #[error("Interface {0} declares a super class")]
    UnexpectedSuperClass(String),
    /// Only post-rename types become hierarchy nodes.
    #[error("Class {0} is not in the post-rename namespace")]
    NotPostRename(String),
    /// The pre-rename description of a user-defined type is not in the pre-rename namespace.
    #[error("Class {0} is not in the pre-rename namespace")]
    NotPreRename(String),
    /// The type is not in the hierarchy.
    #[error("Class {0} is not in the hierarchy")]
    UnknownClass(String),
    /// A parent of the type is not in the hierarchy.
    #[error("Class {class} declares {parent} as a parent, which is not in the hierarchy")]
    UnknownParent {
        /// The type being inserted.
        class: String,
        /// The missing parent.
        parent: String,
    },
}

/// The tightest common ancestors of two types.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Ancestry {
    /// Exactly one common ancestor is more specific than all the others.
    Unique(String),
    /// Several unrelated common ancestors are equally specific, in name order.
    Ambiguous(Vec<String>),
}

impl Ancestry {
    /// Returns the unique ancestor, or `fallback` when the answer is ambiguous.
    #[must_use]
    pub fn unique_or(self, fallback: &str) -> String {
        match self {
            Self::Unique(name) => name,
            Self::Ambiguous(_) => fallback.to_owned(),
        }
    }

    /// Checks if the answer is ambiguous.
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }
}

/// A DAG of post-rename classes and interfaces.
///
/// Nodes live in an index-based arena, so a [`Clone`] (or [`ClassHierarchy::deep_copy`]) is fully
/// independent of the original. The hierarchy is not meant to be mutated concurrently; each
/// rewriting unit takes its own copy instead.
#[derive(Debug, Clone)]
pub struct ClassHierarchy {
    graph: DiGraph<ClassInformation, ()>,
    nodes: HashMap<String, NodeIndex>,
    user_defined: BTreeMap<String, ClassInformation>,
}

impl Default for ClassHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassHierarchy {
    /// Creates a hierarchy containing only the four fixed roots.
    #[must_use]
    pub fn new() -> Self {
        let mut hierarchy = Self {
            graph: DiGraph::new(),
            nodes: HashMap::new(),
            user_defined: BTreeMap::new(),
        };
        let roots = CommonType::ROOTS.map(|common| {
            let (is_interface, super_class, interfaces): (_, _, &[&str]) = match common {
                CommonType::IObject => (true, None, &[]),
                CommonType::ShadowObject => (false, Some(JAVA_LANG_OBJECT), &[I_OBJECT]),
                CommonType::JavaLangThrowable => (false, Some(JAVA_LANG_OBJECT), &[]),
                _ => (false, None, &[]),
            };
            ClassInformation {
                name: common.name().to_owned(),
                is_interface,
                super_class_name: super_class.map(ToOwned::to_owned),
                super_interfaces: interfaces.iter().map(|&it| it.to_owned()).collect(),
                origin: ClassOrigin::PostRename,
            }
        });
        let edges = roots
            .iter()
            .flat_map(|info| info.parents().map(|parent| (info.name.clone(), parent.to_owned())))
            .collect_vec();
        for info in roots {
            hierarchy.add_node(info);
        }
        for (child, parent) in &edges {
            hierarchy.link(child, parent);
        }
        // Interfaces are assignable to the host root like everything else.
        hierarchy.link(I_OBJECT, JAVA_LANG_OBJECT);
        hierarchy
    }

    /// Returns a fully independent copy of this hierarchy.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Returns the number of types in the hierarchy.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks if the hierarchy is empty. It never is: the roots are always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks if the hierarchy contains the given type.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Returns the description of the given type.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassInformation> {
        self.nodes.get(name).map(|&idx| &self.graph[idx])
    }

    /// Checks if the given type is an interface.
    #[must_use]
    pub fn is_interface(&self, name: &str) -> Option<bool> {
        self.get(name).map(|it| it.is_interface)
    }

    /// Returns the names of every type in the hierarchy.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Inserts a new post-rename type.
    /// # Errors
    /// - [`HierarchyError::DuplicateClass`] if the type is already present.
    /// - See [`ClassHierarchy::insert_if_absent`] for the other cases.
    pub fn insert(&mut self, info: ClassInformation) -> Result<(), HierarchyError> {
        if self.contains(&info.name) {
            return Err(HierarchyError::DuplicateClass(info.name));
        }
        self.insert_if_absent(info).map(|_| ())
    }

    /// Inserts a new post-rename type unless a type with the same name is already present.
    /// Returns whether the type was inserted.
    ///
    /// An interface without super-interfaces implicitly extends [`I_OBJECT`].
    /// # Errors
    /// - [`HierarchyError::NotPostRename`] if the type is not in the post-rename namespace.
    /// - [`HierarchyError::ExtendsHostRoot`] if the super class or a super interface is
    ///   [`JAVA_LANG_OBJECT`].
    /// - [`HierarchyError::MissingSuperClass`] if a class has no super class.
    /// - [`HierarchyError::UnexpectedSuperClass`] if an interface has a super class.
    /// - [`HierarchyError::UnknownParent`] if a parent is not in the hierarchy.
    pub fn insert_if_absent(&mut self, info: ClassInformation) -> Result<bool, HierarchyError> {
        if self.contains(&info.name) {
            return Ok(false);
        }
        self.validate(&info)?;
        let implicit_root = (info.is_interface && info.super_interfaces.is_empty())
            .then_some(I_OBJECT);
        let parents = info
            .parents()
            .chain(implicit_root)
            .map(ToOwned::to_owned)
            .collect_vec();
        tracing::debug!(class = %info.name, parents = ?parents, "inserting class");
        let name = info.name.clone();
        self.add_node(info);
        for parent in &parents {
            self.link(&name, parent);
        }
        Ok(true)
    }

    /// Inserts several post-rename types, in any order. A type may be listed before its parents
    /// as long as every parent is eventually present. Types that are already present are
    /// skipped.
    /// # Errors
    /// See [`ClassHierarchy::insert_if_absent`]. Nothing is inserted when an error is returned.
    pub fn insert_all<I>(&mut self, infos: I) -> Result<(), HierarchyError>
    where
        I: IntoIterator<Item = ClassInformation>,
    {
        let mut staged = self.clone();
        let mut pending: Vec<_> = infos.into_iter().collect();
        while !pending.is_empty() {
            let (ready, blocked): (Vec<_>, Vec<_>) = pending
                .into_iter()
                .partition(|info| info.parents().all(|parent| staged.contains(parent)));
            if ready.is_empty() {
                let info = &blocked[0];
                staged.validate(info)?;
                let parent = info
                    .parents()
                    .find(|it| !staged.contains(it))
                    .unwrap_or_default();
                return Err(HierarchyError::UnknownParent {
                    class: info.name.clone(),
                    parent: parent.to_owned(),
                });
            }
            for info in ready {
                staged.insert_if_absent(info)?;
            }
            pending = blocked;
        }
        *self = staged;
        Ok(())
    }

    /// Inserts a user-defined type: its post-rename node becomes part of the hierarchy and its
    /// pre-rename description is recorded alongside.
    /// # Errors
    /// - [`HierarchyError::NotPreRename`] if `pre_rename` is not in the pre-rename namespace.
    /// - See [`ClassHierarchy::insert`] for the other cases.
    pub fn insert_user_defined(
        &mut self,
        pre_rename: ClassInformation,
        post_rename: ClassInformation,
    ) -> Result<(), HierarchyError> {
        if pre_rename.origin != ClassOrigin::PreRename {
            return Err(HierarchyError::NotPreRename(pre_rename.name));
        }
        self.insert(post_rename)?;
        self.user_defined.insert(pre_rename.name.clone(), pre_rename);
        Ok(())
    }

    /// Returns the pre-rename names of every user-defined class and interface.
    #[must_use]
    pub fn pre_rename_user_defined_classes_and_interfaces(&self) -> BTreeSet<&str> {
        self.user_defined.keys().map(String::as_str).collect()
    }

    /// Returns the pre-rename names of every user-defined class, excluding interfaces.
    #[must_use]
    pub fn pre_rename_user_defined_classes_only(&self) -> BTreeSet<&str> {
        self.user_defined
            .values()
            .filter(|it| !it.is_interface)
            .map(|it| it.name.as_str())
            .collect()
    }

    /// Returns the pre-rename description of a user-defined type, by its pre-rename name.
    #[must_use]
    pub fn pre_rename_user_defined(&self, name: &str) -> Option<&ClassInformation> {
        self.user_defined.get(name)
    }

    /// Returns the given type together with all its transitive super classes and
    /// super-interfaces.
    /// # Errors
    /// - [`HierarchyError::UnknownClass`] if the type is not in the hierarchy.
    pub fn ancestors_of(&self, name: &str) -> Result<HashSet<&str>, HierarchyError> {
        let start = self.index_of(name)?;
        Ok(self
            .ancestor_indices(start)
            .into_iter()
            .map(|idx| self.graph[idx].name.as_str())
            .collect())
    }

    /// Returns every type that is assignable to the given type, excluding the type itself.
    /// # Errors
    /// - [`HierarchyError::UnknownClass`] if the type is not in the hierarchy.
    pub fn descendants_of(&self, name: &str) -> Result<HashSet<&str>, HierarchyError> {
        let start = self.index_of(name)?;
        let mut descendants = HashSet::new();
        depth_first_search(Reversed(&self.graph), [start], |event| {
            if let DfsEvent::TreeEdge(_, idx) = event {
                descendants.insert(self.graph[idx].name.as_str());
            }
            Control::<()>::Continue
        });
        Ok(descendants)
    }

    /// Returns the most specific type both given types are assignable to.
    ///
    /// Equal names are returned unchanged. When several unrelated common ancestors are equally
    /// specific, which happens with multiple interface inheritance, there is no single answer
    /// and [`I_OBJECT`] is returned.
    /// # Errors
    /// - [`HierarchyError::UnknownClass`] if either type is not in the hierarchy.
    pub fn tightest_common_ancestor(&self, a: &str, b: &str) -> Result<String, HierarchyError> {
        if a == b {
            return Ok(a.to_owned());
        }
        self.common_ancestry(a, b).map(|it| it.unique_or(I_OBJECT))
    }

    /// Like [`ClassHierarchy::tightest_common_ancestor`], but reports ambiguity instead of
    /// resolving it.
    /// # Errors
    /// - [`HierarchyError::UnknownClass`] if either type is not in the hierarchy.
    pub fn common_ancestry(&self, a: &str, b: &str) -> Result<Ancestry, HierarchyError> {
        if a == b {
            return Ok(Ancestry::Unique(a.to_owned()));
        }
        let lhs = self.ancestor_indices(self.index_of(a)?);
        let rhs = self.ancestor_indices(self.index_of(b)?);
        let common: HashSet<_> = lhs.intersection(&rhs).copied().collect();

        // Every strict ancestor of a common ancestor is itself a common ancestor.
        let mut dominated = HashSet::new();
        let mut dfs = Dfs::empty(&self.graph);
        for &idx in &common {
            for parent in self.graph.neighbors(idx) {
                dfs.move_to(parent);
                while let Some(visited) = dfs.next(&self.graph) {
                    dominated.insert(visited);
                }
            }
        }
        let minimal = common
            .difference(&dominated)
            .map(|&idx| self.graph[idx].name.clone())
            .sorted()
            .collect_vec();
        let ancestry = match <[String; 1]>::try_from(minimal) {
            Ok([unique]) => Ancestry::Unique(unique),
            Err(minimal) if minimal.is_empty() => Ancestry::Unique(JAVA_LANG_OBJECT.to_owned()),
            Err(minimal) => {
                tracing::debug!(a, b, candidates = ?minimal, "ambiguous common ancestor");
                Ancestry::Ambiguous(minimal)
            }
        };
        Ok(ancestry)
    }

    fn validate(&self, info: &ClassInformation) -> Result<(), HierarchyError> {
        if info.origin != ClassOrigin::PostRename {
            return Err(HierarchyError::NotPostRename(info.name.clone()));
        }
        match (&info.super_class_name, info.is_interface) {
            (Some(_), true) => {
                return Err(HierarchyError::UnexpectedSuperClass(info.name.clone()));
            }
            (None, false) => return Err(HierarchyError::MissingSuperClass(info.name.clone())),
            _ => {}
        }
        if info.parents().any(|it| it == JAVA_LANG_OBJECT) {
            return Err(HierarchyError::ExtendsHostRoot(info.name.clone()));
        }
        if let Some(parent) = info.parents().find(|it| !self.contains(it)) {
            return Err(HierarchyError::UnknownParent {
                class: info.name.clone(),
                parent: parent.to_owned(),
            });
        }
        Ok(())
    }

    fn add_node(&mut self, info: ClassInformation) {
        let name = info.name.clone();
        let idx = self.graph.add_node(info);
        self.nodes.insert(name, idx);
    }

    fn link(&mut self, child: &str, parent: &str) {
        if let (Some(&child), Some(&parent)) = (self.nodes.get(child), self.nodes.get(parent)) {
            self.graph.update_edge(child, parent, ());
        }
    }

    fn index_of(&self, name: &str) -> Result<NodeIndex, HierarchyError> {
        self.nodes
            .get(name)
            .copied()
            .ok_or_else(|| HierarchyError::UnknownClass(name.to_owned()))
    }

    fn ancestor_indices(&self, start: NodeIndex) -> HashSet<NodeIndex> {
        let mut ancestors = HashSet::new();
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(idx) = dfs.next(&self.graph) {
            ancestors.insert(idx);
        }
        ancestors
    }
}
