#![warn(
    clippy::pedantic,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]
#![doc = include_str!("../README.md")]

/// Module containing the common super class resolvers.
pub mod analysis;
/// Module containing the class hierarchy of the sandbox namespace.
pub mod hierarchy;
pub mod library;
/// Module containing the renaming between the host and sandbox namespaces.
pub mod renaming;
/// Module containing the type vocabulary shared by every other module.
pub mod types;

#[cfg(test)]
pub(crate) mod tests;
