//! Reusable view components.

pub mod navbar;

pub use navbar::Navbar;
