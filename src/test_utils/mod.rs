//! Test utilities for the feewise codebase
//!
//! Mock fee sources, factories and assertion helpers shared by unit and
//! integration tests.

pub mod assertions;
pub mod factories;
pub mod mocks;

pub use assertions::*;
pub use factories::*;
pub use mocks::*;
