//! Game implementations.

pub mod darts;
