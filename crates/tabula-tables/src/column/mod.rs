//! Column definitions for list views

pub mod base;

pub use base::{Column, ListColumn};
