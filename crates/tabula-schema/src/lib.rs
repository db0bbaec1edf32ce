//! # Tabula Schema
//!
//! Static description of the entity classes a list view can be sorted over.
//!
//! Each class maps to exactly one table. Classes may extend another class,
//! in which case the hierarchy is stored with joined-table (class-table)
//! inheritance: the base class table carries the shared identity column and
//! every subclass table repeats that identity column for its own fields.
//!
//! ## Example
//!
//! ```rust
//! use tabula_schema::{ClassDef, Schema, SchemaProvider};
//!
//! let schema = Schema::builder()
//!     .class(ClassDef::new("Team", "Team").field("Name").has_one("Cheerleader", "Cheerleader"))
//!     .class(ClassDef::new("Cheerleader", "Cheerleader").field("Name"))
//!     .class(ClassDef::new("Mom", "Mom").extends("Cheerleader"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.base_table("Mom"), Some("Cheerleader"));
//! assert!(schema.is_subclass_in_hierarchy("Mom"));
//! assert_eq!(schema.ancestry("Mom"), vec!["Cheerleader", "Mom"]);
//! ```

#![warn(missing_docs)]

pub mod class;
pub mod config;
pub mod error;
pub mod provider;
pub mod relation;
pub mod schema;

pub use class::ClassDef;
pub use error::{SchemaError, SchemaResult};
pub use provider::SchemaProvider;
pub use relation::{LinkTable, RelationDef, RelationKind};
pub use schema::{DEFAULT_ID_COLUMN, EntitySchema, Schema, SchemaBuilder};
