//! Sortable list views for Tabula
//!
//! This crate sorts entity lists by columns that live on the entity's own
//! tables or on related entities several relations away, including columns
//! of superclass and subclass tables in joined-table inheritance layouts.
//!
//! # Features
//!
//! - **Allow-list**: only labels registered in a [`SortFieldRegistry`] are sortable
//! - **Relation paths**: dotted paths such as `Cheerleader.Hat.Colour`
//! - **Join planning**: deterministic, deduplicated `LEFT JOIN`s with
//!   collision-free aliases
//! - **Header data**: which columns are sortable and which one is active
//! - **Settings**: sortable columns loaded from TOML
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[SortState] --> B[SortableHeader]
//!     B --> C[SortFieldRegistry]
//!     B --> D[SortApplier]
//!     D --> E[RelationPathResolver]
//!     E --> F[JoinPlanBuilder]
//!     F --> G[DataList]
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use tabula_query::{DataList, MemoryDatabase, SortDirection};
//! use tabula_schema::{ClassDef, Schema};
//! use tabula_tables::{SortState, SortableHeader};
//!
//! let schema = Schema::builder()
//!     .class(ClassDef::new("Team", "Team").field("City"))
//!     .build()
//!     .unwrap();
//! let mut db = MemoryDatabase::new();
//! db.insert_json("Team", json!({ "ID": 1, "City": "Wellington" })).unwrap();
//! db.insert_json("Team", json!({ "ID": 2, "City": "Auckland" })).unwrap();
//! let list = DataList::new(Arc::new(schema), Arc::new(db), "Team").unwrap();
//!
//! let mut header = SortableHeader::new();
//! header.register_sortable("City", "City").unwrap();
//!
//! let sorted = header
//!     .manipulate(&list, &SortState::new("City", SortDirection::Asc))
//!     .unwrap();
//! assert_eq!(
//!     sorted.column("City").unwrap(),
//!     vec![json!("Auckland"), json!("Wellington")]
//! );
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
pub mod header;
pub mod settings;
pub mod sorting;
pub mod state;

// Re-exports for convenience
pub use column::{Column, ListColumn};
pub use error::{SettingsError, SortError, SortResult};
pub use header::{HeaderCell, SortableHeader};
pub use settings::SortingSettings;
pub use sorting::{
	JoinPlan, JoinPlanBuilder, RelationHop, RelationPathResolver, ResolvedPath, SortApplier,
	SortFieldRegistry, ValidatedColumn,
};
pub use state::SortState;
