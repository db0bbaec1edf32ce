//! # Tabula
//!
//! Sortable list views for relational data.
//!
//! A list of entities can be sorted by a column on the entity's own table or
//! on a related entity several relations away, written as a dotted path such
//! as `Cheerleader.Hat.Colour`. Entities stored across several tables with
//! joined-table inheritance are supported on both ends of a path.
//!
//! ## Crates
//!
//! - [`schema`]: entity classes, relations and table layout
//! - [`query`]: select queries, SQL rendering, in-memory execution and lists
//! - [`tables`]: the sorting core and header data (feature `tables`, default)
//!
//! ## Quick Example
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use tabula::prelude::*;
//!
//! let schema = Schema::builder()
//!     .class(
//!         ClassDef::new("Team", "Team")
//!             .field("City")
//!             .has_one("Cheerleader", "Cheerleader"),
//!     )
//!     .class(ClassDef::new("Cheerleader", "Cheerleader").field("Name"))
//!     .build()
//!     .unwrap();
//!
//! let mut db = MemoryDatabase::new();
//! db.insert_json("Team", json!({ "ID": 1, "City": "Auckland", "CheerleaderID": 1 })).unwrap();
//! db.insert_json("Team", json!({ "ID": 2, "City": "Cologne", "CheerleaderID": 2 })).unwrap();
//! db.insert_json("Cheerleader", json!({ "ID": 1, "Name": "Zoe" })).unwrap();
//! db.insert_json("Cheerleader", json!({ "ID": 2, "Name": "Amy" })).unwrap();
//!
//! let teams = DataList::new(Arc::new(schema), Arc::new(db), "Team").unwrap();
//!
//! let mut header = SortableHeader::new();
//! header.register_sortable("Cheerleader", "Cheerleader.Name").unwrap();
//!
//! let state = SortState::from_params(Some("Cheerleader"), Some("asc")).unwrap();
//! let sorted = header.manipulate(&teams, &state).unwrap();
//!
//! assert_eq!(sorted.column("City").unwrap(), vec![json!("Cologne"), json!("Auckland")]);
//! assert!(sorted.sql().contains(r#"AS "cheerleader_Cheerleader""#));
//! ```

/// Entity schema description
pub mod schema {
	pub use tabula_schema::*;
}

/// Select queries and entity lists
pub mod query {
	pub use tabula_query::*;
}

/// Sortable list views
#[cfg(feature = "tables")]
pub mod tables {
	pub use tabula_tables::*;
}

pub use tabula_query::{
	DataList, MemoryDatabase, QueryError, SelectQuery, SharedSchema, SortDirection,
};
pub use tabula_schema::{ClassDef, Schema, SchemaError, SchemaProvider};
#[cfg(feature = "tables")]
pub use tabula_tables::{
	SortError, SortFieldRegistry, SortState, SortableHeader, SortingSettings, ValidatedColumn,
};

/// Commonly used types
pub mod prelude {
	pub use tabula_query::{DataList, JoinClause, MemoryDatabase, SelectQuery, SortDirection};
	pub use tabula_schema::{ClassDef, Schema, SchemaProvider};

	#[cfg(feature = "tables")]
	pub use tabula_tables::{
		Column, HeaderCell, ListColumn, SortApplier, SortError, SortFieldRegistry, SortState,
		SortableHeader, SortingSettings, ValidatedColumn,
	};
}
