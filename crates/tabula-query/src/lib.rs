//! # Tabula Query
//!
//! The query side of a list view:
//!
//! - [`SelectQuery`]: `FROM` table, ordered `LEFT JOIN` clauses and `ORDER BY`
//!   clauses, rendered to SQL through sea-query
//! - [`MemoryDatabase`]: in-process tables that can execute a [`SelectQuery`]
//! - [`DataList`]: an entity list bound to a schema and a database; sorting
//!   produces a new list and never touches the original
//!
//! ## Example
//!
//! ```rust
//! use tabula_query::{JoinClause, SelectQuery, SortDirection};
//!
//! let mut query = SelectQuery::new("Team");
//! query
//!     .add_left_join(JoinClause::new(
//!         "Cheerleader",
//!         "cheerleader_Cheerleader",
//!         "ID",
//!         "Team",
//!         "CheerleaderID",
//!     ))
//!     .unwrap();
//! query.add_order_by("cheerleader_Cheerleader", "Name", SortDirection::Asc);
//!
//! assert!(query.to_sql().contains(r#"ORDER BY "cheerleader_Cheerleader"."Name" ASC"#));
//! ```

#![warn(missing_docs)]

pub mod direction;
pub mod error;
pub mod list;
pub mod select;
pub mod store;

pub use direction::SortDirection;
pub use error::{QueryError, QueryResult};
pub use list::{DataList, SharedSchema};
pub use select::{JoinClause, OrderClause, SelectQuery, SqlDialect};
pub use store::{MemoryDatabase, ResultRow, Row};
