//! Sorting by dotted relation paths
//!
//! A sort request flows through four steps:
//!
//! 1. [`SortFieldRegistry`] maps the requested label to a dotted path
//! 2. [`RelationPathResolver`] turns the path into typed relation hops
//! 3. [`JoinPlanBuilder`] turns the hops into aliased `LEFT JOIN`s
//! 4. [`SortApplier`] adds the joins and the `ORDER BY` to a copy of the list

pub mod apply;
pub mod path;
pub mod plan;
pub mod registry;

pub use apply::{SortApplier, ValidatedColumn};
pub use path::{DEFAULT_MAX_PATH_HOPS, RelationHop, RelationPathResolver, ResolvedPath, split_path};
pub use plan::{JoinPlan, JoinPlanBuilder};
pub use registry::SortFieldRegistry;
