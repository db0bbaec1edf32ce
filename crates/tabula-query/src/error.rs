//! Query errors

use thiserror::Error;

/// Errors raised while building or executing a [`SelectQuery`](crate::SelectQuery)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
	/// Sort direction is neither `asc` nor `desc`
	#[error("Invalid SortDirection: {0}")]
	InvalidDirection(String),

	/// Alias is already bound to a different table or join condition
	#[error("Alias {alias} is already bound to a different join")]
	AliasConflict { alias: String },

	/// Alias is referenced before it is joined
	#[error("Unknown table alias: {0}")]
	UnknownAlias(String),

	/// Entity type is not part of the schema
	#[error("Unknown entity type: {0}")]
	UnknownEntity(String),

	/// Table does not exist in the database
	#[error("Unknown table: {0}")]
	UnknownTable(String),

	/// Column is not stored on any table of the entity's hierarchy
	#[error("Unknown field {field} on {entity_type}")]
	UnknownField { field: String, entity_type: String },

	/// Inserted value is not a JSON object
	#[error("Invalid row for table {table}: expected a JSON object")]
	InvalidRow { table: String },
}

/// Result alias for query operations
pub type QueryResult<T> = Result<T, QueryError>;
