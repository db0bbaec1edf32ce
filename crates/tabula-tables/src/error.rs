//! Sorting errors

use std::path::PathBuf;
use tabula_query::QueryError;
use thiserror::Error;

/// Errors raised while validating and applying a sort
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
	/// Requested column is not a registered sort label or path
	#[error("Invalid SortColumn: {0}")]
	InvalidSortColumn(String),

	/// A path segment does not name a relation of the current entity type
	#[error("Unknown relation {relation} on {entity_type}")]
	UnknownRelation {
		relation: String,
		entity_type: String,
	},

	/// Path is empty or contains an empty segment
	#[error("Empty relation path segment in {0:?}")]
	EmptyPath(String),

	/// Sort label is empty or whitespace, carries the path it was given for
	#[error("Blank sort label for path {0:?}")]
	EmptyLabel(String),

	/// Schema and relation definitions disagree
	#[error("Schema inconsistency: {0}")]
	SchemaInconsistency(String),

	/// Path traverses the same relation of the same entity type twice
	#[error("Cyclic relation path: {relation} on {entity_type} is visited twice")]
	CyclicPath {
		relation: String,
		entity_type: String,
	},

	/// Path has more relation hops than allowed
	#[error("Relation path {path} has {hops} hops, the maximum is {max}")]
	PathTooDeep {
		path: String,
		hops: usize,
		max: usize,
	},

	/// Trailing column is not stored on the final entity type
	#[error("Unknown field {field} on {entity_type}")]
	UnknownField { field: String, entity_type: String },

	/// Query builder rejected the plan or the direction
	#[error(transparent)]
	Query(#[from] QueryError),
}

impl SortError {
	/// Whether the error stems from request input rather than configuration
	///
	/// Recoverable errors can be reported back to the client; every other
	/// kind means the sort registry and the schema disagree.
	pub fn is_recoverable(&self) -> bool {
		matches!(
			self,
			Self::InvalidSortColumn(_) | Self::Query(QueryError::InvalidDirection(_))
		)
	}
}

/// Result alias for sorting operations
pub type SortResult<T> = Result<T, SortError>;

/// Errors raised while loading [`SortingSettings`](crate::SortingSettings)
#[derive(Debug, Error)]
pub enum SettingsError {
	/// Settings file could not be read
	#[error("Failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Settings are not valid TOML or have the wrong shape
	#[error("Failed to parse sorting settings: {message}")]
	Parse { message: String },

	/// A configured sort path is malformed
	#[error(transparent)]
	Sort(#[from] SortError),
}
