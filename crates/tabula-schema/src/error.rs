//! Schema construction errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or loading a [`Schema`](crate::Schema)
#[derive(Debug, Error)]
pub enum SchemaError {
	/// Two classes share the same name
	#[error("Duplicate class: {0}")]
	DuplicateClass(String),

	/// Two classes map to the same table
	#[error("Table {table} is mapped by both {first} and {second}")]
	DuplicateTable {
		table: String,
		first: String,
		second: String,
	},

	/// A class extends a class that is not part of the schema
	#[error("Class {class} extends unknown class {parent}")]
	UnknownParent { class: String, parent: String },

	/// Following parents from a class leads back to the class itself
	#[error("Inheritance cycle detected at class {0}")]
	InheritanceCycle(String),

	/// A class declares an empty name, table or relation name
	#[error("Invalid class definition: {0}")]
	InvalidClass(String),

	/// Schema file could not be read
	#[error("Failed to read schema file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Schema file could not be parsed
	#[error("Failed to parse schema: {message}")]
	Parse { message: String },
}

/// Result alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
