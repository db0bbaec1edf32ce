//! Relation definitions between entity classes
//!
//! A relation is declared on one class and points at a target entity type.
//! Its kind decides which side of the join carries the foreign key:
//!
//! - `has_one`: the declaring class table stores `<Relation>ID`
//! - `has_many`: the target base table stores a key pointing back at the source
//! - `many_many`: a link table stores both keys

use serde::{Deserialize, Serialize};

/// Link table used by a many_many relation
///
/// Corresponds to the intermediate table of a Django `ManyToManyField`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkTable {
	/// Name of the link table
	pub table: String,
	/// Column in the link table referencing the source identity
	pub source_column: String,
	/// Column in the link table referencing the target identity
	pub target_column: String,
}

impl LinkTable {
	/// Create a new link table definition
	pub fn new(
		table: impl Into<String>,
		source_column: impl Into<String>,
		target_column: impl Into<String>,
	) -> Self {
		Self {
			table: table.into(),
			source_column: source_column.into(),
			target_column: target_column.into(),
		}
	}
}

/// Cardinality of a relation together with the keys needed to join it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationKind {
	/// Foreign key lives on the declaring class table
	HasOne { foreign_key: String },
	/// Foreign key lives on the target's base table
	HasMany { foreign_key: String },
	/// Keys live on a link table
	ManyMany { link: LinkTable },
}

impl RelationKind {
	/// Short name of the cardinality (`has_one`, `has_many`, `many_many`)
	pub fn as_str(&self) -> &'static str {
		match self {
			RelationKind::HasOne { .. } => "has_one",
			RelationKind::HasMany { .. } => "has_many",
			RelationKind::ManyMany { .. } => "many_many",
		}
	}

	/// Whether following this relation can multiply rows
	pub fn is_to_many(&self) -> bool {
		!matches!(self, RelationKind::HasOne { .. })
	}
}

/// A named relation declared on an entity class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationDef {
	name: String,
	target_type: String,
	kind: RelationKind,
	declared_on: String,
}

impl RelationDef {
	/// Create a relation declared on `declared_on`
	///
	/// # Examples
	///
	/// ```
	/// use tabula_schema::{RelationDef, RelationKind};
	///
	/// let rel = RelationDef::new(
	///     "Team",
	///     "Cheerleader",
	///     "Cheerleader",
	///     RelationKind::HasOne { foreign_key: "CheerleaderID".to_string() },
	/// );
	/// assert_eq!(rel.name(), "Cheerleader");
	/// assert_eq!(rel.declared_on(), "Team");
	/// assert_eq!(rel.kind().as_str(), "has_one");
	/// ```
	pub fn new(
		declared_on: impl Into<String>,
		name: impl Into<String>,
		target_type: impl Into<String>,
		kind: RelationKind,
	) -> Self {
		Self {
			name: name.into(),
			target_type: target_type.into(),
			kind,
			declared_on: declared_on.into(),
		}
	}

	/// Relation name as used in dotted paths
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Entity type the relation points at
	pub fn target_type(&self) -> &str {
		&self.target_type
	}

	/// Cardinality and join keys
	pub fn kind(&self) -> &RelationKind {
		&self.kind
	}

	/// Class that declares the relation
	///
	/// For inherited relations this is the superclass, which is also the
	/// class whose table holds a `has_one` foreign key.
	pub fn declared_on(&self) -> &str {
		&self.declared_on
	}
}
