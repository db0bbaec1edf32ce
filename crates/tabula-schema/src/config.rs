//! Schema configuration files
//!
//! Schemas can be described in TOML:
//!
//! ```toml
//! id_column = "ID"
//!
//! [[class]]
//! name = "Team"
//! table = "Team"
//! fields = ["Name", "City"]
//!
//! [[class.relation]]
//! name = "Cheerleader"
//! kind = "has_one"
//! target = "Cheerleader"
//!
//! [[class]]
//! name = "Mom"
//! table = "Mom"
//! extends = "Cheerleader"
//! ```
//!
//! Relation keys that are omitted fall back to the same defaults as the
//! [`ClassDef`] builder methods.

use crate::class::ClassDef;
use crate::error::{SchemaError, SchemaResult};
use crate::relation::LinkTable;
use crate::schema::{DEFAULT_ID_COLUMN, Schema};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level layout of a schema file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
	/// Identity column shared by every table of a hierarchy
	pub id_column: String,

	/// Class declarations, in order
	#[serde(rename = "class")]
	pub classes: Vec<ClassConfig>,
}

impl Default for SchemaConfig {
	fn default() -> Self {
		Self {
			id_column: DEFAULT_ID_COLUMN.to_string(),
			classes: Vec::new(),
		}
	}
}

/// One `[[class]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassConfig {
	/// Class name
	pub name: String,
	/// Table storing the class's own fields
	pub table: String,
	/// Superclass name
	#[serde(default)]
	pub extends: Option<String>,
	/// Fields stored in `table`
	#[serde(default)]
	pub fields: Vec<String>,
	/// Relations declared on the class
	#[serde(default, rename = "relation")]
	pub relations: Vec<RelationConfig>,
}

/// Relation cardinality as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKindName {
	/// has_one
	HasOne,
	/// has_many
	HasMany,
	/// many_many
	ManyMany,
}

/// One `[[class.relation]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationConfig {
	/// Relation name
	pub name: String,
	/// Cardinality
	pub kind: RelationKindName,
	/// Target entity type
	pub target: String,
	/// Foreign key column for has_one / has_many
	#[serde(default)]
	pub foreign_key: Option<String>,
	/// Link table for many_many
	#[serde(default)]
	pub link: Option<LinkTable>,
}

impl ClassConfig {
	fn into_class_def(self) -> SchemaResult<ClassDef> {
		let mut class = ClassDef::new(self.name, self.table).fields(self.fields);
		if let Some(parent) = self.extends {
			class = class.extends(parent);
		}
		for rel in self.relations {
			class = match (rel.kind, rel.foreign_key, rel.link) {
				(RelationKindName::HasOne, None, None) => class.has_one(rel.name, rel.target),
				(RelationKindName::HasOne, Some(key), None) => {
					class.has_one_with_key(rel.name, rel.target, key)
				}
				(RelationKindName::HasMany, None, None) => class.has_many(rel.name, rel.target),
				(RelationKindName::HasMany, Some(key), None) => {
					class.has_many_with_key(rel.name, rel.target, key)
				}
				(RelationKindName::ManyMany, None, None) => class.many_many(rel.name, rel.target),
				(RelationKindName::ManyMany, None, Some(link)) => {
					class.many_many_through(rel.name, rel.target, link)
				}
				(kind, _, _) => {
					return Err(SchemaError::InvalidClass(format!(
						"relation {} on {} has keys that do not fit {:?}",
						rel.name,
						class.name(),
						kind
					)));
				}
			};
		}
		Ok(class)
	}
}

impl SchemaConfig {
	/// Build and validate the described schema
	pub fn into_schema(self) -> SchemaResult<Schema> {
		let mut builder = Schema::builder().id_column(self.id_column);
		for class in self.classes {
			builder = builder.class(class.into_class_def()?);
		}
		builder.build()
	}
}

impl Schema {
	/// Load a schema from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if the file cannot be read, parsed or validated.
	pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
		let content = std::fs::read_to_string(path.as_ref()).map_err(|e| SchemaError::Io {
			path: path.as_ref().to_path_buf(),
			source: e,
		})?;

		Self::from_toml(&content)
	}

	/// Parse a schema from a TOML string.
	pub fn from_toml(content: &str) -> SchemaResult<Self> {
		let config: SchemaConfig = toml::from_str(content).map_err(|e| SchemaError::Parse {
			message: e.to_string(),
		})?;
		config.into_schema()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::provider::SchemaProvider;
	use crate::relation::RelationKind;
	use rstest::rstest;

	const SCHEMA: &str = r#"
		[[class]]
		name = "Team"
		table = "Team"
		fields = ["Name", "City"]

		[[class.relation]]
		name = "Cheerleader"
		kind = "has_one"
		target = "Cheerleader"

		[[class.relation]]
		name = "Sponsors"
		kind = "many_many"
		target = "Sponsor"
		link = { table = "TeamSponsors", source_column = "TeamID", target_column = "SponsorID" }

		[[class]]
		name = "Cheerleader"
		table = "Cheerleader"
		fields = ["Name"]

		[[class]]
		name = "Mom"
		table = "Mom"
		extends = "Cheerleader"
	"#;

	#[rstest]
	fn test_schema_from_toml() {
		let schema = Schema::from_toml(SCHEMA).unwrap();

		assert_eq!(schema.id_column(), "ID");
		assert_eq!(schema.base_table("Mom"), Some("Cheerleader"));
		let cheerleader = schema.relation("Team", "Cheerleader").unwrap();
		assert_eq!(
			cheerleader.kind(),
			&RelationKind::HasOne {
				foreign_key: "CheerleaderID".to_string()
			}
		);
		let sponsors = schema.relation("Team", "Sponsors").unwrap();
		assert_eq!(
			sponsors.kind(),
			&RelationKind::ManyMany {
				link: LinkTable::new("TeamSponsors", "TeamID", "SponsorID")
			}
		);
	}

	#[rstest]
	fn test_schema_from_toml_rejects_mismatched_keys() {
		let result = Schema::from_toml(
			r#"
			[[class]]
			name = "Team"
			table = "Team"

			[[class.relation]]
			name = "Players"
			kind = "has_many"
			target = "Player"
			link = { table = "x", source_column = "a", target_column = "b" }
			"#,
		);
		assert!(matches!(result, Err(SchemaError::InvalidClass(_))));
	}

	#[rstest]
	fn test_schema_from_toml_parse_error() {
		let result = Schema::from_toml("[[class]]\nname = 3");
		assert!(matches!(result, Err(SchemaError::Parse { .. })));
	}
}
