//! In-process schema registry

use crate::class::ClassDef;
use crate::error::{SchemaError, SchemaResult};
use crate::provider::SchemaProvider;
use crate::relation::RelationDef;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Identity column name used when none is configured
pub const DEFAULT_ID_COLUMN: &str = "ID";

/// Flattened view of one entity type and its hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
	/// Entity type described by this view
	pub type_name: String,
	/// Table holding the identity column shared by the hierarchy
	pub base_table: String,
	/// Table of every class from the base down to `type_name`, base first
	pub owning_table_per_class: IndexMap<String, String>,
	/// Relations visible on `type_name`, inherited ones included
	pub relations: IndexMap<String, RelationDef>,
}

/// Validated set of entity classes
#[derive(Debug, Clone)]
pub struct Schema {
	classes: IndexMap<String, ClassDef>,
	id_column: String,
}

impl Schema {
	/// Start building a schema
	pub fn builder() -> SchemaBuilder {
		SchemaBuilder::default()
	}

	/// Look up a class definition
	pub fn class(&self, name: &str) -> Option<&ClassDef> {
		self.classes.get(name)
	}

	/// All classes in declaration order
	pub fn classes(&self) -> impl Iterator<Item = &ClassDef> {
		self.classes.values()
	}

	/// Describe `entity_type` and its hierarchy
	pub fn entity_schema(&self, entity_type: &str) -> Option<EntitySchema> {
		let chain = self.chain(entity_type)?;
		let base_table = chain.first()?.table().to_string();
		let owning_table_per_class = chain
			.iter()
			.map(|class| (class.name().to_string(), class.table().to_string()))
			.collect();
		let relations = self
			.relations(entity_type)
			.into_iter()
			.map(|(name, rel)| (name.to_string(), rel.clone()))
			.collect();

		Some(EntitySchema {
			type_name: entity_type.to_string(),
			base_table,
			owning_table_per_class,
			relations,
		})
	}

	/// Class definitions from the hierarchy base down to `entity_type`
	fn chain(&self, entity_type: &str) -> Option<Vec<&ClassDef>> {
		let mut chain = Vec::new();
		let mut current = self.classes.get(entity_type)?;
		loop {
			chain.push(current);
			match current.parent() {
				// Acyclic and closed over parents after `build`
				Some(parent) => current = self.classes.get(parent)?,
				None => break,
			}
		}
		chain.reverse();
		Some(chain)
	}
}

impl SchemaProvider for Schema {
	fn id_column(&self) -> &str {
		&self.id_column
	}

	fn contains(&self, entity_type: &str) -> bool {
		self.classes.contains_key(entity_type)
	}

	fn base_table(&self, entity_type: &str) -> Option<&str> {
		self.chain(entity_type)?
			.into_iter()
			.next()
			.map(|class| class.table())
	}

	fn owning_table(&self, entity_type: &str, class_name: &str) -> Option<&str> {
		self.chain(entity_type)?
			.into_iter()
			.find(|class| class.name() == class_name)
			.map(|class| class.table())
	}

	fn relations(&self, entity_type: &str) -> IndexMap<&str, &RelationDef> {
		let mut relations = IndexMap::new();
		for class in self.chain(entity_type).unwrap_or_default() {
			for (name, rel) in class.relations() {
				relations.insert(name.as_str(), rel);
			}
		}
		relations
	}

	fn is_subclass_in_hierarchy(&self, entity_type: &str) -> bool {
		self.classes
			.get(entity_type)
			.is_some_and(|class| class.parent().is_some())
	}

	fn hierarchy_base_type(&self, entity_type: &str) -> Option<&str> {
		self.chain(entity_type)?
			.into_iter()
			.next()
			.map(|class| class.name())
	}

	fn ancestry(&self, entity_type: &str) -> Vec<&str> {
		self.chain(entity_type)
			.unwrap_or_default()
			.into_iter()
			.map(|class| class.name())
			.collect()
	}

	fn class_for_field(&self, entity_type: &str, column: &str) -> Option<&str> {
		let chain = self.chain(entity_type)?;
		if column == self.id_column {
			return chain.into_iter().next().map(|class| class.name());
		}
		chain
			.into_iter()
			.rev()
			.find(|class| class.declares_column(column))
			.map(|class| class.name())
	}
}

/// Builder for [`Schema`]
#[derive(Debug)]
pub struct SchemaBuilder {
	classes: Vec<ClassDef>,
	id_column: String,
}

impl Default for SchemaBuilder {
	fn default() -> Self {
		Self {
			classes: Vec::new(),
			id_column: DEFAULT_ID_COLUMN.to_string(),
		}
	}
}

impl SchemaBuilder {
	/// Add a class definition
	pub fn class(mut self, class: ClassDef) -> Self {
		self.classes.push(class);
		self
	}

	/// Override the identity column name
	pub fn id_column(mut self, column: impl Into<String>) -> Self {
		self.id_column = column.into();
		self
	}

	/// Validate the classes and produce a schema
	///
	/// # Errors
	///
	/// Fails on duplicate class names or tables, empty names, parents that
	/// are not declared, and inheritance cycles. Relation targets are not
	/// checked here.
	pub fn build(self) -> SchemaResult<Schema> {
		let mut classes: IndexMap<String, ClassDef> = IndexMap::new();
		let mut tables: HashMap<String, String> = HashMap::new();

		for class in self.classes {
			if class.name().is_empty() || class.table().is_empty() {
				return Err(SchemaError::InvalidClass(format!(
					"class {:?} must have a name and a table",
					class.name()
				)));
			}
			if let Some(empty) = class.relations().keys().find(|name| name.is_empty()) {
				return Err(SchemaError::InvalidClass(format!(
					"class {} declares a relation with an empty name {:?}",
					class.name(),
					empty
				)));
			}
			if classes.contains_key(class.name()) {
				return Err(SchemaError::DuplicateClass(class.name().to_string()));
			}
			if let Some(first) = tables.get(class.table()) {
				return Err(SchemaError::DuplicateTable {
					table: class.table().to_string(),
					first: first.clone(),
					second: class.name().to_string(),
				});
			}
			tables.insert(class.table().to_string(), class.name().to_string());
			classes.insert(class.name().to_string(), class);
		}

		for class in classes.values() {
			if let Some(parent) = class.parent()
				&& !classes.contains_key(parent)
			{
				return Err(SchemaError::UnknownParent {
					class: class.name().to_string(),
					parent: parent.to_string(),
				});
			}
		}

		for class in classes.values() {
			let mut steps = 0;
			let mut current = class;
			while let Some(parent) = current.parent() {
				steps += 1;
				if parent == class.name() || steps > classes.len() {
					return Err(SchemaError::InheritanceCycle(class.name().to_string()));
				}
				current = &classes[parent];
			}
		}

		tracing::debug!(classes = classes.len(), "schema built");

		Ok(Schema {
			classes,
			id_column: self.id_column,
		})
	}
}
