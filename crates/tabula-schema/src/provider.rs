//! Schema lookups consumed by relation path resolution

use crate::relation::RelationDef;
use indexmap::IndexMap;

/// Read-only view over entity metadata
///
/// Implementations are configured once and then only read, so a single
/// provider can serve concurrent sort resolutions.
pub trait SchemaProvider {
	/// Identity column shared by every table of a hierarchy
	fn id_column(&self) -> &str;

	/// Whether the entity type is known
	fn contains(&self, entity_type: &str) -> bool;

	/// Table holding the identity column of the entity's hierarchy
	fn base_table(&self, entity_type: &str) -> Option<&str>;

	/// Table owning `class_name`'s fields, where `class_name` is the entity
	/// type itself or one of its superclasses
	fn owning_table(&self, entity_type: &str, class_name: &str) -> Option<&str>;

	/// All relations visible on the entity type, inherited ones included
	fn relations(&self, entity_type: &str) -> IndexMap<&str, &RelationDef>;

	/// A single visible relation by name
	fn relation(&self, entity_type: &str, relation_name: &str) -> Option<&RelationDef> {
		self.relations(entity_type).get(relation_name).copied()
	}

	/// Whether the entity type extends another class
	fn is_subclass_in_hierarchy(&self, entity_type: &str) -> bool;

	/// Root class of the entity's hierarchy
	fn hierarchy_base_type(&self, entity_type: &str) -> Option<&str>;

	/// Class names from the hierarchy base down to the entity type itself
	///
	/// Returns an empty list for unknown entity types.
	fn ancestry(&self, entity_type: &str) -> Vec<&str>;

	/// Class whose table stores `column` for the entity type
	fn class_for_field(&self, entity_type: &str, column: &str) -> Option<&str>;
}
