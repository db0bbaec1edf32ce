//! Dotted relation path resolution

use crate::error::{SortError, SortResult};
use std::collections::HashSet;
use tabula_schema::{RelationDef, SchemaProvider};

/// Hop limit used when none is configured
pub const DEFAULT_MAX_PATH_HOPS: usize = 8;

/// Split a dotted path into its segments
///
/// # Errors
///
/// [`SortError::EmptyPath`] when the path is empty or any segment is.
pub fn split_path(path: &str) -> SortResult<Vec<&str>> {
	let segments: Vec<&str> = path.split('.').collect();
	if segments.iter().any(|segment| segment.is_empty()) {
		return Err(SortError::EmptyPath(path.to_string()));
	}
	Ok(segments)
}

/// One relation traversal step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationHop {
	/// Relation name as written in the path
	pub relation_name: String,
	/// Entity type the relation is looked up on
	pub source_type: String,
	/// Entity type the relation leads to
	pub target_type: String,
	/// Relation definition, including the class that declares it
	pub relation: RelationDef,
}

/// A dotted path parsed against a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
	/// Entity type the path starts from
	pub root_type: String,
	/// Relation hops in path order
	pub hops: Vec<RelationHop>,
	/// Column on the final entity type
	pub column: String,
}

impl ResolvedPath {
	/// Entity type owning the trailing column
	pub fn target_type(&self) -> &str {
		self.hops
			.last()
			.map_or(self.root_type.as_str(), |hop| hop.target_type.as_str())
	}

	/// Whether the column lives on the root entity itself
	pub fn is_direct(&self) -> bool {
		self.hops.is_empty()
	}
}

/// Resolves dotted paths such as `Cheerleader.Hat.Colour` into typed hops
#[derive(Debug)]
pub struct RelationPathResolver<'a, S: SchemaProvider + ?Sized> {
	schema: &'a S,
	max_hops: usize,
}

impl<'a, S: SchemaProvider + ?Sized> RelationPathResolver<'a, S> {
	/// Resolver with the default hop limit
	pub fn new(schema: &'a S) -> Self {
		Self {
			schema,
			max_hops: DEFAULT_MAX_PATH_HOPS,
		}
	}

	/// Override the hop limit
	pub fn with_max_hops(mut self, max_hops: usize) -> Self {
		self.max_hops = max_hops;
		self
	}

	/// Resolve `path` starting at `root_type`
	///
	/// Every segment except the last names a relation of the current entity
	/// type, inherited relations included. The last segment must be a column
	/// stored on some table of the final entity type's hierarchy.
	///
	/// # Errors
	///
	/// - [`SortError::EmptyPath`] for empty paths or segments
	/// - [`SortError::PathTooDeep`] when the path has more hops than allowed
	/// - [`SortError::UnknownRelation`] when a segment is not a relation
	/// - [`SortError::CyclicPath`] when a relation of an entity type is
	///   traversed twice
	/// - [`SortError::SchemaInconsistency`] when the root or a relation
	///   target has no table
	/// - [`SortError::UnknownField`] when the trailing column is not stored
	///   anywhere in the final hierarchy
	pub fn resolve(&self, root_type: &str, path: &str) -> SortResult<ResolvedPath> {
		let mut segments = split_path(path)?;
		let column = segments.pop().unwrap_or_default().to_string();

		if segments.len() > self.max_hops {
			return Err(SortError::PathTooDeep {
				path: path.to_string(),
				hops: segments.len(),
				max: self.max_hops,
			});
		}
		if self.schema.base_table(root_type).is_none() {
			return Err(SortError::SchemaInconsistency(format!(
				"entity type {} has no table",
				root_type
			)));
		}

		let mut visited: HashSet<(&str, &str)> = HashSet::new();
		let mut hops = Vec::with_capacity(segments.len());
		let mut current = root_type.to_string();

		for segment in segments {
			let relation = self.schema.relation(&current, segment).ok_or_else(|| {
				SortError::UnknownRelation {
					relation: segment.to_string(),
					entity_type: current.clone(),
				}
			})?;

			// Keyed by the declaring class so inherited relations collide too
			if !visited.insert((relation.declared_on(), relation.name())) {
				return Err(SortError::CyclicPath {
					relation: segment.to_string(),
					entity_type: current,
				});
			}

			let target = relation.target_type();
			if self.schema.base_table(target).is_none() {
				return Err(SortError::SchemaInconsistency(format!(
					"relation {} on {} targets {}, which has no table",
					segment, current, target
				)));
			}

			hops.push(RelationHop {
				relation_name: segment.to_string(),
				source_type: current,
				target_type: target.to_string(),
				relation: relation.clone(),
			});
			current = target.to_string();
		}

		if self.schema.class_for_field(&current, &column).is_none() {
			return Err(SortError::UnknownField {
				field: column,
				entity_type: current,
			});
		}

		tracing::debug!(
			root = root_type,
			path,
			hops = hops.len(),
			target = %current,
			"resolved relation path"
		);

		Ok(ResolvedPath {
			root_type: root_type.to_string(),
			hops,
			column,
		})
	}
}
