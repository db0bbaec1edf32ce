//! Validating and applying sort requests

use crate::error::{SortError, SortResult};
use crate::sorting::path::{DEFAULT_MAX_PATH_HOPS, RelationPathResolver};
use crate::sorting::plan::{JoinPlan, JoinPlanBuilder};
use crate::sorting::registry::SortFieldRegistry;
use tabula_query::{DataList, SortDirection};

/// A sort column that passed registry validation
///
/// Only [`SortApplier::validate`] creates values of this type, so a sort
/// can never be applied to a column that was not checked first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedColumn {
	requested: String,
	path: String,
}

impl ValidatedColumn {
	/// Label or path the caller asked for
	pub fn requested(&self) -> &str {
		&self.requested
	}

	/// Dotted path the request resolved to
	pub fn path(&self) -> &str {
		&self.path
	}
}

/// Applies registered sorts to entity lists
#[derive(Debug, Clone, Copy)]
pub struct SortApplier<'a> {
	registry: &'a SortFieldRegistry,
	max_hops: usize,
}

impl<'a> SortApplier<'a> {
	/// Applier restricted to the columns of `registry`
	pub fn new(registry: &'a SortFieldRegistry) -> Self {
		Self {
			registry,
			max_hops: DEFAULT_MAX_PATH_HOPS,
		}
	}

	/// Override the hop limit for resolved paths
	pub fn with_max_hops(mut self, max_hops: usize) -> Self {
		self.max_hops = max_hops;
		self
	}

	/// Check `sort_column` against the registry
	///
	/// # Errors
	///
	/// [`SortError::InvalidSortColumn`] carrying `sort_column` verbatim when
	/// it is neither a registered label nor a registered path.
	pub fn validate(&self, sort_column: &str) -> SortResult<ValidatedColumn> {
		match self.registry.resolve_path(sort_column) {
			Some(path) => Ok(ValidatedColumn {
				requested: sort_column.to_string(),
				path: path.to_string(),
			}),
			None => {
				tracing::warn!(sort_column, "rejected sort column");
				Err(SortError::InvalidSortColumn(sort_column.to_string()))
			}
		}
	}

	/// Plan the joins for a validated column on `list`
	pub fn plan(&self, list: &DataList, column: &ValidatedColumn) -> SortResult<JoinPlan> {
		let resolved = RelationPathResolver::new(list.schema())
			.with_max_hops(self.max_hops)
			.resolve(list.entity_type(), column.path())?;
		JoinPlanBuilder::new(list.schema()).build(&resolved)
	}

	/// Sort `list` by a validated column
	///
	/// Returns a new list whose query carries the planned `LEFT JOIN`s and
	/// orders by the column alone, replacing any earlier ordering. Joins
	/// already on the list are reused. The input list is left as it was,
	/// also when an error is returned.
	///
	/// # Errors
	///
	/// [`SortError::InvalidSortColumn`] when `column` no longer resolves to
	/// the same path through this applier's registry, for instance because
	/// it was validated against another registry.
	pub fn apply(
		&self,
		list: &DataList,
		column: &ValidatedColumn,
		direction: SortDirection,
	) -> SortResult<DataList> {
		if self.registry.resolve_path(column.requested()) != Some(column.path()) {
			tracing::warn!(
				sort_column = column.requested(),
				path = column.path(),
				"sort column not registered with this applier"
			);
			return Err(SortError::InvalidSortColumn(column.requested().to_string()));
		}

		let plan = self.plan(list, column)?;

		let mut query = list.query().clone();
		for join in plan.joins() {
			query.add_left_join(join.clone())?;
		}
		query.set_order_by(plan.alias(), plan.column(), direction);

		tracing::debug!(
			entity_type = list.entity_type(),
			sort = column.path(),
			%direction,
			"applied sort"
		);

		Ok(list.with_query(query))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::sync::Arc;
	use tabula_query::MemoryDatabase;
	use tabula_schema::{ClassDef, Schema};

	#[fixture]
	fn list() -> DataList {
		let schema = Schema::builder()
			.class(
				ClassDef::new("Team", "Team")
					.fields(["Name", "City"])
					.has_one("Cheerleader", "Cheerleader"),
			)
			.class(ClassDef::new("Cheerleader", "Cheerleader").field("Name"))
			.build()
			.unwrap();

		let mut db = MemoryDatabase::new();
		for (id, city, cheerleader) in [(1, "Cologne", 2), (2, "Auckland", 1)] {
			db.insert_json(
				"Team",
				json!({ "ID": id, "City": city, "CheerleaderID": cheerleader }),
			)
			.unwrap();
		}
		db.insert_json("Cheerleader", json!({ "ID": 1, "Name": "Zoe" }))
			.unwrap();
		db.insert_json("Cheerleader", json!({ "ID": 2, "Name": "Amy" }))
			.unwrap();

		DataList::new(Arc::new(schema), Arc::new(db), "Team").unwrap()
	}

	#[fixture]
	fn registry() -> SortFieldRegistry {
		let mut registry = SortFieldRegistry::new();
		registry.register("City", "City").unwrap();
		registry.register("Cheerleader", "Cheerleader.Name").unwrap();
		registry.register("Hat", "Cheerleader.Hat.Colour").unwrap();
		registry
	}

	#[rstest]
	fn test_validate_rejects_unregistered(registry: SortFieldRegistry) {
		let err = SortApplier::new(&registry).validate("INVALID").unwrap_err();

		assert_eq!(err.to_string(), "Invalid SortColumn: INVALID");
		assert!(err.is_recoverable());
	}

	#[rstest]
	fn test_validate_accepts_label_and_path(registry: SortFieldRegistry) {
		let applier = SortApplier::new(&registry);

		let by_label = applier.validate("Cheerleader").unwrap();
		let by_path = applier.validate("Cheerleader.Name").unwrap();

		assert_eq!(by_label.path(), "Cheerleader.Name");
		assert_eq!(by_label.requested(), "Cheerleader");
		assert_eq!(by_path.path(), by_label.path());
	}

	#[rstest]
	fn test_apply_sorts_through_relation(list: DataList, registry: SortFieldRegistry) {
		let applier = SortApplier::new(&registry);
		let column = applier.validate("Cheerleader").unwrap();

		let sorted = applier.apply(&list, &column, SortDirection::Asc).unwrap();

		assert_eq!(
			sorted.column("City").unwrap(),
			vec![json!("Cologne"), json!("Auckland")]
		);
		assert_eq!(sorted.query().joins().len(), 1);
		assert!(list.query().joins().is_empty());
		assert!(list.query().order_by().is_empty());
	}

	#[rstest]
	fn test_apply_configuration_error_leaves_list_untouched(
		list: DataList,
		registry: SortFieldRegistry,
	) {
		let applier = SortApplier::new(&registry);
		let column = applier.validate("Hat").unwrap();

		let err = applier
			.apply(&list, &column, SortDirection::Desc)
			.unwrap_err();

		assert_eq!(
			err,
			SortError::UnknownRelation {
				relation: "Hat".to_string(),
				entity_type: "Cheerleader".to_string(),
			}
		);
		assert!(!err.is_recoverable());
		assert!(list.query().order_by().is_empty());
	}

	#[rstest]
	fn test_apply_replaces_previous_order(list: DataList, registry: SortFieldRegistry) {
		let applier = SortApplier::new(&registry);
		let city = applier.validate("City").unwrap();
		let ascending = applier.apply(&list, &city, SortDirection::Asc).unwrap();

		let descending = applier
			.apply(&ascending, &city, SortDirection::Desc)
			.unwrap();

		assert_eq!(
			descending.column("City").unwrap(),
			vec![json!("Cologne"), json!("Auckland")]
		);
		assert_eq!(descending.query().order_by().len(), 1);
		assert_eq!(ascending.query().order_by()[0].direction, SortDirection::Asc);
	}

	#[rstest]
	fn test_apply_rejects_column_from_other_registry(list: DataList, registry: SortFieldRegistry) {
		let column = SortApplier::new(&registry).validate("City").unwrap();
		let mut other = SortFieldRegistry::new();
		other.register("City", "Cheerleader.Name").unwrap();

		for strict in [SortFieldRegistry::new(), other] {
			let err = SortApplier::new(&strict)
				.apply(&list, &column, SortDirection::Asc)
				.unwrap_err();
			assert_eq!(err, SortError::InvalidSortColumn("City".to_string()));
		}
		assert!(list.query().order_by().is_empty());
	}

	#[rstest]
	fn test_apply_respects_max_hops(list: DataList, registry: SortFieldRegistry) {
		let applier = SortApplier::new(&registry).with_max_hops(0);
		let column = applier.validate("Cheerleader").unwrap();

		assert!(matches!(
			applier.apply(&list, &column, SortDirection::Asc),
			Err(SortError::PathTooDeep { hops: 1, max: 0, .. })
		));
	}
}
