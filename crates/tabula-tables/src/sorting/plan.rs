//! Join planning for resolved relation paths
//!
//! Every joined table is aliased `<prefix>_<table>`, where the prefix is the
//! lowercase `_`-join of the relation names traversed so far. For path
//! `Cheerleader.Hat.Colour` the hat table is joined as
//! `cheerleader_hat_CheerleaderHat`.
//!
//! A hop into a joined-table hierarchy first joins the hierarchy's base
//! table, then each subclass table down to the target type on the shared
//! identity column:
//!
//! ```sql
//! LEFT JOIN "Cheerleader" AS "cheerleadersmom_Cheerleader"
//!     ON "cheerleadersmom_Cheerleader"."ID" = "Team"."CheerleadersMomID"
//! LEFT JOIN "Mom" AS "cheerleadersmom_Mom"
//!     ON "cheerleadersmom_Mom"."ID" = "cheerleadersmom_Cheerleader"."ID"
//! ```
//!
//! The root entity's own tables keep their table names as aliases, matching
//! the base query of [`DataList`](tabula_query::DataList).

use crate::error::{SortError, SortResult};
use crate::sorting::path::{RelationHop, ResolvedPath};
use indexmap::IndexMap;
use tabula_query::JoinClause;
use tabula_schema::{RelationKind, SchemaProvider};

/// Ordered, deduplicated joins reaching a sort column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPlan {
	joins: Vec<JoinClause>,
	alias: String,
	column: String,
}

impl JoinPlan {
	/// Joins in emission order
	pub fn joins(&self) -> &[JoinClause] {
		&self.joins
	}

	/// Alias of the table owning the sort column
	pub fn alias(&self) -> &str {
		&self.alias
	}

	/// Sort column name
	pub fn column(&self) -> &str {
		&self.column
	}

	/// `"<alias>"."<column>"`
	pub fn qualified_column(&self) -> String {
		format!("\"{}\".\"{}\"", self.alias, self.column)
	}

	fn push(&mut self, join: JoinClause) {
		if self
			.joins
			.iter()
			.any(|existing| existing.table == join.table && existing.alias == join.alias)
		{
			return;
		}
		tracing::debug!(
			table = %join.table,
			alias = %join.alias,
			on = %join.on_expr(),
			"planned join"
		);
		self.joins.push(join);
	}
}

/// Class name to table alias for one joined entity, base class first
type Scope = IndexMap<String, String>;

/// Turns a [`ResolvedPath`] into a [`JoinPlan`]
#[derive(Debug)]
pub struct JoinPlanBuilder<'a, S: SchemaProvider + ?Sized> {
	schema: &'a S,
}

impl<'a, S: SchemaProvider + ?Sized> JoinPlanBuilder<'a, S> {
	/// Builder reading table layout from `schema`
	pub fn new(schema: &'a S) -> Self {
		Self { schema }
	}

	/// Plan the joins for `path`
	///
	/// # Errors
	///
	/// [`SortError::SchemaInconsistency`] when a class of a traversed
	/// hierarchy has no table, and [`SortError::UnknownField`] when the sort
	/// column is not stored in the final hierarchy.
	pub fn build(&self, path: &ResolvedPath) -> SortResult<JoinPlan> {
		let mut plan = JoinPlan {
			joins: Vec::new(),
			alias: String::new(),
			column: path.column.clone(),
		};

		let mut scope = self.scope(&path.root_type, None)?;
		let mut prefix: Vec<String> = Vec::with_capacity(path.hops.len());

		for hop in &path.hops {
			prefix.push(hop.relation_name.to_lowercase());
			let alias_prefix = prefix.join("_");
			let next = self.scope(&hop.target_type, Some(alias_prefix.as_str()))?;
			self.plan_hop(&mut plan, hop, &alias_prefix, &scope, &next)?;
			scope = next;
		}

		let target_type = path.target_type();
		plan.alias = self
			.schema
			.class_for_field(target_type, &path.column)
			.and_then(|class| scope.get(class))
			.cloned()
			.ok_or_else(|| SortError::UnknownField {
				field: path.column.clone(),
				entity_type: target_type.to_string(),
			})?;

		tracing::debug!(
			root = %path.root_type,
			joins = plan.joins.len(),
			order_by = %plan.qualified_column(),
			"built join plan"
		);

		Ok(plan)
	}

	/// Aliases for every class of `entity_type`'s hierarchy
	fn scope(&self, entity_type: &str, prefix: Option<&str>) -> SortResult<Scope> {
		let ancestry = self.schema.ancestry(entity_type);
		if ancestry.is_empty() {
			return Err(SortError::SchemaInconsistency(format!(
				"entity type {} is not part of the schema",
				entity_type
			)));
		}

		ancestry
			.into_iter()
			.map(|class| -> SortResult<(String, String)> {
				let table = self.schema.owning_table(entity_type, class).ok_or_else(|| {
					SortError::SchemaInconsistency(format!(
						"class {} of {} has no table",
						class, entity_type
					))
				})?;
				let alias = match prefix {
					Some(prefix) => format!("{}_{}", prefix, table),
					None => table.to_string(),
				};
				Ok((class.to_string(), alias))
			})
			.collect()
	}

	fn plan_hop(
		&self,
		plan: &mut JoinPlan,
		hop: &RelationHop,
		prefix: &str,
		source: &Scope,
		target: &Scope,
	) -> SortResult<()> {
		let id = self.schema.id_column();
		let target_base = self.table_of(&hop.target_type, target)?;
		let (base_class, base_alias) = target
			.first()
			.ok_or_else(|| self.missing(&hop.target_type))?;
		let (_, source_base_alias) = source
			.first()
			.ok_or_else(|| self.missing(&hop.source_type))?;

		match hop.relation.kind() {
			RelationKind::HasOne { foreign_key } => {
				let declared_on = hop.relation.declared_on();
				let source_alias = source.get(declared_on).ok_or_else(|| {
					SortError::SchemaInconsistency(format!(
						"relation {} is declared on {}, which is not a class of {}",
						hop.relation_name, declared_on, hop.source_type
					))
				})?;
				plan.push(JoinClause::new(
					target_base,
					base_alias,
					id,
					source_alias,
					foreign_key,
				));
			}
			RelationKind::HasMany { foreign_key } => {
				plan.push(JoinClause::new(
					target_base,
					base_alias,
					foreign_key,
					source_base_alias,
					id,
				));
			}
			RelationKind::ManyMany { link } => {
				let link_alias = format!("{}_{}", prefix, link.table);
				plan.push(JoinClause::new(
					&link.table,
					&link_alias,
					&link.source_column,
					source_base_alias,
					id,
				));
				plan.push(JoinClause::new(
					target_base,
					base_alias,
					id,
					link_alias,
					&link.target_column,
				));
			}
		}

		for (class, alias) in target.iter().skip(1) {
			let table = self
				.schema
				.owning_table(&hop.target_type, class)
				.ok_or_else(|| self.missing(class))?;
			plan.push(JoinClause::new(table, alias, id, base_alias, id));
		}

		tracing::trace!(
			relation = %hop.relation_name,
			kind = hop.relation.kind().as_str(),
			base = %base_class,
			"planned hop"
		);

		Ok(())
	}

	fn table_of(&self, entity_type: &str, scope: &Scope) -> SortResult<&str> {
		scope
			.first()
			.and_then(|(class, _)| self.schema.owning_table(entity_type, class))
			.ok_or_else(|| self.missing(entity_type))
	}

	fn missing(&self, entity_type: &str) -> SortError {
		SortError::SchemaInconsistency(format!("entity type {} has no table", entity_type))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sorting::path::RelationPathResolver;
	use rstest::{fixture, rstest};
	use tabula_schema::{ClassDef, Schema};

	#[fixture]
	fn schema() -> Schema {
		Schema::builder()
			.class(
				ClassDef::new("Team", "Team")
					.fields(["Name", "City"])
					.has_one("Cheerleader", "Cheerleader")
					.has_one("CheerleadersMom", "Mom")
					.has_many("Players", "Player")
					.many_many("Sponsors", "Sponsor"),
			)
			.class(ClassDef::new("TeamGroup", "TeamGroup").extends("Team"))
			.class(
				ClassDef::new("Cheerleader", "Cheerleader")
					.field("Name")
					.has_one("Hat", "CheerleaderHat"),
			)
			.class(
				ClassDef::new("Mom", "Mom")
					.extends("Cheerleader")
					.field("NumberOfCookiesBaked"),
			)
			.class(ClassDef::new("SuperMom", "SuperMom").extends("Mom"))
			.class(ClassDef::new("CheerleaderHat", "CheerleaderHat").field("Colour"))
			.class(ClassDef::new("Player", "Player").field("Name"))
			.class(ClassDef::new("Sponsor", "Sponsor").field("Title"))
			.build()
			.unwrap()
	}

	fn plan(schema: &Schema, root: &str, path: &str) -> JoinPlan {
		let resolved = RelationPathResolver::new(schema)
			.resolve(root, path)
			.unwrap();
		JoinPlanBuilder::new(schema).build(&resolved).unwrap()
	}

	fn aliases(plan: &JoinPlan) -> Vec<&str> {
		plan.joins().iter().map(|join| join.alias.as_str()).collect()
	}

	#[rstest]
	fn test_direct_column_needs_no_join(schema: Schema) {
		let plan = plan(&schema, "Team", "City");

		assert!(plan.joins().is_empty());
		assert_eq!(plan.qualified_column(), r#""Team"."City""#);
	}

	#[rstest]
	fn test_direct_column_of_root_superclass(schema: Schema) {
		let plan = plan(&schema, "TeamGroup", "City");

		assert!(plan.joins().is_empty());
		assert_eq!(plan.alias(), "Team");
	}

	#[rstest]
	fn test_one_hop(schema: Schema) {
		let plan = plan(&schema, "Team", "Cheerleader.Name");

		assert_eq!(
			plan.joins(),
			&[JoinClause::new(
				"Cheerleader",
				"cheerleader_Cheerleader",
				"ID",
				"Team",
				"CheerleaderID"
			)]
		);
		assert_eq!(plan.alias(), "cheerleader_Cheerleader");
		assert_eq!(plan.column(), "Name");
	}

	#[rstest]
	fn test_two_hops_in_path_order(schema: Schema) {
		let plan = plan(&schema, "TeamGroup", "Cheerleader.Hat.Colour");

		assert_eq!(
			aliases(&plan),
			vec!["cheerleader_Cheerleader", "cheerleader_hat_CheerleaderHat"]
		);
		assert_eq!(
			plan.joins()[0].on_expr(),
			r#""cheerleader_Cheerleader"."ID" = "Team"."CheerleaderID""#
		);
		assert_eq!(
			plan.joins()[1].on_expr(),
			r#""cheerleader_hat_CheerleaderHat"."ID" = "cheerleader_Cheerleader"."HatID""#
		);
		assert_eq!(
			plan.qualified_column(),
			r#""cheerleader_hat_CheerleaderHat"."Colour""#
		);
	}

	#[rstest]
	fn test_subclass_target_joins_base_first(schema: Schema) {
		let plan = plan(&schema, "TeamGroup", "CheerleadersMom.Hat.Colour");

		assert_eq!(
			aliases(&plan),
			vec![
				"cheerleadersmom_Cheerleader",
				"cheerleadersmom_Mom",
				"cheerleadersmom_hat_CheerleaderHat",
			]
		);
		assert_eq!(
			plan.joins()[0].on_expr(),
			r#""cheerleadersmom_Cheerleader"."ID" = "Team"."CheerleadersMomID""#
		);
		assert_eq!(
			plan.joins()[1].on_expr(),
			r#""cheerleadersmom_Mom"."ID" = "cheerleadersmom_Cheerleader"."ID""#
		);
		// HatID is declared on Cheerleader, so it is read from the base alias
		assert_eq!(
			plan.joins()[2].on_expr(),
			r#""cheerleadersmom_hat_CheerleaderHat"."ID" = "cheerleadersmom_Cheerleader"."HatID""#
		);
	}

	#[rstest]
	fn test_subclass_column_uses_subclass_alias(schema: Schema) {
		let plan = plan(&schema, "Team", "CheerleadersMom.NumberOfCookiesBaked");

		assert_eq!(plan.alias(), "cheerleadersmom_Mom");
	}

	#[rstest]
	fn test_intermediate_classes_join_base_first() {
		let schema = Schema::builder()
			.class(ClassDef::new("Team", "Team").has_one("Captain", "SuperMom"))
			.class(ClassDef::new("Cheerleader", "Cheerleader").field("Name"))
			.class(ClassDef::new("Mom", "Mom").extends("Cheerleader"))
			.class(
				ClassDef::new("SuperMom", "SuperMom")
					.extends("Mom")
					.field("Power"),
			)
			.build()
			.unwrap();

		let plan = plan(&schema, "Team", "Captain.Power");

		assert_eq!(
			aliases(&plan),
			vec!["captain_Cheerleader", "captain_Mom", "captain_SuperMom"]
		);
		assert!(
			plan.joins()[1..]
				.iter()
				.all(|join| join.on_source_alias == "captain_Cheerleader")
		);
		assert_eq!(plan.alias(), "captain_SuperMom");
	}

	#[rstest]
	fn test_has_many_keys_on_target(schema: Schema) {
		let plan = plan(&schema, "Team", "Players.Name");

		assert_eq!(
			plan.joins(),
			&[JoinClause::new("Player", "players_Player", "TeamID", "Team", "ID")]
		);
	}

	#[rstest]
	fn test_many_many_joins_link_table_first(schema: Schema) {
		let plan = plan(&schema, "TeamGroup", "Sponsors.Title");

		assert_eq!(
			plan.joins(),
			&[
				JoinClause::new("Team_Sponsors", "sponsors_Team_Sponsors", "TeamID", "Team", "ID"),
				JoinClause::new(
					"Sponsor",
					"sponsors_Sponsor",
					"ID",
					"sponsors_Team_Sponsors",
					"SponsorID"
				),
			]
		);
	}

	#[rstest]
	fn test_plans_are_deterministic(schema: Schema) {
		let first = plan(&schema, "TeamGroup", "CheerleadersMom.Hat.Colour");
		let second = plan(&schema, "TeamGroup", "CheerleadersMom.Hat.Colour");
		assert_eq!(first, second);
	}

	#[rstest]
	fn test_join_plan_has_no_duplicate_aliases(schema: Schema) {
		let plan = plan(&schema, "Team", "CheerleadersMom.Hat.Colour");
		let mut seen = std::collections::HashSet::new();
		assert!(plan.joins().iter().all(|join| seen.insert(join.alias.clone())));
	}

	#[rstest]
	fn test_missing_owning_table_is_inconsistent(schema: Schema) {
		let resolved = ResolvedPath {
			root_type: "Team".to_string(),
			hops: Vec::new(),
			column: "City".to_string(),
		};
		assert!(JoinPlanBuilder::new(&schema).build(&resolved).is_ok());

		let orphan = ResolvedPath {
			root_type: "Nobody".to_string(),
			hops: Vec::new(),
			column: "City".to_string(),
		};
		assert!(matches!(
			JoinPlanBuilder::new(&schema).build(&orphan),
			Err(SortError::SchemaInconsistency(_))
		));
	}
}
