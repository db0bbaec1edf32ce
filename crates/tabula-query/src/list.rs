//! Entity lists

use crate::error::{QueryError, QueryResult};
use crate::select::{JoinClause, SelectQuery};
use crate::store::{MemoryDatabase, ResultRow};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tabula_schema::SchemaProvider;

/// Schema shared between a list and the lists derived from it
pub type SharedSchema = Arc<dyn SchemaProvider + Send + Sync>;

/// A list of records of one entity type
///
/// The list owns its query by value. Deriving a sorted list goes through
/// [`DataList::with_query`], which returns a new list; the receiver keeps
/// its own query and can be sorted again independently.
///
/// For an entity type that extends another class, the base query selects
/// from the hierarchy's base table and left joins each subclass table down
/// to the entity's own table on the shared identity column.
#[derive(Clone)]
pub struct DataList {
	schema: SharedSchema,
	database: Arc<MemoryDatabase>,
	entity_type: String,
	query: SelectQuery,
}

impl DataList {
	/// List every record of `entity_type`
	///
	/// # Errors
	///
	/// [`QueryError::UnknownEntity`] when the schema does not know the type.
	pub fn new<S>(
		schema: Arc<S>,
		database: Arc<MemoryDatabase>,
		entity_type: impl Into<String>,
	) -> QueryResult<Self>
	where
		S: SchemaProvider + Send + Sync + 'static,
	{
		Self::with_provider(schema, database, entity_type)
	}

	/// List every record of `entity_type` described by any schema provider
	pub fn with_provider(
		schema: SharedSchema,
		database: Arc<MemoryDatabase>,
		entity_type: impl Into<String>,
	) -> QueryResult<Self> {
		let entity_type = entity_type.into();
		let unknown = || QueryError::UnknownEntity(entity_type.clone());
		let base_table = schema.base_table(&entity_type).ok_or_else(unknown)?;

		let id_column = schema.id_column();
		let mut query = SelectQuery::new(base_table);
		for class in schema.ancestry(&entity_type).into_iter().skip(1) {
			let table = schema
				.owning_table(&entity_type, class)
				.ok_or_else(unknown)?;
			query.add_left_join(JoinClause::unaliased(
				table,
				id_column,
				base_table,
				id_column,
			))?;
		}

		Ok(Self {
			schema,
			database,
			entity_type,
			query,
		})
	}

	/// Entity type of the records
	pub fn entity_type(&self) -> &str {
		&self.entity_type
	}

	/// Schema the list was built against
	pub fn schema(&self) -> &(dyn SchemaProvider + Send + Sync) {
		self.schema.as_ref()
	}

	/// Current query
	pub fn query(&self) -> &SelectQuery {
		&self.query
	}

	/// A new list over the same records with a different query
	pub fn with_query(&self, query: SelectQuery) -> Self {
		Self {
			schema: Arc::clone(&self.schema),
			database: Arc::clone(&self.database),
			entity_type: self.entity_type.clone(),
			query,
		}
	}

	/// The query rendered as PostgreSQL
	pub fn sql(&self) -> String {
		self.query.to_sql()
	}

	/// Execute the query
	pub fn rows(&self) -> QueryResult<Vec<ResultRow>> {
		self.database.execute(&self.query)
	}

	/// Number of result rows
	pub fn count(&self) -> QueryResult<usize> {
		Ok(self.rows()?.len())
	}

	/// Values of one of the entity's own columns, in result order
	///
	/// # Errors
	///
	/// [`QueryError::UnknownField`] when no table of the entity's hierarchy
	/// stores `column`.
	pub fn column(&self, column: &str) -> QueryResult<Vec<Value>> {
		let table = self
			.schema
			.class_for_field(&self.entity_type, column)
			.and_then(|class| self.schema.owning_table(&self.entity_type, class))
			.ok_or_else(|| QueryError::UnknownField {
				field: column.to_string(),
				entity_type: self.entity_type.clone(),
			})?;

		Ok(self
			.rows()?
			.iter()
			.map(|row| row.value(table, column))
			.collect())
	}
}

impl fmt::Debug for DataList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DataList")
			.field("entity_type", &self.entity_type)
			.field("query", &self.query)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use tabula_schema::{ClassDef, Schema};

	#[fixture]
	fn schema() -> Arc<Schema> {
		Arc::new(
			Schema::builder()
				.class(ClassDef::new("Team", "Team").fields(["Name", "City"]))
				.class(
					ClassDef::new("TeamGroup", "TeamGroup")
						.extends("Team")
						.field("GroupName"),
				)
				.build()
				.unwrap(),
		)
	}

	#[fixture]
	fn database() -> Arc<MemoryDatabase> {
		let mut db = MemoryDatabase::new();
		db.insert_json("Team", json!({ "ID": 1, "Name": "A", "City": "Melbourne" }))
			.unwrap();
		db.insert_json("Team", json!({ "ID": 2, "Name": "B", "City": "Auckland" }))
			.unwrap();
		db.insert_json("TeamGroup", json!({ "ID": 2, "GroupName": "South" }))
			.unwrap();
		Arc::new(db)
	}

	#[rstest]
	fn test_base_query_for_root_class(schema: Arc<Schema>, database: Arc<MemoryDatabase>) {
		let list = DataList::new(schema, database, "Team").unwrap();
		assert_eq!(list.query().from_table(), "Team");
		assert!(list.query().joins().is_empty());
		assert_eq!(list.count().unwrap(), 2);
	}

	#[rstest]
	fn test_base_query_joins_subclass_tables(schema: Arc<Schema>, database: Arc<MemoryDatabase>) {
		let list = DataList::new(schema, database, "TeamGroup").unwrap();

		assert_eq!(
			list.query().joins(),
			&[JoinClause::unaliased("TeamGroup", "ID", "Team", "ID")]
		);
		assert!(
			list.sql()
				.contains(r#"LEFT JOIN "TeamGroup" ON "TeamGroup"."ID" = "Team"."ID""#)
		);
		assert_eq!(
			list.column("GroupName").unwrap(),
			vec![Value::Null, json!("South")]
		);
		assert_eq!(
			list.column("City").unwrap(),
			vec![json!("Melbourne"), json!("Auckland")]
		);
	}

	#[rstest]
	fn test_list_over_shared_provider(schema: Arc<Schema>, database: Arc<MemoryDatabase>) {
		let provider: SharedSchema = schema;

		let list = DataList::with_provider(provider, database, "TeamGroup").unwrap();

		assert_eq!(list.query().from_table(), "Team");
		assert_eq!(list.schema().base_table("TeamGroup"), Some("Team"));
		assert_eq!(list.count().unwrap(), 2);
	}

	#[rstest]
	fn test_unknown_entity(schema: Arc<Schema>, database: Arc<MemoryDatabase>) {
		let err = DataList::new(schema, database, "Player").unwrap_err();
		assert_eq!(err, QueryError::UnknownEntity("Player".to_string()));
	}

	#[rstest]
	fn test_unknown_column(schema: Arc<Schema>, database: Arc<MemoryDatabase>) {
		let list = DataList::new(schema, database, "Team").unwrap();
		assert!(matches!(
			list.column("Colour"),
			Err(QueryError::UnknownField { .. })
		));
	}

	#[rstest]
	fn test_with_query_returns_new_list(schema: Arc<Schema>, database: Arc<MemoryDatabase>) {
		let list = DataList::new(schema, database, "Team").unwrap();
		let mut query = list.query().clone();
		query.add_order_by("Team", "City", crate::SortDirection::Asc);

		let sorted = list.with_query(query);

		assert_eq!(
			sorted.column("City").unwrap(),
			vec![json!("Auckland"), json!("Melbourne")]
		);
		assert_eq!(
			list.column("City").unwrap(),
			vec![json!("Melbourne"), json!("Auckland")]
		);
	}
}
