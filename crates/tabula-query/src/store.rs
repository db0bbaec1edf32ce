//! In-memory row store
//!
//! Executes a [`SelectQuery`] with SQL semantics: every `LEFT JOIN` keeps
//! unmatched rows with a NULL side and multiplies rows on multiple matches,
//! and `ORDER BY` is a stable sort where NULL sorts lowest.

use crate::direction::SortDirection;
use crate::error::{QueryError, QueryResult};
use crate::select::SelectQuery;
use indexmap::IndexMap;
use serde_json::Value;
use std::cmp::Ordering;

/// A stored row: column name to value
pub type Row = IndexMap<String, Value>;

/// One result row: every alias in scope and the row it matched
///
/// A `None` entry is the NULL side of an unmatched `LEFT JOIN`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
	tables: IndexMap<String, Option<Row>>,
}

impl ResultRow {
	fn new(alias: &str, row: &Row) -> Self {
		let mut tables = IndexMap::new();
		tables.insert(alias.to_string(), Some(row.clone()));
		Self { tables }
	}

	/// Value of `alias.column`; `None` when the alias is NULL or the column is absent
	pub fn get(&self, alias: &str, column: &str) -> Option<&Value> {
		self.tables.get(alias)?.as_ref()?.get(column)
	}

	/// Value of `alias.column` with SQL NULL for anything missing
	pub fn value(&self, alias: &str, column: &str) -> Value {
		self.get(alias, column).cloned().unwrap_or(Value::Null)
	}

	/// Row matched for `alias`, if any
	pub fn table(&self, alias: &str) -> Option<&Row> {
		self.tables.get(alias)?.as_ref()
	}
}

/// Named tables of rows
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
	tables: IndexMap<String, Vec<Row>>,
}

impl MemoryDatabase {
	/// Empty database
	pub fn new() -> Self {
		Self::default()
	}

	/// Make sure `table` exists, even without rows
	pub fn create_table(&mut self, table: impl Into<String>) {
		self.tables.entry(table.into()).or_default();
	}

	/// Append a row, creating the table on first use
	pub fn insert(&mut self, table: impl Into<String>, row: Row) {
		self.tables.entry(table.into()).or_default().push(row);
	}

	/// Append a row given as a JSON object
	///
	/// # Examples
	///
	/// ```
	/// use serde_json::json;
	/// use tabula_query::MemoryDatabase;
	///
	/// let mut db = MemoryDatabase::new();
	/// db.insert_json("Team", json!({ "ID": 1, "City": "Auckland" })).unwrap();
	/// assert_eq!(db.table("Team").unwrap().len(), 1);
	/// assert!(db.insert_json("Team", json!([1, 2])).is_err());
	/// ```
	pub fn insert_json(&mut self, table: impl Into<String>, value: Value) -> QueryResult<()> {
		let table = table.into();
		match value {
			Value::Object(map) => {
				self.insert(table, map.into_iter().collect());
				Ok(())
			}
			_ => Err(QueryError::InvalidRow { table }),
		}
	}

	/// Rows of `table`
	pub fn table(&self, table: &str) -> Option<&[Row]> {
		self.tables.get(table).map(Vec::as_slice)
	}

	fn rows_of(&self, table: &str) -> QueryResult<&[Row]> {
		self.table(table)
			.ok_or_else(|| QueryError::UnknownTable(table.to_string()))
	}

	/// Run `query` and return the joined, ordered rows
	///
	/// # Errors
	///
	/// [`QueryError::UnknownTable`] for tables that were never created and
	/// [`QueryError::UnknownAlias`] for order terms on aliases not in scope.
	pub fn execute(&self, query: &SelectQuery) -> QueryResult<Vec<ResultRow>> {
		let from = query.from_table();
		let mut rows: Vec<ResultRow> = self
			.rows_of(from)?
			.iter()
			.map(|row| ResultRow::new(from, row))
			.collect();

		for join in query.joins() {
			let target = self.rows_of(&join.table)?;
			let mut joined = Vec::with_capacity(rows.len());
			for mut row in rows {
				let matches: Vec<&Row> = match row.get(&join.on_source_alias, &join.on_source_column) {
					Some(key) if !key.is_null() => target
						.iter()
						.filter(|candidate| candidate.get(&join.on_target_column) == Some(key))
						.collect(),
					_ => Vec::new(),
				};

				if matches.is_empty() {
					row.tables.insert(join.alias.clone(), None);
					joined.push(row);
					continue;
				}
				for matched in matches {
					let mut next = row.clone();
					next.tables.insert(join.alias.clone(), Some(matched.clone()));
					joined.push(next);
				}
			}
			rows = joined;
		}

		if let Some(order) = query
			.order_by()
			.iter()
			.find(|order| !query.has_alias(&order.alias))
		{
			return Err(QueryError::UnknownAlias(order.alias.clone()));
		}

		rows.sort_by(|a, b| {
			for order in query.order_by() {
				let ordering = compare_values(
					a.get(&order.alias, &order.column),
					b.get(&order.alias, &order.column),
				);
				let ordering = match order.direction {
					SortDirection::Asc => ordering,
					SortDirection::Desc => ordering.reverse(),
				};
				if ordering != Ordering::Equal {
					return ordering;
				}
			}
			Ordering::Equal
		});

		tracing::trace!(
			from,
			joins = query.joins().len(),
			rows = rows.len(),
			"executed select"
		);

		Ok(rows)
	}
}

fn type_rank(value: Option<&Value>) -> u8 {
	match value {
		None | Some(Value::Null) => 0,
		Some(Value::Bool(_)) => 1,
		Some(Value::Number(_)) => 2,
		Some(Value::String(_)) => 3,
		Some(Value::Array(_)) => 4,
		Some(Value::Object(_)) => 5,
	}
}

/// Total order over JSON values: NULL < bool < number < string
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	match (a, b) {
		(Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
		(Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_i64(), y.as_i64()) {
			(Some(x), Some(y)) => x.cmp(&y),
			_ => x
				.as_f64()
				.partial_cmp(&y.as_f64())
				.unwrap_or(Ordering::Equal),
		},
		(Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
		_ => type_rank(a).cmp(&type_rank(b)),
	}
}
