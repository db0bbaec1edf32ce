//! Select query description and SQL rendering

use crate::direction::SortDirection;
use crate::error::{QueryError, QueryResult};
use sea_query::{
	Alias, Asterisk, Expr, ExprTrait, JoinType, MysqlQueryBuilder, PostgresQueryBuilder, Query,
	SelectStatement, SqliteQueryBuilder,
};

/// SQL dialect used by [`SelectQuery::to_sql_for`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialect {
	/// PostgreSQL (double-quoted identifiers)
	#[default]
	Postgres,
	/// MySQL (backtick-quoted identifiers)
	MySql,
	/// SQLite
	Sqlite,
}

/// One `LEFT JOIN` clause
///
/// Renders as
/// `LEFT JOIN "<table>" AS "<alias>" ON "<alias>"."<on_target_column>" = "<on_source_alias>"."<on_source_column>"`.
/// When the alias equals the table name the `AS` part is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinClause {
	/// Joined table
	pub table: String,
	/// Alias the joined table is referenced by
	pub alias: String,
	/// Alias already in scope that the join hangs off
	pub on_source_alias: String,
	/// Column on `on_source_alias`
	pub on_source_column: String,
	/// Column on the joined table
	pub on_target_column: String,
}

impl JoinClause {
	/// Create an aliased join
	pub fn new(
		table: impl Into<String>,
		alias: impl Into<String>,
		on_target_column: impl Into<String>,
		on_source_alias: impl Into<String>,
		on_source_column: impl Into<String>,
	) -> Self {
		Self {
			table: table.into(),
			alias: alias.into(),
			on_source_alias: on_source_alias.into(),
			on_source_column: on_source_column.into(),
			on_target_column: on_target_column.into(),
		}
	}

	/// Create a join referenced by its own table name
	pub fn unaliased(
		table: impl Into<String>,
		on_target_column: impl Into<String>,
		on_source_alias: impl Into<String>,
		on_source_column: impl Into<String>,
	) -> Self {
		let table = table.into();
		Self::new(
			table.clone(),
			table,
			on_target_column,
			on_source_alias,
			on_source_column,
		)
	}

	/// Whether the clause renders an `AS` alias
	pub fn is_aliased(&self) -> bool {
		self.alias != self.table
	}

	/// The `ON` condition as quoted SQL
	pub fn on_expr(&self) -> String {
		format!(
			"\"{}\".\"{}\" = \"{}\".\"{}\"",
			self.alias, self.on_target_column, self.on_source_alias, self.on_source_column
		)
	}
}

/// One `ORDER BY` term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderClause {
	/// Table alias owning the column
	pub alias: String,
	/// Column name
	pub column: String,
	/// Direction
	pub direction: SortDirection,
}

impl OrderClause {
	/// `"<alias>"."<column>"`
	pub fn qualified_column(&self) -> String {
		format!("\"{}\".\"{}\"", self.alias, self.column)
	}
}

/// A `SELECT *` over one table with left joins and ordering
///
/// Cloning a query is how a sorted variant is derived: every mutation
/// happens on the clone, the original keeps its joins and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
	from: String,
	joins: Vec<JoinClause>,
	order_by: Vec<OrderClause>,
}

impl SelectQuery {
	/// Select from `table`
	pub fn new(table: impl Into<String>) -> Self {
		Self {
			from: table.into(),
			joins: Vec::new(),
			order_by: Vec::new(),
		}
	}

	/// Table in the `FROM` clause
	pub fn from_table(&self) -> &str {
		&self.from
	}

	/// Joins in emission order
	pub fn joins(&self) -> &[JoinClause] {
		&self.joins
	}

	/// Order terms, most significant first
	pub fn order_by(&self) -> &[OrderClause] {
		&self.order_by
	}

	/// Whether `alias` names the `FROM` table or a joined table
	pub fn has_alias(&self, alias: &str) -> bool {
		self.from == alias || self.joins.iter().any(|join| join.alias == alias)
	}

	/// Add a `LEFT JOIN`
	///
	/// Returns `Ok(false)` without changing the query when the exact same
	/// join is already present.
	///
	/// # Errors
	///
	/// [`QueryError::AliasConflict`] when the alias is taken by the `FROM`
	/// table or by a different join, and [`QueryError::UnknownAlias`] when
	/// the join hangs off an alias that is not in scope yet.
	pub fn add_left_join(&mut self, join: JoinClause) -> QueryResult<bool> {
		if let Some(existing) = self.joins.iter().find(|j| j.alias == join.alias) {
			if *existing == join {
				return Ok(false);
			}
			return Err(QueryError::AliasConflict { alias: join.alias });
		}
		if join.alias == self.from {
			return Err(QueryError::AliasConflict { alias: join.alias });
		}
		if !self.has_alias(&join.on_source_alias) {
			return Err(QueryError::UnknownAlias(join.on_source_alias));
		}
		self.joins.push(join);
		Ok(true)
	}

	/// Append an `ORDER BY` term
	pub fn add_order_by(
		&mut self,
		alias: impl Into<String>,
		column: impl Into<String>,
		direction: SortDirection,
	) {
		self.order_by.push(OrderClause {
			alias: alias.into(),
			column: column.into(),
			direction,
		});
	}

	/// Replace the ordering with a single `ORDER BY` term
	pub fn set_order_by(
		&mut self,
		alias: impl Into<String>,
		column: impl Into<String>,
		direction: SortDirection,
	) {
		self.clear_order_by();
		self.add_order_by(alias, column, direction);
	}

	/// Drop every `ORDER BY` term
	pub fn clear_order_by(&mut self) {
		self.order_by.clear();
	}

	/// Build the sea-query statement
	pub fn to_statement(&self) -> SelectStatement {
		let mut stmt = Query::select();
		stmt.column(Asterisk).from(Alias::new(&self.from));

		for join in &self.joins {
			let condition = Expr::col((Alias::new(&join.alias), Alias::new(&join.on_target_column)))
				.equals((
					Alias::new(&join.on_source_alias),
					Alias::new(&join.on_source_column),
				));
			if join.is_aliased() {
				stmt.join_as(
					JoinType::LeftJoin,
					Alias::new(&join.table),
					Alias::new(&join.alias),
					condition,
				);
			} else {
				stmt.left_join(Alias::new(&join.table), condition);
			}
		}

		for order in &self.order_by {
			stmt.order_by(
				(Alias::new(&order.alias), Alias::new(&order.column)),
				order.direction.into(),
			);
		}

		stmt
	}

	/// Render as PostgreSQL
	pub fn to_sql(&self) -> String {
		self.to_sql_for(SqlDialect::Postgres)
	}

	/// Render for a specific dialect
	pub fn to_sql_for(&self, dialect: SqlDialect) -> String {
		let stmt = self.to_statement();
		match dialect {
			SqlDialect::Postgres => stmt.to_string(PostgresQueryBuilder),
			SqlDialect::MySql => stmt.to_string(MysqlQueryBuilder),
			SqlDialect::Sqlite => stmt.to_string(SqliteQueryBuilder),
		}
	}
}
