//! Entity class definitions

use crate::relation::{LinkTable, RelationDef, RelationKind};
use indexmap::IndexMap;

/// One entity class and the table that stores its own fields
///
/// A class that [`extends`](ClassDef::extends) another class only lists the
/// fields stored in its own table; inherited fields stay on the superclass
/// table and are reached through the shared identity column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
	name: String,
	table: String,
	parent: Option<String>,
	fields: Vec<String>,
	relations: IndexMap<String, RelationDef>,
}

impl ClassDef {
	/// Create a class stored in `table`
	///
	/// # Examples
	///
	/// ```
	/// use tabula_schema::ClassDef;
	///
	/// let team = ClassDef::new("Team", "Team")
	///     .fields(["Name", "City"])
	///     .has_one("Cheerleader", "Cheerleader");
	/// assert_eq!(team.table(), "Team");
	/// assert!(team.declares_column("City"));
	/// assert!(team.declares_column("CheerleaderID"));
	/// ```
	pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			table: table.into(),
			parent: None,
			fields: Vec::new(),
			relations: IndexMap::new(),
		}
	}

	/// Set the superclass this class inherits from
	pub fn extends(mut self, parent: impl Into<String>) -> Self {
		self.parent = Some(parent.into());
		self
	}

	/// Add a field stored in this class table
	pub fn field(mut self, field: impl Into<String>) -> Self {
		self.fields.push(field.into());
		self
	}

	/// Add several fields stored in this class table
	pub fn fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fields.extend(fields.into_iter().map(Into::into));
		self
	}

	/// Declare a has_one relation keyed by `<name>ID` on this table
	pub fn has_one(self, name: impl Into<String>, target_type: impl Into<String>) -> Self {
		let name = name.into();
		let foreign_key = format!("{}ID", name);
		self.has_one_with_key(name, target_type, foreign_key)
	}

	/// Declare a has_one relation with an explicit foreign key column
	pub fn has_one_with_key(
		self,
		name: impl Into<String>,
		target_type: impl Into<String>,
		foreign_key: impl Into<String>,
	) -> Self {
		let kind = RelationKind::HasOne {
			foreign_key: foreign_key.into(),
		};
		self.relation(name, target_type, kind)
	}

	/// Declare a has_many relation keyed by `<ThisClass>ID` on the target
	pub fn has_many(self, name: impl Into<String>, target_type: impl Into<String>) -> Self {
		let foreign_key = format!("{}ID", self.name);
		self.has_many_with_key(name, target_type, foreign_key)
	}

	/// Declare a has_many relation with an explicit foreign key on the target
	pub fn has_many_with_key(
		self,
		name: impl Into<String>,
		target_type: impl Into<String>,
		foreign_key: impl Into<String>,
	) -> Self {
		let kind = RelationKind::HasMany {
			foreign_key: foreign_key.into(),
		};
		self.relation(name, target_type, kind)
	}

	/// Declare a many_many relation through `<ThisClass>_<name>`
	pub fn many_many(self, name: impl Into<String>, target_type: impl Into<String>) -> Self {
		let name = name.into();
		let target_type = target_type.into();
		let link = LinkTable::new(
			format!("{}_{}", self.name, name),
			format!("{}ID", self.name),
			format!("{}ID", target_type),
		);
		self.many_many_through(name, target_type, link)
	}

	/// Declare a many_many relation through an explicit link table
	pub fn many_many_through(
		self,
		name: impl Into<String>,
		target_type: impl Into<String>,
		link: LinkTable,
	) -> Self {
		self.relation(name, target_type, RelationKind::ManyMany { link })
	}

	/// Declare a relation of any kind; redeclaring a name replaces it
	pub fn relation(
		mut self,
		name: impl Into<String>,
		target_type: impl Into<String>,
		kind: RelationKind,
	) -> Self {
		let name = name.into();
		let relation = RelationDef::new(self.name.clone(), name.clone(), target_type, kind);
		self.relations.insert(name, relation);
		self
	}

	/// Class name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Table owning this class's own fields
	pub fn table(&self) -> &str {
		&self.table
	}

	/// Superclass name, if any
	pub fn parent(&self) -> Option<&str> {
		self.parent.as_deref()
	}

	/// Fields stored in this class table
	pub fn field_names(&self) -> &[String] {
		&self.fields
	}

	/// Relations declared directly on this class
	pub fn relations(&self) -> &IndexMap<String, RelationDef> {
		&self.relations
	}

	/// Whether `column` is stored in this class table
	///
	/// has_one foreign keys count as columns of the declaring table.
	pub fn declares_column(&self, column: &str) -> bool {
		self.fields.iter().any(|f| f == column)
			|| self.relations.values().any(|rel| {
				matches!(rel.kind(), RelationKind::HasOne { foreign_key } if foreign_key == column)
			})
	}
}
