//! Base column trait and implementation

use std::fmt::Debug;

/// Trait for list view column definitions
///
/// A column is identified by its name, which may be a dotted relation path
/// such as `Cheerleader.Hat.Colour`, and shown under its header label.
pub trait Column: Debug {
	/// Returns the name of this column
	///
	/// This is used as the identifier for sorting
	fn name(&self) -> &str;

	/// Returns the header text for this column
	fn header(&self) -> &str;

	/// Returns whether this column may be offered for sorting
	///
	/// Default: true
	fn sortable(&self) -> bool {
		true
	}
}

/// A plain column description
///
/// # Example
///
/// ```rust
/// use tabula_tables::column::{Column, ListColumn};
///
/// let hat = ListColumn::new("Cheerleader.Hat.Colour", "Cheerleader Hat");
/// assert_eq!(hat.header(), "Cheerleader Hat");
/// assert!(Column::sortable(&hat));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListColumn {
	name: String,
	header: String,
	sortable: bool,
}

impl ListColumn {
	/// Creates a new column
	pub fn new(name: impl Into<String>, header: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			header: header.into(),
			sortable: true,
		}
	}

	/// Creates a column whose header is its name
	pub fn named(name: impl Into<String>) -> Self {
		let name = name.into();
		Self::new(name.clone(), name)
	}

	/// Sets whether this column is sortable
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}
}

impl Column for ListColumn {
	fn name(&self) -> &str {
		&self.name
	}

	fn header(&self) -> &str {
		&self.header
	}

	fn sortable(&self) -> bool {
		self.sortable
	}
}
