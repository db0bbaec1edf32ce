//! Sortable list header component

use crate::column::Column;
use crate::error::{SettingsError, SortResult};
use crate::settings::SortingSettings;
use crate::sorting::{DEFAULT_MAX_PATH_HOPS, SortApplier, SortFieldRegistry, ValidatedColumn};
use crate::state::SortState;
use serde::Serialize;
use tabula_query::{DataList, SortDirection};

/// Header data for one column, ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
	/// Column name
	pub name: String,
	/// Header label
	pub title: String,
	/// Dotted path the column sorts by, `None` for non-sortable columns
	pub sort_path: Option<String>,
	/// Current direction when the list is sorted by this column
	pub active: Option<SortDirection>,
}

impl HeaderCell {
	/// Whether the column can be sorted on
	pub fn is_sortable(&self) -> bool {
		self.sort_path.is_some()
	}

	/// Direction a click on the header should request
	///
	/// An ascending column flips to descending, everything else sorts
	/// ascending.
	pub fn next_direction(&self) -> SortDirection {
		match self.active {
			Some(SortDirection::Asc) => SortDirection::Desc,
			_ => SortDirection::Asc,
		}
	}
}

/// Sorts entity lists by registered labels
///
/// Holds the allow-list of sortable columns for one listing configuration.
///
/// # Example
///
/// ```rust
/// use tabula_tables::SortableHeader;
///
/// let mut header = SortableHeader::new();
/// header.register_sortable("Name", "Cheerleader.Name").unwrap();
///
/// let column = header.validate("Name").unwrap();
/// assert_eq!(column.path(), "Cheerleader.Name");
///
/// let err = header.validate("INVALID").unwrap_err();
/// assert_eq!(err.to_string(), "Invalid SortColumn: INVALID");
/// ```
#[derive(Debug, Clone)]
pub struct SortableHeader {
	registry: SortFieldRegistry,
	max_path_hops: usize,
}

impl Default for SortableHeader {
	fn default() -> Self {
		Self {
			registry: SortFieldRegistry::new(),
			max_path_hops: DEFAULT_MAX_PATH_HOPS,
		}
	}
}

impl SortableHeader {
	/// Header with nothing sortable
	pub fn new() -> Self {
		Self::default()
	}

	/// Header using an existing registry
	pub fn with_registry(registry: SortFieldRegistry) -> Self {
		Self {
			registry,
			..Self::default()
		}
	}

	/// Header configured from settings
	pub fn from_settings(settings: &SortingSettings) -> Result<Self, SettingsError> {
		Ok(Self::with_registry(settings.registry()?).max_path_hops(settings.max_path_hops))
	}

	/// Override the hop limit for sort paths
	pub fn max_path_hops(mut self, max_path_hops: usize) -> Self {
		self.max_path_hops = max_path_hops;
		self
	}

	/// Make `label` sortable by `path`
	pub fn register_sortable(
		&mut self,
		label: impl Into<String>,
		path: impl Into<String>,
	) -> SortResult<()> {
		self.registry.register(label, path)
	}

	/// Registered sortable columns
	pub fn registry(&self) -> &SortFieldRegistry {
		&self.registry
	}

	fn applier(&self) -> SortApplier<'_> {
		SortApplier::new(&self.registry).with_max_hops(self.max_path_hops)
	}

	/// See [`SortApplier::validate`]
	pub fn validate(&self, sort_label: &str) -> SortResult<ValidatedColumn> {
		self.applier().validate(sort_label)
	}

	/// See [`SortApplier::apply`]
	pub fn apply(
		&self,
		list: &DataList,
		column: &ValidatedColumn,
		direction: SortDirection,
	) -> SortResult<DataList> {
		self.applier().apply(list, column, direction)
	}

	/// Sort `list` as requested by `state`
	///
	/// Without a requested column the result is an unsorted copy of `list`.
	/// A requested column that is not registered fails with
	/// [`SortError::InvalidSortColumn`](crate::SortError::InvalidSortColumn);
	/// no fallback column is used.
	pub fn manipulate(&self, list: &DataList, state: &SortState) -> SortResult<DataList> {
		let Some(requested) = state.column.as_deref() else {
			return Ok(list.clone());
		};
		let column = self.validate(requested)?;
		self.apply(list, &column, state.direction)
	}

	/// Describe the header of `columns` under the current `state`
	///
	/// A column is sortable when it allows sorting and either its header
	/// label or its name resolves through the registry.
	pub fn header_cells<'c, C>(
		&self,
		columns: impl IntoIterator<Item = &'c C>,
		state: &SortState,
	) -> Vec<HeaderCell>
	where
		C: Column + ?Sized + 'c,
	{
		let active_path = state
			.column
			.as_deref()
			.and_then(|column| self.registry.resolve_path(column));

		columns
			.into_iter()
			.map(|column| {
				let sort_path = column
					.sortable()
					.then(|| {
						self.registry
							.resolve_path(column.header())
							.or_else(|| self.registry.resolve_path(column.name()))
					})
					.flatten();
				let active = match (sort_path, active_path) {
					(Some(path), Some(active)) if path == active => Some(state.direction),
					_ => None,
				};
				HeaderCell {
					name: column.name().to_string(),
					title: column.header().to_string(),
					sort_path: sort_path.map(str::to_string),
					active,
				}
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::ListColumn;
	use crate::error::SortError;
	use rstest::{fixture, rstest};

	#[fixture]
	fn header() -> SortableHeader {
		let mut header = SortableHeader::new();
		header.register_sortable("Name", "Name").unwrap();
		header
			.register_sortable("Cheerleader Hat", "Cheerleader.Hat.Colour")
			.unwrap();
		header
	}

	#[fixture]
	fn columns() -> Vec<ListColumn> {
		vec![
			ListColumn::named("Name"),
			ListColumn::named("City"),
			ListColumn::new("Cheerleader.Hat.Colour", "Cheerleader Hat"),
		]
	}

	#[rstest]
	fn test_header_cells_mark_sortable_columns(header: SortableHeader, columns: Vec<ListColumn>) {
		let cells = header.header_cells(&columns, &SortState::unsorted());

		let sortable: Vec<(&str, bool)> = cells
			.iter()
			.map(|cell| (cell.title.as_str(), cell.is_sortable()))
			.collect();
		assert_eq!(
			sortable,
			vec![("Name", true), ("City", false), ("Cheerleader Hat", true)]
		);
		assert_eq!(
			cells[2].sort_path.as_deref(),
			Some("Cheerleader.Hat.Colour")
		);
		assert!(cells.iter().all(|cell| cell.active.is_none()));
	}

	#[rstest]
	fn test_header_cells_mark_active_column(header: SortableHeader, columns: Vec<ListColumn>) {
		let state = SortState::new("Cheerleader.Hat.Colour", SortDirection::Asc);

		let cells = header.header_cells(&columns, &state);

		assert_eq!(cells[0].active, None);
		assert_eq!(cells[2].active, Some(SortDirection::Asc));
		assert_eq!(cells[2].next_direction(), SortDirection::Desc);
		assert_eq!(cells[0].next_direction(), SortDirection::Asc);
	}

	#[rstest]
	fn test_header_cells_respect_column_flag(header: SortableHeader) {
		let columns = [ListColumn::named("Name").sortable(false)];

		let cells = header.header_cells(&columns, &SortState::unsorted());

		assert!(!cells[0].is_sortable());
	}

	#[rstest]
	fn test_register_sortable_rejects_malformed_path(mut header: SortableHeader) {
		assert!(matches!(
			header.register_sortable("Broken", "Cheerleader."),
			Err(SortError::EmptyPath(_))
		));
		assert_eq!(header.registry().len(), 2);
	}

	#[rstest]
	fn test_from_settings() {
		let settings = SortingSettings::from_toml(
			r#"
			max_path_hops = 2

			[sortable]
			"Cheerleader Hat" = "Cheerleader.Hat.Colour"
			"#,
		)
		.unwrap();

		let header = SortableHeader::from_settings(&settings).unwrap();

		assert_eq!(
			header.validate("Cheerleader Hat").unwrap().path(),
			"Cheerleader.Hat.Colour"
		);
		assert_eq!(header.max_path_hops, 2);
	}
}
