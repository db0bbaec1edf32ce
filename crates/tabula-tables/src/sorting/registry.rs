//! Allow-list of sortable columns

use crate::error::{SortError, SortResult};
use crate::sorting::path::split_path;
use indexmap::IndexMap;

/// Maps display labels to dotted relation paths
///
/// Only values reachable through [`SortFieldRegistry::resolve_path`] can be
/// sorted on.
///
/// # Examples
///
/// ```
/// use tabula_tables::SortFieldRegistry;
///
/// let mut registry = SortFieldRegistry::new();
/// registry.register("Cheerleader Hat", "Cheerleader.Hat.Colour").unwrap();
///
/// assert_eq!(registry.resolve_path("Cheerleader Hat"), Some("Cheerleader.Hat.Colour"));
/// assert_eq!(registry.resolve_path("Cheerleader.Hat.Colour"), Some("Cheerleader.Hat.Colour"));
/// assert_eq!(registry.resolve_path("Colour"), None);
/// assert!(registry.register("Broken", "Cheerleader..Colour").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortFieldRegistry {
	entries: IndexMap<String, String>,
}

impl SortFieldRegistry {
	/// Empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `label` as sortable by `path`, replacing any previous path
	///
	/// # Errors
	///
	/// [`SortError::EmptyPath`] when the path is empty or has an empty
	/// segment, [`SortError::EmptyLabel`] when the label is blank.
	pub fn register(&mut self, label: impl Into<String>, path: impl Into<String>) -> SortResult<()> {
		let path = path.into();
		split_path(&path)?;
		let label = label.into();
		if label.trim().is_empty() {
			return Err(SortError::EmptyLabel(path));
		}
		if let Some(previous) = self.entries.insert(label.clone(), path) {
			tracing::debug!(label = %label, previous = %previous, "sort label re-registered");
		}
		Ok(())
	}

	/// Path for a label, or for a value that is itself a registered path
	pub fn resolve_path(&self, label_or_column: &str) -> Option<&str> {
		if let Some(path) = self.entries.get(label_or_column) {
			return Some(path);
		}
		self.entries
			.values()
			.find(|path| path.as_str() == label_or_column)
			.map(String::as_str)
	}

	/// Whether `label` is registered
	pub fn contains(&self, label: &str) -> bool {
		self.entries.contains_key(label)
	}

	/// Number of registered labels
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether nothing is registered
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Labels and paths in registration order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(label, path)| (label.as_str(), path.as_str()))
	}
}
