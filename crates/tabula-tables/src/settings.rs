//! Sorting settings
//!
//! A listing's sortable columns can be configured in TOML:
//!
//! ```toml
//! max_path_hops = 4
//!
//! [sortable]
//! Name = "City"
//! "Cheerleader Hat" = "Cheerleader.Hat.Colour"
//! ```

use crate::error::SettingsError;
use crate::sorting::{DEFAULT_MAX_PATH_HOPS, SortFieldRegistry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sortable columns of one listing and traversal limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortingSettings {
	/// Maximum number of relation hops in a sort path
	pub max_path_hops: usize,

	/// Display label to dotted relation path, in registration order
	pub sortable: IndexMap<String, String>,
}

impl Default for SortingSettings {
	fn default() -> Self {
		Self {
			max_path_hops: DEFAULT_MAX_PATH_HOPS,
			sortable: IndexMap::new(),
		}
	}
}

impl SortingSettings {
	/// Load settings from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if the file cannot be read or parsed.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let content = std::fs::read_to_string(path.as_ref()).map_err(|e| SettingsError::Io {
			path: path.as_ref().to_path_buf(),
			source: e,
		})?;

		Self::from_toml(&content)
	}

	/// Parse settings from a TOML string.
	pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
		toml::from_str(content).map_err(|e| SettingsError::Parse {
			message: e.to_string(),
		})
	}

	/// Build the registry of sortable columns
	///
	/// # Errors
	///
	/// [`SettingsError::Sort`] when a configured path is malformed.
	pub fn registry(&self) -> Result<SortFieldRegistry, SettingsError> {
		let mut registry = SortFieldRegistry::new();
		for (label, path) in &self.sortable {
			registry.register(label, path)?;
		}
		Ok(registry)
	}
}
