//! Sort direction

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of an `ORDER BY` clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	/// Ascending
	#[default]
	Asc,
	/// Descending
	Desc,
}

impl SortDirection {
	/// The opposite direction
	pub fn reverse(self) -> Self {
		match self {
			SortDirection::Asc => SortDirection::Desc,
			SortDirection::Desc => SortDirection::Asc,
		}
	}

	/// Lowercase name as used in request parameters
	pub fn as_str(self) -> &'static str {
		match self {
			SortDirection::Asc => "asc",
			SortDirection::Desc => "desc",
		}
	}
}

impl FromStr for SortDirection {
	type Err = QueryError;

	/// Parse `asc` / `desc` case-insensitively
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"asc" => Ok(SortDirection::Asc),
			"desc" => Ok(SortDirection::Desc),
			_ => Err(QueryError::InvalidDirection(s.to_string())),
		}
	}
}

impl fmt::Display for SortDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SortDirection::Asc => f.write_str("ASC"),
			SortDirection::Desc => f.write_str("DESC"),
		}
	}
}

impl From<SortDirection> for sea_query::Order {
	fn from(direction: SortDirection) -> Self {
		match direction {
			SortDirection::Asc => sea_query::Order::Asc,
			SortDirection::Desc => sea_query::Order::Desc,
		}
	}
}
