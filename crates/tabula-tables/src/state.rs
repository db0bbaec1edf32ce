//! Requested sort state

use crate::error::SortResult;
use serde::{Deserialize, Serialize};
use tabula_query::SortDirection;

/// Column and direction requested for a list view
///
/// `column` is a registered label or path; `None` leaves the list unsorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
	/// Requested sort column
	pub column: Option<String>,
	/// Requested direction
	#[serde(default)]
	pub direction: SortDirection,
}

impl SortState {
	/// Sort by `column` in `direction`
	pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			column: Some(column.into()),
			direction,
		}
	}

	/// No sort requested
	pub fn unsorted() -> Self {
		Self::default()
	}

	/// Build the state from raw request parameters
	///
	/// A blank column means no sort, a missing direction means ascending.
	/// The direction is matched case-insensitively.
	///
	/// # Errors
	///
	/// [`SortError::Query`](crate::SortError::Query) wrapping
	/// `InvalidDirection` for anything but `asc` or `desc`.
	pub fn from_params(column: Option<&str>, direction: Option<&str>) -> SortResult<Self> {
		let direction = match direction {
			Some(raw) => raw.parse::<SortDirection>()?,
			None => SortDirection::default(),
		};
		let column = column
			.map(str::trim)
			.filter(|column| !column.is_empty())
			.map(str::to_string);
		Ok(Self { column, direction })
	}

	/// Whether a column was requested
	pub fn is_sorted(&self) -> bool {
		self.column.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SortError;
	use rstest::rstest;
	use tabula_query::QueryError;

	#[rstest]
	#[case(Some("City"), Some("asc"), Some("City"), SortDirection::Asc)]
	#[case(Some("City"), Some("DESC"), Some("City"), SortDirection::Desc)]
	#[case(Some(" City "), None, Some("City"), SortDirection::Asc)]
	#[case(Some("   "), Some("desc"), None, SortDirection::Desc)]
	#[case(None, None, None, SortDirection::Asc)]
	fn test_from_params(
		#[case] column: Option<&str>,
		#[case] direction: Option<&str>,
		#[case] expected_column: Option<&str>,
		#[case] expected_direction: SortDirection,
	) {
		let state = SortState::from_params(column, direction).unwrap();

		assert_eq!(state.column.as_deref(), expected_column);
		assert_eq!(state.direction, expected_direction);
	}

	#[rstest]
	fn test_from_params_rejects_direction() {
		let err = SortState::from_params(Some("City"), Some("sideways")).unwrap_err();

		assert_eq!(
			err,
			SortError::Query(QueryError::InvalidDirection("sideways".to_string()))
		);
		assert!(err.is_recoverable());
	}

	#[rstest]
	fn test_unsorted() {
		assert!(!SortState::unsorted().is_sorted());
		assert!(SortState::new("City", SortDirection::Desc).is_sorted());
	}
}
