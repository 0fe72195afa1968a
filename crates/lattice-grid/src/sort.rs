//! Sort states and the sort cycle transition function.
//!
//! A column is always in exactly one of three [`SortDirection`]s. Clicking a
//! sortable header advances the column through a [`SortingOrder`]: the
//! column's own override, else the grid's, else the built-in
//! ascending → descending → none cycle.
//!
//! Configured cycles hold raw [`SortToken`]s exactly as they were written in
//! configuration, so an invalid entry is only rejected when a click would
//! actually select it.
//!
//! ```
//! use lattice_grid::sort::{next_sort_direction, SortDirection, SortingOrder};
//!
//! let order = SortingOrder::default();
//! let next = next_sort_direction(SortDirection::Unsorted, &order).unwrap();
//! assert_eq!(next, SortDirection::Ascending);
//! ```

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::ColumnDef;
use crate::error::SortCycleError;
use crate::options::GridOptions;

/// The sort state of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "SortToken", into = "SortToken")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
    /// Not sorted.
    #[default]
    Unsorted,
}

impl SortDirection {
    /// Configuration token for ascending.
    pub const ASC: &'static str = "asc";
    /// Configuration token for descending.
    pub const DESC: &'static str = "desc";
    /// Configuration token for unsorted (JSON `null` is accepted as well).
    pub const NONE: &'static str = "none";

    /// Whether this is a sorted (non-none) state.
    pub fn is_sorted(self) -> bool {
        self != Self::Unsorted
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str(Self::ASC),
            Self::Descending => f.write_str(Self::DESC),
            Self::Unsorted => f.write_str(Self::NONE),
        }
    }
}

impl TryFrom<SortToken> for SortDirection {
    type Error = SortCycleError;

    fn try_from(token: SortToken) -> Result<Self, Self::Error> {
        token
            .direction()
            .ok_or_else(|| SortCycleError::InvalidSortType(token.to_string()))
    }
}

/// One raw entry of a configured sort cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortToken(Value);

impl SortToken {
    /// Wraps a raw configuration value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The sort state this token names, or `None` if it names none of them.
    pub fn direction(&self) -> Option<SortDirection> {
        match &self.0 {
            Value::Null => Some(SortDirection::Unsorted),
            Value::String(s) => match s.as_str() {
                SortDirection::ASC => Some(SortDirection::Ascending),
                SortDirection::DESC => Some(SortDirection::Descending),
                SortDirection::NONE => Some(SortDirection::Unsorted),
                _ => None,
            },
            _ => None,
        }
    }
}

impl From<SortDirection> for SortToken {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => Self(Value::from(SortDirection::ASC)),
            SortDirection::Descending => Self(Value::from(SortDirection::DESC)),
            SortDirection::Unsorted => Self(Value::Null),
        }
    }
}

impl From<&str> for SortToken {
    fn from(raw: &str) -> Self {
        Self(Value::from(raw))
    }
}

impl fmt::Display for SortToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configured sort cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortingOrder {
    /// An ordered list of tokens, possibly containing invalid entries.
    Cycle(Vec<SortToken>),
    /// A configured value that is not a list.
    Malformed(Value),
}

static DEFAULT_SORTING_ORDER: LazyLock<SortingOrder> = LazyLock::new(SortingOrder::default);

impl Default for SortingOrder {
    fn default() -> Self {
        Self::from_directions([
            SortDirection::Ascending,
            SortDirection::Descending,
            SortDirection::Unsorted,
        ])
    }
}

impl SortingOrder {
    /// Builds a cycle from sort states.
    pub fn from_directions(directions: impl IntoIterator<Item = SortDirection>) -> Self {
        Self::Cycle(directions.into_iter().map(SortToken::from).collect())
    }

    /// Picks the cycle that applies to a column: its own override, else the
    /// grid's, else the built-in default.
    pub fn resolve<'a>(col_def: &'a ColumnDef, options: &'a GridOptions) -> &'a SortingOrder {
        col_def
            .sorting_order
            .as_ref()
            .or(options.sorting_order.as_ref())
            .unwrap_or(&DEFAULT_SORTING_ORDER)
    }
}

/// Computes the sort state following `current` in `order`.
///
/// The successor of the last entry, or of a state the cycle doesn't contain,
/// is the first entry.
///
/// # Errors
///
/// Fails when the cycle is empty or not a list, or when the selected entry is
/// not one of ascending/descending/none.
pub fn next_sort_direction(
    current: SortDirection,
    order: &SortingOrder,
) -> Result<SortDirection, SortCycleError> {
    let cycle = match order {
        SortingOrder::Cycle(cycle) => cycle,
        SortingOrder::Malformed(value) => {
            return Err(SortCycleError::NotASequence(value.to_string()));
        }
    };
    let Some(first) = cycle.first() else {
        return Err(SortCycleError::Empty);
    };

    let position = cycle
        .iter()
        .position(|token| token.direction() == Some(current));
    let next = match position {
        Some(index) if index + 1 < cycle.len() => &cycle[index + 1],
        _ => first,
    };

    SortDirection::try_from(next.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use SortDirection::{Ascending, Descending, Unsorted};

    #[test]
    fn test_default_cycle() {
        let order = SortingOrder::default();
        assert_eq!(next_sort_direction(Unsorted, &order), Ok(Ascending));
        assert_eq!(next_sort_direction(Ascending, &order), Ok(Descending));
        assert_eq!(next_sort_direction(Descending, &order), Ok(Unsorted));
    }

    #[test]
    fn test_absent_state_wraps_to_first() {
        let order = SortingOrder::from_directions([Descending, Ascending]);
        assert_eq!(next_sort_direction(Unsorted, &order), Ok(Descending));
        assert_eq!(next_sort_direction(Ascending, &order), Ok(Descending));
        assert_eq!(next_sort_direction(Descending, &order), Ok(Ascending));
    }

    #[test]
    fn test_single_entry_cycle() {
        let order = SortingOrder::from_directions([Ascending]);
        assert_eq!(next_sort_direction(Ascending, &order), Ok(Ascending));
    }

    #[test]
    fn test_empty_cycle_is_rejected() {
        let order = SortingOrder::Cycle(Vec::new());
        assert_eq!(next_sort_direction(Unsorted, &order), Err(SortCycleError::Empty));
    }

    #[test]
    fn test_non_sequence_is_rejected() {
        let order: SortingOrder = serde_json::from_value(json!("asc")).unwrap();
        assert!(matches!(order, SortingOrder::Malformed(_)));
        assert!(matches!(
            next_sort_direction(Unsorted, &order),
            Err(SortCycleError::NotASequence(_))
        ));
    }

    #[test]
    fn test_invalid_entry_rejected_only_when_selected() {
        let order: SortingOrder = serde_json::from_value(json!(["asc", "sideways"])).unwrap();
        assert_eq!(
            next_sort_direction(Ascending, &order),
            Err(SortCycleError::InvalidSortType("\"sideways\"".to_string()))
        );
        assert_eq!(next_sort_direction(Descending, &order), Ok(Ascending));
    }

    #[test]
    fn test_null_and_none_tokens_mean_unsorted() {
        let order: SortingOrder = serde_json::from_value(json!(["desc", null])).unwrap();
        assert_eq!(next_sort_direction(Descending, &order), Ok(Unsorted));

        let order: SortingOrder = serde_json::from_value(json!(["none", "asc"])).unwrap();
        assert_eq!(next_sort_direction(Unsorted, &order), Ok(Ascending));
    }

    #[test]
    fn test_sort_direction_serde() {
        let direction: SortDirection = serde_json::from_value(json!("desc")).unwrap();
        assert_eq!(direction, Descending);
        let direction: SortDirection = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(direction, Unsorted);
        assert!(serde_json::from_value::<SortDirection>(json!("up")).is_err());
        assert_eq!(serde_json::to_value(Ascending).unwrap(), json!("asc"));
    }

    #[test]
    fn test_resolve_precedence() {
        let grid = GridOptions {
            sorting_order: Some(SortingOrder::from_directions([Descending])),
            ..GridOptions::default()
        };
        let plain = ColumnDef::new("a");
        assert_eq!(
            SortingOrder::resolve(&plain, &grid),
            &SortingOrder::from_directions([Descending])
        );

        let overridden = ColumnDef {
            sorting_order: Some(SortingOrder::from_directions([Ascending])),
            ..ColumnDef::new("b")
        };
        assert_eq!(
            SortingOrder::resolve(&overridden, &grid),
            &SortingOrder::from_directions([Ascending])
        );

        assert_eq!(
            SortingOrder::resolve(&plain, &GridOptions::default()),
            &SortingOrder::default()
        );
    }
}
