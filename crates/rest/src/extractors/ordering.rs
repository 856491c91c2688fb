//! `orderBy` parsing through a property mapping.
//!
//! Clients sort by the fields they see (`name`, `age`), which are not the
//! entity's own fields. The mapping translates each wire property into one or
//! more entity sort fields:
//!
//! | Property | Entity fields | Direction |
//! |----------|---------------|-----------|
//! | `id` | `id` | as given |
//! | `name` | `firstName`, `lastName` | as given |
//! | `age` | `dateOfBirth` | reversed |
//! | `mainCategory` | `mainCategory` | as given |
//!
//! ```
//! use courselib_persistence::types::{AuthorSortField, SortKey};
//! use courselib_rest::extractors::ordering::parse_order_by;
//!
//! let keys = parse_order_by("age desc").unwrap();
//! assert_eq!(keys, vec![SortKey::ascending(AuthorSortField::DateOfBirth)]);
//! ```

use courselib_persistence::types::{AuthorSortField, SortDirection, SortKey};
use thiserror::Error;

/// Errors raised while parsing an `orderBy` value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderByError {
    /// The list contains an empty clause.
    #[error("orderBy '{raw}' contains an empty clause")]
    EmptyClause {
        /// The raw value.
        raw: String,
    },

    /// No mapping exists for the property.
    #[error("cannot sort by '{property}'")]
    UnknownProperty {
        /// The property as given.
        property: String,
    },

    /// The direction is neither `asc` nor `desc`.
    #[error("invalid sort direction '{direction}' in '{clause}'")]
    InvalidDirection {
        /// The clause.
        clause: String,
        /// The direction as given.
        direction: String,
    },
}

struct PropertyMappingValue {
    property: &'static str,
    destinations: &'static [AuthorSortField],
    revert: bool,
}

const AUTHOR_PROPERTY_MAPPING: &[PropertyMappingValue] = &[
    PropertyMappingValue {
        property: "id",
        destinations: &[AuthorSortField::Id],
        revert: false,
    },
    PropertyMappingValue {
        property: "name",
        destinations: &[AuthorSortField::FirstName, AuthorSortField::LastName],
        revert: false,
    },
    PropertyMappingValue {
        property: "age",
        destinations: &[AuthorSortField::DateOfBirth],
        revert: true,
    },
    PropertyMappingValue {
        property: "mainCategory",
        destinations: &[AuthorSortField::MainCategory],
        revert: false,
    },
];

fn mapping_for(property: &str) -> Option<&'static PropertyMappingValue> {
    AUTHOR_PROPERTY_MAPPING
        .iter()
        .find(|m| m.property.eq_ignore_ascii_case(property))
}

/// Parses a comma-separated `orderBy` value into entity sort keys.
///
/// Each clause is `property [asc|desc]`. A blank value yields no keys.
pub fn parse_order_by(order_by: &str) -> Result<Vec<SortKey>, OrderByError> {
    if order_by.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut keys = Vec::new();
    for clause in order_by.split(',') {
        let clause = clause.trim();
        let mut parts = clause.split_whitespace();
        let Some(property) = parts.next() else {
            return Err(OrderByError::EmptyClause {
                raw: order_by.to_string(),
            });
        };

        let direction = match parts.next() {
            None => SortDirection::Ascending,
            Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Ascending,
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Descending,
            Some(d) => {
                return Err(OrderByError::InvalidDirection {
                    clause: clause.to_string(),
                    direction: d.to_string(),
                });
            }
        };
        if let Some(extra) = parts.next() {
            return Err(OrderByError::InvalidDirection {
                clause: clause.to_string(),
                direction: extra.to_string(),
            });
        }

        let mapping = mapping_for(property).ok_or_else(|| OrderByError::UnknownProperty {
            property: property.to_string(),
        })?;
        let direction = if mapping.revert {
            direction.reversed()
        } else {
            direction
        };

        keys.extend(
            mapping
                .destinations
                .iter()
                .map(|&field| SortKey { field, direction }),
        );
    }

    Ok(keys)
}

/// Returns true if every clause of `order_by` can be mapped.
pub fn has_mapping(order_by: &str) -> bool {
    parse_order_by(order_by).is_ok()
}
