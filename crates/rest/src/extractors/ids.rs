//! Identifier list path segments.
//!
//! Author collections are addressed as `/api/authorcollections/(id1,id2)`.

use uuid::Uuid;

use crate::error::{RestError, RestResult};

/// Parses a single identifier path segment.
///
/// # Errors
///
/// `BadRequest` if the segment is not a UUID.
pub fn parse_id(raw: &str) -> RestResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| RestError::bad_request(format!("'{raw}' is not a valid id")))
}

/// Parses `(id1,id2,...)` into identifiers, keeping order.
///
/// The parentheses are optional. Whitespace around entries is ignored.
///
/// ```
/// use courselib_rest::extractors::ids::parse_id_list;
/// use uuid::Uuid;
///
/// let a = Uuid::new_v4();
/// let b = Uuid::new_v4();
/// let ids = parse_id_list(&format!("({a}, {b})")).unwrap();
/// assert_eq!(ids, vec![a, b]);
/// ```
///
/// # Errors
///
/// `BadRequest` if the list is empty or any entry is not a UUID.
pub fn parse_id_list(raw: &str) -> RestResult<Vec<Uuid>> {
    let raw = raw.trim();
    let inner = raw
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .unwrap_or(raw);

    if inner.trim().is_empty() {
        return Err(RestError::bad_request("The id list is empty"));
    }

    inner
        .split(',')
        .map(parse_id)
        .collect()
}

/// Formats identifiers as `(id1,id2,...)`.
pub fn format_id_list(ids: &[Uuid]) -> String {
    let joined = ids
        .iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("({joined})")
}
