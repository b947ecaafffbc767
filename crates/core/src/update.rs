//! Falsy-coalescing for partial updates.
//!
//! Update requests treat an empty string or a zero id exactly like an absent
//! field: the stored value is kept. These helpers turn request fields into
//! the `Option`s the repositories coalesce against.

use crate::types::DbId;

/// `Some(text)` only when `text` is present and non-empty.
pub fn supplied_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// `Some(id)` only when `id` is present and non-zero.
pub fn supplied_id(value: Option<DbId>) -> Option<DbId> {
    value.filter(|&v| v != 0)
}

/// `Some(ids)` only when the list is present and non-empty.
pub fn supplied_ids(value: Option<Vec<DbId>>) -> Option<Vec<DbId>> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_not_supplied() {
        assert_eq!(supplied_text(Some(String::new())), None);
        assert_eq!(supplied_text(None), None);
        assert_eq!(supplied_text(Some("x".into())), Some("x".into()));
    }

    #[test]
    fn zero_id_is_not_supplied() {
        assert_eq!(supplied_id(Some(0)), None);
        assert_eq!(supplied_id(Some(7)), Some(7));
    }

    #[test]
    fn empty_id_list_is_not_supplied() {
        assert_eq!(supplied_ids(Some(vec![])), None);
        assert_eq!(supplied_ids(Some(vec![3])), Some(vec![3]));
    }
}
