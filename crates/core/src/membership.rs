//! Project membership lists.
//!
//! Members are kept as an ordered list of user ids with two invariants:
//! no id appears twice, and the project creator is always present. The
//! creator sits first whenever the list is (re)built from a request.
//!
//! Two update paths exist and intentionally differ:
//!
//! - [`add_members`] appends ids that are not yet present and never removes.
//! - [`replace_members`] rebuilds the whole list from the requested ids,
//!   forcing the creator back in.

use crate::types::DbId;

/// Build the member list for a new project.
///
/// The creator comes first, followed by `requested` in request order with
/// duplicates and any repeat of the creator dropped.
pub fn normalize_members(creator_id: DbId, requested: &[DbId]) -> Vec<DbId> {
    let mut members = Vec::with_capacity(requested.len() + 1);
    members.push(creator_id);
    for &id in requested {
        if !members.contains(&id) {
            members.push(id);
        }
    }
    members
}

/// Append the ids from `new_ids` that are not already members.
///
/// Existing order is preserved and nothing is removed.
pub fn add_members(existing: &[DbId], new_ids: &[DbId]) -> Vec<DbId> {
    let mut members = existing.to_vec();
    for &id in new_ids {
        if !members.contains(&id) {
            members.push(id);
        }
    }
    members
}

/// Replace the member list with `requested`, keeping the creator.
///
/// Used by the creator-only project update. The creator is retained even
/// when omitted from `requested`.
pub fn replace_members(creator_id: DbId, requested: &[DbId]) -> Vec<DbId> {
    normalize_members(creator_id, requested)
}

/// Returns `true` if `user_id` appears in `members`.
///
/// Always pass the freshly loaded member list; results must not be cached
/// across requests.
pub fn is_member(members: &[DbId], user_id: DbId) -> bool {
    members.contains(&user_id)
}

/// Ids from `members` that do not appear in `known`, in list order.
pub fn unknown_ids(members: &[DbId], known: &[DbId]) -> Vec<DbId> {
    members
        .iter()
        .copied()
        .filter(|id| !known.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_dedupes_and_keeps_order() {
        let members = normalize_members(1, &[1, 7, 7, 9]);
        assert_eq!(members, vec![1, 7, 9]);
    }

    #[test]
    fn normalize_with_no_requested_ids_is_creator_only() {
        assert_eq!(normalize_members(5, &[]), vec![5]);
    }

    #[test]
    fn normalize_moves_creator_to_front() {
        assert_eq!(normalize_members(3, &[8, 3, 2]), vec![3, 8, 2]);
    }

    #[test]
    fn add_members_appends_only_new_ids() {
        let members = add_members(&[1, 4], &[4, 6, 6, 2]);
        assert_eq!(members, vec![1, 4, 6, 2]);
    }

    #[test]
    fn add_members_never_removes() {
        let members = add_members(&[1, 4, 9], &[]);
        assert_eq!(members, vec![1, 4, 9]);
    }

    #[test]
    fn replace_keeps_creator_when_omitted() {
        let members = replace_members(1, &[5, 6]);
        assert_eq!(members, vec![1, 5, 6]);
    }

    #[test]
    fn replace_drops_previous_members() {
        let before = vec![1, 2, 3];
        let after = replace_members(1, &[3]);
        assert!(is_member(&before, 2));
        assert!(!is_member(&after, 2));
        assert_eq!(after, vec![1, 3]);
    }

    #[test]
    fn is_member_checks_list() {
        assert!(is_member(&[1, 2], 2));
        assert!(!is_member(&[1, 2], 3));
        assert!(!is_member(&[], 1));
    }

    #[test]
    fn unknown_ids_reports_missing_in_order() {
        assert_eq!(unknown_ids(&[1, 9, 2, 8], &[1, 2]), vec![9, 8]);
        assert!(unknown_ids(&[1, 2], &[2, 1]).is_empty());
    }
}
