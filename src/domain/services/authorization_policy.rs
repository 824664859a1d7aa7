//! Authorization policy domain service.
//!
//! Every predicate is total and takes already-resolved entities. Callers
//! check existence (and report "not found") before consulting the policy.

use crate::domain::entities::{Group, GroupPatch, InviteLink, Membership};

/// Domain service deciding whether an actor may perform a mutation.
pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    /// Members, and only members, may view a group and its members.
    ///
    /// `membership` is the actor's membership row in `group`, if any.
    pub fn can_view_group(actor_id: i64, group: &Group, membership: Option<&Membership>) -> bool {
        membership.is_some_and(|m| m.user_id == actor_id && m.group_id == group.id)
    }

    /// Only the creator may delete a group.
    pub fn can_delete_group(actor_id: i64, group: &Group) -> bool {
        group.is_creator(actor_id)
    }

    /// Group fields are editable by anyone reaching the operation, except the name.
    pub fn can_apply_patch(patch: &GroupPatch) -> bool {
        patch.name.is_none()
    }

    /// The creator may remove anyone; any user may remove themselves.
    pub fn can_remove_member(actor_id: i64, group: &Group, target_user_id: i64) -> bool {
        group.is_creator(actor_id) || actor_id == target_user_id
    }

    /// Same rule as member removal.
    pub fn can_set_nickname(actor_id: i64, group: &Group, target_user_id: i64) -> bool {
        Self::can_remove_member(actor_id, group, target_user_id)
    }

    /// Only the creator may create invites.
    pub fn can_create_invite(actor_id: i64, group: &Group) -> bool {
        group.is_creator(actor_id)
    }

    /// The group creator or the invite's creator may deactivate it.
    pub fn can_deactivate_invite(actor_id: i64, group: &Group, invite: &InviteLink) -> bool {
        group.is_creator(actor_id) || invite.created_by == actor_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewGroup;
    use chrono::NaiveDate;
    use test_case::test_case;

    const CREATOR: i64 = 1;
    const MEMBER: i64 = 2;
    const OUTSIDER: i64 = 3;

    fn test_group() -> Group {
        NewGroup {
            creator_id: CREATOR,
            name: "Book club".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            image: None,
            description: None,
        }
        .into_group(10)
    }

    #[test]
    fn test_only_members_can_view() {
        let group = test_group();
        let membership = Membership::new(group.id, MEMBER);
        let foreign = Membership::new(group.id + 1, MEMBER);

        assert!(AuthorizationPolicy::can_view_group(MEMBER, &group, Some(&membership)));
        assert!(!AuthorizationPolicy::can_view_group(MEMBER, &group, None));
        assert!(!AuthorizationPolicy::can_view_group(OUTSIDER, &group, Some(&membership)));
        assert!(!AuthorizationPolicy::can_view_group(MEMBER, &group, Some(&foreign)));
    }

    #[test_case(CREATOR, true ; "creator")]
    #[test_case(MEMBER, false ; "member")]
    #[test_case(OUTSIDER, false ; "outsider")]
    fn test_delete_and_invite_creation_are_creator_only(actor: i64, allowed: bool) {
        let group = test_group();
        assert_eq!(AuthorizationPolicy::can_delete_group(actor, &group), allowed);
        assert_eq!(AuthorizationPolicy::can_create_invite(actor, &group), allowed);
    }

    #[test_case(CREATOR, MEMBER, true ; "creator removes member")]
    #[test_case(MEMBER, MEMBER, true ; "member removes self")]
    #[test_case(OUTSIDER, MEMBER, false ; "outsider removes member")]
    #[test_case(MEMBER, CREATOR, false ; "member removes creator")]
    fn test_remove_and_nickname_rule(actor: i64, target: i64, allowed: bool) {
        let group = test_group();
        assert_eq!(AuthorizationPolicy::can_remove_member(actor, &group, target), allowed);
        assert_eq!(AuthorizationPolicy::can_set_nickname(actor, &group, target), allowed);
    }

    #[test_case(CREATOR, true ; "group creator")]
    #[test_case(MEMBER, true ; "invite creator")]
    #[test_case(OUTSIDER, false ; "outsider")]
    fn test_deactivate_invite(actor: i64, allowed: bool) {
        let group = test_group();
        let invite = InviteLink::new("code".into(), group.id, MEMBER, None);
        assert_eq!(AuthorizationPolicy::can_deactivate_invite(actor, &group, &invite), allowed);
    }

    #[test]
    fn test_name_changes_are_refused() {
        let rename = GroupPatch {
            name: Some("New name".into()),
            ..Default::default()
        };
        let describe = GroupPatch {
            description: Some("Updated".into()),
            ..Default::default()
        };

        assert!(!AuthorizationPolicy::can_apply_patch(&rename));
        assert!(AuthorizationPolicy::can_apply_patch(&describe));
    }
}
