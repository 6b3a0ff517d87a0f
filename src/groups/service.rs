//! Group and member operations.
//!
//! Every call re-reads the `groups` collection. Mutating calls hold the
//! collection lock from load to save so concurrent requests serialize instead
//! of overwriting each other.

use super::types::{Group, GroupForm, Member, MemberForm};
use super::validation::{validate_group, validate_group_edit, validate_member};
use crate::error::{
    ApiError, ApiResult, MSG_GROUP_AT_CAPACITY, MSG_GROUP_NOT_FOUND, MSG_GROUP_SIZE_TOO_SMALL,
    MSG_MEMBER_NOT_FOUND,
};
use crate::storage::records::{find_by_id, find_by_id_mut, remove_by_id};
use crate::storage::{CounterStore, IdSpace, RecordStore};

use std::sync::Arc;

pub struct GroupService {
    groups: RecordStore<Group>,
    counters: Arc<CounterStore>,
}

impl GroupService {
    pub fn new(groups: RecordStore<Group>, counters: Arc<CounterStore>) -> Self {
        Self { groups, counters }
    }

    pub async fn list(&self) -> ApiResult<Vec<Group>> {
        Ok(self.groups.load_all().await?)
    }

    pub async fn get(&self, group_id: &str) -> ApiResult<Group> {
        let groups = self.groups.load_all().await?;
        find_by_id(&groups, group_id)
            .cloned()
            .ok_or(ApiError::NotFound(MSG_GROUP_NOT_FOUND))
    }

    pub async fn get_member(&self, group_id: &str, member_id: &str) -> ApiResult<Member> {
        let group = self.get(group_id).await?;
        find_by_id(&group.members, member_id)
            .cloned()
            .ok_or(ApiError::NotFound(MSG_MEMBER_NOT_FOUND))
    }

    /// Creates a group with a fresh id and no members.
    pub async fn add(&self, form: GroupForm) -> ApiResult<Group> {
        let draft = validate_group(form)?;

        let _guard = self.groups.lock().await;
        let mut groups = self.groups.load_all().await?;

        let group_id = self.counters.next_id(IdSpace::Group).await?;
        let group = draft.into_group(group_id);
        groups.push(group.clone());
        self.groups.save_all(&groups).await?;

        tracing::info!("Group added: {} ({})", group.group_id, group.group_name);
        Ok(group)
    }

    /// Overwrites all mutable fields of an existing group.
    ///
    /// Shrinking `MaxGroupSize` below the current member count is a conflict and
    /// leaves the stored group untouched.
    pub async fn edit(&self, group_id: &str, form: GroupForm) -> ApiResult<()> {
        let draft = validate_group_edit(group_id, form)?;

        let _guard = self.groups.lock().await;
        let mut groups = self.groups.load_all().await?;

        let group =
            find_by_id_mut(&mut groups, group_id).ok_or(ApiError::NotFound(MSG_GROUP_NOT_FOUND))?;
        if (draft.max_group_size as usize) < group.members.len() {
            return Err(ApiError::Conflict(MSG_GROUP_SIZE_TOO_SMALL));
        }
        draft.apply_to(group);
        tracing::debug!("Update successful! New values: {:?}", group);

        self.groups.save_all(&groups).await?;
        Ok(())
    }

    /// Removes a group. Succeeds whether or not it existed; storage is only
    /// rewritten when something was removed.
    pub async fn delete(&self, group_id: &str) -> ApiResult<()> {
        let _guard = self.groups.lock().await;
        let mut groups = self.groups.load_all().await?;

        if remove_by_id(&mut groups, group_id) {
            self.groups.save_all(&groups).await?;
            tracing::info!("Group {} deleted", group_id);
        } else {
            tracing::debug!("Group {} already absent", group_id);
        }
        Ok(())
    }

    /// Appends a member with a fresh id, unless the group is at capacity.
    pub async fn add_member(&self, group_id: &str, form: MemberForm) -> ApiResult<Member> {
        let draft = validate_member(form)?;

        let _guard = self.groups.lock().await;
        let mut groups = self.groups.load_all().await?;

        let group =
            find_by_id_mut(&mut groups, group_id).ok_or(ApiError::NotFound(MSG_GROUP_NOT_FOUND))?;
        if group.is_full() {
            return Err(ApiError::Conflict(MSG_GROUP_AT_CAPACITY));
        }

        let member_id = self.counters.next_id(IdSpace::Member).await?;
        let member = draft.into_member(member_id);
        group.members.push(member.clone());

        self.groups.save_all(&groups).await?;
        tracing::info!("New member {} added to group {}", member.member_id, group_id);
        Ok(member)
    }

    pub async fn edit_member(
        &self,
        group_id: &str,
        member_id: &str,
        form: MemberForm,
    ) -> ApiResult<()> {
        let draft = validate_member(form)?;

        let _guard = self.groups.lock().await;
        let mut groups = self.groups.load_all().await?;

        let group =
            find_by_id_mut(&mut groups, group_id).ok_or(ApiError::NotFound(MSG_GROUP_NOT_FOUND))?;
        let member = find_by_id_mut(&mut group.members, member_id)
            .ok_or(ApiError::NotFound(MSG_MEMBER_NOT_FOUND))?;
        draft.apply_to(member);

        self.groups.save_all(&groups).await?;
        tracing::info!("Member {} in group {} updated", member_id, group_id);
        Ok(())
    }

    /// Removes a member from an existing group. A missing member is not an error.
    pub async fn delete_member(&self, group_id: &str, member_id: &str) -> ApiResult<()> {
        let _guard = self.groups.lock().await;
        let mut groups = self.groups.load_all().await?;

        let group =
            find_by_id_mut(&mut groups, group_id).ok_or(ApiError::NotFound(MSG_GROUP_NOT_FOUND))?;
        if remove_by_id(&mut group.members, member_id) {
            self.groups.save_all(&groups).await?;
            tracing::info!("Member {} removed from group {}", member_id, group_id);
        }
        Ok(())
    }
}
