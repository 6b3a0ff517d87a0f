use super::types::Organization;
use crate::error::{ApiError, ApiResult, MSG_ORGANIZATION_NOT_FOUND};
use crate::groups::Group;
use crate::storage::RecordStore;

/// Read-only view joining organizations with the groups that name them.
pub struct OrganizationDirectory {
    organizations: RecordStore<Organization>,
    groups: RecordStore<Group>,
}

impl OrganizationDirectory {
    pub fn new(organizations: RecordStore<Organization>, groups: RecordStore<Group>) -> Self {
        Self {
            organizations,
            groups,
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<Organization>> {
        Ok(self.organizations.load_all().await?)
    }

    /// Groups whose `OrganizationName` equals (ignoring case) the name of the
    /// organization with the given id. Unknown ids are a 404; a known
    /// organization without groups yields an empty list.
    pub async fn groups_for(&self, organization_id: &str) -> ApiResult<Vec<Group>> {
        let organizations = self.organizations.load_all().await?;
        let organization = organizations
            .iter()
            .find(|o| o.id_matches(organization_id))
            .ok_or(ApiError::NotFound(MSG_ORGANIZATION_NOT_FOUND))?;

        let wanted = organization.organization_name.to_lowercase();
        let groups = self
            .groups
            .load_all()
            .await?
            .into_iter()
            .filter(|g| g.organization_name.to_lowercase() == wanted)
            .collect();
        Ok(groups)
    }
}
