use super::service::OrganizationDirectory;
use super::types::Organization;
use crate::error::ApiResult;
use crate::groups::Group;

use axum::extract::{Extension, Path};
use axum::Json;
use std::sync::Arc;

pub async fn handle_list_organizations(
    Extension(directory): Extension<Arc<OrganizationDirectory>>,
) -> ApiResult<Json<Vec<Organization>>> {
    tracing::info!("Received a GET request for all organizations");
    let organizations = directory.list().await?;
    tracing::debug!("Returned {} organizations", organizations.len());
    Ok(Json(organizations))
}

pub async fn handle_groups_by_organization(
    Extension(directory): Extension<Arc<OrganizationDirectory>>,
    Path(organization_id): Path<String>,
) -> ApiResult<Json<Vec<Group>>> {
    tracing::info!(
        "Received a GET request for groups in organization {}",
        organization_id
    );
    let groups = directory.groups_for(&organization_id).await?;
    tracing::debug!("Returned {} groups", groups.len());
    Ok(Json(groups))
}
