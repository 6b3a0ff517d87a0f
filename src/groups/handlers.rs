use super::service::GroupService;
use super::types::{Group, GroupForm, Member, MemberForm};
use crate::error::ApiResult;
use crate::extract::Payload;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

pub async fn handle_list_groups(
    Extension(service): Extension<Arc<GroupService>>,
) -> ApiResult<Json<Vec<Group>>> {
    tracing::info!("Received a GET request for all groups");
    let groups = service.list().await?;
    tracing::debug!("Returned {} groups", groups.len());
    Ok(Json(groups))
}

pub async fn handle_get_group(
    Extension(service): Extension<Arc<GroupService>>,
    Path(group_id): Path<String>,
) -> ApiResult<Json<Group>> {
    tracing::info!("Received a GET request for group {}", group_id);
    let group = service.get(&group_id).await?;
    tracing::debug!("Returned data is: {:?}", group);
    Ok(Json(group))
}

pub async fn handle_get_member(
    Extension(service): Extension<Arc<GroupService>>,
    Path((group_id, member_id)): Path<(String, String)>,
) -> ApiResult<Json<Member>> {
    tracing::info!(
        "Received a GET request for member {} in group {}",
        member_id,
        group_id
    );
    let member = service.get_member(&group_id, &member_id).await?;
    Ok(Json(member))
}

pub async fn handle_add_group(
    Extension(service): Extension<Arc<GroupService>>,
    Payload(form): Payload<GroupForm>,
) -> ApiResult<Json<Group>> {
    tracing::info!("Received a POST request to add a group");
    tracing::debug!("BODY --------> {:?}", form);
    let group = service.add(form).await?;
    Ok(Json(group))
}

pub async fn handle_edit_group(
    Extension(service): Extension<Arc<GroupService>>,
    Path(group_id): Path<String>,
    Payload(form): Payload<GroupForm>,
) -> ApiResult<StatusCode> {
    tracing::info!("Received a PUT request to edit group {}", group_id);
    tracing::debug!("BODY --------> {:?}", form);
    service.edit(&group_id, form).await?;
    Ok(StatusCode::OK)
}

pub async fn handle_delete_group(
    Extension(service): Extension<Arc<GroupService>>,
    Path(group_id): Path<String>,
) -> ApiResult<StatusCode> {
    tracing::info!("Received a DELETE request for group {}", group_id);
    service.delete(&group_id).await?;
    Ok(StatusCode::OK)
}

pub async fn handle_add_member(
    Extension(service): Extension<Arc<GroupService>>,
    Path(group_id): Path<String>,
    Payload(form): Payload<MemberForm>,
) -> ApiResult<Json<Member>> {
    tracing::info!("Received a POST request to add a member to group {}", group_id);
    tracing::debug!("BODY --------> {:?}", form);
    let member = service.add_member(&group_id, form).await?;
    Ok(Json(member))
}

pub async fn handle_edit_member(
    Extension(service): Extension<Arc<GroupService>>,
    Path((group_id, member_id)): Path<(String, String)>,
    Payload(form): Payload<MemberForm>,
) -> ApiResult<StatusCode> {
    tracing::info!(
        "Received a PUT request to edit member {} in group {}",
        member_id,
        group_id
    );
    tracing::debug!("BODY --------> {:?}", form);
    service.edit_member(&group_id, &member_id, form).await?;
    Ok(StatusCode::OK)
}

pub async fn handle_delete_member(
    Extension(service): Extension<Arc<GroupService>>,
    Path((group_id, member_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    tracing::info!(
        "Received a DELETE request for member {} in group {}",
        member_id,
        group_id
    );
    service.delete_member(&group_id, &member_id).await?;
    Ok(StatusCode::OK)
}
