//! HTTP surface of the registry.
//!
//! Wires the services onto their endpoints. Services are shared with handlers
//! through `Extension` layers; every handler re-reads storage on each call.

use axum::Router;
use axum::extract::Extension;
use axum::routing::{get, post};
use std::sync::Arc;

use crate::groups::handlers::{
    handle_add_group, handle_add_member, handle_delete_group, handle_delete_member,
    handle_edit_group, handle_edit_member, handle_get_group, handle_get_member,
    handle_list_groups,
};
use crate::groups::GroupService;
use crate::organizations::handlers::{handle_groups_by_organization, handle_list_organizations};
use crate::organizations::OrganizationDirectory;
use crate::storage::{
    COLLECTION_GROUPS, COLLECTION_ORGANIZATIONS, COLLECTION_USERS, CounterStore, RecordStore,
    StorageBackend,
};
use crate::users::handlers::{handle_login, handle_register, handle_username_available};
use crate::users::UserService;

// --- API Endpoints ---

pub const ENDPOINT_ORGANIZATIONS: &str = "/api/organizations";
pub const ENDPOINT_GROUPS: &str = "/api/groups";
pub const ENDPOINT_GROUP: &str = "/api/groups/:id";
pub const ENDPOINT_GROUPS_BY_ORGANIZATION: &str = "/api/groups/byorganization/:id";
pub const ENDPOINT_ADD_GROUP: &str = "/api/addgroups";
pub const ENDPOINT_GROUP_MEMBERS: &str = "/api/groups/:id/members";
pub const ENDPOINT_GROUP_MEMBER: &str = "/api/groups/:id/members/:member_id";
pub const ENDPOINT_USERNAME_AVAILABLE: &str = "/api/username_available/:username";
pub const ENDPOINT_USERS: &str = "/api/users";
pub const ENDPOINT_LOGIN: &str = "/api/login";

/// The services behind the API, all sharing one storage backend.
#[derive(Clone)]
pub struct Services {
    pub organizations: Arc<OrganizationDirectory>,
    pub groups: Arc<GroupService>,
    pub users: Arc<UserService>,
}

impl Services {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let counters = Arc::new(CounterStore::new(backend.clone()));
        // One store per collection; clones share its write lock.
        let groups = RecordStore::new(backend.clone(), COLLECTION_GROUPS);

        Self {
            organizations: Arc::new(OrganizationDirectory::new(
                RecordStore::new(backend.clone(), COLLECTION_ORGANIZATIONS),
                groups.clone(),
            )),
            groups: Arc::new(GroupService::new(groups, counters.clone())),
            users: Arc::new(UserService::new(
                RecordStore::new(backend, COLLECTION_USERS),
                counters,
            )),
        }
    }
}

pub fn build_router(services: Services) -> Router {
    Router::new()
        .route(ENDPOINT_ORGANIZATIONS, get(handle_list_organizations))
        .route(ENDPOINT_GROUPS, get(handle_list_groups))
        .route(
            ENDPOINT_GROUP,
            get(handle_get_group)
                .put(handle_edit_group)
                .delete(handle_delete_group),
        )
        .route(
            ENDPOINT_GROUPS_BY_ORGANIZATION,
            get(handle_groups_by_organization),
        )
        .route(ENDPOINT_ADD_GROUP, post(handle_add_group))
        .route(ENDPOINT_GROUP_MEMBERS, post(handle_add_member))
        .route(
            ENDPOINT_GROUP_MEMBER,
            get(handle_get_member)
                .put(handle_edit_member)
                .delete(handle_delete_member),
        )
        .route(ENDPOINT_USERNAME_AVAILABLE, get(handle_username_available))
        .route(ENDPOINT_USERS, post(handle_register))
        .route(ENDPOINT_LOGIN, post(handle_login))
        .layer(Extension(services.organizations))
        .layer(Extension(services.groups))
        .layer(Extension(services.users))
}
