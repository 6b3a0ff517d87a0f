use super::service::UserService;
use super::types::{Availability, AvailabilityResponse, LoginForm, RegistrationForm, UserProfile};
use crate::error::ApiResult;
use crate::extract::Payload;

use axum::extract::{Extension, Path};
use axum::Json;
use std::sync::Arc;

pub async fn handle_username_available(
    Extension(service): Extension<Arc<UserService>>,
    Path(username): Path<String>,
) -> ApiResult<Json<AvailabilityResponse>> {
    tracing::info!("Checking to see if username {} is available", username);
    let available = if service.username_available(&username).await? {
        Availability::Yes
    } else {
        Availability::No
    };
    tracing::debug!("Is username available? {:?}", available);
    Ok(Json(AvailabilityResponse { available }))
}

pub async fn handle_register(
    Extension(service): Extension<Arc<UserService>>,
    Payload(form): Payload<RegistrationForm>,
) -> ApiResult<Json<UserProfile>> {
    tracing::info!(
        "Received a POST request to add user {:?}",
        form.username.as_deref().unwrap_or_default()
    );
    let profile = service.register(form).await?;
    Ok(Json(profile))
}

pub async fn handle_login(
    Extension(service): Extension<Arc<UserService>>,
    Payload(form): Payload<LoginForm>,
) -> ApiResult<Json<UserProfile>> {
    tracing::info!(
        "Received a POST request for user {:?} to login",
        form.username.as_deref().unwrap_or_default()
    );
    let profile = service.login(form).await?;
    Ok(Json(profile))
}
