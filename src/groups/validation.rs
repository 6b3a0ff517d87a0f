//! Payload validation for groups and members.
//!
//! Checks run in a fixed order and stop at the first failure, so a payload with
//! several problems always reports the same reason code. Validation is pure and
//! runs before any id is issued or any collection is touched.

use super::types::{GroupDraft, GroupForm, MemberDraft, MemberForm};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRejection {
    MissingGroupName = 1,
    MissingOrganizationName = 2,
    MissingSponsorName = 3,
    MissingSponsorPhone = 4,
    MissingSponsorEmail = 5,
    InvalidMaxGroupSize = 6,
    /// Edit only: body `GroupId` disagrees with the path.
    GroupIdMismatch = 7,
}

impl GroupRejection {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn reason(self) -> &'static str {
        match self {
            GroupRejection::MissingGroupName => "GroupName is missing or empty",
            GroupRejection::MissingOrganizationName => "OrganizationName is missing or empty",
            GroupRejection::MissingSponsorName => "SponsorName is missing or empty",
            GroupRejection::MissingSponsorPhone => "SponsorPhone is missing or empty",
            GroupRejection::MissingSponsorEmail => "SponsorEmail is missing or empty",
            GroupRejection::InvalidMaxGroupSize => "MaxGroupSize is missing or not a number",
            GroupRejection::GroupIdMismatch => "GroupId does not match the request path",
        }
    }
}

impl From<GroupRejection> for ApiError {
    fn from(rejection: GroupRejection) -> Self {
        ApiError::Validation {
            code: rejection.code(),
            reason: rejection.reason(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRejection {
    MissingMemberEmail = 1,
    MissingMemberName = 2,
    MissingMemberPhone = 3,
}

impl MemberRejection {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn reason(self) -> &'static str {
        match self {
            MemberRejection::MissingMemberEmail => "MemberEmail is missing or empty",
            MemberRejection::MissingMemberName => "MemberName is missing or empty",
            MemberRejection::MissingMemberPhone => "MemberPhone is missing or empty",
        }
    }
}

impl From<MemberRejection> for ApiError {
    fn from(rejection: MemberRejection) -> Self {
        ApiError::Validation {
            code: rejection.code(),
            reason: rejection.reason(),
        }
    }
}

/// Keeps the value only if it has non-whitespace content.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_group_size(value: Option<&str>) -> Option<u32> {
    value?.trim().parse::<u32>().ok()
}

pub fn validate_group(form: GroupForm) -> Result<GroupDraft, GroupRejection> {
    let group_name = required(form.group_name).ok_or(GroupRejection::MissingGroupName)?;
    let organization_name =
        required(form.organization_name).ok_or(GroupRejection::MissingOrganizationName)?;
    let sponsor_name = required(form.sponsor_name).ok_or(GroupRejection::MissingSponsorName)?;
    let sponsor_phone = required(form.sponsor_phone).ok_or(GroupRejection::MissingSponsorPhone)?;
    let sponsor_email = required(form.sponsor_email).ok_or(GroupRejection::MissingSponsorEmail)?;
    let max_group_size = parse_group_size(form.max_group_size.as_deref())
        .ok_or(GroupRejection::InvalidMaxGroupSize)?;

    Ok(GroupDraft {
        group_name,
        organization_name,
        sponsor_name,
        sponsor_phone,
        sponsor_email,
        max_group_size,
        image: form.image,
        description: form.description,
    })
}

/// `validate_group` plus the edit-only rule that a body `GroupId`, when sent,
/// must name the group addressed by the path.
pub fn validate_group_edit(path_id: &str, form: GroupForm) -> Result<GroupDraft, GroupRejection> {
    let body_id = form.group_id.clone();
    let draft = validate_group(form)?;

    match body_id.as_deref().map(str::trim) {
        None | Some("") => Ok(draft),
        Some(id) if id == path_id => Ok(draft),
        Some(_) => Err(GroupRejection::GroupIdMismatch),
    }
}

pub fn validate_member(form: MemberForm) -> Result<MemberDraft, MemberRejection> {
    let member_email = required(form.member_email).ok_or(MemberRejection::MissingMemberEmail)?;
    let member_name = required(form.member_name).ok_or(MemberRejection::MissingMemberName)?;
    let member_phone = required(form.member_phone).ok_or(MemberRejection::MissingMemberPhone)?;

    Ok(MemberDraft {
        member_email,
        member_name,
        member_phone,
    })
}
