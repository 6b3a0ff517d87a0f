use serde::{Deserialize, Serialize};

use crate::storage::Identified;

/// A sponsored group belonging to an organization (referenced by name).
///
/// `members.len() <= max_group_size` holds for every persisted group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Group {
    pub group_id: u64,
    pub group_name: String,
    pub organization_name: String,
    pub sponsor_name: String,
    pub sponsor_phone: String,
    pub sponsor_email: String,
    pub max_group_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Group {
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_group_size as usize
    }
}

impl Identified for Group {
    fn id(&self) -> u64 {
        self.group_id
    }
}

/// A person enrolled in exactly one group. Ids are unique within the parent group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Member {
    pub member_id: u64,
    pub member_email: String,
    pub member_name: String,
    pub member_phone: String,
}

impl Identified for Member {
    fn id(&self) -> u64 {
        self.member_id
    }
}

/// Form body of `POST /api/addgroups` and `PUT /api/groups/:id`.
///
/// Everything arrives as optional text; `validate_group` decides what is acceptable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupForm {
    pub group_id: Option<String>,
    pub group_name: Option<String>,
    pub organization_name: Option<String>,
    pub sponsor_name: Option<String>,
    pub sponsor_phone: Option<String>,
    pub sponsor_email: Option<String>,
    pub max_group_size: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Form body of the member create/edit endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemberForm {
    pub member_email: Option<String>,
    pub member_name: Option<String>,
    pub member_phone: Option<String>,
}

/// Group fields that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDraft {
    pub group_name: String,
    pub organization_name: String,
    pub sponsor_name: String,
    pub sponsor_phone: String,
    pub sponsor_email: String,
    pub max_group_size: u32,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl GroupDraft {
    pub fn into_group(self, group_id: u64) -> Group {
        Group {
            group_id,
            group_name: self.group_name,
            organization_name: self.organization_name,
            sponsor_name: self.sponsor_name,
            sponsor_phone: self.sponsor_phone,
            sponsor_email: self.sponsor_email,
            max_group_size: self.max_group_size,
            image: self.image,
            description: self.description,
            members: Vec::new(),
        }
    }

    /// Overwrites every mutable field. Id and members are left alone.
    pub fn apply_to(self, group: &mut Group) {
        group.group_name = self.group_name;
        group.organization_name = self.organization_name;
        group.sponsor_name = self.sponsor_name;
        group.sponsor_phone = self.sponsor_phone;
        group.sponsor_email = self.sponsor_email;
        group.max_group_size = self.max_group_size;
        group.image = self.image;
        group.description = self.description;
    }
}

/// Member fields that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDraft {
    pub member_email: String,
    pub member_name: String,
    pub member_phone: String,
}

impl MemberDraft {
    pub fn into_member(self, member_id: u64) -> Member {
        Member {
            member_id,
            member_email: self.member_email,
            member_name: self.member_name,
            member_phone: self.member_phone,
        }
    }

    pub fn apply_to(self, member: &mut Member) {
        member.member_email = self.member_email;
        member.member_name = self.member_name;
        member.member_phone = self.member_phone;
    }
}
