use super::member::{Member, MemberId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<Member>,
    /// Removed members. Expenses logged before removal still reference them.
    #[serde(default)]
    pub former_members: Vec<Member>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    /// Settled groups are archived and take no new expenses.
    #[serde(default)]
    pub is_settled: bool,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub settled_at: Option<DateTime<Utc>>,
}

impl Group {
    pub fn member(&self, member_id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == *member_id)
    }

    pub fn has_member(&self, member_id: &MemberId) -> bool {
        self.member(member_id).is_some()
    }

    /// Current and former members, current first.
    pub fn all_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().chain(self.former_members.iter())
    }
}
