use serde::{Deserialize, Serialize};

pub type FriendId = i64;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub friend_id: FriendId,
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Friend {
    pub fn phone(&self) -> Option<&str> {
        self.phone_number
            .as_deref()
            .map(str::trim)
            .filter(|number| !number.is_empty())
    }
}
