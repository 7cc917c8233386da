use std::fmt;

use async_trait::async_trait;

use crate::models::friend::FriendId;
use crate::models::task::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    EditSchedule { task_id: TaskId },
    AddSchedule { friend_id: FriendId },
    AddFriend,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::EditSchedule { task_id } => write!(f, "EditScheduleScreen(taskId={})", task_id),
            Route::AddSchedule { friend_id } => write!(f, "AddScheduleScreen(friendId={})", friend_id),
            Route::AddFriend => write!(f, "AddFriendScreen"),
        }
    }
}

#[async_trait]
pub trait Platform: Send + Sync {
    async fn alert(&self, title: &str, message: &str);
    async fn navigate(&self, route: Route);
    async fn open_url(&self, url: &str) -> Result<(), String>;
}

pub fn call_url(phone: &str) -> String {
    format!("tel:{}", phone)
}

pub fn sms_url(phone: &str) -> String {
    format!("sms:{}", phone)
}
