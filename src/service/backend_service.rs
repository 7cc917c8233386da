use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::clients::backend_client;
use crate::models::friend::{Friend, FriendId};
use crate::models::task::Task;

#[async_trait]
pub trait CareBackend: Send + Sync {
    async fn get_friends(
        &self,
        token: &str,
    ) -> Result<Vec<Friend>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_tasks(
        &self,
        token: &str,
        friend_id: FriendId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Task>, Box<dyn std::error::Error + Send + Sync>>;
}

pub struct HttpCareBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCareBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CareBackend for HttpCareBackend {
    async fn get_friends(
        &self,
        token: &str,
    ) -> Result<Vec<Friend>, Box<dyn std::error::Error + Send + Sync>> {
        let url = backend_client::friends_url(&self.base_url);
        backend_client::get_json(&self.client, &url, token).await
    }

    async fn get_tasks(
        &self,
        token: &str,
        friend_id: FriendId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Task>, Box<dyn std::error::Error + Send + Sync>> {
        let url = backend_client::tasks_url(&self.base_url, friend_id, date);
        backend_client::get_json(&self.client, &url, token).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    MissingToken,
    Request(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MissingToken => write!(f, "session token not found"),
            LoadError::Request(reason) => write!(f, "backend request failed: {}", reason),
        }
    }
}

impl std::error::Error for LoadError {}
