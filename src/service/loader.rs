use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::config::Locale;
use crate::models::friend::{Friend, FriendId};
use crate::models::task::Task;
use crate::service::backend_service::{CareBackend, LoadError};
use crate::service::platform::Platform;
use crate::service::session_store::SessionStore;
use crate::strings::strings;

#[derive(Clone)]
pub struct ScreenContext {
    pub backend: Arc<dyn CareBackend>,
    pub session: Arc<dyn SessionStore>,
    pub platform: Arc<dyn Platform>,
    pub locale: Locale,
}

impl ScreenContext {
    pub fn new(
        backend: Arc<dyn CareBackend>,
        session: Arc<dyn SessionStore>,
        platform: Arc<dyn Platform>,
    ) -> Self {
        Self {
            backend,
            session,
            platform,
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    async fn require_token(&self) -> Result<String, LoadError> {
        match self.session.token() {
            Some(token) => Ok(token),
            None => {
                let text = strings(self.locale);
                self.platform.alert(text.error_title, text.missing_token).await;
                Err(LoadError::MissingToken)
            }
        }
    }

    pub async fn fetch_friends(&self) -> Result<Vec<Friend>, LoadError> {
        let token = self.require_token().await?;
        match self.backend.get_friends(&token).await {
            Ok(friends) => {
                info!(count = friends.len(), "loaded friends");
                Ok(friends)
            }
            Err(e) => {
                error!(error = %e, "failed to load friends");
                Err(LoadError::Request(e.to_string()))
            }
        }
    }

    pub async fn fetch_tasks(
        &self,
        friend_id: FriendId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Task>, LoadError> {
        let token = self.require_token().await?;
        match self.backend.get_tasks(&token, friend_id, date).await {
            Ok(tasks) => {
                info!(friend_id, count = tasks.len(), ?date, "loaded tasks");
                Ok(tasks)
            }
            Err(e) => {
                error!(friend_id, error = %e, "failed to load tasks");
                Err(LoadError::Request(e.to_string()))
            }
        }
    }
}
