use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::friend::FriendId;

pub fn friends_url(base_url: &str) -> String {
    format!("{}/friendRequest/getFriends", base_url.trim_end_matches('/'))
}

pub fn tasks_url(base_url: &str, friend_id: FriendId, date: Option<NaiveDate>) -> String {
    let base = format!("{}/task/{}", base_url.trim_end_matches('/'), friend_id);
    match date {
        Some(day) => format!("{}?date={}", base, day.format("%Y-%m-%d")),
        None => base,
    }
}

pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    token: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    debug!(%url, "GET");
    let response = client
        .get(url)
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        debug!(%status, body = %text, "backend rejected request");
        return Err(format!("Request to {} failed with status {}", url, status).into());
    }

    let parsed: T = serde_json::from_str(&text).map_err(|e| {
        format!("Failed to parse JSON from {}: {}\nRaw body: {}", url, e, text)
    })?;
    Ok(parsed)
}
