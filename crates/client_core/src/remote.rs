//! Adapter for the remote user collection.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use shared::{
    domain::{NewUserRecord, UserId, UserRecord},
    protocol::{CreateUserRequest, RemoteUser, UpdateUserRequest},
};
use tracing::debug;
use url::Url;

use crate::error::RemoteError;

/// Four independently fallible round trips. Implementations hold no roster state.
///
/// Write echoes are not trusted: any success status counts, and `create` only reports the
/// id the remote claims to have assigned, when its body carries one.
#[async_trait]
pub trait RemoteUserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<UserRecord>, RemoteError>;
    async fn create(&self, record: &NewUserRecord) -> Result<Option<UserId>, RemoteError>;
    async fn update(&self, id: UserId, record: &UserRecord) -> Result<(), RemoteError>;
    async fn delete(&self, id: UserId) -> Result<(), RemoteError>;
}

#[derive(Deserialize)]
struct IdEcho {
    id: Option<UserId>,
}

/// REST implementation. No timeout and no retry are configured.
pub struct HttpUserStore {
    http: Client,
    base_url: String,
}

impl HttpUserStore {
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        let base_url = base_url.trim().trim_end_matches('/');
        Url::parse(base_url).map_err(|source| RemoteError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            http: Client::new(),
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: UserId) -> String {
        format!("{}/users/{}", self.base_url, id.0)
    }
}

async fn send(request: RequestBuilder, url: &str) -> Result<Response, RemoteError> {
    let response = request
        .send()
        .await
        .map_err(|source| RemoteError::Transport {
            url: url.to_string(),
            source,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Rejected {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: Response,
    url: &str,
) -> Result<T, RemoteError> {
    response
        .json()
        .await
        .map_err(|source| RemoteError::Transport {
            url: url.to_string(),
            source,
        })
}

#[async_trait]
impl RemoteUserStore for HttpUserStore {
    async fn list(&self) -> Result<Vec<UserRecord>, RemoteError> {
        let url = self.users_url();
        let response = send(self.http.get(&url), &url).await?;
        let users: Vec<RemoteUser> = decode(response, &url).await?;
        Ok(users.into_iter().map(UserRecord::from).collect())
    }

    async fn create(&self, record: &NewUserRecord) -> Result<Option<UserId>, RemoteError> {
        let url = self.users_url();
        let body = CreateUserRequest::from(record);
        let response = send(self.http.post(&url).json(&body), &url).await?;
        // Unreadable or unexpected echo bodies still count as success.
        let echoed = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<IdEcho>(&bytes)
                .ok()
                .and_then(|echo| echo.id),
            Err(err) => {
                debug!(%err, url = %url, "could not read create echo");
                None
            }
        };
        Ok(echoed)
    }

    async fn update(&self, id: UserId, record: &UserRecord) -> Result<(), RemoteError> {
        let url = self.user_url(id);
        let body = UpdateUserRequest::from(UserRecord {
            id,
            ..record.clone()
        });
        send(self.http.put(&url).json(&body), &url).await?;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), RemoteError> {
        let url = self.user_url(id);
        send(self.http.delete(&url), &url).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
