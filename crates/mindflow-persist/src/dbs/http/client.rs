#[cfg(feature = "http")]
use async_trait::async_trait;
#[cfg(feature = "http")]
use reqwest::{Client, RequestBuilder, Response, StatusCode};
#[cfg(feature = "http")]
use serde::Deserialize;

#[cfg(feature = "http")]
use mindflow_types::{NewThread, Thread, ThreadSummary, ThreadUpdate};

#[cfg(feature = "http")]
use crate::error::{PersistError, Result};
#[cfg(feature = "http")]
use crate::trait_client::ThreadStore;

/// Header carrying the authenticated owner id
pub const OWNER_HEADER: &str = "x-user-id";

#[cfg(feature = "http")]
#[derive(Deserialize)]
struct ThreadEnvelope {
    thread: Thread,
}

#[cfg(feature = "http")]
#[derive(Deserialize)]
struct ThreadListEnvelope {
    threads: Vec<ThreadSummary>,
}

#[cfg(feature = "http")]
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// `ThreadStore` backed by the MindFlow thread HTTP resource
#[cfg(feature = "http")]
#[derive(Clone)]
pub struct HttpThreadStore {
    base_url: String,
    client: Client,
}

#[cfg(feature = "http")]
impl HttpThreadStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn threads_url(&self) -> String {
        format!("{}/threads", self.base_url)
    }

    fn thread_url(&self, thread_id: &str) -> String {
        format!("{}/threads/{}", self.base_url, thread_id)
    }

    async fn send(&self, owner_id: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.header(OWNER_HEADER, owner_id).send().await?;
        Ok(response)
    }

    /// Turn a non-success response into the matching `PersistError`
    async fn error_for(response: Response, thread_id: &str, version: Option<u64>) -> PersistError {
        match (response.status(), version) {
            (StatusCode::NOT_FOUND, _) => PersistError::ThreadNotFound(thread_id.to_string()),
            (StatusCode::CONFLICT, Some(version)) => PersistError::StaleWrite {
                thread_id: thread_id.to_string(),
                version,
            },
            (StatusCode::CONFLICT, None) => PersistError::ThreadExists(thread_id.to_string()),
            _ => Self::api_error(response).await,
        }
    }

    /// `PersistError::Api` carrying the server's `{"error"}` message when it sent one
    async fn api_error(response: Response) -> PersistError {
        let status = response.status();
        let message = match response.json::<ErrorEnvelope>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        PersistError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl ThreadStore for HttpThreadStore {
    async fn create_thread(&self, owner_id: &str, new: NewThread) -> Result<Thread> {
        new.validate()?;
        let thread_id = new.thread_id.clone();
        let response = self
            .send(owner_id, self.client.post(self.threads_url()).json(&new))
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, &thread_id, None).await);
        }
        Ok(response.json::<ThreadEnvelope>().await?.thread)
    }

    async fn get_thread(&self, owner_id: &str, thread_id: &str) -> Result<Option<Thread>> {
        let response = self
            .send(owner_id, self.client.get(self.thread_url(thread_id)))
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<ThreadEnvelope>().await?.thread)),
            _ => Err(Self::error_for(response, thread_id, None).await),
        }
    }

    async fn list_threads(&self, owner_id: &str, limit: i64) -> Result<Vec<ThreadSummary>> {
        let request = self
            .client
            .get(self.threads_url())
            .query(&[("limit", limit)]);
        let response = self.send(owner_id, request).await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(response.json::<ThreadListEnvelope>().await?.threads)
    }

    async fn update_thread(
        &self,
        owner_id: &str,
        thread_id: &str,
        update: ThreadUpdate,
    ) -> Result<()> {
        let version = update.version;
        let response = self
            .send(owner_id, self.client.put(self.thread_url(thread_id)).json(&update))
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, thread_id, version).await);
        }
        Ok(())
    }

    async fn delete_thread(&self, owner_id: &str, thread_id: &str) -> Result<()> {
        let response = self
            .send(owner_id, self.client.delete(self.thread_url(thread_id)))
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, thread_id, None).await);
        }
        Ok(())
    }
}
