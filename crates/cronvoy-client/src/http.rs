//! HTTP implementations of the scheduler and inventory contracts.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::wire::{
    AppListResponse, AttachScheduleBody, CreateJobBody, HistoryListResponse, JobListResponse,
    JobResource, ScheduleListResponse, ScheduleResource,
};
use crate::{AppInventory, ClientError, SchedulerClient};
use cronvoy_types::{
    ApplicationSummary, ExpressionType, Job, JobHistory, JobListPage, JobSchedule,
};

/// reqwest-backed client for the scheduler service's job API.
pub struct HttpSchedulerClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSchedulerClient {
    /// Create a new client for the given API root (e.g. `https://scheduler.sys.example.com/v1`).
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Decode a response body, treating an empty body on a success status as an
/// absent result rather than an error.
async fn read_optional<T: DeserializeOwned>(resp: Response) -> Result<Option<T>, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    let body = resp.text().await?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&body)?))
}

/// Like [`read_optional`] but for calls where only the status matters.
async fn read_ack(resp: Response) -> Result<(), ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(())
}

#[async_trait]
impl SchedulerClient for HttpSchedulerClient {
    async fn create_job(
        &self,
        application_id: &str,
        name: &str,
        command: &str,
    ) -> Result<Option<Job>, ClientError> {
        debug!(application_id, name, "creating job");
        let resp = self
            .request(Method::POST, "/jobs")
            .query(&[("app_guid", application_id)])
            .json(&CreateJobBody { name, command })
            .send()
            .await?;
        let resource: Option<JobResource> = read_optional(resp).await?;
        Ok(resource.map(Into::into))
    }

    async fn delete_job(&self, job_id: &str) -> Result<(), ClientError> {
        debug!(job_id, "deleting job");
        let resp = self
            .request(Method::DELETE, &format!("/jobs/{job_id}"))
            .send()
            .await?;
        read_ack(resp).await
    }

    async fn attach_schedule(
        &self,
        job_id: &str,
        expression: &str,
    ) -> Result<Option<JobSchedule>, ClientError> {
        debug!(job_id, expression, "attaching schedule");
        let resp = self
            .request(Method::PUT, &format!("/jobs/{job_id}/schedules"))
            .json(&AttachScheduleBody {
                enabled: true,
                expression,
                expression_type: ExpressionType::Cron,
            })
            .send()
            .await?;
        let resource: Option<ScheduleResource> = read_optional(resp).await?;
        Ok(resource.map(Into::into))
    }

    async fn list_jobs(&self, page: u32) -> Result<Option<JobListPage>, ClientError> {
        let resp = self
            .request(Method::GET, "/jobs")
            .query(&[("page", page)])
            .send()
            .await?;
        let body: Option<JobListResponse> = read_optional(resp).await?;
        Ok(body.map(|b| JobListPage {
            jobs: b.resources.into_iter().map(Into::into).collect(),
            total_pages: b.pagination.total_pages,
        }))
    }

    async fn list_schedules(&self, job_id: &str) -> Result<Vec<JobSchedule>, ClientError> {
        let resp = self
            .request(Method::GET, &format!("/jobs/{job_id}/schedules"))
            .send()
            .await?;
        let body: Option<ScheduleListResponse> = read_optional(resp).await?;
        Ok(body
            .map(|b| b.resources.into_iter().map(Into::into).collect())
            .unwrap_or_default())
    }

    async fn execute_job(&self, job_id: &str) -> Result<(), ClientError> {
        debug!(job_id, "executing job");
        let resp = self
            .request(Method::POST, &format!("/jobs/{job_id}/execute"))
            .send()
            .await?;
        read_ack(resp).await
    }

    async fn list_job_histories(&self, job_id: &str) -> Result<Vec<JobHistory>, ClientError> {
        let resp = self
            .request(Method::GET, &format!("/jobs/{job_id}/history"))
            .send()
            .await?;
        let body: Option<HistoryListResponse> = read_optional(resp).await?;
        Ok(body
            .map(|b| b.resources.into_iter().map(Into::into).collect())
            .unwrap_or_default())
    }
}

/// reqwest-backed client for the platform's application inventory.
pub struct HttpAppInventory {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpAppInventory {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl AppInventory for HttpAppInventory {
    async fn list_applications(&self) -> Result<Vec<ApplicationSummary>, ClientError> {
        let builder = self.client.get(format!("{}/apps", self.base_url));
        let builder = match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let resp = builder.send().await?;
        let body: Option<AppListResponse> = read_optional(resp).await?;
        Ok(body
            .map(|b| b.resources.into_iter().map(Into::into).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpSchedulerClient::new("https://scheduler.example.com/v1/", None);
        assert_eq!(api.base_url, "https://scheduler.example.com/v1");
    }

    #[test]
    fn test_inventory_base_url() {
        let inventory = HttpAppInventory::new("https://api.example.com/v3", Some("tok".into()));
        assert_eq!(inventory.base_url, "https://api.example.com/v3");
    }
}
