//! REST client for the issue tracker server.

use super::error::{ApiError, ApiResult};
use super::{wire, IssueApi, HTTP_CLIENT};
use crate::config::Config;
use crate::data::{
    Comment, Issue, IssueId, IssueStatus, Label, LabelForm, LabelId, Milestone, MilestoneForm,
    MilestoneId, NewIssue, UserRef,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.server.base_url.clone(), config.server.token.clone())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = HTTP_CLIENT
            .request(method, self.url(path))
            .header("Accept", "application/json")
            .header("User-Agent", "issuedeck");
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Send a request and return the body of a 2xx response.
    async fn send(&self, builder: RequestBuilder, endpoint: &str) -> ApiResult<String> {
        let response = builder.send().await.map_err(|source| ApiError::Network {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} returned {}", endpoint, status);
            return Err(ApiError::from_status(endpoint, status.as_u16()));
        }

        response.text().await.map_err(|source| ApiError::Network {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn get<T>(
        &self,
        path: &str,
        parse: fn(&str) -> serde_json::Result<T>,
    ) -> ApiResult<T> {
        tracing::debug!("GET {}", path);
        let body = self.send(self.request(Method::GET, path), path).await?;
        decode(path, &body, parse)
    }

    async fn write<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<String> {
        tracing::debug!("{} {}", method, path);
        self.send(self.request(method, path).json(body), path).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        tracing::debug!("DELETE {}", path);
        self.send(self.request(Method::DELETE, path), path).await?;
        Ok(())
    }
}

fn decode<T>(
    endpoint: &str,
    body: &str,
    parse: fn(&str) -> serde_json::Result<T>,
) -> ApiResult<T> {
    parse(body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    is_open: bool,
}

#[async_trait]
impl IssueApi for ApiClient {
    async fn fetch_issues(&self, status: IssueStatus) -> ApiResult<Vec<Issue>> {
        let path = format!("/api/issues?status={}", status.as_query());
        self.get(&path, wire::parse_issues).await
    }

    async fn create_issue(&self, issue: &NewIssue) -> ApiResult<IssueId> {
        let path = "/api/issues";
        let body = self.write(Method::POST, path, issue).await?;
        decode(path, &body, wire::parse_created_issue)
    }

    async fn set_issue_status(&self, id: IssueId, status: IssueStatus) -> ApiResult<()> {
        let path = format!("/api/issues/{}/status", id);
        let body = StatusBody {
            is_open: status == IssueStatus::Open,
        };
        self.write(Method::PATCH, &path, &body).await?;
        Ok(())
    }

    async fn fetch_users(&self) -> ApiResult<Vec<UserRef>> {
        self.get("/api/users", wire::parse_users).await
    }

    async fn fetch_labels(&self) -> ApiResult<Vec<Label>> {
        self.get("/api/labels", wire::parse_labels).await
    }

    async fn create_label(&self, label: &LabelForm) -> ApiResult<()> {
        self.write(Method::POST, "/api/labels", label).await?;
        Ok(())
    }

    async fn update_label(&self, id: LabelId, label: &LabelForm) -> ApiResult<()> {
        let path = format!("/api/labels/{}", id);
        self.write(Method::PATCH, &path, label).await?;
        Ok(())
    }

    async fn delete_label(&self, id: LabelId) -> ApiResult<()> {
        self.delete(&format!("/api/labels/{}", id)).await
    }

    async fn fetch_milestones(&self) -> ApiResult<Vec<Milestone>> {
        self.get("/api/milestones", wire::parse_milestones).await
    }

    async fn create_milestone(&self, milestone: &MilestoneForm) -> ApiResult<()> {
        self.write(Method::POST, "/api/milestones", milestone).await?;
        Ok(())
    }

    async fn update_milestone(&self, id: MilestoneId, milestone: &MilestoneForm) -> ApiResult<()> {
        let path = format!("/api/milestones/{}", id);
        self.write(Method::PATCH, &path, milestone).await?;
        Ok(())
    }

    async fn delete_milestone(&self, id: MilestoneId) -> ApiResult<()> {
        self.delete(&format!("/api/milestones/{}", id)).await
    }

    async fn fetch_comments(&self, issue: IssueId) -> ApiResult<Vec<Comment>> {
        let path = format!("/api/issues/{}/comments", issue);
        self.get(&path, wire::parse_comments).await
    }

    async fn auth_status(&self) -> ApiResult<bool> {
        let path = "/api/auth";
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(|source| ApiError::Network {
                endpoint: path.to_string(),
                source,
            })?;
        Ok(response.status().as_u16() == 200)
    }
}
