use std::{env, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::ForgeConfig,
    forge::{
        error::{ForgeError, decode_error, internal_error, remote_status, request_failed},
        ports::ForgeClientPort,
        types::{CombinedStatus, PullRequest, Repo, Status},
    },
};

const USER_AGENT: &str = concat!("skipper/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct CommentPayload<'a> {
    body: &'a str,
}

/// Forge REST adapter. Authenticates with a bearer token read once from the
/// environment variable named in config; an absent token means anonymous
/// requests.
pub struct RestForgeClient {
    http: Client,
    api_base: String,
    token: Option<String>,
}

impl RestForgeClient {
    pub fn from_config(config: &ForgeConfig) -> Result<Self, ForgeError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| internal_error(format!("failed to build http client: {err}")))?;

        let token = env::var(&config.token_env)
            .ok()
            .filter(|value| !value.trim().is_empty());

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn pull_request_url(&self, repo: &Repo, number: u64) -> String {
        format!("{}/repos/{}/pulls/{}", self.api_base, repo.full_name(), number)
    }

    fn combined_status_url(&self, repo: &Repo, sha: &str) -> String {
        format!(
            "{}/repos/{}/commits/{}/status",
            self.api_base,
            repo.full_name(),
            sha
        )
    }

    fn create_status_url(&self, repo: &Repo, sha: &str) -> String {
        format!("{}/repos/{}/statuses/{}", self.api_base, repo.full_name(), sha)
    }

    fn create_comment_url(&self, repo: &Repo, number: u64) -> String {
        format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_base,
            repo.full_name(),
            number
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, ForgeError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|err| request_failed(format!("{what}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(remote_status(format!("{what}: forge answered {status}")));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, ForgeError> {
        response
            .json::<T>()
            .await
            .map_err(|err| decode_error(format!("{what}: invalid response body: {err}")))
    }
}

#[async_trait]
impl ForgeClientPort for RestForgeClient {
    async fn pull_request(&self, repo: &Repo, number: u64) -> Result<PullRequest, ForgeError> {
        let what = format!("get pull request {repo}#{number}");
        let response = self
            .send(self.http.get(self.pull_request_url(repo, number)), &what)
            .await?;
        Self::decode(response, &what).await
    }

    async fn combined_status(&self, repo: &Repo, sha: &str) -> Result<CombinedStatus, ForgeError> {
        let what = format!("get combined status for {repo}@{sha}");
        let response = self
            .send(self.http.get(self.combined_status_url(repo, sha)), &what)
            .await?;
        Self::decode(response, &what).await
    }

    async fn create_status(
        &self,
        repo: &Repo,
        sha: &str,
        status: Status,
    ) -> Result<(), ForgeError> {
        let what = format!("create status {} for {repo}@{sha}", status.context);
        self.send(
            self.http.post(self.create_status_url(repo, sha)).json(&status),
            &what,
        )
        .await?;
        Ok(())
    }

    async fn create_comment(&self, repo: &Repo, number: u64, body: &str) -> Result<(), ForgeError> {
        let what = format!("create comment on {repo}#{number}");
        self.send(
            self.http
                .post(self.create_comment_url(repo, number))
                .json(&CommentPayload { body }),
            &what,
        )
        .await?;
        Ok(())
    }
}
