use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::KnowledgeBaseConfig;
use crate::errors::RetrievalError;
use crate::results::SparqlResults;

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Executes a SPARQL SELECT and returns its bindings.
#[async_trait]
pub trait SparqlTransport: Send + Sync {
    async fn select(&self, query: &str) -> Result<SparqlResults, RetrievalError>;
}

/// HTTP GET transport against a SPARQL endpoint.
pub struct ReqwestTransport {
    client: Client,
    endpoint: Url,
    user_agent: String,
}

impl ReqwestTransport {
    pub fn new(config: &KnowledgeBaseConfig) -> Result<Self, RetrievalError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|err| {
            RetrievalError::invalid_input(format!("invalid endpoint {}: {err}", config.endpoint))
        })?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| RetrievalError::Transport(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            endpoint,
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SparqlTransport for ReqwestTransport {
    async fn select(&self, query: &str) -> Result<SparqlResults, RetrievalError> {
        debug!(endpoint = %self.endpoint, bytes = query.len(), "sparql select");
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("query", query)])
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response unavailable>".to_string());
            return Err(RetrievalError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| RetrievalError::Decode(err.to_string()))
    }
}
