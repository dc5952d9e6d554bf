use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::ExtractionError;
use crate::schema::{Company, CompanyId};

/// Question-answering service over a company's uploaded documents.
#[async_trait]
pub trait QaBackend: Send + Sync {
    /// Ask `question` about `company_id` and return the raw answer text.
    async fn ask(&self, question: &str, company_id: &CompanyId) -> Result<String, ExtractionError>;
}

/// Companies the operator may generate charts for.
#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<Company>, ExtractionError>;
}

#[derive(Clone)]
pub struct HttpQaClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

impl HttpQaClient {
    pub fn new(base_url: String, token: String, timeout: Duration) -> Result<Self, ExtractionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl QaBackend for HttpQaClient {
    async fn ask(&self, question: &str, company_id: &CompanyId) -> Result<String, ExtractionError> {
        let url = format!("{}/ask", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("X-Token", &self.token)
            .form(&[("question", question), ("company_id", company_id.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExtractionError::Transport(format!(
                "QA backend returned {}",
                response.status()
            )));
        }

        let body: AskResponse = response.json().await?;
        Ok(body.answer)
    }
}

#[async_trait]
impl CompanyDirectory for HttpQaClient {
    async fn list_companies(&self) -> Result<Vec<Company>, ExtractionError> {
        let url = format!("{}/companies", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("X-Token", &self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExtractionError::Transport(format!(
                "company directory returned {}",
                response.status()
            )));
        }

        let companies: Vec<Company> = response.json().await?;
        Ok(companies)
    }
}
