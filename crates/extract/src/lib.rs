pub mod error;
pub mod normalizer;
pub mod parser;
pub mod prompt;
pub mod qa;
pub mod schema;

pub use error::ExtractionError;
pub use normalizer::normalize_snapshot;
pub use parser::{extract_payload, SpanStrategy};
pub use prompt::build_extraction_request;
pub use qa::{CompanyDirectory, HttpQaClient, QaBackend};
pub use schema::{Company, CompanyId, ExtractionRequest, FinancialSnapshot, Metric};

use std::sync::Arc;

/// Parse and validate a raw QA answer into a snapshot.
pub fn snapshot_from_answer(
    answer: &str,
    strategy: SpanStrategy,
) -> Result<FinancialSnapshot, ExtractionError> {
    let payload = extract_payload(answer, strategy)?;
    normalize_snapshot(&payload)
}

/// Runs one chart-generation extraction against a QA backend.
#[derive(Clone)]
pub struct Extractor {
    backend: Arc<dyn QaBackend>,
    strategy: SpanStrategy,
}

impl Extractor {
    pub fn new(backend: Arc<dyn QaBackend>, strategy: SpanStrategy) -> Self {
        Self { backend, strategy }
    }

    pub fn strategy(&self) -> SpanStrategy {
        self.strategy
    }

    /// Ask the backend for the balance-sheet payload of `company_id` and turn
    /// the answer into a snapshot.
    pub async fn extract_snapshot(
        &self,
        company_id: &CompanyId,
    ) -> Result<FinancialSnapshot, ExtractionError> {
        let request = build_extraction_request(company_id);

        let answer = self
            .backend
            .ask(&request.instruction_text, &request.company_id)
            .await
            .inspect_err(|e| tracing::warn!(company_id = %company_id, error = %e, "QA request failed"))?;

        tracing::debug!(company_id = %company_id, answer_len = answer.len(), "received answer");

        snapshot_from_answer(&answer, self.strategy).inspect_err(|e| {
            tracing::warn!(
                company_id = %company_id,
                kind = e.kind(),
                field = e.field(),
                error = %e,
                "could not build snapshot from answer"
            )
        })
    }
}
