use crate::schema::{CompanyId, ExtractionRequest};

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract the following financial metrics from the balance sheet.

INSTRUCTIONS:
1. Find revenue, total assets, total liabilities and shareholders' equity for every reported year
2. Output ONLY valid JSON, nothing else
3. Use the exact schema below

SCHEMA:
{
  "years": ["2023", "2024"],
  "revenue": [value1, value2],
  "assets": [value1, value2],
  "liabilities": [value1, value2],
  "equity": [value1, value2]
}

RULES:
- "years" lists the reporting periods in chronological order
- Every other array has exactly one value per entry in "years", in the same order
- Values are plain numbers: no currency symbols, no units, no text
- Leave out a metric entirely if the document does not report it
- Output ONLY the JSON object, no markdown, no explanations

JSON OUTPUT:"#;

/// Build the question sent to the QA backend. The instruction text is the
/// same for every company; the id travels alongside it.
pub fn build_extraction_request(company_id: &CompanyId) -> ExtractionRequest {
    ExtractionRequest {
        company_id: company_id.clone(),
        instruction_text: EXTRACTION_INSTRUCTIONS.to_string(),
    }
}
