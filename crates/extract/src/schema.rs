use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque company identifier, passed through to the QA backend untouched.
/// Accepts JSON strings or numbers, since the directory hands out integer ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CompanyId(pub String);

impl<'de> Deserialize<'de> for CompanyId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "company id must be a string or number, got {}",
                other
            ))),
        }
    }
}

impl CompanyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompanyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub company_id: CompanyId,
    pub instruction_text: String,
}

/// The four balance-sheet series the payload may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Revenue,
    Assets,
    Liabilities,
    Equity,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Revenue,
        Metric::Assets,
        Metric::Liabilities,
        Metric::Equity,
    ];

    /// Field name in the JSON payload.
    pub fn field(&self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::Assets => "assets",
            Metric::Liabilities => "liabilities",
            Metric::Equity => "equity",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Aligned metric series for one company. Every present series has exactly
/// `years.len()` values; a metric missing from the payload is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub years: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub revenue: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub assets: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub liabilities: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub equity: Option<Vec<f64>>,
}

impl FinancialSnapshot {
    pub fn series(&self, metric: Metric) -> Option<&[f64]> {
        match metric {
            Metric::Revenue => self.revenue.as_deref(),
            Metric::Assets => self.assets.as_deref(),
            Metric::Liabilities => self.liabilities.as_deref(),
            Metric::Equity => self.equity.as_deref(),
        }
    }

    /// Metrics that made it into the snapshot, in payload order.
    pub fn present_metrics(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|m| self.series(*m).is_some())
            .collect()
    }

    pub(crate) fn set_series(&mut self, metric: Metric, values: Vec<f64>) {
        let slot = match metric {
            Metric::Revenue => &mut self.revenue,
            Metric::Assets => &mut self.assets,
            Metric::Liabilities => &mut self.liabilities,
            Metric::Equity => &mut self.equity,
        };
        *slot = Some(values);
    }
}
