use charts::RenderedChart;
use extract::{CompanyId, FinancialSnapshot};
use serde::Serialize;

/// Identifies one chart-generation attempt. Higher tickets are newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, Serialize)]
pub struct CurrentCharts {
    pub ticket: Ticket,
    pub company_id: CompanyId,
    pub snapshot: FinancialSnapshot,
    pub charts: Vec<RenderedChart>,
}

/// Holds the snapshot of the most recently started generation. Responses
/// for older tickets never overwrite newer state.
#[derive(Debug, Default)]
pub struct ChartSession {
    latest: u64,
    current: Option<CurrentCharts>,
}

impl ChartSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Store a successful generation. Returns `false` if `ticket` was
    /// superseded and the result was dropped.
    pub fn complete(&mut self, charts: CurrentCharts) -> bool {
        if !self.is_latest(charts.ticket) {
            tracing::debug!(ticket = charts.ticket.0, latest = self.latest, "dropping stale result");
            return false;
        }
        self.current = Some(charts);
        true
    }

    /// A failed latest generation clears whatever was shown before.
    pub fn fail(&mut self, ticket: Ticket) -> bool {
        if !self.is_latest(ticket) {
            return false;
        }
        self.current = None;
        true
    }

    pub fn current(&self) -> Option<&CurrentCharts> {
        self.current.as_ref()
    }
}
