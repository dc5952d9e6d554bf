use extract::{FinancialSnapshot, Metric};
use serde::{Deserialize, Serialize};

use crate::render::{BarGroup, ChartSeriesPair, ChartStyle, SeriesStyle};

/// Which snapshot metrics one chart compares, and how they are drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartGroupSpec {
    pub title: String,
    pub primary: (Metric, SeriesStyle),
    pub secondary: Option<(Metric, SeriesStyle)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    pub title: String,
    pub degenerate_scale: bool,
    pub groups: Vec<BarGroup>,
}

/// Revenue; assets vs liabilities; equity.
pub fn default_groups() -> Vec<ChartGroupSpec> {
    vec![
        ChartGroupSpec {
            title: "Revenue".to_string(),
            primary: (Metric::Revenue, SeriesStyle::new("Revenue", "#2563eb")),
            secondary: None,
        },
        ChartGroupSpec {
            title: "Assets vs Liabilities".to_string(),
            primary: (Metric::Assets, SeriesStyle::new("Assets", "#22c55e")),
            secondary: Some((Metric::Liabilities, SeriesStyle::new("Liabilities", "#ef4444"))),
        },
        ChartGroupSpec {
            title: "Equity".to_string(),
            primary: (Metric::Equity, SeriesStyle::new("Equity", "#8b5cf6")),
            secondary: None,
        },
    ]
}

/// Run scale + render for one chart group. Returns `None` when the primary
/// metric is absent from the snapshot; a missing secondary metric leaves a
/// single-series chart.
pub fn render_group(snapshot: &FinancialSnapshot, group: &ChartGroupSpec) -> Option<RenderedChart> {
    let (primary_metric, primary_style) = &group.primary;

    let Some(primary) = snapshot.series(*primary_metric) else {
        tracing::debug!(chart = %group.title, metric = %primary_metric, "metric absent, skipping chart");
        return None;
    };

    let secondary = group
        .secondary
        .as_ref()
        .and_then(|(metric, style)| snapshot.series(*metric).map(|values| (values, style)));

    let pair = ChartSeriesPair::new(primary.to_vec(), secondary.map(|(values, _)| values.to_vec()));
    let style = ChartStyle {
        primary: primary_style.clone(),
        secondary: secondary.map(|(_, style)| style.clone()),
    };

    Some(RenderedChart {
        title: group.title.clone(),
        degenerate_scale: pair.is_degenerate(),
        groups: pair.render(&snapshot.years, &style),
    })
}

/// Render every default chart group the snapshot has data for.
pub fn render_all(snapshot: &FinancialSnapshot) -> Vec<RenderedChart> {
    default_groups()
        .iter()
        .filter_map(|group| render_group(snapshot, group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> FinancialSnapshot {
        FinancialSnapshot {
            years: vec!["2023".into(), "2024".into()],
            revenue: Some(vec![100.0, 150.0]),
            assets: Some(vec![10.0, 20.0]),
            liabilities: Some(vec![5.0, 30.0]),
            equity: Some(vec![0.0, 0.0]),
        }
    }

    #[test]
    fn test_all_groups_rendered() {
        let charts = render_all(&snapshot());
        let titles: Vec<_> = charts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Revenue", "Assets vs Liabilities", "Equity"]);
    }

    #[test]
    fn test_absent_primary_skips_chart() {
        let mut s = snapshot();
        s.revenue = None;
        s.equity = None;
        let charts = render_all(&s);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].title, "Assets vs Liabilities");
    }

    #[test]
    fn test_absent_secondary_degrades_to_single_series() {
        let mut s = snapshot();
        s.liabilities = None;
        let chart = render_group(&s, &default_groups()[1]).unwrap();
        assert!(chart.groups.iter().all(|g| g.bars.len() == 1));
        assert_eq!(chart.groups[1].bars[0].proportion, 1.0);
    }

    #[test]
    fn test_assets_and_liabilities_share_scale() {
        let chart = render_group(&snapshot(), &default_groups()[1]).unwrap();
        // max across both series is 30
        assert!((chart.groups[1].bars[0].proportion - 20.0 / 30.0).abs() < 1e-12);
        assert_eq!(chart.groups[1].bars[1].proportion, 1.0);
    }

    #[test]
    fn test_zero_equity_is_degenerate_not_error() {
        let chart = render_group(&snapshot(), &default_groups()[2]).unwrap();
        assert!(chart.degenerate_scale);
        assert!(chart.groups.iter().all(|g| g.bars[0].proportion == 0.0));
        assert!(chart.groups.iter().all(|g| g.bars[0].display == "0"));
    }
}
