use serde::{Deserialize, Serialize};

use crate::scale::{shared_max, ScaleError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub name: String,
    pub color: String,
}

impl SeriesStyle {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub primary: SeriesStyle,
    pub secondary: Option<SeriesStyle>,
}

/// One or two aligned series plus the denominator they share.
/// `shared_max` is `0.0` when the scale is degenerate.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeriesPair {
    pub primary: Vec<f64>,
    pub secondary: Option<Vec<f64>>,
    pub shared_max: f64,
}

impl ChartSeriesPair {
    pub fn new(primary: Vec<f64>, secondary: Option<Vec<f64>>) -> Self {
        let shared_max = match shared_max(&primary, secondary.as_deref()) {
            Ok(max) => max,
            Err(ScaleError::Degenerate) => {
                tracing::debug!("degenerate scale, bars render at zero width");
                0.0
            }
        };

        Self {
            primary,
            secondary,
            shared_max,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.shared_max <= 0.0
    }

    pub fn render(&self, labels: &[String], style: &ChartStyle) -> Vec<BarGroup> {
        render_bars(
            labels,
            &self.primary,
            self.secondary.as_deref(),
            self.shared_max,
            style,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Series caption shown under the bar.
    pub series: String,
    pub color: String,
    pub value: f64,
    /// Literal value annotation, formatted from `value`.
    pub display: String,
    /// Bar length as a fraction of the full width, within `[0, 1]`.
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGroup {
    pub label: String,
    pub bars: Vec<Bar>,
}

/// Map aligned series onto proportional bars, one group per label.
pub fn render_bars(
    labels: &[String],
    primary: &[f64],
    secondary: Option<&[f64]>,
    shared_max: f64,
    style: &ChartStyle,
) -> Vec<BarGroup> {
    debug_assert_eq!(labels.len(), primary.len());

    // A second series without its own style still gets a caption.
    let fallback = SeriesStyle::new("Value 2", "#ef4444");
    let secondary_style = style.secondary.as_ref().unwrap_or(&fallback);

    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut bars = Vec::with_capacity(2);
            if let Some(value) = primary.get(i) {
                bars.push(bar(*value, shared_max, &style.primary));
            }
            if let Some(value) = secondary.and_then(|s| s.get(i)) {
                bars.push(bar(*value, shared_max, secondary_style));
            }
            BarGroup {
                label: label.clone(),
                bars,
            }
        })
        .collect()
}

fn bar(value: f64, shared_max: f64, style: &SeriesStyle) -> Bar {
    Bar {
        series: style.name.clone(),
        color: style.color.clone(),
        value,
        display: format_value(value),
        proportion: proportion(value, shared_max),
    }
}

pub fn proportion(value: f64, shared_max: f64) -> f64 {
    if shared_max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / shared_max).clamp(0.0, 1.0)
}

/// `150.0` prints as `150`, `12.5` as `12.5`.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn single() -> ChartStyle {
        ChartStyle {
            primary: SeriesStyle::new("Revenue", "#2563eb"),
            secondary: None,
        }
    }

    #[test]
    fn test_revenue_proportions() {
        let pair = ChartSeriesPair::new(vec![100.0, 150.0], None);
        let groups = pair.render(&labels(&["2023", "2024"]), &single());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "2023");
        assert!((groups[0].bars[0].proportion - 100.0 / 150.0).abs() < 1e-12);
        assert_eq!(groups[1].bars[0].proportion, 1.0);
        assert_eq!(groups[1].bars[0].display, "150");
        assert_eq!(groups[1].bars[0].series, "Revenue");
    }

    #[test]
    fn test_zero_series_renders_zero_width() {
        let pair = ChartSeriesPair::new(vec![0.0, 0.0], None);
        assert!(pair.is_degenerate());

        let groups = pair.render(&labels(&["2023", "2024"]), &single());
        for group in &groups {
            assert_eq!(group.bars[0].proportion, 0.0);
            assert_eq!(group.bars[0].display, "0");
        }
    }

    #[test]
    fn test_paired_bars_share_scale() {
        let style = ChartStyle {
            primary: SeriesStyle::new("Assets", "#22c55e"),
            secondary: Some(SeriesStyle::new("Liabilities", "#ef4444")),
        };
        let pair = ChartSeriesPair::new(vec![10.0, 20.0], Some(vec![5.0, 40.0]));
        let groups = pair.render(&labels(&["2023", "2024"]), &style);

        assert_eq!(pair.shared_max, 40.0);
        assert_eq!(groups[0].bars.len(), 2);
        assert_eq!(groups[0].bars[0].proportion, 0.25);
        assert_eq!(groups[0].bars[1].proportion, 0.125);
        assert_eq!(groups[1].bars[1].proportion, 1.0);
        assert_eq!(groups[1].bars[1].series, "Liabilities");
        assert_eq!(groups[1].bars[1].color, "#ef4444");
    }

    #[test]
    fn test_proportions_stay_in_unit_range() {
        let values = [-30.0, 0.0, 12.5, 99.0, 1e9];
        for v in values {
            let p = proportion(v, 50.0);
            assert!((0.0..=1.0).contains(&p), "{} -> {}", v, p);
        }
        assert_eq!(proportion(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_display_is_literal() {
        assert_eq!(format_value(12.5), "12.5");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(-250.0), "-250");
        assert_eq!(format_value(1200.0), "1200");
    }

    #[test]
    fn test_unstyled_secondary_gets_caption() {
        let groups = render_bars(&labels(&["2024"]), &[1.0], Some(&[2.0]), 2.0, &single());
        assert_eq!(groups[0].bars[1].series, "Value 2");
    }
}
