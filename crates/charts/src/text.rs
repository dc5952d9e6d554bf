use crate::groups::RenderedChart;

/// Terminal rendering: one line per bar, length `proportion * width` cells.
pub fn render_text(chart: &RenderedChart, width: usize) -> String {
    let label_width = chart
        .groups
        .iter()
        .map(|g| g.label.chars().count())
        .max()
        .unwrap_or(0);
    let series_width = chart
        .groups
        .iter()
        .flat_map(|g| g.bars.iter().map(|b| b.series.chars().count()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&chart.title);
    out.push('\n');
    out.push_str(&"=".repeat(chart.title.chars().count()));
    out.push('\n');

    for group in &chart.groups {
        for (i, bar) in group.bars.iter().enumerate() {
            let label = if i == 0 { group.label.as_str() } else { "" };
            let filled = ((bar.proportion * width as f64).round() as usize).min(width);
            out.push_str(&format!(
                "{:<lw$}  {:<sw$}  {}{}  {}\n",
                label,
                bar.series,
                "█".repeat(filled),
                "·".repeat(width - filled),
                bar.display,
                lw = label_width,
                sw = series_width,
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Bar, BarGroup};

    fn bar(series: &str, value: f64, proportion: f64) -> Bar {
        Bar {
            series: series.to_string(),
            color: "#000000".to_string(),
            value,
            display: crate::render::format_value(value),
            proportion,
        }
    }

    #[test]
    fn test_bar_lengths_follow_proportion() {
        let chart = RenderedChart {
            title: "Revenue".to_string(),
            degenerate_scale: false,
            groups: vec![
                BarGroup { label: "2023".into(), bars: vec![bar("Revenue", 50.0, 0.5)] },
                BarGroup { label: "2024".into(), bars: vec![bar("Revenue", 100.0, 1.0)] },
            ],
        };
        let text = render_text(&chart, 10);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Revenue");
        assert_eq!(lines[2], "2023  Revenue  █████·····  50");
        assert_eq!(lines[3], "2024  Revenue  ██████████  100");
    }

    #[test]
    fn test_zero_width_still_shows_value() {
        let chart = RenderedChart {
            title: "Equity".to_string(),
            degenerate_scale: true,
            groups: vec![BarGroup { label: "2024".into(), bars: vec![bar("Equity", 0.0, 0.0)] }],
        };
        let text = render_text(&chart, 4);
        assert!(text.lines().any(|l| l == "2024  Equity  ····  0"));
    }

    #[test]
    fn test_paired_bars_share_label() {
        let chart = RenderedChart {
            title: "Assets vs Liabilities".to_string(),
            degenerate_scale: false,
            groups: vec![BarGroup {
                label: "2024".into(),
                bars: vec![bar("Assets", 2.0, 1.0), bar("Liabilities", 1.0, 0.5)],
            }],
        };
        let text = render_text(&chart, 2);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[2], "2024  Assets       ██  2");
        assert_eq!(lines[3], "      Liabilities  █·  1");
    }
}
