use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::groups::RenderedChart;

pub fn generate_plots(charts: &[RenderedChart], output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    for chart in charts {
        let file_name = format!("{}.png", slug(&chart.title));
        draw_chart(chart, &output_dir.join(file_name))?;
    }

    Ok(())
}

/// Grouped bar chart: one slot per period, bars side by side within a slot.
/// Bar heights are the precomputed proportions, so the y axis runs 0..1.
pub fn draw_chart(chart: &RenderedChart, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let slots = chart.groups.len().max(1) as f64;

    let mut plot = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..slots, 0f64..1.1f64)?;

    let labels: Vec<String> = chart.groups.iter().map(|g| g.label.clone()).collect();
    plot.configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x| {
            labels
                .get(x.floor() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_desc("Share of largest value")
        .draw()?;

    for (slot, group) in chart.groups.iter().enumerate() {
        let width = 0.8 / group.bars.len().max(1) as f64;

        for (i, bar) in group.bars.iter().enumerate() {
            let x0 = slot as f64 + 0.1 + i as f64 * width;
            let color = parse_hex(&bar.color).unwrap_or(BLUE);

            plot.draw_series(std::iter::once(Rectangle::new(
                [(x0, 0.0), (x0 + width, bar.proportion)],
                color.filled(),
            )))?;

            // literal value, never derived from bar height
            plot.draw_series(std::iter::once(Text::new(
                bar.display.clone(),
                (x0, bar.proportion + 0.03),
                ("sans-serif", 14),
            )))?;
        }
    }

    root.present()?;
    tracing::info!(path = %path.display(), chart = %chart.title, "saved chart");
    Ok(())
}

fn parse_hex(color: &str) -> Option<RGBColor> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

fn slug(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#22c55e"), Some(RGBColor(0x22, 0xc5, 0x5e)));
        assert_eq!(parse_hex("22c55e"), None);
        assert_eq!(parse_hex("#zzz000"), None);
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Assets vs Liabilities"), "assets_vs_liabilities");
    }
}
