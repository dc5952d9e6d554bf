pub mod groups;
#[cfg(feature = "png")]
pub mod plot;
pub mod render;
pub mod scale;
pub mod text;

pub use groups::{default_groups, render_all, render_group, ChartGroupSpec, RenderedChart};
#[cfg(feature = "png")]
pub use plot::generate_plots;
pub use render::{render_bars, Bar, BarGroup, ChartSeriesPair, ChartStyle, SeriesStyle};
pub use scale::{shared_max, ScaleError};
pub use text::render_text;
