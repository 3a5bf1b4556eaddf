//! Chart facade, configuration and tooltip presentation.

mod chart;
mod config;
mod pointer_controller;
mod render_frame_builder;
mod render_style;
mod series_controller;
mod snapshot;
pub mod tooltip;

pub use chart::{HoverHandler, PriceChart};
pub use config::{
    ChartConfig, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_NO_DATA_TEXT, TooltipConfig,
};
pub use render_style::ChartStyle;
pub use snapshot::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1};
pub use tooltip::{
    Tooltip, TooltipContent, TooltipPlacement, TooltipRow, format_period_start, format_price,
    format_volume, place_tooltip,
};
