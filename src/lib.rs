//! share-chart: headless OHLC candlestick and volume chart renderer.
//!
//! The crate turns an ordered series of OHLC records into backend-neutral
//! draw primitives, resolves pointer positions back to records and formats
//! hover tooltips. Drawing itself is delegated to a `render::Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, PriceChart};
pub use error::{ChartError, ChartResult};
