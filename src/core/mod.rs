pub mod candlestick;
pub mod ohlc;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod slots;
pub mod timeframe;
pub mod types;

pub use candlestick::{
    CandleShape, MIN_BODY_HEIGHT, ShapeRect, WickSegment, candle_shape, generate_candle_shapes,
};
pub use ohlc::{CandleDirection, OhlcRecord, RawNumber, RawOhlcRecord};
pub use scale::{LinearScale, ScaleMapper};
pub use series::ChartSeries;
pub use slots::SlotLayout;
pub use timeframe::Timeframe;
pub use types::{ChartLayout, PixelPoint, Viewport};
