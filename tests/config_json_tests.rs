use share_chart::api::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, DEFAULT_CHART_HEIGHT};
use share_chart::core::{ChartSeries, Timeframe, Viewport};
use share_chart::render::NullRenderer;
use share_chart::{ChartConfig, ChartError, PriceChart};

const SERIES_JSON: &str = r#"[
    {"period_start": "2024-01-01T00:00Z", "open": 10, "high": 12, "low": 9, "close": 11, "volume": 100, "share_id": "s-1"},
    {"period_start": "2024-01-01T01:00:00Z", "open": "11", "high": "13.5", "low": "10.25", "close": "10.5", "volume": "2500"},
    {"period_start": "2024-01-01T04:00:00+00:00", "open": 10.5, "high": 11, "low": 10, "close": 10.75, "volume": 0}
]"#;

#[test]
fn empty_json_config_uses_documented_defaults() {
    let config = ChartConfig::from_json_str("{}").expect("config");
    assert_eq!(config, ChartConfig::default());
    assert_eq!(config.height, DEFAULT_CHART_HEIGHT);
    assert!(config.show_volume);
    assert_eq!(config.timeframe, None);
}

#[test]
fn config_json_round_trip() {
    let config = ChartConfig::new(Viewport::new(1024, 360))
        .with_show_volume(false)
        .with_timeframe(Timeframe::FourHours)
        .with_no_data_text("Nothing traded yet");
    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"4h\""));

    let restored = ChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn partial_style_override_keeps_other_defaults() {
    let config = ChartConfig::from_json_str(
        r#"{"show_volume": false, "style": {"volume_alpha": 0.25}, "tooltip": {"currency_prefix": ""}}"#,
    )
    .expect("config");
    assert!(!config.show_volume);
    assert_eq!(config.style.volume_alpha, 0.25);
    assert_eq!(config.style.wick_width_px, 1.0);
    assert_eq!(config.tooltip.currency_prefix, "");
    assert_eq!(config.tooltip.width_estimate_px, 160.0);
}

#[test]
fn invalid_config_is_rejected_by_chart() {
    let config = ChartConfig::new(Viewport::new(0, 300));
    assert!(matches!(
        PriceChart::new(NullRenderer::default(), config),
        Err(ChartError::InvalidViewport { .. })
    ));

    let config = ChartConfig::default().with_virtual_size(12.0, 300.0);
    assert!(PriceChart::new(NullRenderer::default(), config).is_err());

    let config = ChartConfig::default().with_no_data_text("  ");
    assert!(PriceChart::new(NullRenderer::default(), config).is_err());
}

#[test]
fn series_json_normalizes_loose_records() {
    let series = ChartSeries::from_json_str(SERIES_JSON).expect("series");
    assert_eq!(series.len(), 3);

    let second = series.get(1).expect("second");
    assert_eq!(second.high, 13.5);
    assert_eq!(second.volume, 2500.0);
    assert!(!second.is_bullish());
}

#[test]
fn series_json_missing_field_is_rejected() {
    let err = ChartSeries::from_json_str(
        r#"[{"period_start": "2024-01-01T00:00Z", "open": 1, "high": 1, "low": 1, "close": 1}]"#,
    )
    .expect_err("volume missing");
    assert!(matches!(err, ChartError::MissingField { field: "volume" }));

    let err = ChartSeries::from_json_str(r#"[{"open": 1, "high": 1, "low": 1, "close": 1, "volume": 1}]"#)
        .expect_err("period missing");
    assert!(matches!(err, ChartError::MissingField { field: "period_start" }));
}

#[test]
fn series_json_bad_timestamp_is_rejected() {
    let err = ChartSeries::from_json_str(
        r#"[{"period_start": "soon", "open": 1, "high": 1, "low": 1, "close": 1, "volume": 1}]"#,
    )
    .expect_err("bad timestamp");
    assert!(matches!(err, ChartError::InvalidTimestamp { .. }));
}

#[test]
fn series_json_out_of_order_is_rejected() {
    let err = ChartSeries::from_json_str(
        r#"[
            {"period_start": "2024-01-02", "open": 1, "high": 1, "low": 1, "close": 1, "volume": 1},
            {"period_start": "2024-01-01", "open": 1, "high": 1, "low": 1, "close": 1, "volume": 1}
        ]"#,
    )
    .expect_err("descending");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn snapshot_contract_round_trip() {
    let mut chart = PriceChart::new(
        NullRenderer::default(),
        ChartConfig::new(Viewport::new(800, 300)),
    )
    .expect("chart init");
    chart.set_series_for_timeframe(
        Timeframe::OneHour,
        ChartSeries::from_json_str(SERIES_JSON).expect("series"),
    );
    chart.set_series_metadata("share-id", "s-1");
    chart.pointer_move(400.0, 100.0).expect("hit");

    let snapshot = chart.snapshot().expect("snapshot");
    assert_eq!(snapshot.series_len, 3);
    assert_eq!(snapshot.candles.len(), 3);
    assert_eq!(snapshot.hover.map(|hover| hover.index), Some(1));
    assert_eq!(snapshot.timeframe, Some(Timeframe::OneHour));

    let json = chart.snapshot_json_contract_v1_pretty().expect("contract");
    assert!(json.contains(&format!("\"schema_version\": {CHART_SNAPSHOT_JSON_SCHEMA_V1}")));
    let restored = ChartSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(restored, snapshot);

    let bare = chart.snapshot_json_pretty().expect("bare");
    let restored = ChartSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(restored.series_metadata.get("share-id").map(String::as_str), Some("s-1"));
}

#[test]
fn unsupported_snapshot_schema_is_rejected() {
    let chart = PriceChart::new(
        NullRenderer::default(),
        ChartConfig::new(Viewport::new(800, 300)),
    )
    .expect("chart init");
    let snapshot = chart.snapshot().expect("snapshot");
    assert!(snapshot.price_domain.is_none());

    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("contract")
        .replace("\"schema_version\": 1", "\"schema_version\": 99");
    assert!(ChartSnapshot::from_json_compat_str(&json).is_err());
}

#[test]
fn timeframe_can_be_set_and_cleared() {
    let mut chart = PriceChart::new(
        NullRenderer::default(),
        ChartConfig::new(Viewport::new(800, 300)),
    )
    .expect("chart init");
    assert_eq!(chart.timeframe(), None);

    chart.set_timeframe(Some(Timeframe::OneDay));
    assert_eq!(chart.timeframe(), Some(Timeframe::OneDay));
    assert_eq!(chart.snapshot().expect("snapshot").timeframe, Some(Timeframe::OneDay));

    chart.set_timeframe(None);
    assert_eq!(chart.timeframe(), None);
}
