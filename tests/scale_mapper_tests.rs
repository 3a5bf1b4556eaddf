use approx::assert_relative_eq;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use share_chart::ChartError;
use share_chart::core::{ChartLayout, ChartSeries, OhlcRecord, ScaleMapper};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn series(rows: &[(f64, f64, f64, f64, f64)]) -> ChartSeries {
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, &(open, high, low, close, volume))| {
            OhlcRecord::new(
                start() + TimeDelta::hours(i as i64),
                open,
                high,
                low,
                close,
                volume,
            )
            .expect("valid record")
        })
        .collect();
    ChartSeries::new(records).expect("ordered series")
}

fn layout() -> ChartLayout {
    ChartLayout::new(800.0, 300.0, true).expect("layout")
}

#[test]
fn price_domain_is_padded_half_a_percent() {
    let series = series(&[(10.0, 12.0, 9.0, 11.0, 100.0), (11.0, 20.0, 10.0, 18.0, 50.0)]);
    let mapper = ScaleMapper::from_series(&series, layout()).expect("mapper");

    assert_relative_eq!(mapper.min_price(), 9.0 * 0.995);
    assert_relative_eq!(mapper.max_price(), 20.0 * 1.005);
    assert_relative_eq!(mapper.price_range(), 20.1 - 8.955, epsilon = 1e-9);
    assert_eq!(mapper.max_volume(), 100.0);
}

#[test]
fn padded_extremes_land_on_plot_edges() {
    let series = series(&[(10.0, 12.0, 9.0, 11.0, 100.0)]);
    let layout = layout();
    let mapper = ScaleMapper::from_series(&series, layout).expect("mapper");

    assert_relative_eq!(mapper.price_to_y(mapper.max_price()), layout.top_padding, epsilon = 1e-9);
    assert_relative_eq!(mapper.price_to_y(mapper.min_price()), layout.plot_bottom(), epsilon = 1e-9);
}

#[test]
fn higher_price_maps_higher_on_screen() {
    let series = series(&[(10.0, 12.0, 9.0, 11.0, 100.0)]);
    let mapper = ScaleMapper::from_series(&series, layout()).expect("mapper");

    assert!(mapper.price_to_y(11.0) < mapper.price_to_y(10.0));
    assert_eq!(mapper.price_to_y(10.5), mapper.price_to_y(10.5));
}

#[test]
fn flat_prices_never_divide_by_zero() {
    let series = series(&[(0.0, 0.0, 0.0, 0.0, 0.0), (0.0, 0.0, 0.0, 0.0, 0.0)]);
    let mapper = ScaleMapper::from_series(&series, layout()).expect("mapper");

    assert_eq!(mapper.price_range(), 1.0);
    for price in [0.0, 0.5, 1.0, 1_000.0] {
        assert!(mapper.price_to_y(price).is_finite());
    }
}

#[test]
fn identical_nonzero_prices_still_get_a_range() {
    let series = series(&[(5.0, 5.0, 5.0, 5.0, 1.0)]);
    let mapper = ScaleMapper::from_series(&series, layout()).expect("mapper");

    assert!(mapper.price_range() > 0.0);
    assert!(mapper.price_to_y(5.0).is_finite());
}

#[test]
fn zero_volume_yields_zero_height_bars() {
    let series = series(&[
        (10.0, 12.0, 9.0, 11.0, 0.0),
        (11.0, 13.0, 10.0, 12.0, 0.0),
        (12.0, 14.0, 11.0, 10.0, 0.0),
    ]);
    let mapper = ScaleMapper::from_series(&series, layout()).expect("mapper");

    assert_eq!(mapper.max_volume(), 1.0);
    for record in &series {
        assert_eq!(mapper.volume_to_bar_height(record.volume), 0.0);
    }
}

#[test]
fn loudest_bucket_fills_volume_track() {
    let series = series(&[(10.0, 12.0, 9.0, 11.0, 40.0), (11.0, 13.0, 10.0, 12.0, 80.0)]);
    let layout = layout();
    let mapper = ScaleMapper::from_series(&series, layout).expect("mapper");

    assert_relative_eq!(mapper.volume_to_bar_height(80.0), layout.volume_track_height);
    assert_relative_eq!(mapper.volume_to_bar_height(40.0), layout.volume_track_height / 2.0);
}

#[test]
fn mapping_is_idempotent() {
    let series = series(&[(10.0, 12.0, 9.0, 11.0, 100.0), (11.0, 20.0, 10.0, 18.0, 50.0)]);
    let first = ScaleMapper::from_series(&series, layout()).expect("mapper");
    let second = ScaleMapper::from_series(&series, layout()).expect("mapper");

    assert_eq!(first, second);
    assert_eq!(first.price_to_y(13.37), second.price_to_y(13.37));
}

#[test]
fn y_to_price_inverts_price_to_y() {
    let series = series(&[(10.0, 12.0, 9.0, 11.0, 100.0)]);
    let mapper = ScaleMapper::from_series(&series, layout()).expect("mapper");

    let y = mapper.price_to_y(10.75);
    assert_relative_eq!(mapper.y_to_price(y), 10.75, epsilon = 1e-9);
}

#[test]
fn empty_series_is_rejected() {
    let err = ScaleMapper::from_series(&ChartSeries::empty(), layout()).expect_err("empty");
    assert!(matches!(err, ChartError::EmptySeries));
}
