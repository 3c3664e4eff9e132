use polars::prelude::*;
use serde_json::{Value, json};
use zuerihunde::{EventWindow, InvalidInput, LineChart};

/// Per-district counts with rows out of input order and every year present
/// once per district, so tick handling has duplicates to chew on.
fn district_counts() -> DataFrame {
    DataFrame::new(vec![
        Column::new("StichtagDatJahr".into(), &[2016i64, 2015, 2017, 2015, 2016, 2017]),
        Column::new("AnzahlHunde".into(), &[9.0f64, 10.0, 12.0, 7.0, 6.5, 8.0]),
        Column::new(
            "Stadtkreis".into(),
            &["Kreis 1", "Kreis 1", "Kreis 1", "Kreis 2", "Kreis 2", "Kreis 2"],
        ),
    ])
    .unwrap()
}

fn plot_json(plot: &plotly::Plot) -> Value {
    serde_json::to_value(plot).unwrap()
}

#[test]
fn single_series_points_are_ordered_by_year() {
    let df = DataFrame::new(vec![
        Column::new("year".into(), &[2016i64, 2015, 2017]),
        Column::new("count".into(), &[9i64, 10, 12]),
    ])
    .unwrap();

    let plot = LineChart::new("year", "count").window(EventWindow::covid()).build(&df).unwrap();
    let value = plot_json(&plot);

    assert_eq!(value["data"][0]["x"], json!([2015.0, 2016.0, 2017.0]));
    assert_eq!(value["data"][0]["y"], json!([10.0, 9.0, 12.0]));
    assert_eq!(value["layout"]["xaxis"]["tickvals"], json!([2015.0, 2016.0, 2017.0]));
    assert_eq!(value["layout"]["annotations"][0]["y"], json!(12.0));
}

#[test]
fn ticks_are_distinct_sorted_years() {
    let plot = LineChart::new("StichtagDatJahr", "AnzahlHunde")
        .grouped_by("Stadtkreis")
        .build(&district_counts())
        .unwrap();
    let value = plot_json(&plot);

    // Six rows but only three distinct years, ascending.
    assert_eq!(value["layout"]["xaxis"]["tickvals"], json!([2015.0, 2016.0, 2017.0]));
    assert_eq!(value["layout"]["xaxis"]["tickmode"], json!("array"));
}

#[test]
fn one_series_per_district_in_first_appearance_order() {
    let plot = LineChart::new("StichtagDatJahr", "AnzahlHunde")
        .grouped_by("Stadtkreis")
        .build(&district_counts())
        .unwrap();
    let value = plot_json(&plot);

    let traces = value["data"].as_array().unwrap();
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[0]["name"], json!("Kreis 1"));
    assert_eq!(traces[1]["name"], json!("Kreis 2"));
    assert_eq!(traces[1]["x"], json!([2015.0, 2016.0, 2017.0]));
    assert_eq!(traces[1]["y"], json!([7.0, 6.5, 8.0]));
}

#[test]
fn annotation_sits_at_the_maximum_over_all_series() {
    let plot = LineChart::new("StichtagDatJahr", "AnzahlHunde")
        .grouped_by("Stadtkreis")
        .window(EventWindow::covid())
        .build(&district_counts())
        .unwrap();
    let value = plot_json(&plot);

    // 12.0 comes from Kreis 1; Kreis 2 tops out at 8.0.
    let annotation = &value["layout"]["annotations"][0];
    assert_eq!(annotation["y"], json!(12.0));
    assert_eq!(annotation["x"], json!(2021.2));
    assert_eq!(annotation["text"], json!("COVID-19 Pandemic"));
    assert_eq!(annotation["showarrow"], json!(false));
}

#[test]
fn band_bounds_are_the_window_regardless_of_data_range() {
    // Data ends in 2017; the band still covers 2020-2022.
    let plot = LineChart::new("StichtagDatJahr", "AnzahlHunde")
        .window(EventWindow::covid())
        .build(&district_counts())
        .unwrap();
    let value = plot_json(&plot);

    let shape = &value["layout"]["shapes"][0];
    assert_eq!(shape["type"], json!("rect"));
    assert_eq!(shape["x0"], json!(2020.0));
    assert_eq!(shape["x1"], json!(2022.0));
    assert_eq!(shape["xref"], json!("x"));
    assert_eq!(shape["yref"], json!("y domain"));
    assert_eq!(shape["fillcolor"], json!("green"));
    assert_eq!(shape["opacity"], json!(0.5));
    assert_eq!(shape["line"]["width"], json!(0.0));
}

#[test]
fn no_window_means_no_band_or_annotation() {
    let plot = LineChart::new("StichtagDatJahr", "AnzahlHunde").build(&district_counts()).unwrap();
    let value = plot_json(&plot);

    assert!(value["layout"].get("shapes").is_none());
    assert!(value["layout"].get("annotations").is_none());
}

#[test]
fn text_year_labels_parse_and_sort() {
    let df = DataFrame::new(vec![
        Column::new("year".into(), &["2016", "2015", "2016"]),
        Column::new("count".into(), &[1.0f64, 2.0, 3.0]),
    ])
    .unwrap();

    let plot = LineChart::new("year", "count").build(&df).unwrap();
    let value = plot_json(&plot);
    assert_eq!(value["layout"]["xaxis"]["tickvals"], json!([2015.0, 2016.0]));
}

#[test]
fn unparseable_year_label_is_invalid_input() {
    let df = DataFrame::new(vec![
        Column::new("year".into(), &["2015", "dunno"]),
        Column::new("count".into(), &[1.0f64, 2.0]),
    ])
    .unwrap();

    let err = LineChart::new("year", "count").build(&df).err().unwrap();
    assert_eq!(
        err.downcast_ref::<InvalidInput>(),
        Some(&InvalidInput::BadTimeLabel { column: "year".into(), value: "dunno".into() })
    );
}

#[test]
fn empty_table_is_invalid_input() {
    let df = DataFrame::new(vec![
        Column::new("year".into(), Vec::<i64>::new()),
        Column::new("count".into(), Vec::<f64>::new()),
    ])
    .unwrap();

    let err = LineChart::new("year", "count").build(&df).err().unwrap();
    assert_eq!(err.downcast_ref::<InvalidInput>(), Some(&InvalidInput::Empty));
}

#[test]
fn missing_metric_column_is_invalid_input() {
    let err = LineChart::new("StichtagDatJahr", "AnzahlKatzen")
        .build(&district_counts())
        .err().unwrap();
    assert_eq!(
        err.downcast_ref::<InvalidInput>(),
        Some(&InvalidInput::MissingColumn { column: "AnzahlKatzen".into() })
    );
}

#[test]
fn text_metric_column_is_invalid_input() {
    let err = LineChart::new("StichtagDatJahr", "Stadtkreis")
        .build(&district_counts())
        .err().unwrap();
    assert!(matches!(
        err.downcast_ref::<InvalidInput>(),
        Some(InvalidInput::NotNumeric { .. })
    ));
}

#[test]
fn null_metric_value_plots_as_a_gap() {
    let df = DataFrame::new(vec![
        Column::new("year".into(), &[2015i64, 2016, 2017]),
        Column::new("count".into(), &[Some(1.0f64), None, Some(3.0)]),
    ])
    .unwrap();

    let plot = LineChart::new("year", "count").build(&df).unwrap();
    let value = plot_json(&plot);
    assert_eq!(value["data"][0]["y"][0], json!(1.0));
    assert_eq!(value["data"][0]["y"][1], Value::Null);
    assert_eq!(value["data"][0]["y"][2], json!(3.0));
}

#[test]
fn identical_input_builds_identical_charts() {
    let chart = LineChart::new("StichtagDatJahr", "AnzahlHunde")
        .grouped_by("Stadtkreis")
        .window(EventWindow::covid());
    let df = district_counts();

    let first = plot_json(&chart.build(&df).unwrap());
    let second = plot_json(&chart.build(&df).unwrap());
    assert_eq!(first, second);
}

#[test]
fn input_frame_is_left_untouched() {
    let df = district_counts();
    let before = df.clone();
    LineChart::new("StichtagDatJahr", "AnzahlHunde")
        .grouped_by("Stadtkreis")
        .window(EventWindow::covid())
        .build(&df)
        .unwrap();
    assert!(df.equals(&before));
}
