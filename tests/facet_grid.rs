use polars::prelude::*;
use serde_json::{Value, json};
use zuerihunde::{EventWindow, FacetGrid};

/// Three years of a metric for four districts, keyed by the numeric
/// district code. Four facets on three columns fill one row and start
/// a second.
fn four_districts() -> DataFrame {
    let mut years = Vec::new();
    let mut codes = Vec::new();
    let mut values = Vec::new();
    for code in 1i64..=4 {
        for year in 2015i64..=2017 {
            years.push(year);
            codes.push(code);
            values.push((code + year - 2015) as f64);
        }
    }
    DataFrame::new(vec![
        Column::new("StichtagDatJahr".into(), &years),
        Column::new("KreisCd".into(), &codes),
        Column::new("WachstumsrateHundeStadtkreis".into(), &values),
    ])
    .unwrap()
}

/// The same metric for all twelve districts, with the first year null the
/// way a growth rate has nothing to compare against.
fn twelve_districts() -> DataFrame {
    let mut years = Vec::new();
    let mut codes = Vec::new();
    let mut values: Vec<Option<f64>> = Vec::new();
    for code in 1i64..=12 {
        for (year, value) in
            [(2015i64, None), (2016, Some(code as f64)), (2017, Some(code as f64 + 1.0))]
        {
            years.push(year);
            codes.push(code);
            values.push(value);
        }
    }
    DataFrame::new(vec![
        Column::new("StichtagDatJahr".into(), &years),
        Column::new("KreisCd".into(), &codes),
        Column::new("WachstumsrateHundeStadtkreis".into(), &values),
    ])
    .unwrap()
}

fn grid() -> FacetGrid {
    FacetGrid::new("StichtagDatJahr", "WachstumsrateHundeStadtkreis", "KreisCd")
        .panel_prefix("Stadtkreis ")
        .window(EventWindow::covid())
}

fn plot_json(plot: &plotly::Plot) -> Value {
    serde_json::to_value(plot).unwrap()
}

#[test]
fn one_panel_per_district_on_the_grid_axes() {
    let value = plot_json(&grid().build(&four_districts()).unwrap());

    let traces = value["data"].as_array().unwrap();
    assert_eq!(traces.len(), 4);
    // First row fills columns left to right.
    assert_eq!(traces[0]["name"], json!("1"));
    assert_eq!(traces[0]["xaxis"], json!("x"));
    assert_eq!(traces[0]["yaxis"], json!("y"));
    assert_eq!(traces[1]["xaxis"], json!("x2"));
    assert_eq!(traces[2]["xaxis"], json!("x3"));
    // The fourth panel wraps to the second row, first column.
    assert_eq!(traces[3]["name"], json!("4"));
    assert_eq!(traces[3]["xaxis"], json!("x"));
    assert_eq!(traces[3]["yaxis"], json!("y2"));
}

#[test]
fn grid_shape_defaults_to_filled_rows_of_three() {
    let value = plot_json(&grid().build(&four_districts()).unwrap());

    assert_eq!(value["layout"]["grid"]["rows"], json!(2));
    assert_eq!(value["layout"]["grid"]["columns"], json!(3));
    assert_eq!(value["layout"]["grid"]["pattern"], json!("coupled"));
    assert_eq!(value["layout"]["grid"]["roworder"], json!("top to bottom"));
    assert_eq!(value["layout"]["showlegend"], json!(false));
}

#[test]
fn all_panels_share_the_padded_value_range() {
    // Values run 1.0..=6.0 over the whole table, so every row gets [0, 7].
    let value = plot_json(&grid().build(&four_districts()).unwrap());

    assert_eq!(value["layout"]["yaxis"]["range"], json!([0.0, 7.0]));
    assert_eq!(value["layout"]["yaxis2"]["range"], json!([0.0, 7.0]));
}

#[test]
fn every_column_axis_carries_the_year_ticks() {
    let value = plot_json(&grid().build(&four_districts()).unwrap());

    let ticks = json!([2015.0, 2016.0, 2017.0]);
    assert_eq!(value["layout"]["xaxis"]["tickvals"], ticks);
    assert_eq!(value["layout"]["xaxis2"]["tickvals"], ticks);
    assert_eq!(value["layout"]["xaxis3"]["tickvals"], ticks);
    assert_eq!(value["layout"]["xaxis"]["showticklabels"], json!(true));
}

#[test]
fn each_panel_gets_its_own_event_band() {
    let value = plot_json(&grid().build(&four_districts()).unwrap());

    let shapes = value["layout"]["shapes"].as_array().unwrap();
    assert_eq!(shapes.len(), 4);
    assert_eq!(shapes[0]["xref"], json!("x"));
    assert_eq!(shapes[0]["yref"], json!("y domain"));
    assert_eq!(shapes[1]["xref"], json!("x2"));
    assert_eq!(shapes[3]["xref"], json!("x"));
    assert_eq!(shapes[3]["yref"], json!("y2 domain"));
    for shape in shapes {
        assert_eq!(shape["x0"], json!(2020.0));
        assert_eq!(shape["x1"], json!(2022.0));
    }
}

#[test]
fn panel_titles_sit_above_their_panels() {
    let value = plot_json(&grid().build(&four_districts()).unwrap());

    let annotations = value["layout"]["annotations"].as_array().unwrap();
    assert_eq!(annotations.len(), 4);
    assert_eq!(annotations[0]["text"], json!("Stadtkreis 1"));
    assert_eq!(annotations[0]["xref"], json!("paper"));
    assert_eq!(annotations[0]["yref"], json!("paper"));
    assert_eq!(annotations[0]["y"], json!(1.0));
    // Second row starts at half height; first column centers at 1/6.
    assert_eq!(annotations[3]["text"], json!("Stadtkreis 4"));
    assert_eq!(annotations[3]["y"], json!(0.5));
    assert!((annotations[3]["x"].as_f64().unwrap() - 0.5 / 3.0).abs() < 1e-12);
}

#[test]
fn figure_size_scales_with_the_grid() {
    let value = plot_json(&grid().cell_size(500, 300).build(&four_districts()).unwrap());

    assert_eq!(value["layout"]["width"], json!(1500));
    assert_eq!(value["layout"]["height"], json!(600));
}

#[test]
fn fixed_shape_too_small_for_the_facets_is_rejected() {
    let err = grid().shape(1, 3).build(&four_districts()).err().unwrap();
    assert!(err.to_string().contains("cannot hold 4 panels"));
}

#[test]
fn fixed_shape_with_spare_panels_is_fine() {
    let value = plot_json(&grid().shape(4, 3).build(&four_districts()).unwrap());
    assert_eq!(value["layout"]["grid"]["rows"], json!(4));
    assert_eq!(value["data"].as_array().unwrap().len(), 4);
}

#[test]
fn twelve_panels_fill_a_four_by_three_grid() {
    let value = plot_json(&grid().build(&twelve_districts()).unwrap());

    let traces = value["data"].as_array().unwrap();
    assert_eq!(traces.len(), 12);
    assert_eq!(value["layout"]["grid"]["rows"], json!(4));
    assert_eq!(value["layout"]["grid"]["columns"], json!(3));
    // The twelfth panel lands on the fourth row, third column.
    assert_eq!(traces[11]["xaxis"], json!("x3"));
    assert_eq!(traces[11]["yaxis"], json!("y4"));

    // The null first year stays a gap in every panel.
    assert_eq!(traces[0]["y"], json!([null, 1.0, 2.0]));
    assert_eq!(traces[11]["y"], json!([null, 12.0, 13.0]));

    // One band per panel, addressed to that panel's axes.
    let shapes = value["layout"]["shapes"].as_array().unwrap();
    assert_eq!(shapes.len(), 12);
    assert_eq!(shapes[11]["xref"], json!("x3"));
    assert_eq!(shapes[11]["yref"], json!("y4 domain"));

    // Finite values run 1.0..=13.0, so every row gets [0, 14].
    for axis in ["yaxis", "yaxis2", "yaxis3", "yaxis4"] {
        assert_eq!(value["layout"][axis]["range"], json!([0.0, 14.0]));
    }
}
