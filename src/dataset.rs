use std::{
  collections::{BTreeSet, HashMap},
  path::Path,
};

use polars::prelude::*;

/// Read-only view of the automobile table: a categorical `make` column plus
/// numeric measurement columns. Grouped min/mean/max frames, make labels,
/// and make ids are computed once up front and all share one sorted order.
pub struct AutosData {
  df: DataFrame,

  makes:        Vec<String>,
  make_ids:     Column,
  row_make_ids: Column,
  dimensions:   Vec<String>,

  grouped_min:  DataFrame,
  grouped_mean: DataFrame,
  grouped_max:  DataFrame,
}

impl AutosData {
  pub fn from_csv(path: impl AsRef<Path>) -> PolarsResult<AutosData> {
    let file = std::fs::File::open(path.as_ref())?;
    let df = CsvReader::new(file).finish()?;
    AutosData::new(df)
  }

  pub fn new(df: DataFrame) -> PolarsResult<AutosData> {
    let make = df.column("make")?.as_materialized_series().clone();
    let make = make.str()?;

    let mut names = Vec::with_capacity(make.len());
    for value in make {
      names
        .push(value.ok_or_else(|| PolarsError::ComputeError("null manufacturer name".into()))?);
    }

    let makes: Vec<String> =
      names.iter().collect::<BTreeSet<_>>().into_iter().map(|n| n.to_string()).collect();
    let lookup: HashMap<&str, i32> =
      makes.iter().enumerate().map(|(i, m)| (m.as_str(), i as i32)).collect();

    let row_ids: Vec<i32> = names.iter().map(|n| lookup[n]).collect();
    let ids: Vec<i32> = (0..makes.len() as i32).collect();

    let dimensions: Vec<String> = df
      .get_columns()
      .iter()
      .filter(|c| c.dtype().is_primitive_numeric())
      .map(|c| c.name().to_string())
      .collect();

    let grouped = |aggs: Vec<Expr>| {
      df.clone()
        .lazy()
        .group_by([col("make")])
        .agg(aggs)
        .sort(["make"], Default::default())
        .collect()
    };
    let grouped_min = grouped(dimensions.iter().map(|d| col(d.as_str()).min()).collect())?;
    let grouped_mean = grouped(dimensions.iter().map(|d| col(d.as_str()).mean()).collect())?;
    let grouped_max = grouped(dimensions.iter().map(|d| col(d.as_str()).max()).collect())?;

    Ok(AutosData {
      df,
      makes,
      make_ids: Column::new("make_id".into(), ids),
      row_make_ids: Column::new("make_id".into(), row_ids),
      dimensions,
      grouped_min,
      grouped_mean,
      grouped_max,
    })
  }

  /// Sorted unique manufacturer names, in the order every other accessor
  /// follows.
  pub fn make_names(&self) -> &[String] { &self.makes }

  /// Title-cased display labels, one per manufacturer.
  pub fn make_labels(&self) -> Vec<String> {
    self.makes.iter().map(|m| title_case(m)).collect()
  }

  /// One numeric id per manufacturer, 0 through M-1.
  pub fn make_ids(&self) -> &Column { &self.make_ids }

  /// The manufacturer id of every row in the raw table.
  pub fn row_make_ids(&self) -> &Column { &self.row_make_ids }

  /// Names of the numeric measurement columns.
  pub fn dimensions(&self) -> &[String] { &self.dimensions }

  /// A raw column of the underlying table.
  pub fn column(&self, name: &str) -> PolarsResult<&Column> { self.df.column(name) }

  pub fn grouped_min(&self) -> &DataFrame { &self.grouped_min }
  pub fn grouped_mean(&self) -> &DataFrame { &self.grouped_mean }
  pub fn grouped_max(&self) -> &DataFrame { &self.grouped_max }

  /// Group-wise minimum of every dimension, for one manufacturer.
  pub fn min_row(&self, make_index: usize) -> PolarsResult<Vec<f64>> {
    self.stat_row(&self.grouped_min, make_index)
  }

  pub fn mean_row(&self, make_index: usize) -> PolarsResult<Vec<f64>> {
    self.stat_row(&self.grouped_mean, make_index)
  }

  pub fn max_row(&self, make_index: usize) -> PolarsResult<Vec<f64>> {
    self.stat_row(&self.grouped_max, make_index)
  }

  fn stat_row(&self, frame: &DataFrame, make_index: usize) -> PolarsResult<Vec<f64>> {
    self
      .dimensions
      .iter()
      .map(|d| frame.column(d.as_str())?.get(make_index)?.try_extract::<f64>())
      .collect()
  }
}

fn title_case(name: &str) -> String {
  let mut out = String::with_capacity(name.len());
  let mut at_word_start = true;
  for c in name.chars() {
    if at_word_start {
      out.extend(c.to_uppercase());
    } else {
      out.push(c);
    }
    at_word_start = !c.is_alphanumeric();
  }
  out
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  fn sample() -> DataFrame {
    df! {
      "make" => &["honda", "audi", "honda", "bmw", "audi", "bmw"],
      "price" => &[7000, 16000, 9000, 21000, 18000, 25000],
      "city mpg" => &[30, 19, 28, 17, 21, 15],
    }
    .unwrap()
  }

  #[test]
  fn make_order_is_sorted_and_stable() {
    let data = AutosData::new(sample()).unwrap();

    assert_eq!(data.make_names(), ["audi", "bmw", "honda"]);
    assert_eq!(data.make_labels(), ["Audi", "Bmw", "Honda"]);

    let ids: Vec<i32> =
      (0..3).map(|i| data.make_ids().get(i).unwrap().try_extract().unwrap()).collect();
    assert_eq!(ids, [0, 1, 2]);
  }

  #[test]
  fn row_make_ids_follow_the_sorted_order() {
    let data = AutosData::new(sample()).unwrap();

    let ids: Vec<i32> =
      (0..6).map(|i| data.row_make_ids().get(i).unwrap().try_extract().unwrap()).collect();
    assert_eq!(ids, [2, 0, 2, 1, 0, 1]);
  }

  #[test]
  fn dimensions_exclude_the_grouping_key() {
    let data = AutosData::new(sample()).unwrap();
    assert_eq!(data.dimensions(), ["price", "city mpg"]);
  }

  #[test]
  fn grouped_frames_match_the_make_order() {
    let data = AutosData::new(sample()).unwrap();

    // audi is make 0: prices 16000 and 18000.
    let min: f64 =
      data.grouped_min().column("price").unwrap().get(0).unwrap().try_extract().unwrap();
    let max: f64 =
      data.grouped_max().column("price").unwrap().get(0).unwrap().try_extract().unwrap();
    assert_relative_eq!(min, 16000.0);
    assert_relative_eq!(max, 18000.0);

    let mean: f64 =
      data.grouped_mean().column("price").unwrap().get(0).unwrap().try_extract().unwrap();
    assert_relative_eq!(mean, 17000.0);
  }

  #[test]
  fn stat_rows_span_every_dimension() {
    let data = AutosData::new(sample()).unwrap();

    let row = data.mean_row(2).unwrap();
    assert_eq!(row.len(), 2);
    assert_relative_eq!(row[0], 8000.0);
    assert_relative_eq!(row[1], 29.0);
  }

  #[test]
  fn missing_make_column_is_an_error() {
    let df = df! { "price" => &[1, 2] }.unwrap();
    assert!(AutosData::new(df).is_err());
  }

  #[test]
  fn title_case_capitalizes_each_word() {
    assert_eq!(title_case("alfa-romero"), "Alfa-Romero");
    assert_eq!(title_case("mercedes benz"), "Mercedes Benz");
  }
}
