use polars::prelude::*;

use crate::{AutosData, Figure, Marker, Plot, polar::RadarProjection, theme::CYCLE};

/// One radar cell per manufacturer, each tracing the group-wise max, mean,
/// and min over every measured dimension.
pub fn autos_radar_grid<'a>(figure: &mut Figure<'a>, data: &'a AutosData) -> PolarsResult<()> {
  figure.title(&format!(
    "Radar Plot of {} Dimensions\nfor {} Manufacturers",
    data.dimensions().len(),
    data.make_names().len()
  ));
  figure.legend_patch("Max", CYCLE[1].with_alpha(0.7));
  figure.legend_patch("Mean", CYCLE[2].with_alpha(0.7));
  figure.legend_patch("Min", CYCLE[0].with_alpha(0.7));

  let cols = figure.cols();
  let spokes = data.dimensions().len();
  let labels: Vec<String> = data.dimensions().iter().map(|d| d.replace(' ', "\n")).collect();

  for (i, label) in data.make_labels().into_iter().enumerate() {
    let plot = figure.subplot(i / cols, i % cols);
    plot.title(&label);

    let radar = plot.radar(RadarProjection::new(spokes));
    radar.spoke_labels(labels.clone());
    radar.trace(data.max_row(i)?, CYCLE[1], 0.2);
    radar.trace(data.mean_row(i)?, CYCLE[2], 0.3);
    radar.trace(data.min_row(i)?, CYCLE[0], 0.4);
  }

  Ok(())
}

/// City and highway mileage of every listed model, scattered over make ids.
pub fn autos_mpg_plot<'a>(plot: &mut Plot<'a>, data: &'a AutosData) -> PolarsResult<()> {
  plot.title("City and Highway Mileage Ranges");
  plot.x.title("Make").tick_labels(data.make_labels());
  plot.y.title("MPG");

  // Diamonds keep overlapping city/highway points tellable apart.
  plot
    .scatter(data.row_make_ids(), data.column("highway mpg")?)
    .color(CYCLE[3].with_alpha(0.4))
    .marker(Marker::Diamond)
    .size(16.0);
  plot
    .scatter(data.row_make_ids(), data.column("city mpg")?)
    .color(CYCLE[0].with_alpha(0.4))
    .size(16.0);

  plot.legend_patch("City", CYCLE[0].with_alpha(0.7));
  plot.legend_patch("Highway", CYCLE[3].with_alpha(0.7));
  Ok(())
}

/// Group-wise min/mean/max price lines per manufacturer.
pub fn autos_price_plot<'a>(plot: &mut Plot<'a>, data: &'a AutosData) -> PolarsResult<()> {
  plot.title("Auto Price Ranges");
  plot.x.title("Make").tick_labels(data.make_labels());
  plot.y.title("Price");

  // The min/max envelope is dashed; only the mean line is solid.
  plot
    .line(data.make_ids(), data.grouped_min().column("price")?)
    .width(4.0)
    .color(CYCLE[2].with_alpha(0.7))
    .dash(vec![12.0, 6.0]);
  plot
    .line(data.make_ids(), data.grouped_mean().column("price")?)
    .width(4.0)
    .color(CYCLE[3].with_alpha(0.7));
  plot
    .line(data.make_ids(), data.grouped_max().column("price")?)
    .width(4.0)
    .color(CYCLE[4].with_alpha(0.7))
    .dash(vec![12.0, 6.0]);

  plot.legend_patch("High", CYCLE[4].with_alpha(0.7));
  plot.legend_patch("Mean", CYCLE[3].with_alpha(0.7));
  plot.legend_patch("Low", CYCLE[2].with_alpha(0.7));
  Ok(())
}

/// Stacked min/mean/max riskiness bars per manufacturer.
pub fn autos_riskiness_plot<'a>(
  plot: &mut Plot<'a>,
  data: &'a AutosData,
  legend: bool,
  labels: bool,
) -> PolarsResult<()> {
  plot.title("Inverse Risk");
  stacked_stat_bars(plot, data, "riskiness")?;

  if labels {
    plot.x.title("Make").tick_labels(data.make_labels());
    plot.y.title("Inverse Risk");
  }
  if legend {
    stat_legend(plot);
  }
  Ok(())
}

/// Stacked min/mean/max normalized-loss bars per manufacturer.
pub fn autos_losses_plot<'a>(
  plot: &mut Plot<'a>,
  data: &'a AutosData,
  legend: bool,
  labels: bool,
) -> PolarsResult<()> {
  plot.title("Inverse Losses");
  stacked_stat_bars(plot, data, "losses")?;

  if labels {
    plot.x.title("Make").tick_labels(data.make_labels());
    plot.y.title("Inverse Losses");
  }
  if legend {
    stat_legend(plot);
  }
  Ok(())
}

/// Stacked bars of summed riskiness and losses, min/mean/max per
/// manufacturer.
pub fn autos_loss_and_risk_plot<'a>(
  plot: &mut Plot<'a>,
  data: &'a AutosData,
  x_label: bool,
  rotate_ticks: bool,
) -> PolarsResult<()> {
  plot.title("Combined Losses and Riskiness Data\n(Inverted, Normalized)");

  let bars = plot.bar_chart(data.make_ids());
  bars.width(0.4);
  bars.stack_with(summed(data.grouped_min(), "riskiness", "losses")?, CYCLE[0].with_alpha(0.7));
  bars.stack_with(summed(data.grouped_mean(), "riskiness", "losses")?, CYCLE[3].with_alpha(0.7));
  bars.stack_with(summed(data.grouped_max(), "riskiness", "losses")?, CYCLE[2].with_alpha(0.7));

  plot.x.tick_labels(data.make_labels());
  if rotate_ticks {
    plot.x.rotation(70.0);
  }
  if x_label {
    plot.x.title("Make");
  }
  plot.y.title("Risk");
  stat_legend(plot);
  Ok(())
}

fn stacked_stat_bars<'a>(
  plot: &mut Plot<'a>,
  data: &'a AutosData,
  column: &str,
) -> PolarsResult<()> {
  let bars = plot.bar_chart(data.make_ids());
  bars.width(0.25);
  bars.stack_with(data.grouped_min().column(column)?.clone(), CYCLE[0].with_alpha(0.7));
  bars.stack_with(data.grouped_mean().column(column)?.clone(), CYCLE[3].with_alpha(0.7));
  bars.stack_with(data.grouped_max().column(column)?.clone(), CYCLE[2].with_alpha(0.7));
  Ok(())
}

fn stat_legend(plot: &mut Plot<'_>) {
  plot.legend_patch("Min", CYCLE[0].with_alpha(0.7));
  plot.legend_patch("Mean", CYCLE[3].with_alpha(0.7));
  plot.legend_patch("Max", CYCLE[2].with_alpha(0.7));
}

fn summed(frame: &DataFrame, a: &str, b: &str) -> PolarsResult<Column> {
  let sum = (frame.column(a)?.as_materialized_series() + frame.column(b)?.as_materialized_series())?;
  Ok(sum.into())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> AutosData {
    let df = df! {
      "make" => &[
        "honda", "audi", "honda", "bmw", "audi", "bmw",
        "mazda", "mazda", "nissan", "nissan",
      ],
      "city mpg" => &[30, 19, 28, 17, 21, 15, 26, 24, 27, 23],
      "highway mpg" => &[34, 25, 33, 23, 27, 20, 32, 29, 34, 29],
      "price" => &[7000, 16000, 9000, 21000, 18000, 25000, 8000, 11000, 7500, 13000],
      "riskiness" => &[0.8, 0.5, 0.7, 0.4, 0.6, 0.3, 0.9, 0.7, 0.8, 0.6],
      "losses" => &[0.7, 0.4, 0.6, 0.3, 0.5, 0.4, 0.8, 0.6, 0.7, 0.5],
    }
    .unwrap();
    AutosData::new(df).unwrap()
  }

  #[test]
  fn radar_grid_fills_one_cell_per_make() {
    let data = sample();
    let mut figure = Figure::new(2, 3);

    autos_radar_grid(&mut figure, &data).unwrap();

    for i in 0..data.make_names().len() {
      let plot = figure.subplot(i / 3, i % 3);
      assert_eq!(plot.axes.len(), 1);
      assert!(plot.axes[0].is_radar());
    }
  }

  #[test]
  fn radar_traces_cover_every_dimension() {
    let data = sample();
    let mut figure = Figure::new(2, 3);

    autos_radar_grid(&mut figure, &data).unwrap();

    let plot = figure.subplot(0, 0);
    let crate::Axes::Radar(radar) = &plot.axes[0] else { panic!("expected radar axes") };
    assert_eq!(radar.projection().spoke_count, data.dimensions().len());
  }

  #[test]
  fn mpg_plot_builds_two_scatter_series() {
    let data = sample();
    let mut figure = Figure::new(1, 1);

    autos_mpg_plot(figure.plot(), &data).unwrap();
    assert_eq!(figure.plot().axes.len(), 2);
  }

  #[test]
  fn price_plot_builds_three_lines() {
    let data = sample();
    let mut figure = Figure::new(1, 1);

    autos_price_plot(figure.plot(), &data).unwrap();
    assert_eq!(figure.plot().axes.len(), 3);
  }

  #[test]
  fn risk_and_loss_plots_build_without_labels_or_legends() {
    let data = sample();
    let mut figure = Figure::new(2, 1);

    autos_riskiness_plot(figure.subplot(0, 0), &data, false, false).unwrap();
    autos_losses_plot(figure.subplot(1, 0), &data, false, false).unwrap();
  }

  #[test]
  fn combined_plot_requires_both_columns() {
    let data = sample();
    let mut figure = Figure::new(1, 1);

    autos_loss_and_risk_plot(figure.plot(), &data, true, true).unwrap();

    let df = df! {
      "make" => &["audi", "bmw"],
      "riskiness" => &[0.5, 0.4],
    }
    .unwrap();
    let partial = AutosData::new(df).unwrap();
    let mut figure = Figure::new(1, 1);
    assert!(autos_loss_and_risk_plot(figure.plot(), &partial, true, false).is_err());
  }

  #[test]
  fn summed_adds_grouped_columns_elementwise() {
    let data = sample();
    let sum = summed(data.grouped_min(), "riskiness", "losses").unwrap();

    // audi sits first: min riskiness 0.5 + min losses 0.4.
    let first: f64 = sum.get(0).unwrap().try_extract().unwrap();
    approx::assert_relative_eq!(first, 0.9);
  }
}
