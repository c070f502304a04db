mod bar_chart;
mod line;
mod radar;
mod scatter;

pub use bar_chart::BarChartAxes;
pub use line::LineAxes;
pub use radar::RadarAxes;
pub use scatter::ScatterAxes;

use kurbo::Affine;
use polars::prelude::*;

use crate::{
  Plot, Range,
  bounds::{DataBounds, DataRange},
  polar::RadarProjection,
  render::Render,
};

pub enum Axes<'a> {
  Scatter(ScatterAxes<'a>),
  Line(LineAxes<'a>),
  BarChart(BarChartAxes<'a>),
  Radar(RadarAxes),
}

impl<'a> Plot<'a> {
  pub fn scatter(&mut self, x: &'a Column, y: &'a Column) -> &mut ScatterAxes<'a> {
    self.axes.push(Axes::Scatter(ScatterAxes::new(x, y)));
    match self.axes.last_mut().unwrap() {
      Axes::Scatter(sa) => sa,
      _ => unreachable!(),
    }
  }

  pub fn line(&mut self, x: &'a Column, y: &'a Column) -> &mut LineAxes<'a> {
    self.axes.push(Axes::Line(LineAxes::new(x, y)));
    match self.axes.last_mut().unwrap() {
      Axes::Line(la) => la,
      _ => unreachable!(),
    }
  }

  pub fn bar_chart(&mut self, x: &'a Column) -> &mut BarChartAxes<'a> {
    self.axes.push(Axes::BarChart(BarChartAxes::new(x)));
    match self.axes.last_mut().unwrap() {
      Axes::BarChart(ba) => ba,
      _ => unreachable!(),
    }
  }

  pub fn radar(&mut self, projection: RadarProjection) -> &mut RadarAxes {
    self.axes.push(Axes::Radar(RadarAxes::new(projection)));
    match self.axes.last_mut().unwrap() {
      Axes::Radar(ra) => ra,
      _ => unreachable!(),
    }
  }
}

impl Axes<'_> {
  pub(crate) fn data_bounds(&self) -> PolarsResult<DataBounds> {
    match self {
      Axes::Scatter(sa) => sa.data_bounds(),
      Axes::Line(la) => la.data_bounds(),
      Axes::BarChart(ba) => ba.data_bounds(),
      Axes::Radar(_) => Ok(DataBounds {
        x: DataRange { range: Range::new(0.0, 1.0), margin_min: false, margin_max: false },
        y: DataRange { range: Range::new(0.0, 1.0), margin_min: false, margin_max: false },
      }),
    }
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    match self {
      Axes::Scatter(sa) => sa.draw(render, transform),
      Axes::Line(la) => la.draw(render, transform),
      Axes::BarChart(ba) => ba.draw(render, transform),
      Axes::Radar(ra) => ra.draw(render, transform),
    }
  }

  pub(crate) fn is_radar(&self) -> bool { matches!(self, Axes::Radar(_)) }
}
