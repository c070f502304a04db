use kurbo::{Affine, Point};
use peniko::{Brush, Color};
use polars::prelude::*;

use crate::{Marker, ResultExt, bounds::DataBounds, bounds::DataRange, render::Render};

pub struct ScatterAxes<'a> {
  x:       &'a Column,
  y:       &'a Column,
  options: ScatterOptions,
}

pub struct ScatterOptions {
  pub size:   f64,
  pub color:  Brush,
  pub marker: Marker,
}

impl Default for ScatterOptions {
  fn default() -> Self {
    ScatterOptions {
      size:   10.0,
      color:  Brush::Solid(Color::from_rgb8(117, 158, 208)),
      marker: Marker::default(),
    }
  }
}

impl<'a> ScatterAxes<'a> {
  pub(crate) fn new(x: &'a Column, y: &'a Column) -> Self {
    ScatterAxes { x, y, options: ScatterOptions::default() }
  }

  pub fn size(&mut self, size: f64) -> &mut Self {
    self.options.size = size;
    self
  }

  pub fn color(&mut self, color: impl Into<Brush>) -> &mut Self {
    self.options.color = color.into();
    self
  }

  pub fn marker(&mut self, marker: Marker) -> &mut Self {
    self.options.marker = marker;
    self
  }

  pub(crate) fn data_bounds(&self) -> PolarsResult<DataBounds> {
    Ok(DataBounds { x: DataRange::from_column(self.x)?, y: DataRange::from_column(self.y)? })
  }

  fn iter<'b>(&'b self) -> impl Iterator<Item = Point> + 'b {
    (0..self.x.len().min(self.y.len())).filter_map(move |i| {
      let x = self.x.get(i).and_then(|v| v.try_extract::<f64>()).log_err()?;
      let y = self.y.get(i).and_then(|v| v.try_extract::<f64>()).log_err()?;

      Some(Point::new(x, y))
    })
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    let path = self.options.marker.to_path(0.01);

    for point in self.iter().map(|p| transform * p) {
      let placement = Affine::translate(point.to_vec2()) * Affine::scale(self.options.size);
      render.fill(&(placement * path.clone()), Affine::IDENTITY, &self.options.color);
    }
  }
}
