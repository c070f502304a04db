use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::{Brush, Color};
use polars::prelude::*;

use crate::{ResultExt, bounds::DataBounds, bounds::DataRange, render::Render};

pub struct LineAxes<'a> {
  x:       &'a Column,
  y:       &'a Column,
  options: LineOptions,
}

pub struct LineOptions {
  pub width: f64,
  pub color: Brush,
  pub dash:  Option<Vec<f64>>,
}

impl Default for LineOptions {
  fn default() -> Self {
    LineOptions { width: 2.0, color: Brush::Solid(Color::from_rgb8(117, 158, 208)), dash: None }
  }
}

impl<'a> LineAxes<'a> {
  pub(crate) fn new(x: &'a Column, y: &'a Column) -> Self {
    LineAxes { x, y, options: LineOptions::default() }
  }

  pub fn width(&mut self, width: f64) -> &mut Self {
    self.options.width = width;
    self
  }

  pub fn color(&mut self, color: impl Into<Brush>) -> &mut Self {
    self.options.color = color.into();
    self
  }

  pub fn dash(&mut self, dash: Vec<f64>) -> &mut Self {
    self.options.dash = Some(dash);
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
    let mut shape = BezPath::new();

    for (i, point) in self.iter().map(|p| transform * p).enumerate() {
      if i == 0 {
        shape.move_to(point);
      } else {
        shape.line_to(point);
      }
    }

    let mut stroke = Stroke::new(self.options.width);
    if let Some(dash) = &self.options.dash {
      stroke = stroke.with_dashes(0.0, dash.clone());
    }

    render.stroke(&shape, Affine::IDENTITY, &self.options.color, &stroke);
  }
}
