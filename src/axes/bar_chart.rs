use kurbo::{Affine, BezPath, Point};
use peniko::Brush;
use polars::prelude::*;

use crate::{
  Range, ResultExt,
  bounds::{DataBounds, DataRange},
  render::Render,
};

/// Vertical bars at numeric x positions. Each `stack` call adds a segment
/// drawn on top of the previous ones, sharing a running baseline per bar.
pub struct BarChartAxes<'a> {
  x:        &'a Column,
  segments: Vec<BarSegment>,
  width:    f64,
}

struct BarSegment {
  values: Column,
  color:  Option<Brush>,
}

impl<'a> BarChartAxes<'a> {
  pub(crate) fn new(x: &'a Column) -> Self { BarChartAxes { x, segments: vec![], width: 0.8 } }

  /// Half-width of each bar, in x data units.
  pub fn width(&mut self, width: f64) -> &mut Self {
    self.width = width;
    self
  }

  pub fn stack(&mut self, values: Column) -> &mut Self {
    self.segments.push(BarSegment { values, color: None });
    self
  }

  pub fn stack_with(&mut self, values: Column, color: impl Into<Brush>) -> &mut Self {
    self.segments.push(BarSegment { values, color: Some(color.into()) });
    self
  }

  fn value(&self, segment: usize, index: usize) -> Option<f64> {
    self.segments[segment].values.get(index).and_then(|v| v.try_extract::<f64>()).log_err()
  }

  pub(crate) fn data_bounds(&self) -> PolarsResult<DataBounds> {
    let mut top = 0.0_f64;
    for i in 0..self.x.len() {
      let total: f64 = (0..self.segments.len()).filter_map(|s| self.value(s, i)).sum();
      top = top.max(total);
    }

    Ok(DataBounds {
      x: DataRange::from_column(self.x)?,
      y: DataRange { range: Range::new(0.0, top), margin_min: false, margin_max: true },
    })
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    let mut baselines = vec![0.0_f64; self.x.len()];

    for (si, segment) in self.segments.iter().enumerate() {
      let mut fill = BezPath::new();

      for i in 0..self.x.len() {
        let Some(x) = self.x.get(i).and_then(|v| v.try_extract::<f64>()).log_err() else {
          continue;
        };
        let Some(value) = self.value(si, i) else { continue };
        let bottom = baselines[i];
        let top = bottom + value;

        fill.move_to(Point::new(x - self.width, bottom));
        fill.line_to(Point::new(x - self.width, top));
        fill.line_to(Point::new(x + self.width, top));
        fill.line_to(Point::new(x + self.width, bottom));
        fill.close_path();

        baselines[i] = top;
      }

      let brush = match &segment.color {
        Some(color) => color.clone(),
        None => {
          let t = si as f32 / (self.segments.len().max(2) - 1) as f32;
          crate::theme::ROCKET.sample(t).into()
        }
      };
      render.fill(&fill, transform, &brush);
    }
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use polars::prelude::*;

  use super::*;

  #[test]
  fn stacked_segments_share_a_running_total() {
    let x = Column::new("x".into(), vec![0i32, 1, 2]);
    let mut bars = BarChartAxes::new(&x);
    bars.stack(Column::new("a".into(), vec![1.0, 2.0, 3.0]));
    bars.stack(Column::new("b".into(), vec![4.0, 1.0, 2.0]));

    let bounds = bars.data_bounds().unwrap();
    assert_relative_eq!(bounds.y.range.min, 0.0);
    assert_relative_eq!(bounds.y.range.max, 5.0);
    assert!(!bounds.y.margin_min);
    assert!(bounds.y.margin_max);
  }

  #[test]
  fn bars_without_segments_have_an_empty_vertical_range() {
    let x = Column::new("x".into(), vec![0i32, 1]);
    let bars = BarChartAxes::new(&x);

    let bounds = bars.data_bounds().unwrap();
    assert_relative_eq!(bounds.y.range.size(), 0.0);
  }
}
