use kurbo::{Affine, BezPath, Circle, Line, Point, Stroke};
use peniko::Color;

use crate::{
  polar::{PatchKind, RadarProjection, SpineKind, close_polyline},
  render::{Align, DrawText, Render},
};

/// Closed polygonal traces over evenly spaced spokes. Data space is the unit
/// square, with the patch inscribed at radius 0.5 around its center; the
/// incoming transform is expected to map it to a square viewport.
pub struct RadarAxes {
  projection: RadarProjection,
  labels:     Vec<String>,
  traces:     Vec<RadarTrace>,
}

struct RadarTrace {
  values:     Vec<f64>,
  color:      Color,
  fill_alpha: f32,
}

const GRID_COLOR: Color = Color::from_rgb8(200, 200, 200);
const SPINE_COLOR: Color = Color::from_rgb8(96, 96, 96);

impl RadarAxes {
  pub(crate) fn new(projection: RadarProjection) -> Self {
    RadarAxes { projection, labels: vec![], traces: vec![] }
  }

  pub fn projection(&self) -> &RadarProjection { &self.projection }

  /// One label per spoke, drawn just outside the patch.
  pub fn spoke_labels(&mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
    self.labels = labels.into_iter().map(Into::into).collect();
    self
  }

  /// Adds a filled trace, one value per spoke.
  pub fn trace(&mut self, values: Vec<f64>, color: Color, fill_alpha: f32) -> &mut Self {
    self.traces.push(RadarTrace { values, color, fill_alpha });
    self
  }

  /// Largest value across all traces, used as the radial full scale.
  fn radial_scale(&self) -> f64 {
    let max = self.traces.iter().flat_map(|t| t.values.iter().copied()).fold(f64::MIN, f64::max);
    if max > 0.0 { max } else { 1.0 }
  }

  fn polygon(&self, values: &[f64], scale: f64) -> Vec<Point> {
    let mut points = values
      .iter()
      .take(self.projection.spoke_count)
      .enumerate()
      .map(|(i, v)| self.projection.to_cartesian(i, 0.5 * v / scale))
      .collect();
    close_polyline(&mut points);
    points
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    if self.projection.spoke_count == 0 {
      return;
    }

    self.draw_grid(render, transform);
    self.draw_spine(render, transform);

    let scale = self.radial_scale();
    for trace in &self.traces {
      let points = self.polygon(&trace.values, scale);
      let path = to_path(&points);

      render.fill(&path, transform, trace.color.with_alpha(trace.fill_alpha));
      render.stroke(&(transform * path), Affine::IDENTITY, trace.color, &Stroke::new(2.0));
    }

    for (i, label) in self.labels.iter().take(self.projection.spoke_count).enumerate() {
      render.draw_text(DrawText {
        text: label,
        size: 13.0,
        position: transform * self.projection.to_cartesian(i, 0.66),
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }
  }

  fn draw_grid(&self, render: &mut Render, transform: Affine) {
    let stroke = Stroke::new(1.0);

    for level in [0.25, 0.5, 0.75] {
      match self.projection.patch {
        PatchKind::Polygon => {
          let mut ring: Vec<Point> = (0..self.projection.spoke_count)
            .map(|i| self.projection.to_cartesian(i, 0.5 * level))
            .collect();
          close_polyline(&mut ring);
          render.stroke(&(transform * to_path(&ring)), Affine::IDENTITY, GRID_COLOR, &stroke);
        }
        PatchKind::Circle => {
          let ring = transform * Circle::new(Point::new(0.5, 0.5), 0.5 * level);
          render.stroke(&ring, Affine::IDENTITY, GRID_COLOR, &stroke);
        }
      }
    }

    let center = transform * Point::new(0.5, 0.5);
    for i in 0..self.projection.spoke_count {
      let edge = transform * self.projection.to_cartesian(i, 0.5);
      render.stroke(&Line::new(center, edge), Affine::IDENTITY, GRID_COLOR, &stroke);
    }
  }

  fn draw_spine(&self, render: &mut Render, transform: Affine) {
    let stroke = Stroke::new(1.5);

    match self.projection.spine {
      SpineKind::Polygon => {
        let mut verts = self.projection.unit_polygon();
        close_polyline(&mut verts);
        render.stroke(&(transform * to_path(&verts)), Affine::IDENTITY, SPINE_COLOR, &stroke);
      }
      SpineKind::Circle => {
        let spine = transform * Circle::new(Point::new(0.5, 0.5), 0.5);
        render.stroke(&spine, Affine::IDENTITY, SPINE_COLOR, &stroke);
      }
    }
  }
}

fn to_path(points: &[Point]) -> BezPath {
  let mut path = BezPath::new();
  for (i, point) in points.iter().enumerate() {
    if i == 0 {
      path.move_to(*point);
    } else {
      path.line_to(*point);
    }
  }
  path
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  #[test]
  fn trace_polygons_are_closed() {
    let mut axes = RadarAxes::new(RadarProjection::new(5));
    axes.trace(vec![1.0, 2.0, 3.0, 4.0, 5.0], Color::BLACK, 0.3);

    let points = axes.polygon(&[1.0, 2.0, 3.0, 4.0, 5.0], axes.radial_scale());
    assert_eq!(points.len(), 6);
    assert_eq!(points[0], points[5]);
  }

  #[test]
  fn one_spoke_polygon_is_a_single_closed_vertex() {
    let axes = RadarAxes::new(RadarProjection::new(1));
    let points = axes.polygon(&[2.0], 2.0);

    // Already closed, so nothing is appended.
    assert_eq!(points.len(), 1);
    assert_relative_eq!(points[0].distance(Point::new(0.5, 0.5)), 0.5, epsilon = 1e-12);
  }

  #[test]
  fn radial_scale_tracks_the_largest_trace_value() {
    let mut axes = RadarAxes::new(RadarProjection::new(3));
    axes.trace(vec![1.0, 2.0, 4.0], Color::BLACK, 0.3);
    axes.trace(vec![8.0, 0.5, 1.0], Color::BLACK, 0.3);

    assert_relative_eq!(axes.radial_scale(), 8.0);
  }

  #[test]
  fn radial_scale_defaults_to_one_without_positive_values() {
    let axes = RadarAxes::new(RadarProjection::new(3));
    assert_relative_eq!(axes.radial_scale(), 1.0);
  }

  #[test]
  fn full_scale_values_land_on_the_spine() {
    let mut axes = RadarAxes::new(RadarProjection::new(4));
    axes.trace(vec![3.0, 3.0, 3.0, 3.0], Color::BLACK, 0.2);

    for point in axes.polygon(&[3.0, 3.0, 3.0, 3.0], axes.radial_scale()) {
      assert_relative_eq!(point.distance(Point::new(0.5, 0.5)), 0.5, epsilon = 1e-12);
    }
  }

  #[test]
  fn extra_values_beyond_the_spoke_count_are_dropped() {
    let axes = RadarAxes::new(RadarProjection::new(3));
    let points = axes.polygon(&[1.0, 1.0, 1.0, 1.0, 1.0], 1.0);

    // Three spokes plus the closing vertex.
    assert_eq!(points.len(), 4);
  }
}
