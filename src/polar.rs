use std::f64::consts::{FRAC_PI_2, PI};

use kurbo::Point;

/// Angular layout for a radar chart: `spoke_count` evenly spaced spokes
/// covering `sweep` radians, starting at `offset`.
#[derive(Clone)]
pub struct RadarProjection {
  pub spoke_count: usize,
  pub sweep:       f64,
  pub offset:      f64,
  pub patch:       PatchKind,
  pub spine:       SpineKind,
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchKind {
  #[default]
  Polygon,
  Circle,
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum SpineKind {
  #[default]
  Polygon,
  Circle,
}

impl RadarProjection {
  pub fn new(spoke_count: usize) -> Self {
    RadarProjection {
      spoke_count,
      sweep: 1.75 * PI,
      offset: FRAC_PI_2,
      patch: PatchKind::default(),
      spine: SpineKind::default(),
    }
  }

  pub fn sweep(mut self, sweep: f64) -> Self {
    self.sweep = sweep;
    self
  }

  pub fn offset(mut self, offset: f64) -> Self {
    self.offset = offset;
    self
  }

  pub fn patch(mut self, patch: PatchKind) -> Self {
    self.patch = patch;
    self
  }

  pub fn spine(mut self, spine: SpineKind) -> Self {
    self.spine = spine;
    self
  }

  pub fn angle(&self, spoke: usize) -> f64 {
    self.offset + self.sweep * spoke as f64 / self.spoke_count as f64
  }

  /// One angle per spoke. Empty when there are no spokes.
  pub fn spoke_angles(&self) -> Vec<f64> {
    (0..self.spoke_count).map(|i| self.angle(i)).collect()
  }

  /// Places a point `radius` away from the center of the unit square, along
  /// the given spoke. The patch inscribes the square at `radius` 0.5.
  pub fn to_cartesian(&self, spoke: usize, radius: f64) -> Point {
    let theta = self.angle(spoke);
    Point::new(0.5 + radius * theta.cos(), 0.5 + radius * theta.sin())
  }

  /// Vertices of the patch polygon inscribed in the unit square, one per
  /// spoke.
  pub fn unit_polygon(&self) -> Vec<Point> {
    (0..self.spoke_count).map(|i| self.to_cartesian(i, 0.5)).collect()
  }
}

/// Closes a polyline by repeating its first vertex. Idempotent.
pub fn close_polyline(points: &mut Vec<Point>) {
  match (points.first(), points.last()) {
    (Some(first), Some(last)) if first != last => {
      let first = *first;
      points.push(first);
    }
    _ => {}
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  #[test]
  fn spoke_angles_are_evenly_spaced() {
    let projection = RadarProjection::new(7);
    let angles = projection.spoke_angles();

    assert_eq!(angles.len(), 7);
    assert_relative_eq!(angles[0], FRAC_PI_2);

    let step = 1.75 * PI / 7.0;
    for pair in angles.windows(2) {
      assert_relative_eq!(pair[1] - pair[0], step);
    }
  }

  #[test]
  fn spoke_angles_cover_the_sweep() {
    let projection = RadarProjection::new(4);
    let angles = projection.spoke_angles();

    // The last spoke sits one step short of offset + sweep.
    assert_relative_eq!(angles[3], FRAC_PI_2 + 1.75 * PI * 3.0 / 4.0);
  }

  #[test]
  fn zero_spokes_yield_no_angles() {
    let projection = RadarProjection::new(0);
    assert!(projection.spoke_angles().is_empty());
    assert!(projection.unit_polygon().is_empty());
  }

  #[test]
  fn one_spoke_sits_at_the_offset() {
    let projection = RadarProjection::new(1);
    let angles = projection.spoke_angles();

    assert_eq!(angles.len(), 1);
    assert_relative_eq!(angles[0], FRAC_PI_2);
    assert_eq!(projection.unit_polygon().len(), 1);
  }

  #[test]
  fn custom_sweep_and_offset() {
    let projection = RadarProjection::new(4).sweep(PI).offset(0.0);
    let angles = projection.spoke_angles();

    assert_relative_eq!(angles[0], 0.0);
    assert_relative_eq!(angles[2], FRAC_PI_2);
  }

  #[test]
  fn unit_polygon_sits_on_the_half_radius() {
    let projection = RadarProjection::new(5);

    for vertex in projection.unit_polygon() {
      let distance = vertex.distance(Point::new(0.5, 0.5));
      assert_relative_eq!(distance, 0.5, epsilon = 1e-12);
    }
  }

  #[test]
  fn close_polyline_repeats_the_first_vertex() {
    let mut points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
    close_polyline(&mut points);

    assert_eq!(points.len(), 4);
    assert_eq!(points[0], points[3]);
  }

  #[test]
  fn close_polyline_is_idempotent() {
    let mut points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
    close_polyline(&mut points);
    close_polyline(&mut points);

    assert_eq!(points.len(), 4);
  }

  #[test]
  fn close_polyline_ignores_empty_input() {
    let mut points = vec![];
    close_polyline(&mut points);
    assert!(points.is_empty());
  }
}
