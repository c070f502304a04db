use kurbo::{BezPath, Circle, Point, Rect, Shape};

/// Unit-sized marker shapes, centered on the origin. Scatter axes scale them
/// to the configured point size.
#[derive(Clone, Copy, Default)]
pub enum Marker {
  #[default]
  Circle,
  Square,
  Triangle,
  Diamond,
}

impl Marker {
  pub(crate) fn to_path(&self, tolerance: f64) -> BezPath {
    match self {
      Marker::Circle => Circle::new(Point::new(0.0, 0.0), 0.5).to_path(tolerance),
      Marker::Square => Rect::new(-0.5, -0.5, 0.5, 0.5).to_path(tolerance),
      Marker::Triangle => {
        // sqrt(3) / 4.0, using the unstable SQRT_3 constant.
        const Y: f64 = 1.732050807568877293527446341505872367_f64 / 4.0;

        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, -Y));
        path.line_to(Point::new(0.5, Y));
        path.line_to(Point::new(-0.5, Y));
        path.close_path();
        path
      }
      Marker::Diamond => {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, -0.5));
        path.line_to(Point::new(0.5, 0.0));
        path.line_to(Point::new(0.0, 0.5));
        path.line_to(Point::new(-0.5, 0.0));
        path.close_path();
        path
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_marker_produces_a_closed_path() {
    for marker in [Marker::Circle, Marker::Square, Marker::Triangle, Marker::Diamond] {
      let path = marker.to_path(0.01);
      assert!(!path.elements().is_empty());
    }
  }
}
