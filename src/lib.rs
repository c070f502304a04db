use kurbo::{Affine, Cap, Line, Point, Stroke};
use parley::FontWeight;
use peniko::{Brush, Color};
use polars::prelude::*;

pub mod polar;
pub mod theme;

mod axes;
mod bounds;
mod charts;
mod dataset;
mod figure;
mod legend;
mod marker;
mod render;

pub use axes::{Axes, BarChartAxes, LineAxes, RadarAxes, ScatterAxes};
pub use bounds::{Bounds, Range};
pub use charts::{
  autos_loss_and_risk_plot, autos_losses_plot, autos_mpg_plot, autos_price_plot, autos_radar_grid,
  autos_riskiness_plot,
};
pub use dataset::AutosData;
pub use figure::Figure;
pub use legend::LegendItem;
pub use marker::Marker;

use bounds::DataBounds;
use render::{Align, DrawText, Render};

pub(crate) trait ResultExt<T> {
  fn log_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(value) => Some(value),
      Err(e) => {
        eprintln!("skipping: {e}");
        None
      }
    }
  }
}

/// A single chart: a title, two axis handles, and any number of axes kinds
/// drawn into one viewport.
#[derive(Default)]
pub struct Plot<'a> {
  title:  Option<String>,
  pub x:  Axis,
  pub y:  Axis,
  legend: Vec<LegendItem>,

  pub(crate) axes: Vec<Axes<'a>>,
}

#[derive(Default)]
pub struct Axis {
  title:         Option<String>,
  min:           Option<f64>,
  max:           Option<f64>,
  tick_labels:   Option<Vec<String>>,
  tick_rotation: f64,
}

impl<'a> Plot<'a> {
  pub fn new() -> Plot<'a> { Plot::default() }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn legend_patch(&mut self, label: &str, color: impl Into<Brush>) -> &mut Self {
    self.legend.push(LegendItem::new(label, color));
    self
  }
}

impl Axis {
  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn min(&mut self, min: f64) -> &mut Self {
    self.min = Some(min);
    self
  }

  pub fn max(&mut self, max: f64) -> &mut Self {
    self.max = Some(max);
    self
  }

  /// Replaces numeric ticks with one label per integer position, starting
  /// at zero.
  pub fn tick_labels(&mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
    self.tick_labels = Some(labels.into_iter().map(Into::into).collect());
    self
  }

  /// Tick label rotation, in degrees counterclockwise.
  pub fn rotation(&mut self, degrees: f64) -> &mut Self {
    self.tick_rotation = degrees;
    self
  }
}

const LINE_COLOR: Brush = Brush::Solid(Color::from_rgb8(128, 128, 128));

impl Plot<'_> {
  pub(crate) fn draw(&self, render: &mut Render, area: Bounds) -> PolarsResult<()> {
    if !self.axes.is_empty() && self.axes.iter().all(Axes::is_radar) {
      self.draw_radar(render, area);
      Ok(())
    } else {
      self.draw_cartesian(render, area)
    }
  }

  fn draw_cartesian(&self, render: &mut Render, area: Bounds) -> PolarsResult<()> {
    let min_dim = area.width().abs().min(area.height().abs());
    let f = (min_dim / 1000.0).clamp(0.35, 1.0);
    let viewport = area.shrink(80.0 * f);
    let center_x = (area.x.min + area.x.max) / 2.0;
    let center_y = (area.y.min + area.y.max) / 2.0;

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        size: (32.0 * f) as f32,
        weight: FontWeight::BOLD,
        position: Point { x: center_x, y: viewport.y.max - 34.0 * f },
        horizontal_align: Align::Center,
        ..Default::default()
      });
    }

    if let Some(x_title) = &self.x.title {
      render.draw_text(DrawText {
        text: x_title,
        size: (24.0 * f) as f32,
        position: Point { x: center_x, y: viewport.y.min + 40.0 * f },
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    if let Some(y_title) = &self.y.title {
      render.draw_text(DrawText {
        text: y_title,
        size: (24.0 * f) as f32,
        position: Point { x: viewport.x.min - 40.0 * f, y: center_y },
        transform: Affine::rotate(-std::f64::consts::FRAC_PI_2),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    let border_stroke = Stroke::new(2.0);
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.max, viewport.y.min),
      ),
      Affine::IDENTITY,
      &LINE_COLOR,
      &border_stroke,
    );
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.min, viewport.y.max),
      ),
      Affine::IDENTITY,
      &LINE_COLOR,
      &border_stroke,
    );

    let mut data_bounds: Option<DataBounds> = None;
    for axes in &self.axes {
      let bounds = axes.data_bounds()?;
      data_bounds = Some(match data_bounds {
        Some(existing) => existing.union(bounds),
        None => bounds,
      });
    }
    let Some(data_bounds) = data_bounds else { return Ok(()) };

    let mut x = data_bounds.x.resolve();
    let mut y = data_bounds.y.resolve();
    if let Some(min) = self.x.min {
      x.min = min;
    }
    if let Some(max) = self.x.max {
      x.max = max;
    }
    if let Some(min) = self.y.min {
      y.min = min;
    }
    if let Some(max) = self.y.max {
      y.max = max;
    }

    // Degenerate spans blow up the viewport transform.
    if x.size() == 0.0 {
      x = x.expand(0.5);
    }
    if y.size() == 0.0 {
      y = y.expand(0.5);
    }

    let data = Bounds::new(x, y);
    let transform = data.transform_to(viewport);

    let ticks = 10;
    let iter = data.y.nice_ticks(ticks);
    let precision = iter.precision();
    for (y, vy) in iter
      .map(|v| (v, (transform * Point::new(0.0, v)).y))
      .filter(|(_, vy)| viewport.y.contains(vy))
    {
      render.stroke(
        &Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.min - 10.0 * f, vy)),
        Affine::IDENTITY,
        &LINE_COLOR,
        &border_stroke.clone().with_start_cap(Cap::Butt),
      );
      render.draw_text(DrawText {
        text: &format!("{:.*}", precision, y),
        size: (12.0 * f) as f32,
        position: Point { x: viewport.x.min - 15.0 * f, y: vy },
        horizontal_align: Align::End,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    if let Some(labels) = &self.x.tick_labels {
      self.draw_x_tick_labels(render, labels, transform, viewport, f);
    } else {
      let iter = data.x.nice_ticks(ticks);
      let precision = iter.precision();
      for (x, vx) in iter
        .map(|v| (v, (transform * Point::new(v, 0.0)).x))
        .filter(|(_, vx)| viewport.x.contains(vx))
      {
        render.stroke(
          &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 10.0 * f)),
          Affine::IDENTITY,
          &LINE_COLOR,
          &border_stroke.clone().with_start_cap(Cap::Butt),
        );
        render.draw_text(DrawText {
          text: &format!("{:.*}", precision, x),
          size: (12.0 * f) as f32,
          position: Point { x: vx, y: viewport.y.min + 15.0 * f },
          horizontal_align: Align::Center,
          vertical_align: Align::Start,
          ..Default::default()
        });
      }
    }

    for axes in &self.axes {
      axes.draw(render, transform);
    }

    legend::draw(
      render,
      &self.legend,
      Point::new(viewport.x.min + 12.0 * f, viewport.y.max + 12.0 * f),
      Align::Start,
      Align::Start,
    );

    Ok(())
  }

  fn draw_x_tick_labels(
    &self,
    render: &mut Render,
    labels: &[String],
    transform: Affine,
    viewport: Bounds,
    f: f64,
  ) {
    let rotation = self.x.tick_rotation;
    let tick_stroke = Stroke::new(2.0).with_start_cap(Cap::Butt);

    for (i, label) in labels.iter().enumerate() {
      let vx = (transform * Point::new(i as f64, 0.0)).x;
      if !viewport.x.contains(&vx) {
        continue;
      }

      render.stroke(
        &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 10.0 * f)),
        Affine::IDENTITY,
        &LINE_COLOR,
        &tick_stroke,
      );

      let (text_transform, horizontal_align) = if rotation != 0.0 {
        (Affine::rotate(-rotation.to_radians()), Align::End)
      } else {
        (Affine::IDENTITY, Align::Center)
      };
      render.draw_text(DrawText {
        text: label,
        size: (12.0 * f) as f32,
        position: Point { x: vx, y: viewport.y.min + 15.0 * f },
        transform: text_transform,
        horizontal_align,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }
  }

  /// Radar plots keep a square viewport and draw their own spines, so the
  /// cartesian frame and numeric ticks stay hidden.
  fn draw_radar(&self, render: &mut Render, area: Bounds) {
    let min_dim = area.width().abs().min(area.height().abs());
    let center_x = (area.x.min + area.x.max) / 2.0;

    let mut top = area.y.max;
    if let Some(title) = &self.title {
      let size = (min_dim * 0.075).clamp(12.0, 20.0);
      render.draw_text(DrawText {
        text: title,
        size: size as f32,
        position: Point { x: center_x, y: top + size * 0.5 },
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
      top += size * 2.0;
    }

    let bottom = area.y.min;
    let side = (min_dim * 0.56).min((bottom - top).abs() * 0.7);
    let center_y = (top + bottom) / 2.0;
    let viewport = Bounds::new(
      Range::new(center_x - side / 2.0, center_x + side / 2.0),
      Range::new(center_y + side / 2.0, center_y - side / 2.0),
    );
    let transform =
      Bounds::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0)).transform_to(viewport);

    for axes in &self.axes {
      axes.draw(render, transform);
    }
  }
}
