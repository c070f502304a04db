use std::path::Path;

use kurbo::Point;
use parley::FontWeight;
use peniko::Brush;
use polars::prelude::*;

use crate::{
  Bounds, LegendItem, Plot, Range, legend,
  render::{Align, DrawText, GpuHandle, Render, RenderConfig, texture, window},
};

/// A grid of plots with an optional title band across the top and an
/// optional patch legend along the left edge.
pub struct Figure<'a> {
  title:  Option<String>,
  legend: Vec<LegendItem>,

  rows:  usize,
  cols:  usize,
  cells: Vec<Option<Plot<'a>>>,

  size: (u32, u32),
}

impl<'a> Figure<'a> {
  pub fn new(rows: usize, cols: usize) -> Figure<'a> {
    Figure {
      title: None,
      legend: vec![],
      rows: rows.max(1),
      cols: cols.max(1),
      cells: (0..rows.max(1) * cols.max(1)).map(|_| None).collect(),
      size: (1024, 1024),
    }
  }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn legend_patch(&mut self, label: &str, color: impl Into<Brush>) -> &mut Self {
    self.legend.push(LegendItem::new(label, color));
    self
  }

  /// Output size in pixels for `save`.
  pub fn size(&mut self, width: u32, height: u32) -> &mut Self {
    self.size = (width.max(1), height.max(1));
    self
  }

  pub fn rows(&self) -> usize { self.rows }
  pub fn cols(&self) -> usize { self.cols }

  /// The plot at `(0, 0)`, for single-chart figures.
  pub fn plot(&mut self) -> &mut Plot<'a> { self.subplot(0, 0) }

  /// The plot in the given cell, created on first access. Rows grow on
  /// demand when `row` runs past the grid; an out-of-range `col` clamps to
  /// the last column.
  pub fn subplot(&mut self, row: usize, col: usize) -> &mut Plot<'a> {
    let col = col.min(self.cols - 1);
    while row >= self.rows {
      self.rows += 1;
      self.cells.extend((0..self.cols).map(|_| None));
    }

    let index = row * self.cols + col;
    self.cells[index].get_or_insert_with(Plot::new)
  }

  pub(crate) fn draw(&self, render: &mut Render, config: &RenderConfig) -> PolarsResult<()> {
    let width = f64::from(config.width);
    let height = f64::from(config.height);

    let mut top = 0.0;
    if let Some(title) = &self.title {
      let band = (height * 0.09).clamp(60.0, 120.0);
      render.draw_text(DrawText {
        text: title,
        size: 30.0,
        weight: FontWeight::BOLD,
        position: Point::new(width / 2.0, band / 2.0),
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });
      top = band;
    }

    let mut left = 0.0;
    if !self.legend.is_empty() {
      let band = (width * 0.15).clamp(120.0, 200.0);
      legend::draw(
        render,
        &self.legend,
        Point::new(20.0, (top + height) / 2.0),
        Align::Start,
        Align::Center,
      );
      left = band;
    }

    let cell_width = (width - left) / self.cols as f64;
    let cell_height = (height - top) / self.rows as f64;

    for row in 0..self.rows {
      for col in 0..self.cols {
        let Some(plot) = &self.cells[row * self.cols + col] else { continue };

        let x0 = left + col as f64 * cell_width;
        let y_top = top + row as f64 * cell_height;
        let area = Bounds::new(
          Range::new(x0, x0 + cell_width),
          Range::new(y_top + cell_height, y_top),
        );
        plot.draw(render, area)?;
      }
    }

    Ok(())
  }

  /// Renders the figure to a PNG.
  pub fn save(&self, path: impl AsRef<Path>) -> PolarsResult<()> {
    let config = RenderConfig { width: self.size.0, height: self.size.1 };
    let handle = GpuHandle::new(&config, None);

    let mut render = Render::new();
    self.draw(&mut render, &config)?;

    let mut renderer = vello::Renderer::new(&handle.device, vello::RendererOptions::default())
      .expect("Failed to create renderer");

    renderer
      .render_to_texture(
        &handle.device,
        &handle.queue,
        &render.scene,
        &handle.view,
        &vello::RenderParams {
          base_color:          render.background,
          width:               config.width,
          height:              config.height,
          antialiasing_method: vello::AaConfig::Msaa16,
        },
      )
      .expect("Failed to render to a texture");

    texture::render(&handle, &config, path.as_ref());
    Ok(())
  }

  /// Opens an interactive window showing the figure. Blocks until closed.
  pub fn show(&self) { window::show(self); }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn subplot_creates_cells_on_first_access() {
    let mut figure = Figure::new(2, 2);
    figure.subplot(1, 1).title("lower right");

    assert!(figure.cells[3].is_some());
    assert!(figure.cells[0].is_none());
  }

  #[test]
  fn subplot_grows_rows_on_demand() {
    let mut figure = Figure::new(1, 3);
    figure.subplot(2, 0);

    assert_eq!(figure.rows(), 3);
    assert_eq!(figure.cells.len(), 9);
  }

  #[test]
  fn plot_is_the_first_cell() {
    let mut figure = Figure::new(1, 1);
    figure.plot().title("only");

    assert!(figure.cells[0].is_some());
  }
}
