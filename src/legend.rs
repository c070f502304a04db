use kurbo::{Affine, Point, Rect, RoundedRect, Stroke, Vec2};
use peniko::{Brush, Color};

use crate::render::{Align, DrawText, Render};

/// One colored patch with a label, matching the trace it describes.
pub struct LegendItem {
  pub(crate) label: String,
  pub(crate) color: Brush,
}

impl LegendItem {
  pub fn new(label: impl Into<String>, color: impl Into<Brush>) -> Self {
    LegendItem { label: label.into(), color: color.into() }
  }
}

const PADDING: f64 = 10.0;
const FONT_SIZE: f64 = 18.0;
const LINE_HEIGHT: f64 = 26.0;
const SWATCH_WIDTH: f64 = 22.0;
const SWATCH_HEIGHT: f64 = 12.0;
const SWATCH_GAP: f64 = 8.0;

/// Draws a legend box anchored at `anchor`; the alignment pair picks which
/// corner (or edge midpoint) of the box the anchor refers to.
pub(crate) fn draw(
  render: &mut Render,
  items: &[LegendItem],
  anchor: Point,
  h_align: Align,
  v_align: Align,
) {
  if items.is_empty() {
    return;
  }

  let mut inner_width = 0.0_f64;
  let mut layouts = vec![];
  for item in items {
    let text = DrawText {
      text: &item.label,
      size: FONT_SIZE as f32,
      vertical_align: Align::Center,
      ..Default::default()
    };
    let layout = render.layout_text(&text);
    inner_width = inner_width.max(f64::from(layout.width()));
    layouts.push(layout);
  }

  inner_width += SWATCH_WIDTH + SWATCH_GAP;
  let inner_height = items.len() as f64 * LINE_HEIGHT;
  let width = inner_width + PADDING * 2.0;
  let height = inner_height + PADDING * 2.0;

  let x0 = match h_align {
    Align::Start => anchor.x,
    Align::Center => anchor.x - width / 2.0,
    Align::End => anchor.x - width,
  };
  let y0 = match v_align {
    Align::Start => anchor.y,
    Align::Center => anchor.y - height / 2.0,
    Align::End => anchor.y - height,
  };

  let rect = Rect::new(x0, y0, x0 + width, y0 + height);
  let background = RoundedRect::from_rect(rect, 5.0);
  render.fill(&background, Affine::IDENTITY, &Brush::Solid(Color::from_rgba8(255, 255, 255, 200)));
  render.stroke(
    &background,
    Affine::IDENTITY,
    &Brush::Solid(Color::from_rgb8(128, 128, 128)),
    &Stroke::new(2.0),
  );

  for (i, (item, layout)) in items.iter().zip(layouts).enumerate() {
    let pos = Point::new(rect.x0 + PADDING, rect.y0 + PADDING + (i as f64 + 0.5) * LINE_HEIGHT);

    let swatch = Rect::from_origin_size(
      pos - Vec2::new(0.0, SWATCH_HEIGHT / 2.0),
      (SWATCH_WIDTH, SWATCH_HEIGHT),
    );
    render.fill(&swatch, Affine::IDENTITY, &item.color);

    let text = DrawText {
      text: &item.label,
      size: FONT_SIZE as f32,
      position: pos + Vec2::new(SWATCH_WIDTH + SWATCH_GAP, 0.0),
      vertical_align: Align::Center,
      ..Default::default()
    };
    render.draw_text_layout(layout, text);
  }
}
