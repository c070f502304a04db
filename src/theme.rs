use color::{HueDirection, Oklch, OpaqueColor, Srgb};
use peniko::Color;

/// The default categorical cycle, indexed the same way across every chart so
/// legends stay consistent with the traces they describe.
pub const CYCLE: [Color; 10] = [
  Color::from_rgb8(0x1f, 0x77, 0xb4),
  Color::from_rgb8(0xff, 0x7f, 0x0e),
  Color::from_rgb8(0x2c, 0xa0, 0x2c),
  Color::from_rgb8(0xd6, 0x27, 0x28),
  Color::from_rgb8(0x94, 0x67, 0xbd),
  Color::from_rgb8(0x8c, 0x56, 0x4b),
  Color::from_rgb8(0xe3, 0x77, 0xc2),
  Color::from_rgb8(0x7f, 0x7f, 0x7f),
  Color::from_rgb8(0xbc, 0xbd, 0x22),
  Color::from_rgb8(0x17, 0xbe, 0xcf),
];

pub struct LinearPalette {
  start: OpaqueColor<Oklch>,
  end:   OpaqueColor<Oklch>,
}

pub const ROCKET: LinearPalette =
  LinearPalette::new(OpaqueColor::new([0.7, 0.13, 50.0]), OpaqueColor::new([0.7, 0.13, 290.0]));

impl LinearPalette {
  pub const fn new(start: OpaqueColor<Oklch>, end: OpaqueColor<Oklch>) -> Self {
    Self { start, end }
  }

  pub fn sample(&self, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    self.start.lerp(self.end, t, HueDirection::Shorter).convert::<Srgb>().with_alpha(1.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sample_clamps_to_the_palette_ends() {
    let below = ROCKET.sample(-1.0);
    let start = ROCKET.sample(0.0);
    assert_eq!(below.components, start.components);

    let above = ROCKET.sample(2.0);
    let end = ROCKET.sample(1.0);
    assert_eq!(above.components, end.components);
  }
}
