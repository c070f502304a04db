use kurbo::Affine;
use polars::{error::PolarsResult, prelude::Column};

#[derive(Clone, Copy)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

/// Data-space extent of one axes kind, before margins are applied.
#[derive(Clone, Copy)]
pub struct DataBounds {
  pub x: DataRange,
  pub y: DataRange,
}

#[derive(Clone, Copy)]
pub struct DataRange {
  pub range:      Range,
  pub margin_min: bool,
  pub margin_max: bool,
}

#[derive(Clone, Copy)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl From<Range> for DataRange {
  fn from(range: Range) -> Self { DataRange { range, margin_min: true, margin_max: true } }
}

impl Bounds {
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }

  pub fn width(&self) -> f64 { self.x.size() }
  pub fn height(&self) -> f64 { self.y.size() }

  pub fn shrink(self, amount: f64) -> Self {
    Bounds { x: self.x.shrink(amount), y: self.y.shrink(amount) }
  }

  pub fn union(&self, other: Bounds) -> Bounds {
    Bounds { x: self.x.union(other.x), y: self.y.union(other.y) }
  }

  pub(crate) fn transform_to(&self, viewport: Bounds) -> Affine {
    let scale_x = viewport.x.size() / self.x.size();
    let scale_y = viewport.y.size() / self.y.size();
    let translate_x = viewport.x.min - self.x.min * scale_x;
    let translate_y = viewport.y.min - self.y.min * scale_y;

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

impl Default for Range {
  fn default() -> Self { Range::empty() }
}

impl Range {
  pub const fn empty() -> Self { Range { min: 0.0, max: 0.0 } }
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn size(&self) -> f64 { self.max - self.min }

  pub fn shrink(self, amount: f64) -> Self { self.expand(-amount) }
  pub fn expand(self, amount: f64) -> Self {
    Range {
      min: self.min - amount * self.size().signum(),
      max: self.max + amount * self.size().signum(),
    }
  }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  pub fn union(&self, other: Range) -> Range {
    if self.size() == 0.0 {
      other
    } else if other.size() == 0.0 {
      *self
    } else {
      Range { min: self.min.min(other.min), max: self.max.max(other.max) }
    }
  }

  pub fn nice_ticks(&self, count: u32) -> NiceTicksIter {
    let step = (self.max - self.min) / f64::from(count);
    let k = step.log10().floor();
    let base = step / 10f64.powf(k);

    let nice_base = match base {
      b if b < 1.0 => 1.0,
      b if b < 2.0 => 2.0,
      b if b < 2.5 => 2.5,
      b if b < 5.0 => 5.0,
      _ => 10.0,
    };

    let step = nice_base * 10f64.powf(k);
    let lo = (self.min / step).floor() * step;
    let hi = (self.max / step).ceil() * step;

    // A 2.5 step carries one more decimal than its magnitude suggests.
    let k = if nice_base == 2.5 { k as i32 - 1 } else { k as i32 };
    let precision = (-k).max(0) as usize;
    NiceTicksIter::new(lo, hi, step, precision)
  }
}

impl DataBounds {
  pub fn union(&self, other: DataBounds) -> DataBounds {
    DataBounds { x: self.x.union(other.x), y: self.y.union(other.y) }
  }
}

impl DataRange {
  pub(crate) fn from_column(column: &Column) -> PolarsResult<DataRange> {
    Ok(
      Range::new(
        column.min_reduce()?.into_value().try_extract::<f64>()?,
        column.max_reduce()?.into_value().try_extract::<f64>()?,
      )
      .into(),
    )
  }

  pub fn union(&self, other: DataRange) -> DataRange {
    DataRange {
      range:      self.range.union(other.range),
      margin_min: self.margin_min || other.margin_min,
      margin_max: self.margin_max || other.margin_max,
    }
  }

  /// Applies a 5% margin to each flagged side.
  pub(crate) fn resolve(&self) -> Range {
    let margin = self.range.size() * 0.05;
    let mut range = self.range;
    if self.margin_min {
      range.min -= margin;
    }
    if self.margin_max {
      range.max += margin;
    }
    range
  }
}

pub struct NiceTicksIter {
  current:   f64,
  step:      f64,
  hi:        f64,
  precision: usize,
}

impl NiceTicksIter {
  fn new(lo: f64, hi: f64, step: f64, precision: usize) -> Self {
    NiceTicksIter { current: lo, step, hi, precision }
  }

  /// Decimal places needed to print one step exactly.
  pub fn precision(&self) -> usize { self.precision }
}

impl Iterator for NiceTicksIter {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.current < self.hi + self.step * 0.5 {
      let p = 10f64.powi(self.precision as i32 + 3);
      let result = (self.current * p).round() / p;
      self.current += self.step;
      Some(result)
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  #[test]
  fn nice_ticks_cover_the_range() {
    let ticks: Vec<f64> = Range::new(0.3, 9.7).nice_ticks(10).collect();

    assert!(*ticks.first().unwrap() <= 0.3);
    assert!(*ticks.last().unwrap() >= 9.7);
    assert_relative_eq!(ticks[1] - ticks[0], 1.0);
  }

  #[test]
  fn nice_ticks_keep_zero_precision_for_large_steps() {
    let iter = Range::new(0.0, 45000.0).nice_ticks(10);
    assert_eq!(iter.precision(), 0);
  }

  #[test]
  fn nice_ticks_print_exactly_at_the_stated_precision() {
    // Spans like 0..2.4 produce a 0.25 step, which needs two decimals.
    let iter = Range::new(0.0, 2.4).nice_ticks(10);
    let precision = iter.precision();

    for tick in iter {
      let printed = format!("{:.*}", precision, tick);
      assert_relative_eq!(printed.parse::<f64>().unwrap(), tick);
    }
  }

  #[test]
  fn nice_ticks_gain_precision_for_small_steps() {
    let iter = Range::new(0.0, 1.0).nice_ticks(10);
    assert!(iter.precision() >= 1);
  }

  #[test]
  fn contains_handles_inverted_ranges() {
    let inverted = Range::new(1000.0, 0.0);
    assert!(inverted.contains(&500.0));
    assert!(!inverted.contains(&1500.0));
  }

  #[test]
  fn union_ignores_empty_ranges() {
    let range = Range::new(2.0, 5.0).union(Range::empty());
    assert_relative_eq!(range.min, 2.0);
    assert_relative_eq!(range.max, 5.0);
  }

  #[test]
  fn transform_maps_data_corners_to_the_viewport() {
    let data = Bounds::new(Range::new(0.0, 10.0), Range::new(0.0, 100.0));
    let viewport = Bounds::new(Range::new(80.0, 920.0), Range::new(920.0, 80.0));
    let transform = data.transform_to(viewport);

    let origin = transform * kurbo::Point::new(0.0, 0.0);
    assert_relative_eq!(origin.x, 80.0);
    assert_relative_eq!(origin.y, 920.0);

    let corner = transform * kurbo::Point::new(10.0, 100.0);
    assert_relative_eq!(corner.x, 920.0);
    assert_relative_eq!(corner.y, 80.0);
  }

  #[test]
  fn margins_only_apply_to_flagged_sides() {
    let range =
      DataRange { range: Range::new(0.0, 10.0), margin_min: false, margin_max: true }.resolve();

    assert_relative_eq!(range.min, 0.0);
    assert_relative_eq!(range.max, 10.5);
  }
}
