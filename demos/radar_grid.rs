use autoplot::{AutosData, Figure, autos_radar_grid};
use polars::prelude::*;

fn main() -> PolarsResult<()> {
  let file = std::fs::File::open("demos/autos.csv")?;
  let df = CsvReader::new(file).finish()?;

  // Bring every dimension onto a comparable 0..1 scale before charting.
  let dims = ["city mpg", "highway mpg", "price", "riskiness", "losses"];
  let normalized = df
    .lazy()
    .with_columns(dims.map(|d| (col(d) / col(d).max()).alias(d)))
    .collect()?;

  let data = AutosData::new(normalized)?;

  let mut figure = Figure::new(3, 4);
  figure.size(1600, 1300);
  autos_radar_grid(&mut figure, &data)?;

  figure.save("radar.png")?;
  Ok(())
}
