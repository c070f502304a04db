use autoplot::{AutosData, Figure, autos_price_plot};
use polars::prelude::*;

fn main() -> PolarsResult<()> {
  let data = AutosData::from_csv("demos/autos.csv")?;

  let mut figure = Figure::new(1, 1);
  autos_price_plot(figure.plot(), &data)?;

  figure.show();
  Ok(())
}
