use autoplot::{AutosData, Figure, autos_mpg_plot};
use polars::prelude::*;

fn main() -> PolarsResult<()> {
  let data = AutosData::from_csv("demos/autos.csv")?;

  let mut figure = Figure::new(1, 1);
  autos_mpg_plot(figure.plot(), &data)?;

  figure.show();
  Ok(())
}
