use autoplot::{AutosData, Figure, autos_loss_and_risk_plot};
use polars::prelude::*;

fn main() -> PolarsResult<()> {
  let data = AutosData::from_csv("demos/autos.csv")?;

  let mut figure = Figure::new(1, 1);
  autos_loss_and_risk_plot(figure.plot(), &data, true, true)?;

  figure.show();
  Ok(())
}
