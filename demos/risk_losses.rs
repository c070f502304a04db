use autoplot::{AutosData, Figure, autos_losses_plot, autos_riskiness_plot};
use polars::prelude::*;

fn main() -> PolarsResult<()> {
  let data = AutosData::from_csv("demos/autos.csv")?;

  let mut figure = Figure::new(2, 1);
  figure.size(1280, 1400);
  autos_riskiness_plot(figure.subplot(0, 0), &data, true, true)?;
  autos_losses_plot(figure.subplot(1, 0), &data, true, true)?;

  figure.save("risk_losses.png")?;
  Ok(())
}
