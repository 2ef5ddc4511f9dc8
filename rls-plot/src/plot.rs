use std::error::Error;

use plotters::prelude::*;

use crate::FitGather;

/// Draw the samples as a scatter together with the online and batch lines
pub fn plot_fit(
    gather: &FitGather,
    filename: &str,
    dims: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    let (x_min, x_max, y_min, y_max) = match gather.bounds() {
        Some(b) => b,
        None => {
            warn!("nothing gathered, skipping plot {}", filename);
            return Ok(());
        }
    };
    info!(
        "n_samples: {}, x: [{}, {}], y: [{}, {}]",
        gather.samples().len(),
        x_min,
        x_max,
        y_min,
        y_max
    );

    let root_area = BitMapBackend::new(filename, dims).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut cc0 = ChartBuilder::on(&root_area)
        .margin(5)
        .set_all_label_area_size(50)
        .caption(filename, ("sans-serif", 30).into_font().with_color(&BLACK))
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    cc0.configure_mesh()
        .x_labels(20)
        .y_labels(20)
        .x_label_formatter(&|v| format!("{:.2}", v))
        .y_label_formatter(&|v| format!("{:.2}", v))
        .draw()?;

    cc0.draw_series(
        gather.samples().iter().map(|(x, y)| Circle::new((*x, *y), 3, BLACK.filled())),
    )?
    .label("samples")
    .legend(|(x, y)| Circle::new((x, y), 3, BLACK.filled()));
    cc0.draw_series(LineSeries::new(gather.online_fit().clone(), &RED))?
        .label("rls")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    cc0.draw_series(LineSeries::new(gather.batch_fit().clone(), &BLUE))?
        .label("batch")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
    cc0.configure_series_labels().border_style(&BLACK).draw()?;

    root_area.present()?;
    info!("successfully plotted to {}", filename);

    Ok(())
}
