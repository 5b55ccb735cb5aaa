use std::{error::Error, path::Path};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::stats::{self, CostSummary};

const SILVER: RGBColor = RGBColor(192, 192, 192);
const HISTOGRAM_BINS: usize = 15;

/// Renders the cost-distribution page for one instance: a histogram with the
/// optimum marked, the cumulative relative-solution-quality curve, and a box
/// plot annotated with the order statistics.
pub fn render_cost_report(
    out_path: &Path,
    instance_name: &str,
    costs: &[u64],
    optimum: u64,
) -> Result<(), Box<dyn Error>> {
    let summary = CostSummary::describe(costs)
        .ok_or_else(|| format!("no runs to plot for {instance_name}"))?;

    debug!("Render cost report for {instance_name} to {out_path:?}");

    let root = BitMapBackend::new(out_path, (1000, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(instance_name, ("sans-serif", 24))?;

    let (left, right) = root.split_horizontally(660);
    let panels = left.split_evenly((2, 1));

    draw_histogram(&panels[0], costs, optimum, &summary)?;
    draw_cumulative_rsq(&panels[1], costs, optimum)?;
    draw_box_summary(&right, costs, optimum, &summary)?;

    root.present()?;
    Ok(())
}

fn draw_histogram<DB>(
    area: &DrawingArea<DB, Shift>,
    costs: &[u64],
    optimum: u64,
    summary: &CostSummary,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let bin_width = ((summary.max - summary.min) as f64 / HISTOGRAM_BINS as f64).max(1.0);

    let mut counts = [0usize; HISTOGRAM_BINS];
    for &cost in costs {
        let bin = ((cost - summary.min) as f64 / bin_width) as usize;
        counts[bin.min(HISTOGRAM_BINS - 1)] += 1;
    }

    let x_lo = (summary.min as f64).min(optimum as f64) - bin_width;
    let x_hi = (summary.min as f64 + bin_width * HISTOGRAM_BINS as f64).max(optimum as f64)
        + bin_width;
    let y_hi = counts.iter().max().copied().unwrap_or(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(x_lo..x_hi, 0f64..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Solution value")
        .y_desc("Count")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().filter(|&(_, &n)| n > 0).map(
        |(bin, &n)| {
            let x0 = summary.min as f64 + bin_width * bin as f64;
            // leave a gap between the bars
            Rectangle::new([(x0, 0.0), (x0 + bin_width * 0.9, n as f64)], BLUE.filled())
        },
    ))?;

    chart
        .draw_series(LineSeries::new(
            [(optimum as f64, 0.0), (optimum as f64, y_hi)],
            RED.stroke_width(2),
        ))?
        .label(format!("optimum = {optimum}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart.configure_series_labels().border_style(BLACK).draw()?;

    Ok(())
}

fn draw_cumulative_rsq<DB>(
    area: &DrawingArea<DB, Shift>,
    costs: &[u64],
    optimum: u64,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut rsq: Vec<f64> = costs
        .iter()
        .map(|&c| stats::relative_quality_percent(c as f64, optimum))
        .collect();
    rsq.sort_by(f64::total_cmp);

    let x_hi = rsq.last().copied().unwrap_or_default().max(f64::EPSILON) * 1.05;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(0f64..x_hi, 0f64..rsq.len() as f64)?;

    chart
        .configure_mesh()
        .x_desc("Relative solution quality [%]")
        .y_desc("Cumulative frequency")
        .draw()?;

    chart.draw_series(LineSeries::new(
        rsq.iter().enumerate().map(|(i, &q)| (q, i as f64)),
        &BLACK,
    ))?;

    Ok(())
}

fn draw_box_summary<DB>(
    area: &DrawingArea<DB, Shift>,
    costs: &[u64],
    optimum: u64,
    summary: &CostSummary,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let values: Vec<f64> = costs.iter().map(|&c| c as f64).collect();
    let quartiles = Quartiles::new(&values);

    // Quartiles/Boxplot are f32-valued, so this chart's y axis is too
    let y_lo = (summary.min as f64).min(optimum as f64) as f32;
    let y_hi = (summary.max as f64).max(optimum as f64) as f32;
    let pad = ((y_hi - y_lo) * 0.1).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(20)
        .y_label_area_size(55)
        .build_cartesian_2d((0i32..1i32).into_segmented(), (y_lo - pad)..(y_hi + pad))?;

    chart.configure_mesh().y_desc("Solution value").draw()?;

    chart.draw_series(
        costs
            .iter()
            .map(|&c| Circle::new((SegmentValue::CenterOf(0), c as f32), 3, SILVER.filled())),
    )?;

    chart.draw_series([Boxplot::new_vertical(
        SegmentValue::CenterOf(0),
        &quartiles,
    )])?;

    chart
        .draw_series([Circle::new(
            (SegmentValue::CenterOf(0), optimum as f32),
            4,
            RED.filled(),
        )])?
        .label(format!("optimum = {optimum}"))
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

    // legend-only entries carrying the order statistics
    for label in [
        format!("median = {:.1}", summary.median),
        format!("min,max = {},{}", summary.min, summary.max),
        format!("Q1,Q3 = {:.1},{:.1}", summary.q1, summary.q3),
    ] {
        chart
            .draw_series(LineSeries::new(
                std::iter::empty::<(SegmentValue<i32>, f32)>(),
                &BLACK,
            ))?
            .label(label)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));
    }

    chart.configure_series_labels().border_style(BLACK).draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::tests::testcases_directory;

    #[test]
    fn renders_a_png() {
        let out_dir = testcases_directory("../target/test_plots");
        std::fs::create_dir_all(&out_dir).unwrap();
        let out_path = out_dir.join("cost_report.png");

        render_cost_report(&out_path, "bayg29", &[1650, 1610, 1720, 1702, 1650], 1610).unwrap();

        assert!(out_path.exists());
    }

    #[test]
    fn renders_with_uniform_costs() {
        let out_dir = testcases_directory("../target/test_plots");
        std::fs::create_dir_all(&out_dir).unwrap();
        let out_path = out_dir.join("cost_report_uniform.png");

        // all runs equal: every histogram bin but one is empty and the box
        // collapses onto a single value
        render_cost_report(&out_path, "gr21", &[2707, 2707, 2707], 2707).unwrap();

        assert!(out_path.exists());
    }

    #[test]
    fn empty_result_set_is_an_error() {
        let out_dir = testcases_directory("../target/test_plots");
        std::fs::create_dir_all(&out_dir).unwrap();

        let err = render_cost_report(&out_dir.join("unused.png"), "bayg29", &[], 1610);
        assert!(err.is_err());
    }
}
