use std::{error::Error, path::Path};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::io::{instance_reader::Layout, result_reader::TourResult};

/// Renders the best and the worst tour of one instance side by side: node
/// scatter with id labels (node 0 marked as the start) and the tour edges in
/// circuit order, closed back to the first node.
pub fn render_tour_report(
    out_path: &Path,
    instance_name: &str,
    layout: &Layout,
    best: &TourResult,
    worst: &TourResult,
) -> Result<(), Box<dyn Error>> {
    if layout.num_nodes() == 0 {
        return Err(format!("no node positions to plot for {instance_name}").into());
    }

    debug!("Render tour report for {instance_name} to {out_path:?}");

    let root = BitMapBackend::new(out_path, (1200, 620)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(instance_name, ("sans-serif", 24))?;

    let panels = root.split_evenly((1, 2));
    draw_tour(&panels[0], layout, best, &format!("best value: {}", best.cost))?;
    draw_tour(&panels[1], layout, worst, &format!("worst value: {}", worst.cost))?;

    root.present()?;
    Ok(())
}

fn draw_tour<DB>(
    area: &DrawingArea<DB, Shift>,
    layout: &Layout,
    result: &TourResult,
    caption: &str,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (mut x_lo, mut x_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_lo, mut y_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in layout.positions() {
        x_lo = x_lo.min(p.x);
        x_hi = x_hi.max(p.x);
        y_lo = y_lo.min(p.y);
        y_hi = y_hi.max(p.y);
    }

    let x_pad = ((x_hi - x_lo) * 0.08).max(1.0);
    let y_pad = ((y_hi - y_lo) * 0.08).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 18))
        .margin(15)
        .build_cartesian_2d((x_lo - x_pad)..(x_hi + x_pad), (y_lo - y_pad)..(y_hi + y_pad))?;

    let edges: Vec<(f64, f64)> = result
        .circuit
        .iter()
        .chain(result.circuit.first())
        .filter_map(|&node| layout.position(node))
        .map(|p| (p.x, p.y))
        .collect();
    chart.draw_series(LineSeries::new(edges, &BLACK))?;

    chart.draw_series(
        layout
            .positions()
            .iter()
            .map(|p| Circle::new((p.x, p.y), 3, BLUE.filled())),
    )?;

    chart.draw_series(layout.positions().iter().enumerate().map(|(idx, p)| {
        let label = if idx == 0 {
            format!("{idx} [start]")
        } else {
            idx.to_string()
        };
        Text::new(label, (p.x, p.y), ("sans-serif", 12))
    }))?;

    Ok(())
}
