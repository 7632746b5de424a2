//! Walks both tables through a small phone book, then measures primary clustering in the
//! linear-probing table and plots probe length against load factor.

use std::error::Error;

use log::info;
use plotters::prelude::*;
use probing::{
    ChainingHashTable, LinearProbingHashTable, StringTable, TableError,
    clustering::{self, ClusteringConfig, ClusteringReport},
    from_pairs, logger,
};

const EMPLOYEES: [(&str, &str); 10] = [
    ("Ann Archer", "202-555-0101"),
    ("Bob Baker", "202-555-0102"),
    ("Cindy Cant", "202-555-0103"),
    ("Dan Deever", "202-555-0104"),
    ("Edwina Eager", "202-555-0105"),
    ("Fred Franklin", "202-555-0106"),
    ("Gina Gable", "202-555-0107"),
    ("Herb Henshaw", "202-555-0108"),
    ("Ida Iverson", "202-555-0109"),
    ("Jeb Jacobs", "202-555-0110"),
];

// Load factors from 0.1 to 0.95
const SWEEP_STEPS: usize = 10;
const PLOT_PATH: &str = "probe_sequence_length.svg";
const FONT_FAMILY: &str = "sans-serif";

fn walk_through<T: StringTable>(mut table: T) -> Result<T, TableError> {
    println!("Table contains Sally Owens: {}", table.contains("Sally Owens"));
    println!("Table contains Dan Deever: {}", table.contains("Dan Deever"));
    println!("Deleting Dan Deever");
    table.delete("Dan Deever");
    println!("Table contains Dan Deever: {}", table.contains("Dan Deever"));
    println!("Sally Owens: {}", table.get("Sally Owens").unwrap_or_default());
    println!("Fred Franklin: {}", table.get("Fred Franklin").unwrap_or_default());
    println!("Changing Fred Franklin");
    table.set("Fred Franklin", "202-555-0100")?;
    println!("Fred Franklin: {}", table.get("Fred Franklin").unwrap_or_default());
    Ok(table)
}

// Knuth's estimate for a successful search under linear probing
fn expected_probe_length(load_factor: f64) -> f64 {
    (1.0 + 1.0 / (1.0 - load_factor)) / 2.0
}

fn plot_sweep(reports: &[ClusteringReport]) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(PLOT_PATH, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_length = reports
        .iter()
        .map(|report| report.average_probe_length.max(expected_probe_length(report.load_factor)))
        .fold(1.0, f64::max) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Linear probing: average probe sequence length", (FONT_FAMILY, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..max_length)?;

    chart
        .configure_mesh()
        .x_desc("Load factor")
        .y_desc("Average probe sequence length")
        .axis_desc_style((FONT_FAMILY, 16))
        .draw()?;

    let measured = RGBColor(220, 50, 50);
    let measured_style = ShapeStyle::from(&measured).stroke_width(2);
    chart
        .draw_series(LineSeries::new(
            reports.iter().map(|report| (report.load_factor, report.average_probe_length)),
            measured_style,
        ))?
        .label("Measured")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], measured_style));
    chart.draw_series(reports.iter().map(|report| {
        Circle::new((report.load_factor, report.average_probe_length), 4, measured.filled())
    }))?;

    let expected_style = ShapeStyle::from(&RGBColor(50, 90, 220)).stroke_width(2);
    chart
        .draw_series(LineSeries::new(
            reports
                .iter()
                .map(|report| (report.load_factor, expected_probe_length(report.load_factor))),
            expected_style,
        ))?
        .label("Expected (1 + 1/(1 - a)) / 2")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], expected_style));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn main() -> Result<(), Box<dyn Error>> {
    logger::initialize_logger();

    println!("Separate chaining");
    let chained = from_pairs(ChainingHashTable::new(10)?, EMPLOYEES)?;
    print!("{}", chained.dump());
    walk_through(chained)?;

    println!("\nLinear probing");
    let probed = from_pairs(LinearProbingHashTable::new(10)?, EMPLOYEES.iter().take(7).copied())?;
    print!("{}", probed.dump());
    print!("{}", probed.probe_trace("Hank Hardy"));
    let mut probed = walk_through(probed)?;
    print!("{}", probed.dump());
    for (name, _) in EMPLOYEES.iter().take(7) {
        print!("{}", probed.probe_trace(name));
    }
    probed.set("Hank Hardy", "202-555-0108")?;
    print!("{}", probed.probe_trace("Hank Hardy"));

    println!("\nClustering");
    let config = ClusteringConfig::default();
    let report = clustering::run_clustering(&config)?;
    println!("{}", report.occupancy);
    println!("Average probe sequence length: {:.6}", report.average_probe_length);

    let load_factors: Vec<f64> = (0..SWEEP_STEPS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((SWEEP_STEPS - 1) as f64))
        .collect();
    let reports = clustering::sweep(&config, &load_factors)?;
    for report in &reports {
        println!(
            "load {:.2}: average {:.3} (expected {:.3}), longest {}",
            report.load_factor,
            report.average_probe_length,
            expected_probe_length(report.load_factor),
            report.longest_probe
        );
    }

    plot_sweep(&reports)?;
    info!("wrote {PLOT_PATH}");

    Ok(())
}
