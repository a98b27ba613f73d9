use std::path::Path;

use crate::error::Result;
use crate::read_features;
use crate::summary::{self, LineLengthReport, TypeCountReport};
use crate::typst::Data;

// Lengths are shown as if the coordinates were metres. Ties round up, not
// to even.
pub fn km(length: f64) -> String {
    format!("{:.2} km", (length / 10f64).round() / 100f64)
}

fn table(header: (&str, &str), rows: Vec<(String, String)>) -> String {
    let w0 = rows
        .iter()
        .map(|r| r.0.len())
        .chain(std::iter::once(header.0.len()))
        .max()
        .unwrap_or(0);
    let w1 = rows
        .iter()
        .map(|r| r.1.len())
        .chain(std::iter::once(header.1.len()))
        .max()
        .unwrap_or(0);
    let mut ret = format!("{:<w0$}  {:>w1$}\n", header.0, header.1);
    ret.push_str(&format!("{}  {}\n", "-".repeat(w0), "-".repeat(w1)));
    for (a, b) in rows {
        ret.push_str(&format!("{:<w0$}  {:>w1$}\n", a, b));
    }
    ret
}

pub fn summary_table(counts: &TypeCountReport) -> String {
    let rows = counts
        .iter()
        .map(|(t, n)| (t.to_string(), n.to_string()))
        .collect();
    table(("Element Type", "Count"), rows)
}

pub fn details_table(lengths: &LineLengthReport) -> String {
    let rows = lengths
        .iter()
        .map(|(t, l)| (t.to_string(), km(*l)))
        .collect();
    table(("Element Type", "Total Length (km)"), rows)
}

/// Reads and summarizes one file, returning the text printed for it and the
/// data for the Typst export.
pub fn file_report(path: &Path, detailed: bool) -> Result<(String, Data)> {
    let features = read_features::read(path)?;
    let summary = summary::summarize(&features)?;
    log::info!("{}: {} features", path.display(), features.len());
    summary.info();

    let mut text = format!("{}\n\n", path.display());
    text.push_str(&summary_table(&summary.counts));
    if detailed {
        text.push('\n');
        text.push_str(&details_table(&summary.lengths));
    }
    text.push('\n');
    let data = Data {
        name: path.display().to_string(),
        summary,
    };
    Ok((text, data))
}
