use clap::Parser;
use kml_summary::typst;
use kml_summary::{read_features, report};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(about = "Summarize the geometries of KML, GeoJSON and GPX files")]
struct Cli {
    /// File or directory to summarize.
    path: PathBuf,
    /// Also print the total length of LineString and MultiLineString features.
    #[arg(long)]
    detailed: bool,
    /// Write a Typst report to this file.
    #[arg(long)]
    typst: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Cli::parse();

    let paths = read_features::collect(&args.path);
    log::trace!("files: {}", paths.len());
    let mut data = Vec::new();
    let mut failed = false;
    for path in &paths {
        match report::file_report(path, args.detailed) {
            Ok((text, d)) => {
                print!("{}", text);
                data.push(d);
            }
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                failed = true;
            }
        }
    }

    if let Some(out) = &args.typst {
        if let Err(e) = std::fs::write(out, typst::make_typst_document(&data)) {
            log::error!("{}: {}", out.display(), e);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
