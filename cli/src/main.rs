use draft_core::config::Config;
use draft_core::convert::{ConversionReport, Converter};
use draft_core::drawing::DrawingDocument;
use draft_core::error::ConvertError;
use draft_core::features::Operation;
use draft_core::kernel::TruckKernel;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("usage: draft-cli <input.json> <output.step> [default-depth]");
        return ExitCode::from(2);
    }
    let input = PathBuf::from(&args[0]);
    let output = PathBuf::from(&args[1]);

    let mut config = Config::default();
    if let Some(depth) = args.get(2) {
        match depth.parse::<f64>() {
            Ok(d) if d > 0.0 => config = config.with_default_depth(d),
            _ => {
                eprintln!("invalid default depth: {depth}");
                return ExitCode::from(2);
            }
        }
    }

    let document = match load_document(&input) {
        Ok(doc) => doc,
        Err(err) => {
            error!(%err, "failed to load drawing");
            return ExitCode::FAILURE;
        }
    };

    let converter = Converter::new(TruckKernel::new(), config);
    match converter.convert(&document, &output) {
        Ok(report) => {
            print_report(&report, &output);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            for warning in &failure.warnings {
                eprintln!("warning: {warning}");
            }
            error!(err = %failure.error, "conversion failed");
            ExitCode::FAILURE
        }
    }
}

fn load_document(path: &Path) -> Result<DrawingDocument, ConvertError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ConvertError::Load(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text).map_err(|e| ConvertError::Load(format!("{}: {e}", path.display())))
}

fn print_report(report: &ConversionReport, output: &Path) {
    println!("Profiles:");
    for (i, profile) in report.profiles.iter().enumerate() {
        let closure = if profile.is_closed {
            "closed".to_string()
        } else {
            format!("open, gap {:.3}mm", profile.closure_gap)
        };
        println!(
            "  [{i}] {} edges, area {:.2}mm², {closure}{}",
            profile.edge_count(),
            profile.area,
            if profile.is_outer { ", outer" } else { "" },
        );
    }

    println!("Features:");
    for feature in &report.features {
        let params = match &feature.operation {
            Operation::Revolve { angle_deg, axis } => match axis {
                Some(p) => format!(", {angle_deg}° about ({}, {})", p.x, p.y),
                None => format!(", {angle_deg}° about the Y axis"),
            },
            op => match op.depth() {
                Some(depth) => format!(", depth {depth}mm"),
                None => String::new(),
            },
        };
        println!(
            "  {:?} {} on profile {}{params}",
            feature.role,
            feature.operation.name(),
            feature.profile,
        );
    }

    if !report.warnings.is_empty() {
        println!("Skipped features:");
        for warning in &report.warnings {
            println!("  {warning}");
        }
    }

    println!("Wrote {}", output.display());
}
