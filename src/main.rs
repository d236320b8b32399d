use chemviz_report::cli::{self, Command};
use chemviz_report::config::{self, ReportConfig};
use chemviz_report::error::Result;
use chemviz_report::report::{self, RenderedReport, ReportRequest};
use chemviz_report::types::{DetailedPayload, HistoryRecord};
use chemviz_report::ui;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if !args.json {
        let kind = match args.command {
            Command::Detailed { .. } => "detailed",
            Command::Quick { .. } => "quick",
        };
        ui::status(&format!("rendering {} report from {}", kind, args.input_path().display()));
    }

    match run(&args, &config) {
        Ok((rendered, path)) => {
            if args.json {
                let summary = serde_json::json!({
                    "path": path.display().to_string(),
                    "filename": rendered.filename,
                    "content_type": rendered.content_type,
                    "pages": rendered.page_count,
                    "bytes": rendered.bytes.len(),
                });
                println!("{}", summary);
            } else {
                ui::print_success(
                    "wrote",
                    &format!("{} ({} pages, {} bytes)", path.display(), rendered.page_count, rendered.bytes.len()),
                );
            }
        }
        Err(e) if e.is_no_data() => {
            ui::print_warning(&e.to_string());
            std::process::exit(2);
        }
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Read the input, render, and write the artifact under its suggested filename.
fn run(args: &cli::CliArgs, config: &ReportConfig) -> Result<(RenderedReport, PathBuf)> {
    let requester = args.requester();
    let text = fs::read_to_string(args.input_path())?;

    let rendered = match &args.command {
        Command::Detailed { .. } => {
            let payload: DetailedPayload = serde_json::from_str(&text)?;
            debug!(
                "Loaded payload: {} equipment, {} history records",
                payload.results.total_equipment,
                payload.history.len()
            );
            let request = ReportRequest::Detailed {
                summary: &payload.results,
                history: &payload.history,
                preparer: payload.username.as_deref(),
            };
            report::render(request, &requester, config)?
        }
        Command::Quick { .. } => {
            let history: Vec<HistoryRecord> = serde_json::from_str(&text)?;
            debug!("Loaded {} history records", history.len());
            report::render(ReportRequest::Quick { history: &history }, &requester, config)?
        }
    };

    let path = write_report(&args.out_dir, &rendered)?;
    Ok((rendered, path))
}

fn write_report(out_dir: &Path, rendered: &RenderedReport) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&rendered.filename);
    fs::write(&path, &rendered.bytes)?;
    debug!("Wrote {} bytes to {:?}", rendered.bytes.len(), path);
    Ok(path)
}
