//! Export a captured image to a paginated PDF
//!
//! Slices a tall PNG/JPEG snapshot into pixel-contiguous A4 pages.
//!
//! Usage:
//!   cargo run --release --bin export_pdf -- input.png
//!   cargo run --release --bin export_pdf -- input.png --output report.pdf --title "Claims Report"

use std::path::PathBuf;

use snapdoc::{Exporter, FileCapture, PageFormat, PdfSink, PdfSinkConfig};

struct ExportConfig {
    input: PathBuf,
    output: Option<String>,
    title: String,
    letter: bool,
}

impl ExportConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output = None;
        let mut title = "Exported Snapshot".to_string();
        let mut letter = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        output = Some(args[i].clone());
                    }
                },
                "--title" | "-t" => {
                    i += 1;
                    if i < args.len() {
                        title = args[i].clone();
                    }
                },
                "--letter" => {
                    letter = true;
                },
                arg if !arg.starts_with('-') => {
                    input = Some(PathBuf::from(arg));
                },
                _ => {},
            }
            i += 1;
        }

        Some(Self {
            input: input?,
            output,
            title,
            letter,
        })
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let Some(config) = ExportConfig::from_args() else {
        eprintln!("Usage: export_pdf <input-image> [--output file.pdf] [--title \"...\"] [--letter]");
        std::process::exit(2);
    };

    let format = if config.letter { PageFormat::letter() } else { PageFormat::a4() };
    let exporter = Exporter::with_format(FileCapture::new(), format);
    let sink = PdfSink::with_config(format, PdfSinkConfig::default().with_title(&config.title));

    let result = exporter
        .export_batch(&config.input, sink, &config.title, config.output.as_deref())
        .await;

    match result {
        Ok(filename) => println!("Saved {}", filename),
        Err(e) => {
            eprintln!("Export failed: {}", e);
            std::process::exit(1);
        },
    }
}
