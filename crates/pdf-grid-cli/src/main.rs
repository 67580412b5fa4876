mod logger;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use logger::CliLogger;
use pdf_grid::ExportOptions;
use pdf_grid_runtime::{ExportRequest, ExportSession, ExportUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "pdfg", about = "Arrange images on a grid and export them as one PDF", version)]
struct Cli {
    /// More log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export images to a grid PDF
    Export(ExportArgs),

    /// List the available page sizes
    Presets,
}

#[derive(Args)]
struct ExportArgs {
    /// Input image file(s), placed in the order given
    #[arg(short, long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Directory to write the PDF to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Output file name (".pdf" is appended if missing)
    #[arg(short, long)]
    name: Option<String>,

    /// Load options from a JSON file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the effective options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Page size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Page orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Images per row
    #[arg(long)]
    columns: Option<usize>,

    /// Top and bottom padding in points
    #[arg(long)]
    vertical_pad: Option<f32>,

    /// Left padding in points
    #[arg(long)]
    left_pad: Option<f32>,

    /// Right padding in points
    #[arg(long)]
    right_pad: Option<f32>,

    /// Space between cells in points
    #[arg(long)]
    gutter: Option<f32>,

    /// Longest image side in pixels after downscaling
    #[arg(long)]
    max_side: Option<u32>,

    /// JPEG quality from 0.0 to 1.0
    #[arg(long)]
    quality: Option<f32>,

    /// Header text drawn at the top of each page
    #[arg(long)]
    header: Option<String>,

    /// Footer text drawn at the bottom of each page
    #[arg(long)]
    footer: Option<String>,

    /// Logo image shown before the header text
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Number printed on the first page
    #[arg(long)]
    start_page: Option<usize>,

    /// Print each image's file name beneath it (`--captions false` turns it off)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    captions: Option<bool>,

    /// Show pagination only, don't generate PDF
    #[arg(long)]
    stats_only: bool,
}

impl ExportArgs {
    /// Apply every flag that was given on top of `options`
    fn apply(&self, options: &mut ExportOptions) {
        if let Some(name) = &self.name {
            options.file_name = name.clone();
        }
        if let Some(paper) = self.paper {
            options.page_size = paper.into();
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
        if let Some(columns) = self.columns {
            options.columns = columns;
        }
        if let Some(vertical_pad) = self.vertical_pad {
            options.vertical_pad = vertical_pad;
        }
        if let Some(left_pad) = self.left_pad {
            options.left_pad = left_pad;
        }
        if let Some(right_pad) = self.right_pad {
            options.right_pad = right_pad;
        }
        if let Some(gutter) = self.gutter {
            options.gutter = gutter;
        }
        if let Some(max_side) = self.max_side {
            options.max_image_side = max_side;
        }
        if let Some(quality) = self.quality {
            options.jpeg_quality = quality;
        }
        if let Some(header) = &self.header {
            options.header = header.clone();
        }
        if let Some(footer) = &self.footer {
            options.footer = footer.clone();
        }
        if let Some(logo) = &self.logo {
            options.logo = Some(logo.clone());
        }
        if let Some(start_page) = self.start_page {
            options.starting_page_number = start_page;
        }
        if let Some(captions) = self.captions {
            options.captions = captions;
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for pdf_grid::PageSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for pdf_grid::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

/// Print updates as they arrive; errors are reported by `main`
async fn print_updates(mut update_rx: mpsc::UnboundedReceiver<ExportUpdate>) {
    while let Some(update) = update_rx.recv().await {
        match update {
            ExportUpdate::Status { message } => println!("{}", message),
            ExportUpdate::Complete {
                path,
                page_count,
                byte_len,
            } => {
                println!(
                    "Exported {} pages ({} bytes) → {}",
                    page_count,
                    byte_len,
                    path.display()
                );
            }
            ExportUpdate::Progress { .. }
            | ExportUpdate::StatsCalculated { .. }
            | ExportUpdate::Error { .. } => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    CliLogger::new(CliLogger::level_for(cli.verbose, cli.quiet))
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Presets => {
            for size in pdf_grid::PageSize::ALL {
                let (w, h) = size.dimensions_mm();
                let (w_pt, h_pt) = size.dimensions_pt(pdf_grid::Orientation::Portrait);
                println!(
                    "{:<8} {:>6.1} x {:>6.1} mm  ({:.0} x {:.0} pt)",
                    size.name(),
                    w,
                    h,
                    w_pt,
                    h_pt
                );
            }
        }

        Commands::Export(args) => {
            let mut options = match &args.config {
                Some(path) => ExportOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => ExportOptions::default(),
            };
            args.apply(&mut options);

            options.validate()?;

            if let Some(path) = &args.save_config {
                options
                    .save(path)
                    .await
                    .with_context(|| format!("Failed to save {}", path.display()))?;
                println!("Saved options → {}", path.display());
            }

            let stats = pdf_grid::calculate_statistics(
                args.input.len(),
                &options.geometry(),
                &options.decoration(),
            );
            println!("Grid Statistics:");
            println!("  Images: {}", stats.image_count);
            println!("  Cell size: {:.1} pt", stats.cell_size_pt);
            println!(
                "  Grid: {} columns x {} rows ({} per page)",
                stats.columns, stats.rows_per_page, stats.capacity_per_page
            );
            println!("  Pages: {}", stats.page_count);

            if args.stats_only {
                return Ok(());
            }

            let (update_tx, update_rx) = mpsc::unbounded_channel();
            let printer = tokio::spawn(print_updates(update_rx));

            let session = ExportSession::new();
            let request = ExportRequest {
                inputs: args.input.into_iter().map(Into::into).collect(),
                options,
                output_dir: args.output_dir,
            };
            let result = session.export(request, &update_tx).await;

            drop(update_tx);
            let _ = printer.await;

            match result {
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    return Err(anyhow::Error::new(e).context(pdf_grid::FAILURE_HINT));
                }
                None => anyhow::bail!("An export is already running"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export_args(args: &[&str]) -> ExportArgs {
        let argv = ["pdfg", "export", "-i", "a.png"].iter().chain(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Export(args) => args,
            Commands::Presets => panic!("Expected export command"),
        }
    }

    #[test]
    fn test_captions_flag() {
        let captioned = ExportOptions {
            captions: true,
            ..Default::default()
        };

        let mut options = captioned.clone();
        export_args(&["--captions", "false"]).apply(&mut options);
        assert!(!options.captions);

        let mut options = ExportOptions::default();
        export_args(&["--captions"]).apply(&mut options);
        assert!(options.captions);

        let mut options = captioned.clone();
        export_args(&[]).apply(&mut options);
        assert!(options.captions);
    }

    #[test]
    fn test_flags_override_config() {
        let mut options = ExportOptions {
            columns: 5,
            header: "From config".to_string(),
            gutter: 3.0,
            ..Default::default()
        };
        export_args(&["--columns", "2", "--paper", "letter", "--start-page", "7"])
            .apply(&mut options);

        assert_eq!(options.columns, 2);
        assert_eq!(options.page_size, pdf_grid::PageSize::Letter);
        assert_eq!(options.starting_page_number, 7);
        // Untouched by flags
        assert_eq!(options.header, "From config");
        assert_eq!(options.gutter, 3.0);
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["pdfg", "export"]).is_err());
    }
}
