//! gridnote CLI: image + grid + annotations file in, artifacts out.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use image::GenericImageView;
use serde::Deserialize;

use gridnote::export::ExportTarget;
use gridnote::{
    AddressingConvention, ArtifactNames, Cell, ExportConfig, GridError, GridSpec,
    ImageDimensions, Session,
};

#[derive(Parser, Debug)]
#[command(
    name = "gridnote",
    about = "Overlay a grid on an image and export interactive HTML/PDF/PNG with annotated cells",
    version
)]
struct Cli {
    /// Input image (png, jpg, ...)
    #[arg(short, long)]
    image: PathBuf,

    /// Number of grid rows
    #[arg(short, long)]
    rows: u32,

    /// Number of grid columns
    #[arg(short, long)]
    cols: u32,

    /// Uniform pixel margin around the image for axis labels
    #[arg(short, long, default_value_t = 0.0)]
    padding: f32,

    /// Cell addressing convention
    #[arg(long, value_enum, default_value = "row-letter")]
    convention: ConventionArg,

    /// Include grid lines and axis labels in the exported PNG
    #[arg(long)]
    grid_overlay: bool,

    /// Comma-separated formats to export
    #[arg(long, value_delimiter = ',', default_values = ["html", "pdf", "png"])]
    formats: Vec<String>,

    /// JSON file with the annotation list
    #[arg(short, long)]
    annotations: PathBuf,

    /// Output directory for the artifacts
    #[arg(short, long, conflicts_with = "bundle", default_value = ".")]
    out: PathBuf,

    /// Write all artifacts into a single zip archive instead
    #[arg(short, long)]
    bundle: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ConventionArg {
    RowLetter,
    ColLetter,
}

impl From<ConventionArg> for AddressingConvention {
    fn from(arg: ConventionArg) -> Self {
        match arg {
            ConventionArg::RowLetter => Self::RowLetter,
            ConventionArg::ColLetter => Self::ColLetter,
        }
    }
}

/// One entry of the annotations JSON file. The cell is either an address
/// string under the chosen convention ("B3") or explicit indices
/// ({"row": 1, "col": 2}).
#[derive(Debug, Deserialize)]
struct NoteSpec {
    cell: CellRef,
    #[serde(default)]
    title: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellRef {
    Address(String),
    Indices { row: u32, col: u32 },
}

fn run(cli: Cli) -> Result<(), GridError> {
    let image_bytes = std::fs::read(&cli.image)?;
    let decoded = image::load_from_memory(&image_bytes)?;
    let dims = ImageDimensions::new(decoded.width(), decoded.height())?;
    log::info!("Loaded {} ({dims})", cli.image.display());

    let config = ExportConfig {
        padding: cli.padding,
        convention: cli.convention.into(),
        include_grid_overlay: cli.grid_overlay,
        names: ArtifactNames::default(),
        ..Default::default()
    };
    let mut session = Session::new(dims, GridSpec::new(cli.rows, cli.cols), config)?;

    let notes: Vec<NoteSpec> = serde_json::from_slice(&std::fs::read(&cli.annotations)?)?;
    for note in notes {
        match note.cell {
            CellRef::Address(address) => {
                session.annotate_at(&address, note.title, note.text)?;
            }
            CellRef::Indices { row, col } => {
                session.annotate(Cell::new(row, col), note.title, note.text)?;
            }
        }
    }
    log::info!("Loaded {} annotation(s)", session.annotations().len());

    let format_ids: Vec<&str> = cli.formats.iter().map(String::as_str).collect();
    let artifacts = session.export(&image_bytes, &format_ids)?;

    let target = match cli.bundle {
        Some(path) => ExportTarget::ZipBundle(path),
        None => ExportTarget::Directory(cli.out),
    };
    for path in target.write(&artifacts)? {
        println!("{}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
