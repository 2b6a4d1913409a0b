use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pagepdf",
    version,
    about = "Download chapter page images and assemble them into a searchable PDF"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download every chapter of a subject and build `<subject>.pdf`.
    ///
    /// Images are fetched from `<base_url>/<subject>/<prefix><n>/<NNN>.jpg`
    /// for chapters 1 to 19 and pages 001 to 999.
    Create(CreateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Base URL, e.g. `https://www.example.com/`
    pub base_url: String,

    /// Subject name; also the top-level output directory
    pub subject: String,

    /// Chapter prefix, e.g. `A` for chapters `A1`..`A19`
    pub chapter_prefix: String,

    /// Directory that receives images, manifests and the PDF
    #[arg(long)]
    pub output_root: Option<PathBuf>,

    #[arg(long, default_value = "eng")]
    pub ocr_lang: String,
}
