use std::path::PathBuf;

/// Dashboard CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "zuerihunde", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render the dashboard pages into a directory
    Render(RenderArgs),

    /// Validate a data directory without writing anything
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Directory holding the register exports and the district GeoJSON
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub data: PathBuf,

    /// Output directory, defaults to "./site"
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Replace page files that already exist
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Directory holding the register exports and the district GeoJSON
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub data: PathBuf,

    /// Fail when any district shape has no metric row
    #[arg(long)]
    pub strict: bool,
}
