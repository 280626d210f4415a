use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "stig-mapper",
    about = "Map dependency, image, and language descriptions to cataloged STIG technology versions",
    version
)]
pub struct Cli {
    /// Project directory; relative paths resolve against it
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Technology catalog JSON [default: stig.json]
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Dependency descriptions JSON (ecosystem -> [{name, description}])
    #[arg(long, value_name = "FILE")]
    pub dependencies: Option<PathBuf>,

    /// Image details JSON (image -> {name, description, full_description})
    #[arg(long, value_name = "FILE")]
    pub images: Option<PathBuf>,

    /// Project languages JSON (language -> share)
    #[arg(long, value_name = "FILE")]
    pub languages: Option<PathBuf>,

    /// Write the aggregate result as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Config file [default: ./.stig-mapper/config.toml, fallback ~/.config/stig-mapper/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List the checklist titles in FILE (one per line) that the catalog cannot produce
    #[arg(long, value_name = "FILE")]
    pub checklist: Option<PathBuf>,

    /// Classify on the current thread only
    #[arg(long)]
    pub sequential: bool,

    /// Also list unmatched and skipped keys
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
