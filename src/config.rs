use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "dcmwrangle", version, about = "Sort DICOM series into named groups and convert them")]
pub struct Cli {
    /// Directory of DICOM files to wrangle (default: current directory).
    #[arg(short = 'i', long = "inpath", default_value = ".")]
    pub inpath: PathBuf,

    /// Default conversion destination (default: the input directory).
    #[arg(short = 'o', long = "outpath")]
    pub outpath: Option<PathBuf>,

    /// dcm2niix executable.
    #[arg(long, env = "DCMWRANGLE_DCM2NIIX", default_value = "dcm2niix")]
    pub dcm2niix: String,

    /// Give up on a single conversion after this many seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// File to keep prompt history in.
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Settings for one interactive session.
#[derive(Debug, Clone)]
pub struct Config {
    pub inpath: PathBuf,
    pub outpath: Option<PathBuf>,
    pub dcm2niix: String,
    pub timeout: Option<Duration>,
    pub history: Option<PathBuf>,
    pub verbose: bool,
}

impl Config {
    pub fn new(inpath: impl Into<PathBuf>) -> Self {
        Self {
            inpath: inpath.into(),
            outpath: None,
            dcm2niix: "dcm2niix".to_string(),
            timeout: None,
            history: None,
            verbose: false,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            inpath: cli.inpath,
            outpath: cli.outpath,
            dcm2niix: cli.dcm2niix,
            timeout: cli.timeout.map(Duration::from_secs),
            history: cli.history,
            verbose: cli.verbose,
        }
    }
}
