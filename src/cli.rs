use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "dj", version)]
#[command(about = "Find the nearest Django project and hand the command line to the management tool")]
pub struct CliArgs {
    /// Directory to start the search from (defaults to the current directory)
    #[arg(long, short = 'C', value_name = "DIR")]
    pub chdir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Marker file that anchors the search (overrides config)
    #[arg(long)]
    pub marker: Option<String>,

    /// Management tool to hand off to (overrides config)
    #[arg(long)]
    pub command: Option<String>,

    /// Print the discovered project root and exit without delegating
    #[arg(long)]
    pub locate: bool,

    /// Arguments forwarded verbatim to the management tool
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
