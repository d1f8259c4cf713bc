use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "timesheet",
    about = "Aggregate a day's commits across tracked repositories into a timesheet",
    version,
    long_about = None
)]
pub struct Args {
    /// API token used as the bearer credential for every repository request
    #[arg(value_name = "TOKEN", required_unless_present = "init")]
    pub token: Option<String>,

    /// Target date as DD/MM; prompted for on stdin when omitted
    #[arg(short, long)]
    pub date: Option<String>,

    /// Reference year the DD/MM input is resolved against
    #[arg(short, long, default_value_t = 2024)]
    pub year: i32,

    /// Path to a custom repository endpoint file
    #[arg(short, long)]
    pub repos: Option<PathBuf>,

    /// Path the rendered report is written to
    #[arg(short, long, default_value = "./output.txt")]
    pub output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Initialize repos.txt with the default endpoint templates
    #[arg(long)]
    pub init: bool,
}
