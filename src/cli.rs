use std::path::PathBuf;

use clap::Parser;

use crate::core::config::Side;
use crate::core::report::MAX_VERBOSITY;

const VERBOSITY_HELP: &str = "Verbosity levels:
  0: Silent
  1: ERROR messages only
  2: ERRORs and WARNINGs
  3: ERRORs, WARNINGs, and INFO-WARNs
  4: All messages (including INFO)";

/// Update the mods of Minecraft client and server installations from Modrinth.
#[derive(Debug, Parser)]
#[command(name = "mod-updater", after_help = VERBOSITY_HELP)]
pub struct Cli {
    /// JSON file listing the installations to update.
    pub config_file: PathBuf,

    /// Which installations `"auto"` entries apply to.
    #[arg(value_enum)]
    pub mode: Side,

    /// Log file, appended to. `None` disables file logging.
    #[arg(short, long, default_value = "log.txt")]
    pub logfile: String,

    /// Minecraft version for every installation, e.g. 1.20.4, latest or latest_snapshot.
    #[arg(short, long)]
    pub mcversion: Option<String>,

    /// Do not install mod loaders.
    #[arg(short, long)]
    pub noloader: bool,

    /// Verbosity of the log file.
    #[arg(short = 'V', long, default_value_t = MAX_VERBOSITY,
          value_parser = clap::value_parser!(u8).range(0..=MAX_VERBOSITY as i64))]
    pub log_verbosity: u8,

    /// Verbosity of console output.
    #[arg(short = 'v', long, default_value_t = MAX_VERBOSITY,
          value_parser = clap::value_parser!(u8).range(0..=MAX_VERBOSITY as i64))]
    pub print_verbosity: u8,
}

impl Cli {
    /// Log file path, unless file logging is disabled.
    pub fn log_path(&self) -> Option<PathBuf> {
        (self.logfile != "None").then(|| PathBuf::from(&self.logfile))
    }
}
