use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use maplaunch::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "maplaunch",
    version,
    about = "Detect installed map applications on an Android device and open navigation URLs in them"
)]
pub struct Cli {
    /// Output format [default: table]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to the adb executable
    #[arg(long, env = "MAPLAUNCH_ADB")]
    pub adb: Option<PathBuf>,

    /// Serial of the target device
    #[arg(short, long, env = "ANDROID_SERIAL")]
    pub serial: Option<String>,

    /// Detect installed maps but only report what would be launched
    #[arg(long)]
    pub dry_run: bool,

    /// Config file [default: <config dir>/maplaunch/config.ini]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// More log output on stderr (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every map application maplaunch knows about
    Maps,

    /// List map applications installed on the device
    List,

    /// Check if a map is installed (exit 0=yes, 1=no)
    Available {
        /// Map type, e.g. google, waze, yandexNavi
        map: String,
    },

    /// Open a URL in a map application
    Launch {
        /// Map type, e.g. google, waze, yandexNavi
        map: String,
        /// Destination URL understood by that map
        url: String,
    },

    /// Open a directions URL, listing installed alternatives on failure
    Directions {
        /// Map type, e.g. google, waze, yandexNavi
        map: String,
        /// Directions URL understood by that map
        url: String,
    },

    /// Answer JSON method calls on stdin, one per line
    Serve,

    /// Show launcher status and which maps are installed
    Doctor,

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
