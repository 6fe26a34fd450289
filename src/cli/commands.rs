use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "metalsnap", about = "Scheduled precious-metal USD price snapshots")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the scheduled capture loop until interrupted
    Run,
    /// Capture a snapshot immediately using the current slot
    Once,
    /// Print the upcoming capture times
    Schedule {
        #[arg(long, default_value = "5")]
        count: usize,
    },
}
