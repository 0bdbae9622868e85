//! Command-line configuration.

use clap::{Parser, Subcommand, ValueEnum};

use crate::generator::TrialGeneratorConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "trial-schedule")]
#[command(about = "Assigns trial competitors to arena time slots")]
pub struct CliConfig {
    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Solve a JSON schedule request and print the JSON output.
    Solve {
        /// Request file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: String,

        #[arg(long, help = "Pretty-print the output JSON")]
        pretty: bool,

        #[arg(long, help = "Sort entries by date, time and arena")]
        sorted: bool,

        #[arg(long, help = "Exit with status 2 when not every run is placed")]
        strict: bool,

        #[arg(long, help = "Log placement and utilization KPIs")]
        kpi: bool,

        #[arg(long, help = "Re-check the output against the hard constraints")]
        audit: bool,
    },
    /// Print a random, reproducible JSON schedule request.
    Generate {
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        #[arg(long, help = "Override the number of competitors")]
        competitors: Option<usize>,

        #[arg(long, help = "Pretty-print the output JSON")]
        pretty: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn generator_config(self) -> TrialGeneratorConfig {
        match self {
            Self::Easy => TrialGeneratorConfig::easy(),
            Self::Medium => TrialGeneratorConfig::medium(),
            Self::Hard => TrialGeneratorConfig::hard(),
        }
    }
}
