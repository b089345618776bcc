use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Command line options for the slr tool
pub struct Options {
    /// Path to the grammar file, one rule per line (`A->x|y`)
    pub grammar: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
/// Commands for the slr tool
pub enum Commands {
    /// Summary of the analysis and the SLR(1) verdict
    Info,
    /// FIRST and FOLLOW sets for every non-terminal
    Sets,
    /// Productions reachable from the augmented start symbol
    Productions,
    /// Automaton states with their items and table entries
    States,
    /// Trace the shift-reduce parse of a sentence
    Parse {
        #[arg(long)]
        input: String,
    },
}
