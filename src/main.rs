use clap::Parser;
use slr::analysis::Analysis;
use slr::cli::args::{Commands, Options};
use slr::cli::{info, parse, productions, sets, states};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = Options::parse();
    let analysis = Analysis::new_from_file(&options.grammar)?;

    match options.command {
        None | Some(Commands::Info) => info::output(&analysis),
        Some(Commands::Sets) => sets::output(&analysis),
        Some(Commands::Productions) => productions::output(&analysis),
        Some(Commands::States) => states::output(&analysis),
        Some(Commands::Parse { input }) => parse::output(&analysis, &input),
    }

    Ok(())
}
