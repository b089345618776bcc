use crate::analysis::Analysis;

/// Outputs a summary of the analysis
pub fn output(analysis: &Analysis) {
    let width = 24;

    println!(
        "{:w$}: {}",
        "Start symbol",
        analysis.start_symbol(),
        w = width
    );
    println!(
        "{:w$}: {}",
        "Non-terminals",
        analysis.non_terminals().join(" "),
        w = width
    );
    println!(
        "{:w$}: {}",
        "Terminals",
        analysis
            .terminals()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(" "),
        w = width
    );
    println!(
        "{:w$}: {}",
        "Productions",
        analysis.grammar().num_productions(),
        w = width
    );
    println!(
        "{:w$}: {}",
        "States",
        analysis.automaton().num_states(),
        w = width
    );
    println!("{:w$}: {}", "SLR(1)", analysis.is_slr(), w = width);

    if !analysis.is_slr() {
        print!("{}", analysis.conflict_report());
    }
}
