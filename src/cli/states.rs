use crate::analysis::Analysis;

/// Outputs every automaton state with its items and table entries
pub fn output(analysis: &Analysis) {
    let grammar = analysis.grammar();
    let automaton = analysis.automaton();

    for (state, items) in automaton.states().iter().enumerate() {
        println!("state {}", state);
        for item in items {
            println!("    {}", item.text(grammar));
        }

        let mut shifts: Vec<(String, usize)> = automaton
            .shift_entries(state)
            .iter()
            .map(|(&symbol, &target)| (grammar.symbol_name(symbol), target))
            .collect();
        shifts.sort();
        for (symbol, target) in shifts {
            println!("    shift {} -> state {}", symbol, target);
        }

        let mut reduces: Vec<(String, usize)> = automaton
            .reduce_entries(state)
            .iter()
            .map(|(lookahead, &item)| (lookahead.to_string(), item))
            .collect();
        reduces.sort();
        for (lookahead, item) in reduces {
            println!("    reduce on {} by item {}", lookahead, item);
        }
    }
}
