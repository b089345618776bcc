use super::automaton::Automaton;
use crate::grammar::{FollowItem, Grammar};
use std::fmt;

/// A reason a grammar fails to be SLR(1), naming the offending state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// Two complete items in the state share a reduce lookahead
    ReduceReduce { state: usize },
    /// A shift symbol of the state is also a reduce lookahead
    ShiftReduce { state: usize },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Conflict::ReduceReduce { state } => write!(
                f,
                "reduce/reduce conflict in state {}: two complete items share a reduce lookahead",
                state
            ),
            Conflict::ShiftReduce { state } => write!(
                f,
                "shift/reduce conflict in state {}: a shift symbol is in the FOLLOW set of a complete item",
                state
            ),
        }
    }
}

/// Collects every conflict in the automaton: the reduce/reduce
/// collisions recorded while the tables were built, then a shift/reduce
/// disjointness check of each state's shift symbols against its reduce
/// lookaheads. Violations accumulate; the grammar is SLR(1) exactly
/// when the result is empty.
pub fn classify(g: &Grammar, automaton: &Automaton) -> Vec<Conflict> {
    let mut conflicts: Vec<Conflict> = automaton
        .reduce_reduce_states()
        .iter()
        .map(|&state| Conflict::ReduceReduce { state })
        .collect();

    for state in 0..automaton.num_states() {
        let overlap = automaton
            .reduce_entries(state)
            .keys()
            .any(|lookahead| match lookahead {
                FollowItem::Character(c) => g
                    .maybe_terminal_index(*c)
                    .is_some_and(|id| automaton.shift(state, id).is_some()),
                // end-of-input is never a shift symbol
                FollowItem::EndOfInput => false,
            });
        if overlap {
            conflicts.push(Conflict::ShiftReduce { state });
        }
    }

    conflicts
}
