use super::items::Item;
use crate::grammar::{FirstFollow, FollowItem, Grammar, Symbol};
use std::collections::HashMap;

/// The LR(0) automaton for an augmented grammar, together with its
/// SLR(1) shift/goto and reduce tables. States are indexed by creation
/// order; state 0 holds the starting item of the augmenting production.
/// The shift table maps a symbol id to the target state; the reduce
/// table maps a lookahead to the index of the complete item within the
/// state. Both are built once and immutable afterwards.
pub struct Automaton {
    states: Vec<Vec<Item>>,
    shifts: Vec<HashMap<usize, usize>>,
    reduces: Vec<HashMap<FollowItem, usize>>,
    rr_conflicts: Vec<usize>,
}

impl Automaton {
    /// Builds the automaton and both tables in a single pass over a
    /// work-list of states that grows in place, so no second indexing
    /// pass is needed
    pub fn new(g: &Grammar, sets: &FirstFollow) -> Automaton {
        let mut automaton = Automaton {
            states: vec![vec![Item::start(g, g.start_production())]],
            shifts: vec![HashMap::new()],
            reduces: vec![HashMap::new()],
            rr_conflicts: Vec::new(),
        };

        let mut state = 0;
        while state < automaton.states.len() {
            automaton.close(g, state);

            // The state may keep growing while its own items are being
            // processed, when a shift entry loops back into it
            let mut i = 0;
            while i < automaton.states[state].len() {
                let item = automaton.states[state][i];
                if item.is_reduce() {
                    automaton.add_reductions(g, sets, state, i);
                } else {
                    automaton.add_shift(g, state, item);
                }
                i += 1;
            }

            state += 1;
        }

        automaton
    }

    /// Expands a state to its closure: for every shift item with a
    /// non-terminal to the right of the dot, the starting items of that
    /// non-terminal's alternatives join the state unless a structurally
    /// equal item is already present
    fn close(&mut self, g: &Grammar, state: usize) {
        let mut i = 0;
        while i < self.states[state].len() {
            if let Some(Symbol::NonTerminal(nt)) = self.states[state][i].next_symbol(g) {
                for &p in g.productions_for_non_terminal(nt) {
                    let candidate = Item::start(g, p);
                    if !self.states[state].contains(&candidate) {
                        self.states[state].push(candidate);
                    }
                }
            }
            i += 1;
        }
    }

    /// Records a reduce-table entry for every terminal in the FOLLOW set
    /// of the complete item's head. An entry already present for a
    /// lookahead is a reduce/reduce conflict: the state is flagged and
    /// the later item wins, so a best-effort table remains available.
    fn add_reductions(&mut self, g: &Grammar, sets: &FirstFollow, state: usize, item_index: usize) {
        let item = self.states[state][item_index];
        let head = g.production(item.production()).head;

        for &lookahead in sets.follow(head) {
            if self.reduces[state].contains_key(&lookahead) {
                self.rr_conflicts.push(state);
            }
            self.reduces[state].insert(lookahead, item_index);
        }
    }

    /// Records the shift/goto entry for a shift item's next symbol. If
    /// the state already shifts on that symbol, the successor item is
    /// merged into the existing target. Otherwise the first state
    /// already containing the successor is reused, and a brand-new state
    /// is appended to the work-list only when none does.
    fn add_shift(&mut self, g: &Grammar, state: usize, item: Item) {
        let symbol = match item.next_symbol(g) {
            Some(Symbol::Terminal(id)) | Some(Symbol::NonTerminal(id)) => id,
            _ => panic!("shift item has no next symbol"),
        };
        let successor = item.advanced(g);

        if let Some(&target) = self.shifts[state].get(&symbol) {
            if !self.states[target].contains(&successor) {
                self.states[target].push(successor);
            }
            return;
        }

        let target = match self.states.iter().position(|s| s.contains(&successor)) {
            Some(existing) => existing,
            None => {
                self.states.push(vec![successor]);
                self.shifts.push(HashMap::new());
                self.reduces.push(HashMap::new());
                self.states.len() - 1
            }
        };
        self.shifts[state].insert(symbol, target);
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// All states with their items, in creation order
    pub fn states(&self) -> &[Vec<Item>] {
        &self.states
    }

    /// The target of shifting the given symbol in the given state
    pub fn shift(&self, state: usize, symbol: usize) -> Option<usize> {
        self.shifts[state].get(&symbol).copied()
    }

    /// The index within the state of the item to reduce by on the given
    /// lookahead
    pub fn reduce(&self, state: usize, lookahead: FollowItem) -> Option<usize> {
        self.reduces[state].get(&lookahead).copied()
    }

    pub(crate) fn shift_entries(&self, state: usize) -> &HashMap<usize, usize> {
        &self.shifts[state]
    }

    pub(crate) fn reduce_entries(&self, state: usize) -> &HashMap<FollowItem, usize> {
        &self.reduces[state]
    }

    /// States flagged during construction, one entry per reduce-table
    /// collision
    pub(crate) fn reduce_reduce_states(&self) -> &[usize] {
        &self.rr_conflicts
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn automaton(input: &str) -> (Grammar, Automaton) {
        let grammar = Grammar::new(input).expect("valid grammar");
        let sets = FirstFollow::new(&grammar);
        let automaton = Automaton::new(&grammar, &sets);
        (grammar, automaton)
    }

    #[test]
    fn test_minimal_grammar() {
        // productions: 0: S -> a, 1: S' -> S
        let (g, automaton) = automaton("S->a");

        assert_eq!(
            automaton.states(),
            &[
                vec![
                    Item::Shift {
                        production: 1,
                        dot: 0
                    },
                    Item::Shift {
                        production: 0,
                        dot: 0
                    },
                ],
                vec![Item::Reduce {
                    production: 1,
                    dot: 1
                }],
                vec![Item::Reduce {
                    production: 0,
                    dot: 1
                }],
            ]
        );

        let s = g.maybe_non_terminal_index("S").unwrap();
        let a = g.maybe_terminal_index('a').unwrap();
        assert_eq!(automaton.shift(0, s), Some(1));
        assert_eq!(automaton.shift(0, a), Some(2));
        assert_eq!(automaton.shift(1, a), None);

        assert_eq!(automaton.reduce(1, FollowItem::EndOfInput), Some(0));
        assert_eq!(automaton.reduce(2, FollowItem::EndOfInput), Some(0));
        assert_eq!(automaton.reduce(2, FollowItem::Character('a')), None);

        assert!(automaton.reduce_reduce_states().is_empty());
    }

    #[test]
    fn test_empty_alternative() {
        // productions: 0: S -> aSb, 1: S -> @, 2: S' -> S
        let (g, automaton) = automaton("S->aSb|@");

        assert_eq!(automaton.num_states(), 5);

        // state 0 closes over S and holds the complete epsilon item
        assert_eq!(
            automaton.states()[0],
            vec![
                Item::Shift {
                    production: 2,
                    dot: 0
                },
                Item::Shift {
                    production: 0,
                    dot: 0
                },
                Item::Reduce {
                    production: 1,
                    dot: 1
                },
            ]
        );
        assert_eq!(automaton.reduce(0, FollowItem::Character('b')), Some(2));
        assert_eq!(automaton.reduce(0, FollowItem::EndOfInput), Some(2));

        // shifting `a` from state 2 loops back into state 2
        let a = g.maybe_terminal_index('a').unwrap();
        let s = g.maybe_non_terminal_index("S").unwrap();
        assert_eq!(automaton.shift(0, a), Some(2));
        assert_eq!(automaton.shift(2, a), Some(2));
        assert_eq!(automaton.shift(2, s), Some(3));

        let b = g.maybe_terminal_index('b').unwrap();
        assert_eq!(automaton.shift(3, b), Some(4));
        assert_eq!(automaton.reduce(4, FollowItem::Character('b')), Some(0));
        assert_eq!(automaton.reduce(4, FollowItem::EndOfInput), Some(0));
    }

    #[test]
    fn test_expression_grammar() {
        // The canonical LR(0) collection for the expression grammar of
        // Aho et al (2007) p.244 has twelve states
        let (g, automaton) = automaton("E->E+T|T\nT->T*F|F\nF->(E)|a");

        assert_eq!(automaton.num_states(), 12);
        assert!(automaton.reduce_reduce_states().is_empty());

        let id = |name: &str| {
            g.maybe_non_terminal_index(name)
                .or_else(|| g.maybe_terminal_index(name.chars().next().unwrap()))
                .unwrap()
        };

        // productions: 0: E -> E+T, 1: E -> T, 2: T -> T*F, 3: T -> F,
        //              4: F -> (E), 5: F -> a, 6: E' -> E
        assert_eq!(automaton.shift(0, id("E")), Some(1));
        assert_eq!(automaton.shift(0, id("T")), Some(2));
        assert_eq!(automaton.shift(0, id("F")), Some(3));
        assert_eq!(automaton.shift(0, id("(")), Some(4));
        assert_eq!(automaton.shift(0, id("a")), Some(5));

        assert_eq!(automaton.shift(1, id("+")), Some(6));
        assert_eq!(automaton.reduce(1, FollowItem::EndOfInput), Some(0));

        assert_eq!(automaton.shift(2, id("*")), Some(7));
        assert_eq!(automaton.reduce(2, FollowItem::Character('+')), Some(0));
        assert_eq!(automaton.reduce(2, FollowItem::Character(')')), Some(0));
        assert_eq!(automaton.reduce(2, FollowItem::EndOfInput), Some(0));

        // GOTO(4, T) reuses state 2 instead of creating a fresh state
        assert_eq!(automaton.shift(4, id("T")), Some(2));
        assert_eq!(automaton.shift(4, id("E")), Some(8));
        assert_eq!(automaton.shift(4, id("(")), Some(4));

        assert_eq!(automaton.shift(6, id("T")), Some(9));
        assert_eq!(automaton.shift(7, id("F")), Some(10));
        assert_eq!(automaton.shift(8, id(")")), Some(11));
        assert_eq!(automaton.shift(8, id("+")), Some(6));
        assert_eq!(automaton.shift(9, id("*")), Some(7));

        assert_eq!(automaton.reduce(9, FollowItem::Character('+')), Some(0));
        assert_eq!(automaton.reduce(10, FollowItem::Character('*')), Some(0));
        assert_eq!(automaton.reduce(11, FollowItem::EndOfInput), Some(0));
    }

    #[test]
    fn test_reduce_reduce_conflict() {
        // productions: 0: S -> Ab, 1: S -> Bb, 2: A -> a, 3: B -> a,
        //              4: S' -> S. FOLLOW(A) and FOLLOW(B) are both {b},
        // so the state holding both complete items collides on b.
        let (_, automaton) = automaton("S->Ab|Bb\nA->a\nB->a");

        assert_eq!(automaton.num_states(), 7);
        assert_eq!(
            automaton.states()[4],
            vec![
                Item::Reduce {
                    production: 2,
                    dot: 1
                },
                Item::Reduce {
                    production: 3,
                    dot: 1
                },
            ]
        );
        assert_eq!(automaton.reduce_reduce_states(), &[4]);

        // the later item wins, and the table stays queryable
        assert_eq!(automaton.reduce(4, FollowItem::Character('b')), Some(1));
    }
}
