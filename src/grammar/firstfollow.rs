use super::{Grammar, Production, Symbol, END_OF_INPUT, EPSILON};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
/// An element of a FIRST set
pub enum FirstItem {
    Character(char),
    Empty,
}

#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
/// An element of a FOLLOW set. There is deliberately no Empty variant:
/// EPSILON is never a legitimate FOLLOW member.
pub enum FollowItem {
    Character(char),
    EndOfInput,
}

impl fmt::Display for FirstItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FirstItem::Character(c) => write!(f, "{}", c),
            FirstItem::Empty => write!(f, "{}", EPSILON),
        }
    }
}

impl fmt::Display for FollowItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FollowItem::Character(c) => write!(f, "{}", c),
            FollowItem::EndOfInput => write!(f, "{}", END_OF_INPUT),
        }
    }
}

/// FIRST and FOLLOW sets for an augmented grammar, computed once at
/// construction and read-only afterwards
pub struct FirstFollow {
    firsts: Vec<HashSet<FirstItem>>,
    follows: HashMap<usize, HashSet<FollowItem>>,
}

impl FirstFollow {
    pub fn new(grammar: &Grammar) -> FirstFollow {
        let firsts = (0..grammar.num_symbols()).map(|_| HashSet::new()).collect();

        let mut follows: HashMap<usize, HashSet<FollowItem>> = HashMap::new();
        for &i in grammar.non_terminal_ids() {
            follows.insert(i, HashSet::new());
        }

        let mut sets = FirstFollow { firsts, follows };
        sets.compute_firsts(grammar);
        sets.compute_follows(grammar);

        sets
    }

    /// FIRST for the symbol with the given id. A nullable non-terminal's
    /// set contains FirstItem::Empty; callers exposing FIRST publicly
    /// strip it.
    pub fn first(&self, symbol: usize) -> &HashSet<FirstItem> {
        &self.firsts[symbol]
    }

    /// FOLLOW for the non-terminal with the given id
    pub fn follow(&self, non_terminal: usize) -> &HashSet<FollowItem> {
        &self.follows[&non_terminal]
    }

    /// Calculates FIRST for all grammar symbols
    fn compute_firsts(&mut self, grammar: &Grammar) {
        // Algorithm adapted from Aho et al (2007) p.221

        // FIRST of a terminal is just the terminal, and never changes
        for &t in grammar.terminal_ids() {
            self.firsts[t].insert(FirstItem::Character(grammar.terminal_value(t)));
        }

        // Iterate over all productions until a full pass adds nothing.
        // The sets only ever grow and are bounded by the alphabet, so the
        // loop terminates.
        let mut count = 0;
        loop {
            for production in grammar.productions() {
                let (found, nullable) = self.first_of_sequence(&production.body);

                let set = &mut self.firsts[production.head];
                for c in found {
                    set.insert(FirstItem::Character(c));
                }
                if nullable {
                    set.insert(FirstItem::Empty);
                }
            }

            let total: usize = self.firsts.iter().map(HashSet::len).sum();
            if total == count {
                break;
            }
            count = total;
        }
    }

    /// Returns the non-EPSILON FIRST members of a symbol sequence, and
    /// whether the whole sequence can derive the empty string. The scan
    /// stops at the first symbol whose FIRST lacks EPSILON.
    fn first_of_sequence(&self, symbols: &[Symbol]) -> (HashSet<char>, bool) {
        let mut found: HashSet<char> = HashSet::new();

        for symbol in symbols {
            let id = match symbol {
                Symbol::Terminal(id) | Symbol::NonTerminal(id) => *id,
                Symbol::Empty => continue,
            };

            let mut nullable = false;
            for item in &self.firsts[id] {
                match item {
                    FirstItem::Character(c) => {
                        found.insert(*c);
                    }
                    FirstItem::Empty => {
                        nullable = true;
                    }
                }
            }
            if !nullable {
                return (found, false);
            }
        }

        (found, true)
    }

    /// Calculates FOLLOW for all non-terminals
    fn compute_follows(&mut self, grammar: &Grammar) {
        // Algorithm adapted from Aho et al (2007) p.221-222

        // FOLLOW of the start symbol always holds end-of-input
        self.follows
            .get_mut(&grammar.start())
            .unwrap()
            .insert(FollowItem::EndOfInput);

        let mut count = 1;
        loop {
            for production in grammar.productions() {
                self.follow_production(production);
            }

            let total: usize = self.follows.values().map(HashSet::len).sum();
            if total == count {
                break;
            }
            count = total;
        }
    }

    /// Updates the FOLLOW sets of the non-terminals occurring in one
    /// production body: each receives the FIRST of the suffix after it,
    /// and the head's FOLLOW when that suffix is empty or nullable
    fn follow_production(&mut self, production: &Production) {
        for (i, symbol) in production.body.iter().enumerate() {
            let Symbol::NonTerminal(b) = symbol else {
                continue;
            };

            let (found, nullable) = if i + 1 < production.body.len() {
                self.first_of_sequence(&production.body[i + 1..])
            } else {
                (HashSet::new(), true)
            };

            let set = self.follows.get_mut(b).unwrap();
            for c in found {
                set.insert(FollowItem::Character(c));
            }

            if nullable && *b != production.head {
                let from_head = self.follows[&production.head].clone();
                self.follows.get_mut(b).unwrap().extend(from_head);
            }
        }
    }
}
