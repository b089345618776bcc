use crate::errors::Result;
use crate::grammar::{FirstFollow, FirstItem, FollowItem, Grammar, END_OF_INPUT};
use crate::parser::{classify, Automaton, Conflict, ParseTrace, Parser};
use std::collections::HashSet;

/// One complete grammar analysis: the augmented grammar, its
/// FIRST/FOLLOW sets, the LR(0) automaton with SLR(1) tables, and the
/// conflict classification. Everything is computed at construction and
/// immutable afterwards; parse requests own all their working state, so
/// a shared analysis can serve concurrent parses.
pub struct Analysis {
    grammar: Grammar,
    sets: FirstFollow,
    automaton: Automaton,
    conflicts: Vec<Conflict>,
}

impl Analysis {
    /// Analyzes a grammar from its textual representation. Malformed
    /// rule text fails here; a grammar that turns out not to be SLR(1)
    /// does not, and its automaton and best-effort tables remain
    /// available alongside the conflict report.
    pub fn new(input: &str) -> Result<Analysis> {
        let grammar = Grammar::new(input)?;
        let sets = FirstFollow::new(&grammar);
        let automaton = Automaton::new(&grammar, &sets);
        let conflicts = classify(&grammar, &automaton);

        Ok(Analysis {
            grammar,
            sets,
            automaton,
            conflicts,
        })
    }

    /// Analyzes a grammar read from the file with the given path
    pub fn new_from_file(path: &str) -> std::result::Result<Analysis, Box<dyn std::error::Error>> {
        Ok(Analysis::new(&std::fs::read_to_string(path)?)?)
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// The name of the augmented start symbol
    pub fn start_symbol(&self) -> String {
        self.grammar.non_terminal_name(self.grammar.start())
    }

    /// Sorted names of all non-terminals, including the augmented start
    pub fn non_terminals(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .grammar
            .non_terminal_ids()
            .iter()
            .map(|&i| self.grammar.non_terminal_name(i))
            .collect();
        names.sort();
        names
    }

    /// Sorted values of all terminals
    pub fn terminals(&self) -> Vec<char> {
        let mut values: Vec<char> = self
            .grammar
            .terminal_ids()
            .iter()
            .map(|&i| self.grammar.terminal_value(i))
            .collect();
        values.sort();
        values
    }

    /// FIRST(symbol) by name. A terminal's FIRST is itself; a
    /// non-terminal's is its computed set with EPSILON stripped; an
    /// unknown symbol's is empty.
    pub fn first(&self, symbol: &str) -> HashSet<char> {
        if let Some(id) = self.grammar.maybe_non_terminal_index(symbol) {
            return self
                .sets
                .first(id)
                .iter()
                .filter_map(|item| match item {
                    FirstItem::Character(c) => Some(*c),
                    FirstItem::Empty => None,
                })
                .collect();
        }

        match Self::single_char(symbol) {
            Some(c) if self.grammar.maybe_terminal_index(c).is_some() => HashSet::from([c]),
            _ => HashSet::new(),
        }
    }

    /// FOLLOW(symbol) by name; None for anything that is not a
    /// non-terminal
    pub fn follow(&self, symbol: &str) -> Option<&HashSet<FollowItem>> {
        let id = self.grammar.maybe_non_terminal_index(symbol)?;
        Some(self.sets.follow(id))
    }

    /// Breadth-first listing of the productions reachable from the
    /// augmented start symbol
    pub fn reachable_productions(&self) -> String {
        self.grammar.reachable_productions()
    }

    /// Shift/goto table lookup by symbol name
    pub fn shift(&self, state: usize, symbol: &str) -> Option<usize> {
        if state >= self.automaton.num_states() {
            return None;
        }
        let id = self.symbol_index(symbol)?;
        self.automaton.shift(state, id)
    }

    /// Reduce table lookup by lookahead; `$` selects the end-of-input
    /// column
    pub fn reduce(&self, state: usize, symbol: &str) -> Option<usize> {
        if state >= self.automaton.num_states() {
            return None;
        }
        let c = Self::single_char(symbol)?;
        let lookahead = if c == END_OF_INPUT {
            FollowItem::EndOfInput
        } else {
            FollowItem::Character(c)
        };
        self.automaton.reduce(state, lookahead)
    }

    /// True exactly when no conflict of either kind was found
    pub fn is_slr(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// One line per conflict, naming the state and the conflict kind;
    /// empty exactly when the grammar is SLR(1)
    pub fn conflict_report(&self) -> String {
        self.conflicts
            .iter()
            .map(|conflict| format!("{}\n", conflict))
            .collect()
    }

    /// Traces the shift-reduce parse of an input sentence
    pub fn parse(&self, input: &str) -> ParseTrace {
        Parser::new(&self.grammar, &self.automaton).parse(input)
    }

    fn symbol_index(&self, symbol: &str) -> Option<usize> {
        if let Some(id) = self.grammar.maybe_non_terminal_index(symbol) {
            return Some(id);
        }
        self.grammar.maybe_terminal_index(Self::single_char(symbol)?)
    }

    fn single_char(symbol: &str) -> Option<char> {
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_construction_error() {
        assert!(matches!(Analysis::new(""), Err(Error::EmptyGrammar)));
        assert!(matches!(
            Analysis::new("S|A->a"),
            Err(Error::AlternativeInHead(1))
        ));
    }

    #[test]
    fn test_query_surface() -> Result<()> {
        let analysis = Analysis::new("E->E+T|T\nT->T*F|F\nF->(E)|a")?;

        assert_eq!(analysis.start_symbol(), "E'");
        assert_eq!(analysis.non_terminals(), vec!["E", "E'", "F", "T"]);
        assert_eq!(analysis.terminals(), vec!['(', ')', '*', '+', 'a']);

        assert_eq!(analysis.first("E"), HashSet::from(['(', 'a']));
        assert_eq!(analysis.first("a"), HashSet::from(['a']));
        assert_eq!(analysis.first("z"), HashSet::new());

        let follow = analysis.follow("E").unwrap();
        assert!(follow.contains(&FollowItem::EndOfInput));
        assert!(follow.contains(&FollowItem::Character('+')));
        assert_eq!(analysis.follow("a"), None);

        Ok(())
    }

    #[test]
    fn test_table_queries() -> Result<()> {
        let analysis = Analysis::new("E->E+T|T\nT->T*F|F\nF->(E)|a")?;

        assert_eq!(analysis.shift(0, "E"), Some(1));
        assert_eq!(analysis.shift(0, "("), Some(4));
        assert_eq!(analysis.shift(0, "+"), None);
        assert_eq!(analysis.shift(99, "E"), None);

        assert_eq!(analysis.reduce(2, "+"), Some(0));
        assert_eq!(analysis.reduce(1, "$"), Some(0));
        assert_eq!(analysis.reduce(0, "a"), None);
        assert_eq!(analysis.reduce(99, "$"), None);

        Ok(())
    }

    #[test]
    fn test_classification() -> Result<()> {
        let analysis = Analysis::new("E->E+T|T\nT->T*F|F\nF->(E)|a")?;
        assert!(analysis.is_slr());
        assert_eq!(analysis.conflict_report(), "");

        let analysis = Analysis::new("S->iS|iSeS|a")?;
        assert!(!analysis.is_slr());
        assert_eq!(
            analysis.conflicts(),
            &[Conflict::ShiftReduce { state: 4 }]
        );
        assert!(analysis.conflict_report().contains("shift/reduce"));
        assert!(analysis.conflict_report().contains("state 4"));

        Ok(())
    }

    #[test]
    fn test_parse_delegates() -> Result<()> {
        let analysis = Analysis::new("S->aSb|@")?;

        assert!(analysis.parse("aabb").accepted);
        assert!(!analysis.parse("aab").accepted);

        Ok(())
    }
}
