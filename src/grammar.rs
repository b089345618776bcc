mod firstfollow;
mod parser;
mod symboltable;

pub use firstfollow::{FirstFollow, FirstItem, FollowItem};

use crate::errors::Result;
use std::collections::{HashMap, HashSet, VecDeque};
use symboltable::SymbolTable;

/// The empty-string pseudo-symbol as written in grammar text
pub const EPSILON: char = '@';

/// The end-of-input marker as written in displays and table queries
pub const END_OF_INPUT: char = '$';

/// A context-free grammar symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    NonTerminal(usize),
    Terminal(usize),
    Empty,
}

/// A context-free grammar production
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub head: usize,
    pub body: Vec<Symbol>,
}

/// An augmented context-free grammar. Construction parses the rule
/// text, adds the fresh start symbol, and partitions symbols into
/// terminals and non-terminals; the result is immutable.
pub struct Grammar {
    productions: Vec<Production>,
    symbol_table: SymbolTable,
    nt_productions: HashMap<usize, Vec<usize>>,
    start: usize,
}

impl Grammar {
    /// Creates a grammar from its textual representation, one rule per
    /// line in the form `A->x|y|...`, with `@` for the empty body. The
    /// first line's head is the start symbol; augmentation appends a
    /// fresh start `A'` with the single production `A' -> A` before
    /// symbols are partitioned, so the fresh start is itself recognized
    /// as a non-terminal.
    pub fn new(input: &str) -> Result<Grammar> {
        let raw = parser::parse(input)?;

        let mut symbol_table = SymbolTable::new();
        for &head in raw.rules.keys() {
            symbol_table.add_non_terminal(&head.to_string());
        }
        let start = symbol_table.add_non_terminal(&format!("{}'", raw.start));

        let mut productions: Vec<Production> = Vec::new();
        let mut nt_productions: HashMap<usize, Vec<usize>> = HashMap::new();

        for (&head, alternatives) in &raw.rules {
            let head = symbol_table.add_non_terminal(&head.to_string());
            for alternative in alternatives {
                let body = alternative
                    .iter()
                    .map(|&c| Self::resolve(&mut symbol_table, c))
                    .collect();

                nt_productions.entry(head).or_default().push(productions.len());
                productions.push(Production { head, body });
            }
        }

        // The augmenting production A' -> A is numbered last
        let body = vec![Self::resolve(&mut symbol_table, raw.start)];
        nt_productions.entry(start).or_default().push(productions.len());
        productions.push(Production { head: start, body });

        Ok(Grammar {
            productions,
            symbol_table,
            nt_productions,
            start,
        })
    }

    /// Creates a grammar from a textual representation in a file with
    /// the given path
    pub fn new_from_file(path: &str) -> std::result::Result<Grammar, Box<dyn std::error::Error>> {
        Ok(Grammar::new(&std::fs::read_to_string(path)?)?)
    }

    /// Interns one body character: `@` is the empty pseudo-symbol, a
    /// declared rule head is a non-terminal, anything else a terminal
    fn resolve(symbol_table: &mut SymbolTable, c: char) -> Symbol {
        if c == EPSILON {
            Symbol::Empty
        } else if let Some(id) = symbol_table.non_terminal_index(&c.to_string()) {
            Symbol::NonTerminal(id)
        } else {
            Symbol::Terminal(symbol_table.add_terminal(c))
        }
    }

    /// The id of the augmented start symbol
    pub fn start(&self) -> usize {
        self.start
    }

    /// The id of the single production of the augmented start symbol
    pub fn start_production(&self) -> usize {
        self.productions_for_non_terminal(self.start)[0]
    }

    pub fn production(&self, id: usize) -> &Production {
        &self.productions[id]
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn num_productions(&self) -> usize {
        self.productions.len()
    }

    /// Ids of all productions for the given non-terminal, in declaration
    /// order
    pub fn productions_for_non_terminal(&self, id: usize) -> &[usize] {
        self.nt_productions.get(&id).unwrap()
    }

    pub fn num_symbols(&self) -> usize {
        self.symbol_table.len()
    }

    pub fn non_terminal_ids(&self) -> &[usize] {
        self.symbol_table.non_terminal_ids()
    }

    pub fn terminal_ids(&self) -> &[usize] {
        self.symbol_table.terminal_ids()
    }

    pub fn non_terminal_name(&self, id: usize) -> String {
        self.symbol_table.non_terminal_name(id)
    }

    pub fn terminal_value(&self, id: usize) -> char {
        self.symbol_table.terminal_value(id)
    }

    pub fn symbol_name(&self, id: usize) -> String {
        self.symbol_table.name(id)
    }

    pub fn maybe_terminal_index(&self, value: char) -> Option<usize> {
        self.symbol_table.terminal_index(value)
    }

    pub fn maybe_non_terminal_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.non_terminal_index(name)
    }

    /// Returns the symbol id a single input character denotes, looking
    /// first among terminals and then among single-character
    /// non-terminal names
    pub fn symbol_index_of_char(&self, c: char) -> Option<usize> {
        self.maybe_terminal_index(c)
            .or_else(|| self.maybe_non_terminal_index(&c.to_string()))
    }

    /// The textual form of a body symbol
    pub fn symbol_text(&self, symbol: &Symbol) -> String {
        match symbol {
            Symbol::NonTerminal(id) => self.symbol_table.non_terminal_name(*id),
            Symbol::Terminal(id) => self.symbol_table.terminal_value(*id).to_string(),
            Symbol::Empty => EPSILON.to_string(),
        }
    }

    /// Formats a production as `A -> body`
    pub fn production_text(&self, id: usize) -> String {
        let production = &self.productions[id];
        let body: String = production
            .body
            .iter()
            .map(|symbol| self.symbol_text(symbol))
            .collect();

        format!("{} -> {}", self.non_terminal_name(production.head), body)
    }

    /// Lists the productions reachable from the augmented start symbol,
    /// breadth-first, one `A -> body` line per alternative
    pub fn reachable_productions(&self) -> String {
        let mut out = String::new();
        let mut visited: HashSet<usize> = HashSet::new();
        let mut ready: VecDeque<usize> = VecDeque::from([self.start]);

        while let Some(nt) = ready.pop_front() {
            if !visited.insert(nt) {
                continue;
            }
            for &p in self.productions_for_non_terminal(nt) {
                out.push_str(&self.non_terminal_name(nt));
                out.push_str(" -> ");
                for symbol in &self.productions[p].body {
                    if let Symbol::NonTerminal(next) = symbol {
                        ready.push_back(*next);
                    }
                    out.push_str(&self.symbol_text(symbol));
                }
                out.push('\n');
            }
        }

        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_augmentation() -> Result<()> {
        let g = Grammar::new("S->a")?;

        assert_eq!(g.non_terminal_name(g.start()), "S'");
        assert_eq!(g.num_productions(), 2);

        let augmenting = g.production(g.start_production());
        assert_eq!(augmenting.head, g.start());
        assert_eq!(
            augmenting.body,
            vec![Symbol::NonTerminal(
                g.maybe_non_terminal_index("S").unwrap()
            )]
        );

        Ok(())
    }

    #[test]
    fn test_partition() -> Result<()> {
        // A is declared after its first use and must still be a
        // non-terminal; partitioning runs after the whole grammar is read
        let g = Grammar::new("S->Ab\nA->a")?;

        let non_terminals: Vec<String> = g
            .non_terminal_ids()
            .iter()
            .map(|&i| g.non_terminal_name(i))
            .collect();
        assert_eq!(non_terminals, vec!["S", "A", "S'"]);

        let terminals: Vec<char> = g
            .terminal_ids()
            .iter()
            .map(|&i| g.terminal_value(i))
            .collect();
        assert_eq!(terminals, vec!['b', 'a']);

        Ok(())
    }

    #[test]
    fn test_empty_body_symbol() -> Result<()> {
        let g = Grammar::new("S->aSb|@")?;

        let s = g.maybe_non_terminal_index("S").unwrap();
        let alternatives = g.productions_for_non_terminal(s);
        assert_eq!(alternatives.len(), 2);
        assert_eq!(g.production(alternatives[1]).body, vec![Symbol::Empty]);

        // the epsilon marker is not a terminal
        assert_eq!(g.maybe_terminal_index(EPSILON), None);

        Ok(())
    }

    #[test]
    fn test_production_text() -> Result<()> {
        let g = Grammar::new("S->aSb|@")?;

        assert_eq!(g.production_text(0), "S -> aSb");
        assert_eq!(g.production_text(1), "S -> @");
        assert_eq!(g.production_text(2), "S' -> S");

        Ok(())
    }

    #[test]
    fn test_reachable_productions() -> Result<()> {
        let g = Grammar::new("S->aSb|@")?;
        assert_eq!(g.reachable_productions(), "S' -> S\nS -> aSb\nS -> @\n");

        // unreachable rules are not listed
        let g = Grammar::new("S->a\nB->b")?;
        assert_eq!(g.reachable_productions(), "S' -> S\nS -> a\n");

        Ok(())
    }

    #[test]
    fn test_symbol_index_of_char() -> Result<()> {
        let g = Grammar::new("S->Ab\nA->a")?;

        assert_eq!(
            g.symbol_index_of_char('a'),
            g.maybe_terminal_index('a')
        );
        assert_eq!(
            g.symbol_index_of_char('A'),
            g.maybe_non_terminal_index("A")
        );
        assert_eq!(g.symbol_index_of_char('z'), None);

        Ok(())
    }
}
