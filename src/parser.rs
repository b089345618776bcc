mod automaton;
mod conflicts;
mod items;

pub use automaton::Automaton;
pub use conflicts::{classify, Conflict};
pub use items::Item;

use crate::grammar::{FollowItem, Grammar, Symbol, END_OF_INPUT};
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// An input symbol, including the end-of-input marker
pub enum InputSymbol {
    Character(char),
    EndOfInput,
}

impl fmt::Display for InputSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputSymbol::Character(c) => write!(f, "'{}'", c),
            InputSymbol::EndOfInput => write!(f, "'{}'", END_OF_INPUT),
        }
    }
}

/// One recorded step of a parse: the input remaining after the step, a
/// description of the action taken, and the flattened stack contents
/// after the step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStep {
    pub remaining: String,
    pub action: String,
    pub output: String,
}

/// The state and lookahead at which a parse stopped with no applicable
/// action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub state: usize,
    pub symbol: InputSymbol,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "no shift or reduce action for {} in state {}",
            self.symbol, self.state
        )
    }
}

/// A complete record of one parse attempt. The steps accumulated before
/// a failure are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTrace {
    pub steps: Vec<ParseStep>,
    pub accepted: bool,
    pub error: Option<ParseError>,
}

/// A table-driven shift-reduce parser over a built automaton. The
/// parser itself is immutable; every parse call owns its queue, stack
/// and output, so one parser can serve any number of requests.
pub struct Parser<'a> {
    grammar: &'a Grammar,
    automaton: &'a Automaton,
}

/// The per-invocation state of one parse
struct Run {
    symbols: Vec<char>,
    consumed: usize,
    queue: VecDeque<InputSymbol>,
    stack: Vec<usize>,
    output: Vec<char>,
    steps: Vec<ParseStep>,
}

enum Reduction {
    Continue,
    Accept,
    Fail(ParseError),
}

impl Run {
    fn new(input: &str) -> Run {
        // Spaces and newlines are not grammar symbols; tokenization works
        // on the cleaned input
        let symbols: Vec<char> = input.chars().filter(|&c| c != ' ' && c != '\n').collect();

        let mut queue: VecDeque<InputSymbol> = symbols
            .iter()
            .map(|&c| InputSymbol::Character(c))
            .collect();
        queue.push_back(InputSymbol::EndOfInput);

        Run {
            symbols,
            consumed: 0,
            queue,
            stack: vec![0],
            output: Vec::new(),
            steps: Vec::new(),
        }
    }

    fn remaining(&self) -> String {
        self.symbols[self.consumed..].iter().collect()
    }

    fn record(&mut self, action: String) {
        self.steps.push(ParseStep {
            remaining: self.remaining(),
            action,
            output: self.output.iter().collect(),
        });
    }
}

impl<'a> Parser<'a> {
    pub fn new(grammar: &'a Grammar, automaton: &'a Automaton) -> Parser<'a> {
        Parser { grammar, automaton }
    }

    /// Parses an input sentence, recording a trace step for every shift
    /// and reduce taken. The loop ends by accepting on the augmenting
    /// production, or with an error naming the state and lookahead for
    /// which no action is defined.
    pub fn parse(&self, input: &str) -> ParseTrace {
        let mut run = Run::new(input);

        loop {
            let state = *run.stack.last().unwrap();
            let lookahead = *run.queue.front().unwrap();

            if let Some(target) = self.shift_target(state, lookahead) {
                self.shift(&mut run, state, target);
                continue;
            }

            let key = match lookahead {
                InputSymbol::Character(c) => FollowItem::Character(c),
                InputSymbol::EndOfInput => FollowItem::EndOfInput,
            };
            if let Some(item_index) = self.automaton.reduce(state, key) {
                match self.reduce(&mut run, state, item_index, lookahead) {
                    Reduction::Continue => continue,
                    Reduction::Accept => {
                        return ParseTrace {
                            steps: run.steps,
                            accepted: true,
                            error: None,
                        };
                    }
                    Reduction::Fail(error) => {
                        return ParseTrace {
                            steps: run.steps,
                            accepted: false,
                            error: Some(error),
                        };
                    }
                }
            }

            return ParseTrace {
                steps: run.steps,
                accepted: false,
                error: Some(ParseError {
                    state,
                    symbol: lookahead,
                }),
            };
        }
    }

    /// The shift target for the lookahead, if the lookahead denotes a
    /// grammar symbol the state shifts on
    fn shift_target(&self, state: usize, lookahead: InputSymbol) -> Option<usize> {
        let InputSymbol::Character(c) = lookahead else {
            return None;
        };
        let symbol = self.grammar.symbol_index_of_char(c)?;
        self.automaton.shift(state, symbol)
    }

    /// Consumes the lookahead, pushes the target state and appends the
    /// consumed symbol to the output
    fn shift(&self, run: &mut Run, state: usize, target: usize) {
        let Some(InputSymbol::Character(c)) = run.queue.pop_front() else {
            panic!("shift without a character lookahead");
        };
        run.consumed += 1;
        run.stack.push(target);
        run.output.push(c);
        run.record(format!("shift '{}': state {} -> {}", c, state, target));
    }

    /// Reduces by the complete item at the given index of the state:
    /// accepts on the augmented start, otherwise pops the body (zero
    /// symbols for an EPSILON body), pushes the head and follows the
    /// goto entry from the uncovered state
    fn reduce(
        &self,
        run: &mut Run,
        state: usize,
        item_index: usize,
        lookahead: InputSymbol,
    ) -> Reduction {
        let item = self.automaton.states()[state][item_index];
        let production = self.grammar.production(item.production());

        if production.head == self.grammar.start() {
            // the augmenting production is the unique accepting reduction
            run.output = self.grammar.non_terminal_name(production.head).chars().collect();
            run.record(format!(
                "reduce by {}: accept",
                self.grammar.production_text(item.production())
            ));
            return Reduction::Accept;
        }

        let popped = production
            .body
            .iter()
            .filter(|symbol| !matches!(symbol, Symbol::Empty))
            .count();
        if run.stack.len() <= popped {
            // only reachable through the best-effort tables of a
            // conflicted grammar
            return Reduction::Fail(ParseError {
                state,
                symbol: lookahead,
            });
        }
        for _ in 0..popped {
            run.stack.pop();
            run.output.pop();
        }

        let uncovered = *run.stack.last().unwrap();
        let Some(target) = self.automaton.shift(uncovered, production.head) else {
            return Reduction::Fail(ParseError {
                state: uncovered,
                symbol: lookahead,
            });
        };

        run.stack.push(target);
        run.output
            .extend(self.grammar.non_terminal_name(production.head).chars());
        run.record(format!(
            "reduce by {}: state {} -> {}",
            self.grammar.production_text(item.production()),
            state,
            target
        ));

        Reduction::Continue
    }
}
