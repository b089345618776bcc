use crate::grammar::{Grammar, Symbol};

/// An LR(0) item: a production with a dot marking progress through its
/// body. A shift item still has a symbol to the right of the dot; a
/// reduce item is complete. Equality is structural on the kind, the
/// production and the dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Shift { production: usize, dot: usize },
    Reduce { production: usize, dot: usize },
}

impl Item {
    /// Returns the item for a production with the dot at the left. The
    /// sole item of an EPSILON-only body is immediately complete.
    pub fn start(g: &Grammar, production: usize) -> Item {
        let body = &g.production(production).body;
        if matches!(body.as_slice(), [Symbol::Empty]) {
            Item::Reduce {
                production,
                dot: body.len(),
            }
        } else {
            Item::Shift { production, dot: 0 }
        }
    }

    /// Returns a copy with the dot advanced one position, switching to a
    /// reduce item when the dot reaches the end of the body. Panics if
    /// the item is already complete.
    pub fn advanced(&self, g: &Grammar) -> Item {
        match *self {
            Item::Shift { production, dot } => {
                if dot + 1 == g.production(production).body.len() {
                    Item::Reduce {
                        production,
                        dot: dot + 1,
                    }
                } else {
                    Item::Shift {
                        production,
                        dot: dot + 1,
                    }
                }
            }
            Item::Reduce { .. } => {
                panic!("cannot advance a complete item");
            }
        }
    }

    pub fn production(&self) -> usize {
        match *self {
            Item::Shift { production, .. } | Item::Reduce { production, .. } => production,
        }
    }

    pub fn dot(&self) -> usize {
        match *self {
            Item::Shift { dot, .. } | Item::Reduce { dot, .. } => dot,
        }
    }

    pub fn is_reduce(&self) -> bool {
        matches!(self, Item::Reduce { .. })
    }

    /// The symbol to the right of the dot, for a shift item
    pub fn next_symbol(&self, g: &Grammar) -> Option<Symbol> {
        match *self {
            Item::Shift { production, dot } => Some(g.production(production).body[dot]),
            Item::Reduce { .. } => None,
        }
    }

    /// Formats the item with a dot marker, e.g. `S -> a·Sb`
    pub fn text(&self, g: &Grammar) -> String {
        let production = g.production(self.production());
        let mut body = String::new();
        for (i, symbol) in production.body.iter().enumerate() {
            if i == self.dot() {
                body.push('·');
            }
            body.push_str(&g.symbol_text(symbol));
        }
        if self.dot() == production.body.len() {
            body.push('·');
        }

        format!("{} -> {}", g.non_terminal_name(production.head), body)
    }
}
