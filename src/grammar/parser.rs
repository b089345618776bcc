use crate::errors::{Error, Result};
use crate::grammar::EPSILON;
use indexmap::IndexMap;

/// The scanned form of a grammar: rule heads in declaration order, each
/// with its alternatives in declaration order, plus the first line's
/// head, which becomes the pre-augmentation start symbol.
#[derive(Debug, PartialEq)]
pub struct RawGrammar {
    pub rules: IndexMap<char, Vec<Vec<char>>>,
    pub start: char,
}

/// Scans the one-rule-per-line representation `A->x|y|...`. Spaces are
/// not symbols and are dropped wherever they appear. Rules for the same
/// head on separate lines merge their alternatives in order.
pub fn parse(input: &str) -> Result<RawGrammar> {
    let mut lines: Vec<&str> = input.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(Error::EmptyGrammar);
    }

    let mut rules: IndexMap<char, Vec<Vec<char>>> = IndexMap::new();
    let mut start: Option<char> = None;

    for (index, line) in lines.iter().enumerate() {
        let (head, alternatives) = parse_rule(line, index + 1)?;
        if start.is_none() {
            start = Some(head);
        }
        // A rule whose body is entirely absent contributes nothing, but
        // its head still counts as the start symbol on the first line
        if !alternatives.is_empty() {
            rules.entry(head).or_default().extend(alternatives);
        }
    }

    let start = start.ok_or(Error::EmptyGrammar)?;

    Ok(RawGrammar { rules, start })
}

/// Scans a single rule line into its head symbol and alternatives
fn parse_rule(line: &str, number: usize) -> Result<(char, Vec<Vec<char>>)> {
    let chars: Vec<char> = line.chars().collect();
    let mut head: Option<char> = None;
    let mut behind = false; // true once the arrow has been passed
    let mut alternatives: Vec<Vec<char>> = Vec::new();
    let mut body: Vec<char> = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == ' ' {
            i += 1;
            continue;
        }
        // `->` counts as the arrow only when at least one character
        // follows it
        if c == '-' && i + 2 < chars.len() && chars[i + 1] == '>' {
            behind = true;
            i += 2;
            continue;
        }
        if c == '|' {
            if !behind {
                return Err(Error::AlternativeInHead(number));
            }
            if body.is_empty() {
                return Err(Error::EmptyProductionBody(number));
            }
            alternatives.push(std::mem::take(&mut body));
            i += 1;
            continue;
        }
        if !behind {
            if head.is_some() {
                return Err(Error::MultipleSymbolHead(number));
            }
            head = Some(c);
            i += 1;
            continue;
        }
        body.push(c);
        i += 1;
    }

    if !behind {
        return Err(Error::MissingArrow(number));
    }
    let Some(head) = head else {
        return Err(Error::MissingHead(number));
    };
    if !body.is_empty() {
        alternatives.push(body);
    }

    for alternative in &alternatives {
        if alternative.len() > 1 && alternative.contains(&EPSILON) {
            return Err(Error::EmptyNotAlone(number));
        }
    }

    Ok((head, alternatives))
}
