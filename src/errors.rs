use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing a grammar from its textual
/// representation. A grammar that is well-formed but not SLR(1) is not
/// an error; the classification report covers that case.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("empty grammar")]
    EmptyGrammar,
    #[error("'|' may not appear on the left side of a rule (line {0})")]
    AlternativeInHead(usize),
    #[error("rule head must be a single symbol (line {0})")]
    MultipleSymbolHead(usize),
    #[error("rule head is missing (line {0})")]
    MissingHead(usize),
    #[error("rule has no '->' (line {0})")]
    MissingArrow(usize),
    #[error("empty production body (line {0})")]
    EmptyProductionBody(usize),
    #[error("'@' may not appear alongside other symbols (line {0})")]
    EmptyNotAlone(usize),
}
