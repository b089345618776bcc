use crate::analysis::Analysis;

/// Outputs the productions reachable from the augmented start symbol
pub fn output(analysis: &Analysis) {
    print!("{}", analysis.reachable_productions());
}
