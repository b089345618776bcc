use crate::analysis::Analysis;

/// Outputs the FIRST and FOLLOW set of every non-terminal
pub fn output(analysis: &Analysis) {
    for name in analysis.non_terminals() {
        let mut first: Vec<String> = analysis
            .first(&name)
            .into_iter()
            .map(|c| c.to_string())
            .collect();
        first.sort();

        let mut follow: Vec<String> = analysis
            .follow(&name)
            .map(|items| items.iter().map(ToString::to_string).collect())
            .unwrap_or_default();
        follow.sort();

        println!("FIRST({}) = {{{}}}", name, first.join(", "));
        println!("FOLLOW({}) = {{{}}}", name, follow.join(", "));
    }
}
