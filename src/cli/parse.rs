use crate::analysis::Analysis;

/// Outputs the step-by-step trace of parsing a sentence
pub fn output(analysis: &Analysis, input: &str) {
    let trace = analysis.parse(input);

    println!("{:16} {:48} {}", "REMAINING", "ACTION", "OUTPUT");
    for step in &trace.steps {
        println!("{:16} {:48} {}", step.remaining, step.action, step.output);
    }

    if trace.accepted {
        println!("accepted");
    } else if let Some(error) = &trace.error {
        println!("rejected: {}", error);
    }
}
