use clap::Args;
use rand::RngCore;
use registration::error::AppError;
use registration::intake::{
    EntropySource, RenderState, RenderStateBuilder, SeededEntropy, SubmissionEvaluator,
    SubmissionInput, ThreadEntropy,
};

#[derive(Args, Debug, Default)]
pub(crate) struct EvaluateArgs {
    /// Applicant full name
    #[arg(long, default_value = "")]
    pub(crate) full_name: String,
    /// Applicant email address
    #[arg(long, default_value = "")]
    pub(crate) email: String,
    /// Program code (CS, IT or EC)
    #[arg(long, default_value = "")]
    pub(crate) program: String,
    /// Phone number, any formatting
    #[arg(long, default_value = "")]
    pub(crate) phone: String,
    /// Optional short bio
    #[arg(long, default_value = "")]
    pub(crate) bio: String,
    /// Fixed random seed for the reference id
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the full render state as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        full_name,
        email,
        program,
        phone,
        bio,
        seed,
        json,
    } = args;

    let input = SubmissionInput {
        full_name,
        email,
        program,
        phone,
        bio,
    };

    let mut rng: Box<dyn RngCore> = match seed {
        Some(seed) => Box::new(SeededEntropy::new(seed).rng()),
        None => Box::new(ThreadEntropy.rng()),
    };
    let result = SubmissionEvaluator::default().evaluate(&input, &mut rng);
    let state = RenderStateBuilder::default().build(&result, true);

    if json {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Render state unavailable: {err}"),
        }
        return Ok(());
    }

    for line in summary_lines(&state) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn summary_lines(state: &RenderState) -> Vec<String> {
    let mut lines = Vec::new();

    match &state.confirmation {
        Some(confirmation) => {
            lines.push("Application submitted".to_string());
            lines.push(format!("Reference ID: {}", confirmation.reference_id));
            lines.push(format!("- Name: {}", confirmation.full_name));
            lines.push(format!("- Email: {}", confirmation.email));
            lines.push(format!("- Phone: {}", confirmation.phone));
            lines.push(format!("- Program: {}", confirmation.program_name));
            if confirmation.bio.is_empty() {
                lines.push("- Bio: —".to_string());
            } else {
                lines.push(format!("- Bio: {}", confirmation.bio));
            }
        }
        None => {
            lines.push(format!(
                "Submission rejected ({} field error(s))",
                state.errors.len()
            ));
            for (field, message) in state.errors.iter() {
                lines.push(format!("- {}: {}", field.label(), message));
            }
        }
    }

    lines
}
