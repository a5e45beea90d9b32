use clap::Args;
use lead_scoring::error::AppError;
use lead_scoring::workflows::enquiries::{
    score_enquiry, ScoringConfig, ScoringInput, ScoringResult,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Contact name
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Contact e-mail address
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// Enquiry message body
    #[arg(long)]
    pub(crate) message: Option<String>,
    /// Internal notes captured with the enquiry
    #[arg(long)]
    pub(crate) notes: Option<String>,
    /// Contact phone number
    #[arg(long)]
    pub(crate) phone: Option<String>,
    /// Job postcode
    #[arg(long)]
    pub(crate) postcode: Option<String>,
    /// Lead source (website, referral, ...)
    #[arg(long)]
    pub(crate) source: Option<String>,
    /// Estimated job value in pounds
    #[arg(long)]
    pub(crate) value_estimate: Option<f64>,
    /// JSON scoring config to use instead of the built-in rules
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Print the raw JSON result
    #[arg(long)]
    pub(crate) json: bool,
}

impl ScoreArgs {
    fn input(&self) -> ScoringInput {
        ScoringInput {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            notes: self.notes.clone(),
            postcode: self.postcode.clone(),
            source: self.source.clone(),
            phone: self.phone.clone(),
            value_estimate: self.value_estimate,
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = match &args.config {
        Some(path) => ScoringConfig::from_path(path)?,
        None => ScoringConfig::default(),
    };

    for warning in config.validate() {
        eprintln!("warning: {warning}");
    }

    let result = score_enquiry(&args.input(), &config);

    if args.json {
        let rendered = serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_breakdown(&result));
    }

    Ok(())
}

fn render_breakdown(result: &ScoringResult) -> String {
    let mut out = format!(
        "Score {} ({})\n",
        result.score,
        result.priority.label()
    );

    if result.reason.keywords.is_empty() {
        out.push_str("\nKeywords: none\n");
    } else {
        out.push_str("\nKeywords\n");
        for hit in &result.reason.keywords {
            out.push_str(&format!("- {}: {:+}\n", hit.keyword, hit.points));
        }
    }

    if result.reason.boosts.is_empty() {
        out.push_str("\nBoosts: none\n");
    } else {
        out.push_str("\nBoosts\n");
        for hit in &result.reason.boosts {
            out.push_str(&format!("- {}: {:+}\n", hit.rule, hit.points));
        }
    }

    out
}
