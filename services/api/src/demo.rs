use crate::infra::{build_service, CliService};
use clap::{Args, ValueEnum};
use green_loan::config::AppConfig;
use green_loan::error::AppError;
use green_loan::telemetry::{self, LogSink};
use green_loan::workflows::underwriting::{
    audit_note, to_csv, ApplicationSubmission, Evaluation, MAX_SCORE,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Legal entity name of the borrower
    #[arg(long)]
    pub(crate) company: String,
    /// Loan requested, in currency units
    #[arg(long)]
    pub(crate) loan_amount: f64,
    /// Carbon credits the borrower reports
    #[arg(long)]
    pub(crate) reported_credits: f64,
    /// Carbon credits confirmed by the registry
    #[arg(long)]
    pub(crate) verified_credits: f64,
    /// Certifying registry (Gold Standard, Verra, Other, None)
    #[arg(long, default_value = "Other")]
    pub(crate) registry: String,
    /// Project type (Reforestation, Renewable, Cookstove, Other, None)
    #[arg(long, default_value = "Other")]
    pub(crate) project_type: String,
    /// Recent remote sensing evidence is available (true/false)
    #[arg(long)]
    pub(crate) remote_sensing: Option<bool>,
    /// Soil tests were validated (true/false); omitted means not failed
    #[arg(long)]
    pub(crate) soil_tests_ok: Option<bool>,
    /// Write the evaluation snapshot as CSV to this path
    #[arg(long)]
    pub(crate) csv_out: Option<PathBuf>,
    /// Write the markdown audit note to this path
    #[arg(long)]
    pub(crate) note_out: Option<PathBuf>,
    /// Print the evaluation as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

impl EvaluateArgs {
    fn submission(&self) -> ApplicationSubmission {
        ApplicationSubmission {
            company: self.company.clone(),
            loan_amount: self.loan_amount,
            reported_credits: self.reported_credits,
            verified_credits: self.verified_credits,
            registry: self.registry.clone(),
            project_type: self.project_type.clone(),
            remote_sensing: self.remote_sensing,
            soil_tests_ok: self.soil_tests_ok,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Run a single preset instead of all of them
    #[arg(long, value_enum)]
    pub(crate) preset: Option<Preset>,
    /// Write all demo evaluations as CSV to this path
    #[arg(long)]
    pub(crate) csv_out: Option<PathBuf>,
}

/// Borrower profiles used in stakeholder walkthroughs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Preset {
    /// Small loan, surplus verified credits ("Maersk 2022 style")
    Maersk,
    /// Large loan, Gold Standard reforestation ("Tech company example")
    Tech,
}

impl Preset {
    fn all() -> [Preset; 2] {
        [Preset::Maersk, Preset::Tech]
    }

    fn title(&self) -> &'static str {
        match self {
            Preset::Maersk => "Maersk 2022 style",
            Preset::Tech => "Tech company example",
        }
    }

    pub(crate) fn submission(&self) -> ApplicationSubmission {
        match self {
            Preset::Maersk => ApplicationSubmission {
                company: "Maersk".to_string(),
                loan_amount: 1000.0,
                reported_credits: 3000.0,
                verified_credits: 3500.0,
                registry: "Other".to_string(),
                project_type: "Other".to_string(),
                remote_sensing: Some(false),
                soil_tests_ok: Some(true),
            },
            Preset::Tech => ApplicationSubmission {
                company: "Microsoft".to_string(),
                loan_amount: 250_000.0,
                reported_credits: 1_400_000.0,
                verified_credits: 1_200_000.0,
                registry: "Gold Standard".to_string(),
                project_type: "Reforestation".to_string(),
                remote_sensing: Some(true),
                soil_tests_ok: Some(false),
            },
        }
    }
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let service = cli_service()?;
    let evaluation = service.submit(args.submission())?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&evaluation)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
    } else {
        render_evaluation(&evaluation);
    }

    if let Some(path) = &args.csv_out {
        write_export(path, &to_csv([&evaluation])?)?;
    }
    if let Some(path) = &args.note_out {
        write_export(path, &audit_note(&evaluation))?;
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = cli_service()?;
    let presets = match args.preset {
        Some(preset) => vec![preset],
        None => Preset::all().to_vec(),
    };

    println!("Green loan evaluator demo");
    let mut evaluations = Vec::with_capacity(presets.len());
    for preset in presets {
        println!("\nPreset: {}", preset.title());
        let evaluation = service.submit(preset.submission())?;
        render_evaluation(&evaluation);
        evaluations.push(evaluation);
    }

    let records = service.audit_records()?;
    println!("\nAudit trail ({} entries)", records.len());
    for record in &records {
        println!(
            "- {} | {} | {} | fingerprint {}",
            record.reference, record.applicant_id, record.status, record.fingerprint
        );
    }

    if let Some(path) = &args.csv_out {
        write_export(path, &to_csv(&evaluations)?)?;
    }

    Ok(())
}

fn cli_service() -> Result<CliService, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    Ok(build_service(config.underwriting)?)
}

fn write_export(path: &Path, contents: &str) -> Result<(), AppError> {
    fs::write(path, contents)?;
    info!(path = %path.display(), "export written");
    Ok(())
}

fn render_evaluation(evaluation: &Evaluation) {
    let decision = &evaluation.decision;
    let signals = &evaluation.signals;

    println!("Decision: {} ({})", decision.status, decision.reason);
    println!(
        "Required credits: {:.2} | verified: {:.2} | shortfall: {:.2}",
        decision.required_credits, evaluation.input.verified_credits, decision.credit_shortfall
    );
    println!(
        "Greenwashing score: {:.2} / {MAX_SCORE:.0} ({} pricing tier)",
        decision.greenwashing_score,
        decision.pricing_tier.label()
    );
    println!("APR: {:.2}%", decision.interest_rate * 100.0);
    println!(
        "Signals: gap {:.4}, registry {:.2}, project {:.2}, biology {:.3}",
        signals.gap_ratio,
        signals.registry_quality,
        signals.project_quality,
        signals.biology_confidence
    );
    println!("Audit ref: {}", decision.audit_ref);
}
