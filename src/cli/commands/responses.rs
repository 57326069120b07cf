//! `tally responses` command - List submitted responses

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_short_id, open_store, resolve_form, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::form::response::Response;
use crate::store::Store;

#[derive(clap::Args, Debug)]
pub struct ResponsesArgs {
    /// Only responses to this form (ID or fuzzy title search term)
    #[arg(long)]
    pub form: Option<String>,

    /// Limit output to N responses
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

pub fn run(args: ResponsesArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let mut responses = store.list().map_err(|e| miette::miette!("{}", e))?;

    if let Some(query) = &args.form {
        let (form_id, _) = resolve_form(&store, query)?;
        responses.retain(|r| r.form_id == form_id);
    }

    if let Some(limit) = args.limit {
        responses.truncate(limit);
    }

    if responses.is_empty() {
        match global.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Yaml => println!("[]"),
            _ => println!("No responses yet"),
        }
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&responses).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&responses).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => write_csv(&responses)?,
        _ => {
            println!(
                "{:<20} {:<24} {:<40}",
                style("SUBMITTED").bold(),
                style("FORM").bold(),
                style("ANSWERS").bold()
            );
            println!("{}", "-".repeat(86));

            for response in &responses {
                println!(
                    "{:<20} {:<24} {:<40}",
                    response.submitted_at.format("%Y-%m-%d %H:%M:%S"),
                    format_short_id(&response.form_id),
                    truncate_str(&answer_digest(response), 38)
                );
            }

            println!();
            println!("{} response(s) found", style(responses.len()).cyan());
        }
    }

    Ok(())
}

/// One row per answer: flat shape for spreadsheets
fn write_csv(responses: &[Response]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer
        .write_record(["formId", "submittedAt", "label", "value"])
        .into_diagnostic()?;

    for response in responses {
        let form_id = response.form_id.to_string();
        let submitted_at = response.submitted_at.to_rfc3339();
        for answer in &response.answers {
            writer
                .write_record([&form_id, &submitted_at, &answer.label, &answer.value])
                .into_diagnostic()?;
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}

fn answer_digest(response: &Response) -> String {
    let answered: Vec<String> = response
        .answers
        .iter()
        .filter(|a| !a.value.is_empty())
        .map(|a| format!("{}: {}", a.label, a.value))
        .collect();

    if answered.is_empty() {
        "(no answers)".to_string()
    } else {
        answered.join("; ")
    }
}
