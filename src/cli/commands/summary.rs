//! `tally summary` command - Aggregate response statistics

use std::collections::HashSet;

use chrono::Local;
use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_short_id, open_store};
use crate::cli::GlobalOpts;
use crate::store::Store;

/// How many recent responses the summary shows
const RECENT_LIMIT: usize = 5;

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {}

pub fn run(_args: SummaryArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let responses = store.list().map_err(|e| miette::miette!("{}", e))?;

    let total = responses.len();
    let unique_forms: HashSet<String> = responses
        .iter()
        .map(|r| r.form_id.to_string())
        .collect();
    // list() is most-recent-first, so the head carries the latest timestamp
    let last_submitted = responses
        .first()
        .map(|r| {
            r.submitted_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "N/A".to_string());

    println!("{}", style("Form Summary").bold());
    println!();

    let mut builder = Builder::default();
    builder.push_record(["Total Responses", "Unique Forms", "Last Submitted At"]);
    builder.push_record([
        total.to_string(),
        unique_forms.len().to_string(),
        last_submitted,
    ]);
    let stats = builder.build().with(Style::sharp()).to_string();
    println!("{}", stats);

    println!();
    println!("{}", style("Recent Responses").bold());

    if responses.is_empty() {
        println!("{}", style("No responses yet").dim());
        return Ok(());
    }

    for response in responses.iter().take(RECENT_LIMIT) {
        println!();
        println!(
            "{}  {}",
            style(format_short_id(&response.form_id)).cyan(),
            style(
                response
                    .submitted_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
            )
            .dim()
        );

        let answered: Vec<_> = response
            .answers
            .iter()
            .filter(|a| !a.value.is_empty())
            .collect();
        if answered.is_empty() {
            println!("  {}", style("No answers").dim());
        }
        for answer in answered {
            println!("  {}: {}", style(&answer.label).bold(), answer.value);
        }
    }

    Ok(())
}
