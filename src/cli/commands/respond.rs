//! `tally respond` command - Answer a form and submit the response

use chrono::Utc;
use console::style;
use miette::Result;

use crate::cli::helpers::{open_store, resolve_form};
use crate::cli::wizard::prompt_answers;
use crate::cli::GlobalOpts;
use crate::form::document::FormSchema;
use crate::form::response::collect;
use crate::form::validate::{validate, AnswerMap};
use crate::store::Store;

#[derive(clap::Args, Debug)]
pub struct RespondArgs {
    /// Form ID or fuzzy title search term
    pub id: String,

    /// Provide an answer as FIELD=VALUE (field id or label)
    #[arg(long, short = 'a', value_name = "FIELD=VALUE")]
    pub answer: Vec<String>,

    /// Prompt for each field interactively
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(args: RespondArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let (form_id, schema) = resolve_form(&store, &args.id)?;

    let answers = if args.interactive {
        prompt_answers(&schema)?
    } else {
        parse_answers(&schema, &args.answer).map_err(|e| miette::miette!("{}", e))?
    };

    // One failure per attempt; the respondent fixes it and retries.
    validate(&schema, &answers).map_err(|failure| miette::miette!("{}", failure))?;

    let response = collect(&schema, &answers, form_id.clone(), Utc::now());
    store
        .submit(&response)
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Response recorded for {}",
        style("✓").green(),
        style(&schema.title).yellow()
    );

    // The submit above has been acknowledged, so this count includes
    // the response we just wrote.
    if !global.quiet {
        let on_record = store
            .list()
            .map_err(|e| miette::miette!("{}", e))?
            .iter()
            .filter(|r| r.form_id == form_id)
            .count();
        println!(
            "   {}",
            style(format!("{} response(s) on record for this form", on_record)).dim()
        );
    }

    Ok(())
}

/// Build the answer map from FIELD=VALUE pairs
///
/// A key may be a field id or a field label (case-insensitive); labels
/// must match exactly one field.
fn parse_answers(schema: &FormSchema, pairs: &[String]) -> Result<AnswerMap, String> {
    let mut answers = AnswerMap::new();

    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(format!(
                "invalid answer '{}': expected FIELD=VALUE",
                pair
            ));
        };

        let field_id = resolve_field(schema, key)?;
        answers.insert(field_id, value.to_string());
    }

    Ok(answers)
}

fn resolve_field(schema: &FormSchema, key: &str) -> Result<String, String> {
    if let Some(field) = schema.field(key) {
        return Ok(field.id.clone());
    }

    let matches: Vec<&str> = schema
        .fields
        .iter()
        .filter(|f| f.label.eq_ignore_ascii_case(key))
        .map(|f| f.id.as_str())
        .collect();

    match matches.len() {
        0 => Err(format!("no field named '{}' in this form", key)),
        1 => Ok(matches[0].to_string()),
        _ => Err(format!(
            "'{}' matches more than one field; use the field id",
            key
        )),
    }
}
