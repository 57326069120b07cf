//! Interactive prompts for building forms and answering them

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::form::builder::{FieldPatch, FormDraft};
use crate::form::document::FormSchema;
use crate::form::field::{FieldType, TextFormat};
use crate::form::validate::AnswerMap;

/// Menu-driven form builder
pub struct FormWizard {
    theme: ColorfulTheme,
}

impl Default for FormWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl FormWizard {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Run the builder loop against a draft until the user is done
    pub fn run(&self, draft: &mut FormDraft) -> Result<()> {
        println!();
        println!(
            "{} Building {}",
            style("◆").cyan(),
            style(&draft.title).bold()
        );
        println!("{}", style("─".repeat(50)).dim());

        loop {
            let actions = ["Add field", "Edit field", "Remove field", "Done"];
            let choice = Select::with_theme(&self.theme)
                .with_prompt(format!("{} field(s) so far", draft.fields().len()))
                .items(&actions)
                .default(0)
                .interact()
                .into_diagnostic()?;

            match choice {
                0 => self.add_field(draft)?,
                1 => self.edit_field(draft)?,
                2 => self.remove_field(draft)?,
                _ => break,
            }
        }

        Ok(())
    }

    fn add_field(&self, draft: &mut FormDraft) -> Result<()> {
        let kinds: Vec<String> = FieldType::all().iter().map(ToString::to_string).collect();
        let kind_idx = Select::with_theme(&self.theme)
            .with_prompt("Field type")
            .items(&kinds)
            .default(0)
            .interact()
            .into_diagnostic()?;
        let field_type = FieldType::all()[kind_idx];

        let id = draft.add_field(field_type);

        let label: String = Input::with_theme(&self.theme)
            .with_prompt("Label")
            .default(field_type.default_label())
            .interact_text()
            .into_diagnostic()?;

        let required = Confirm::with_theme(&self.theme)
            .with_prompt("Required?")
            .default(false)
            .interact()
            .into_diagnostic()?;

        draft.update_field(
            &id,
            FieldPatch::default().label(label).required(required),
        );

        if field_type.accepts_format() {
            let format = self.prompt_format(None)?;
            draft.update_field(&id, FieldPatch::default().format(format));
        }

        if field_type.has_options() {
            self.prompt_options(draft, &id)?;
        }

        Ok(())
    }

    fn edit_field(&self, draft: &mut FormDraft) -> Result<()> {
        let Some(id) = self.pick_field(draft)? else {
            return Ok(());
        };
        let Some(field) = draft.fields().iter().find(|f| f.id == id).cloned() else {
            return Ok(());
        };
        let field_type = field.field_type();

        let mut actions = vec!["Rename", "Toggle required"];
        if field_type.accepts_format() {
            actions.push("Set format");
        }
        if field_type.has_options() {
            actions.push("Edit options");
        }
        actions.push("Back");

        let choice = Select::with_theme(&self.theme)
            .with_prompt(format!("Edit '{}'", field.label))
            .items(&actions)
            .default(0)
            .interact()
            .into_diagnostic()?;

        match actions[choice] {
            "Rename" => {
                let label: String = Input::with_theme(&self.theme)
                    .with_prompt("Label")
                    .default(field.label.clone())
                    .interact_text()
                    .into_diagnostic()?;
                draft.update_field(&id, FieldPatch::default().label(label));
            }
            "Toggle required" => {
                draft.update_field(&id, FieldPatch::default().required(!field.required));
            }
            "Set format" => {
                let format = self.prompt_format(field.kind.format())?;
                draft.update_field(&id, FieldPatch::default().format(format));
            }
            "Edit options" => {
                self.edit_options(draft, &id)?;
            }
            _ => {}
        }

        Ok(())
    }

    fn remove_field(&self, draft: &mut FormDraft) -> Result<()> {
        if let Some(id) = self.pick_field(draft)? {
            draft.remove_field(&id);
        }
        Ok(())
    }

    /// Pick a field by position; None when the draft has no fields yet
    fn pick_field(&self, draft: &FormDraft) -> Result<Option<String>> {
        if draft.is_empty() {
            println!("{} No fields yet.", style("!").yellow());
            return Ok(None);
        }

        let items: Vec<String> = draft
            .fields()
            .iter()
            .map(|f| format!("{} ({})", f.label, f.field_type()))
            .collect();
        let idx = Select::with_theme(&self.theme)
            .with_prompt("Which field?")
            .items(&items)
            .default(0)
            .interact()
            .into_diagnostic()?;

        Ok(Some(draft.fields()[idx].id.clone()))
    }

    fn prompt_format(&self, current: Option<TextFormat>) -> Result<Option<TextFormat>> {
        let items = ["none", "email", "number"];
        let default = match current {
            None => 0,
            Some(TextFormat::Email) => 1,
            Some(TextFormat::Number) => 2,
        };
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Format rule")
            .items(&items)
            .default(default)
            .interact()
            .into_diagnostic()?;

        Ok(match choice {
            1 => Some(TextFormat::Email),
            2 => Some(TextFormat::Number),
            _ => None,
        })
    }

    /// Collect options until an empty entry ends the loop
    fn prompt_options(&self, draft: &mut FormDraft, id: &str) -> Result<()> {
        loop {
            let text: String = Input::with_theme(&self.theme)
                .with_prompt("Add option (empty to finish)")
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;
            if text.trim().is_empty() {
                break;
            }
            draft.add_option(id, &text);
        }
        Ok(())
    }

    fn edit_options(&self, draft: &mut FormDraft, id: &str) -> Result<()> {
        loop {
            let options: Vec<String> = draft
                .fields()
                .iter()
                .find(|f| f.id == id)
                .and_then(|f| f.kind.options())
                .map(<[String]>::to_vec)
                .unwrap_or_default();

            let mut items: Vec<String> = options
                .iter()
                .map(|o| format!("Remove '{}'", o))
                .collect();
            items.push("Add option".to_string());
            items.push("Back".to_string());

            let choice = Select::with_theme(&self.theme)
                .with_prompt("Options")
                .items(&items)
                .default(items.len() - 1)
                .interact()
                .into_diagnostic()?;

            if choice < options.len() {
                draft.remove_option_at(id, choice);
            } else if choice == options.len() {
                self.prompt_options(draft, id)?;
            } else {
                break;
            }
        }
        Ok(())
    }
}

/// Prompt a respondent for an answer to every field of a schema
///
/// Dropdowns present their options as a selection; a dropdown with no
/// options is skipped (it cannot be answered). Optional dropdowns get a
/// leading blank choice, like the original "Select..." placeholder.
pub fn prompt_answers(schema: &FormSchema) -> Result<AnswerMap> {
    let theme = ColorfulTheme::default();
    let mut answers = AnswerMap::new();

    println!();
    println!("{} {}", style("◆").cyan(), style(&schema.title).bold());
    println!("{}", style("─".repeat(50)).dim());

    for field in &schema.fields {
        let prompt = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };

        let value = match field.field_type {
            FieldType::Dropdown => {
                let options = field.options.clone().unwrap_or_default();
                if options.is_empty() {
                    println!(
                        "{} '{}' has no options; skipping",
                        style("!").yellow(),
                        field.label
                    );
                    String::new()
                } else {
                    let mut items = options.clone();
                    if !field.required {
                        items.insert(0, "(leave blank)".to_string());
                    }
                    let idx = Select::with_theme(&theme)
                        .with_prompt(prompt)
                        .items(&items)
                        .default(0)
                        .interact()
                        .into_diagnostic()?;
                    if !field.required && idx == 0 {
                        String::new()
                    } else {
                        items[idx].clone()
                    }
                }
            }
            FieldType::Date => Input::<String>::with_theme(&theme)
                .with_prompt(format!("{} (YYYY-MM-DD)", prompt))
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?,
            _ => Input::<String>::with_theme(&theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?,
        };

        answers.insert(field.id.clone(), value);
    }

    Ok(answers)
}
