//! `tally form` command - Form schema management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_short_id, open_store, resolve_form, truncate_str};
use crate::cli::wizard::FormWizard;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::ArtifactId;
use crate::core::Config;
use crate::form::builder::{FieldPatch, FormDraft};
use crate::form::document::FormSchema;
use crate::form::field::{FieldType, TextFormat};
use crate::store::Store;

#[derive(Subcommand, Debug)]
pub enum FormCommands {
    /// Create a new form
    New(NewArgs),

    /// List persisted forms
    List(ListArgs),

    /// Show a form's schema document
    Show(ShowArgs),

    /// Edit a form's fields
    Edit(EditArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Form title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Add a field: TYPE[:LABEL][:required][:format=email|number][:options=A|B|C]
    #[arg(long, value_name = "SPEC")]
    pub field: Vec<String>,

    /// Build the field list interactively
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Form ID or fuzzy title search term
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Form ID or fuzzy title search term
    pub id: String,

    /// Open the YAML document in your editor instead of the wizard
    #[arg(long, short = 'e')]
    pub editor: bool,
}

pub fn run(cmd: FormCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        FormCommands::New(args) => run_new(args, global),
        FormCommands::List(args) => run_list(args, global),
        FormCommands::Show(args) => run_show(args, global),
        FormCommands::Edit(args) => run_edit(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let title = args
        .title
        .unwrap_or_else(|| "Untitled Form".to_string());
    let mut draft = FormDraft::new(title);

    for spec in &args.field {
        let parsed = parse_field_spec(spec).map_err(|e| miette::miette!("{}", e))?;
        parsed.apply(&mut draft);
    }

    if args.interactive {
        FormWizard::new().run(&mut draft)?;
    }

    let schema = draft.to_schema();
    let id = store.create(&schema).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Created form {}",
        style("✓").green(),
        style(format_short_id(&id)).cyan()
    );
    println!(
        "   {}",
        style(store.workspace().form_path(&id).display()).dim()
    );
    if schema.fields.is_empty() && !global.quiet {
        println!(
            "{} The form has no fields yet; add some with {}",
            style("!").yellow(),
            style(format!("tally form edit {}", id)).yellow()
        );
    }

    Ok(())
}

fn run_list(_args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let forms = store.forms().map_err(|e| miette::miette!("{}", e))?;

    if forms.is_empty() {
        match global.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Yaml => println!("[]"),
            _ => {
                println!("No forms found.");
                println!();
                println!("Create one with: {}", style("tally form new").yellow());
            }
        }
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    #[derive(serde::Serialize)]
    struct FormRow {
        id: ArtifactId,
        title: String,
        fields: usize,
    }

    let rows: Vec<FormRow> = forms
        .iter()
        .map(|(id, schema)| FormRow {
            id: id.clone(),
            title: schema.title.clone(),
            fields: schema.fields.len(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&rows).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Id => {
            for (id, _) in &forms {
                println!("{}", id);
            }
        }
        _ => {
            println!(
                "{:<24} {:<40} {:<8}",
                style("ID").bold(),
                style("TITLE").bold(),
                style("FIELDS").bold()
            );
            println!("{}", "-".repeat(74));

            for (id, schema) in &forms {
                println!(
                    "{:<24} {:<40} {:<8}",
                    format_short_id(id),
                    truncate_str(&schema.title, 38),
                    schema.fields.len()
                );
            }

            println!();
            println!("{} form(s) found", style(forms.len()).cyan());
        }
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let (id, schema) = resolve_form(&store, &args.id)?;

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Yaml,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&schema).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&schema).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Id => {
            println!("{}", id);
        }
        _ => print_human(&id, &schema),
    }

    Ok(())
}

fn print_human(id: &ArtifactId, schema: &FormSchema) {
    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("ID").bold(), style(id.to_string()).cyan());
    println!(
        "{}: {}",
        style("Title").bold(),
        style(&schema.title).yellow()
    );
    println!("{}", style("─".repeat(60)).dim());

    if schema.fields.is_empty() {
        println!("No fields.");
        return;
    }

    for (i, field) in schema.fields.iter().enumerate() {
        let mut attrs = vec![field.field_type.to_string()];
        if field.required {
            attrs.push("required".to_string());
        }
        if let Some(format) = field.effective_format() {
            attrs.push(format!("format: {}", format));
        }
        println!("{}. {} ({})", i + 1, style(&field.label).bold(), attrs.join(", "));

        if let Some(options) = &field.options {
            if options.is_empty() {
                println!("   {}", style("no options yet").dim());
            }
            for option in options {
                println!("   • {}", option);
            }
        }
    }
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let (id, schema) = resolve_form(&store, &args.id)?;

    if args.editor {
        let config = Config::load();
        let path = store.workspace().form_path(&id);
        println!(
            "Opening {} in {}...",
            style(format_short_id(&id)).cyan(),
            style(config.editor()).yellow()
        );
        config.run_editor(&path).into_diagnostic()?;
        return Ok(());
    }

    let mut draft = schema.into_draft();
    FormWizard::new().run(&mut draft)?;

    store
        .save(&id, &draft.to_schema())
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Updated form {}",
        style("✓").green(),
        style(format_short_id(&id)).cyan()
    );

    Ok(())
}

/// A field described on the command line
#[derive(Debug)]
struct FieldSpec {
    field_type: FieldType,
    label: Option<String>,
    required: bool,
    format: Option<TextFormat>,
    options: Vec<String>,
}

impl FieldSpec {
    fn apply(&self, draft: &mut FormDraft) {
        let id = draft.add_field(self.field_type);

        let mut patch = FieldPatch::default().required(self.required);
        if let Some(label) = &self.label {
            patch = patch.label(label.clone());
        }
        if self.format.is_some() {
            patch = patch.format(self.format);
        }
        draft.update_field(&id, patch);

        for option in &self.options {
            draft.add_option(&id, option);
        }
    }
}

/// Parse `TYPE[:LABEL][:required][:format=...][:options=A|B|C]`
fn parse_field_spec(spec: &str) -> Result<FieldSpec, String> {
    let mut parts = spec.split(':');

    let type_str = parts.next().unwrap_or_default();
    let field_type: FieldType = type_str
        .parse()
        .map_err(|e| format!("in field spec '{}': {}", spec, e))?;

    let mut parsed = FieldSpec {
        field_type,
        label: None,
        required: false,
        format: None,
        options: Vec::new(),
    };

    for (i, part) in parts.enumerate() {
        if part == "required" {
            parsed.required = true;
        } else if let Some(format) = part.strip_prefix("format=") {
            if !field_type.accepts_format() {
                return Err(format!(
                    "in field spec '{}': '{}' fields don't accept a format",
                    spec, field_type
                ));
            }
            parsed.format = Some(format.parse()?);
        } else if let Some(options) = part.strip_prefix("options=") {
            if !field_type.has_options() {
                return Err(format!(
                    "in field spec '{}': options only apply to dropdown fields",
                    spec
                ));
            }
            parsed.options = options
                .split('|')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        } else if i == 0 {
            parsed.label = Some(part.to_string());
        } else {
            return Err(format!(
                "in field spec '{}': unrecognized part '{}'",
                spec, part
            ));
        }
    }

    Ok(parsed)
}
