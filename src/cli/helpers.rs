//! Shared helper functions for CLI commands

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::identity::ArtifactId;
use crate::core::workspace::Workspace;
use crate::form::document::FormSchema;
use crate::store::FileStore;

/// Format an ArtifactId for display, truncating if too long
///
/// IDs longer than 22 characters are truncated to 19 chars with "..." suffix.
/// The kept prefix spans the ULID's timestamp plus a few random chars, so
/// it stays usable as a lookup prefix while fitting table columns.
pub fn format_short_id(id: &ArtifactId) -> String {
    let s = id.to_string();
    if s.len() > 22 {
        format!("{}...", &s[..19])
    } else {
        s
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Open the workspace, honoring a `--workspace` override
pub fn open_store(global: &GlobalOpts) -> Result<FileStore> {
    let workspace = match &global.workspace {
        Some(path) => Workspace::discover_from(path),
        None => Workspace::discover(),
    }
    .map_err(|e| miette::miette!("{}", e))?;

    Ok(FileStore::new(workspace))
}

/// Find a form by ID prefix match, falling back to a title search
pub fn resolve_form(store: &FileStore, query: &str) -> Result<(ArtifactId, FormSchema)> {
    let mut matches: Vec<(ArtifactId, FormSchema)> = Vec::new();

    for (id, schema) in store.forms().map_err(|e| miette::miette!("{}", e))? {
        let id_str = id.to_string();
        if id_str == query || id_str.starts_with(&query.to_uppercase()) {
            matches.push((id, schema));
        } else if schema.title.to_lowercase().contains(&query.to_lowercase()) {
            matches.push((id, schema));
        }
    }

    match matches.len() {
        0 => Err(miette::miette!("form not available: '{}'", query)),
        1 => Ok(matches.remove(0)),
        _ => {
            println!("{} Multiple matches found:", style("!").yellow());
            for (id, schema) in &matches {
                println!("  {} - {}", format_short_id(id), schema.title);
            }
            Err(miette::miette!(
                "Ambiguous query '{}'. Please be more specific.",
                query
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::ArtifactPrefix;

    #[test]
    fn test_format_short_id() {
        let id = ArtifactId::new(ArtifactPrefix::Form);
        let formatted = format_short_id(&id);
        // ULID IDs are 31 chars (5 prefix + 26 ULID), so should truncate
        assert!(formatted.len() <= 22);
        assert!(formatted.ends_with("..."));
        assert!(id.to_string().starts_with(formatted.trim_end_matches("...")));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }
}
