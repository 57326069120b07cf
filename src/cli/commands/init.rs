//! `tally init` command - Initialize a new workspace

use console::style;
use miette::Result;

use crate::core::workspace::{Workspace, WorkspaceError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    pub path: Option<std::path::PathBuf>,

    /// Re-create the workspace skeleton even if one exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = match args.path {
        Some(p) => p,
        None => std::env::current_dir().map_err(|e| miette::miette!("{}", e))?,
    };

    if args.force {
        let ws = Workspace::init_force(&path).map_err(|e| miette::miette!("{}", e))?;
        println!(
            "{} Initialized Tally workspace at {}",
            style("✓").green(),
            ws.root().display()
        );
        return Ok(());
    }

    match Workspace::init(&path) {
        Ok(ws) => {
            println!(
                "{} Initialized Tally workspace at {}",
                style("✓").green(),
                ws.root().display()
            );
            println!();
            println!("Create your first form with: {}", style("tally form new").yellow());
            Ok(())
        }
        Err(WorkspaceError::AlreadyExists(root)) => {
            println!(
                "{} Workspace already exists at {}",
                style("!").yellow(),
                root.display()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
