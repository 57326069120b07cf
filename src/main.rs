use clap::Parser;
use miette::Result;
use tally::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => tally::cli::commands::init::run(args),
        Commands::Form(cmd) => tally::cli::commands::form::run(cmd, &global),
        Commands::Respond(args) => tally::cli::commands::respond::run(args, &global),
        Commands::Responses(args) => tally::cli::commands::responses::run(args, &global),
        Commands::Summary(args) => tally::cli::commands::summary::run(args, &global),
        Commands::Completions(args) => tally::cli::commands::completions::run(args),
    }
}
