mod cli;
mod commands;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, GenerateArgs};
use lb_compose::Error as LbError;
use output::{CliOutput, QuietOutput, UserOutput};

fn main() {
    if let Err(e) = run() {
        if let Some(lb_error) = e.downcast_ref::<LbError>() {
            eprintln!("Error: {}", lb_error.with_suggestion());
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A dry run prints the manifest on stdout, so logs move out of its way.
    let dry_run = matches!(&cli.command, Some(Commands::Generate(args)) if args.dry_run);
    init_tracing(dry_run);

    let out: &dyn UserOutput = if cli.quiet { &QuietOutput } else { &CliOutput };
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Generate(GenerateArgs::default()));

    match command {
        Commands::Generate(args) => commands::run_generate(&cli.config, &args, out),
        Commands::Validate { base_port } => commands::run_validate(&cli.config, base_port, out),
        Commands::Init { force } => commands::run_init(&cli.config, force, out),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn init_tracing(log_to_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if log_to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stdout)
            .init();
    }
}
