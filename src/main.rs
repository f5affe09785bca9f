//! CLI entry point and command handlers for stackgate.

mod cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use tracing_subscriber::EnvFilter;

use stackgate::mode::CdkAction;
use stackgate::validator::ValidationError;

use cmd::TargetArgs;

/// Environment variable holding the log filter (e.g. `debug`, `stackgate=trace`)
const LOG_ENV: &str = "STACKGATE_LOG";

#[derive(Parser)]
#[command(name = "stackgate")]
#[command(version)]
#[command(about = "Deployment dependency validation for multi-tenant CDK workshops", long_about = None)]
#[command(
    after_help = "EXAMPLES:\n    stackgate validate --mode ai --tenant acme\n    stackgate plan --mode all --tenant alice,bob\n    stackgate run deploy --mode legacy --tenant acme\n\n    Mode and tenant fall back to -c context, cdk.json, DEPLOY_MODE and PARTICIPANT_PREFIX."
)]
struct Cli {
    /// Suppress informational output
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the units this mode builds on are deployed and complete
    Validate {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Show the units a mode deploys, in dependency order
    Plan {
        #[command(flatten)]
        target: TargetArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show registry status of planned units and their prerequisites
    Status {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Run a cdk command, validating prerequisites first for deploy and diff
    Run {
        /// cdk action (deploy, diff, synth, destroy, ls, ...)
        action: String,
        #[command(flatten)]
        target: TargetArgs,
        /// Print the cdk command instead of running it
        #[arg(long)]
        dry_run: bool,
        /// Extra arguments passed through to cdk (after --)
        #[arg(last = true)]
        extra: Vec<String>,
    },
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show version information
    Version {
        /// Show build details
        #[arg(long, short)]
        verbose: bool,
    },
}

fn main() {
    init_tracing();

    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    std::process::exit(code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    if cli.quiet {
        std::env::set_var(stackgate::ui::QUIET_ENV, "1");
    }

    match cli.command {
        Commands::Validate { target } => {
            let config = target.load()?;
            cmd::validate::cmd_validate(&config)?;
        }
        Commands::Plan { target, json } => {
            let config = target.load()?;
            cmd::plan::cmd_plan(&config, json)?;
        }
        Commands::Status { target } => {
            let config = target.load()?;
            cmd::status::cmd_status(&config)?;
        }
        Commands::Run {
            action,
            target,
            dry_run,
            extra,
        } => {
            let config = target.load()?;
            let action = CdkAction::parse(&action);
            return cmd::run::cmd_run(&config, &action, dry_run, &extra);
        }
        Commands::Completion { shell } => cmd_completion(shell)?,
        Commands::Version { verbose } => cmd::util::cmd_version(verbose)?,
    }

    Ok(0)
}

fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "stackgate", &mut io::stdout());
    Ok(())
}

/// Print an error to stderr. Validation errors already carry their own
/// actionable layout and are printed as-is.
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<ValidationError>() {
        Some(validation) => {
            let text = validation.message().trim_end();
            let (headline, rest) = text.split_once('\n').unwrap_or((text, ""));
            eprintln!("{}", headline.red().bold());
            if !rest.is_empty() {
                eprintln!("{}", rest);
            }
        }
        None => eprintln!("{} {:#}", "Error:".red().bold(), err),
    }
}
