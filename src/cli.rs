//! CLI surface (`spec.md` §6): `analyze`, `models list`/`models status`, `cleanup`.
//! Kept thin and clap-free in the library core below it — this module is the
//! only place that binds environment variables and CLI flags to behavior.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use oaschecker_tracker::{GithubTracker, IssueTracker};
use oaschecker_utils::error::{AnalyzerError, UserFriendlyError};
use oaschecker_utils::exit_codes::ExitCode;
use oaschecker_utils::logging;

use crate::orchestrator::{self, AnalyzeOptions};

#[derive(Parser)]
#[command(name = "oaschecker", version, about = "Multi-model OpenAPI contract testing")]
struct Cli {
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate and optionally execute contract tests for an OpenAPI source.
    Analyze(AnalyzeArgs),
    /// Inspect configured LLM providers.
    Models {
        #[command(subcommand)]
        action: ModelsAction,
    },
    /// Bulk-close previously created tracker issues.
    Cleanup(CleanupArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    source: String,
    #[arg(long, value_delimiter = ',', default_value = "openai")]
    providers: Vec<String>,
    #[arg(long)]
    op_id: Option<String>,
    #[arg(long, default_value_t = true)]
    run_tests: bool,
    #[arg(long, default_value_t = false)]
    create_issues: bool,
    #[arg(long)]
    issue_repo: Option<String>,
    #[arg(long, default_value = "http://localhost:8080")]
    target_url: String,
    #[arg(long)]
    framework: Option<String>,
    #[arg(long, default_value = "report.json")]
    output: PathBuf,
}

#[derive(Subcommand)]
enum ModelsAction {
    List,
    Status {
        #[arg(long, value_delimiter = ',', default_value = "openai")]
        providers: Vec<String>,
    },
}

#[derive(Args)]
struct CleanupArgs {
    #[arg(long)]
    repo: String,
    #[arg(long, value_delimiter = ',')]
    labels: Vec<String>,
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

/// Parses `std::env::args`, runs the selected subcommand, and maps any
/// run-fatal error to an exit code. All stdout/stderr output happens here.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose).ok();

    let runtime = tokio::runtime::Runtime::new().map_err(|_| ExitCode::INTERNAL)?;
    runtime.block_on(dispatch(cli.command))
}

async fn dispatch(command: Command) -> Result<(), ExitCode> {
    match command {
        Command::Analyze(args) => run_analyze(args).await,
        Command::Models { action } => run_models(action),
        Command::Cleanup(args) => run_cleanup(args).await,
    }
}

async fn run_analyze(args: AnalyzeArgs) -> Result<(), ExitCode> {
    let tracker: Option<Arc<dyn IssueTracker>> = if args.create_issues {
        match std::env::var("GITHUB_TOKEN") {
            Ok(token) => Some(Arc::new(GithubTracker::new(token).map_err(|_| ExitCode::INTERNAL)?)),
            Err(_) => {
                eprintln!("--create-issues requires GITHUB_TOKEN to be set");
                return Err(ExitCode::from(&AnalyzerError::CredentialsMissing {
                    provider: "github".to_string(),
                    env_var: "GITHUB_TOKEN".to_string(),
                }));
            }
        }
    } else {
        None
    };

    let options = AnalyzeOptions {
        filter_operation_id: args.op_id,
        run_tests: args.run_tests,
        create_issues: args.create_issues,
        issue_repo: args.issue_repo,
        target_url: args.target_url,
        framework: args.framework,
        ..AnalyzeOptions::default()
    };

    // Ctrl-C triggers cooperative cancellation rather than an abrupt exit, so
    // in-flight generations/harness runs get a chance to be recorded as
    // `NotRun` and the partial report still gets written.
    let cancellation = tokio_util::sync::CancellationToken::new();
    let ctrl_c_cancellation = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancellation.cancel();
        }
    });

    let report =
        orchestrator::analyze(&args.source, &args.providers, options, tracker, cancellation).await.map_err(|err| {
            eprintln!("{}", err.user_message());
            for suggestion in err.suggestions() {
                eprintln!("  - {suggestion}");
            }
            ExitCode::from(&err)
        })?;

    let format = oaschecker_report::format_for(&args.output);
    let rendered = oaschecker_report::render(&report, format).map_err(|_| ExitCode::INTERNAL)?;
    std::fs::write(&args.output, rendered).map_err(|_| ExitCode::INTERNAL)?;
    println!("wrote {}", args.output.display());
    Ok(())
}

fn run_models(action: ModelsAction) -> Result<(), ExitCode> {
    match action {
        ModelsAction::List => {
            for id in oaschecker_doctor::list_well_known() {
                println!("{id}");
            }
            Ok(())
        }
        ModelsAction::Status { providers } => {
            let output = oaschecker_doctor::status(&providers);
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
            if output.ok {
                Ok(())
            } else {
                Err(ExitCode::from(&AnalyzerError::CredentialsMissing {
                    provider: providers.join(","),
                    env_var: "see report above".to_string(),
                }))
            }
        }
    }
}

async fn run_cleanup(args: CleanupArgs) -> Result<(), ExitCode> {
    let token = std::env::var("GITHUB_TOKEN").map_err(|_| {
        eprintln!("cleanup requires GITHUB_TOKEN to be set");
        ExitCode::from(&AnalyzerError::CredentialsMissing { provider: "github".to_string(), env_var: "GITHUB_TOKEN".to_string() })
    })?;
    let tracker = GithubTracker::new(token).map_err(|_| ExitCode::INTERNAL)?;
    let closed = tracker
        .close_matching(&args.repo, &args.labels, args.dry_run)
        .await
        .map_err(|_| ExitCode::INTERNAL)?;
    println!("{} issue(s) {}", closed.len(), if args.dry_run { "would be closed" } else { "closed" });
    Ok(())
}

