use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use agent_tester::report::{self, console};
use agent_tester::runner::Runner;
use agent_tester::server::StaticServer;
use agent_tester::utils::config::{RunnerConfig, ServerConfig, DEFAULT_PORT, REPORT_FILE};

#[derive(Parser)]
#[command(name = "agent-tester")]
#[command(version)]
#[command(about = "Agent capability self-test with report server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks and write the report (default)
    Run,

    /// Serve a directory over HTTP with caching disabled
    Serve {
        /// Port to try first; the next free port is used if it is taken
        #[arg(default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Directory to serve
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Render a saved report in another format
    Report {
        /// Path to the saved JSON report
        #[arg(default_value = REPORT_FILE)]
        results: PathBuf,

        /// Output format (json, html, junit)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let config = RunnerConfig::default();
            console::print_banner(&config.work_dir);

            let mut runner = Runner::new(config);
            runner.run_all();
            let report = runner.finish()?;

            if report.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }

        Commands::Serve { port, root } => {
            let server = StaticServer::new(ServerConfig {
                port,
                root,
                ..ServerConfig::default()
            });

            if let Err(e) = server.start().await {
                eprintln!("{} Error starting server: {:#}", "✗".red().bold(), e);
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Report {
            results,
            format,
            output,
        } => {
            println!(
                "{} Generating {} report from: {}",
                "■".blue(),
                format.cyan(),
                results.display()
            );
            report::generate_report(&results, &format, output.as_deref()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
