use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "exhale", version, about = "Exhale quit-smoking tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a craving happening right now
    Craving {
        /// What was going on when the urge hit
        #[arg(long, default_value = "self-reported")]
        context: String,
    },
    /// Log a smoking occurrence
    Smoke {
        /// Number of cigarettes
        #[arg(long, default_value = "1")]
        count: u32,
        /// What was going on
        #[arg(long, default_value = "")]
        context: String,
    },
    /// Guided craving intervention countdown
    Intervene {
        #[command(subcommand)]
        action: commands::intervene::InterveneAction,
    },
    /// Derived statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// High-risk window analysis
    Risk {
        #[command(subcommand)]
        action: commands::risk::RiskAction,
    },
    /// User configuration and notification preferences
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Privacy and data management
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Generate insight cards from the event log
    Insights,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Craving { context } => commands::log::craving(&context),
        Commands::Smoke { count, context } => commands::log::smoke(count, &context),
        Commands::Intervene { action } => commands::intervene::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Risk { action } => commands::risk::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Insights => commands::insights::run(),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "exhale", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
