mod ops;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cronvoy", about = "Schedule reconciliation CLI for a remote scheduler service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a cron-triggered schedule for an application's task
    Schedule {
        /// Schedule name (also the remote job name)
        #[arg(short, long)]
        name: String,

        /// Owning application name on the platform
        #[arg(short, long)]
        app: String,

        /// Cron expression (5-field, e.g. "0/5 * ? * *")
        #[arg(short, long)]
        cron: String,

        /// Executable artifact reference (path or URL)
        #[arg(long)]
        artifact: String,

        /// Command-line argument for the task (repeatable)
        #[arg(long = "arg")]
        args: Vec<String>,

        /// Extra request property as key=value (repeatable)
        #[arg(long = "property")]
        properties: Vec<String>,
    },
    /// Delete a schedule and its backing job
    Unschedule {
        /// Schedule name
        #[arg(short, long)]
        name: String,
    },
    /// List schedules, optionally for one application
    List {
        /// Only schedules owned by this application
        #[arg(short, long)]
        app: Option<String>,
    },
    /// Trigger an immediate ad-hoc run of a schedule's job
    Run {
        /// Schedule name
        #[arg(short, long)]
        name: String,
    },
    /// Show a schedule's run history
    History {
        /// Schedule name
        #[arg(short, long)]
        name: String,
    },
    /// Show the resolved configuration
    Health,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule {
            name,
            app,
            cron,
            artifact,
            args,
            properties,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(ops::run_schedule(name, app, cron, artifact, args, properties))?;
        }
        Commands::Unschedule { name } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(ops::run_unschedule(name))?;
        }
        Commands::List { app } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(ops::run_list(app))?;
        }
        Commands::Run { name } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(ops::run_execute(name))?;
        }
        Commands::History { name } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(ops::run_history(name))?;
        }
        Commands::Health => {
            let config = cronvoy_config::load_config().unwrap_or_default();
            println!("cronvoy configuration");
            println!("  scheduler API: {}", config.scheduler.api_url);
            println!("  platform API:  {}", config.platform.api_url);
            println!(
                "  scheduler token: {}",
                if config.scheduler.token.is_some() { "set" } else { "not set" }
            );
        }
    }

    Ok(())
}
