use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "warp-cull",
    about = "WarpGrid — pick which machines go on scale-down",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which machines a scale-down would delete.
    ///
    /// The removal count is the number of machines in the fleet file minus
    /// [machine_set].replicas. The delete policy is read from
    /// [machine_set].delete_policy unless --policy is given.
    Plan {
        /// Fleet file (TOML, or JSON with a .json extension)
        #[arg(short, long)]
        file: String,
        /// Override the delete policy (Random, Newest, Oldest).
        #[arg(short, long)]
        policy: Option<String>,
        /// Unix time to measure machine ages against (default: now)
        #[arg(long)]
        now: Option<u64>,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Summarize machine health against the remediation budget
    Health {
        /// Fleet file (TOML, or JSON with a .json extension)
        #[arg(short, long)]
        file: String,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("warp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { file, policy, now, format } => {
            commands::plan::plan(&file, policy.as_deref(), now, &format)
        }
        Commands::Health { file, format } => {
            commands::health::health(&file, &format)
        }
    }
}
