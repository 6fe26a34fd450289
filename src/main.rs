use clap::Parser;
use metalsnap::application::capture::CycleOutcome;
use metalsnap::cli::commands::{Cli, Commands};
use metalsnap::MetalSnap;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let db_path = std::env::var("METALSNAP_DB").unwrap_or_else(|_| "./metalsnap.db".into());

    let service = match MetalSnap::new(&db_path) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error initializing metalsnap: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(service, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(service: MetalSnap, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Run => {
            let (tx, rx) = watch::channel(false);
            tokio::spawn(async move {
                tokio::signal::ctrl_c().await.ok();
                info!("ctrl-c received, stopping");
                let _ = tx.send(true);
            });
            service.run(rx).await?;
        }
        Commands::Once => match service.run_once().await? {
            CycleOutcome::Captured(snapshot) => {
                println!("{}", serde_json::to_string_pretty(&snapshot).unwrap());
            }
            CycleOutcome::AlreadyCaptured => {
                println!("Snapshot already captured for this slot today.");
            }
        },
        Commands::Schedule { count } => {
            let runs = service.upcoming(count)?;
            println!("{}", serde_json::to_string_pretty(&runs).unwrap());
        }
    }
    Ok(())
}
