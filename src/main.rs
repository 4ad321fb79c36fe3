use clap::{Args, Parser, Subcommand};
use ispconfig_dns::auth::credentials::StaticCredentialManager;
use ispconfig_dns::config::Config;
use ispconfig_dns::{DNSProvider, DNSRecord, ISPConfigConfig, ISPConfigProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ispconfig-dns")]
#[command(about = "Manage TXT records through the ISPConfig remote API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all records of a zone
    List { zone: String },
    /// Add a TXT record
    Append(RecordArgs),
    /// Update a TXT record
    Set(RecordArgs),
    /// Delete a TXT record by id
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
struct RecordArgs {
    zone: String,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    value: String,
    /// TTL in seconds; 0 lets the provider pick its default
    #[arg(long, default_value_t = 0)]
    ttl: u64,
    #[arg(long, default_value = "")]
    id: String,
}

#[derive(Args, Debug)]
struct DeleteArgs {
    zone: String,
    #[arg(long)]
    id: String,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    value: String,
}

impl DeleteArgs {
    fn into_parts(self) -> (String, Vec<DNSRecord>) {
        let record = DNSRecord::txt(self.name, self.value).with_id(self.id);
        (self.zone, vec![record])
    }
}

impl RecordArgs {
    fn into_parts(self) -> (String, Vec<DNSRecord>) {
        let record = DNSRecord::txt(self.name, self.value)
            .with_id(self.id)
            .with_ttl(Duration::from_secs(self.ttl));
        (self.zone, vec![record])
    }
}

async fn run(provider: &dyn DNSProvider, command: Command) -> Result<Vec<DNSRecord>, ispconfig_dns::Error> {
    match command {
        Command::List { zone } => provider.get_records(&zone).await,
        Command::Append(args) => {
            let (zone, records) = args.into_parts();
            provider.append_records(&zone, records).await
        }
        Command::Set(args) => {
            let (zone, records) = args.into_parts();
            provider.set_records(&zone, records).await
        }
        Command::Delete(args) => {
            let (zone, records) = args.into_parts();
            provider.delete_records(&zone, records).await
        }
    }
}


#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let credentials = Arc::new(StaticCredentialManager::new(
        config.username.clone(),
        config.password.clone(),
    ));
    let provider = ISPConfigProvider::new(
        ISPConfigConfig {
            endpoint: config.endpoint.clone(),
        },
        credentials,
    )?;

    let records = match run(&provider, cli.command).await {
        Ok(records) => records,
        Err(e) => {
            error!("{} request failed: {}", provider.name(), e);
            return Err(e.into());
        }
    };

    info!("{} record(s) processed", records.len());
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
