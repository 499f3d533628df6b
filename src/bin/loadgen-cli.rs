use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "loadgen-cli")]
#[command(about = "Submit jobs to a running load generator", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a worker against a target
    Submit {
        #[arg(long)]
        port: u16,
        /// Image identifier; "redis" selects the key-value probe
        #[arg(long)]
        image: String,
        /// Workload memory in bytes
        #[arg(long)]
        memory: u64,
        #[arg(long, default_value = "0")]
        makespan: String,
        #[arg(long)]
        host: String,
    },
    /// List live workers
    Jobs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Submit {
            port,
            image,
            memory,
            makespan,
            host,
        } => {
            let query = [port.to_string(), image, memory.to_string(), makespan, host].join("&");
            let res = client
                .get(format!("{}/entrypoint?{}", cli.url, query))
                .send()
                .await?;
            println!("Submitted ({})", res.status());
        }
        Commands::Jobs => {
            let res = client.get(format!("{}/jobs", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: loadgen returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
