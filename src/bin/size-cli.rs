use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "size-cli")]
#[command(about = "Command-line client for the shoe size converter", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a size to every other scale
    Convert {
        /// Source scale (US, EU, UK, CM)
        #[arg(short, long)]
        scale: String,

        /// Size on the source scale
        #[arg(long)]
        size: String,

        /// Size chart (men, women)
        #[arg(short, long, default_value = "men")]
        gender: String,
    },
    /// Check service status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Convert { scale, size, gender } => {
            // Send numbers as numbers so the server echoes them unchanged
            let size = match size.parse::<f64>() {
                Ok(n) if n.is_finite() => json!(n),
                _ => json!(size),
            };
            let res = client
                .post(format!("{}/convert", cli.url))
                .json(&json!({ "scale": scale, "size": size, "gender": gender }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Status => {
            let res = client.get(format!("{}/status", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: converter returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
