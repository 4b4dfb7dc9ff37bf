use clap::Parser;
use reqwest::Url;

#[derive(Parser)]
#[command(name = "reboot-cli")]
#[command(about = "Ask a reboot-server to restart its host", long_about = None)]
struct Cli {
    /// Base URL of the server
    #[arg(short, long, default_value = "http://localhost:20086")]
    url: String,

    /// Shared secret configured on the server
    #[arg(short, long)]
    token: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut url = Url::parse(&cli.url)?.join("/reboot")?;
    url.query_pairs_mut().append_pair("token", &cli.token);

    let res = reqwest::get(url).await?;
    let status = res.status();
    let body = res.text().await.unwrap_or_default();

    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        eprintln!("Response: {}", body);
        std::process::exit(1);
    }

    println!("{}", body);
    Ok(())
}
