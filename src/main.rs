use chrono::Utc;
use repohealth::{config::AppConfig, delivery, report, GitHubClient, ReportAggregator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the process environment may carry everything.
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout only carries the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repohealth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        tracing::error!("Report generation failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let client = GitHubClient::new(&config)?;
    let now = Utc::now();

    let aggregated = ReportAggregator::new(&client, &config)
        .generate(&config.title, &config.repos, now)
        .await?;

    println!("{aggregated}");

    delivery::deliver_best_effort(
        config.webhook_url.as_deref(),
        config.request_timeout(),
        &report::report_title(&config.title, now.date_naive()),
        &aggregated,
    )
    .await;

    Ok(())
}
