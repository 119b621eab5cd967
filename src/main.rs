//! `bulk-sms`: send a personalized SMS to every contact in a list through Brevo.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use brevo_bulk_sms::batch::{partition, preflight};
use brevo_bulk_sms::export::{default_results_file_name, write_results_csv};
use brevo_bulk_sms::{
    BatchRunner, BrevoClient, Country, FixedDelay, RunConfig, Settings, contacts, domain,
};
use chrono::Local;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Send transactional SMS in bulk using the Brevo API.
#[derive(Parser, Debug)]
#[command(name = "bulk-sms", version)]
struct Args {
    /// Contact list: a `.csv` file with a header row, or a text file with one number per line
    #[arg(long, short = 'c')]
    contacts: PathBuf,

    /// CSV column holding the phone numbers
    #[arg(long, default_value = "phone")]
    phone_column: String,

    /// CSV column holding contact names; enables `{name}` and `{username}`
    #[arg(long)]
    name_column: Option<String>,

    /// Country format for phone numbers (us, in, uk, au, sg, uae, sa)
    #[arg(long, default_value = "us")]
    country: Country,

    /// Sender name (max 11 characters alphanumeric, 15 digits numeric)
    #[arg(long, short = 's', env = "SMS_SENDER_NAME", default_value = "")]
    sender: String,

    /// Message template; `{column}` placeholders are filled per contact
    #[arg(long, short = 'm', conflicts_with = "message_file")]
    message: Option<String>,

    /// Read the message template from a file
    #[arg(long)]
    message_file: Option<PathBuf>,

    /// Tag attached to every message for tracking
    #[arg(long, env = "SMS_TAG")]
    tag: Option<String>,

    /// Disable unicode content
    #[arg(long)]
    no_unicode: bool,

    /// Where to write the results CSV (default: sms_results_<timestamp>.csv)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Validate contacts and settings without sending anything
    #[arg(long, short = 'n')]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the run summary.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = Settings::from_env().context("failed to load settings")?;

    let template = match (&args.message, &args.message_file) {
        (Some(message), _) => message.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read message file: {}", path.display()))?,
        (None, None) => String::new(),
    };

    let contacts = contacts::load(
        &args.contacts,
        &args.phone_column,
        args.name_column.as_deref(),
    )
    .with_context(|| format!("failed to load contacts: {}", args.contacts.display()))?;

    let config = RunConfig {
        profile: args.country.profile(),
        template,
        sender: args.sender.clone(),
        tag: args.tag.clone(),
        unicode_enabled: !args.no_unicode,
        api_key: settings.api_key.clone().unwrap_or_default(),
    };

    let split = partition(&contacts, &config.profile);
    println!("Country: {}", args.country);
    println!("Total numbers: {}", contacts.len());
    println!("Valid numbers: {}", split.valid.len());
    println!("Invalid numbers: {}", split.invalid.len());
    for contact in &split.invalid {
        println!("  invalid: {:?}", contact.raw_phone());
    }
    println!(
        "Characters: {} | SMS parts: {}",
        config.template.chars().count(),
        domain::sms_parts(&config.template)
    );

    if let Err(err) = preflight(&config, split.valid.len()) {
        for problem in &err.problems {
            error!("{problem}");
        }
        bail!(err);
    }

    if args.dry_run {
        info!("dry run: nothing sent");
        return Ok(());
    }

    let mut builder = BrevoClient::builder()
        .user_agent(concat!("brevo-bulk-sms/", env!("CARGO_PKG_VERSION")));
    if let Some(endpoint) = &settings.endpoint {
        builder = builder.send_endpoint(endpoint.as_str());
    }
    let client = builder.build().context("failed to build HTTP client")?;
    let runner = BatchRunner::new(Arc::new(client))
        .with_throttle(Arc::new(FixedDelay(settings.throttle)));

    let report = runner
        .run_with_progress(&contacts, &config, |progress| {
            info!(
                "[{}/{}] {} -> {}",
                progress.completed,
                progress.total,
                progress.outcome.recipient.original(),
                progress.outcome.status_label()
            );
        })
        .await?;

    let summary = report.summary();
    println!("Total sent: {}", summary.total_sends);
    println!("Successful: {}", summary.succeeded);
    println!("Failed: {}", summary.failed);
    if summary.failed > 0 {
        warn!(failed = summary.failed, "some messages were not accepted");
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_results_file_name(Local::now())));
    let file = File::create(&output)
        .with_context(|| format!("failed to create results file: {}", output.display()))?;
    write_results_csv(file, &report.outcomes)
        .with_context(|| format!("failed to write results file: {}", output.display()))?;
    println!("Results written to {}", output.display());

    Ok(())
}
