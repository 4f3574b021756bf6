use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use registration::ai::{AiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use registration::sheets::{APPS_SCRIPT_SOURCE, is_configured};
use registration::{
    DocumentKind, ImageFileCamera, PhotoPayload, PngQrEncoder, QrScanner, RegistrationPipeline, ScanOutcome,
    Submission, WebhookSheetSink, check_in_scanned, collaborator_from_config, enhance_or_original,
};
use storage::dto::filter::ParticipantFilter;
use storage::models::{Biodata, ParticipantStatus};
use storage::{JsonFileStore, KeyValueStore, ParticipantStore, SettingsRepository};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "gems-admin")]
#[command(about = "GWellth participant registration and administration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATA_FILE", default_value = "./data/gems.json")]
    data_file: PathBuf,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    gemini_base_url: String,

    #[arg(long, env = "GEMINI_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    gemini_timeout_secs: u64,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a participant from a biodata JSON file and a photo
    Register {
        biodata: PathBuf,

        #[arg(long)]
        photo: PathBuf,

        /// Run the photo through the image model first
        #[arg(long)]
        enhance: bool,
    },
    /// List participants
    List {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        program: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Program filter options
    Programs,
    SetStatus {
        id: String,
        status: ParticipantStatus,
    },
    CheckIn {
        id: String,
    },
    /// Read a QR code from an image and check the participant in
    Scan {
        image: PathBuf,

        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
    /// Write a participant document as PDF
    Export {
        id: String,

        kind: DocumentKind,

        #[arg(long, default_value = ".")]
        output: PathBuf,

        /// Edited PR text to use instead of the stored draft
        #[arg(long)]
        text: Option<PathBuf>,
    },
    /// Spreadsheet webhook settings
    Webhook {
        #[command(subcommand)]
        action: WebhookAction,
    },
}

#[derive(Subcommand)]
enum WebhookAction {
    Show,
    Set { url: String },
    Clear,
    /// Print the Apps Script to deploy in the spreadsheet
    Script,
}

#[tokio::main]
async fn main() -> CliResult<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("gems_admin={},registration={},storage={}", log_level, log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let kv: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&cli.data_file));
    tracing::debug!("Using data file {}", cli.data_file.display());

    match &cli.command {
        Commands::Register {
            biodata,
            photo,
            enhance,
        } => handle_register(&cli, kv, biodata, photo, *enhance).await?,
        Commands::List {
            search,
            program,
            status,
            json,
        } => {
            let filter = ParticipantFilter {
                search: search.clone(),
                program: program.clone(),
                status: status.clone(),
            };
            handle_list(kv, &filter, *json).await?
        }
        Commands::Programs => {
            let store = ParticipantStore::load(kv).await?;
            for program in store.program_options() {
                println!("{}", program);
            }
        }
        Commands::SetStatus { id, status } => {
            let mut store = ParticipantStore::load(kv).await?;
            let record = store.set_status(id, *status).await?;
            tracing::info!("✓ {} is now {}", record.biodata.name, record.status);
        }
        Commands::CheckIn { id } => {
            let store = ParticipantStore::load(kv).await?.into_shared();
            let outcome = check_in_scanned(&store, id).await?;
            tracing::info!("{}", outcome.message());
        }
        Commands::Scan { image, timeout_secs } => handle_scan(kv, image, *timeout_secs).await?,
        Commands::Export {
            id,
            kind,
            output,
            text,
        } => handle_export(kv, id, *kind, output, text.as_deref()).await?,
        Commands::Webhook { action } => handle_webhook(kv, action).await?,
    }

    Ok(())
}

fn ai_config(cli: &Cli) -> AiConfig {
    AiConfig {
        base_url: cli.gemini_base_url.clone(),
        timeout: Duration::from_secs(cli.gemini_timeout_secs),
        ..AiConfig::default()
    }
    .with_api_key(cli.gemini_api_key.clone())
}

async fn handle_register(
    cli: &Cli,
    kv: Arc<dyn KeyValueStore>,
    biodata_file: &Path,
    photo_file: &Path,
    enhance: bool,
) -> CliResult<()> {
    tracing::info!("Loading biodata from: {}", biodata_file.display());
    let biodata: Biodata = serde_json::from_str(&tokio::fs::read_to_string(biodata_file).await?)?;
    biodata.validate()?;

    let photo_bytes = tokio::fs::read(photo_file).await?;
    let mut photo = PhotoPayload::from_bytes(mime_for(photo_file)?, &photo_bytes).to_data_url();

    let config = ai_config(cli);
    let timeout = config.timeout;
    let ai = collaborator_from_config(config)?;

    if enhance {
        let enhancement = enhance_or_original(ai.as_ref(), &photo).await;
        if let Some(warning) = &enhancement.warning {
            tracing::warn!("{}", warning);
        }
        photo = enhancement.photo;
    }

    let sheet_url = SettingsRepository::new(kv.clone()).google_sheet_url().await?;
    let store = ParticipantStore::load(kv).await?.into_shared();

    let pipeline = RegistrationPipeline::new(
        Arc::new(PngQrEncoder::default()),
        ai,
        Arc::new(WebhookSheetSink::new(timeout)?),
    );
    let record = pipeline
        .submit(
            Submission {
                biodata,
                photo: Some(photo),
            },
            sheet_url.as_deref(),
            &store,
        )
        .await?;

    tracing::info!("✓ Registered {} as {}", record.biodata.name, record.id);
    tracing::info!(
        "PR draft review: {}/10 ({:?})",
        record.pr_draft_review.score,
        record.pr_draft_review.band()
    );
    for point in &record.pr_draft_review.feedback {
        tracing::info!("  - {}", point);
    }

    Ok(())
}

fn mime_for(path: &Path) -> CliResult<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        other => Err(format!("Unsupported photo type '{}'; use PNG or JPEG", other).into()),
    }
}

async fn handle_list(kv: Arc<dyn KeyValueStore>, filter: &ParticipantFilter, json: bool) -> CliResult<()> {
    let store = ParticipantStore::load(kv).await?;
    let records = store.filter(filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        tracing::info!("No participants found matching your criteria.");
        return Ok(());
    }

    tracing::info!("{} of {} participant(s)", records.len(), store.len());
    for record in records {
        tracing::info!(
            "  {} | {} | {} | {} | {}",
            record.id,
            record.biodata.name,
            record.biodata.email,
            record.biodata.program_enrolled,
            record.status
        );
    }

    Ok(())
}

async fn handle_scan(kv: Arc<dyn KeyValueStore>, image: &Path, timeout_secs: u64) -> CliResult<()> {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = tokio::time::sleep(Duration::from_secs(timeout_secs)) => {}
        }
        trigger.cancel();
    });

    let camera = ImageFileCamera::new(image);
    match QrScanner::default().scan(&camera, cancel).await? {
        ScanOutcome::Detected(payload) => {
            let store = ParticipantStore::load(kv).await?.into_shared();
            let outcome = check_in_scanned(&store, &payload).await?;
            tracing::info!("{}", outcome.message());
        }
        ScanOutcome::Cancelled => tracing::warn!("No QR code found in {}", image.display()),
    }

    Ok(())
}

async fn handle_export(
    kv: Arc<dyn KeyValueStore>,
    id: &str,
    kind: DocumentKind,
    output: &Path,
    text_file: Option<&Path>,
) -> CliResult<()> {
    let store = ParticipantStore::load(kv).await?;
    let record = store
        .find(id)
        .ok_or_else(|| format!("Participant '{}' not found", id))?;

    let text = match text_file {
        Some(path) => Some(tokio::fs::read_to_string(path).await?),
        None => None,
    };

    let bytes = kind.render(record, text.as_deref(), chrono::Local::now().date_naive())?;

    tokio::fs::create_dir_all(output).await?;
    let path = output.join(kind.file_name(record));
    tokio::fs::write(&path, bytes).await?;

    tracing::info!("Exported to: {}", path.display());
    Ok(())
}

async fn handle_webhook(kv: Arc<dyn KeyValueStore>, action: &WebhookAction) -> CliResult<()> {
    let settings = SettingsRepository::new(kv);

    match action {
        WebhookAction::Show => match settings.google_sheet_url().await? {
            Some(url) if is_configured(Some(&url)) => tracing::info!("Webhook: {}", url),
            Some(url) => tracing::warn!("Webhook '{}' is not a Google Apps Script URL and will be ignored", url),
            None => tracing::info!("Webhook not configured"),
        },
        WebhookAction::Set { url } => {
            if !is_configured(Some(url)) {
                tracing::warn!("'{}' is not a Google Apps Script URL; registrations will not be sent to it", url);
            }
            settings.set_google_sheet_url(url).await?;
        }
        WebhookAction::Clear => settings.set_google_sheet_url("").await?,
        WebhookAction::Script => println!("{}", APPS_SCRIPT_SOURCE),
    }

    Ok(())
}
