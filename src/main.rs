use std::sync::Arc;
use podcast_generator::controllers::podcast::PodcastController;
use podcast_generator::domain::tts::PodcastService;
use podcast_generator::infrastructure::aws::create_polly_client;
use podcast_generator::infrastructure::config::Config;
use podcast_generator::infrastructure::http::start_http_server;
use podcast_generator::infrastructure::logging::init_logging;
use podcast_generator::infrastructure::repositories::PollyTtsRepository;
use podcast_generator::infrastructure::storage::AudioStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config.log_format, "podcast_generator=debug,tower_http=debug");

    tracing::info!(
        "Starting Podcast Generator on {}:{}",
        config.host,
        config.port
    );

    // Prepare output and upload directories
    let storage = Arc::new(AudioStorage::new(&config.output_dir, &config.upload_dir));
    storage.ensure_dirs().await?;
    tracing::info!(
        output_dir = %config.output_dir.display(),
        upload_dir = %config.upload_dir.display(),
        "Storage directories ready"
    );

    // Create AWS Polly client
    let polly_client = Arc::new(create_polly_client(&config).await);
    tracing::info!("AWS Polly client initialized successfully");

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    let tts_repo = Arc::new(PollyTtsRepository::new(polly_client));
    let podcast_service = Arc::new(PodcastService::new(
        tts_repo,
        storage.clone(),
        config.max_text_chars,
        config.voice_cache_ttl(),
    ));
    let podcast_controller = Arc::new(PodcastController::new(podcast_service, storage.clone()));

    // Start HTTP server with all routes
    start_http_server(config, podcast_controller, storage).await?;

    Ok(())
}
