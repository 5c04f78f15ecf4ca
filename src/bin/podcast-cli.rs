// Interactive text-to-speech podcast generator
// Menu driven front end over the same service the web server uses

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use podcast_generator::cli::MenuController;
use podcast_generator::domain::tts::PodcastService;
use podcast_generator::infrastructure::aws::create_polly_client;
use podcast_generator::infrastructure::config::Config;
use podcast_generator::infrastructure::logging::init_logging;
use podcast_generator::infrastructure::repositories::PollyTtsRepository;
use podcast_generator::infrastructure::storage::AudioStorage;

#[derive(Parser, Debug)]
#[command(name = "podcast-cli")]
#[command(about = "Turn text into podcast audio with AWS Polly", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory for generated audio (overrides OUTPUT_DIR)
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// AWS region (overrides AWS_REGION)
    #[arg(long)]
    region: Option<String>,

    /// Named AWS profile (overrides AWS_PROFILE)
    #[arg(long)]
    profile: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(region) = cli.region {
        config.aws_region = region;
    }
    if cli.profile.is_some() {
        config.aws_profile = cli.profile;
    }

    // Keep stderr quiet so it doesn't interleave with the menu
    init_logging(&config.log_format, "podcast_generator=warn");

    let storage = Arc::new(AudioStorage::new(&config.output_dir, &config.upload_dir));
    storage.ensure_dirs().await?;

    let polly_client = Arc::new(create_polly_client(&config).await);
    let tts_repo = Arc::new(PollyTtsRepository::new(polly_client));
    let podcast_service = Arc::new(PodcastService::new(
        tts_repo,
        storage,
        config.max_text_chars,
        config.voice_cache_ttl(),
    ));

    let stdin = io::stdin();
    let mut menu = MenuController::new(
        podcast_service,
        config.output_dir.clone(),
        stdin.lock(),
        io::stdout(),
    );
    menu.run().await?;

    Ok(())
}
