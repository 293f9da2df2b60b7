//! pronfetch CLI
//!
//! Non-interactive entry point around the fetch pipeline: gathers and
//! validates words, resolves credentials, runs the selected provider, and
//! optionally re-runs the failed subset through a fallback provider.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pronfetch::{
    error::{FetchError, Result},
    models::{self, BatchOutcome, Config, ProviderKind},
    pipeline::AudioPipeline,
    sources::{AudioSource, FreeDictionaryApi, MerriamWebsterApi, OxfordScraper},
    utils::words,
};

/// pronfetch - Pronunciation audio fetcher
#[derive(Parser, Debug)]
#[command(name = "pronfetch", version, about = "Pronunciation audio fetcher")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "pronfetch.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch pronunciation audio for a list of words
    Fetch {
        /// Comma-separated words to fetch
        #[arg(long, conflicts_with = "file")]
        words: Option<String>,

        /// Read words from a plain-text file instead
        #[arg(long)]
        file: Option<PathBuf>,

        /// Dictionary source to fetch from
        #[arg(short, long)]
        provider: ProviderKind,

        /// Re-run failed words through this source afterwards
        #[arg(long)]
        fallback: Option<ProviderKind>,

        /// Directory to write audio files into
        #[arg(short, long, default_value = "downloads")]
        output_dir: PathBuf,

        /// API key for keyed sources (falls back to the provider's env var)
        #[arg(long)]
        api_key: Option<String>,

        /// Append failed words to FAILED.txt in the output directory
        #[arg(long)]
        export_failed: bool,
    },

    /// List available providers
    Providers,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Fetch {
            words,
            file,
            provider,
            fallback,
            output_dir,
            api_key,
            export_failed,
        } => {
            let batch = gather_words(words, file, &config)?;

            std::fs::create_dir_all(&output_dir)?;
            log::info!("Audio files will be saved to {}", output_dir.display());

            let credential = resolve_credential(provider, api_key);
            let outcome =
                run_provider(provider, &batch, credential.as_deref(), &output_dir, &config).await?;
            report(&outcome);

            if export_failed && !outcome.failed().is_empty() {
                export_failed_words(&output_dir, provider, outcome.failed())?;
            }

            if let Some(fallback_kind) = fallback {
                if outcome.failed().is_empty() {
                    log::info!("No failed words to re-fetch");
                } else {
                    log::info!(
                        "Re-fetching {} failed words with {}",
                        outcome.failed().len(),
                        fallback_kind
                    );
                    let failed: Vec<String> = outcome.failed().to_vec();
                    let credential = resolve_credential(fallback_kind, None);
                    let retry = run_provider(
                        fallback_kind,
                        &failed,
                        credential.as_deref(),
                        &output_dir,
                        &config,
                    )
                    .await?;
                    report(&retry);

                    if export_failed && !retry.failed().is_empty() {
                        export_failed_words(&output_dir, fallback_kind, retry.failed())?;
                    }
                }
            }
        }

        Command::Providers => {
            for spec in models::registry() {
                match (spec.credential_env, spec.signup_url) {
                    (Some(env), Some(url)) => {
                        println!("{} (requires {}; get a key at {})", spec.name, env, url)
                    }
                    (Some(env), None) => println!("{} (requires {})", spec.name, env),
                    _ => println!("{}", spec.name),
                }
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            let config = Config::load(&cli.config)?;
            config.validate()?;
            log::info!("Config OK");
        }
    }

    Ok(())
}

/// Collect, normalize, and cap the word list from CLI input.
fn gather_words(
    words: Option<String>,
    file: Option<PathBuf>,
    config: &Config,
) -> Result<Vec<String>> {
    let raw = match (words, file) {
        (Some(w), _) => w,
        (None, Some(path)) => std::fs::read_to_string(&path)?,
        (None, None) => {
            return Err(FetchError::config("provide words via --words or --file"));
        }
    };

    let (valid, rejected) = words::normalize_words(&raw);
    for word in &rejected {
        log::warn!("Skipping invalid word: '{}'", word);
    }

    if valid.is_empty() {
        return Err(FetchError::config("no valid words to process"));
    }
    if valid.len() > config.fetcher.max_batch_size {
        return Err(FetchError::validation(format!(
            "{} words exceeds the batch limit of {}",
            valid.len(),
            config.fetcher.max_batch_size
        )));
    }

    Ok(valid)
}

/// Resolve the API key for a provider: explicit flag first, then the
/// provider's registry env var.
fn resolve_credential(kind: ProviderKind, api_key: Option<String>) -> Option<String> {
    api_key.or_else(|| {
        models::spec_for(kind)
            .credential_env
            .and_then(|var| std::env::var(var).ok())
    })
}

/// Construct the right adapter and drive one batch through the pipeline.
async fn run_provider(
    kind: ProviderKind,
    batch: &[String],
    credential: Option<&str>,
    output_dir: &Path,
    config: &Config,
) -> Result<BatchOutcome> {
    match kind {
        ProviderKind::FreeDictionary => {
            run_batch(FreeDictionaryApi::new(), batch, credential, output_dir, config).await
        }
        ProviderKind::MerriamWebster => {
            run_batch(MerriamWebsterApi::new(), batch, credential, output_dir, config).await
        }
        ProviderKind::OxfordScrape => {
            run_batch(OxfordScraper::new(), batch, credential, output_dir, config).await
        }
    }
}

async fn run_batch<S: AudioSource>(
    source: S,
    batch: &[String],
    credential: Option<&str>,
    output_dir: &Path,
    config: &Config,
) -> Result<BatchOutcome> {
    let mut pipeline = AudioPipeline::new(source, output_dir, &config.fetcher)?;
    pipeline.run(batch, credential).await?;
    Ok(pipeline.into_outcome())
}

/// Print the batch result; the failed table is display-only.
fn report(outcome: &BatchOutcome) {
    if outcome.failed().is_empty() {
        log::info!("All words fetched successfully!");
    } else {
        print!("{}", outcome.failed_table());
    }
}

/// Append the failed words under a provider header, for later re-runs.
fn export_failed_words(output_dir: &Path, kind: ProviderKind, failed: &[String]) -> Result<()> {
    let path = output_dir.join("FAILED.txt");
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    writeln!(file, "Provider: {kind}")?;
    for word in failed {
        writeln!(file, "{word}")?;
    }

    log::info!("Failed words exported to {}", path.display());
    Ok(())
}
