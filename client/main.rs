/// classify-lens
///
/// Command-line host for the preview and predict operations. Each command
/// builds the standard page in memory, selects the given image, runs the
/// operation(s) against it, and prints or writes what the page would show.
///
/// Run with:
///   cargo run -- show cat.png --out page.html --base-url http://localhost:8000

mod cli;
mod logging;
mod render;

use std::path::Path;
use std::process::ExitCode;
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{error, info};

use classify_lens::document::document::lock;
use classify_lens::{
    predict, preview_image, shared, ClientConfig, Document, Elements, PredictClient,
    PredictOutcome, SelectedFile, SharedDocument,
};

use cli::{Cli, Commands};

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = build_config(&cli)?;
    let elements = Elements::default();
    let doc = shared(Document::standard());

    match cli.command {
        Commands::Preview { image, out } => {
            select(&doc, &elements, Some(image.as_path()))?;
            if let Some(shown) = preview_image(&doc, &elements, config.max_preview)
                .with_context(|| format!("could not preview {}", image.display()))?
            {
                println!("preview {}x{}", shown.width, shown.height);
            }
            write_page(&doc, &elements, out.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Predict { image, out } => {
            let client = PredictClient::new(&config)?;
            select(&doc, &elements, image.as_deref())?;
            let outcome = predict(&doc, &elements, &client)?;
            flush_alerts(&doc);
            if outcome != PredictOutcome::NoFile {
                println!("{}", lock(&doc).text_content(&elements.result)?);
            }
            write_page(&doc, &elements, out.as_deref())?;
            Ok(exit_code(&outcome))
        }

        Commands::Show { image, out } => {
            let client = PredictClient::new(&config)?;
            select(&doc, &elements, Some(image.as_path()))?;

            // Both operations run unordered against the same page; each one
            // only writes its own container.
            let previewing = {
                let doc = doc.clone();
                let elements = elements.clone();
                let max_edge = config.max_preview;
                thread::spawn(move || preview_image(&doc, &elements, max_edge))
            };
            let predicting = {
                let doc = doc.clone();
                let elements = elements.clone();
                thread::spawn(move || predict(&doc, &elements, &client))
            };

            let preview = previewing.join().map_err(|_| anyhow!("preview thread panicked"))?;
            let outcome = predicting.join().map_err(|_| anyhow!("predict thread panicked"))??;

            if let Err(e) = preview {
                error!(error = %e, "preview failed");
            }
            flush_alerts(&doc);
            println!("{}", lock(&doc).text_content(&elements.result)?);
            write_page(&doc, &elements, Some(out.as_path()))?;
            Ok(exit_code(&outcome))
        }

        Commands::Ping => {
            let client = PredictClient::new(&config)?;
            println!("{}", client.ping()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Defaults < config file < flags and environment.
fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(max) = cli.max_preview {
        config.max_preview = max;
    }
    config.validate()?;
    Ok(config)
}

fn select(doc: &SharedDocument, elements: &Elements, image: Option<&Path>) -> Result<()> {
    let selection = match image {
        Some(path) => vec![SelectedFile::from_path(path)
            .with_context(|| format!("could not read {}", path.display()))?],
        None => Vec::new(),
    };
    lock(doc).select_files(&elements.file_input, selection)?;
    Ok(())
}

fn flush_alerts(doc: &SharedDocument) {
    for alert in lock(doc).take_alerts() {
        eprintln!("{}", alert);
    }
}

fn write_page(doc: &SharedDocument, elements: &Elements, out: Option<&Path>) -> Result<()> {
    let Some(path) = out else {
        return Ok(());
    };
    let html = render::render_page(&lock(doc), elements)?;
    std::fs::write(path, html).with_context(|| format!("could not write {}", path.display()))?;
    info!(path = %path.display(), "page written");
    Ok(())
}

fn exit_code(outcome: &PredictOutcome) -> ExitCode {
    match outcome {
        PredictOutcome::Rendered(_) => ExitCode::SUCCESS,
        PredictOutcome::NoFile | PredictOutcome::Failed => ExitCode::FAILURE,
    }
}
