use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use furniture_analyzer::analysis::{
    AnalysisClient, AnalysisRequest, AnalysisResponse, Hints, ModelName, PromptLanguage,
};
use furniture_analyzer::config::Config;
use furniture_analyzer::imgbb::{ImagePayload, ImgbbClient};
use furniture_analyzer::upload::{ProgressEvent, UploadCoordinator, UploadStatus};
use furniture_analyzer::utils::file_size::format_size;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "furniture_analyzer",
    about = "Upload furniture photos to imgbb and get a structured description back"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload images and run the furniture analysis
    Analyze(AnalyzeArgs),
    /// Show the analysis API's prompt templates
    Templates,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Image files to upload
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Keyword describing the piece (repeatable)
    #[arg(long = "description-keyword", value_name = "WORD")]
    description_keywords: Vec<String>,

    /// Designer hint (repeatable)
    #[arg(long, value_name = "NAME")]
    designer: Vec<String>,

    /// Manufacturer hint (repeatable)
    #[arg(long, value_name = "NAME")]
    manufacturer: Vec<String>,

    /// Keyword for the piece's name (repeatable)
    #[arg(long = "name-keyword", value_name = "WORD")]
    name_keywords: Vec<String>,

    /// Custom prompt; empty means the API's default template
    #[arg(long, default_value = "")]
    prompt: String,

    /// Language of the default prompt
    #[arg(long, value_enum, default_value_t = PromptLanguage::English)]
    language: PromptLanguage,

    /// Model the API should use
    #[arg(long, value_enum, default_value_t = ModelName::Gpt41)]
    model: ModelName,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        eprintln!("❌ {:#}", error);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    match cli.command {
        Command::Analyze(args) => analyze(args, &config).await,
        Command::Templates => templates(&config).await,
    }
}

async fn analyze(args: AnalyzeArgs, config: &Config) -> anyhow::Result<()> {
    let mut images = Vec::with_capacity(args.images.len());
    for path in &args.images {
        let payload = ImagePayload::from_path(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        println!(
            "🖼  {} ({})",
            payload.file_name,
            format_size(payload.bytes.len() as u64)
        );
        images.push(payload);
    }

    let coordinator = UploadCoordinator::new(ImgbbClient::new(config)?);
    let (events, receiver) = mpsc::unbounded_channel();
    let printer = spawn_progress_printer(receiver);

    let result = coordinator.submit(images, &events).await;
    drop(events);
    let _ = printer.join();
    let image_urls = result?;

    let request = AnalysisRequest {
        image_urls,
        hints: Hints {
            description_keywords: args.description_keywords,
            designer: args.designer,
            manufacturer: args.manufacturer,
            name_keywords: args.name_keywords,
        },
        prompt: args.prompt,
        def_prompt_lang: args.language,
        model_name: args.model,
    };

    let client = AnalysisClient::new(config);
    let response = client.analyze(&request).await?;
    print_analysis(&response);
    Ok(())
}

async fn templates(config: &Config) -> anyhow::Result<()> {
    let client = AnalysisClient::new(config);
    let templates = client.prompt_templates().await?;

    println!(
        "Default template (English):\n{}\n",
        templates.default_templates.english
    );
    println!(
        "Default template (German):\n{}\n",
        templates.default_templates.german
    );

    if !templates.custom_prompt_examples.english.is_empty() {
        println!("Example custom prompts (English):");
        for example in &templates.custom_prompt_examples.english {
            println!("  - {}", example);
        }
    }
    if !templates.custom_prompt_examples.german.is_empty() {
        println!("Example custom prompts (German):");
        for example in &templates.custom_prompt_examples.german {
            println!("  - {}", example);
        }
    }
    if !templates.usage_notes.is_empty() {
        println!("\nNotes:");
        for note in &templates.usage_notes {
            println!("  - {}", note);
        }
    }
    Ok(())
}

/// Renders coordinator events off the async runtime. The channel closes when
/// the submit call finishes and the sender is dropped.
fn spawn_progress_printer(
    mut receiver: mpsc::UnboundedReceiver<ProgressEvent>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        while let Some(event) = receiver.blocking_recv() {
            match event.status {
                UploadStatus::Uploading => {
                    log::debug!("📤 {}: {}%", event.file_name, event.progress)
                }
                UploadStatus::Completed => println!("✅ {}", event.file_name),
                UploadStatus::Error(ref message) => {
                    println!("❌ {} - {}", event.file_name, message)
                }
                UploadStatus::Pending => {}
            }
        }
    })
}

fn print_analysis(response: &AnalysisResponse) {
    println!();
    println!("🪑 {}", response.name);
    println!("   Designer:     {}", response.designer);
    println!("   Manufacturer: {}", response.manufacturer);
    println!("   Condition:    {}", response.condition);
    println!("   Price (CHF):  {}", response.price_range_chf);
    println!();
    println!("{}", response.description);
    println!();
    println!(
        "Prompt language: {} | custom prompt used: {} | hints provided: {}",
        response.metadata.prompt_language,
        response.metadata.custom_prompt_used,
        response.metadata.hints_provided
    );
}
