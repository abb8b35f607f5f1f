use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use valkyrie::api;
use valkyrie::assets::AssetLoader;
use valkyrie::models::{AppConfig, BackgroundTheme, ColorScheme, ThemeSettings};
use valkyrie::rendering::{encode_frame, FrameSize};
use valkyrie::server;
use valkyrie::services::{decode_image, ImageLoader, RenderOutcome};

#[derive(Parser)]
#[command(name = "valkyrie")]
#[command(about = "Valkyrie - branching detective story server with retro hi-res illustrations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Stylize an image directly to a PNG file
    Render {
        /// Input image: a file path or an http(s) URL
        #[arg(short, long)]
        input: String,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Background theme: "dark" or "light"
        #[arg(short, long)]
        background: Option<String>,

        /// Color scheme: "violet" or "apple"
        #[arg(short, long)]
        color: Option<String>,

        /// Write the 200x150 on-screen preview instead of the full frame
        #[arg(short, long)]
        preview: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Valkyrie API",
        description = "Branching detective story server with retro hi-res illustrations",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_illustration,
        api::handle_render_to_canvas,
        api::handle_canvas,
        api::handle_theme,
        api::handle_story_node,
        api::handle_get_game,
        api::handle_restart_game,
        api::handle_choice,
    ),
    components(schemas(
        api::ErrorResponse,
        api::RenderRequest,
        api::ThemeResponse,
        api::PaletteColors,
        api::GameResponse,
        api::ChoiceRequest,
        RenderOutcome,
        BackgroundTheme,
        ColorScheme,
    )),
    tags(
        (name = "Illustration", description = "Retro illustration rendering"),
        (name = "Theme", description = "Theme resolution"),
        (name = "Story", description = "Story graph and game progress")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            background,
            color,
            preview,
        }) => run_render_command(&input, &output, background, color, preview).await,
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Parse a lowercase enum flag the same way the HTTP API does.
fn parse_flag<T: serde::de::DeserializeOwned>(name: &str, value: &str) -> anyhow::Result<T> {
    serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
        .map_err(|_| anyhow::anyhow!("Invalid {name}: {value}"))
}

/// Stylize an image directly to a PNG file (no server needed)
async fn run_render_command(
    input: &str,
    output: &Path,
    background: Option<String>,
    color: Option<String>,
    preview: bool,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "valkyrie=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let asset_loader = Arc::new(AssetLoader::from_env());
    let config = AppConfig::load_from_assets(&asset_loader);

    let mut theme: ThemeSettings = config.theme;
    if let Some(ref value) = background {
        theme.background = parse_flag("background", value)?;
    }
    if let Some(ref value) = color {
        theme.color = parse_flag("color", value)?;
    }

    let image = if input.starts_with("http://") || input.starts_with("https://") {
        ImageLoader::new(asset_loader)?.load(input).await?
    } else {
        let bytes = std::fs::read(input)
            .map_err(|e| anyhow::anyhow!("Failed to read {input}: {e}"))?;
        decode_image(input, &bytes)?
    };

    let palette = theme.palette()?;
    let frame = hires_filter::Stylizer::new(palette).stylize(&image.as_source()?);
    let png_bytes = encode_frame(&frame, FrameSize::from_preview_flag(preview))?;
    std::fs::write(output, &png_bytes)?;

    println!(
        "Rendered {input} ({}x{}) -> {} ({} bytes, {:?} on {:?})",
        image.width,
        image.height,
        output.display(),
        png_bytes.len(),
        theme.color,
        theme.background,
    );
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let illustrations_dir = std::env::var("ILLUSTRATIONS_DIR").ok();
    let save_dir = std::env::var("SAVE_DIR").ok();

    println!("Valkyrie v{VERSION}");
    println!("Branching detective story server with retro hi-res illustrations\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR         = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE       = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  ILLUSTRATIONS_DIR = {}",
        illustrations_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  SAVE_DIR          = {}",
        save_dir.as_deref().unwrap_or("(not set, games kept in memory)")
    );

    let loader = AssetLoader::new(
        illustrations_dir.clone().map(PathBuf::from),
        config_file.clone().map(PathBuf::from),
    );

    println!("\nAsset Sources:");
    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:        {config_source}");
    let illustrations = loader.list_illustrations();
    println!(
        "  Illustrations: {} ({} available)",
        illustrations_dir.as_deref().unwrap_or("embedded"),
        illustrations.len()
    );

    let config = AppConfig::load_from_assets(&loader);
    let story = config.build_story();
    println!("\nStory:");
    println!("  Nodes:     {}", story.len());
    println!(
        "  Start:     {}",
        if story.start().is_some() { "ok" } else { "MISSING" }
    );
    println!("  Dangling:  {}", story.dangling_choices().len());
    println!(
        "  Theme:     {:?} / {:?}",
        config.theme.background, config.theme.color
    );
    println!(
        "  Analytics: {}",
        if config.analytics.enabled { "enabled" } else { "disabled" }
    );

    println!("\nCommands:");
    println!("  valkyrie serve                      Start the HTTP server");
    println!("  valkyrie render -i IN -o OUT.png    Stylize an image to PNG");
    println!("  valkyrie --help                     Show all options");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "valkyrie=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let illustrations_dir = std::env::var("ILLUSTRATIONS_DIR").ok().map(PathBuf::from);
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let save_dir = std::env::var("SAVE_DIR").ok().map(PathBuf::from);
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let asset_loader = Arc::new(AssetLoader::new(
        illustrations_dir.clone(),
        config_file.clone(),
    ));

    tracing::info!(
        illustrations = ?illustrations_dir.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        config = ?config_file.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        "Asset sources configured"
    );

    match asset_loader.seed_if_configured() {
        Ok(report) if !report.is_empty() => {
            tracing::info!(
                illustrations = report.illustrations_seeded.len(),
                config = report.config_seeded,
                "Seeded empty locations with embedded assets"
            );
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed assets");
        }
        _ => {}
    }

    let state = server::create_app_state(asset_loader, save_dir)?;

    // OpenAPI documentation is production only
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Valkyrie server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
