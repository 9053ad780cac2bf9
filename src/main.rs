//! Character Carousel - headless runner
//!
//! # Execution Flow
//!
//! 1. Load `Carousel Settings.yaml` from `Carousel Data/` (defaults if absent)
//! 2. Initialize logging → `logs/carousel.YYYY-MM-DD`
//! 3. Read `PUBLIC_APP_URL` from the environment
//! 4. Fetch the character feed (an unreachable feed renders zero slides)
//! 5. Render the page to `dist/index.html`
//! 6. Run the carousel controller against a headless viewport
//!
//! While running, every line on stdin is taken as a new viewport width in
//! pixels. End of input tears the carousel down.

use anyhow::{Context, Result};
use camino::Utf8Path;
use character_carousel::animation::{AnimationSequencer, TracingDriver};
use character_carousel::services::{HttpCharacterProvider, load_characters};
use character_carousel::ui::{HeadlessBackend, HeadlessViewport, ElementIds, PageModel};
use character_carousel::{
    APP_NAME, AppEnvironment, CarouselController, CarouselMetrics, ConfigManager,
    ControllerHandle, PostLayout, SlideCountResolver, VERSION,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const CONFIG_DIR: &str = "Carousel Data";
const OUTPUT_DIR: &str = "dist";
const INITIAL_VIEWPORT_WIDTH: u32 = 1280;

fn main() -> Result<()> {
    // Settings come first so logging can honor them
    let config_manager = ConfigManager::new(CONFIG_DIR)?;
    let settings = config_manager.load_settings()?;

    let _log_guard = character_carousel::logging::setup_logging(&settings.logging)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("carousel-worker")
        .build()
        .context("Failed to build tokio runtime")?;

    let result = runtime.block_on(run(settings));

    runtime.shutdown_timeout(std::time::Duration::from_secs(2));
    tracing::info!("Shutdown complete");

    result
}

async fn run(settings: character_carousel::CarouselSettings) -> Result<()> {
    let metrics = Arc::new(CarouselMetrics::new());

    // Without a base URL the fetch fails and the page renders without slides
    let base_url = match AppEnvironment::from_env() {
        Ok(env) => env.base_url,
        Err(e) => {
            tracing::error!("{}", e);
            String::new()
        }
    };

    let provider = HttpCharacterProvider::new()?;
    let characters = load_characters(&provider, &base_url, &metrics).await;

    let ids = Arc::new(ElementIds::new());
    let page = PageModel::build(&characters, &base_url, &settings.repository_url, &ids);
    write_page(&page, Utf8Path::new(OUTPUT_DIR))?;

    let resolver = Arc::new(SlideCountResolver::new(
        settings.breakpoints.clone(),
        INITIAL_VIEWPORT_WIDTH,
    ));
    let viewport = HeadlessViewport::new(INITIAL_VIEWPORT_WIDTH);
    let sequencer = AnimationSequencer::new(
        Arc::new(TracingDriver),
        tokio::runtime::Handle::current(),
        Arc::clone(&metrics),
    );

    let (controller, handle) = CarouselController::new(
        Box::new(HeadlessBackend::new(Arc::clone(&viewport), Arc::clone(&ids))),
        page.handles(),
        settings.options.clone(),
        Arc::clone(&resolver),
        sequencer,
        Arc::clone(&metrics),
    );

    let controller_task = tokio::spawn(controller.run(PostLayout::after(settings.mount_delay())));

    feed_viewport_widths(&resolver, &viewport, &handle).await?;
    handle.teardown();

    let outcome = controller_task
        .await
        .context("Carousel controller task panicked")?;

    metrics.log_summary();
    outcome.context("Carousel failed to mount")
}

/// Render the page into `{dir}/index.html`.
fn write_page(page: &PageModel, dir: &Utf8Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir))?;

    let path = dir.join("index.html");
    std::fs::write(&path, page.render())
        .with_context(|| format!("Failed to write page: {}", path))?;

    tracing::info!("Rendered {} slides to {}", page.slides.len(), path);
    Ok(())
}

/// Forward widths from stdin until EOF or until the controller stops.
async fn feed_viewport_widths(
    resolver: &SlideCountResolver,
    viewport: &HeadlessViewport,
    handle: &ControllerHandle,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let width = match line.parse::<u32>() {
            Ok(width) => width,
            Err(_) => {
                tracing::warn!("Ignoring viewport width {:?}: not a pixel count", line);
                continue;
            }
        };

        viewport.apply_width(width, resolver);

        if !handle.is_running() {
            tracing::warn!("Carousel controller stopped, ignoring further input");
            break;
        }
    }

    Ok(())
}
