mod app;
mod ui;

use app::{MyApp, PAGE_TITLE};
use clap::Parser;
use eframe::egui;
use imdb_sentiment::ModelConfig;

#[derive(Parser, Debug)]
#[command(name = "sentiment-app")]
#[command(about = "Desktop window for scoring IMDB movie reviews")]
struct Cli {
    #[command(flatten)]
    config: ModelConfig,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let app = MyApp::new(cli.config);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(PAGE_TITLE)
            .with_inner_size([1200.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        PAGE_TITLE,
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(app))
        }),
    )
}
