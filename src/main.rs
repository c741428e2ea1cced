// Scores movie reviews from the command line or stdin.
use clap::Parser;
use imdb_sentiment::{ModelConfig, SentimentPredictor};
use std::io::BufRead;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "imdb-sentiment")]
#[command(about = "Predict whether movie reviews are positive or negative")]
struct Cli {
    #[command(flatten)]
    config: ModelConfig,

    /// Reviews to score. Reads one review per line from stdin when omitted.
    reviews: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let predictor = match SentimentPredictor::load(&cli.config) {
        Ok(predictor) => predictor,
        Err(e) => {
            tracing::error!("Failed to load model: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let score = |review: &str| match predictor.predict(review) {
        Ok(prediction) => println!("{}", prediction),
        Err(e) => tracing::error!("Prediction failed: {}", e),
    };

    if cli.reviews.is_empty() {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(review) => score(&review),
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    } else {
        cli.reviews.iter().for_each(|review| score(review));
    }

    ExitCode::SUCCESS
}
