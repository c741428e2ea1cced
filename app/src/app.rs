use crate::ui;

use eframe::egui::{self, Color32};
use eframe::{App, Frame};
use imdb_sentiment::{ModelConfig, Prediction, SentimentPredictor};
use ndarray::Array2;

pub const PAGE_TITLE: &str = "IMDB Sentiment Analysis";

/// The main application struct.
/// It holds the loaded model and the per-session fields shown in the window.
pub struct MyApp {
    // --- Core State ---
    /// The pipeline, or the message explaining why it could not be loaded.
    pub predictor: Result<SentimentPredictor<f32>, String>,
    /// Where the model and word index were loaded from.
    pub config: ModelConfig,
    /// The last review that was preprocessed, together with its encoding.
    cached_input: Option<(String, Array2<usize>)>,

    // --- Session State ---
    /// Text currently in the review box.
    pub review_input: String,
    /// Result of the last button press. Stays on screen until the next one.
    pub last_prediction: Option<Prediction<f32>>,
    /// Set when the last prediction failed.
    pub last_error: Option<String>,
}

impl App for MyApp {
    /// The main update loop, called by eframe on every frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ui::draw_side_panel(self, ctx);
        ui::draw_footer(ctx);
        ui::draw_central_panel(self, ctx);
    }
}

impl MyApp {
    /// Loads the model and word index named in `config`.
    ///
    /// A failed load does not stop the app; the error is shown in the window instead.
    pub fn new(config: ModelConfig) -> Self {
        let predictor = SentimentPredictor::load(&config).map_err(|e| {
            tracing::error!("Failed to load model: {}", e);
            e.to_string()
        });
        Self::with_predictor(config, predictor)
    }

    pub fn with_predictor(
        config: ModelConfig,
        predictor: Result<SentimentPredictor<f32>, String>,
    ) -> Self {
        Self {
            predictor,
            config,
            cached_input: None,
            review_input: String::new(),
            last_prediction: None,
            last_error: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.predictor.is_ok()
    }

    /// Scores the text in the review box and stores the result in the session.
    ///
    /// Pressing the button again without editing the text reuses the
    /// previous encoding.
    pub fn predict_current_review(&mut self) {
        let Ok(predictor) = &self.predictor else {
            return;
        };

        let is_cached =
            matches!(&self.cached_input, Some((text, _)) if *text == self.review_input);
        if is_cached {
            tracing::debug!("Reusing preprocessed review");
        } else {
            let encoded = predictor.preprocess(&self.review_input);
            self.cached_input = Some((self.review_input.clone(), encoded));
        }
        let Some((_, encoded)) = &self.cached_input else {
            return;
        };

        match predictor.predict_encoded(encoded) {
            Ok(prediction) => {
                tracing::info!(
                    sentiment = %prediction.sentiment,
                    confidence = %prediction.confidence,
                    "Predicted sentiment"
                );
                self.last_prediction = Some(prediction);
                self.last_error = None;
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Heading, border and button colour.
    pub fn accent_color() -> Color32 {
        ecolor::hex_color!("#2E86C1")
    }

    /// Background of the prediction box.
    pub fn result_fill_color() -> Color32 {
        ecolor::hex_color!("#F0F8FF")
    }
}
