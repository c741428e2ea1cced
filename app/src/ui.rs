use crate::app::MyApp;

use eframe::egui::{
    self, text::LayoutJob, Color32, CornerRadius, FontId, Margin, RichText, Stroke, TextFormat,
    Ui,
};
use imdb_sentiment::Prediction;

/// Height shared by the review box and the prediction box.
const ROW_HEIGHT: f32 = 150.0;

/// Draws the left-side panel describing the loaded model.
pub fn draw_side_panel(app: &MyApp, ctx: &egui::Context) {
    egui::SidePanel::left("model_panel")
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading("Model");
            ui.separator();

            match &app.predictor {
                Ok(predictor) => {
                    let model = predictor.model();
                    egui::Grid::new("model_details")
                        .num_columns(2)
                        .striped(true)
                        .show(ui, |ui| {
                            ui.label("Vocabulary");
                            ui.label(model.vocab_size().to_string());
                            ui.end_row();
                            ui.label("Embedding");
                            ui.label(model.embedding_dim().to_string());
                            ui.end_row();
                            ui.label("RNN units");
                            ui.label(model.units().to_string());
                            ui.end_row();
                            ui.label("Activation");
                            ui.label(model.activation().to_string());
                            ui.end_row();
                            ui.label("Review length");
                            ui.label(predictor.maxlen().to_string());
                            ui.end_row();
                            ui.label("Known words");
                            ui.label(predictor.word_index().len().to_string());
                            ui.end_row();
                        });
                }
                Err(_) => {
                    ui.colored_label(Color32::RED, "No model loaded");
                }
            }

            ui.separator();
            ui.label("Weights:");
            ui.small(app.config.model.display().to_string());
            ui.label("Word index:");
            ui.small(app.config.word_index.display().to_string());
        });
}

/// Draws the footer line at the bottom of the window.
pub fn draw_footer(ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Powered by ndarray and egui").color(Color32::GRAY));
        });
    });
}

/// Draws the heading, the review box with its result, and the predict button.
pub fn draw_central_panel(app: &mut MyApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("IMDB Movie Review Sentiment Analysis")
                    .size(32.0)
                    .strong()
                    .color(MyApp::accent_color()),
            );
        });
        ui.add_space(8.0);
        ui.label("Enter a movie review below to predict the sentiment.");
        ui.add_space(8.0);

        if let Err(msg) = &app.predictor {
            ui.colored_label(Color32::RED, format!("Error loading model: {}", msg));
            ui.add_space(8.0);
        }

        draw_review_row(app, ui);
        ui.add_space(12.0);

        let button = egui::Button::new(
            RichText::new("Predict Sentiment")
                .size(18.0)
                .color(Color32::WHITE),
        )
        .fill(MyApp::accent_color())
        .corner_radius(CornerRadius::same(8))
        .min_size(egui::vec2(ui.available_width(), 44.0));

        if ui.add_enabled(app.is_ready(), button).clicked() {
            app.predict_current_review();
        }

        if let Some(err) = &app.last_error {
            ui.add_space(8.0);
            ui.colored_label(Color32::RED, err.as_str());
        }
    });
}

/// Review box on the left (two thirds), last prediction on the right (one third).
fn draw_review_row(app: &mut MyApp, ui: &mut Ui) {
    let spacing = ui.spacing().item_spacing.x;
    let input_width = (ui.available_width() - spacing) * 2.0 / 3.0;
    let output_width = ui.available_width() - spacing - input_width;

    ui.horizontal_top(|ui| {
        ui.add_sized(
            [input_width, ROW_HEIGHT],
            egui::TextEdit::multiline(&mut app.review_input)
                .hint_text("Type your review here...")
                .font(FontId::proportional(16.0)),
        );

        ui.allocate_ui(egui::vec2(output_width, ROW_HEIGHT), |ui| {
            if let Some(prediction) = &app.last_prediction {
                draw_prediction_box(ui, prediction, output_width);
            }
        });
    });
}

fn draw_prediction_box(ui: &mut Ui, prediction: &Prediction<f32>, width: f32) {
    let margin = 16;
    let border = 2.0;
    let inner = egui::vec2(
        (width - 2.0 * (margin as f32 + border)).max(0.0),
        (ROW_HEIGHT - 2.0 * (margin as f32 + border)).max(0.0),
    );

    egui::Frame::default()
        .stroke(Stroke::new(border, MyApp::accent_color()))
        .fill(MyApp::result_fill_color())
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::same(margin))
        .show(ui, |ui| {
            ui.set_min_size(inner);
            ui.set_max_width(inner.x);
            ui.vertical_centered(|ui| {
                ui.add_space((inner.y / 2.0 - 26.0).max(0.0));
                ui.label(field_line(
                    "Sentiment: ",
                    prediction.sentiment.to_string(),
                ));
                ui.label(field_line(
                    "Confidence: ",
                    format!("{:.4}", prediction.confidence),
                ));
            });
        });
}

/// A bold-coloured field name followed by its value, at the result font size.
fn field_line(name: &str, value: String) -> LayoutJob {
    let font_id = FontId::proportional(20.0);
    let mut job = LayoutJob::default();
    job.append(
        name,
        0.0,
        TextFormat {
            font_id: font_id.clone(),
            color: MyApp::accent_color(),
            ..Default::default()
        },
    );
    job.append(
        &value,
        0.0,
        TextFormat {
            font_id,
            color: Color32::BLACK,
            ..Default::default()
        },
    );
    job
}
