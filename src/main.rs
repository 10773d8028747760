use chrono::Local;
use eframe::{App, CreationContext, Frame, egui};
use std::path::PathBuf;

use egui::{Align, Color32, Layout, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod gemini;
mod generation;
mod models;
mod pdf;
mod prompt;
mod session;

use config::{AppConfig, ConfigError};
use gemini::GeminiClient;
use generation::{GenerationError, GenerationOutcome, TextGenerator};
use models::{Equipment, FitnessLevel, Goal, WorkoutDuration, WorkoutHistory, WorkoutPreferences};
use pdf::{DocumentRenderer, RenderError};
use session::{Submission, handle_submission};

const ACCENT: Color32 = Color32::from_rgb(76, 175, 80);
const HEADING: Color32 = Color32::from_rgb(44, 62, 80);

#[derive(Error, Debug)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not create Gemini client: {0}")]
    Client(#[from] GenerationError),

    #[error(transparent)]
    Ui(#[from] eframe::Error),
}

fn main() -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env().inspect_err(|e| error!("{}", e))?;
    let client = GeminiClient::new(&config).inspect_err(|e| error!("{}", e))?;
    let renderer = DocumentRenderer::new(config.output_dir.clone());
    let download_dir = config.download_dir();
    info!(
        endpoint = client.endpoint(),
        output_dir = %renderer.output_dir().display(),
        download_dir = %download_dir.display(),
        "Starting workout planner"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Personalized Workout Planner",
        options,
        Box::new(|cc| {
            Ok(Box::new(WorkoutPlannerApp::new(
                cc,
                Box::new(client),
                renderer,
                download_dir,
            )))
        }),
    )?;
    Ok(())
}

#[derive(PartialEq, Clone, Copy)]
enum Phase {
    Idle,
    // The spinner frame has to reach the screen before the blocking call.
    Requested,
    Generating,
}

struct WorkoutPlannerApp {
    generator: Box<dyn TextGenerator>,
    renderer: DocumentRenderer,
    download_dir: PathBuf,
    download: Option<Result<PathBuf, RenderError>>,
    preferences: WorkoutPreferences,
    duration_minutes: u16,
    history: WorkoutHistory,
    latest: Option<Submission>,
    phase: Phase,
}

impl WorkoutPlannerApp {
    fn new(
        cc: &CreationContext,
        generator: Box<dyn TextGenerator>,
        renderer: DocumentRenderer,
        download_dir: PathBuf,
    ) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(16.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(28.0, egui::FontFamily::Proportional),
        );
        cc.egui_ctx.set_style(style);

        let preferences = WorkoutPreferences::default();
        WorkoutPlannerApp {
            generator,
            renderer,
            download_dir,
            download: None,
            preferences,
            duration_minutes: preferences.duration.minutes(),
            history: Vec::new(),
            latest: None,
            phase: Phase::Idle,
        }
    }

    fn generate(&mut self) {
        let history = std::mem::take(&mut self.history);
        let (history, submission) = handle_submission(
            history,
            self.preferences,
            self.generator.as_ref(),
            &self.renderer,
            Local::now(),
        );
        self.history = history;
        self.latest = Some(submission);
        self.download = None;
    }
}

impl App for WorkoutPlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        match self.phase {
            Phase::Requested => {
                self.phase = Phase::Generating;
                ctx.request_repaint();
            }
            Phase::Generating => {
                self.generate();
                self.phase = Phase::Idle;
            }
            Phase::Idle => {}
        }

        egui::SidePanel::left("preferences")
            .resizable(false)
            .default_width(280.0)
            .show(ctx, |ui| self.show_preferences(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                ui.with_layout(Layout::top_down(Align::Center), |ui| {
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new("Personalized Workout Planner")
                            .heading()
                            .color(HEADING)
                            .strong(),
                    );
                    ui.label("Generate a custom workout plan tailored to your needs!");
                });
                ui.add_space(20.0);

                if self.phase != Phase::Idle {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Generating your workout plan...");
                    });
                    ui.add_space(10.0);
                }

                self.show_latest(ui);
                self.show_history(ui);
            });
        });
    }
}

impl WorkoutPlannerApp {
    fn show_preferences(&mut self, ui: &mut Ui) {
        ui.add_space(10.0);
        ui.heading("Workout Preferences");
        ui.add_space(10.0);

        egui::ComboBox::from_label("Fitness Level")
            .selected_text(self.preferences.fitness_level.label())
            .show_ui(ui, |ui| {
                for level in FitnessLevel::ALL {
                    ui.selectable_value(&mut self.preferences.fitness_level, level, level.label());
                }
            });

        egui::ComboBox::from_label("Fitness Goal")
            .selected_text(self.preferences.goal.label())
            .show_ui(ui, |ui| {
                for goal in Goal::ALL {
                    ui.selectable_value(&mut self.preferences.goal, goal, goal.label());
                }
            });

        ui.label("Duration (minutes)");
        ui.add(
            egui::Slider::new(
                &mut self.duration_minutes,
                WorkoutDuration::MIN..=WorkoutDuration::MAX,
            )
            .step_by(f64::from(WorkoutDuration::STEP))
            .suffix(" min"),
        );
        self.preferences.duration = WorkoutDuration::clamped(self.duration_minutes);

        egui::ComboBox::from_label("Equipment Available")
            .selected_text(self.preferences.equipment.label())
            .show_ui(ui, |ui| {
                for equipment in Equipment::ALL {
                    ui.selectable_value(&mut self.preferences.equipment, equipment, equipment.label());
                }
            });

        ui.add_space(20.0);
        let button = egui::Button::new(RichText::new("Generate Workout Plan").color(Color32::WHITE))
            .fill(ACCENT);
        if ui.add_enabled(self.phase == Phase::Idle, button).clicked() {
            self.phase = Phase::Requested;
            ui.ctx().request_repaint();
        }
    }

    fn show_latest(&mut self, ui: &mut Ui) {
        let Some(submission) = &self.latest else {
            return;
        };

        match submission.request.outcome() {
            GenerationOutcome::Success(_) => {
                ui.colored_label(ACCENT, "Workout plan generated successfully!");
            }
            GenerationOutcome::Failure(message) => {
                ui.colored_label(Color32::RED, message);
            }
        }

        ui.add_space(10.0);
        ui.label(RichText::new("Your Workout Plan").size(22.0).strong());
        ui.label(submission.request.generated_text());
        ui.add_space(10.0);

        match &submission.artifact {
            Ok(artifact) => {
                let download_clicked = ui
                    .horizontal(|ui| {
                        ui.label(format!("PDF saved to {}", artifact.path.display()))
                            .on_hover_text(artifact.mime_type());
                        if ui.button("Copy path").clicked() {
                            ui.ctx().copy_text(artifact.path.display().to_string());
                        }
                        let button = egui::Button::new(
                            RichText::new("Download as PDF").color(Color32::WHITE),
                        )
                        .fill(ACCENT);
                        let hint = format!(
                            "Save {} to {}",
                            artifact.file_name,
                            self.download_dir.display()
                        );
                        ui.add(button).on_hover_text(hint).clicked()
                    })
                    .inner;

                if download_clicked {
                    let saved = artifact.save_to_dir(&self.download_dir);
                    if let Err(e) = &saved {
                        error!("Error downloading workout PDF: {}", e);
                    }
                    self.download = Some(saved);
                }

                match &self.download {
                    Some(Ok(path)) => {
                        ui.colored_label(ACCENT, format!("Downloaded to {}", path.display()));
                    }
                    Some(Err(e)) => {
                        ui.colored_label(Color32::RED, format!("Could not download PDF: {e}"));
                    }
                    None => {}
                }
            }
            Err(e) => {
                ui.colored_label(Color32::RED, format!("Could not create PDF: {e}"));
            }
        }
        ui.add_space(20.0);
    }

    fn show_history(&self, ui: &mut Ui) {
        if self.history.is_empty() {
            return;
        }

        ui.separator();
        ui.label(RichText::new("Workout History").size(22.0).strong());
        ui.add_space(5.0);

        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto())
            .columns(Column::auto().at_least(90.0), 5)
            .header(24.0, |mut header| {
                for title in ["#", "Date", "Fitness Level", "Goal", "Duration", "Equipment"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (i, entry) in self.history.iter().enumerate() {
                    let prefs = entry.preferences();
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            ui.label((i + 1).to_string());
                        });
                        row.col(|ui| {
                            ui.label(entry.timestamp());
                        });
                        row.col(|ui| {
                            ui.label(prefs.fitness_level.label());
                        });
                        row.col(|ui| {
                            ui.label(prefs.goal.label());
                        });
                        row.col(|ui| {
                            ui.label(format!("{} min", prefs.duration));
                        });
                        row.col(|ui| {
                            ui.label(prefs.equipment.label());
                        });
                    });
                }
            });

        ui.add_space(10.0);
        for (i, entry) in self.history.iter().enumerate() {
            egui::CollapsingHeader::new(format!("Workout {} - {}", i + 1, entry.timestamp()))
                .id_salt(("workout_history", i))
                .show(ui, |ui| {
                    for line in entry.preferences().metadata_lines() {
                        ui.label(RichText::new(line).strong());
                    }
                    ui.add_space(5.0);
                    if entry.outcome().is_success() {
                        ui.label(entry.generated_text());
                    } else {
                        ui.colored_label(Color32::RED, entry.generated_text());
                    }
                });
        }
    }
}
