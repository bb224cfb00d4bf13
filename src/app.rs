//! Desktop host for the quiz session.
//! Renders the current question, forwards clicks and typed answers to the session,
//! and offers progress export/import.

use chrono::{DateTime, Local, Utc};
use eframe::egui;
use sign_quiz::export::json::{export_progress_to_path, import_progress};
use sign_quiz::models::level::level_name;
use sign_quiz::models::{Advancement, AnswerOutcome, QuestionPayload, ReviewToggle};
use sign_quiz::{LocalContentProvider, QuizError, QuizSession, SessionState, SqliteStore};
use std::path::Path;

type Session = QuizSession<LocalContentProvider, SqliteStore>;

#[derive(Default, Clone, Copy, PartialEq)]
enum FeedbackKind {
    #[default]
    Neutral,
    Correct,
    Incorrect,
}

/// User actions collected during rendering and applied afterwards
enum Action {
    Answer(String),
    Next,
    ToggleReview,
    Export,
    Import,
}

/// Main application state
pub struct MyApp {
    session: Session,
    show_confirmation_dialog: bool,
    allowed_to_close: bool,

    type_in_answer: String,
    selected_answer: Option<String>,
    feedback: String,
    feedback_kind: FeedbackKind,

    show_result_dialog: bool,
    result_message: String,
}

/// Formats a timestamp as a local YYYY-MM-DD string
fn format_date(time: DateTime<Utc>) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d").to_string()
}

/// Link target for a clip, opened by the system player
fn clip_url(path: &Path) -> String {
    let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display()).replace(' ', "%20")
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action: Option<Action> = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| self.render_header(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            action = self.render_question(ui);
        });

        if let Some(action) = action {
            self.apply(action);
        }

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if self.show_result_dialog {
            egui::Window::new("Import/Export Result")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.result_message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_result_dialog = false;
                    }
                });
        }
    }
}

impl MyApp {
    /// Creates the app and immediately asks for the first question
    pub fn new(session: Session) -> Self {
        let mut app = Self {
            session,
            show_confirmation_dialog: false,
            allowed_to_close: false,
            type_in_answer: String::new(),
            selected_answer: None,
            feedback: String::new(),
            feedback_kind: FeedbackKind::Neutral,
            show_result_dialog: false,
            result_message: String::new(),
        };
        app.start_question();
        app
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        let progress = self.session.progress();
        ui.horizontal(|ui| {
            let level = level_name(progress.current_level());
            match self.session.total_levels() {
                Some(total) => ui.label(format!("{} of {}", level, total)),
                None => ui.label(level),
            };
            ui.separator();
            ui.label(format!("Score: {}", progress.stats.score));
            ui.separator();
            ui.label(format!(
                "Streak: {} (best {})",
                progress.stats.streak, progress.stats.best_streak
            ));
            if let Some(last) = progress.stats.last_correct_at {
                ui.separator();
                ui.label(format!("Last correct: {}", format_date(last)));
            }
        });
    }

    /// Renders the question area and returns the action the user took, if any
    fn render_question(&mut self, ui: &mut egui::Ui) -> Option<Action> {
        let mut action = None;
        let awaiting = self.session.state() == SessionState::AwaitingAnswer;
        let question = self.session.current_question().cloned();

        if let Some(question) = &question {
            let mode_label = if self.session.is_review_mode() {
                format!("Mode: {} (REVIEW)", question.mode().label().to_uppercase())
            } else {
                format!("Mode: {}", question.mode().label().to_uppercase())
            };
            ui.heading(mode_label);
            ui.add_space(10.0);

            match &question.payload {
                QuestionPayload::MultipleChoice { video, options } => {
                    ui.hyperlink_to("▶ Play sign", clip_url(video));
                    ui.add_space(10.0);
                    ui.horizontal_wrapped(|ui| {
                        for option in options {
                            let text = self.option_text(
                                option.as_str().to_uppercase(),
                                option.as_str(),
                                question.word.as_str(),
                            );
                            if ui.add_enabled(awaiting, egui::Button::new(text)).clicked() {
                                action = Some(Action::Answer(option.to_string()));
                            }
                        }
                    });
                }
                QuestionPayload::VideoSelect { options } => {
                    ui.label(format!(
                        "Which video shows: {}?",
                        question.word.as_str().to_uppercase()
                    ));
                    ui.add_space(10.0);
                    for (i, option) in options.iter().enumerate() {
                        ui.horizontal(|ui| {
                            ui.hyperlink_to(format!("▶ Clip {}", i + 1), clip_url(&option.video));
                            let text = self.option_text(
                                format!("Choose clip {}", i + 1),
                                option.word.as_str(),
                                question.word.as_str(),
                            );
                            if ui.add_enabled(awaiting, egui::Button::new(text)).clicked() {
                                action = Some(Action::Answer(option.word.to_string()));
                            }
                        });
                    }
                }
                QuestionPayload::TypeIn { video } => {
                    ui.hyperlink_to("▶ Play sign", clip_url(video));
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        let response = ui.add_enabled(
                            awaiting,
                            egui::TextEdit::singleline(&mut self.type_in_answer)
                                .hint_text("Type the word"),
                        );
                        let entered =
                            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if ui.add_enabled(awaiting, egui::Button::new("Submit")).clicked()
                            || (awaiting && entered)
                        {
                            action = Some(Action::Answer(self.type_in_answer.clone()));
                        }
                    });
                }
            }
        }

        ui.add_space(20.0);
        if !self.feedback.is_empty() {
            let color = match self.feedback_kind {
                FeedbackKind::Correct => egui::Color32::from_rgb(46, 160, 67),
                FeedbackKind::Incorrect => egui::Color32::from_rgb(207, 34, 46),
                FeedbackKind::Neutral => ui.visuals().text_color(),
            };
            ui.label(egui::RichText::new(&self.feedback).color(color));
        }

        ui.add_space(20.0);
        ui.horizontal(|ui| {
            let next_label = if self.session.is_review_mode() {
                "Next Review Sign"
            } else {
                "Next Sign"
            };
            if ui.add_enabled(!awaiting, egui::Button::new(next_label)).clicked() {
                action = Some(Action::Next);
            }

            let review_label = if self.session.is_review_mode() {
                "Exit Review Mode".to_string()
            } else {
                format!("Review Mode ({})", self.session.review_count())
            };
            if ui.add_enabled(!awaiting, egui::Button::new(review_label)).clicked() {
                action = Some(Action::ToggleReview);
            }
        });

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Export Progress").clicked() {
                action = Some(Action::Export);
            }
            if ui.add_enabled(!awaiting, egui::Button::new("Import Progress")).clicked() {
                action = Some(Action::Import);
            }
        });

        action
    }

    /// Marks the chosen and the correct option once the question is answered
    fn option_text(&self, label: String, option_word: &str, correct_word: &str) -> egui::RichText {
        let text = egui::RichText::new(label);
        if self.session.state() != SessionState::Answered {
            return text;
        }
        if option_word == correct_word {
            text.color(egui::Color32::from_rgb(46, 160, 67))
        } else if self.selected_answer.as_deref() == Some(option_word) {
            text.color(egui::Color32::from_rgb(207, 34, 46))
        } else {
            text
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Answer(answer) => self.submit_answer(answer),
            Action::Next => self.start_question(),
            Action::ToggleReview => self.toggle_review(),
            Action::Export => self.handle_export(),
            Action::Import => self.handle_import(),
        }
    }

    fn set_feedback(&mut self, text: impl Into<String>, kind: FeedbackKind) {
        self.feedback = text.into();
        self.feedback_kind = kind;
    }

    fn start_question(&mut self) {
        self.type_in_answer.clear();
        self.selected_answer = None;
        self.set_feedback("", FeedbackKind::Neutral);

        match self.session.start_question() {
            Ok(_) => {}
            Err(QuizError::EmptyReviewQueue) => {
                self.set_feedback(QuizError::EmptyReviewQueue.to_string(), FeedbackKind::Correct);
            }
            Err(e) if e.is_retryable() => {
                self.set_feedback(
                    format!("{}. Please try again.", e),
                    FeedbackKind::Incorrect,
                );
            }
            Err(e) => self.set_feedback(e.to_string(), FeedbackKind::Incorrect),
        }
    }

    fn submit_answer(&mut self, answer: String) {
        self.selected_answer = Some(answer.trim().to_lowercase());
        match self.session.submit_answer(&answer) {
            Ok(outcome) => self.show_outcome(&outcome),
            Err(e) => {
                // The question is still open; let the learner answer again.
                self.selected_answer = None;
                self.set_feedback(e.to_string(), FeedbackKind::Incorrect);
            }
        }
    }

    fn show_outcome(&mut self, outcome: &AnswerOutcome) {
        if outcome.correct {
            self.set_feedback("✅ Correct!", FeedbackKind::Correct);
        } else {
            self.set_feedback(
                format!(
                    "❌ Incorrect! The correct word was: {}",
                    outcome.correct_word.as_str().to_uppercase()
                ),
                FeedbackKind::Incorrect,
            );
        }

        match outcome.advancement {
            Advancement::LevelAdvanced(level) => {
                self.start_question();
                self.set_feedback(
                    format!("🎉 Level Cleared! Advancing to Level {}! 🎉", level),
                    FeedbackKind::Correct,
                );
            }
            Advancement::AllLevelsMastered => {
                self.set_feedback(
                    "🥳 Congratulations! You have mastered all available levels! 🏆",
                    FeedbackKind::Correct,
                );
            }
            Advancement::NotYetComplete => {}
        }

        if outcome.review_finished {
            self.feedback
                .push_str("\nReview list cleared! Back to regular practice.");
        }
    }

    fn toggle_review(&mut self) {
        match self.session.toggle_review_mode() {
            Ok(ReviewToggle::QueueEmpty) => {
                self.set_feedback(ReviewToggle::QueueEmpty.message(), FeedbackKind::Correct);
            }
            Ok(_) => self.start_question(),
            Err(e) => self.set_feedback(e.to_string(), FeedbackKind::Incorrect),
        }
    }

    /// Handles progress export to a JSON file
    fn handle_export(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("sign_quiz_progress.json")
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            self.result_message = match export_progress_to_path(self.session.progress(), &path) {
                Ok(()) => format!("Progress exported to '{}'", path.display()),
                Err(e) => format!("Export failed: {}", e),
            };
            self.show_result_dialog = true;
        }
    }

    /// Handles progress import from a JSON file, replacing the current progress
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        self.result_message = match import_progress(&path)
            .and_then(|progress| self.session.replace_progress(progress))
        {
            Ok(()) => {
                self.start_question();
                format!(
                    "Progress imported! Now at {}.",
                    level_name(self.session.progress().current_level())
                )
            }
            Err(e) => format!(
                "Import failed: {}\n\nPlease check if the file has correct structure:\n{{\n  \"currentLevel\": 1,\n  \"mastery\": {{...}},\n  \"reviewQueue\": [...]\n}}",
                e
            ),
        };
        self.show_result_dialog = true;
    }
}
