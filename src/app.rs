use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::generate::{GenerationJob, OpenAiGenerator, TaskGenerator};
use crate::io::{JsonFileStore, Persistence};
use crate::layout::{compute_chart, ZoomState};
use crate::model::{todo_items, Task, TaskColor, TaskEdit, TaskStore};
use crate::ui;

/// Main application state.
pub struct PlanifyApp {
    pub store: TaskStore,
    pub zoom: ZoomState,

    // Optional backends. The app runs fine without either; features that
    // need them degrade to a status-bar message.
    persistence: Option<Box<dyn Persistence>>,
    generator: Option<Arc<dyn TaskGenerator>>,

    // In-flight generation, at most one. The sequence number outlives each
    // job so a stale worker reply can be told apart from the current one.
    generation: Option<GenerationJob>,
    generation_seq: u64,
    pub prompt_input: String,

    // Dialog state
    pub show_task_dialog: bool,
    pub editing_task: Option<u64>,
    pub form_name: String,
    pub form_start: NaiveDate,
    pub form_end: NaiveDate,
    pub form_color: TaskColor,
    pub form_error: Option<String>,

    // Status message
    pub status_message: String,
}

impl PlanifyApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let persistence: Option<Box<dyn Persistence>> = match JsonFileStore::in_user_data_dir() {
            Ok(store) => {
                info!(path = %store.path().display(), "using task file");
                Some(Box::new(store))
            }
            Err(e) => {
                warn!("persistence disabled: {e}");
                None
            }
        };

        let mut status_message = "Ready".to_string();
        let mut store = TaskStore::new();
        if let Some(p) = &persistence {
            match p.load() {
                Ok(tasks) => {
                    let report = store.replace_all(tasks);
                    if report.dropped > 0 {
                        status_message =
                            format!("Loaded {} tasks ({} skipped)", report.accepted, report.dropped);
                    }
                }
                Err(e) => {
                    warn!("failed to load tasks: {e}");
                    status_message = format!("Could not load saved tasks: {e}");
                }
            }
        }
        if store.is_empty() {
            store = Self::sample_plan();
        }

        let generator: Option<Arc<dyn TaskGenerator>> = match OpenAiGenerator::from_env() {
            Ok(g) => Some(Arc::new(g)),
            Err(e) => {
                info!("generation disabled: {e}");
                None
            }
        };

        let today = chrono::Local::now().date_naive();
        Self {
            store,
            zoom: ZoomState::default(),
            persistence,
            generator,
            generation: None,
            generation_seq: 0,
            prompt_input: String::new(),
            show_task_dialog: false,
            editing_task: None,
            form_name: String::new(),
            form_start: today,
            form_end: today + chrono::Duration::days(7),
            form_color: TaskColor::Blue,
            form_error: None,
            status_message,
        }
    }

    /// Starter plan shown on first launch, anchored to today.
    fn sample_plan() -> TaskStore {
        let today = chrono::Local::now().date_naive();
        let day = chrono::Duration::days;

        let mut kickoff = Task::new(1, "Kick-off Meeting", today, today);
        kickoff.color = TaskColor::Blue;
        kickoff.completed = true;

        let mut design = Task::new(2, "Design Phase", today + day(1), today + day(9));
        design.color = TaskColor::Green;

        let mut proto = Task::new(3, "Prototype Development", today + day(10), today + day(24));
        proto.color = TaskColor::Yellow;

        TaskStore::from_tasks(vec![kickoff, design, proto])
    }

    /// Persist the current task list. Failures are reported, never fatal.
    fn autosave(&mut self) {
        if let Some(p) = &self.persistence {
            if let Err(e) = p.save(self.store.tasks()) {
                warn!("autosave failed: {e}");
                self.status_message = format!("Could not save: {e}");
            }
        }
    }

    // --- Dialog handling ---

    pub fn open_add_dialog(&mut self) {
        let today = chrono::Local::now().date_naive();
        self.editing_task = None;
        self.form_name = String::new();
        self.form_start = today;
        self.form_end = today + chrono::Duration::days(7);
        self.form_color = TaskColor::Blue;
        self.form_error = None;
        self.show_task_dialog = true;
    }

    pub fn open_edit_dialog(&mut self, id: u64) {
        let Some(task) = self.store.get(id) else {
            return;
        };
        let today = chrono::Local::now().date_naive();
        self.form_name = task.name.clone();
        self.form_start = task.start_date().unwrap_or(today);
        self.form_end = task.end_date().unwrap_or(self.form_start);
        self.form_color = task.color;
        self.form_error = None;
        self.editing_task = Some(id);
        self.show_task_dialog = true;
    }

    pub fn close_task_dialog(&mut self) {
        self.show_task_dialog = false;
        self.editing_task = None;
        self.form_error = None;
    }

    /// Apply the dialog form. Returns true when the dialog may close; a
    /// validation failure keeps it open with an inline error instead.
    pub fn submit_task_dialog(&mut self) -> bool {
        let start = crate::model::date::format_iso(self.form_start);
        let end = crate::model::date::format_iso(self.form_end);

        let result = match self.editing_task {
            Some(id) => self
                .store
                .update(
                    id,
                    TaskEdit {
                        name: self.form_name.clone(),
                        start,
                        end,
                        color: self.form_color,
                    },
                )
                .map(|_| format!("Updated '{}'", self.form_name.trim())),
            None => self
                .store
                .add(&self.form_name, &start, &end, self.form_color)
                .map(|_| format!("Added '{}'", self.form_name.trim())),
        };

        match result {
            Ok(msg) => {
                self.status_message = msg;
                self.autosave();
                true
            }
            Err(e) => {
                self.form_error = Some(e.to_string());
                false
            }
        }
    }

    // --- Task operations ---

    pub fn toggle_completed(&mut self, id: u64, completed: bool) {
        if self.store.set_completed(id, completed).is_ok() {
            self.autosave();
        }
    }

    pub fn delete_task(&mut self, id: u64) {
        match self.store.remove(id) {
            Ok(task) => {
                self.status_message = format!("Deleted '{}'", task.name);
                self.autosave();
            }
            Err(e) => {
                self.status_message = e.to_string();
            }
        }
    }

    // --- Generation ---

    pub fn is_generating(&self) -> bool {
        self.generation.is_some()
    }

    pub fn start_generation(&mut self) {
        if self.generation.is_some() {
            return;
        }
        let prompt = self.prompt_input.trim().to_string();
        if prompt.is_empty() {
            self.status_message = "Describe your project first".to_string();
            return;
        }
        let Some(generator) = self.generator.clone() else {
            self.status_message = "OPENAI_API_KEY is not set".to_string();
            return;
        };

        self.generation_seq += 1;
        self.generation = Some(GenerationJob::spawn(
            generator,
            prompt,
            self.generation_seq,
        ));
        self.status_message = "Generating plan...".to_string();
    }

    fn poll_generation(&mut self, ctx: &egui::Context) {
        let Some(job) = &self.generation else {
            return;
        };

        let Some(result) = job.try_result() else {
            // Keep painting while the worker runs so the spinner animates
            // and the reply is picked up promptly.
            ctx.request_repaint_after(std::time::Duration::from_millis(150));
            return;
        };

        let request_id = job.request_id();
        self.generation = None;

        if request_id != self.generation_seq {
            warn!(request_id, "discarding stale generation result");
            return;
        }

        match result {
            Ok(tasks) => {
                let report = self.store.replace_all(tasks);
                self.status_message = if report.dropped > 0 {
                    format!(
                        "Generated {} tasks ({} skipped)",
                        report.accepted, report.dropped
                    )
                } else {
                    format!("Generated {} tasks", report.accepted)
                };
                self.prompt_input.clear();
                self.autosave();
            }
            Err(e) => {
                warn!("generation failed: {e}");
                self.status_message = format!("Generation failed: {e}");
            }
        }
    }
}

impl eframe::App for PlanifyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);
        self.poll_generation(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let zoom_text = if self.zoom.fit {
                            "Zoom: Fit".to_string()
                        } else {
                            format!(
                                "Zoom: {:.0}%",
                                self.zoom.pixels_per_day
                                    / crate::layout::zoom::DEFAULT_PIXELS_PER_DAY
                                    * 100.0
                            )
                        };
                        ui.label(
                            egui::RichText::new(zoom_text)
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.store.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: to-do list
        let items = todo_items(&self.store);
        let mut todo_action = ui::todo_list::TodoAction::None;
        egui::SidePanel::left("todo_panel")
            .default_width(280.0)
            .min_width(200.0)
            .max_width(460.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                todo_action = ui::todo_list::show_todo_list(&items, ui);
            });

        match todo_action {
            ui::todo_list::TodoAction::Toggle(id, completed) => {
                self.toggle_completed(id, completed);
            }
            ui::todo_list::TodoAction::Edit(id) => {
                self.open_edit_dialog(id);
            }
            ui::todo_list::TodoAction::Delete(id) => {
                self.delete_task(id);
            }
            ui::todo_list::TodoAction::Add => {
                self.open_add_dialog();
            }
            ui::todo_list::TodoAction::None => {}
        }

        // Central panel: Gantt chart
        let layout = compute_chart(&self.store, &self.zoom);
        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_DARK)
                    .inner_margin(egui::Margin::ZERO),
            )
            .show(ctx, |ui| {
                ui::gantt_chart::show_gantt_chart(&layout, ui);
            });

        if self.show_task_dialog {
            ui::dialogs::show_task_dialog(self, ctx);
        }
    }
}
