//! Interactive viewer for the bauble simulation
//!
//! The mouse moves the attractor across the working plane. When started
//! with a config file the file is watched and the scene is rebuilt on change.

use baubles_core::pointer::{ndc_to_screen, screen_to_ndc};
use baubles_core::{build_scene, step_scene, FrameStats, Scene, SceneConfig};
use glam::{Vec2, Vec3};
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;

pub struct ViewApp {
    config_path: Option<PathBuf>,
    config: SceneConfig,
    scene_opt: Option<Scene>,
    last_stats: Option<FrameStats>,
    last_load_error: Option<String>,
    playing: bool,
    time_scale: f32,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl ViewApp {
    pub fn new(
        config_path: Option<PathBuf>,
        config: SceneConfig,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .ok();

        if let (Some(w), Some(path)) = (watcher.as_mut(), config_path.as_ref()) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                log::warn!("not watching {}: {}", path.display(), e);
            }
        }

        let mut app = Self {
            config_path,
            config,
            scene_opt: None,
            last_stats: None,
            last_load_error: None,
            playing: true,
            time_scale: 1.0,
            file_watcher: watcher,
            file_receiver: rx,
        };

        app.rebuild_scene();

        app
    }

    fn rebuild_scene(&mut self) {
        match build_scene(&self.config) {
            Ok(scene) => {
                self.scene_opt = Some(scene);
                self.last_stats = None;
                self.last_load_error = None;
            }
            Err(e) => {
                self.last_load_error = Some(e.to_string());
                self.scene_opt = None;
                self.playing = false;
            }
        }
    }

    fn reload_config(&mut self) {
        let Some(path) = self.config_path.as_ref() else {
            return;
        };
        match SceneConfig::load(path) {
            Ok(config) => {
                log::info!("reloaded {}", path.display());
                self.config = config;
                self.rebuild_scene();
            }
            Err(e) => {
                self.last_load_error = Some(e.to_string());
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    ..
                }) => needs_reload = true,
                Ok(_) => {}
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            self.reload_config();
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                self.playing = !self.playing;
            }

            if ui.button("⏮ Reset").clicked() {
                if let Some(scene) = self.scene_opt.as_mut() {
                    scene.reset();
                }
                self.last_stats = None;
            }

            if ui.button("⏭ Step").clicked() {
                if let Some(scene) = self.scene_opt.as_mut() {
                    self.last_stats = Some(step_scene(scene, 1.0 / 60.0));
                }
            }

            ui.separator();

            ui.label("Speed:");
            ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=4.0));

            ui.separator();

            if let Some(stats) = self.last_stats {
                ui.label(format!(
                    "Frame: {}  t = {:.1}s  energy {:.1}  overlaps {}",
                    stats.frame, stats.elapsed, stats.kinetic_energy, stats.overlapping_pairs
                ));
            }
        });
    }

    fn draw_scene(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        let size = Vec2::new(rect.width(), rect.height());
        let to_screen = |ndc: Vec3| {
            let p = ndc_to_screen(ndc.truncate(), size);
            rect.min + egui::vec2(p.x, p.y)
        };

        let Some(scene) = self.scene_opt.as_mut() else {
            return;
        };
        scene.camera.set_viewport(size.x, size.y);

        if let Some(pos) = ui.input(|i| i.pointer.hover_pos()) {
            if rect.contains(pos) {
                let local = pos - rect.min;
                scene.set_pointer(screen_to_ndc(Vec2::new(local.x, local.y), size));
            }
        }

        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(0xdf, 0xdf, 0xdf));

        // Far bodies first so near ones are painted over them
        let camera = scene.camera;
        let radius = scene.params().radius;
        let mut projected: Vec<_> = scene
            .world
            .bodies
            .iter()
            .map(|b| {
                let center = camera.project(b.pos);
                let edge = camera.project(b.pos + Vec3::Y * radius);
                let screen_radius = (to_screen(center) - to_screen(edge)).length();
                (center, screen_radius)
            })
            .filter(|(ndc, _)| ndc.z.abs() <= 1.0)
            .collect();
        projected.sort_by(|a, b| b.0.z.total_cmp(&a.0.z));

        for (ndc, screen_radius) in projected {
            let shade = (200.0 - ndc.z * 60.0).clamp(120.0, 255.0) as u8;
            painter.circle_filled(
                to_screen(ndc),
                screen_radius.max(1.0),
                egui::Color32::from_gray(shade),
            );
            painter.circle_stroke(
                to_screen(ndc),
                screen_radius.max(1.0),
                egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
            );
        }

        let target = camera.project(scene.target);
        painter.circle_filled(to_screen(target), 4.0, egui::Color32::YELLOW);
    }
}

impl eframe::App for ViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_scene(ui);

            if let Some(ref error) = self.last_load_error {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.max_rect().height() * 0.4);
                    ui.label(
                        egui::RichText::new(format!("Error: {}", error))
                            .color(egui::Color32::RED)
                            .size(16.0),
                    );
                });
            }
        });

        if self.playing {
            if let Some(scene) = self.scene_opt.as_mut() {
                let dt = ctx.input(|i| i.unstable_dt) * self.time_scale;
                self.last_stats = Some(step_scene(scene, dt));
            }
            ctx.request_repaint();
        }
    }
}
