use eframe::egui;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::HotboxApp;
use crate::templates;

impl HotboxApp {
    pub(super) fn create_empty_hotbox(&mut self) {
        let hotbox = templates::new_hotbox(&self.library);
        let name = hotbox.general.name.clone();
        self.library.push(hotbox);
        self.open_hotbox(self.library.len() - 1);
        self.set_status(format!("Created {name}"));
    }

    pub(super) fn create_hotbox_from_template(&mut self, template_index: usize) {
        let templates_list = templates::template_hotboxes();
        let Some(template) = templates_list.get(template_index) else {
            return;
        };
        let mut hotbox = template.clone();
        hotbox.general.name = templates::valid_name(&self.library, Some(&hotbox.general.name));
        let name = hotbox.general.name.clone();
        self.library.push(hotbox);
        self.open_hotbox(self.library.len() - 1);
        self.set_status(format!("Created {name}"));
    }

    pub(super) fn duplicate_current_hotbox(&mut self) {
        self.sync_current();
        let Some(index) = self.current else {
            self.set_status("Open a hotbox first");
            return;
        };
        let mut copy = self.library[index].clone();
        copy.general.name = templates::valid_name(&self.library, Some(&copy.general.name));
        let name = copy.general.name.clone();
        self.library.push(copy);
        self.open_hotbox(self.library.len() - 1);
        self.set_status(format!("Duplicated into {name}"));
    }

    pub(super) fn remove_current_hotbox(&mut self) {
        let Some(index) = self.current else {
            return;
        };
        let removed = self.library.remove(index);
        self.current = None;
        self.shapes.clear();
        self.selected.clear();
        self.manipulator.set_rect(None);
        if !self.library.is_empty() {
            self.open_hotbox(index.min(self.library.len() - 1));
        }
        self.set_status(format!("Removed {}", removed.general.name));
    }

    fn filtered_indices(&self) -> Vec<usize> {
        let query = self.library_filter.trim();
        if query.is_empty() {
            return (0..self.library.len()).collect();
        }
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(usize, i64)> = self
            .library
            .iter()
            .enumerate()
            .filter_map(|(index, hotbox)| {
                matcher
                    .fuzzy_match(&hotbox.general.name, query)
                    .map(|score| (index, score))
            })
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(index, _)| index).collect()
    }

    pub(super) fn library_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Hotboxes");
        ui.add(
            egui::TextEdit::singleline(&mut self.library_filter)
                .hint_text("Filter")
                .desired_width(f32::INFINITY),
        );
        ui.separator();

        let mut open_request = None;
        egui::ScrollArea::vertical()
            .max_height(ui.available_height() - 90.0)
            .show(ui, |ui| {
                for index in self.filtered_indices() {
                    let active = self.current == Some(index);
                    let name = self.library[index].general.name.clone();
                    if ui.selectable_label(active, name).clicked() && !active {
                        open_request = Some(index);
                    }
                }
            });
        if let Some(index) = open_request {
            self.open_hotbox(index);
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("create").clicked() {
                self.create_empty_hotbox();
            }
            ui.menu_button("template", |ui| {
                for (template_index, template) in templates::template_hotboxes().iter().enumerate()
                {
                    if ui.button(&template.general.name).clicked() {
                        self.create_hotbox_from_template(template_index);
                        ui.close_menu();
                    }
                }
            });
            if ui.button("duplicate").clicked() {
                self.duplicate_current_hotbox();
            }
            if ui.button("remove").clicked() {
                self.remove_current_hotbox();
            }
        });
        ui.horizontal(|ui| {
            if ui.button("import").clicked() {
                self.import_hotbox_dialog();
            }
            if ui.button("export").clicked() {
                self.export_hotbox_dialog();
            }
        });
    }
}
