use eframe::egui::{self, RichText, Ui};

use crate::records::UNKNOWN_YEAR;
use crate::util::ellipsize;

use super::super::ViewModel;

const KEYWORD_PREVIEW_CHARS: usize = 120;

impl ViewModel {
    pub(in crate::app) fn draw_results(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("Publications");
            ui.separator();
            if ui
                .add_enabled(self.pages.has_previous(), egui::Button::new("Previous"))
                .clicked()
            {
                self.pages.previous();
            }
            ui.label(self.pages.page_label());
            if ui
                .add_enabled(self.pages.has_next(), egui::Button::new("Next"))
                .clicked()
            {
                self.pages.next();
            }
        });
        ui.separator();

        if self.pages.is_empty() {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("No publications found.").italics());
            });
            return;
        }

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("results_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for &position in self.pages.current_window() {
                    let Some(record) = self.store.records().get(position) else {
                        continue;
                    };

                    let is_selected = self.selected == Some(position);
                    let response = ui.selectable_label(
                        is_selected,
                        RichText::new(record.display_title()).strong(),
                    );
                    if response.clicked() {
                        clicked = Some(position);
                    }

                    let year = record.year.as_deref().unwrap_or(UNKNOWN_YEAR);
                    let author = record.author.as_deref().unwrap_or("Unknown author");
                    ui.small(format!("{author} · {year}"));
                    if let Some(keywords) = record.keywords.as_deref().filter(|k| !k.is_empty()) {
                        ui.small(RichText::new(ellipsize(keywords, KEYWORD_PREVIEW_CHARS)).weak());
                    }
                    ui.add_space(6.0);
                }
            });

        if let Some(position) = clicked {
            self.set_selected(Some(position));
        }
    }
}
