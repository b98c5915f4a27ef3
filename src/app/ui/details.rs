use std::sync::mpsc::{self, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, RichText, Ui};

use crate::records::UNKNOWN_YEAR;

use super::super::{SummaryState, ViewModel, error_chain};

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Publication Details");
        ui.add_space(6.0);

        let Some(position) = self.selected else {
            ui.label("Select a publication from the list or the graph.");
            return;
        };

        let Some(record) = self.store.records().get(position).cloned() else {
            ui.label("Selected publication no longer exists in the record set.");
            return;
        };

        ui.label(RichText::new(record.display_title()).strong().size(16.0));
        ui.add_space(4.0);
        ui.label(format!(
            "Author: {}",
            record.author.as_deref().unwrap_or("Unknown author")
        ));
        ui.label(format!(
            "Year: {}",
            record.year.as_deref().unwrap_or(UNKNOWN_YEAR)
        ));
        if let Some(keywords) = record.keywords.as_deref().filter(|k| !k.is_empty()) {
            ui.label(format!("Keywords: {keywords}"));
        }
        if let Some(url) = record.url.as_deref() {
            ui.hyperlink_to("Open source", url);
        }

        ui.separator();
        ui.label(RichText::new("Summary").strong());
        self.draw_summary(ui, position, &record.title);

        if let Some(sections) = record.sections.as_ref().filter(|s| !s.is_empty()) {
            ui.separator();
            egui::ScrollArea::vertical()
                .id_salt("sections_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (key, text) in sections {
                        egui::CollapsingHeader::new(key.as_str())
                            .default_open(true)
                            .show(ui, |ui| {
                                ui.label(text.as_str());
                            });
                    }
                });
        }
    }

    fn draw_summary(&mut self, ui: &mut Ui, position: usize, title: &str) {
        if let Some(summary) = self
            .store
            .records()
            .get(position)
            .and_then(|record| record.summary.as_deref())
            .filter(|summary| !summary.trim().is_empty())
        {
            ui.label(summary);
        }

        match &self.summary {
            SummaryState::Pending { record, .. } if *record == position => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Summarizing...");
                });
                return;
            }
            SummaryState::Ready { record, text } if *record == position => {
                ui.label(text.as_str());
                return;
            }
            SummaryState::Failed { record, message } if *record == position => {
                ui.colored_label(ui.visuals().error_fg_color, message.as_str());
            }
            _ => {}
        }

        if self.summary_client.is_none() {
            ui.small("No summarization endpoint configured.");
            return;
        }

        if ui.button("Generate summary").clicked() {
            self.request_summary(position, title.to_owned());
        }
    }

    fn request_summary(&mut self, position: usize, title: String) {
        let Some(client) = self.summary_client.clone() else {
            return;
        };

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = client
                .summarize(&title)
                .map_err(|error| error_chain(&error));
            let _ = tx.send(result);
        });

        self.summary = SummaryState::Pending {
            record: position,
            rx,
        };
    }

    pub(in crate::app) fn poll_summary(&mut self, ctx: &Context) {
        let SummaryState::Pending { record, rx } = &self.summary else {
            return;
        };
        let record = *record;

        self.summary = match rx.try_recv() {
            Ok(Ok(text)) => SummaryState::Ready { record, text },
            Ok(Err(message)) => SummaryState::Failed { record, message },
            Err(TryRecvError::Empty) => {
                ctx.request_repaint();
                return;
            }
            Err(TryRecvError::Disconnected) => SummaryState::Failed {
                record,
                message: "Summary worker stopped unexpectedly".to_owned(),
            },
        };
    }
}
