use eframe::egui::{self, Key, Ui};

use crate::error::FilterError;
use crate::filter::{FilterCriteria, SortOrder};

use super::super::ViewModel;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::app) enum RangeMode {
    #[default]
    Any,
    Between,
    Before,
}

impl RangeMode {
    const ALL: [Self; 3] = [Self::Any, Self::Between, Self::Before];

    fn label(self) -> &'static str {
        match self {
            Self::Any => "Any year",
            Self::Between => "Between",
            Self::Before => "Before",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(in crate::app) struct FilterForm {
    pub keyword: String,
    pub author: String,
    pub topic: Option<String>,
    pub range_mode: RangeMode,
    pub range_start: String,
    pub range_end: String,
    pub sort_order: Option<SortOrder>,
}

impl FilterForm {
    pub(in crate::app) fn year_range_token(&self) -> String {
        let start = self.range_start.trim();
        let end = self.range_end.trim();
        match self.range_mode {
            RangeMode::Any => String::new(),
            RangeMode::Between => format!("{start}-{end}"),
            RangeMode::Before => format!("before-{start}"),
        }
    }

    pub(in crate::app) fn to_criteria(&self) -> Result<FilterCriteria, FilterError> {
        Ok(FilterCriteria {
            keyword: self.keyword.trim().to_owned(),
            author: self.author.trim().to_owned(),
            topic: self.topic.clone(),
            year_range: self.year_range_token().parse()?,
            sort_order: self.sort_order,
        })
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Filters");
        ui.add_space(6.0);

        let mut submit = false;

        ui.label("Keyword");
        let keyword = ui.text_edit_singleline(&mut self.form.keyword);
        submit |= keyword.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));

        ui.label("Author");
        let author = ui.text_edit_singleline(&mut self.form.author);
        submit |= author.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));

        ui.label("Topic");
        egui::ComboBox::from_id_salt("topic_filter")
            .selected_text(self.form.topic.as_deref().unwrap_or("All topics"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.form.topic, None, "All topics");
                for topic in &self.topics {
                    ui.selectable_value(&mut self.form.topic, Some(topic.clone()), topic.as_str());
                }
            });

        ui.add_space(4.0);
        ui.label("Year");
        ui.horizontal(|ui| {
            for mode in RangeMode::ALL {
                ui.radio_value(&mut self.form.range_mode, mode, mode.label());
            }
        });
        match self.form.range_mode {
            RangeMode::Any => {}
            RangeMode::Between => {
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(&mut self.form.range_start).desired_width(60.0));
                    ui.label("to");
                    ui.add(egui::TextEdit::singleline(&mut self.form.range_end).desired_width(60.0));
                });
            }
            RangeMode::Before => {
                ui.add(egui::TextEdit::singleline(&mut self.form.range_start).desired_width(60.0));
            }
        }

        ui.add_space(4.0);
        ui.label("Sort by year");
        egui::ComboBox::from_id_salt("sort_order")
            .selected_text(self.form.sort_order.map_or("Source order", SortOrder::label))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.form.sort_order, None, "Source order");
                for order in [SortOrder::Descending, SortOrder::Ascending] {
                    ui.selectable_value(&mut self.form.sort_order, Some(order), order.label());
                }
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            submit |= ui.button("Apply").clicked();
            if ui.button("Clear").clicked() {
                self.form = FilterForm::default();
                submit = true;
            }
        });

        if submit {
            self.apply_form();
        }

        if let Some(error) = &self.form_error {
            ui.colored_label(ui.visuals().error_fg_color, error.as_str());
        }

        let active = self.filter_reader.current();
        if !active.is_empty() {
            ui.separator();
            ui.small(format!("Active filter revision {}", self.filter_reader.revision()));
            if !active.year_range.is_any() {
                ui.small(format!("Years: {}", active.year_range));
            }
        }
    }

    fn apply_form(&mut self) {
        match self.form.to_criteria() {
            Ok(criteria) => {
                self.form_error = None;
                self.filter_writer.set(criteria);
            }
            Err(error) => self.form_error = Some(error.to_string()),
        }
    }
}
