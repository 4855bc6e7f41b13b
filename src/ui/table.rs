use eframe::egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::format::format_money;
use crate::color::ACCENT;
use crate::data::model::SummaryRow;
use crate::state::{AppState, SortColumn};

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Latest-snapshot summary table
// ---------------------------------------------------------------------------

/// Render the summary rows, total last and highlighted. Clicking a header
/// sorts the holdings by that column.
pub fn summary_table(ui: &mut Ui, state: &mut AppState) {
    let sort = state.table_sort;
    let mut clicked: Option<SortColumn> = None;
    let rows = state.sorted_summary();

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::remainder())
        .column(Column::remainder())
        .column(Column::remainder())
        .column(Column::auto().at_least(120.0))
        .header(ROW_HEIGHT, |mut header| {
            for column in SortColumn::ALL {
                header.col(|ui| {
                    let (active, arrow) = match sort {
                        Some(s) if s.column == column => (true, if s.ascending { " ⏶" } else { " ⏷" }),
                        _ => (false, ""),
                    };
                    let text = RichText::new(format!("{}{arrow}", column.title())).strong();
                    if ui.selectable_label(active, text).clicked() {
                        clicked = Some(column);
                    }
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(ROW_HEIGHT, |mut table_row| {
                    let category_color = match row {
                        SummaryRow::Holding { category, .. } => {
                            Some(state.category_colors.color_for(*category))
                        }
                        SummaryRow::Total { .. } => None,
                    };

                    table_row.col(|ui| {
                        ui.label(cell_text(row, row.owner()));
                    });
                    table_row.col(|ui| {
                        let text = cell_text(row, row.category_label());
                        ui.label(match category_color {
                            Some(color) => text.color(color),
                            None => text,
                        });
                    });
                    table_row.col(|ui| {
                        ui.label(cell_text(row, row.account()));
                    });
                    table_row.col(|ui| {
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.label(cell_text(row, &format_money(row.usd_value(), 2)));
                        });
                    });
                });
            }
        });

    if let Some(column) = clicked {
        state.toggle_sort(column);
    }
}

fn cell_text(row: &SummaryRow, text: &str) -> RichText {
    let text = RichText::new(text);
    if row.is_total() {
        text.strong().color(ACCENT)
    } else {
        text
    }
}
