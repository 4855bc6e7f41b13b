use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Category;
use crate::state::{AppState, FilterKind};

// ---------------------------------------------------------------------------
// Left side panel – filter checklists
// ---------------------------------------------------------------------------

/// Render the "Type" and "Owner" checklists.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("No holdings loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the loop.
    let categories: Vec<Category> = state.dataset.categories.iter().copied().collect();
    let owners: Vec<String> = state.dataset.owners.iter().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            checklist_header(ui, state, FilterKind::Category, "Type");
            for category in categories {
                let mut checked = state.selection.categories.contains(&category);
                let text = RichText::new(category.as_str())
                    .color(state.category_colors.color_for(category));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_category(category);
                }
            }

            ui.separator();

            checklist_header(ui, state, FilterKind::Owner, "Owner");
            for owner in &owners {
                let mut checked = state.selection.owners.contains(owner);
                if ui.checkbox(&mut checked, owner.as_str()).changed() {
                    state.toggle_owner(owner);
                }
            }
        });
}

/// Title with selected/total count and All / None buttons.
fn checklist_header(ui: &mut Ui, state: &mut AppState, kind: FilterKind, title: &str) {
    let (n_selected, n_total) = match kind {
        FilterKind::Category => (state.selection.categories.len(), state.dataset.categories.len()),
        FilterKind::Owner => (state.selection.owners.len(), state.dataset.owners.len()),
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!("{title}:  ({n_selected}/{n_total})"));
        if ui.small_button("All").clicked() {
            state.select_all(kind);
        }
        if ui.small_button("None").clicked() {
            state.select_none(kind);
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} holdings from {} snapshots in {}",
            state.dataset.len(),
            state.dataset.snapshot_count,
            state.data_dir.display()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui, state: &AppState) {
    let latest = state
        .view
        .latest_timestamp
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "n/a".to_string());
    ui.small(format!("Latest data: {latest}"));
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open snapshot folder")
        .set_directory(&state.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        state.load_dir(&dir);
    }
}
