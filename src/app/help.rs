use eframe::egui;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help & Commands")
        .open(open)
        .resizable(true)
        .default_width(520.0)
        .default_height(420.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Keyboard Shortcuts");
                ui.separator();

                ui.label("General");
                help_row(ui, "⌘⇧P", "Open command palette");
                help_row(ui, "⌘S", "Save hotbox library");
                help_row(ui, "⌘O", "Import hotbox (JSON)");
                help_row(ui, "F1", "This window");
                help_row(ui, "Escape", "Leave preview / clear selection");

                ui.add_space(10.0);
                ui.label("Editing");
                help_row(ui, "Delete / Backspace", "Delete selected shapes");
                help_row(ui, "⌘A", "Select every shape");
                help_row(ui, "Arrow keys", "Nudge selection");
                help_row(ui, "Shift + Arrow keys", "Nudge selection faster");
                help_row(ui, "Shift + click", "Add/remove shape from selection");
                help_row(ui, "Drag empty canvas", "Marquee-select shapes");
                help_row(ui, "Drag a handle", "Resize the selection");

                ui.add_space(20.0);
                ui.heading("Preview");
                ui.separator();
                ui.label("Preview runs the hotbox like the host would show it:");
                ui.label("• Hover highlights shapes, press latches a click");
                ui.label("• Left/right release triggers the matching action slot");
                ui.label("• Shapes with a 'close' action slot dismiss the preview");
                ui.label("• Escape always leaves preview");

                ui.add_space(20.0);
                ui.heading("File Formats");
                ui.separator();
                ui.label("• The library is one JSON file of hotboxes");
                ui.label("• Import/export moves single hotboxes between libraries");
                ui.label("• Settings are stored in settings.toml");

                ui.add_space(20.0);
                ui.heading("Tips");
                ui.separator();
                ui.label("• Use the right panel to edit the selected shape's options");
                ui.label("• With nothing selected the right panel edits the hotbox itself");
                ui.label("• Action slots hold the script the host runs on click");
            });
        });
}

fn help_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [110.0, 16.0],
            egui::Label::new(egui::RichText::new(shortcut).monospace().strong()),
        );
        ui.label(description);
    });
}
