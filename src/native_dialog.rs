//! Native file chooser and message boxes for the save flow

use std::path::{Path, PathBuf};

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::error::ExportError;
use crate::writer::{OverwriteChoice, SaveDialog};

/// [`SaveDialog`] backed by the platform's file chooser
#[derive(Debug, Clone, Default)]
pub struct NativeDialog {
    file_name: Option<String>,
}

impl NativeDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// File name suggested when the chooser opens
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }
}

impl SaveDialog for NativeDialog {
    fn choose_path(&mut self) -> Option<PathBuf> {
        let mut dialog = FileDialog::new().add_filter("SVG", &["svg"]);
        if let Some(name) = &self.file_name {
            dialog = dialog.set_file_name(name.as_str());
        }
        dialog.save_file()
    }

    fn confirm_overwrite(&mut self, path: &Path) -> OverwriteChoice {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Confirm overwrite")
            .set_description(format!("{} already exists. Overwrite?", path.display()))
            .set_buttons(MessageButtons::YesNoCancel)
            .show();
        overwrite_choice(result)
    }

    fn report_error(&mut self, path: &Path, error: &ExportError) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title("Error")
            .set_description(format!("Could not write {}: {}", path.display(), error))
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

fn overwrite_choice(result: MessageDialogResult) -> OverwriteChoice {
    match result {
        MessageDialogResult::Yes => OverwriteChoice::Overwrite,
        MessageDialogResult::No => OverwriteChoice::ChooseAnother,
        _ => OverwriteChoice::Cancel,
    }
}
