//! Writing drawing sessions to byte sinks and files
//!
//! [`save`] drives the interactive flow: ask for a target, enforce the
//! `.svg` suffix, confirm overwrites and report failures. The prompting is
//! behind [`SaveDialog`] so the flow runs the same in a terminal and in
//! tests.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::ExportError;
use crate::graphics::SvgGraphics;

const SVG_SUFFIX: &str = ".svg";

/// Write a session as UTF-8 SVG using its configured styling mode
pub fn write<W: Write + ?Sized>(graphics: &SvgGraphics, sink: &mut W) -> Result<(), ExportError> {
    graphics.stream(sink, graphics.config().svg.use_css)
}

/// Write a session to a file, replacing any existing content
pub fn write_to_file(graphics: &SvgGraphics, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut sink = BufWriter::new(file);
    write(graphics, &mut sink)?;
    sink.flush()?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Append `.svg` unless the file name already ends with it, ignoring case
pub fn ensure_svg_suffix(path: PathBuf) -> PathBuf {
    let Some(name) = path.file_name() else {
        return path.join(SVG_SUFFIX);
    };
    if name
        .to_str()
        .is_some_and(|n| n.to_ascii_lowercase().ends_with(SVG_SUFFIX))
    {
        return path;
    }
    let mut name = name.to_os_string();
    name.push(SVG_SUFFIX);
    path.with_file_name(name)
}

/// Answer to "the target file exists"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteChoice {
    Overwrite,
    /// Pick a different file through a fresh prompt
    ChooseAnother,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
    /// Writing failed; the error was passed to [`SaveDialog::report_error`]
    Failed(PathBuf),
}

/// User interaction needed by [`save`]
pub trait SaveDialog {
    /// Ask for a target path; `None` cancels the save
    fn choose_path(&mut self) -> Option<PathBuf>;

    fn confirm_overwrite(&mut self, path: &Path) -> OverwriteChoice;

    fn report_error(&mut self, path: &Path, error: &ExportError);
}

/// Save a session to a file chosen through `dialog`.
///
/// `initial` is used as the first target instead of prompting.
pub fn save(
    graphics: &SvgGraphics,
    dialog: &mut impl SaveDialog,
    initial: Option<PathBuf>,
) -> SaveOutcome {
    let mut next = initial;
    loop {
        let chosen = match next.take() {
            Some(path) => path,
            None => match dialog.choose_path() {
                Some(path) => path,
                None => return SaveOutcome::Cancelled,
            },
        };
        let path = ensure_svg_suffix(chosen);

        if path.exists() {
            match dialog.confirm_overwrite(&path) {
                OverwriteChoice::Overwrite => {}
                OverwriteChoice::ChooseAnother => continue,
                OverwriteChoice::Cancel => return SaveOutcome::Cancelled,
            }
        }

        return match write_to_file(graphics, &path) {
            Ok(()) => SaveOutcome::Saved(path),
            Err(e) => {
                warn!("failed to save {}: {}", path.display(), e);
                dialog.report_error(&path, &e);
                SaveOutcome::Failed(path)
            }
        };
    }
}

/// Line-based dialog on a terminal or any reader/writer pair
pub struct ConsoleDialog<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleDialog<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> Option<String> {
        // Prompt output is best effort; the answer is what matters
        let _ = write!(self.output, "{}", prompt);
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl<R: BufRead, W: Write> SaveDialog for ConsoleDialog<R, W> {
    fn choose_path(&mut self) -> Option<PathBuf> {
        self.ask("Save SVG as: ")
            .filter(|answer| !answer.is_empty())
            .map(PathBuf::from)
    }

    fn confirm_overwrite(&mut self, path: &Path) -> OverwriteChoice {
        let prompt = format!(
            "{} already exists. Overwrite? [y]es/[n]o/[c]ancel: ",
            path.display()
        );
        loop {
            let Some(answer) = self.ask(&prompt) else {
                return OverwriteChoice::Cancel;
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return OverwriteChoice::Overwrite,
                "n" | "no" => return OverwriteChoice::ChooseAnother,
                "c" | "cancel" => return OverwriteChoice::Cancel,
                _ => {}
            }
        }
    }

    fn report_error(&mut self, path: &Path, error: &ExportError) {
        let _ = writeln!(self.output, "Could not write {}: {}", path.display(), error);
    }
}
