//! Frame rendering: pure composition into styled lines, plus the crossterm
//! output driver.
//!
//! `page_frame` and `splash_frame` are pure functions from state to a list of
//! [`Line`]s, so every visual rule (opacity mapping, offset shifting, the
//! notification strip) is assertable in tests. The [`Driver`] only moves the
//! cursor, applies attributes, and prints.

use std::collections::HashMap;
use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::anim::StyleProps;
use crate::form::{FormController, FormStatus};
use crate::geometry::Size;
use crate::notify::{Notification, NotifyLevel};
use crate::page::SectionId;
use crate::preloader::Preloader;
use crate::view::View;

// ---------------------------------------------------------------------------
// Line / Intensity
// ---------------------------------------------------------------------------

/// How strongly a line is drawn. Entrance opacity quantizes to these levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    /// Not drawn at all.
    Hidden,
    /// Drawn with the terminal's dim attribute.
    Faint,
    /// Drawn normally.
    Normal,
}

impl Intensity {
    /// Quantize an opacity into a drawable intensity.
    pub fn from_opacity(opacity: f32) -> Self {
        if opacity < 0.2 {
            Intensity::Hidden
        } else if opacity < 0.7 {
            Intensity::Faint
        } else {
            Intensity::Normal
        }
    }
}

/// One row of the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub intensity: Intensity,
}

impl Line {
    /// A normal-intensity line.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            intensity: Intensity::Normal,
        }
    }

    /// An empty row.
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            intensity: Intensity::Normal,
        }
    }
}

// ---------------------------------------------------------------------------
// Frame composition
// ---------------------------------------------------------------------------

/// Rows reserved at the top for the title bar.
const HEADER_ROWS: usize = 2;

/// Compose the full frame for a mounted page.
///
/// Layout: title bar, the scrolled content window with entrance styles
/// applied, and the notification strip overlaid on the bottom rows.
pub fn page_frame(
    view: &View,
    styles: &HashMap<SectionId, StyleProps>,
    title: &str,
    notifications: &[Notification],
    size: Size,
) -> Vec<Line> {
    let width = size.width.max(0) as usize;
    let body_rows = (size.height.max(0) as usize).saturating_sub(HEADER_ROWS);

    // Content buffer covering the whole page, blank by default.
    let mut content: Vec<Line> = (0..view.content_height().max(0))
        .map(|_| Line::blank())
        .collect();

    for (id, section) in view.sections() {
        let Some(bounds) = view.section_bounds(id) else {
            continue;
        };
        let style = styles.get(&id).copied().unwrap_or_default();
        let intensity = Intensity::from_opacity(style.opacity);
        if intensity == Intensity::Hidden {
            continue;
        }

        let shift = style.offset_y.round() as i32;
        let indent_cols = ((1.0 - style.scale).max(0.0) * width as f32 / 2.0).round() as usize;
        let indent = " ".repeat(indent_cols);

        let rows = if section.has_class("contact-form") {
            match view.form() {
                Some(form) => form_rows(form, section.rows().len()),
                None => section.rows(),
            }
        } else {
            section.rows()
        };

        for (row_index, row) in rows.iter().enumerate() {
            // Shifted rows that leave the section's slot are clipped.
            let target = bounds.y + row_index as i32 + shift;
            if target < bounds.y || target >= bounds.bottom() {
                continue;
            }
            if let Some(slot) = content.get_mut(target as usize) {
                *slot = Line {
                    text: format!("{indent}{row}"),
                    intensity,
                };
            }
        }
    }

    // Assemble: header + visible window + notification strip.
    let mut frame = Vec::with_capacity(HEADER_ROWS + body_rows);
    frame.push(Line::new(title));
    frame.push(Line::new("═".repeat(width.min(80))));

    let top = view.scroll().offset().max(0) as usize;
    for row in 0..body_rows {
        let line = content.get(top + row).cloned().unwrap_or_else(Line::blank);
        frame.push(line);
    }

    let visible = notifications.iter().rev().take(3).rev();
    for (offset, notification) in visible.enumerate() {
        let marker = match notification.level {
            NotifyLevel::Info => "*",
            NotifyLevel::Error => "!",
        };
        let row = frame.len().saturating_sub(3) + offset;
        if let Some(slot) = frame.get_mut(row) {
            *slot = Line::new(format!(" {marker} {}", notification.text));
        }
    }

    frame
}

/// Project the live form into a section's reserved rows.
///
/// Per field: `Label: value` (with a cursor marker on the focused field) and
/// an inline error row, surfaced only once the field is touched. The last
/// row reflects the submission state.
fn form_rows(form: &FormController, row_budget: usize) -> Vec<String> {
    let mut rows = Vec::with_capacity(row_budget);
    for (index, field) in form.fields().iter().enumerate() {
        let cursor = if index == form.focused() { "_" } else { "" };
        rows.push(format!("{}: {}{cursor}", field.label(), field.value()));
        match field.visible_error() {
            Some(error) => rows.push(format!("  ! {error}")),
            None => rows.push(String::new()),
        }
    }
    rows.push(match form.status() {
        FormStatus::Submitting => "Sending...".to_owned(),
        FormStatus::Idle => "Press Enter to send".to_owned(),
    });
    rows.resize(row_budget, String::new());
    rows
}

/// Compose the splash frame: the preloader overlay centered in the terminal.
pub fn splash_frame(preloader: &Preloader, size: Size) -> Vec<Line> {
    let width = size.width.max(0) as usize;
    let height = size.height.max(0) as usize;
    let overlay = preloader.overlay();
    let rows = overlay.rows();

    let top_pad = height.saturating_sub(rows.len()) / 2;
    let mut frame: Vec<Line> = (0..height).map(|_| Line::blank()).collect();
    for (index, row) in rows.iter().enumerate() {
        if let Some(slot) = frame.get_mut(top_pad + index) {
            *slot = Line::new(center(row, width));
        }
    }
    frame
}

/// Center `text` within `width` columns.
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_owned();
    }
    let pad = (width - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Crossterm terminal backend.
///
/// Wraps a `BufWriter<Stdout>` for batched writes. Does not enter the
/// alternate screen on creation; call `enter_alt_screen` explicitly.
pub struct Driver {
    writer: BufWriter<Stdout>,
}

impl Driver {
    /// Create a driver wrapping stdout.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(io::stdout()),
        })
    }

    /// Enter alternate screen, enable raw mode, hide the cursor.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        execute!(self.writer, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        Ok(())
    }

    /// Restore the terminal: show cursor, leave alternate screen, raw off.
    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.writer, cursor::Show, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Draw a full frame, one line per row.
    pub fn draw(&mut self, frame: &[Line]) -> io::Result<()> {
        for (row, line) in frame.iter().enumerate() {
            queue!(
                self.writer,
                cursor::MoveTo(0, row as u16),
                Clear(ClearType::CurrentLine)
            )?;
            match line.intensity {
                Intensity::Hidden => {}
                Intensity::Faint => {
                    queue!(
                        self.writer,
                        SetAttribute(Attribute::Dim),
                        Print(&line.text),
                        SetAttribute(Attribute::Reset)
                    )?;
                }
                Intensity::Normal => {
                    queue!(self.writer, Print(&line.text))?;
                }
            }
        }
        self.writer.flush()
    }

    /// The terminal size (columns, rows).
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
