use std::collections::HashSet;
use std::io::{self, Write};

use ats_core::{AppViewModel, NotificationId, NotificationStage, NotificationView, Phase};
use ats_engine::ReportConverter;

use super::constants::*;

/// Prints the view to a text stream. Only changes are printed: each
/// notification once, the first time it is past its entering stage, the
/// loading line when loading starts, the file label when it changes.
pub struct TerminalRenderer<W: Write> {
    out: W,
    converter: Box<dyn ReportConverter>,
    color: bool,
    shown: HashSet<NotificationId>,
    was_loading: bool,
    last_label: Option<String>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, converter: Box<dyn ReportConverter>, color: bool) -> Self {
        Self {
            out,
            converter,
            color,
            shown: HashSet::new(),
            was_loading: false,
            last_label: None,
        }
    }

    pub fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        if self.last_label.as_deref() != Some(view.file_label.as_str()) {
            if self.last_label.is_some() {
                writeln!(self.out, "Resume: {}", view.file_label)?;
            }
            self.last_label = Some(view.file_label.clone());
        }

        if view.loading_visible && !self.was_loading {
            writeln!(self.out, "{LOADING_TEXT}")?;
        }
        self.was_loading = view.loading_visible;

        for notification in &view.notifications {
            if notification.stage != NotificationStage::Entering
                && self.shown.insert(notification.id)
            {
                self.write_notification(notification)?;
            }
        }
        self.shown
            .retain(|id| view.notifications.iter().any(|n| n.id == *id));

        self.out.flush()
    }

    pub fn reveal_results(&mut self, view: &AppViewModel) -> io::Result<()> {
        writeln!(self.out, "\n{REPORT_HEADING}")?;
        writeln!(self.out, "{}", self.converter.to_text(&view.report_markup))?;
        writeln!(self.out, "\n{EMAIL_HEADING}")?;
        // Literal text, printed exactly as received.
        writeln!(self.out, "{}", view.email_text)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn show(&mut self, view: &AppViewModel) -> io::Result<()> {
        let phase = match view.phase {
            Phase::Idle => "Idle",
            Phase::Pending => "Analyzing",
            Phase::Succeeded => "Done",
            Phase::Failed => "Failed",
        };
        writeln!(
            self.out,
            "Resume: {} | Status: {} | Requests in flight: {}",
            view.file_label, phase, view.in_flight
        )?;
        if view.results_visible {
            self.reveal_results(view)?;
        }
        self.out.flush()
    }

    pub fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "{HELP_TEXT}")?;
        self.out.flush()
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }

    fn write_notification(&mut self, notification: &NotificationView) -> io::Result<()> {
        let style = style_for(notification.severity);
        if self.color {
            writeln!(
                self.out,
                "\x1b[{}m{} {}\x1b[0m: {}",
                style.color, style.icon, style.label, notification.message
            )
        } else {
            writeln!(
                self.out,
                "{} {}: {}",
                style.icon, style.label, notification.message
            )
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
