use ats_core::Severity;

/// Fixed visual treatment for one notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastStyle {
    pub icon: &'static str,
    pub label: &'static str,
    /// ANSI SGR color code.
    pub color: &'static str,
}

pub const INFO_STYLE: ToastStyle = ToastStyle {
    icon: "!",
    label: "info",
    color: "36",
};
pub const SUCCESS_STYLE: ToastStyle = ToastStyle {
    icon: "✔",
    label: "success",
    color: "32",
};
pub const ERROR_STYLE: ToastStyle = ToastStyle {
    icon: "!",
    label: "error",
    color: "31",
};

pub fn style_for(severity: Severity) -> &'static ToastStyle {
    match severity {
        Severity::Info => &INFO_STYLE,
        Severity::Success => &SUCCESS_STYLE,
        Severity::Error => &ERROR_STYLE,
    }
}

pub const PROMPT: &str = "ats> ";
pub const LOADING_TEXT: &str = "Analyzing resume against the job posting...";
pub const REPORT_HEADING: &str = "=== Analysis ===";
pub const EMAIL_HEADING: &str = "=== Application email ===";

pub const HELP_TEXT: &str = "\
Commands:
  open <path>      pick a resume (PDF); `open` alone clears the selection
  analyze <url>    send the resume and job posting link for analysis
  copy             copy the email draft to the clipboard (on Linux without a
                   clipboard manager it lasts only while the client runs)
  save             save the email draft as job_application_email.txt
  show             print the current status and results
  help             show this text
  quit             exit";
