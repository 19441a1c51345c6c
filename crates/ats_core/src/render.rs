use crate::AnalysisResult;

pub const NO_FILE_LABEL: &str = "No file chosen";

/// Report markup, kept as structured content and never escaped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportContent(String);

impl ReportContent {
    pub fn markup(&self) -> &str {
        &self.0
    }
}

/// Draft email as literal text. Markup in it is never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmailContent(String);

impl EmailContent {
    pub fn text(&self) -> &str {
        &self.0
    }
}

/// Everything the presentation layer shows. Export actions read the email
/// from here, not from the session's last result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySurfaces {
    pub report: ReportContent,
    pub email: EmailContent,
    pub loading_visible: bool,
    pub results_visible: bool,
    pub file_label: String,
}

impl Default for DisplaySurfaces {
    fn default() -> Self {
        Self {
            report: ReportContent::default(),
            email: EmailContent::default(),
            loading_visible: false,
            results_visible: false,
            file_label: NO_FILE_LABEL.to_string(),
        }
    }
}

impl DisplaySurfaces {
    pub fn report(&self) -> &ReportContent {
        &self.report
    }

    pub fn email(&self) -> &EmailContent {
        &self.email
    }
}

/// Projects a result onto the report and email surfaces. Touches nothing else.
pub fn render(result: &AnalysisResult, surfaces: &mut DisplaySurfaces) {
    surfaces.report = ReportContent(result.report_markup().to_string());
    surfaces.email = EmailContent(result.email_text().to_string());
}
