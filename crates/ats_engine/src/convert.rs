/// Turns report markup into something a text terminal can show.
pub trait ReportConverter: Send + Sync {
    fn to_text(&self, markup: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl ReportConverter for Html2MdConverter {
    fn to_text(&self, markup: &str) -> String {
        html2md::parse_html(markup).trim().to_string()
    }
}
