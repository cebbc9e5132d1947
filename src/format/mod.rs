//! Output formatting for listings (table, JSON, markdown, CSV).

use crate::carsbg::models::{Listing, SearchReport};
use crate::config::OutputFormat;

/// Formats listings and search summaries for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats multiple listings.
    pub fn format_listings(&self, listings: &[Listing]) -> String {
        if listings.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No cars found matching your criteria.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_listings(listings),
            OutputFormat::Table => self.table_listings(listings),
            OutputFormat::Markdown => self.markdown_listings(listings),
            OutputFormat::Csv => self.csv_listings(listings),
        }
    }

    /// Formats a search report, printing at most `max_results` listings.
    ///
    /// JSON output is the whole report so page outcomes stay machine-readable.
    pub fn format_report(&self, report: &SearchReport, max_results: usize) -> String {
        if self.format == OutputFormat::Json {
            return serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
        }

        let shown = &report.listings[..report.count().min(max_results)];
        let listings = self.format_listings(shown);

        if self.format == OutputFormat::Csv {
            return listings;
        }

        let mut sections = Vec::new();
        if !report.is_empty() {
            sections.push(summary_line(report.count(), shown.len()));
        }
        sections.push(listings);
        sections.push(page_report_line(report));
        sections.join("\n\n")
    }

    // JSON formatting

    fn json_listings(&self, listings: &[Listing]) -> String {
        serde_json::to_string_pretty(listings).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_listings(&self, listings: &[Listing]) -> String {
        let id_width = 12;
        let price_width = 16;
        let title_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:>price_width$}  {:<title_width$}  {}",
            "ID", "Price", "Title", "Link"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<price_width$}  {:-<title_width$}  {:-<4}",
            "", "", "", ""
        ));

        for listing in listings {
            lines.push(format!(
                "{:<id_width$}  {:>price_width$}  {:<title_width$}  {}",
                listing.id,
                listing.price,
                truncate(&listing.title, title_width),
                listing.link
            ));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_listings(&self, listings: &[Listing]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Price | Title |".to_string());
        lines.push("|----|-------|-------|".to_string());

        for listing in listings {
            let title = truncate(&listing.title, 40);
            let title = if listing.link.is_empty() {
                title
            } else {
                format!("[{}]({})", title, listing.link)
            };

            lines.push(format!("| {} | {} | {} |", listing.id, listing.price, title));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "id,title,price,link,image_url".to_string()
    }

    fn csv_listings(&self, listings: &[Listing]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for listing in listings {
            lines.push(format!(
                "{},{},{},{},{}",
                Self::csv_escape(&listing.id),
                Self::csv_escape(&listing.title),
                Self::csv_escape(&listing.price),
                Self::csv_escape(&listing.link),
                Self::csv_escape(&listing.image_url)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

fn summary_line(total: usize, shown: usize) -> String {
    let mut line = format!("Found {} car(s)", total);
    if total > shown {
        line.push_str(&format!(" (showing first {})", shown));
    }
    line
}

fn page_report_line(report: &SearchReport) -> String {
    let mut line = format!(
        "Pages: attempted {}, succeeded {}, failed {}",
        report.attempted_pages(),
        report.succeeded_pages(),
        report.failed_pages()
    );
    if report.cancelled {
        line.push_str(" (cancelled)");
    }
    line
}

/// Truncates on character boundaries; titles are often Cyrillic.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
