//! Fixed-layout SVG rendering of a report snapshot.

use std::fmt::Write;

use thiserror::Error;

use super::ReportSnapshot;

const WIDTH: u32 = 800;
const MARGIN: u32 = 48;
const LINE_HEIGHT: u32 = 24;
const SECTION_GAP: u32 = 20;
const WRAP_COLUMNS: usize = 56;

const NO_ENTRY: &str = "No entry";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("the report is only available once the session reaches the report step")]
    NotReady,

    #[error("failed to render report: {0}")]
    Render(#[from] std::fmt::Error),
}

/// File name offered for the download.
pub fn export_file_name(job: &str) -> String {
    let sanitized: String = job
        .trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect();
    let sanitized = if sanitized.is_empty() {
        "untitled".to_string()
    } else {
        sanitized
    };
    format!("FutureCareerAI_Report_{sanitized}.svg")
}

pub fn render_svg(report: &ReportSnapshot) -> Result<String, ExportError> {
    let mut sections: Vec<(&str, Vec<String>)> = Vec::new();

    sections.push(("My future job", wrap(or_placeholder(&report.job))));
    sections.push((
        "How my major connects",
        wrap(or_placeholder(&report.connection_thought)),
    ));

    let material_lines = match &report.material {
        Some(m) => {
            let mut lines = wrap(&m.title);
            lines.push(format!(
                "Stage: {}",
                m.stage_label.as_deref().unwrap_or(&m.stage_id)
            ));
            lines
        }
        None => vec![NO_ENTRY.to_string()],
    };
    sections.push(("Material explored", material_lines));

    let esg = &report.esg_thoughts;
    sections.push(("Environment", wrap(or_placeholder(&esg.environment))));
    sections.push(("Social", wrap(or_placeholder(&esg.social))));
    sections.push(("Economic", wrap(or_placeholder(&esg.economic))));
    sections.push(("AI mentor feedback", wrap(&report.mentoring_summary)));

    let body_lines: u32 = sections
        .iter()
        .map(|(_, lines)| lines.len() as u32 + 1)
        .sum();
    let header = 110;
    let height = header + body_lines * LINE_HEIGHT + sections.len() as u32 * SECTION_GAP + MARGIN;

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}">"#
    )?;
    writeln!(svg, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    writeln!(
        svg,
        r##"<rect x="0" y="0" width="{WIDTH}" height="80" fill="#1e3a8a"/>"##
    )?;
    writeln!(
        svg,
        r##"<text x="{MARGIN}" y="50" font-family="sans-serif" font-size="28" font-weight="bold" fill="#ffffff">Future Career AI Report</text>"##
    )?;
    writeln!(
        svg,
        r##"<text x="{}" y="50" font-family="sans-serif" font-size="14" fill="#c7d2fe" text-anchor="end">{}</text>"##,
        WIDTH - MARGIN,
        report.generated_on.format("%Y-%m-%d")
    )?;

    let mut y = header;
    for (heading, lines) in &sections {
        writeln!(
            svg,
            r##"<text x="{MARGIN}" y="{y}" font-family="sans-serif" font-size="16" font-weight="bold" fill="#1e3a8a">{}</text>"##,
            escape(heading)
        )?;
        y += LINE_HEIGHT;
        for line in lines {
            writeln!(
                svg,
                r##"<text x="{MARGIN}" y="{y}" font-family="sans-serif" font-size="14" fill="#111827">{}</text>"##,
                escape(line)
            )?;
            y += LINE_HEIGHT;
        }
        y += SECTION_GAP;
    }
    writeln!(svg, "</svg>")?;

    Ok(svg)
}

fn or_placeholder(text: &str) -> &str {
    if text.trim().is_empty() {
        NO_ENTRY
    } else {
        text
    }
}

/// Greedy word wrap on character count. Words longer than a line are split.
fn wrap(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > WRAP_COLUMNS {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(WRAP_COLUMNS);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
            if needed > WRAP_COLUMNS && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
