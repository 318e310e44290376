//! Rendering of a parsed bulletin for the publication side
//!
//! JSON is the machine-readable hand-off; the text and markdown renderers
//! are for reviewing an import before it is published.

use anyhow::Result;
use std::fmt::Write;

use crate::document::*;
use crate::ExportFormat;

pub fn export_bulletin(bulletin: &Bulletin, format: &ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => export_to_json(bulletin),
        ExportFormat::Text => Ok(export_to_text(bulletin)),
        ExportFormat::Markdown => Ok(export_to_markdown(bulletin)),
    }
}

pub fn export_to_json(bulletin: &Bulletin) -> Result<String> {
    Ok(serde_json::to_string_pretty(bulletin)?)
}

fn type_label(message_type: MessageType) -> &'static str {
    match message_type {
        MessageType::Temporary => "(T) ",
        MessageType::Preliminary => "(P) ",
        MessageType::Permanent => "",
    }
}

fn message_heading(message: &Message, lang: Lang) -> String {
    let number = message
        .number
        .map(|n| format!("{n}. "))
        .unwrap_or_default();
    let area = message.area_name(lang).unwrap_or_default();
    let title = message.desc(lang).map(|d| d.title.as_str()).unwrap_or_default();
    format!("{number}{}{area}. {title}", type_label(message.message_type))
}

fn format_position(position: &Position) -> String {
    let mut line = format!("{:.4}, {:.4}", position.latitude, position.longitude);
    if !position.description.is_empty() {
        let _ = write!(line, " {}", position.description);
    }
    line
}

fn format_chart(chart: &ChartRef) -> String {
    match &chart.international_chart_number {
        Some(int) => format!("{} (INT {int})", chart.chart_number),
        None => chart.chart_number.clone(),
    }
}

pub fn export_to_text(bulletin: &Bulletin) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "EfS week {} {} ({} messages, series {})",
        bulletin.week,
        bulletin.year,
        bulletin.messages.len(),
        bulletin.series_id
    );
    output.push_str(&"=".repeat(60));
    output.push('\n');

    for message in &bulletin.messages {
        output.push('\n');
        for desc in &message.descs {
            let _ = writeln!(output, "[{}] {}", desc.lang, message_heading(message, desc.lang));
            if let Some(vicinity) = &desc.vicinity {
                let _ = writeln!(output, "  Vicinity: {vicinity}");
            }
            if let Some(time) = &desc.time {
                let _ = writeln!(output, "  Time: {}", time.replace('\n', "; "));
            }
            if let Some(note) = &desc.note {
                let _ = writeln!(output, "  Note: {note}");
            }
            if let Some(source) = &desc.source {
                let _ = writeln!(output, "  Source: {source}");
            }
        }
        for position in &message.positions {
            let _ = writeln!(output, "  Position: {}", format_position(position));
        }
        if !message.charts.is_empty() {
            let charts: Vec<_> = message.charts.iter().map(format_chart).collect();
            let _ = writeln!(output, "  Charts: {}", charts.join(", "));
        }
        for reference in &message.references {
            let _ = writeln!(
                output,
                "  Reference: {} {:?}",
                reference.target_message_id, reference.reference_type
            );
        }
    }

    output
}

pub fn export_to_markdown(bulletin: &Bulletin) -> String {
    let mut output = format!("# EfS {}/{}\n\n", bulletin.week, bulletin.year);

    for message in &bulletin.messages {
        let _ = writeln!(output, "## {}\n", message_heading(message, Lang::Da));
        if message.original_information {
            output.push_str("*Original information*\n\n");
        }
        for desc in &message.descs {
            if desc.lang != Lang::Da {
                let _ = writeln!(output, "### {}\n", message_heading(message, desc.lang));
            }
            if let Some(time) = &desc.time {
                let _ = writeln!(output, "**Time:** {}\n", time.replace('\n', "  \n"));
            }
            if let Some(description) = &desc.description {
                let _ = writeln!(output, "{description}\n");
            }
            if let Some(note) = &desc.note {
                let _ = writeln!(output, "**Note:** {note}\n");
            }
            if let Some(publication) = &desc.publication {
                let _ = writeln!(output, "**Publication:** {publication}\n");
            }
        }
        if !message.positions.is_empty() {
            for position in &message.positions {
                let _ = writeln!(output, "- {}", format_position(position));
            }
            output.push('\n');
        }
        if !message.charts.is_empty() {
            let charts: Vec<_> = message.charts.iter().map(format_chart).collect();
            let _ = writeln!(output, "**Charts:** {}\n", charts.join(", "));
        }
    }

    output
}
