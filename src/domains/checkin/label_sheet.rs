//! Printable label-sheet generation.

/// Layout options for a printable sheet of guest labels.
#[derive(Debug, Clone)]
pub struct LabelSheetOptions {
    /// Grid column count (labels per row).
    pub columns: u32,
    /// Rendered label size in pixels.
    pub label_size: u32,
    pub show_guest_name: bool,
    pub show_table_number: bool,
}

impl Default for LabelSheetOptions {
    fn default() -> Self {
        Self {
            columns: 3,
            label_size: 150,
            show_guest_name: true,
            show_table_number: true,
        }
    }
}

/// One cell of the sheet; name/table are pre-filtered by the layout flags.
#[derive(Debug, Clone)]
pub struct LabelCell {
    pub data_url: String,
    pub guest_name: Option<String>,
    pub table_number: Option<String>,
}

/// Emits a self-contained printable HTML document with one grid cell per
/// successfully generated label. No external stylesheet; the dashed cell
/// guides disappear under `@media print`.
pub fn render_sheet(cells: &[LabelCell], options: &LabelSheetOptions) -> String {
    let mut cells_html = String::new();
    for cell in cells {
        cells_html.push_str(&render_cell(cell));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Guest Check-In Labels</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 16px;
            background: white;
        }}
        .label-grid {{
            display: grid;
            grid-template-columns: repeat({columns}, 1fr);
            gap: 12px;
        }}
        .label-cell {{
            border: 1px dashed #999;
            border-radius: 4px;
            padding: 10px;
            text-align: center;
            page-break-inside: avoid;
        }}
        .label-cell img {{
            width: {size}px;
            height: {size}px;
        }}
        .guest-name {{
            font-size: 13px;
            font-weight: bold;
            margin-top: 6px;
        }}
        .table-number {{
            font-size: 11px;
            color: #555;
            margin-top: 2px;
        }}
        @media print {{
            body {{ padding: 0; }}
            .label-cell {{ border: none; }}
        }}
    </style>
</head>
<body>
    <div class="label-grid">
{cells_html}    </div>
</body>
</html>
"#,
        columns = options.columns,
        size = options.label_size,
        cells_html = cells_html,
    )
}

fn render_cell(cell: &LabelCell) -> String {
    let mut inner = format!(
        "            <img src=\"{}\" alt=\"check-in QR\">\n",
        cell.data_url
    );
    if let Some(name) = &cell.guest_name {
        inner.push_str(&format!(
            "            <div class=\"guest-name\">{}</div>\n",
            escape_html(name)
        ));
    }
    if let Some(table) = &cell.table_number {
        inner.push_str(&format!(
            "            <div class=\"table-number\">Table {}</div>\n",
            escape_html(table)
        ));
    }
    format!("        <div class=\"label-cell\">\n{inner}        </div>\n")
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(name: &str) -> LabelCell {
        LabelCell {
            data_url: "data:image/png;base64,AAAA".to_string(),
            guest_name: Some(name.to_string()),
            table_number: Some("5".to_string()),
        }
    }

    #[test]
    fn one_cell_per_label() {
        let html = render_sheet(&[cell("Ana"), cell("Luis")], &LabelSheetOptions::default());
        assert_eq!(html.matches("label-cell\">").count(), 2);
        assert!(html.contains("repeat(3, 1fr)"));
        assert!(html.contains("@media print"));
    }

    #[test]
    fn empty_batch_renders_empty_grid() {
        let html = render_sheet(&[], &LabelSheetOptions::default());
        assert_eq!(html.matches("label-cell\">").count(), 0);
        assert!(html.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn guest_names_are_escaped() {
        let html = render_sheet(
            &[cell("<Ana & \"Luis\">")],
            &LabelSheetOptions::default(),
        );
        assert!(html.contains("&lt;Ana &amp; &quot;Luis&quot;&gt;"));
        assert!(!html.contains("<Ana"));
    }

    #[test]
    fn layout_flags_drop_text_lines() {
        let bare = LabelCell {
            data_url: "data:image/png;base64,AAAA".to_string(),
            guest_name: None,
            table_number: None,
        };
        let html = render_sheet(&[bare], &LabelSheetOptions::default());
        assert!(!html.contains("class=\"guest-name\""));
        assert!(!html.contains("class=\"table-number\""));
    }
}
