use std::path::Path;

use anyhow::{Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerIndex, PdfLayerReference, PdfPageIndex, Point, Polygon, Rgb,
};

use crate::models::{Risk, Severity};
use crate::scoring::score::{classify, compute_score};
use crate::scoring::stats::{aggregate, matrix_counts};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;
const COVER_HDR_H: f32 = 72.0; // gradient header height on cover page

// ── Colour palette ────────────────────────────────────────────────────────────
const BG:           (f32, f32, f32) = (1.00, 1.00, 1.00);
const PANEL:        (f32, f32, f32) = (1.00, 1.00, 1.00);
const PANEL_ALT:    (f32, f32, f32) = (0.95, 0.97, 0.99); // subtle alternating tint
const PANEL_BORDER: (f32, f32, f32) = (0.85, 0.88, 0.92);
const ACCENT_BLU:   (f32, f32, f32) = (0.16, 0.44, 0.92); // dashboard blue
const ACCENT_CYN:   (f32, f32, f32) = (0.08, 0.66, 0.82); // dashboard cyan
const TEXT_PRI:     (f32, f32, f32) = (0.07, 0.08, 0.14);
const TEXT_SEC:     (f32, f32, f32) = (0.36, 0.40, 0.52);
const TEXT_MUT:     (f32, f32, f32) = (0.58, 0.63, 0.72);
const WHITE:        (f32, f32, f32) = (1.00, 1.00, 1.00);
const WHITE_DIM:    (f32, f32, f32) = (0.82, 0.93, 1.00);

// Pastel badge colours per severity band
const LOW_BG:  (f32, f32, f32) = (0.90, 0.98, 0.92);
const LOW_FG:  (f32, f32, f32) = (0.07, 0.52, 0.22);
const MED_BG:  (f32, f32, f32) = (1.00, 0.96, 0.84);
const MED_FG:  (f32, f32, f32) = (0.72, 0.52, 0.02);
const HIGH_BG: (f32, f32, f32) = (1.00, 0.93, 0.86);
const HIGH_FG: (f32, f32, f32) = (0.82, 0.41, 0.05);
const CRIT_BG: (f32, f32, f32) = (1.00, 0.91, 0.91);
const CRIT_FG: (f32, f32, f32) = (0.76, 0.09, 0.13);

// Saturated matrix cell colours
const CELL_LOW:  (f32, f32, f32) = (0.33, 0.72, 0.42);
const CELL_MED:  (f32, f32, f32) = (0.96, 0.78, 0.22);
const CELL_HIGH: (f32, f32, f32) = (0.95, 0.55, 0.16);
const CELL_CRIT: (f32, f32, f32) = (0.84, 0.21, 0.21);

// Corner radius constants
const R_PANEL: f32 = 2.5;
const R_BADGE: f32 = 1.5;

// ── Severity summary table layout ─────────────────────────────────────────────
const C1_X: f32 = MARGIN;
const C2_X: f32 = MARGIN + 44.0;
const C3_X: f32 = MARGIN + 118.0;
const T_END: f32 = PAGE_W - MARGIN;

const HDR_H: f32 = 9.0;
const LINE_H: f32 = 4.8;
const ROW_PAD: f32 = 4.5;

const BADGE_W: f32 = 37.0;
const BADGE_H: f32 = 6.5;
const DOT_SIZE: f32 = 2.5;

const DESC_WRAP: usize = 36;
const CODES_WRAP: usize = 28;
const CODES_MAX_LINES: usize = 4;

fn severity_badge_colors(severity: Severity) -> ((f32, f32, f32), (f32, f32, f32)) {
    match severity {
        Severity::Low => (LOW_BG, LOW_FG),
        Severity::Medium => (MED_BG, MED_FG),
        Severity::High => (HIGH_BG, HIGH_FG),
        Severity::Critical => (CRIT_BG, CRIT_FG),
    }
}

fn matrix_cell_color(severity: Severity) -> (f32, f32, f32) {
    match severity {
        Severity::Low => CELL_LOW,
        Severity::Medium => CELL_MED,
        Severity::High => CELL_HIGH,
        Severity::Critical => CELL_CRIT,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render a PDF report: cover page → severity summary → matrix → full risk table.
pub fn render(risks: &[Risk], register_label: &str, output_path: &Path) -> Result<()> {
    let doc = PdfDocument::empty("Risk Register Report");

    add_cover_page(&doc, risks, register_label)?;
    add_severity_summary_page(&doc, risks)?;
    add_matrix_page(&doc, risks)?;
    add_table_pages(&doc, risks)?;

    let bytes = doc.save_to_bytes()?;
    std::fs::write(output_path, &bytes)
        .with_context(|| format!("Failed to write PDF to {}", output_path.display()))?;

    println!("PDF report written to: {}", output_path.display());
    Ok(())
}

// ── Cover page ────────────────────────────────────────────────────────────────

fn add_cover_page(
    doc: &PdfDocumentReference,
    risks: &[Risk],
    register_label: &str,
) -> Result<()> {
    let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Cover");
    let layer = doc.get_page(page_idx).get_layer(layer_idx);

    let font_b = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let font_r = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    let stats = aggregate(risks);

    // Background + gradient header
    fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
    let hdr_bot = PAGE_H - COVER_HDR_H;
    fill_gradient_h(&layer, 0.0, hdr_bot, PAGE_W, COVER_HDR_H, ACCENT_BLU, ACCENT_CYN, 28);

    set_color(&layer, WHITE_DIM);
    layer.use_text(
        format!("risk-registr v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(PAGE_W - MARGIN - 44.0), Mm(PAGE_H - 10.5), &font_r,
    );

    set_color(&layer, WHITE);
    layer.use_text("Cybersecurity Risk", 28.0, Mm(MARGIN), Mm(PAGE_H - 26.0), &font_b);
    set_color(&layer, WHITE_DIM);
    layer.use_text("Register Report", 28.0, Mm(MARGIN), Mm(PAGE_H - 41.0), &font_b);

    // Register chip
    let chip_y = hdr_bot - 18.0;
    let chip_h = 12.0f32;
    let chip_w = 106.0f32;
    fill_rounded_rect(&layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL);
    stroke_rounded_rect(&layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL_BORDER);
    fill_rect(&layer, MARGIN, chip_y, 2.5, chip_h, ACCENT_BLU);

    set_color(&layer, TEXT_MUT);
    layer.use_text("REGISTER", 6.0, Mm(MARGIN + 5.0), Mm(chip_y + chip_h - 3.8), &font_b);
    set_color(&layer, TEXT_PRI);
    layer.use_text(
        truncate(register_label, 34),
        9.5, Mm(MARGIN + 5.0), Mm(chip_y + 2.8), &font_b,
    );

    // Generation date
    set_color(&layer, TEXT_SEC);
    layer.use_text(
        format!("Generated  {}", today()),
        9.0, Mm(MARGIN), Mm(chip_y - 8.0), &font_r,
    );

    // Divider + OVERVIEW
    let rule_y = chip_y - 16.5;
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, rule_y, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text("OVERVIEW", 6.5, Mm(MARGIN), Mm(rule_y - 7.0), &font_b);

    // Stat cards (4 in a row)
    let card_y  = rule_y - 42.0;
    let card_h  = 26.0f32;
    let gap     = 4.0f32;
    let total_w = T_END - MARGIN;
    let card_w  = (total_w - gap * 3.0) / 4.0;

    let cards: [(&str, String, (f32, f32, f32)); 4] = [
        ("TOTAL RISKS", stats.total_risks.to_string(),         ACCENT_BLU),
        ("CRITICAL",    stats.critical_risks.to_string(),      CRIT_FG),
        ("HIGH",        stats.high_risks.to_string(),          HIGH_FG),
        ("AVG SCORE",   format!("{}", stats.average_risk_score), ACCENT_CYN),
    ];

    for (i, (label, value, accent)) in cards.iter().enumerate() {
        let cx = MARGIN + (card_w + gap) * i as f32;
        draw_stat_card(&layer, cx, card_y, card_w, card_h, label, value, *accent,
                       &font_r, &font_b);
    }

    // "What's in this report" section
    let section_y = card_y - 13.0;
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, section_y, PANEL_BORDER);
    set_color(&layer, TEXT_MUT);
    layer.use_text("WHAT'S IN THIS REPORT", 6.5, Mm(MARGIN), Mm(section_y - 7.5), &font_b);

    let items = [
        ("Severity Summary", "Registered risks grouped by severity band"),
        ("Risk Matrix",      "Probability × impact grid with risk distribution"),
        ("All Risks",        "Full register with scores and severity"),
    ];
    for (j, (title, desc)) in items.iter().enumerate() {
        let iy = section_y - 15.0 - j as f32 * 10.0;
        fill_rounded_rect(&layer, MARGIN, iy + 2.0, 2.0, 2.0, 1.0, ACCENT_BLU);
        set_color(&layer, TEXT_PRI);
        layer.use_text(*title, 8.5, Mm(MARGIN + 5.0), Mm(iy + 2.0), &font_b);
        set_color(&layer, TEXT_SEC);
        layer.use_text(*desc, 8.0, Mm(MARGIN + 5.0), Mm(iy - 3.5), &font_r);
    }

    add_footer(&layer, &font_r);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_stat_card(
    layer: &PdfLayerReference,
    x: f32, y: f32, w: f32, h: f32,
    label: &str,
    value: &str,
    accent: (f32, f32, f32),
    font_r: &IndirectFontRef,
    font_b: &IndirectFontRef,
) {
    fill_rounded_rect(layer, x, y, w, h, R_BADGE, PANEL);
    stroke_rounded_rect(layer, x, y, w, h, R_BADGE, PANEL_BORDER);

    // Thin accent top strip
    fill_rect(layer, x, y + h - 2.0, w, 2.0, accent);

    set_color(layer, accent);
    layer.use_text(value, 20.0, Mm(x + 5.0), Mm(y + h * 0.38), font_b);

    set_color(layer, TEXT_MUT);
    layer.use_text(label, 6.5, Mm(x + 5.0), Mm(y + 3.5), font_r);
}

// ── Severity summary page ─────────────────────────────────────────────────────

struct RowDef {
    severity: Severity,
    description: &'static str,
}

struct RenderedRow {
    name: &'static str,
    bg: (f32, f32, f32),
    fg: (f32, f32, f32),
    desc_lines: Vec<String>,
    code_lines: Vec<String>,
    height: f32,
}

fn add_severity_summary_page(doc: &PdfDocumentReference, risks: &[Risk]) -> Result<()> {
    let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Severity Summary");
    let layer = doc.get_page(page_idx).get_layer(layer_idx);

    let font_b = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let font_r = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
    fill_gradient_h(&layer, 0.0, PAGE_H - 2.5, PAGE_W, 2.5, ACCENT_BLU, ACCENT_CYN, 21);

    let defs = [
        RowDef {
            severity: Severity::Critical,
            description: "Scores 21-25. Immediate action required; escalate to leadership.",
        },
        RowDef {
            severity: Severity::High,
            description: "Scores 16-20. High priority; mitigation work should be scheduled now.",
        },
        RowDef {
            severity: Severity::Medium,
            description: "Scores 6-15. Monitor closely and review mitigations each cycle.",
        },
        RowDef {
            severity: Severity::Low,
            description: "Scores 1-5. Acceptable risk; no action needed beyond routine review.",
        },
    ];

    let rows: Vec<RenderedRow> = defs.iter().map(|d| {
        let codes: Vec<String> = risks.iter()
            .filter(|risk| risk.severity == d.severity)
            .map(|risk| risk.code.clone())
            .collect();
        let desc_lines = wrap_text(d.description, DESC_WRAP);
        // All codes listed first (capped to CODES_MAX_LINES), count line at the bottom
        let code_lines = {
            let mut lines = format_code_count_list(&codes, CODES_WRAP);
            if lines.len() > CODES_MAX_LINES {
                let count_line = lines.last().cloned().unwrap_or_default();
                lines.truncate(CODES_MAX_LINES - 1);
                lines.push(count_line);
            }
            lines
        };
        let n = desc_lines.len().max(code_lines.len()).max(2) as f32;
        let (bg, fg) = severity_badge_colors(d.severity);
        RenderedRow {
            name: d.severity.label(), bg, fg, desc_lines, code_lines,
            height: n * LINE_H + ROW_PAD * 2.0,
        }
    }).collect();

    const TABLE_TOP: f32 = 258.0;
    let total_h = HDR_H + rows.iter().map(|r| r.height).sum::<f32>();
    let table_bot = TABLE_TOP - total_h;
    let table_w = T_END - C1_X;

    // Page header
    set_color(&layer, TEXT_PRI);
    layer.use_text("Severity Summary", 20.0, Mm(MARGIN), Mm(278.5), &font_b);
    set_color(&layer, TEXT_SEC);
    layer.use_text(
        "All registered risks grouped by severity band",
        9.0, Mm(MARGIN), Mm(271.5), &font_r,
    );
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, 267.5, PANEL_BORDER);

    // Table panel background
    fill_rounded_rect(&layer, C1_X, table_bot, table_w, total_h, R_PANEL, PANEL);
    stroke_rounded_rect(&layer, C1_X, table_bot, table_w, total_h, R_PANEL, PANEL_BORDER);

    // Header row labels + bottom separator
    set_color(&layer, TEXT_SEC);
    layer.use_text("SEVERITY",      7.0, Mm(C1_X + 4.0), Mm(TABLE_TOP - 6.2), &font_b);
    layer.use_text("WHAT IT MEANS", 7.0, Mm(C2_X + 2.0), Mm(TABLE_TOP - 6.2), &font_b);
    layer.use_text("RISKS",         7.0, Mm(C3_X + 2.0), Mm(TABLE_TOP - 6.2), &font_b);
    draw_hline(&layer, C1_X + R_PANEL, T_END - R_PANEL, TABLE_TOP - HDR_H, PANEL_BORDER);

    // Data rows
    let mut y_top = TABLE_TOP - HDR_H;

    for (i, row) in rows.iter().enumerate() {
        let y_bot = y_top - row.height;

        if i % 2 == 1 {
            fill_rect(&layer, C1_X, y_bot, table_w, row.height, PANEL_ALT);
        }

        // Severity badge
        let badge_x = C1_X + 3.0;
        let badge_y = y_top - ROW_PAD - BADGE_H;
        fill_rounded_rect(&layer, badge_x, badge_y, BADGE_W, BADGE_H, R_BADGE, row.bg);

        // Dot in badge
        fill_rounded_rect(&layer,
            badge_x + 2.5, badge_y + (BADGE_H - DOT_SIZE) / 2.0,
            DOT_SIZE, DOT_SIZE, DOT_SIZE / 2.0, row.fg);

        set_color(&layer, row.fg);
        layer.use_text(row.name, 8.0, Mm(badge_x + 7.5), Mm(badge_y + 1.5), &font_b);

        // Description
        set_color(&layer, TEXT_SEC);
        for (j, line) in row.desc_lines.iter().enumerate() {
            let ly = y_top - ROW_PAD - (j as f32 + 0.9) * LINE_H;
            layer.use_text(line.as_str(), 8.0, Mm(C2_X + 2.0), Mm(ly), &font_r);
        }

        // Risk codes — listed first (muted), count line last (bold)
        let last_code_idx = row.code_lines.len().saturating_sub(1);
        for (j, line) in row.code_lines.iter().enumerate() {
            let ly = y_top - ROW_PAD - (j as f32 + 0.9) * LINE_H;
            if j == last_code_idx {
                set_color(&layer, TEXT_PRI);
                layer.use_text(line.as_str(), 9.0, Mm(C3_X + 2.0), Mm(ly), &font_b);
            } else {
                set_color(&layer, TEXT_MUT);
                layer.use_text(line.as_str(), 7.0, Mm(C3_X + 2.0), Mm(ly), &font_r);
            }
        }

        if i < rows.len() - 1 {
            draw_hline(&layer, C1_X + R_PANEL, T_END - R_PANEL, y_bot, PANEL_BORDER);
        }
        y_top = y_bot;
    }

    add_footer(&layer, &font_r);
    Ok(())
}

// ── Matrix page ───────────────────────────────────────────────────────────────

fn add_matrix_page(doc: &PdfDocumentReference, risks: &[Risk]) -> Result<()> {
    let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Risk Matrix");
    let layer = doc.get_page(page_idx).get_layer(layer_idx);

    let font_b = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let font_r = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
    fill_gradient_h(&layer, 0.0, PAGE_H - 2.5, PAGE_W, 2.5, ACCENT_BLU, ACCENT_CYN, 21);

    set_color(&layer, TEXT_PRI);
    layer.use_text("Risk Matrix", 20.0, Mm(MARGIN), Mm(278.5), &font_b);
    set_color(&layer, TEXT_SEC);
    layer.use_text(
        "Probability × impact; each cell shows its score and registered risk count",
        9.0, Mm(MARGIN), Mm(271.5), &font_r,
    );
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, 267.5, PANEL_BORDER);

    let counts = matrix_counts(risks);

    const CELL: f32 = 28.0;
    const GRID_GAP: f32 = 1.5;
    let grid_w = CELL * 5.0 + GRID_GAP * 4.0;
    let grid_x = (PAGE_W - grid_w - 14.0) / 2.0 + 14.0; // leave room for row labels
    let grid_top = 250.0f32;

    // Column headers (impact)
    set_color(&layer, TEXT_MUT);
    for impact in 0..5usize {
        let cx = grid_x + (CELL + GRID_GAP) * impact as f32;
        layer.use_text(
            format!("Impact {}", impact + 1),
            7.0, Mm(cx + CELL / 2.0 - 7.5), Mm(grid_top + 3.5), &font_b,
        );
    }

    for prob in 0..5usize {
        let cy = grid_top - CELL - (CELL + GRID_GAP) * prob as f32;

        // Row header (probability)
        set_color(&layer, TEXT_MUT);
        layer.use_text(
            format!("Prob {}", prob + 1),
            7.0, Mm(grid_x - 14.0), Mm(cy + CELL / 2.0 - 1.0), &font_b,
        );

        for impact in 0..5usize {
            let cx = grid_x + (CELL + GRID_GAP) * impact as f32;
            let score = compute_score(prob as u8 + 1, impact as u8 + 1);
            let severity = classify(score);
            let count = counts[prob][impact];

            fill_rounded_rect(&layer, cx, cy, CELL, CELL, R_BADGE, matrix_cell_color(severity));

            let text_color = match severity {
                Severity::Low | Severity::Medium => TEXT_PRI,
                Severity::High | Severity::Critical => WHITE,
            };
            set_color(&layer, text_color);
            layer.use_text(
                score.to_string(),
                13.0, Mm(cx + CELL / 2.0 - 2.5), Mm(cy + CELL / 2.0 + 1.0), &font_b,
            );
            if count > 0 {
                layer.use_text(
                    format!("{} risk{}", count, if count == 1 { "" } else { "s" }),
                    7.0, Mm(cx + CELL / 2.0 - 6.0), Mm(cy + 4.5), &font_r,
                );
            }
        }
    }

    // Legend
    let legend_y = grid_top - 5.0 * CELL - 4.0 * GRID_GAP - 14.0;
    let legend = [
        (Severity::Critical, "Critical (21-25)"),
        (Severity::High,     "High (16-20)"),
        (Severity::Medium,   "Medium (6-15)"),
        (Severity::Low,      "Low (1-5)"),
    ];
    for (i, (severity, label)) in legend.iter().enumerate() {
        let lx = MARGIN + i as f32 * 44.0;
        fill_rounded_rect(&layer, lx, legend_y, 4.0, 4.0, 1.0, matrix_cell_color(*severity));
        set_color(&layer, TEXT_SEC);
        layer.use_text(*label, 8.0, Mm(lx + 6.0), Mm(legend_y + 0.8), &font_r);
    }

    // Per-band totals
    let stats = aggregate(risks);
    let totals_y = legend_y - 12.0;
    draw_hline(&layer, MARGIN, PAGE_W - MARGIN, totals_y + 6.0, PANEL_BORDER);
    set_color(&layer, TEXT_SEC);
    layer.use_text(
        format!(
            "Critical: {}    High: {}    Medium: {}    Low: {}    Total: {}",
            stats.critical_risks, stats.high_risks, stats.medium_risks,
            stats.low_risks, stats.total_risks,
        ),
        9.0, Mm(MARGIN), Mm(totals_y), &font_r,
    );

    add_footer(&layer, &font_r);
    Ok(())
}

// ── Full risk table pages ─────────────────────────────────────────────────────

fn add_table_pages(doc: &PdfDocumentReference, risks: &[Risk]) -> Result<()> {
    let font_b = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let font_r = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    const BASE_ROW_H: f32 = 7.0;
    const EXTRA_LINE_H: f32 = 3.5;
    const HDR_Y: f32 = 268.5;
    const FIRST_Y: f32 = 259.5;
    const BOT_MARGIN: f32 = 25.0;
    const TITLE_WRAP: usize = 34;

    //  CODE     TITLE      PROB       IMPACT     SCORE      SEVERITY
    let col_x = [MARGIN, MARGIN + 18.0, MARGIN + 84.0, MARGIN + 106.0, MARGIN + 128.0, MARGIN + 144.0];
    let headers = ["CODE", "TITLE", "PROB", "IMPACT", "SCORE", "SEVERITY"];

    // Pre-compute title lines and dynamic row heights
    let row_data: Vec<(Vec<String>, f32)> = risks.iter().map(|risk| {
        let lines = wrap_text(&risk.title, TITLE_WRAP);
        let extra = lines.len().saturating_sub(1);
        let h = BASE_ROW_H + extra as f32 * EXTRA_LINE_H;
        (lines, h)
    }).collect();

    let mut cur_y = FIRST_Y;
    let mut page_state: Option<(PdfPageIndex, PdfLayerIndex)> = None;
    let mut page_num: u32 = 0;

    for (row_idx, risk) in risks.iter().enumerate() {
        let (title_lines, row_h) = &row_data[row_idx];
        let row_h = *row_h;

        let needs_new_page = page_state.is_none() || cur_y - row_h < BOT_MARGIN;

        if needs_new_page {
            page_num += 1;
            let (pi, li) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Risks");
            let layer = doc.get_page(pi).get_layer(li);

            fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
            fill_gradient_h(&layer, 0.0, PAGE_H - 2.5, PAGE_W, 2.5, ACCENT_BLU, ACCENT_CYN, 21);

            set_color(&layer, TEXT_PRI);
            layer.use_text("All Risks", 14.0, Mm(MARGIN), Mm(282.5), &font_b);
            set_color(&layer, TEXT_MUT);
            layer.use_text(
                format!("Page {}", page_num),
                8.0, Mm(PAGE_W - MARGIN - 14.0), Mm(283.0), &font_r,
            );
            draw_hline(&layer, MARGIN, PAGE_W - MARGIN, 277.5, PANEL_BORDER);

            // Header row
            fill_rounded_rect(&layer, MARGIN, HDR_Y - 7.5, PAGE_W - 2.0 * MARGIN, 9.5, R_BADGE, PANEL);
            stroke_rounded_rect(&layer, MARGIN, HDR_Y - 7.5, PAGE_W - 2.0 * MARGIN, 9.5, R_BADGE, PANEL_BORDER);
            set_color(&layer, TEXT_MUT);
            for (i, h) in headers.iter().enumerate() {
                layer.use_text(*h, 7.0, Mm(col_x[i] + 1.5), Mm(HDR_Y - 4.0), &font_b);
            }

            add_footer(&layer, &font_r);

            cur_y = FIRST_Y;
            page_state = Some((pi, li));
        }

        let (pi, li) = page_state.unwrap();
        let layer = doc.get_page(pi).get_layer(li);

        let (badge_bg, badge_fg) = severity_badge_colors(risk.severity);

        // Alternating row background
        if row_idx % 2 == 0 {
            fill_rect(&layer, MARGIN, cur_y - row_h + 1.5, PAGE_W - 2.0 * MARGIN, row_h, PANEL_ALT);
        }

        let text_y = cur_y - 4.0;

        set_color(&layer, TEXT_PRI);
        layer.use_text(&risk.code, 8.0, Mm(col_x[0] + 1.5), Mm(text_y), &font_b);

        // Title — wrapped across multiple lines, no truncation
        set_color(&layer, TEXT_SEC);
        for (j, line) in title_lines.iter().enumerate() {
            let line_y = text_y - j as f32 * EXTRA_LINE_H;
            layer.use_text(line.as_str(), 8.0, Mm(col_x[1] + 1.5), Mm(line_y), &font_r);
        }

        layer.use_text(
            format!("{}", risk.probability.weight),
            8.0, Mm(col_x[2] + 1.5), Mm(text_y), &font_r,
        );
        layer.use_text(
            format!("{}", risk.impact.weight),
            8.0, Mm(col_x[3] + 1.5), Mm(text_y), &font_r,
        );
        set_color(&layer, TEXT_PRI);
        layer.use_text(risk.risk_score.to_string(), 8.0, Mm(col_x[4] + 1.5), Mm(text_y), &font_b);

        // Severity badge
        let badge_x = col_x[5] + 1.5;
        let badge_y = cur_y - row_h + 2.2;
        fill_rounded_rect(&layer, badge_x, badge_y, 26.0, 4.8, R_BADGE, badge_bg);
        set_color(&layer, badge_fg);
        layer.use_text(risk.severity.label(), 7.0, Mm(badge_x + 2.0), Mm(badge_y + 1.1), &font_b);

        // Row separator
        draw_hline(&layer, MARGIN, T_END, cur_y - row_h + 1.5, PANEL_BORDER);

        cur_y -= row_h;
    }

    Ok(())
}

fn add_footer(layer: &PdfLayerReference, font_r: &IndirectFontRef) {
    draw_hline(layer, MARGIN, PAGE_W - MARGIN, 22.0, PANEL_BORDER);
    set_color(layer, TEXT_MUT);
    layer.use_text(
        format!("Generated by risk-registr v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(MARGIN), Mm(15.0), font_r,
    );
    layer.use_text(today(), 7.5, Mm(PAGE_W - MARGIN - 22.0), Mm(15.0), font_r);
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

fn set_color(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
             (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(Mm(x),     Mm(y)),     false),
            (Point::new(Mm(x + w), Mm(y)),     false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x),     Mm(y + h)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
}

/// Build a clockwise polygon ring approximating a rounded rectangle.
/// Uses 8 line segments per quarter-circle arc.
fn rounded_rect_ring(x: f32, y: f32, w: f32, h: f32, r: f32) -> Vec<(Point, bool)> {
    let r = r.min(w / 2.0).min(h / 2.0);
    const SEGS: usize = 8;
    let mut pts = Vec::with_capacity(4 * (SEGS + 1));

    // (corner_cx, corner_cy, arc_start_deg, arc_end_deg) — clockwise order
    let corners = [
        (x + w - r, y + r,     270.0f32, 360.0f32), // bottom-right
        (x + w - r, y + h - r, 0.0f32,   90.0f32),  // top-right
        (x + r,     y + h - r, 90.0f32,  180.0f32), // top-left
        (x + r,     y + r,     180.0f32, 270.0f32), // bottom-left
    ];

    for (cx, cy, start, end) in &corners {
        for i in 0..=SEGS {
            let t = i as f32 / SEGS as f32;
            let angle = (start + (end - start) * t).to_radians();
            pts.push((
                Point::new(Mm(cx + r * angle.cos()), Mm(cy + r * angle.sin())),
                false,
            ));
        }
    }
    pts
}

fn fill_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
                     r: f32, (cr, cg, cb): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r: cr, g: cg, b: cb, icc_profile: None }));
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
}

fn stroke_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
                       r: f32, (cr, cg, cb): (f32, f32, f32)) {
    layer.set_outline_color(Color::Rgb(Rgb { r: cr, g: cg, b: cb, icc_profile: None }));
    layer.set_outline_thickness(0.4);
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Stroke,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_outline_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
    layer.set_outline_thickness(1.0);
}

fn draw_hline(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32,
              (r, g, b): (f32, f32, f32)) {
    layer.set_outline_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
    layer.set_outline_thickness(0.3);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
    layer.set_outline_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
    layer.set_outline_thickness(1.0);
}

/// Fill a left-to-right gradient rectangle using `steps` vertical strips.
#[allow(clippy::too_many_arguments)]
fn fill_gradient_h(
    layer: &PdfLayerReference,
    x: f32, y: f32, w: f32, h: f32,
    from: (f32, f32, f32),
    to: (f32, f32, f32),
    steps: usize,
) {
    let step_w = w / steps as f32;
    for i in 0..steps {
        let t = i as f32 / (steps - 1).max(1) as f32;
        let color = (
            from.0 + (to.0 - from.0) * t,
            from.1 + (to.1 - from.1) * t,
            from.2 + (to.2 - from.2) * t,
        );
        // Overlap strips slightly to prevent rounding gaps
        fill_rect(layer, x + i as f32 * step_w, y, step_w + 0.6, h, color);
    }
}

// ── Text helpers ──────────────────────────────────────────────────────────────

fn truncate(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max {
        format!("{}…", chars[..max - 1].iter().collect::<String>())
    } else {
        s.to_string()
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.len() <= max_chars {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() > max_chars {
            lines.push(current.clone());
            current = word.to_string();
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// All codes wrapped into lines first, then "<N> risk(s)" as the final line.
fn format_code_count_list(codes: &[String], max_chars: usize) -> Vec<String> {
    if codes.is_empty() {
        return vec!["—".to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for code in codes {
        let sep = if current.is_empty() { "" } else { ", " };
        let candidate = format!("{}{}", sep, code);
        if !current.is_empty() && current.len() + candidate.len() > max_chars {
            lines.push(current.clone());
            current = code.clone();
        } else {
            current.push_str(&candidate);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    let count_line = format!("{} risk{}", codes.len(), if codes.len() == 1 { "" } else { "s" });
    lines.push(count_line);
    lines
}

// ── Date helper ───────────────────────────────────────────────────────────────

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
