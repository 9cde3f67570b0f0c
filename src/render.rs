//! Markdown rendering of a parsed [`DailyReport`].
//!
//! The renderer is a pure function from the typed model to an ordered list
//! of Markdown lines; `main` is the only place those lines touch stdout.
//! Sections render in document order, each closed by a `---` separator so
//! an empty section still reads as a deliberate block.

use chrono::Local;
use itertools::Itertools;
use tracing::debug;

use crate::models::{ConceptHighlight, DailyReport, HotStock, ListItem, ReportSection, SectionBody};
use crate::utils::clean_text;

/// Section keys whose `sub_title` is boilerplate and never rendered.
const NO_SUBTITLE_KEYS: [&str; 2] = ["jryw", "hsyp"];

/// Render the full briefing: report header plus every section.
pub fn render_report(report: &DailyReport, report_id: &str) -> Vec<String> {
    let mut lines = vec![
        format!("# A股复盘日报 ({report_id})"),
        format!("> 生成时间: {}", Local::now().format("%H:%M:%S")),
        "---".to_string(),
    ];
    for section in &report.sections {
        lines.extend(render_section(section));
    }
    debug!(lines = lines.len(), sections = report.sections.len(), "Rendered briefing");
    lines
}

fn render_section(section: &ReportSection) -> Vec<String> {
    let mut lines = vec![format!("## 📊 {}", section.tab_title)];
    if let Some(title) = &section.title {
        lines.push(format!("### {title}"));
    }
    if let Some(sub_title) = &section.sub_title {
        if !NO_SUBTITLE_KEYS.contains(&section.key.as_str()) {
            lines.push(format!("_{sub_title}_"));
        }
    }
    lines.push(String::new());

    match &section.body {
        SectionBody::Concepts(concepts) => lines.extend(render_concepts(concepts)),
        SectionBody::HotStocks(stocks) => lines.extend(render_hot_stocks(stocks)),
        SectionBody::Items(items) => lines.extend(render_items(items)),
        SectionBody::Empty => {}
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines
}

/// Thematic hotspots: bold concept line, then indented catalyst and
/// leaders quotes when the data carries them.
fn render_concepts(concepts: &[ConceptHighlight]) -> Vec<String> {
    let mut lines = Vec::new();
    for concept in concepts {
        lines.push(format!(
            "- **{}** (涨幅 {}%)",
            concept.concept_name, concept.concept_zdf
        ));
        let reason = concept
            .hot_spot
            .hot_reason
            .first()
            .map(|r| clean_text(r))
            .unwrap_or_default();
        if !reason.is_empty() {
            lines.push(format!("  > 催化: {reason}"));
        }
        if !concept.top2_stocks.is_empty() {
            let leaders = concept
                .top2_stocks
                .iter()
                .map(|s| format!("{}({}%)", s.stock_name, s.stock_zdf))
                .join(", ");
            lines.push(format!("  > 领涨: {leaders}"));
        }
    }
    lines
}

/// Community buzz: one bullet per stock with a directional glyph.
fn render_hot_stocks(stocks: &[HotStock]) -> Vec<String> {
    stocks
        .iter()
        .map(|stock| {
            format!(
                "- **{}** {} {}% (热度: {})",
                stock.name,
                direction_glyph(&stock.zdf),
                stock.zdf,
                stock.cnt
            )
        })
        .collect()
}

/// Generic list sections: inline images are dropped, everything else is a
/// bullet once its description cleans to something non-empty.
fn render_items(items: &[ListItem]) -> Vec<String> {
    let mut lines = Vec::new();
    for item in items {
        if item.kind == "image" {
            continue;
        }
        let desc = clean_text(&item.desc);
        if !desc.is_empty() {
            lines.push(format!("- {desc}"));
        }
    }
    lines
}

/// Up for positive change, down for negative, flat otherwise.
/// The vendor occasionally sends blank or junk `zdf` values; those read
/// as flat.
fn direction_glyph(zdf: &str) -> &'static str {
    match zdf.trim().parse::<f64>() {
        Ok(v) if v > 0.0 => "🔺",
        Ok(v) if v < 0.0 => "🔻",
        _ => "➖",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_report;

    fn section_lines(body: &str) -> Vec<String> {
        let report = parse_report(body).unwrap();
        let mut lines = Vec::new();
        for section in &report.sections {
            lines.extend(render_section(section));
        }
        lines
    }

    #[test]
    fn test_concepts_section_end_to_end() {
        let body = r#"{"tcrd": {"tab_title": "热点", "content": [{
            "concept_name": "AI",
            "concept_zdf": "5.00",
            "hot_spot": {"hot_reason": ["<b>政策</b>利好"]},
            "top2_stocks": [{"stock_name": "甲", "stock_zdf": "7.1"}]
        }]}}"#;
        assert_eq!(
            section_lines(body),
            vec![
                "## 📊 热点",
                "",
                "- **AI** (涨幅 5.00%)",
                "  > 催化: 政策利好",
                "  > 领涨: 甲(7.1%)",
                "",
                "---",
            ]
        );
    }

    #[test]
    fn test_report_header() {
        let report = parse_report("{}").unwrap();
        let lines = render_report(&report, "2025123002");
        assert_eq!(lines[0], "# A股复盘日报 (2025123002)");
        assert!(lines[1].starts_with("> 生成时间: "));
        assert_eq!(lines[2], "---");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_section_without_tab_title_renders_nothing() {
        let body = r#"{"abcd": {"content": [{"type": "text", "desc": "正文"}]}}"#;
        assert!(section_lines(body).is_empty());
    }

    #[test]
    fn test_catalyst_line_only_for_nonempty_reason() {
        let body = r#"{"tcrd": {"tab_title": "热点", "content": [
            {"concept_name": "有催化", "hot_spot": {"hot_reason": ["利好"]}},
            {"concept_name": "空催化", "hot_spot": {"hot_reason": ["<b></b>"]}},
            {"concept_name": "无催化"}
        ]}}"#;
        let lines = section_lines(body);
        let catalysts: Vec<&String> =
            lines.iter().filter(|l| l.contains("催化")).collect();
        assert_eq!(catalysts, [&"  > 催化: 利好".to_string()]);
    }

    #[test]
    fn test_leaders_joined_with_comma() {
        let body = r#"{"tcrd": {"tab_title": "热点", "content": [{
            "concept_name": "算力",
            "top2_stocks": [
                {"stock_name": "甲", "stock_zdf": "7.1"},
                {"stock_name": "乙", "stock_zdf": "5.0"}
            ]
        }]}}"#;
        let lines = section_lines(body);
        assert!(lines.contains(&"  > 领涨: 甲(7.1%), 乙(5.0%)".to_string()));
    }

    #[test]
    fn test_hot_stock_glyphs() {
        let body = r#"{"sqry": {"tab_title": "社区热议", "content": {"hot_stock": [
            {"name": "涨", "zdf": "3.2", "cnt": "981"},
            {"name": "跌", "zdf": "-1.5", "cnt": "40"},
            {"name": "平", "zdf": "0", "cnt": "7"}
        ]}}}"#;
        let lines = section_lines(body);
        assert!(lines.contains(&"- **涨** 🔺 3.2% (热度: 981)".to_string()));
        assert!(lines.contains(&"- **跌** 🔻 -1.5% (热度: 40)".to_string()));
        assert!(lines.contains(&"- **平** ➖ 0% (热度: 7)".to_string()));
    }

    #[test]
    fn test_direction_glyph_fallback() {
        assert_eq!(direction_glyph("3.2"), "🔺");
        assert_eq!(direction_glyph("-1.5"), "🔻");
        assert_eq!(direction_glyph("0"), "➖");
        assert_eq!(direction_glyph(""), "➖");
        assert_eq!(direction_glyph("n/a"), "➖");
    }

    #[test]
    fn test_image_items_filtered() {
        let body = r#"{"agsp": {"tab_title": "A股收评", "content": [
            {"type": "image", "desc": "看起来像正文的图片说明"},
            {"type": "text", "desc": "<b>两市</b>放量上涨"},
            {"type": "text", "desc": "<img src='x'/>"}
        ]}}"#;
        assert_eq!(
            section_lines(body),
            vec!["## 📊 A股收评", "", "- 两市放量上涨", "", "---"]
        );
    }

    #[test]
    fn test_sub_title_suppressed_for_excluded_keys() {
        let body = r#"{
            "jryw": {"tab_title": "今日要闻", "sub_title": "赘述", "content": []},
            "zjdx": {"tab_title": "资金动向", "sub_title": "北向资金", "content": []}
        }"#;
        let lines = section_lines(body);
        assert!(!lines.iter().any(|l| l.contains("赘述")));
        assert!(lines.contains(&"_北向资金_".to_string()));
    }

    #[test]
    fn test_title_rendered_when_present() {
        let body = r#"{"mrfp": {"tab_title": "每日复盘", "title": "震荡整理", "content": []}}"#;
        let lines = section_lines(body);
        assert_eq!(lines[0], "## 📊 每日复盘");
        assert_eq!(lines[1], "### 震荡整理");
    }

    #[test]
    fn test_empty_section_still_separated() {
        let body = r#"{"mrfp": {"tab_title": "每日复盘", "content": "纯文本"}}"#;
        assert_eq!(
            section_lines(body),
            vec!["## 📊 每日复盘", "", "", "---"]
        );
    }

    #[test]
    fn test_full_document_order_and_separators() {
        let body = r#"{
            "jryw": {"tab_title": "今日要闻", "content": [{"type": "text", "desc": "要闻一"}]},
            "sqry": {"tab_title": "社区热议", "content": {"hot_stock": []}}
        }"#;
        let lines = section_lines(body);
        assert_eq!(lines.iter().filter(|l| *l == "---").count(), 2);
        let jryw_pos = lines.iter().position(|l| l == "## 📊 今日要闻").unwrap();
        let sqry_pos = lines.iter().position(|l| l == "## 📊 社区热议").unwrap();
        assert!(jryw_pos < sqry_pos);
    }
}
