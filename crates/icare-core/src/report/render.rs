//! Plain-text rendering of a shift report for handoff messages.

use super::model::ShiftReport;

/// Renders `report` as the line-oriented handoff text.
///
/// The missed-tasks line is always present and left blank when nothing was
/// missed. The vitals, events and focus blocks are omitted when their source
/// list is empty.
pub fn render_text(report: &ShiftReport) -> String {
    let mut lines: Vec<String> = vec![
        "📋 iCare 交班记录".to_string(),
        format!("📅 {} {}", report.date, report.shift.label()),
        format!("⏰ 生成时间: {}", report.generated_at),
        String::new(),
        format!("✅ 完成率: {}%", report.completion_percent()),
        format!("已完成: {}", join_or_none(&report.completed_tasks)),
        missed_line(&report.missed_tasks),
        String::new(),
    ];

    if !report.vitals_summary.is_empty() {
        lines.push("📊 生命体征:".to_string());
        for vital in &report.vitals_summary {
            let marker = if vital.is_abnormal { "⚠️" } else { "✅" };
            lines.push(format!("  {} {}: {}", marker, vital.vital_type, vital.latest));
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "💧 出入量: 入{}ml / 出{}ml",
        report.intake_summary.total_intake, report.intake_summary.total_output
    ));

    if !report.abnormal_events.is_empty() {
        lines.push(String::new());
        lines.push(format!("⚠️ 异常事件 ({}):", report.abnormal_events.len()));
        for event in &report.abnormal_events {
            let marker = if event.status.is_resolved() { "✅" } else { "❗" };
            lines.push(format!("  {} {} [{}]", marker, event.description, event.status));
        }
    }

    if !report.next_shift_focus.is_empty() {
        lines.push(String::new());
        lines.push("📌 下班重点:".to_string());
        for focus in &report.next_shift_focus {
            lines.push(format!("  • {}", focus));
        }
    }

    lines.join("\n")
}

fn missed_line(missed: &[String]) -> String {
    if missed.is_empty() {
        String::new()
    } else {
        format!("❌ 未完成: {}", missed.join("、"))
    }
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "无".to_string()
    } else {
        names.join("、")
    }
}
