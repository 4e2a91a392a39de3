use super::Session;
use anyhow::{Context, Result};
use icare_core::event::AbnormalEvent;
use icare_core::intake_output::IntakeOutputType;
use icare_core::observation::ObservationCategory;
use icare_core::vitals::VitalType;

pub fn check_in(session: &mut Session, task_id: &str, note: Option<String>) -> Result<()> {
    let check_in = session
        .check_in_task(task_id, note)
        .with_context(|| format!("Failed to check in '{}'", task_id))?;

    let name = session
        .registry()
        .find(&check_in.task_id)
        .map_or(check_in.task_id.as_str(), |t| t.name);
    println!("✅ {} {} ({})", check_in.time, name, check_in.shift.short_label());

    if let Some(task) = session.registry().find(task_id) {
        if task.requires_data() {
            println!("💡 该任务需要记录数据，请使用 vital / io / observe 命令补充");
        }
    }
    Ok(())
}

pub fn vital(session: &mut Session, vital_type: VitalType, value: f64) -> Result<()> {
    let outcome = session
        .record_vital(vital_type, value)
        .context("Failed to record vital sign")?;

    let range = vital_type.range();
    println!(
        "📈 {} {}{} (正常 {}-{}) → {}",
        range.label,
        value,
        range.unit,
        range.normal_min,
        range.normal_max,
        outcome.alert_level().as_str()
    );
    print_event(outcome.event.as_ref());
    Ok(())
}

pub fn intake_output(
    session: &mut Session,
    io_type: IntakeOutputType,
    amount: Option<f64>,
    stool_type: Option<String>,
    note: Option<String>,
) -> Result<()> {
    let recorded = session
        .record_intake_output(io_type, amount, stool_type, note)
        .context("Failed to record intake/output")?;

    match recorded {
        Some(record) => {
            let amount = record
                .amount
                .map(|a| format!("{}ml", a))
                .or(record.stool_type.clone())
                .unwrap_or_default();
            println!("💧 {} {} {}", record.time, io_type.label(), amount);
        }
        None => println!("⏭️ 未提供量，未记录"),
    }
    Ok(())
}

pub fn observe(
    session: &mut Session,
    category: ObservationCategory,
    text: &str,
    abnormal: bool,
) -> Result<()> {
    let outcome = session
        .record_observation(category, text, abnormal)
        .context("Failed to record observation")?;

    println!("📝 {} {}", outcome.observation.time, outcome.observation.marked());
    print_event(outcome.event.as_ref());
    Ok(())
}

fn print_event(event: Option<&AbnormalEvent>) {
    if let Some(event) = event {
        println!(
            "🚨 已生成异常事件 [{}] {} ({})",
            event.alert_level.as_str(),
            event.description,
            event.id
        );
    }
}
