use super::Session;
use anyhow::{Context, Result};
use icare_core::event::AbnormalEvent;

pub fn list(session: &Session, pending_only: bool) {
    let events = if pending_only {
        session.pending_alerts()
    } else {
        session.events_newest_first()
    };

    if events.is_empty() {
        println!("无异常事件");
        return;
    }

    for event in &events {
        print_event(event);
    }

    if !pending_only {
        let groups = session.event_groups();
        println!(
            "\n待处理 {} · 处理中 {} · 已解决 {}",
            groups.pending.len(),
            groups.in_progress.len(),
            groups.resolved.len()
        );
    }
}

pub fn acknowledge(session: &mut Session, id: &str) -> Result<()> {
    let event = session
        .acknowledge_event(id)
        .with_context(|| format!("Failed to acknowledge event '{}'", id))?;
    print_event(&event);
    Ok(())
}

pub fn resolve(session: &mut Session, id: &str, note: Option<String>) -> Result<()> {
    let event = session
        .resolve_event(id, note)
        .with_context(|| format!("Failed to resolve event '{}'", id))?;
    print_event(&event);
    Ok(())
}

pub fn escalate(session: &mut Session, id: &str) -> Result<()> {
    let event = session
        .escalate_event(id)
        .with_context(|| format!("Failed to escalate event '{}'", id))?;
    print_event(&event);
    Ok(())
}

fn print_event(event: &AbnormalEvent) {
    println!(
        "[{}] {} {} {} {} ({})",
        event.status.label(),
        event.date,
        event.time,
        event.alert_level.as_str(),
        event.description,
        event.id
    );
    if let Some(note) = &event.resolved_note {
        println!("    处理说明: {}", note);
    }
}
