use super::Session;

pub fn status(session: &Session) {
    let state = session.state();
    let patient = &state.patient;

    println!("📅 {} {}", state.current_date, state.current_shift.label());
    if patient.bed_number.is_empty() {
        println!("👤 {} ({}岁) {}", patient.name, patient.age, patient.care_level);
    } else {
        println!(
            "👤 {} ({}岁) {}床 {}",
            patient.name, patient.age, patient.bed_number, patient.care_level
        );
    }
    for alert in &patient.key_alerts {
        println!("  ⚠️ {}", alert);
    }

    let completed = state.today_check_ins.len();
    println!(
        "\n✅ 今日完成 {}/{} ({}%)",
        completed,
        session.registry().len(),
        (session.completion_rate() * 100.0).round() as i64
    );

    let pending = session.pending_alerts();
    if pending.is_empty() {
        println!("🔔 无待处理异常");
    } else {
        println!("🔔 待处理异常 {} 项:", pending.len());
        for event in pending {
            println!("  [{}] {} {} ({})", event.status.label(), event.time, event.description, event.id);
        }
    }
}

pub fn tasks(session: &Session) {
    let done = |task_id: &str| {
        session
            .state()
            .today_check_ins
            .iter()
            .any(|c| c.task_id == task_id)
    };

    for task in session.registry().tasks() {
        let marker = if done(task.id) { "✅" } else { "⬜" };
        println!(
            "{} {:<20} {} [{}] {}",
            marker,
            task.id,
            task.name,
            task.category.label(),
            task.frequency
        );
    }
}

pub fn trend(session: &Session, days: u32) {
    for day in session.completion_trend(days) {
        let percent = (day.rate * 100.0).round() as usize;
        let bar = "█".repeat(percent / 10);
        println!("{} {:>3}% {}", day.date, percent, bar);
    }
}
