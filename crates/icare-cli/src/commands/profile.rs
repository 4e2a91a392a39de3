use super::Session;
use anyhow::{Context, Result};

pub fn show(session: &Session) {
    let patient = &session.state().patient;

    println!("姓名: {}", patient.name);
    println!("年龄: {}", patient.age);
    println!("床号: {}", if patient.bed_number.is_empty() { "-" } else { &patient.bed_number });
    println!("护理等级: {}", patient.care_level);
    println!("入院日期: {}", patient.admission_date);
    println!("重点提醒:");
    for alert in &patient.key_alerts {
        println!("  ⚠️ {}", alert);
    }
    println!("紧急联系人:");
    for contact in patient.reachable_contacts() {
        println!("  {} {} {}", contact.role, contact.name, contact.phone);
    }
}

pub fn set_bed(session: &mut Session, bed: String) -> Result<()> {
    let mut profile = session.state().patient.clone();
    profile.bed_number = bed;
    session
        .update_patient_profile(profile)
        .context("Failed to update patient profile")?;
    println!("✅ 床号已更新");
    Ok(())
}

pub fn add_alert(session: &mut Session, alert: String) -> Result<()> {
    let mut profile = session.state().patient.clone();
    profile.key_alerts.push(alert);
    session
        .update_patient_profile(profile)
        .context("Failed to update patient profile")?;
    println!("✅ 已添加重点提醒");
    Ok(())
}
