//! Patient profile.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub role: String,
    pub name: String,
    pub phone: String,
}

impl EmergencyContact {
    pub fn new(role: impl Into<String>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            name: name.into(),
            phone: phone.into(),
        }
    }

    /// Contacts without a phone number are placeholders.
    pub fn is_reachable(&self) -> bool {
        !self.phone.trim().is_empty()
    }
}

/// The single patient under care. Replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub name: String,
    pub age: u32,
    pub bed_number: String,
    pub care_level: String,
    /// Ordered, highest priority first.
    pub key_alerts: Vec<String>,
    pub admission_date: NaiveDate,
    pub contacts: Vec<EmergencyContact>,
}

impl PatientProfile {
    pub fn reachable_contacts(&self) -> impl Iterator<Item = &EmergencyContact> {
        self.contacts.iter().filter(|c| c.is_reachable())
    }
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            name: "王骏家".to_string(),
            age: 82,
            bed_number: String::new(),
            care_level: "一级护理".to_string(),
            key_alerts: vec![
                "腹主动脉瘤 — 禁止腹部按压".to_string(),
                "鼻饲管 — 喂养前确认位置".to_string(),
                "留置尿管 — 保持通畅".to_string(),
                "高钠血症恢复期 — 注意补液".to_string(),
            ],
            admission_date: NaiveDate::from_ymd_opt(2026, 2, 22).unwrap_or_default(),
            contacts: vec![
                EmergencyContact::new("主管医生", "", ""),
                EmergencyContact::new("值班护士站", "", ""),
                EmergencyContact::new("家属1", "", ""),
                EmergencyContact::new("家属2", "", ""),
                EmergencyContact::new("急救电话", "120", "120"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = PatientProfile::default();
        assert_eq!(profile.age, 82);
        assert_eq!(profile.key_alerts.len(), 4);
        assert_eq!(profile.admission_date.to_string(), "2026-02-22");
        assert_eq!(profile.contacts.len(), 5);

        let reachable: Vec<_> = profile.reachable_contacts().map(|c| c.role.as_str()).collect();
        assert_eq!(reachable, vec!["急救电话"]);
    }
}
