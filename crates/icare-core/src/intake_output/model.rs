//! Fluid intake and output records.

use crate::record::{Collection, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeOutputType {
    NasalFeed,
    Water,
    IvFluid,
    Urine,
    Stool,
}

impl IntakeOutputType {
    pub const ALL: [IntakeOutputType; 5] = [
        IntakeOutputType::NasalFeed,
        IntakeOutputType::Water,
        IntakeOutputType::IvFluid,
        IntakeOutputType::Urine,
        IntakeOutputType::Stool,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IntakeOutputType::NasalFeed => "nasal_feed",
            IntakeOutputType::Water => "water",
            IntakeOutputType::IvFluid => "iv_fluid",
            IntakeOutputType::Urine => "urine",
            IntakeOutputType::Stool => "stool",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn label(self) -> &'static str {
        match self {
            IntakeOutputType::NasalFeed => "鼻饲",
            IntakeOutputType::Water => "饮水",
            IntakeOutputType::IvFluid => "输液",
            IntakeOutputType::Urine => "尿量",
            IntakeOutputType::Stool => "大便",
        }
    }

    /// Counts toward total intake.
    pub fn is_intake(self) -> bool {
        matches!(
            self,
            IntakeOutputType::NasalFeed | IntakeOutputType::Water | IntakeOutputType::IvFluid
        )
    }

    /// Counts toward total output. Stool is tracked but excluded.
    pub fn is_output(self) -> bool {
        self == IntakeOutputType::Urine
    }
}

impl fmt::Display for IntakeOutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One intake or output entry. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeOutputRecord {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub io_type: IntakeOutputType,
    /// Millilitres.
    pub amount: Option<f64>,
    pub stool_type: Option<String>,
    pub note: Option<String>,
}

impl IntakeOutputRecord {
    pub fn new(
        date: NaiveDate,
        time: impl Into<String>,
        io_type: IntakeOutputType,
        amount: Option<f64>,
        stool_type: Option<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            time: time.into(),
            io_type,
            amount,
            stool_type,
            note,
        }
    }
}

impl Record for IntakeOutputRecord {
    const COLLECTION: Collection = Collection::IntakeOutput;

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Total intake and output in millilitres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FluidBalance {
    pub total_intake: f64,
    pub total_output: f64,
}

impl FluidBalance {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a IntakeOutputRecord>) -> Self {
        records
            .into_iter()
            .fold(FluidBalance::default(), |mut balance, record| {
                let amount = record.amount.unwrap_or(0.0);
                if record.io_type.is_intake() {
                    balance.total_intake += amount;
                } else if record.io_type.is_output() {
                    balance.total_output += amount;
                }
                balance
            })
    }

    /// Intake minus output.
    pub fn net(&self) -> f64 {
        self.total_intake - self.total_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(io_type: IntakeOutputType, amount: Option<f64>) -> IntakeOutputRecord {
        IntakeOutputRecord::new(
            NaiveDate::from_ymd_opt(2026, 2, 22).unwrap(),
            "10:00",
            io_type,
            amount,
            None,
            None,
        )
    }

    #[test]
    fn test_balance_excludes_stool() {
        let records = vec![
            entry(IntakeOutputType::NasalFeed, Some(300.0)),
            entry(IntakeOutputType::Water, Some(200.0)),
            entry(IntakeOutputType::Urine, Some(100.0)),
            entry(IntakeOutputType::Stool, Some(150.0)),
            entry(IntakeOutputType::IvFluid, None),
        ];
        let balance = FluidBalance::from_records(&records);

        assert_eq!(balance.total_intake, 500.0);
        assert_eq!(balance.total_output, 100.0);
        assert_eq!(balance.net(), 400.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!(IntakeOutputType::parse("iv_fluid"), Some(IntakeOutputType::IvFluid));
        assert_eq!(IntakeOutputType::parse("sweat"), None);
    }
}
