use super::Session;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use icare_core::clock::Shift;
use icare_core::report::render_text;

pub fn generate(session: &mut Session, date: Option<NaiveDate>, shift: Option<Shift>) -> Result<()> {
    let report = match (date, shift) {
        (None, None) => session.generate_report(),
        (date, shift) => {
            let state = session.state();
            let date = date.unwrap_or(state.current_date);
            let shift = shift.unwrap_or(state.current_shift);
            session.generate_report_for(date, shift)
        }
    }
    .context("Failed to generate shift report")?;

    println!("{}", render_text(&report));
    Ok(())
}
