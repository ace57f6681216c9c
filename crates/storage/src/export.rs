use std::io;

use coachplan_domain as domain;

/// Writes one CSV line per exercise, preceded by the header line. The header is written
/// even for an empty plan.
pub fn write_csv<W: io::Write>(writer: W, plan: &domain::WeekPlan) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(domain::CSV_HEADER)?;
    for row in domain::plan_rows(plan) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
