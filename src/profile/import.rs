use std::io::Read;

use serde::Deserialize;

use super::{Payload, ProfileError};
use crate::eligibility::{MarkValue, Qualification};

#[derive(Debug, Deserialize)]
struct MarkRow {
    subject: Option<String>,
    mark: Option<String>,
}

/// Read a `subject,mark` CSV export (e.g. a transcribed results statement).
pub fn qualifications_from_csv<R: Read>(reader: R) -> Result<Vec<Qualification>, ProfileError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut qualifications = Vec::new();
    for row in csv_reader.deserialize::<MarkRow>() {
        let row = row.map_err(|err| ProfileError::input(Payload::MarksCsv, err))?;
        qualifications.push(Qualification {
            subject: row.subject,
            mark: row.mark.map(MarkValue::Text),
        });
    }

    Ok(qualifications)
}
