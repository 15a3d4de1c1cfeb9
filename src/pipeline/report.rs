//! Summary rows and their CSV layout.
//!
//! Column order is fixed by the closed label set:
//! `Image, HOO_Position, Numerator_Denominator_Transitions,
//! Total_Hits_<label>..., New_Hits_<label>..., Total_AOI_Hits_All,
//! New_AOI_Hits_All`.

use std::{fs::File, io::Write, path::Path};

use anyhow::{Context, Result};

use crate::hits::{HitSummary, LabelSet};

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub image: String,
    pub hoo_position: String,
    pub summary: HitSummary,
}

pub fn header(labels: &LabelSet) -> Vec<String> {
    let mut columns = vec![
        "Image".to_string(),
        "HOO_Position".to_string(),
        "Numerator_Denominator_Transitions".to_string(),
    ];
    columns.extend(labels.iter().map(|l| format!("Total_Hits_{l}")));
    columns.extend(labels.iter().map(|l| format!("New_Hits_{l}")));
    columns.push("Total_AOI_Hits_All".to_string());
    columns.push("New_AOI_Hits_All".to_string());
    columns
}

/// Field values in `header` order.
pub fn fields(row: &SummaryRow, labels: &LabelSet) -> Vec<String> {
    let summary = &row.summary;
    let mut values = vec![
        row.image.clone(),
        row.hoo_position.clone(),
        summary.numerator_denominator_transitions.to_string(),
    ];
    values.extend(labels.iter().map(|l| summary.total_hits.get(l).to_string()));
    values.extend(labels.iter().map(|l| summary.new_hits.get(l).to_string()));
    values.push(summary.total_hits_all().to_string());
    values.push(summary.new_hits_all().to_string());
    values
}

pub fn write_rows<W: Write>(writer: W, labels: &LabelSet, rows: &[SummaryRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header(labels))?;
    for row in rows {
        csv_writer
            .write_record(fields(row, labels))
            .with_context(|| format!("Failed to write summary for image {}", row.image))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_summary_file(path: &Path, labels: &LabelSet, rows: &[SummaryRow]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary file {}", path.display()))?;
    write_rows(file, labels, rows)
        .with_context(|| format!("Failed to write summary file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aoi::GazeLabel;
    use crate::hits::{aggregate, FractionParts, LabeledSample};

    fn labels() -> LabelSet {
        LabelSet::from_names(["H_N1", "H_D1"])
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(
            header(&labels()),
            vec![
                "Image",
                "HOO_Position",
                "Numerator_Denominator_Transitions",
                "Total_Hits_H_D1",
                "Total_Hits_H_N1",
                "Total_Hits_Outside_of_AOIs",
                "Total_Hits_Outside_of_Screen",
                "New_Hits_H_D1",
                "New_Hits_H_N1",
                "New_Hits_Outside_of_AOIs",
                "New_Hits_Outside_of_Screen",
                "Total_AOI_Hits_All",
                "New_AOI_Hits_All",
            ]
        );
    }

    #[test]
    fn test_written_csv() {
        let set = labels();
        let samples = vec![
            LabeledSample::new(0.0, GazeLabel::Named("H_N1".into())),
            LabeledSample::new(1.0, GazeLabel::OutsideScreen),
            LabeledSample::new(2.0, GazeLabel::Named("H_D1".into())),
        ];
        let summary = aggregate(samples, &set, &FractionParts::default()).unwrap();
        let row = SummaryRow {
            image: "img_1".into(),
            hoo_position: "Left".into(),
            summary,
        };

        let mut out = Vec::new();
        write_rows(&mut out, &set, &[row]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "img_1,Left,1,1,1,0,1,1,1,0,0,3,2");
    }
}
