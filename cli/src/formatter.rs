// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io, time::Duration};

use colored::Colorize;
use nimbus_chunk::{Chunk, UploadPlan};

use crate::arg::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct PlanFormatter {
    output_format: OutputFormat,
}

#[derive(Debug, serde::Serialize)]
struct PlanJson<'a> {
    missing: &'a [Chunk],
    pending_bytes: u64,
    assemble_timeout_secs: u64,
}

impl PlanFormatter {
    pub const fn new(output_format: OutputFormat) -> Self {
        Self { output_format }
    }

    pub fn write_to(self, plan: &UploadPlan, w: &mut impl io::Write) -> Result<(), Box<dyn Error>> {
        match self.output_format {
            OutputFormat::Json => {
                let json = PlanJson {
                    missing: &plan.missing,
                    pending_bytes: plan.pending_bytes,
                    assemble_timeout_secs: plan.assemble_timeout.as_secs(),
                };
                serde_json::to_writer_pretty(&mut *w, &json)?;
                writeln!(w)?;
            }
            OutputFormat::Table => {
                let ranges: Vec<String> = plan.missing.iter().map(ToString::to_string).collect();
                let width = ranges.iter().map(String::len).max().unwrap_or(0).max(5);
                writeln!(w, "{}", format!("{:>4}  {:<width$}  {:>10}", "#", "RANGE", "SIZE").bold())?;
                for (i, (chunk, range)) in plan.missing.iter().zip(&ranges).enumerate() {
                    writeln!(w, "{:>4}  {range:<width$}  {:>10}", i + 1, chunk.len())?;
                }
                writeln!(
                    w,
                    "{} chunks missing, {} bytes pending, assemble timeout {}",
                    plan.missing.len(),
                    plan.pending_bytes,
                    format_duration(plan.assemble_timeout)
                )?;
            }
        }
        Ok(())
    }
}

/// Formats a duration as minutes and seconds, e.g. `3m`, `1m 30s`, `30s`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    match (secs / 60, secs % 60) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m {s}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_chunk::plan_upload;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(180)), "3m");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(0)), "0s");
    }

    #[test]
    fn test_plan_json() {
        let plan = plan_upload(&[], 2048, 1024).unwrap();
        let mut out = Vec::new();
        PlanFormatter::new(OutputFormat::Json)
            .write_to(&plan, &mut out)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value["missing"],
            serde_json::json!(["0-1023", "1024-2047", "2048-2048"])
        );
        assert_eq!(value["pending_bytes"], 2048);
        assert_eq!(value["assemble_timeout_secs"], 30);
    }

    #[test]
    fn test_plan_table() {
        colored::control::set_override(false);
        let existing = [Chunk::new(0, 1023).unwrap(), Chunk::new(1028, 1100).unwrap()];
        let plan = plan_upload(&existing, 2048, 1024).unwrap();
        let mut out = Vec::new();
        PlanFormatter::new(OutputFormat::Table)
            .write_to(&plan, &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("1024-1027"));
        assert!(lines[1].trim_end().ends_with('4'));
        assert!(lines[2].contains("1101-2048"));
        assert_eq!(
            lines[3],
            "2 chunks missing, 951 bytes pending, assemble timeout 30s"
        );
    }
}
