//! Table export: CSV for spreadsheets, JSON for tooling.
//!
//! Undefined indicator values (NaN) are written as empty CSV cells and as
//! `null` in JSON.

use anyhow::{Context, Result};
use shoelab_core::engine::RoundTable;
use shoelab_core::session::Summary;

fn cell(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        format!("{v:.6}")
    }
}

/// Export the derived table as CSV, one row per round.
pub fn export_table_csv(table: &RoundTable) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "round_num",
        "outcome",
        "class",
        "p1",
        "p2",
        "p3",
        "p4",
        "cumulative",
        "rsi_p3",
        "rsi_p4",
        "support",
        "resistance",
        "slope_p3",
        "slope_p4",
        "slope_p3_long",
        "slope_p4_long",
        "decision",
        "bankroll",
        "profit",
    ])?;

    for r in table.records() {
        wtr.write_record([
            &r.round_num.to_string(),
            &r.outcome.to_string(),
            &r.class.to_string(),
            &cell(r.p1),
            &cell(r.p2),
            &cell(r.p3),
            &cell(r.p4),
            &cell(r.cumulative),
            &cell(r.rsi_p3),
            &cell(r.rsi_p4),
            &cell(r.support),
            &cell(r.resistance),
            &cell(r.slope_p3),
            &cell(r.slope_p4),
            &cell(r.slope_p3_long),
            &cell(r.slope_p4_long),
            &r.decision.to_string(),
            &format!("{:.2}", r.bankroll),
            &format!("{:.2}", r.profit),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

pub fn export_summary_json(summary: &Summary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to serialize summary to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoelab_core::config::EngineConfig;
    use shoelab_core::domain::{History, Outcome};
    use shoelab_core::engine::recompute;

    fn table(s: &[Outcome]) -> RoundTable {
        recompute(&History::from_outcomes(s.iter().copied()), &EngineConfig::default()).unwrap()
    }

    #[test]
    fn csv_has_header_and_one_row_per_round() {
        let csv = export_table_csv(&table(&[Outcome::Player, Outcome::Banker])).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("round_num,outcome,class"));
        assert!(lines[1].starts_with("1,Player,0,"));
        assert!(lines[2].starts_with("2,Banker,2,"));
    }

    #[test]
    fn undefined_values_are_blank() {
        let csv = export_table_csv(&table(&[Outcome::Player])).unwrap();
        let row: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        // rsi_p3 column
        assert_eq!(row[8], "");
        assert_eq!(row[16], "No Bet");
        assert_eq!(row[17], "5000.00");
    }
}
