//! Read and write cash-flow lists as CSV
//!
//! Columns: `date` (ISO 8601, e.g. 2025-01-31) and `amount` (signed).

use std::io::{Read, Write};
use std::path::Path;

use super::cashflow::CashFlow;
use crate::error::ReturnsResult;

pub fn load_cash_flows(path: &Path) -> ReturnsResult<Vec<CashFlow>> {
    let flows = read_cash_flows(std::fs::File::open(path)?)?;
    log::debug!("Loaded {} cash flows from {}", flows.len(), path.display());
    Ok(flows)
}

pub fn read_cash_flows<R: Read>(reader: R) -> ReturnsResult<Vec<CashFlow>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut flows = Vec::new();
    for record in reader.deserialize() {
        let flow: CashFlow = record?;
        flows.push(flow);
    }

    Ok(flows)
}

pub fn write_cash_flows<W: Write>(writer: W, flows: &[CashFlow]) -> ReturnsResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for flow in flows {
        writer.serialize(flow)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReturnsError;
    use chrono::NaiveDate;

    #[test]
    fn test_read_cash_flows() {
        let data = "date,amount\n2025-01-01, -1000000\n2026-01-01,1200000.5\n";
        let flows = read_cash_flows(data.as_bytes()).unwrap();

        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(flows[0].amount, -1_000_000.0);
        assert_eq!(flows[1].amount, 1_200_000.5);
    }

    #[test]
    fn test_bundled_flows_solve() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/flows.csv");
        let flows = load_cash_flows(&path).unwrap();
        assert_eq!(flows.len(), 4);

        let result = crate::xirr::solve(&flows).unwrap();
        assert!(result.rate > 0.05 && result.rate < 0.20, "rate {}", result.rate);
        assert_eq!(result.total_invested, 1_250_000.0);
        assert_eq!(result.hold_period_months, 24);
    }

    #[test]
    fn test_bad_date_is_csv_error() {
        let data = "date,amount\n01/02/2025,-100\n";
        assert!(matches!(read_cash_flows(data.as_bytes()), Err(ReturnsError::Csv(_))));
    }

    #[test]
    fn test_write_then_read() {
        let flows = vec![
            CashFlow::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), -250.0),
            CashFlow::new(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), 300.0),
        ];
        let mut buffer = Vec::new();
        write_cash_flows(&mut buffer, &flows).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("date,amount"));
        assert_eq!(read_cash_flows(buffer.as_slice()).unwrap(), flows);
    }
}
