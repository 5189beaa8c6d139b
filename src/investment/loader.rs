//! Load investment input from JSON

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::data::InvestmentData;
use crate::error::ReturnsResult;

pub fn load_investment(path: &Path) -> ReturnsResult<InvestmentData> {
    let file = File::open(path)?;
    let data: InvestmentData = serde_json::from_reader(BufReader::new(file))?;
    log::debug!(
        "Loaded investment '{}' with {} additional cash flows",
        data.property.project_name,
        data.additional_cash_flows.len()
    );
    Ok(data)
}
