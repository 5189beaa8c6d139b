//! Map structured investment input onto dated cash flows for the XIRR solver

use chrono::{Months, NaiveDate};

use super::data::{ExitPlan, InvestmentData, PaymentTerms};
use crate::error::{ensure_finite, ensure_non_negative, ensure_percent, ReturnsError, ReturnsResult};
use crate::projection::ProjectionResult;
use crate::xirr::{solve, CashFlow, XirrResult};

impl ExitPlan {
    /// Rent for `hold_years` of projected take-home profit, then sell on `sale_date`
    pub fn rent_resell_from_projection(projection: &ProjectionResult, hold_years: u32, sale_date: NaiveDate) -> Self {
        ExitPlan::RentResell {
            rental_income: projection
                .years
                .iter()
                .take(hold_years as usize)
                .map(|r| r.take_home_profit)
                .collect(),
            sale_date,
        }
    }

    /// Keep the property for the whole projection horizon
    pub fn milk_cow_from_projection(projection: &ProjectionResult) -> Self {
        ExitPlan::MilkCow {
            rental_income: projection.years.iter().map(|r| r.take_home_profit).collect(),
        }
    }
}

/// Build the investment's cash flows in display order: purchase payments,
/// additional entries, then exit flows.
pub fn build_cash_flows(data: &InvestmentData) -> ReturnsResult<Vec<CashFlow>> {
    validate(data)?;

    let property = &data.property;
    let mut flows = Vec::new();

    match &data.payment {
        PaymentTerms::Full => {
            flows.push(CashFlow::new(property.purchase_date, -property.total_price));
        }
        PaymentTerms::Plan { installment_months, .. } => {
            let down_payment = data.payment.down_payment(property.total_price);
            let installment = data.payment.installment_amount(property.total_price);
            flows.push(CashFlow::new(property.purchase_date, -down_payment));

            if *installment_months == 0 {
                flows.push(CashFlow::new(property.handover_date, -installment));
            } else {
                for k in 1..=*installment_months {
                    let due = add_months(property.purchase_date, k)?;
                    flows.push(CashFlow::new(due, -installment));
                }
            }
        }
    }

    flows.extend(
        data.additional_cash_flows
            .iter()
            .map(|e| CashFlow::new(e.date, e.signed_amount())),
    );

    let proceeds = data.exit.net_sale_proceeds();
    match &data.exit.plan {
        ExitPlan::Flip => {
            flows.push(CashFlow::new(property.handover_date, proceeds));
        }
        ExitPlan::RentResell { rental_income, sale_date } => {
            push_rental_income(&mut flows, property.handover_date, rental_income)?;
            flows.push(CashFlow::new(*sale_date, proceeds));
        }
        ExitPlan::MilkCow { rental_income } => {
            push_rental_income(&mut flows, property.handover_date, rental_income)?;
        }
    }

    Ok(flows)
}

/// Build the cash flows and solve for the annualized return
pub fn calculate_investment_return(data: &InvestmentData) -> ReturnsResult<XirrResult> {
    let flows = build_cash_flows(data)?;
    log::debug!(
        "Solving XIRR for '{}' over {} cash flows",
        data.property.project_name,
        flows.len()
    );
    solve(&flows)
}

/// Year k's income lands on the k-th anniversary of handover
fn push_rental_income(flows: &mut Vec<CashFlow>, handover: NaiveDate, income: &[f64]) -> ReturnsResult<()> {
    for (i, amount) in income.iter().enumerate() {
        let date = add_months(handover, 12 * (i as u32 + 1))?;
        flows.push(CashFlow::new(date, *amount));
    }
    Ok(())
}

fn add_months(date: NaiveDate, months: u32) -> ReturnsResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| ReturnsError::Date(format!("{} + {} months is out of range", date, months)))
}

fn validate(data: &InvestmentData) -> ReturnsResult<()> {
    let property = &data.property;
    ensure_non_negative("property.total_price", property.total_price)?;
    if property.handover_date < property.purchase_date {
        return Err(ReturnsError::invalid(
            "property.handover_date",
            format!("{} precedes purchase date {}", property.handover_date, property.purchase_date),
        ));
    }

    if let PaymentTerms::Plan { down_payment_percent, .. } = data.payment {
        ensure_percent("payment.down_payment_percent", down_payment_percent)?;
    }

    ensure_non_negative("exit.projected_sales_price", data.exit.projected_sales_price)?;
    ensure_percent("exit.closing_cost_percent", data.exit.closing_cost_percent)?;

    match &data.exit.plan {
        ExitPlan::Flip => {}
        ExitPlan::RentResell { rental_income, sale_date } => {
            ensure_income("exit.plan.rental_income", rental_income)?;
            if *sale_date < property.handover_date {
                return Err(ReturnsError::invalid(
                    "exit.plan.sale_date",
                    format!("{} precedes handover {}", sale_date, property.handover_date),
                ));
            }
            let last_income = add_months(property.handover_date, 12 * rental_income.len() as u32)?;
            if last_income > *sale_date {
                return Err(ReturnsError::invalid(
                    "exit.plan.rental_income",
                    format!(
                        "{} years of income run to {}, after the sale on {}",
                        rental_income.len(),
                        last_income,
                        sale_date
                    ),
                ));
            }
        }
        ExitPlan::MilkCow { rental_income } => {
            ensure_income("exit.plan.rental_income", rental_income)?;
            if rental_income.is_empty() {
                log::warn!("Milk-cow exit without rental income has no inflows");
            }
        }
    }

    for entry in &data.additional_cash_flows {
        ensure_non_negative(&format!("additional_cash_flows[{}].amount", entry.id), entry.amount)?;
    }

    Ok(())
}

/// Rental income may be negative in a loss year but must be finite
fn ensure_income(field: &str, income: &[f64]) -> ReturnsResult<()> {
    for (i, amount) in income.iter().enumerate() {
        ensure_finite(&format!("{}[{}]", field, i), *amount)?;
    }
    Ok(())
}
