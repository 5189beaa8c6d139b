//! Structured off-plan investment input

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display currency of the amounts; conversion happens outside this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Idr,
    Usd,
    Aud,
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Idr => "IDR",
            Currency::Usd => "USD",
            Currency::Aud => "AUD",
            Currency::Eur => "EUR",
        }
    }
}

/// The property being bought
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub project_name: String,
    pub location: String,
    pub total_price: f64,
    /// Contract signing; the down payment (or full payment) falls here
    pub purchase_date: NaiveDate,
    /// Keys handed over; flips exit here
    pub handover_date: NaiveDate,
    pub currency: Currency,
}

/// How the purchase price is paid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentTerms {
    /// 100% upfront on the purchase date
    Full,
    /// Down payment on the purchase date, remainder in equal monthly installments
    Plan {
        down_payment_percent: f64,
        installment_months: u32,
    },
}

impl PaymentTerms {
    pub fn down_payment(&self, total_price: f64) -> f64 {
        match self {
            PaymentTerms::Full => total_price,
            PaymentTerms::Plan { down_payment_percent, .. } => total_price * down_payment_percent / 100.0,
        }
    }

    /// Amount of each monthly installment, or the lump balance when there are none
    pub fn installment_amount(&self, total_price: f64) -> f64 {
        let remaining = total_price - self.down_payment(total_price);
        match self {
            PaymentTerms::Plan { installment_months, .. } if *installment_months > 0 => {
                remaining / *installment_months as f64
            }
            _ => remaining,
        }
    }
}

/// Cash-flow construction rule for leaving the investment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ExitPlan {
    /// Sell at handover
    #[default]
    Flip,
    /// Rent out after handover, one income figure per year, then sell on `sale_date`
    RentResell {
        rental_income: Vec<f64>,
        sale_date: NaiveDate,
    },
    /// Keep renting; yearly income only, no sale
    MilkCow { rental_income: Vec<f64> },
}

/// Exit terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitStrategy {
    pub projected_sales_price: f64,
    pub closing_cost_percent: f64,
    #[serde(default)]
    pub plan: ExitPlan,
}

impl ExitStrategy {
    pub fn closing_costs(&self) -> f64 {
        self.projected_sales_price * self.closing_cost_percent / 100.0
    }

    pub fn net_sale_proceeds(&self) -> f64 {
        self.projected_sales_price * (1.0 - self.closing_cost_percent / 100.0)
    }

    /// Price appreciation over `total_price` in percent
    pub fn appreciation_pct(&self, total_price: f64) -> Option<f64> {
        if total_price == 0.0 {
            None
        } else {
            Some((self.projected_sales_price - total_price) / total_price * 100.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    Inflow,
    Outflow,
}

/// An ad hoc income or expense entered by the investor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    pub id: u32,
    pub date: NaiveDate,
    pub description: String,
    pub kind: FlowKind,
    /// Magnitude; `kind` gives the sign
    pub amount: f64,
}

impl CashFlowEntry {
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            FlowKind::Inflow => self.amount,
            FlowKind::Outflow => -self.amount,
        }
    }
}

/// A new entry before it is assigned an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewCashFlow {
    pub date: NaiveDate,
    pub description: String,
    pub kind: FlowKind,
    pub amount: f64,
}

/// Partial update of an existing entry; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashFlowUpdate {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub kind: Option<FlowKind>,
    pub amount: Option<f64>,
}

/// Complete investment input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentData {
    pub property: PropertyDetails,
    pub payment: PaymentTerms,
    pub exit: ExitStrategy,
    #[serde(default)]
    pub additional_cash_flows: Vec<CashFlowEntry>,
}

impl Default for InvestmentData {
    /// Sample off-plan villa: 50% down, five installments, flip at handover
    fn default() -> Self {
        let purchase_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
        let handover_date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default();

        Self {
            property: PropertyDetails {
                project_name: "Villa Matahari Phase 1".into(),
                location: "Canggu, Bali".into(),
                total_price: 3_500_000_000.0,
                purchase_date,
                handover_date,
                currency: Currency::Idr,
            },
            payment: PaymentTerms::Plan {
                down_payment_percent: 50.0,
                installment_months: 5,
            },
            exit: ExitStrategy {
                projected_sales_price: 4_200_000_000.0,
                closing_cost_percent: 2.5,
                plan: ExitPlan::Flip,
            },
            additional_cash_flows: vec![CashFlowEntry {
                id: 1,
                date: purchase_date,
                description: "Furniture Package".into(),
                kind: FlowKind::Outflow,
                amount: 150_000_000.0,
            }],
        }
    }
}

impl InvestmentData {
    pub fn with_property(&self, property: PropertyDetails) -> Self {
        Self {
            property,
            ..self.clone()
        }
    }

    pub fn with_payment(&self, payment: PaymentTerms) -> Self {
        Self {
            payment,
            ..self.clone()
        }
    }

    pub fn with_exit(&self, exit: ExitStrategy) -> Self {
        Self {
            exit,
            ..self.clone()
        }
    }

    /// Append an entry with the next free id
    pub fn add_cash_flow(&self, entry: NewCashFlow) -> Self {
        let id = self.additional_cash_flows.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let mut additional_cash_flows = self.additional_cash_flows.clone();
        additional_cash_flows.push(CashFlowEntry {
            id,
            date: entry.date,
            description: entry.description,
            kind: entry.kind,
            amount: entry.amount,
        });
        Self {
            additional_cash_flows,
            ..self.clone()
        }
    }

    pub fn remove_cash_flow(&self, id: u32) -> Self {
        Self {
            additional_cash_flows: self
                .additional_cash_flows
                .iter()
                .filter(|e| e.id != id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Apply `update` to the entry with `id`; unknown ids leave the data unchanged
    pub fn update_cash_flow(&self, id: u32, update: CashFlowUpdate) -> Self {
        let additional_cash_flows = self
            .additional_cash_flows
            .iter()
            .map(|e| {
                if e.id != id {
                    return e.clone();
                }
                CashFlowEntry {
                    id: e.id,
                    date: update.date.unwrap_or(e.date),
                    description: update.description.clone().unwrap_or_else(|| e.description.clone()),
                    kind: update.kind.unwrap_or(e.kind),
                    amount: update.amount.unwrap_or(e.amount),
                }
            })
            .collect();
        Self {
            additional_cash_flows,
            ..self.clone()
        }
    }
}
