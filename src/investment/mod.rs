//! Investment input and its mapping onto XIRR cash flows

mod data;
mod flows;
pub mod loader;

pub use data::{
    CashFlowEntry, CashFlowUpdate, Currency, ExitPlan, ExitStrategy, FlowKind, InvestmentData,
    NewCashFlow, PaymentTerms, PropertyDetails,
};
pub use flows::{build_cash_flows, calculate_investment_return};
pub use loader::load_investment;
