//! Service layer: business logic orchestration.
//!
//! [`MeterService`] coordinates reading ingestion, aggregation reports,
//! fixture seeding, and the simulated payment stub, delegating price
//! arithmetic to [`BillingCalculator`].

pub mod billing;
pub mod fixtures;
pub mod meter_service;

pub use billing::BillingCalculator;
pub use meter_service::{
    DailySeriesReport, MeterService, MonthlyConsumptionReport, PaymentReceipt,
};
