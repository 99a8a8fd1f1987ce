//! # ql-cashflows
//!
//! The fee (premium) leg of a credit default swap: its coupon cash flows
//! and its accrual-on-default integral.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cashflow;

/// The accrual-on-default integral (`JpmcdsAccrualOnDefaultPVWithTimeLine`).
pub mod accrual_on_default;

/// `FeeLeg` — the premium leg of a CDS: coupon cash flows plus, optionally,
/// the accrual paid on default.
pub mod fee_leg;

pub use accrual_on_default::accrual_on_default_pv;
pub use cashflow::{CashFlow, Leg, Redemption, SimpleCashFlow};
pub use fee_leg::{AccrualPaymentConvention, AccrualPeriod, FeeLeg};
