//! Fixed-coupon bond valuation.
//!
//! Prices a bond as the present value of its coupon and principal cash flows
//! discounted at the periodic yield, and builds the per-period schedule a
//! pricing screen displays alongside the headline price.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::BondCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, ParStatus, Percent, Rate};
use crate::BondCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for bond valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondParameters {
    /// Par / face value (typically 100 or 1000)
    pub face_value: Money,
    /// Annual coupon rate as a percentage (8.6 = 8.6%)
    pub coupon_rate: Percent,
    /// Annual yield to maturity as a percentage; the discount rate
    pub ytm: Percent,
    /// Years to maturity
    pub years: Decimal,
    /// Coupons per year: 1 = annual, 2 = semi-annual, 4 = quarterly
    pub frequency: u32,
}

/// One coupon period of the cash-flow schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPeriod {
    /// 1-based coupon period index
    pub period: u32,
    /// Period expressed in years: period / frequency
    pub year_label: Decimal,
    pub coupon_payment: Money,
    /// Zero except at the final period, where it equals the face value
    pub principal_payment: Money,
    pub total_cash_flow: Money,
    /// Total cash flow discounted back to today
    pub present_value: Money,
}

/// Output of bond valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondValuation {
    /// Present value of all cash flows at the periodic yield, unrounded.
    /// Display rounding is the presentation layer's concern.
    pub bond_price: Money,
    /// Total coupon periods
    pub periods: u32,
    /// Coupon payment per period
    pub periodic_coupon: Money,
    /// Sum of all coupon payments, undiscounted
    pub total_coupon: Money,
    /// Sum of all cash flows (coupons + principal), undiscounted
    pub total_cash_flow: Money,
    /// Annual coupon / bond price; zero when the price is not positive
    pub current_yield: Rate,
    /// Par / premium / discount classification
    pub par_status: ParStatus,
    /// Schedule ordered by period, one entry per coupon period
    pub cash_flows: Vec<CashFlowPeriod>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Value a bond and wrap the result in the standard computation envelope.
///
/// This is the entry point the CLI and the browser bindings call; the
/// envelope carries warnings (e.g. a fractional period count that had to be
/// rounded) and timing metadata on top of the pure valuation.
pub fn value_bond(
    params: &BondParameters,
) -> BondCalcResult<ComputationOutput<BondValuation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let valuation = compute_valuation(params)?;

    let raw_periods = params.years * Decimal::from(params.frequency);
    if !raw_periods.fract().is_zero() {
        warnings.push(format!(
            "years x frequency = {} is not a whole number of coupon periods; rounded to {}",
            raw_periods, valuation.periods
        ));
    }
    if valuation.bond_price <= Decimal::ZERO {
        warnings.push("Bond price is zero or negative; current yield undefined".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Bond Valuation — PV of fixed coupons and principal at the periodic yield",
        params,
        warnings,
        elapsed,
        valuation,
    ))
}

/// Price a bond from its parameters.
///
/// Pure and deterministic: identical parameters produce a bit-identical
/// valuation. Business-rule bounds are the validator's job; only structural
/// input errors and numeric degeneracies fail here.
pub fn compute_valuation(params: &BondParameters) -> BondCalcResult<BondValuation> {
    validate_input(params)?;

    let freq = Decimal::from(params.frequency);
    let periods = count_periods(params.years, freq)?;

    let periodic_coupon = params
        .face_value
        .checked_mul(params.coupon_rate)
        .map(|v| v / dec!(100) / freq)
        .ok_or_else(|| BondCalcError::NumericOverflow {
            context: "periodic coupon".into(),
        })?;
    let periodic_yield = params.ytm / dec!(100) / freq;

    let one_plus_y = Decimal::ONE + periodic_yield;
    if one_plus_y.is_zero() {
        return Err(BondCalcError::DivisionByZero {
            context: "discount base (1 + periodic yield)".into(),
        });
    }

    // Iterative discount factor accumulation; periods are integral so no
    // fractional powers are ever needed.
    let mut cash_flows = Vec::with_capacity(periods as usize);
    let mut bond_price = Decimal::ZERO;
    let mut cumulative_factor = Decimal::ONE;

    for period in 1..=periods {
        cumulative_factor = cumulative_factor.checked_mul(one_plus_y).ok_or_else(|| {
            BondCalcError::NumericOverflow {
                context: format!("discount factor at period {period}"),
            }
        })?;
        if cumulative_factor.is_zero() {
            return Err(BondCalcError::DivisionByZero {
                context: format!("discount factor at period {period}"),
            });
        }

        let principal_payment = if period == periods {
            params.face_value
        } else {
            Decimal::ZERO
        };
        let total_cash_flow = periodic_coupon + principal_payment;
        let present_value = total_cash_flow.checked_div(cumulative_factor).ok_or_else(
            || BondCalcError::NumericOverflow {
                context: format!("present value at period {period}"),
            },
        )?;
        bond_price = bond_price.checked_add(present_value).ok_or_else(|| {
            BondCalcError::NumericOverflow {
                context: format!("price accumulation at period {period}"),
            }
        })?;

        cash_flows.push(CashFlowPeriod {
            period,
            year_label: Decimal::from(period) / freq,
            coupon_payment: periodic_coupon,
            principal_payment,
            total_cash_flow,
            present_value,
        });
    }

    let total_coupon = periodic_coupon
        .checked_mul(Decimal::from(periods))
        .ok_or_else(|| BondCalcError::NumericOverflow {
            context: "total coupon".into(),
        })?;
    let total_cash_flow = total_coupon.checked_add(params.face_value).ok_or_else(|| {
        BondCalcError::NumericOverflow {
            context: "total cash flow".into(),
        }
    })?;

    // equals face x rate / 100
    let annual_coupon = periodic_coupon * freq;
    let current_yield = if bond_price > Decimal::ZERO {
        annual_coupon / bond_price
    } else {
        Decimal::ZERO
    };

    let par_status = if params.coupon_rate > params.ytm {
        ParStatus::Premium
    } else if params.coupon_rate < params.ytm {
        ParStatus::Discount
    } else {
        ParStatus::Par
    };

    Ok(BondValuation {
        bond_price,
        periods,
        periodic_coupon,
        total_coupon,
        total_cash_flow,
        current_yield,
        par_status,
        cash_flows,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(params: &BondParameters) -> BondCalcResult<()> {
    if params.face_value <= Decimal::ZERO {
        return Err(BondCalcError::InvalidInput {
            field: "face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    if params.frequency == 0 {
        return Err(BondCalcError::InvalidInput {
            field: "frequency".into(),
            reason: "Payment frequency must be at least 1 coupon per year".into(),
        });
    }
    if params.years <= Decimal::ZERO {
        return Err(BondCalcError::InvalidInput {
            field: "years".into(),
            reason: "Years to maturity must be positive".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Period count
// ---------------------------------------------------------------------------

/// Round years x frequency to the nearest whole coupon count, half away from
/// zero.
fn count_periods(years: Decimal, freq: Decimal) -> BondCalcResult<u32> {
    let raw = years
        .checked_mul(freq)
        .ok_or_else(|| BondCalcError::NumericOverflow {
            context: "years x frequency".into(),
        })?;
    let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let periods = rounded.to_u32().ok_or_else(|| BondCalcError::InvalidInput {
        field: "years".into(),
        reason: format!("years x frequency = {raw} does not yield a usable coupon count"),
    })?;
    if periods == 0 {
        return Err(BondCalcError::InvalidInput {
            field: "years".into(),
            reason: "Bond must have at least one coupon period".into(),
        });
    }
    Ok(periods)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
