use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use bond_calc_core::validator;
use bond_calc_core::valuation::bond::{self, BondParameters};

use crate::input;

/// Bond parameters, supplied via flags, a JSON file, or piped stdin JSON.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ParamArgs {
    /// Par / face value
    #[arg(long)]
    pub face_value: Option<Decimal>,

    /// Annual coupon rate as a percentage (8.6 = 8.6%)
    #[arg(long)]
    pub coupon_rate: Option<Decimal>,

    /// Annual yield to maturity as a percentage
    #[arg(long)]
    pub ytm: Option<Decimal>,

    /// Years to maturity
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Coupons per year: 1 = annual, 2 = semi-annual, 4 = quarterly
    #[arg(long, default_value = "2")]
    pub frequency: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for bond pricing
#[derive(Args)]
pub struct PriceArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Skip business-rule bounds and price with engine checks only
    #[arg(long)]
    pub skip_validation: bool,
}

/// Arguments for parameter validation
#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub params: ParamArgs,
}

pub fn run_price(args: PriceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_parameters(&args.params)?;
    if !args.skip_validation {
        validator::validate_bounds(&params)?;
    }
    let result = bond::value_bond(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_check(args: CheckArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_parameters(&args.params)?;
    validator::validate_bounds(&params)?;
    Ok(json!({ "valid": true }))
}

/// Build bond parameters from the file, stdin, or flag sources, in that
/// order of precedence.
fn resolve_parameters(args: &ParamArgs) -> Result<BondParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return Ok(input::file::read_json(path)?);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }

    let face_value = args
        .face_value
        .ok_or("--face-value required (or use --input / stdin)")?;
    let coupon_rate = args
        .coupon_rate
        .ok_or("--coupon-rate required (or use --input / stdin)")?;
    let ytm = args.ytm.ok_or("--ytm required (or use --input / stdin)")?;
    let years = args.years.ok_or("--years required (or use --input / stdin)")?;

    Ok(BondParameters {
        face_value,
        coupon_rate,
        ytm,
        years,
        frequency: args.frequency,
    })
}
