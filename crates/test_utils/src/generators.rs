//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random fee inputs that keep
//! domain invariants: discounts never exceed the fee and start months are
//! real calendar months.

use core_kernel::{BillingMonth, Currency, Money};
use domain_fees::{Discount, FeePlan, FeeTerms};
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Strategy for any of the four fee plans
pub fn fee_plan_strategy() -> impl Strategy<Value = FeePlan> {
    prop_oneof![
        Just(FeePlan::Monthly),
        Just(FeePlan::Quarterly),
        Just(FeePlan::SemiAnnual),
        Just(FeePlan::Annual),
    ]
}

/// Strategy for plan names as a form would submit them
pub fn fee_plan_name_strategy() -> impl Strategy<Value = String> {
    fee_plan_strategy().prop_map(|plan| plan.as_str().to_string())
}

pub fn start_month_strategy() -> impl Strategy<Value = u32> {
    1u32..=12u32
}

pub fn start_year_strategy() -> impl Strategy<Value = i32> {
    2000i32..2100i32
}

pub fn billing_month_strategy() -> impl Strategy<Value = BillingMonth> {
    (start_year_strategy(), start_month_strategy())
        .prop_map(|(year, month)| BillingMonth::new(year, month).expect("valid month"))
}

/// Strategy for positive monthly fees in minor units (0.01 to 100,000.00)
pub fn monthly_fee_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..10_000_000i64
}

/// Strategy for positive monthly fees in PKR
pub fn monthly_fee_strategy() -> impl Strategy<Value = Money> {
    monthly_fee_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::PKR))
}

/// Strategy for percentages between 0 and 100 with up to two decimals
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for a discount that is valid against `fee`
///
/// Fixed discounts are drawn between zero and the fee itself.
pub fn discount_strategy(fee: Money) -> impl Strategy<Value = Discount> {
    let max_minor = (fee.amount() * Decimal::ONE_HUNDRED).trunc().to_i64().unwrap_or(0);
    prop_oneof![
        Just(Discount::none()),
        percentage_strategy().prop_map(Discount::percentage),
        (0i64..=max_minor).prop_map(|minor| Discount::fixed(Decimal::new(minor, 2))),
    ]
}

/// Strategy for complete, valid fee terms in PKR
pub fn fee_terms_strategy() -> impl Strategy<Value = FeeTerms> {
    (monthly_fee_strategy(), fee_plan_strategy(), billing_month_strategy()).prop_flat_map(
        |(monthly_fee, fee_plan, start)| {
            discount_strategy(monthly_fee).prop_map(move |discount| FeeTerms {
                monthly_fee,
                discount,
                fee_plan,
                start,
            })
        },
    )
}
