//! Custom Test Assertions
//!
//! Assertion helpers for money and installment plans that give more
//! meaningful failure messages than plain `assert_eq!`.

use core_kernel::{BillingMonth, Money};
use domain_fees::{FeeTerms, Installment, InstallmentStatus, CYCLE_MONTHS};
use rust_decimal::Decimal;

/// Asserts that a Money value has the given amount
///
/// # Panics
///
/// Panics if the amounts differ.
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Money mismatch: actual={} {}, expected={}",
        actual.currency().symbol(),
        actual.amount(),
        expected
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that installments cover the 12 months from `start` exactly once
/// and in order
///
/// # Panics
///
/// Panics on a missing, repeated or out-of-order month, or when
/// installment numbers do not run 1..=n.
pub fn assert_partitions_cycle(installments: &[Installment], start: BillingMonth) {
    let covered: Vec<&str> = installments
        .iter()
        .flat_map(|i| i.months_covered.iter().map(String::as_str))
        .collect();
    let expected: Vec<&str> = start.iter(CYCLE_MONTHS).map(|m| m.name()).collect();
    assert_eq!(
        covered, expected,
        "Installments do not cover the cycle starting {}",
        start
    );

    for (index, installment) in installments.iter().enumerate() {
        assert_eq!(
            installment.installment_number as usize,
            index + 1,
            "Installment numbers must run from 1 without gaps"
        );
    }
}

/// Asserts that due dates are strictly increasing
pub fn assert_due_dates_increasing(installments: &[Installment]) {
    for pair in installments.windows(2) {
        assert!(
            pair[0].due_date < pair[1].due_date,
            "Installment {} is due {} but installment {} is due {}",
            pair[0].installment_number,
            pair[0].due_date,
            pair[1].installment_number,
            pair[1].due_date
        );
    }
}

/// Asserts that the installments add up to the cycle total of `terms`
pub fn assert_sum_equals_cycle_total(installments: &[Installment], terms: &FeeTerms) {
    let expected = terms.cycle_total().expect("terms are billable");
    let actual = Money::sum(expected.currency(), installments.iter().map(|i| &i.total_amount))
        .expect("installments share a currency");
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Installments sum to {} but the cycle bills {}",
        actual,
        expected
    );
}

/// Asserts that every installment is freshly planned: pending, unpaid, and
/// with base minus discount equal to total
pub fn assert_freshly_planned(installments: &[Installment]) {
    for installment in installments {
        assert_eq!(installment.status, InstallmentStatus::Pending);
        assert_money_zero(&installment.paid_amount);
        assert_eq!(installment.balance_amount, installment.total_amount);
        assert_eq!(
            installment.base_amount.amount() - installment.discount_amount.amount(),
            installment.total_amount.amount(),
            "Installment {} does not satisfy base - discount = total",
            installment.installment_number
        );
    }
}
