//! Integration tests for the installment planner
//!
//! Worked examples first, then the invariants every plan must satisfy,
//! checked over generated fee terms.

use chrono::NaiveDate;
use core_kernel::{BillingMonth, Currency, Money};
use domain_fees::{
    compute_installments, Discount, DiscountType, FeeError, FeePlan, InstallmentPlanner,
};
use proptest::prelude::*;
use rust_decimal_macros::dec;
use test_utils::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod worked_examples {
    use super::*;

    #[test]
    fn test_monthly_plan_from_january() {
        let plan = compute_installments(dec!(1000), DiscountType::None, dec!(0), FeePlan::Monthly, 1, 2025).unwrap();

        assert_eq!(plan.len(), 12);
        assert_eq!(plan[0].period_label, "January 2025");
        assert_money_eq(&plan[0].total_amount, dec!(1000));
        assert_eq!(plan[0].due_date, date(2025, 1, 10));
        assert_eq!(plan[11].period_label, "December 2025");
        assert_money_eq(&plan[11].total_amount, dec!(1000));
        assert_eq!(plan[11].due_date, date(2025, 12, 10));
    }

    #[test]
    fn test_quarterly_plan_with_percentage_discount() {
        let plan = compute_installments(dec!(2000), DiscountType::Percentage, dec!(10), FeePlan::Quarterly, 1, 2025).unwrap();

        assert_eq!(plan.len(), 4);
        for installment in &plan {
            assert_money_eq(&installment.total_amount, dec!(5400));
            assert_money_eq(&installment.discount_amount, dec!(600));
            assert_money_eq(&installment.base_amount, dec!(6000));
        }
        assert_eq!(plan[0].period_label, "Q1 (January-March) 2025");
        assert_eq!(plan[0].due_date, date(2025, 1, 10));
        assert_eq!(plan[3].period_label, "Q4 (October-December) 2025");
    }

    #[test]
    fn test_monthly_plan_rolls_into_next_year() {
        let plan = compute_installments(dec!(1500), DiscountType::None, dec!(0), FeePlan::Monthly, 11, 2025).unwrap();

        assert_eq!(plan[1].months_covered, vec!["December"]);
        assert_eq!(plan[1].due_date, date(2025, 12, 10));
        assert_eq!(plan[2].period_label, "January 2026");
        assert_eq!(plan[2].due_date, date(2026, 1, 10));
    }

    #[test]
    fn test_annual_plan_from_june() {
        let plan = compute_installments(dec!(1800), DiscountType::Fixed, dec!(300), FeePlan::Annual, 6, 2025).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(
            plan[0].months_covered,
            vec![
                "June", "July", "August", "September", "October", "November",
                "December", "January", "February", "March", "April", "May",
            ]
        );
        assert_eq!(plan[0].period_label, "Annual 2026");
        assert_money_eq(&plan[0].total_amount, dec!(18000));
        assert_eq!(plan[0].due_date, date(2025, 6, 10));
    }

    #[test]
    fn test_semi_annual_plan_straddling_the_year() {
        let plan = compute_installments(dec!(2500), DiscountType::None, dec!(0), FeePlan::SemiAnnual, 9, 2025).unwrap();

        assert_eq!(plan[0].period_label, "H1 (September-February) 2026");
        assert_eq!(plan[0].due_date, date(2025, 9, 10));
        assert_eq!(plan[1].period_label, "H2 (March-August) 2026");
        assert_eq!(plan[1].due_date, date(2026, 3, 10));
    }
}

mod validation {
    use super::*;

    #[test]
    fn test_discount_above_fee_is_not_clamped() {
        let err = compute_installments(dec!(1000), DiscountType::Fixed, dec!(1200), FeePlan::Monthly, 1, 2025).unwrap_err();
        assert!(matches!(err, FeeError::NegativeFinalFee { .. }));
    }

    #[test]
    fn test_unknown_plan_string() {
        let err = "fortnightly".parse::<FeePlan>().unwrap_err();
        assert!(matches!(err, FeeError::InvalidConfiguration { ref field, .. } if field == "fee_plan"));
    }

    #[test]
    fn test_month_out_of_range() {
        let err = compute_installments(dec!(1000), DiscountType::None, dec!(0), FeePlan::Monthly, 0, 2025).unwrap_err();
        assert!(matches!(err, FeeError::InvalidConfiguration { ref field, .. } if field == "start_month"));
    }

    #[test]
    fn test_start_year_past_the_calendar() {
        let err = compute_installments(dec!(1000), DiscountType::None, dec!(0), FeePlan::Monthly, 12, i32::MAX).unwrap_err();
        assert!(matches!(err, FeeError::InvalidConfiguration { ref field, .. } if field == "start_year"));
    }

    #[test]
    fn test_fee_overflowing_the_installment_is_rejected() {
        let err = compute_installments(
            dec!(30000000000000000000000000000),
            DiscountType::None,
            dec!(0),
            FeePlan::Quarterly,
            1,
            2025,
        )
        .unwrap_err();
        assert!(matches!(err, FeeError::InvalidConfiguration { ref field, .. } if field == "monthly_fee"));
    }

    #[test]
    fn test_fee_below_minor_unit_is_rejected() {
        let err = compute_installments(dec!(1000.005), DiscountType::None, dec!(0), FeePlan::Monthly, 1, 2025).unwrap_err();
        assert!(matches!(err, FeeError::InvalidConfiguration { ref field, .. } if field == "monthly_fee"));
    }

    #[test]
    fn test_planner_rejects_foreign_currency_terms() {
        let terms = FeeEnrollmentBuilder::new()
            .with_fee(Money::new(dec!(100), Currency::USD))
            .terms();
        assert!(InstallmentPlanner::default().compute_installments(&terms).is_err());
    }
}

mod invariants {
    use super::*;

    proptest! {
        #[test]
        fn plan_partitions_the_cycle(terms in fee_terms_strategy()) {
            let plan = InstallmentPlanner::default().compute_installments(&terms).unwrap();
            prop_assert_eq!(plan.len() as u32, terms.fee_plan.installment_count());
            assert_partitions_cycle(&plan, terms.start);
        }

        #[test]
        fn plan_sums_to_twelve_final_fees(terms in fee_terms_strategy()) {
            let plan = InstallmentPlanner::default().compute_installments(&terms).unwrap();
            assert_sum_equals_cycle_total(&plan, &terms);
            assert_freshly_planned(&plan);
        }

        #[test]
        fn due_dates_increase_on_the_due_day(terms in fee_terms_strategy(), due_day in 1u32..=28) {
            let planner = InstallmentPlanner::default().with_due_day(due_day).unwrap();
            let plan = planner.compute_installments(&terms).unwrap();
            assert_due_dates_increasing(&plan);
            prop_assert!(plan.iter().all(|i| chrono::Datelike::day(&i.due_date) == due_day));
            prop_assert_eq!(BillingMonth::containing(plan[0].due_date), terms.start);
        }

        #[test]
        fn planning_is_idempotent(terms in fee_terms_strategy()) {
            let planner = InstallmentPlanner::default();
            prop_assert_eq!(
                planner.compute_installments(&terms).unwrap(),
                planner.compute_installments(&terms).unwrap()
            );
        }

        #[test]
        fn plan_names_parse_back(name in fee_plan_name_strategy()) {
            let plan: FeePlan = name.parse().unwrap();
            prop_assert_eq!(plan.as_str(), name.as_str());
        }

        #[test]
        fn percentage_discounts_never_exceed_the_fee(fee in monthly_fee_strategy(), pct in percentage_strategy()) {
            let discount = Discount::percentage(pct).amount(&fee).unwrap();
            prop_assert!(discount.amount() <= fee.amount());
        }
    }
}
