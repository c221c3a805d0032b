//! Integration tests for planning request documents

use interface_cli::config::PlannerConfig;
use interface_cli::error::CliError;
use interface_cli::{plan_document, plan_request};
use rust_decimal_macros::dec;
use test_utils::*;

fn document(builder: EnrollmentRequestBuilder) -> String {
    serde_json::to_string(&builder.build()).unwrap()
}

mod planning {
    use super::*;

    #[test]
    fn test_monthly_plan_over_year_boundary() {
        let input = document(
            EnrollmentRequestBuilder::new()
                .with_plan("monthly")
                .with_monthly_fee(dec!(1500))
                .starting(11, 2025),
        );

        let installments = plan_request(&input, &PlannerConfig::default()).unwrap();

        assert_eq!(installments.len(), 12);
        assert_eq!(installments[0].period_label, "November 2025");
        assert_eq!(installments[2].period_label, "January 2026");
        assert_eq!(installments[11].period_label, "October 2026");
        assert_partitions_cycle(&installments, CalendarFixtures::november_2025());
        assert_due_dates_increasing(&installments);
    }

    #[test]
    fn test_configured_due_day_and_currency() {
        let config = PlannerConfig {
            currency: "INR".to_string(),
            due_day: 5,
            ..PlannerConfig::default()
        };
        let input = document(EnrollmentRequestBuilder::new().with_plan("semi-annual"));

        let installments = plan_request(&input, &config).unwrap();

        assert_eq!(installments.len(), 2);
        assert_eq!(installments[0].due_date, CalendarFixtures::date(2025, 4, 5));
        assert_eq!(installments[1].due_date, CalendarFixtures::date(2025, 10, 5));
        assert_eq!(installments[0].total_amount.currency(), core_kernel::Currency::INR);
    }

    #[test]
    fn test_document_round_trips_installment_fields() {
        let input = document(
            EnrollmentRequestBuilder::new()
                .with_plan("annual")
                .with_discount("fixed", dec!(200)),
        );

        let output = plan_document(&input, &PlannerConfig::default()).unwrap();
        let installments: Vec<domain_fees::Installment> = serde_json::from_str(&output).unwrap();

        assert_eq!(installments.len(), 1);
        assert_eq!(installments[0].period_label, "Annual 2026");
        assert_money_eq(&installments[0].base_amount, dec!(24000));
        assert_money_eq(&installments[0].discount_amount, dec!(2400));
        assert_money_eq(&installments[0].total_amount, dec!(21600));
    }
}

mod rejection {
    use super::*;

    #[test]
    fn test_month_out_of_range() {
        let input = document(EnrollmentRequestBuilder::new().starting(13, 2025));
        let err = plan_request(&input, &PlannerConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Fee(ref e) if e.is_validation()));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_percentage_above_hundred() {
        let input = document(EnrollmentRequestBuilder::new().with_discount("percentage", dec!(150)));
        assert!(plan_request(&input, &PlannerConfig::default()).is_err());
    }

    #[test]
    fn test_fee_too_large_to_plan() {
        let input = document(
            EnrollmentRequestBuilder::new()
                .with_plan("quarterly")
                .with_monthly_fee(dec!(30000000000000000000000000000)),
        );
        let err = plan_request(&input, &PlannerConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Fee(ref e) if e.is_validation()));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_fee_with_fractional_paisa() {
        let input = document(EnrollmentRequestBuilder::new().with_monthly_fee(dec!(1000.005)));
        let err = plan_request(&input, &PlannerConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_unknown_currency_is_a_configuration_error() {
        let config = PlannerConfig {
            currency: "XYZ".to_string(),
            ..PlannerConfig::default()
        };
        let err = plan_request(&document(EnrollmentRequestBuilder::new()), &config).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_zero_fee_enrollment() {
        let input = document(EnrollmentRequestBuilder::new().with_monthly_fee(dec!(0)));
        assert!(plan_request(&input, &PlannerConfig::default()).is_err());
    }
}
