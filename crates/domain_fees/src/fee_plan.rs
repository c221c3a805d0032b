//! Fee plans (billing frequencies)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::BillingMonth;

use crate::error::FeeError;

/// Months in one academic fee cycle
pub const CYCLE_MONTHS: u32 = 12;

/// How often an enrolled student is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeePlan {
    /// Twelve single-month installments
    Monthly,
    /// Four three-month installments
    Quarterly,
    /// Two six-month installments
    SemiAnnual,
    /// One installment for the whole cycle
    Annual,
}

impl FeePlan {
    pub const ALL: [FeePlan; 4] = [
        FeePlan::Monthly,
        FeePlan::Quarterly,
        FeePlan::SemiAnnual,
        FeePlan::Annual,
    ];

    /// Number of installments in one cycle
    pub fn installment_count(&self) -> u32 {
        match self {
            FeePlan::Monthly => 12,
            FeePlan::Quarterly => 4,
            FeePlan::SemiAnnual => 2,
            FeePlan::Annual => 1,
        }
    }

    /// Months covered by each installment
    pub fn months_per_installment(&self) -> u32 {
        CYCLE_MONTHS / self.installment_count()
    }

    /// Canonical wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            FeePlan::Monthly => "monthly",
            FeePlan::Quarterly => "quarterly",
            FeePlan::SemiAnnual => "semi-annual",
            FeePlan::Annual => "annual",
        }
    }

    /// Human-readable label for the `index`-th (1-based) period
    ///
    /// The year shown is the year of the period's last month, so a quarter
    /// running November to January is labelled with the January year.
    pub fn period_label(&self, index: u32, first: BillingMonth, last: BillingMonth) -> String {
        match self {
            FeePlan::Monthly => format!("{} {}", first.name(), first.year()),
            FeePlan::Quarterly => {
                format!("Q{} ({}-{}) {}", index, first.name(), last.name(), last.year())
            }
            FeePlan::SemiAnnual => {
                format!("H{} ({}-{}) {}", index, first.name(), last.name(), last.year())
            }
            FeePlan::Annual => format!("Annual {}", last.year()),
        }
    }
}

impl fmt::Display for FeePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeePlan {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(FeePlan::Monthly),
            "quarterly" => Ok(FeePlan::Quarterly),
            "semi-annual" | "semi_annual" => Ok(FeePlan::SemiAnnual),
            "annual" => Ok(FeePlan::Annual),
            other => Err(FeeError::invalid(
                "fee_plan",
                format!("unknown fee plan '{}'", other),
            )),
        }
    }
}
