//! Application Statistics
//!
//! Aggregates over the application table, derived from per-status totals.

use rust_decimal::Decimal;

use super::application::ApplicationStatus;

/// Count and summed loan amount for one status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTotal {
    pub status: ApplicationStatus,
    pub count: u64,
    pub loan_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationStats {
    pub total_applications: u64,
    pub new_applications: u64,
    pub pending_applications: u64,
    pub approved_applications: u64,
    pub rejected_applications: u64,
    pub total_loan_amount: Decimal,
    pub average_loan_amount: Decimal,
}

impl ApplicationStats {
    /// Fold per-status totals into stats.
    ///
    /// Statuses with no rows count as zero, and `total_applications` is the
    /// sum of the per-status counts.
    #[must_use]
    pub fn from_totals(totals: &[StatusTotal]) -> Self {
        let mut stats = Self::default();

        for total in totals {
            let slot = match total.status {
                ApplicationStatus::New => &mut stats.new_applications,
                ApplicationStatus::Pending => &mut stats.pending_applications,
                ApplicationStatus::Approved => &mut stats.approved_applications,
                ApplicationStatus::Rejected => &mut stats.rejected_applications,
            };
            *slot += total.count;
            stats.total_applications += total.count;
            stats.total_loan_amount += total.loan_amount;
        }

        if stats.total_applications > 0 {
            stats.average_loan_amount =
                (stats.total_loan_amount / Decimal::from(stats.total_applications)).round_dp(2);
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_dataset_yields_zeroes() {
        let stats = ApplicationStats::from_totals(&[]);
        assert_eq!(stats, ApplicationStats::default());
        assert_eq!(stats.average_loan_amount, Decimal::ZERO);
    }

    #[test]
    fn missing_statuses_default_to_zero() {
        let stats = ApplicationStats::from_totals(&[
            StatusTotal {
                status: ApplicationStatus::New,
                count: 3,
                loan_amount: dec!(6000),
            },
            StatusTotal {
                status: ApplicationStatus::Approved,
                count: 1,
                loan_amount: dec!(1000),
            },
        ]);

        assert_eq!(stats.total_applications, 4);
        assert_eq!(stats.new_applications, 3);
        assert_eq!(stats.approved_applications, 1);
        assert_eq!(stats.pending_applications, 0);
        assert_eq!(stats.rejected_applications, 0);
        assert_eq!(stats.total_loan_amount, dec!(7000));
        assert_eq!(stats.average_loan_amount, dec!(1750));
    }

    #[test]
    fn per_status_counts_sum_to_total() {
        let totals: Vec<StatusTotal> = ApplicationStatus::ALL
            .iter()
            .enumerate()
            .map(|(i, status)| StatusTotal {
                status: *status,
                count: (i as u64 + 1) * 7,
                loan_amount: dec!(1000) * Decimal::from(i + 1),
            })
            .collect();

        let stats = ApplicationStats::from_totals(&totals);
        let sum = stats.new_applications
            + stats.pending_applications
            + stats.approved_applications
            + stats.rejected_applications;
        assert_eq!(sum, stats.total_applications);
    }

    #[test]
    fn average_is_rounded_to_cents() {
        let stats = ApplicationStats::from_totals(&[StatusTotal {
            status: ApplicationStatus::Pending,
            count: 3,
            loan_amount: dec!(1000),
        }]);
        assert_eq!(stats.average_loan_amount, dec!(333.33));
    }
}
