use crate::domain::debt::Debt;
use crate::domain::money::Money;
use crate::error::ValidationError;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Checks a batch of debts and the extra monthly payment before simulation.
///
/// Fails fast on the first violation, naming the offending debt.
pub fn validate(debts: &[Debt], extra_monthly_payment: Money) -> Result<(), ValidationError> {
    if extra_monthly_payment < Money::ZERO {
        return Err(ValidationError::NegativeExtraPayment(
            extra_monthly_payment.value(),
        ));
    }

    let mut seen = HashSet::with_capacity(debts.len());
    for debt in debts {
        if !debt.balance.is_positive() {
            return Err(ValidationError::NonPositiveBalance {
                debt_id: debt.id.clone(),
                balance: debt.balance.value(),
            });
        }
        if debt.annual_rate_percent < Decimal::ZERO {
            return Err(ValidationError::NegativeRate {
                debt_id: debt.id.clone(),
                rate: debt.annual_rate_percent,
            });
        }
        if !debt.minimum_payment.is_positive() {
            return Err(ValidationError::NonPositiveMinimumPayment {
                debt_id: debt.id.clone(),
                payment: debt.minimum_payment.value(),
            });
        }
        if !seen.insert(debt.id.as_str()) {
            return Err(ValidationError::DuplicateDebtId(debt.id.clone()));
        }
    }

    Ok(())
}
