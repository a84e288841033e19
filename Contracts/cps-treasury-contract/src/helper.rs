use crate::{error::CpsTreasuryError, types::ProposalAttributes};

/// Sponsor bond is a tenth of the proposal's total budget.
pub const SPONSOR_BOND_DIVISOR: i128 = 10;

/// Validates a construction request before it becomes a proposal record
pub fn validate_attributes(attributes: &ProposalAttributes) -> Result<(), CpsTreasuryError> {
    if attributes.ipfs_hash.len() == 0 {
        return Err(CpsTreasuryError::InvalidArgument);
    }
    if attributes.project_duration == 0 {
        return Err(CpsTreasuryError::InvalidArgument);
    }
    validate_non_negative(attributes.total_budget)?;
    validate_non_negative(attributes.sponsor_reward)?;
    Ok(())
}

/// Rejects negative amounts and budget deltas
pub fn validate_non_negative(amount: i128) -> Result<(), CpsTreasuryError> {
    if amount < 0 {
        return Err(CpsTreasuryError::InvalidArgument);
    }
    Ok(())
}

pub fn checked_sum(a: i128, b: i128) -> Result<i128, CpsTreasuryError> {
    a.checked_add(b).ok_or(CpsTreasuryError::InvalidArgument)
}

pub fn sponsor_bond(total_budget: i128) -> i128 {
    total_budget / SPONSOR_BOND_DIVISOR
}
