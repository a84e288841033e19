//! Installment and escrow arithmetic.
//!
//! Everything here works on an in-memory `ProposalRecord`; callers persist the
//! record (and credit the fund ledger) only after a step succeeds, so a failed
//! step leaves storage untouched.

use crate::{
    error::CpsTreasuryError,
    helper::{checked_sum, validate_non_negative},
    types::{ProposalRecord, ProposalStatus, Track},
};

/// Next installment for a track holding `remaining` over `count` installments.
///
/// The last installment takes everything left, so floor-division residue is
/// never stranded in escrow.
pub fn installment_amount(count: u32, remaining: i128) -> Result<i128, CpsTreasuryError> {
    match count {
        0 => Err(CpsTreasuryError::InvalidArgument),
        1 => Ok(remaining),
        n => Ok(remaining / n as i128),
    }
}

/// Pays one installment of `track` on the record and returns the amount.
///
/// The proposal becomes `Completed` once both tracks have no installments left.
pub fn apply_installment(
    record: &mut ProposalRecord,
    track: Track,
) -> Result<i128, CpsTreasuryError> {
    if !record.is_active() {
        return Err(CpsTreasuryError::AlreadyTerminal);
    }
    let (count, withdrawn, remaining) = record.track_state(track);
    let amount = installment_amount(count, remaining)?;

    let withdrawn = checked_sum(withdrawn, amount)?;
    record.set_track_state(track, count - 1, withdrawn, remaining - amount);

    if record.tracks_finished() {
        record.status = ProposalStatus::Completed;
    }
    Ok(amount)
}

/// Escrow never paid out on either track.
pub fn unspent_escrow(record: &ProposalRecord) -> Result<i128, CpsTreasuryError> {
    let remaining_budget = record.total_budget - record.withdraw_amount;
    let remaining_reward = record.sponsor_reward - record.sponsor_withdraw_amount;
    checked_sum(remaining_budget, remaining_reward)
}

/// Raises the budgets, the held escrow and the schedules by the given deltas.
pub fn apply_budget_increase(
    record: &mut ProposalRecord,
    added_budget: i128,
    added_sponsor_reward: i128,
    added_installment_count: u32,
) -> Result<(), CpsTreasuryError> {
    validate_non_negative(added_budget)?;
    validate_non_negative(added_sponsor_reward)?;
    if !record.is_active() {
        return Err(CpsTreasuryError::AlreadyTerminal);
    }

    let mut updated = record.clone();
    updated.total_budget = checked_sum(updated.total_budget, added_budget)?;
    updated.remaining_amount = checked_sum(updated.remaining_amount, added_budget)?;
    updated.sponsor_reward = checked_sum(updated.sponsor_reward, added_sponsor_reward)?;
    updated.sponsor_remaining_amount =
        checked_sum(updated.sponsor_remaining_amount, added_sponsor_reward)?;

    updated.project_duration = add_count(updated.project_duration, added_installment_count)?;
    updated.installment_count = add_count(updated.installment_count, added_installment_count)?;
    updated.sponsor_reward_count =
        add_count(updated.sponsor_reward_count, added_installment_count)?;

    // Escrow on a track with no installments left could never be paid out.
    if (updated.remaining_amount > 0 && updated.installment_count == 0)
        || (updated.sponsor_remaining_amount > 0 && updated.sponsor_reward_count == 0)
    {
        return Err(CpsTreasuryError::InvalidArgument);
    }
    *record = updated;
    Ok(())
}

fn add_count(count: u32, added: u32) -> Result<u32, CpsTreasuryError> {
    count.checked_add(added).ok_or(CpsTreasuryError::InvalidArgument)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProposalAttributes;
    use soroban_sdk::{testutils::Address as _, Address, Env, String};

    fn record(
        env: &Env,
        total_budget: i128,
        sponsor_reward: i128,
        duration: u32,
    ) -> ProposalRecord {
        ProposalRecord::from_attributes(ProposalAttributes {
            ipfs_hash: String::from_str(env, "bafy-test"),
            project_duration: duration,
            total_budget,
            sponsor_reward,
            contributor_address: Address::generate(env),
            sponsor_address: Address::generate(env),
        })
    }

    fn assert_conserved(record: &ProposalRecord) {
        assert_eq!(record.remaining_amount + record.withdraw_amount, record.total_budget);
        assert_eq!(
            record.sponsor_remaining_amount + record.sponsor_withdraw_amount,
            record.sponsor_reward
        );
    }

    #[test]
    fn test_installment_amount() {
        assert_eq!(installment_amount(3, 100), Ok(33));
        assert_eq!(installment_amount(2, 67), Ok(33));
        assert_eq!(installment_amount(1, 34), Ok(34));
        assert_eq!(installment_amount(0, 10), Err(CpsTreasuryError::InvalidArgument));
    }

    #[test]
    fn test_uneven_schedule_pays_remainder_last() {
        let env = Env::default();
        let mut rec = record(&env, 100, 9, 3);

        let mut paid = [0i128; 3];
        for slot in paid.iter_mut() {
            *slot = apply_installment(&mut rec, Track::Contributor).unwrap();
            assert_conserved(&rec);
        }
        assert_eq!(paid, [33, 33, 34]);
        assert_eq!(rec.remaining_amount, 0);
        assert_eq!(rec.withdraw_amount, 100);
        assert_eq!(rec.installment_count, 0);
    }

    #[test]
    fn test_completed_only_after_both_tracks() {
        let env = Env::default();
        let mut rec = record(&env, 100, 9, 2);

        apply_installment(&mut rec, Track::Contributor).unwrap();
        apply_installment(&mut rec, Track::Contributor).unwrap();
        assert_eq!(rec.status, ProposalStatus::Active);
        assert_eq!(
            apply_installment(&mut rec, Track::Contributor),
            Err(CpsTreasuryError::InvalidArgument)
        );

        apply_installment(&mut rec, Track::Sponsor).unwrap();
        assert_eq!(rec.status, ProposalStatus::Active);
        assert_eq!(apply_installment(&mut rec, Track::Sponsor), Ok(5));
        assert_eq!(rec.status, ProposalStatus::Completed);
        assert_eq!(
            apply_installment(&mut rec, Track::Sponsor),
            Err(CpsTreasuryError::AlreadyTerminal)
        );
    }

    #[test]
    fn test_unspent_escrow_spans_both_tracks() {
        let env = Env::default();
        let mut rec = record(&env, 100, 20, 4);
        rec.withdraw_amount = 40;
        rec.remaining_amount = 60;
        rec.sponsor_withdraw_amount = 5;
        rec.sponsor_remaining_amount = 15;
        assert_eq!(unspent_escrow(&rec), Ok(75));
    }

    #[test]
    fn test_budget_increase_keeps_conservation() {
        let env = Env::default();
        let mut rec = record(&env, 100, 10, 2);
        apply_installment(&mut rec, Track::Contributor).unwrap();

        apply_budget_increase(&mut rec, 50, 4, 1).unwrap();
        assert_conserved(&rec);
        assert_eq!(rec.total_budget, 150);
        assert_eq!(rec.remaining_amount, 100);
        assert_eq!(rec.project_duration, 3);
        assert_eq!(rec.installment_count, 2);
        assert_eq!(rec.sponsor_reward_count, 3);
    }

    #[test]
    fn test_budget_increase_rejects_unreachable_escrow() {
        let env = Env::default();
        let mut rec = record(&env, 10, 0, 1);
        apply_installment(&mut rec, Track::Contributor).unwrap();

        let before = rec.clone();
        assert_eq!(
            apply_budget_increase(&mut rec, 5, 0, 0),
            Err(CpsTreasuryError::InvalidArgument)
        );
        assert_eq!(rec, before);
        assert_eq!(
            apply_budget_increase(&mut rec, -1, 0, 1),
            Err(CpsTreasuryError::InvalidArgument)
        );
    }
}
