use soroban_sdk::{Address, Env, Vec};
use crate::{
    disbursement::installment_amount,
    error::CpsTreasuryError,
    helper::{checked_sum, sponsor_bond},
    storage::Storage,
    types::{ProjectedFund, ProjectedInstallment, ProposalRecord, ProposalStatus, Track},
};

/// Next installment `wallet` would receive from `record` on `track`, if any.
fn projected_installment(
    record: &ProposalRecord,
    track: Track,
    wallet: &Address,
) -> Result<Option<ProjectedInstallment>, CpsTreasuryError> {
    if record.status == ProposalStatus::Disqualified || record.beneficiary(track) != wallet {
        return Ok(None);
    }
    let (count, withdrawn, remaining) = record.track_state(track);
    if count == 0 {
        return Ok(None);
    }
    let sponsor_bond_amount = match track {
        Track::Contributor => 0,
        Track::Sponsor => sponsor_bond(record.total_budget),
    };
    Ok(Some(ProjectedInstallment {
        ipfs_hash: record.ipfs_hash.clone(),
        track_budget: record.track_budget(track),
        total_paid_amount: withdrawn,
        total_installment_count: record.project_duration,
        remaining_installment_count: count,
        installment_amount: installment_amount(count, remaining)?,
        sponsor_bond_amount,
    }))
}

/// Aggregates the upcoming installments on `track` for `wallet` across every
/// known proposal, together with its current fund ledger balance.
pub fn projected_fund(
    env: &Env,
    track: Track,
    wallet: &Address,
) -> Result<ProjectedFund, CpsTreasuryError> {
    let storage = Storage::new(env);
    let mut data = Vec::new(env);
    let mut total_amount: i128 = 0;
    let mut total_sponsor_bond: i128 = 0;

    for ipfs_hash in storage.proposal_keys().iter() {
        let record = storage.get_proposal(&ipfs_hash)?;
        if let Some(entry) = projected_installment(&record, track, wallet)? {
            total_amount = checked_sum(total_amount, entry.installment_amount)?;
            total_sponsor_bond = checked_sum(total_sponsor_bond, entry.sponsor_bond_amount)?;
            data.push_back(entry);
        }
    }

    let withdraw_amount = storage.fund_record(wallet);
    Ok(ProjectedFund {
        project_count: data.len(),
        data,
        total_amount,
        withdraw_amount,
        total_with_balance: checked_sum(total_amount, withdraw_amount)?,
        total_sponsor_bond,
    })
}
