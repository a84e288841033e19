#![no_std]
//! CPS Treasury Contract
//!
//! Holds the escrow of every proposal funded by the CPF treasury and pays it out
//! in installments to two beneficiaries: the contributor and the sponsor. Each
//! installment is authorized by the CPS governance contract; a proposal can be
//! disqualified at any point, which returns the unspent escrow of both tracks to
//! the CPF treasury. Installments accrue in a per-address fund record that the
//! beneficiary withdraws with `claim_reward`.
//!
//! State is always written before any outbound token transfer or cross-contract
//! call, and an error return rolls back the whole invocation.

mod disbursement;
mod error;
mod events;
mod helper;
mod projection;
mod storage;
mod treasury;
mod types;

use soroban_sdk::{
    contract, contractimpl, log, token, Address, Env, String, Vec,
};

pub use crate::{
    error::CpsTreasuryError,
    treasury::{CpfTreasuryClient, CpfTreasuryInterface},
    types::{
        ProjectedFund, ProjectedInstallment, ProposalAttributes, ProposalRecord, ProposalStatus,
        Track,
    },
};
use crate::{
    disbursement::{apply_budget_increase, apply_installment, unspent_escrow},
    events::Events,
    helper::{checked_sum, validate_attributes},
    projection::projected_fund,
    storage::Storage,
};

const NAME: &str = "CPS_TREASURY";

/// cps-treasury-contract trait defining the public surface
pub trait CpsTreasuryTrait {
    // Configuration
    fn init(env: Env, admin: Address, token: Address) -> Result<(), CpsTreasuryError>;
    fn name(env: Env) -> String;
    fn set_cps_score(env: Env, score: Address) -> Result<(), CpsTreasuryError>;
    fn get_cps_score(env: Env) -> Result<Address, CpsTreasuryError>;
    fn set_cpf_treasury_score(env: Env, score: Address) -> Result<(), CpsTreasuryError>;
    fn get_cpf_treasury_score(env: Env) -> Result<Address, CpsTreasuryError>;
    fn get_token(env: Env) -> Result<Address, CpsTreasuryError>;

    // Treasury operations
    fn deposit_proposal_fund(
        env: Env,
        caller: Address,
        proposal: ProposalAttributes,
    ) -> Result<(), CpsTreasuryError>;
    fn update_proposal_fund(
        env: Env,
        caller: Address,
        ipfs_key: String,
        added_budget: i128,
        added_sponsor_reward: i128,
        added_installment_count: u32,
    ) -> Result<(), CpsTreasuryError>;

    // Governance operations
    fn send_installment_to_contributor(
        env: Env,
        caller: Address,
        ipfs_key: String,
    ) -> Result<i128, CpsTreasuryError>;
    fn send_reward_to_sponsor(
        env: Env,
        caller: Address,
        ipfs_key: String,
    ) -> Result<i128, CpsTreasuryError>;
    fn disqualify_project(
        env: Env,
        caller: Address,
        ipfs_key: String,
    ) -> Result<i128, CpsTreasuryError>;

    // Beneficiary operations
    fn claim_reward(env: Env, caller: Address) -> Result<i128, CpsTreasuryError>;

    // Views
    fn get_proposal(env: Env, ipfs_key: String) -> Result<ProposalRecord, CpsTreasuryError>;
    fn get_proposal_keys(env: Env, offset: u32, limit: u32) -> Vec<String>;
    fn get_proposal_count(env: Env) -> u32;
    fn get_fund_record(env: Env, address: Address) -> i128;
    fn get_contributor_projected_fund(
        env: Env,
        wallet: Address,
    ) -> Result<ProjectedFund, CpsTreasuryError>;
    fn get_sponsor_projected_fund(
        env: Env,
        wallet: Address,
    ) -> Result<ProjectedFund, CpsTreasuryError>;
}

#[contract]
pub struct CpsTreasuryContract;

#[contractimpl]
impl CpsTreasuryTrait for CpsTreasuryContract {
    fn init(env: Env, admin: Address, token: Address) -> Result<(), CpsTreasuryError> {
        admin.require_auth();

        let storage = Storage::new(&env);
        if storage.is_initialized() {
            return Err(CpsTreasuryError::AlreadyInitialized);
        }
        storage.init(&admin, &token);
        Ok(())
    }

    fn name(env: Env) -> String {
        String::from_str(&env, NAME)
    }

    fn set_cps_score(env: Env, score: Address) -> Result<(), CpsTreasuryError> {
        let storage = Storage::new(&env);
        storage.admin()?.require_auth();
        storage.set_cps_score(&score);
        Ok(())
    }

    fn get_cps_score(env: Env) -> Result<Address, CpsTreasuryError> {
        Storage::new(&env).cps_score()
    }

    fn set_cpf_treasury_score(env: Env, score: Address) -> Result<(), CpsTreasuryError> {
        let storage = Storage::new(&env);
        storage.admin()?.require_auth();
        storage.set_cpf_treasury_score(&score);
        Ok(())
    }

    fn get_cpf_treasury_score(env: Env) -> Result<Address, CpsTreasuryError> {
        Storage::new(&env).cpf_treasury_score()
    }

    fn get_token(env: Env) -> Result<Address, CpsTreasuryError> {
        Storage::new(&env).token()
    }

    fn deposit_proposal_fund(
        env: Env,
        caller: Address,
        proposal: ProposalAttributes,
    ) -> Result<(), CpsTreasuryError> {
        require_cpf_treasury(&env, &caller)?;
        validate_attributes(&proposal)?;

        let storage = Storage::new(&env);
        if storage.has_proposal(&proposal.ipfs_hash) {
            return Err(CpsTreasuryError::AlreadyExists);
        }

        let received = checked_sum(proposal.total_budget, proposal.sponsor_reward)?;
        let record = ProposalRecord::from_attributes(proposal);
        storage.add_proposal(&record);

        transfer_funds(&env, &caller, &env.current_contract_address(), received)?;

        Events::emit_fund_deposited(&env, &record.ipfs_hash, record.total_budget, received);
        Ok(())
    }

    fn update_proposal_fund(
        env: Env,
        caller: Address,
        ipfs_key: String,
        added_budget: i128,
        added_sponsor_reward: i128,
        added_installment_count: u32,
    ) -> Result<(), CpsTreasuryError> {
        require_cpf_treasury(&env, &caller)?;

        let storage = Storage::new(&env);
        let mut record = storage.get_proposal(&ipfs_key)?;
        apply_budget_increase(
            &mut record,
            added_budget,
            added_sponsor_reward,
            added_installment_count,
        )?;
        storage.save_proposal(&record);

        let received = checked_sum(added_budget, added_sponsor_reward)?;
        transfer_funds(&env, &caller, &env.current_contract_address(), received)?;

        Events::emit_fund_updated(
            &env,
            &ipfs_key,
            added_budget,
            added_sponsor_reward,
            added_installment_count,
        );
        Ok(())
    }

    fn send_installment_to_contributor(
        env: Env,
        caller: Address,
        ipfs_key: String,
    ) -> Result<i128, CpsTreasuryError> {
        require_cps_score(&env, &caller)?;
        send_installment(&env, &ipfs_key, Track::Contributor)
    }

    fn send_reward_to_sponsor(
        env: Env,
        caller: Address,
        ipfs_key: String,
    ) -> Result<i128, CpsTreasuryError> {
        require_cps_score(&env, &caller)?;
        send_installment(&env, &ipfs_key, Track::Sponsor)
    }

    fn disqualify_project(
        env: Env,
        caller: Address,
        ipfs_key: String,
    ) -> Result<i128, CpsTreasuryError> {
        require_cps_score(&env, &caller)?;

        let storage = Storage::new(&env);
        let cpf_treasury = storage.cpf_treasury_score()?;
        let mut record = storage.get_proposal(&ipfs_key)?;
        if !record.is_active() {
            return Err(CpsTreasuryError::AlreadyTerminal);
        }

        let refund = unspent_escrow(&record)?;
        record.status = ProposalStatus::Disqualified;
        storage.save_proposal(&record);

        transfer_funds(&env, &env.current_contract_address(), &cpf_treasury, refund)?;
        let client = CpfTreasuryClient::new(&env, &cpf_treasury);
        if !matches!(client.try_disqualify_proposal_fund(&ipfs_key, &refund), Ok(Ok(()))) {
            log!(&env, "cpf treasury rejected refund", ipfs_key, refund);
            return Err(CpsTreasuryError::ExternalCallFailed);
        }

        Events::emit_disqualified(&env, &ipfs_key, refund);
        Ok(refund)
    }

    fn claim_reward(env: Env, caller: Address) -> Result<i128, CpsTreasuryError> {
        caller.require_auth();

        let storage = Storage::new(&env);
        let available = storage.fund_record(&caller);
        if available <= 0 {
            return Err(CpsTreasuryError::NothingToClaim);
        }

        // Zeroed before the transfer so a re-entrant claim finds nothing.
        storage.set_fund_record(&caller, 0);
        let contract = env.current_contract_address();
        if let Err(err) = transfer_funds(&env, &contract, &caller, available) {
            storage.set_fund_record(&caller, available);
            return Err(err);
        }

        Events::emit_fund_withdrawn(&env, &caller, available);
        Ok(available)
    }

    fn get_proposal(env: Env, ipfs_key: String) -> Result<ProposalRecord, CpsTreasuryError> {
        Storage::new(&env).get_proposal(&ipfs_key)
    }

    fn get_proposal_keys(env: Env, offset: u32, limit: u32) -> Vec<String> {
        let keys = Storage::new(&env).proposal_keys();
        let mut page = Vec::new(&env);
        let end = offset.saturating_add(limit).min(keys.len());
        for i in offset..end {
            page.push_back(keys.get_unchecked(i));
        }
        page
    }

    fn get_proposal_count(env: Env) -> u32 {
        Storage::new(&env).proposal_keys().len()
    }

    fn get_fund_record(env: Env, address: Address) -> i128 {
        Storage::new(&env).fund_record(&address)
    }

    fn get_contributor_projected_fund(
        env: Env,
        wallet: Address,
    ) -> Result<ProjectedFund, CpsTreasuryError> {
        projected_fund(&env, Track::Contributor, &wallet)
    }

    fn get_sponsor_projected_fund(
        env: Env,
        wallet: Address,
    ) -> Result<ProjectedFund, CpsTreasuryError> {
        projected_fund(&env, Track::Sponsor, &wallet)
    }
}

/// Pays one installment on `track` and credits it to the beneficiary's fund record.
fn send_installment(env: &Env, ipfs_key: &String, track: Track) -> Result<i128, CpsTreasuryError> {
    let storage = Storage::new(env);
    let mut record = storage.get_proposal(ipfs_key)?;
    let amount = apply_installment(&mut record, track)?;
    let beneficiary = record.beneficiary(track).clone();

    storage.credit_fund_record(&beneficiary, amount)?;
    storage.save_proposal(&record);

    Events::emit_fund_sent(env, ipfs_key, &beneficiary, amount, track);
    Ok(amount)
}

fn require_cps_score(env: &Env, caller: &Address) -> Result<(), CpsTreasuryError> {
    caller.require_auth();
    if *caller != Storage::new(env).cps_score()? {
        log!(env, "caller is not the cps score", caller.clone());
        return Err(CpsTreasuryError::Unauthorized);
    }
    Ok(())
}

fn require_cpf_treasury(env: &Env, caller: &Address) -> Result<(), CpsTreasuryError> {
    caller.require_auth();
    if *caller != Storage::new(env).cpf_treasury_score()? {
        log!(env, "caller is not the cpf treasury", caller.clone());
        return Err(CpsTreasuryError::Unauthorized);
    }
    Ok(())
}

/// Moves `amount` of the configured token; a zero amount is a no-op.
fn transfer_funds(
    env: &Env,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), CpsTreasuryError> {
    if amount == 0 {
        return Ok(());
    }
    let token = token::Client::new(env, &Storage::new(env).token()?);
    match token.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "token transfer failed", from.clone(), to.clone(), amount);
            Err(CpsTreasuryError::ExternalCallFailed)
        }
    }
}

#[cfg(test)]
mod test_projection;
