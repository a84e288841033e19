use soroban_sdk::{
    contracttype, symbol_short, Address, Env, String,
};
use crate::types::Track;

#[contracttype]
#[derive(Clone)]
pub struct ProposalFundDepositedEvent {
    pub ipfs_hash: String,
    pub total_budget: i128,
    pub received: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct ProposalFundUpdatedEvent {
    pub ipfs_hash: String,
    pub added_budget: i128,
    pub added_sponsor_reward: i128,
    pub added_installment_count: u32,
}

#[contracttype]
#[derive(Clone)]
pub struct ProposalFundSentEvent {
    pub ipfs_hash: String,
    pub receiver: Address,
    pub amount: i128,
    pub track: Track,
}

#[contracttype]
#[derive(Clone)]
pub struct ProposalFundWithdrawnEvent {
    pub receiver: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct ProposalDisqualifiedEvent {
    pub ipfs_hash: String,
    pub refund: i128,
}

pub struct Events;

impl Events {
    pub fn emit_fund_deposited(env: &Env, ipfs_hash: &String, total_budget: i128, received: i128) {
        let event = ProposalFundDepositedEvent {
            ipfs_hash: ipfs_hash.clone(),
            total_budget,
            received,
        };
        env.events().publish((symbol_short!("deposit"), ipfs_hash.clone()), event);
    }

    pub fn emit_fund_updated(
        env: &Env,
        ipfs_hash: &String,
        added_budget: i128,
        added_sponsor_reward: i128,
        added_installment_count: u32,
    ) {
        let event = ProposalFundUpdatedEvent {
            ipfs_hash: ipfs_hash.clone(),
            added_budget,
            added_sponsor_reward,
            added_installment_count,
        };
        env.events().publish((symbol_short!("update"), ipfs_hash.clone()), event);
    }

    pub fn emit_fund_sent(
        env: &Env,
        ipfs_hash: &String,
        receiver: &Address,
        amount: i128,
        track: Track,
    ) {
        let event = ProposalFundSentEvent {
            ipfs_hash: ipfs_hash.clone(),
            receiver: receiver.clone(),
            amount,
            track,
        };
        env.events().publish((symbol_short!("sent"), receiver.clone()), event);
    }

    pub fn emit_fund_withdrawn(env: &Env, receiver: &Address, amount: i128) {
        let event = ProposalFundWithdrawnEvent {
            receiver: receiver.clone(),
            amount,
        };
        env.events().publish((symbol_short!("withdrawn"), receiver.clone()), event);
    }

    pub fn emit_disqualified(env: &Env, ipfs_hash: &String, refund: i128) {
        let event = ProposalDisqualifiedEvent {
            ipfs_hash: ipfs_hash.clone(),
            refund,
        };
        env.events().publish((symbol_short!("disqual"), ipfs_hash.clone()), event);
    }
}
