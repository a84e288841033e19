use soroban_sdk::{contractclient, Env, String};

/// Refund entry point of the upstream CPF treasury contract.
///
/// Disqualification transfers the unspent escrow to the treasury first and
/// then calls this so the treasury can book it against the proposal.
#[contractclient(name = "CpfTreasuryClient")]
pub trait CpfTreasuryInterface {
    fn disqualify_proposal_fund(env: Env, ipfs_key: String, amount: i128);
}
