use soroban_sdk::{contracttype, Address, Env, String, Vec};
use crate::{
    error::CpsTreasuryError,
    types::ProposalRecord,
};

const DAY_IN_LEDGERS: u32 = 17280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Token,
    CpsScore,
    CpfTreasuryScore,
    Proposal(String),
    ProposalKeys,
    FundRecord(Address),
}

pub struct Storage<'a> {
    env: &'a Env,
}

impl<'a> Storage<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    // Configuration

    pub fn is_initialized(&self) -> bool {
        self.env.storage().instance().has(&DataKey::Admin)
    }

    pub fn init(&self, admin: &Address, token: &Address) {
        self.env.storage().instance().set(&DataKey::Admin, admin);
        self.env.storage().instance().set(&DataKey::Token, token);
        self.bump_instance();
    }

    pub fn admin(&self) -> Result<Address, CpsTreasuryError> {
        self.env.storage().instance()
            .get(&DataKey::Admin)
            .ok_or(CpsTreasuryError::NotInitialized)
    }

    pub fn token(&self) -> Result<Address, CpsTreasuryError> {
        self.env.storage().instance()
            .get(&DataKey::Token)
            .ok_or(CpsTreasuryError::NotInitialized)
    }

    pub fn cps_score(&self) -> Result<Address, CpsTreasuryError> {
        self.env.storage().instance()
            .get(&DataKey::CpsScore)
            .ok_or(CpsTreasuryError::NotInitialized)
    }

    pub fn set_cps_score(&self, score: &Address) {
        self.env.storage().instance().set(&DataKey::CpsScore, score);
        self.bump_instance();
    }

    pub fn cpf_treasury_score(&self) -> Result<Address, CpsTreasuryError> {
        self.env.storage().instance()
            .get(&DataKey::CpfTreasuryScore)
            .ok_or(CpsTreasuryError::NotInitialized)
    }

    pub fn set_cpf_treasury_score(&self, score: &Address) {
        self.env.storage().instance().set(&DataKey::CpfTreasuryScore, score);
        self.bump_instance();
    }

    // Proposal record store

    pub fn has_proposal(&self, ipfs_hash: &String) -> bool {
        self.env.storage().persistent()
            .has(&DataKey::Proposal(ipfs_hash.clone()))
    }

    /// Inserts a new record and appends its key; the caller checks uniqueness first.
    pub fn add_proposal(&self, record: &ProposalRecord) {
        let mut keys = self.proposal_keys();
        keys.push_back(record.ipfs_hash.clone());
        self.env.storage().persistent().set(&DataKey::ProposalKeys, &keys);
        self.bump_persistent(&DataKey::ProposalKeys);
        self.save_proposal(record);
    }

    pub fn get_proposal(&self, ipfs_hash: &String) -> Result<ProposalRecord, CpsTreasuryError> {
        let key = DataKey::Proposal(ipfs_hash.clone());
        let record = self.env.storage().persistent()
            .get(&key)
            .ok_or(CpsTreasuryError::NotFound)?;
        self.bump_persistent(&key);
        Ok(record)
    }

    pub fn save_proposal(&self, record: &ProposalRecord) {
        let key = DataKey::Proposal(record.ipfs_hash.clone());
        self.env.storage().persistent().set(&key, record);
        self.bump_persistent(&key);
    }

    pub fn proposal_keys(&self) -> Vec<String> {
        self.env.storage().persistent()
            .get(&DataKey::ProposalKeys)
            .unwrap_or_else(|| Vec::new(self.env))
    }

    // Fund ledger

    pub fn fund_record(&self, address: &Address) -> i128 {
        self.env.storage().persistent()
            .get(&DataKey::FundRecord(address.clone()))
            .unwrap_or(0)
    }

    pub fn set_fund_record(&self, address: &Address, amount: i128) {
        let key = DataKey::FundRecord(address.clone());
        self.env.storage().persistent().set(&key, &amount);
        self.bump_persistent(&key);
    }

    pub fn credit_fund_record(
        &self,
        address: &Address,
        amount: i128,
    ) -> Result<i128, CpsTreasuryError> {
        let balance = self.fund_record(address)
            .checked_add(amount)
            .ok_or(CpsTreasuryError::InvalidArgument)?;
        self.set_fund_record(address, balance);
        Ok(balance)
    }

    fn bump_instance(&self) {
        self.env.storage().instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    fn bump_persistent(&self, key: &DataKey) {
        self.env.storage().persistent()
            .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
}
