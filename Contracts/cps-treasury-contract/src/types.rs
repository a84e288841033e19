use soroban_sdk::{contracttype, Address, String, Vec};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalStatus {
    Active,
    Completed,
    Disqualified,
}

/// Which payout schedule of a proposal an operation touches.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Track {
    Contributor,
    Sponsor,
}

/// Construction request sent by the treasury when a proposal is funded.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalAttributes {
    pub ipfs_hash: String,
    pub project_duration: u32,
    pub total_budget: i128,
    pub sponsor_reward: i128,
    pub contributor_address: Address,
    pub sponsor_address: Address,
}

/// Escrow and accounting state of one funded proposal.
///
/// For each track `remaining + withdrawn` equals the track's budget
/// (`total_budget` or `sponsor_reward`).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalRecord {
    pub ipfs_hash: String,
    pub status: ProposalStatus,
    pub total_budget: i128,
    pub sponsor_reward: i128,
    pub project_duration: u32,
    pub contributor_address: Address,
    pub sponsor_address: Address,

    // Contributor track
    pub installment_count: u32,
    pub withdraw_amount: i128,
    pub remaining_amount: i128,

    // Sponsor track
    pub sponsor_reward_count: u32,
    pub sponsor_withdraw_amount: i128,
    pub sponsor_remaining_amount: i128,
}

impl ProposalRecord {
    pub fn from_attributes(attributes: ProposalAttributes) -> Self {
        Self {
            ipfs_hash: attributes.ipfs_hash,
            status: ProposalStatus::Active,
            total_budget: attributes.total_budget,
            sponsor_reward: attributes.sponsor_reward,
            project_duration: attributes.project_duration,
            contributor_address: attributes.contributor_address,
            sponsor_address: attributes.sponsor_address,
            installment_count: attributes.project_duration,
            withdraw_amount: 0,
            remaining_amount: attributes.total_budget,
            sponsor_reward_count: attributes.project_duration,
            sponsor_withdraw_amount: 0,
            sponsor_remaining_amount: attributes.sponsor_reward,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ProposalStatus::Active
    }

    pub fn beneficiary(&self, track: Track) -> &Address {
        match track {
            Track::Contributor => &self.contributor_address,
            Track::Sponsor => &self.sponsor_address,
        }
    }

    pub fn track_budget(&self, track: Track) -> i128 {
        match track {
            Track::Contributor => self.total_budget,
            Track::Sponsor => self.sponsor_reward,
        }
    }

    /// `(count, withdrawn, remaining)` for the given track.
    pub fn track_state(&self, track: Track) -> (u32, i128, i128) {
        match track {
            Track::Contributor => (
                self.installment_count,
                self.withdraw_amount,
                self.remaining_amount,
            ),
            Track::Sponsor => (
                self.sponsor_reward_count,
                self.sponsor_withdraw_amount,
                self.sponsor_remaining_amount,
            ),
        }
    }

    pub fn set_track_state(&mut self, track: Track, count: u32, withdrawn: i128, remaining: i128) {
        match track {
            Track::Contributor => {
                self.installment_count = count;
                self.withdraw_amount = withdrawn;
                self.remaining_amount = remaining;
            }
            Track::Sponsor => {
                self.sponsor_reward_count = count;
                self.sponsor_withdraw_amount = withdrawn;
                self.sponsor_remaining_amount = remaining;
            }
        }
    }

    pub fn tracks_finished(&self) -> bool {
        self.installment_count == 0 && self.sponsor_reward_count == 0
    }
}

/// One proposal's entry in a projected fund report.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectedInstallment {
    pub ipfs_hash: String,
    pub track_budget: i128,
    pub total_paid_amount: i128,
    pub total_installment_count: u32,
    pub remaining_installment_count: u32,
    pub installment_amount: i128,
    pub sponsor_bond_amount: i128,
}

/// Upcoming installments owed to a wallet plus what it can already claim.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectedFund {
    pub data: Vec<ProjectedInstallment>,
    pub project_count: u32,
    pub total_amount: i128,
    pub withdraw_amount: i128,
    pub total_with_balance: i128,
    pub total_sponsor_bond: i128,
}
