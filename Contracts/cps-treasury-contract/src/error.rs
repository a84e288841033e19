use core::fmt;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CpsTreasuryError {
    // Contract management
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Proposal records
    NotFound = 3,
    AlreadyExists = 4,
    AlreadyTerminal = 5,

    // Access and funds
    Unauthorized = 6,
    NothingToClaim = 7,
    ExternalCallFailed = 8,
    InvalidArgument = 9,
}

impl fmt::Display for CpsTreasuryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpsTreasuryError::AlreadyInitialized => write!(f, "Contract is already initialized"),
            CpsTreasuryError::NotInitialized => {
                write!(f, "Contract or role address not configured")
            }

            CpsTreasuryError::NotFound => write!(f, "Proposal not found"),
            CpsTreasuryError::AlreadyExists => write!(f, "Proposal already exists"),
            CpsTreasuryError::AlreadyTerminal => write!(f, "Proposal is completed or disqualified"),

            CpsTreasuryError::Unauthorized => {
                write!(f, "Caller is not authorized for this operation")
            }
            CpsTreasuryError::NothingToClaim => write!(f, "No claimable balance"),
            CpsTreasuryError::ExternalCallFailed => write!(f, "Transfer or treasury call failed"),
            CpsTreasuryError::InvalidArgument => write!(f, "Invalid argument"),
        }
    }
}
