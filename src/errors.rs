//! Error definitions shared by the launchpad contracts

use odra::prelude::*;

/// Errors that can occur in the launchpad contracts
#[odra::odra_error]
pub enum LaunchpadError {
    /// Caller is not authorized for this operation
    Unauthorized = 30_000,

    /// Attached payment is below the creation fee ("0.01 ETH fee is required"
    /// on the EVM deployment, 0.01 CSPR here)
    InsufficientFee = 30_001,

    /// Attached payment is above the creation fee
    ExcessiveFee = 30_002,

    /// Malformed time windows or non-positive amounts
    InvalidParameters = 30_003,

    /// No launchpad registered under the given address
    LaunchpadNotFound = 30_004,

    /// Sale window is not open
    SaleNotActive = 30_005,

    /// Sale window has not closed yet
    SaleNotEnded = 30_006,

    /// Zero amount not allowed
    ZeroAmount = 30_007,

    /// Purchase would allocate more than the launchpad's total amount
    AllocationExceeded = 30_008,

    /// Nothing has vested since the last claim
    NothingToClaim = 30_009,

    /// Insufficient token balance or allowance
    InsufficientBalance = 30_010,

    /// Arithmetic overflow
    ArithmeticOverflow = 30_011,

    /// Sale tokens for the full amount have not been deposited yet
    LaunchpadNotFunded = 30_012,

    /// Deposit would exceed the launchpad's total amount
    FundingExceeded = 30_013,

    /// The sale token did not deliver the deposited amount
    TransferFailed = 30_014,
}
