use anchor_lang::prelude::*;

#[error_code]
pub enum StakeErrorCode {
    #[msg("Signer is not the stake account owner")]
    Unauthorized = 1,
    #[msg("Vault info is already initialized")]
    AlreadyInitialized = 2,
    #[msg("Vault info is not initialized")]
    NotInitialized = 3,
    #[msg("Account does not match the derived address")]
    AddressMismatch = 4,
    #[msg("Invalid amount")]
    InvalidAmount = 5,
    #[msg("Stake duration is outside the accepted range")]
    InvalidDuration = 6,
    #[msg("Invalid reward rate")]
    InvalidRewardRate = 7,
    #[msg("Stake is not in the required lock state")]
    StakeLocked = 8,
    #[msg("Insufficient funds for transfer")]
    InsufficientFunds = 9,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow = 10,
}
