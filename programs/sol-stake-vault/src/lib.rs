pub mod account_structs;
/// # sol stake vault - Token Staking & Reward System
///
/// ## Business Process Flow
///
/// 1. Initial Setup:
///    - Anyone initializes the program once, naming the reward token mint
///      and the reward rate
///    - The program creates the global vault info record and the reward
///      vault token account at their derived addresses
///    - The reward vault is funded externally with reward tokens
///
/// 2. User Staking Flow:
///    - User stakes tokens for a chosen lock duration
///    - Tokens move into a per-user vault owned by the program
///    - The stake account records principal, lock start, and duration
///
/// 3. After the Lock Elapses:
///    a. Restake:
///       - Accrued rewards move from the reward vault into the user's vault
///       - Rewards compound into the principal and the lock restarts for
///         the same duration
///    b. Unstake:
///       - Principal returns from the user's vault to the user's wallet
///       - Accrued rewards pay out from the reward vault
///       - The stake account is zeroed and released for a future stake
///
/// 4. Extend:
///    - The owner may replace the lock duration at any time while staked,
///      moving the unlock time without touching the lock start or rewards
///
/// Security is maintained through PDAs (Program Derived Addresses) and strict
/// token authority controls: both vaults are token accounts at derived
/// addresses that act as their own authority, so only this program can sign
/// transfers out of them. All token operations are atomic and validated
/// through Solana's transaction model.
pub mod error;
pub mod events;
pub mod processor;
pub mod rewards;
pub mod state;

use account_structs::*;
use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod sol_stake_vault {
    use super::*;

    /// Creates the global vault info record and the reward vault at their
    /// derived addresses. Callable by anyone, exactly once per deployment:
    /// - reward_rate_bps: yield over a full lock period, in basis points
    pub fn init(ctx: Context<Init>, reward_rate_bps: u64) -> Result<()> {
        processor::init(ctx, reward_rate_bps)
    }

    /// Locks `amount` of the reward token for `duration` days:
    /// - Transfers tokens from the user's wallet into their program vault
    /// - Records the lock in the user's stake account
    pub fn stake(ctx: Context<Stake>, amount: u64, duration: i64) -> Result<()> {
        processor::stake(ctx, amount, duration)
    }

    /// Compounds accrued rewards into the principal after the lock elapses
    /// and re-locks for the same duration.
    pub fn restake(ctx: Context<Restake>) -> Result<()> {
        processor::restake(ctx)
    }

    /// Replaces the lock duration, moving the unlock time:
    /// - duration: new lock length in days
    pub fn extend(ctx: Context<Extend>, duration: i64) -> Result<()> {
        processor::extend(ctx, duration)
    }

    /// Returns the principal and pays out accrued rewards after the lock
    /// elapses, then zeroes the stake account.
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        processor::unstake(ctx)
    }
}
