use crate::error::StakeErrorCode;
use crate::rewards;
use anchor_lang::prelude::*;

pub const VAULT_INFO_SEED: &[u8] = b"vault_info";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const USER_VAULT_SEED: &[u8] = b"user_vault";
pub const STAKE_ACCOUNT_SEED: &[u8] = b"stake_account";

pub const SECONDS_PER_DAY: i64 = 86_400;
/// Lock duration bounds, in days.
pub const DURATION_MIN: i64 = 1;
pub const DURATION_MAX: i64 = 365;
/// Upper bound on the configurable yield (500% over a full lock).
pub const MAX_REWARD_RATE_BPS: u64 = 50_000;

/// Global program configuration, one per deployment.
#[account]
pub struct VaultInfo {
    pub reward_token_mint: Pubkey,
    pub reward_vault: Pubkey,
    pub reward_rate_bps: u64,
    pub total_value_locked: u64,
    pub lifetime_value_locked: u64,
    pub is_initialized: bool,
    pub bump: u8,
}

impl VaultInfo {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 8 + 1 + 1;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum StakeStatus {
    #[default]
    Uninitialized,
    Locked,
    Unlockable,
}

/// Per-user stake record. Lock-state transitions are a pure function of the
/// clock value passed in by the handler; nothing here reads sysvars.
#[account]
pub struct StakeAccount {
    pub owner: Pubkey,
    pub amount: u64,
    pub rewards: u64,
    pub start_time: i64,
    pub duration: i64,
    pub status: StakeStatus,
    pub vault_bump: u8,
}

pub fn validate_duration(duration: i64) -> Result<()> {
    require!(
        (DURATION_MIN..=DURATION_MAX).contains(&duration),
        StakeErrorCode::InvalidDuration
    );
    Ok(())
}

impl StakeAccount {
    pub const LEN: usize = 8 + 32 + 8 + 8 + 8 + 8 + 1 + 1;

    pub fn unlock_at(&self) -> Result<i64> {
        let lock_secs = self
            .duration
            .checked_mul(SECONDS_PER_DAY)
            .ok_or(StakeErrorCode::ArithmeticOverflow)?;
        self.start_time
            .checked_add(lock_secs)
            .ok_or(error!(StakeErrorCode::ArithmeticOverflow))
    }

    /// Effective status at `now`. A stored `Locked` reads as `Unlockable`
    /// once the lock period has elapsed.
    pub fn status_at(&self, now: i64) -> StakeStatus {
        match self.status {
            StakeStatus::Uninitialized => StakeStatus::Uninitialized,
            StakeStatus::Locked | StakeStatus::Unlockable => {
                match self.unlock_at() {
                    Ok(unlock_at) if now < unlock_at => StakeStatus::Locked,
                    _ => StakeStatus::Unlockable,
                }
            }
        }
    }

    pub fn require_unlockable(&self, now: i64) -> Result<()> {
        require!(
            self.status_at(now) == StakeStatus::Unlockable,
            StakeErrorCode::StakeLocked
        );
        Ok(())
    }

    /// Establishes a new lock. Only valid on an empty record; staking onto a
    /// live lock (or an expired one that was never unstaked) is rejected.
    pub fn stake(
        &mut self,
        owner: Pubkey,
        amount: u64,
        duration: i64,
        vault_bump: u8,
        now: i64,
    ) -> Result<()> {
        require!(
            self.status == StakeStatus::Uninitialized,
            StakeErrorCode::StakeLocked
        );
        require!(amount > 0, StakeErrorCode::InvalidAmount);
        validate_duration(duration)?;

        self.owner = owner;
        self.amount = amount;
        self.rewards = 0;
        self.start_time = now;
        self.duration = duration;
        self.status = StakeStatus::Locked;
        self.vault_bump = vault_bump;
        Ok(())
    }

    /// Reward owed for the elapsed part of the current lock period.
    pub fn accrued_reward(&self, now: i64, rate_bps: u64) -> Result<u64> {
        let elapsed = now.saturating_sub(self.start_time);
        let duration_secs = self
            .duration
            .checked_mul(SECONDS_PER_DAY)
            .ok_or(StakeErrorCode::ArithmeticOverflow)?;
        rewards::accrued(self.amount, elapsed, duration_secs, rate_bps)
    }

    /// Compounds an already-paid-out reward into the principal and re-locks
    /// for the same duration.
    pub fn restake(&mut self, reward: u64, now: i64) -> Result<()> {
        self.require_unlockable(now)?;
        self.amount = self
            .amount
            .checked_add(reward)
            .ok_or(StakeErrorCode::ArithmeticOverflow)?;
        self.start_time = now;
        self.status = StakeStatus::Locked;
        Ok(())
    }

    /// Replaces the lock duration, moving the unlock time. The lock start and
    /// any accrued rewards are untouched.
    pub fn extend(&mut self, duration: i64) -> Result<()> {
        require!(
            self.status != StakeStatus::Uninitialized,
            StakeErrorCode::StakeLocked
        );
        validate_duration(duration)?;
        self.duration = duration;
        Ok(())
    }

    /// Zeroes the record after payout, releasing it for a future stake.
    pub fn close_out(&mut self) {
        self.owner = Pubkey::default();
        self.amount = 0;
        self.rewards = 0;
        self.start_time = 0;
        self.duration = 0;
        self.status = StakeStatus::Uninitialized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;
    const RATE_BPS: u64 = 1_000; // 10% per full lock

    fn empty() -> StakeAccount {
        StakeAccount {
            owner: Pubkey::default(),
            amount: 0,
            rewards: 0,
            start_time: 0,
            duration: 0,
            status: StakeStatus::Uninitialized,
            vault_bump: 0,
        }
    }

    fn staked(amount: u64, duration: i64) -> StakeAccount {
        let mut acct = empty();
        acct.stake(Pubkey::new_unique(), amount, duration, 255, NOW)
            .unwrap();
        acct
    }

    #[test]
    fn stake_establishes_lock() {
        let owner = Pubkey::new_unique();
        let mut acct = empty();
        acct.stake(owner, 100_000_000, 14, 254, NOW).unwrap();

        assert_eq!(acct.owner, owner);
        assert_eq!(acct.amount, 100_000_000);
        assert_eq!(acct.rewards, 0);
        assert_eq!(acct.start_time, NOW);
        assert_eq!(acct.duration, 14);
        assert_eq!(acct.status, StakeStatus::Locked);
        assert_eq!(acct.unlock_at().unwrap(), NOW + 14 * SECONDS_PER_DAY);
    }

    #[test]
    fn stake_rejects_zero_amount() {
        let err = empty()
            .stake(Pubkey::new_unique(), 0, 14, 255, NOW)
            .unwrap_err();
        assert_eq!(err, StakeErrorCode::InvalidAmount.into());
    }

    #[test]
    fn stake_enforces_duration_bounds() {
        for bad in [0, -1, DURATION_MAX + 1] {
            let err = empty()
                .stake(Pubkey::new_unique(), 1_000, bad, 255, NOW)
                .unwrap_err();
            assert_eq!(err, StakeErrorCode::InvalidDuration.into());
        }
        assert!(empty()
            .stake(Pubkey::new_unique(), 1_000, DURATION_MIN, 255, NOW)
            .is_ok());
        assert!(empty()
            .stake(Pubkey::new_unique(), 1_000, DURATION_MAX, 255, NOW)
            .is_ok());
    }

    #[test]
    fn stake_onto_live_lock_fails() {
        let mut acct = staked(1_000, 7);
        let err = acct
            .stake(Pubkey::new_unique(), 500, 7, 255, NOW + 1)
            .unwrap_err();
        assert_eq!(err, StakeErrorCode::StakeLocked.into());
    }

    #[test]
    fn stake_onto_expired_but_unreleased_lock_fails() {
        let mut acct = staked(1_000, 1);
        let after = NOW + 2 * SECONDS_PER_DAY;
        assert_eq!(acct.status_at(after), StakeStatus::Unlockable);
        let err = acct
            .stake(Pubkey::new_unique(), 500, 7, 255, after)
            .unwrap_err();
        assert_eq!(err, StakeErrorCode::StakeLocked.into());
    }

    #[test]
    fn status_follows_the_clock() {
        let acct = staked(1_000, 2);
        assert_eq!(acct.status_at(NOW), StakeStatus::Locked);
        assert_eq!(
            acct.status_at(NOW + 2 * SECONDS_PER_DAY - 1),
            StakeStatus::Locked
        );
        assert_eq!(
            acct.status_at(NOW + 2 * SECONDS_PER_DAY),
            StakeStatus::Unlockable
        );
    }

    #[test]
    fn unlockable_before_expiry_is_rejected() {
        let acct = staked(1_000, 2);
        let err = acct.require_unlockable(NOW + 1).unwrap_err();
        assert_eq!(err, StakeErrorCode::StakeLocked.into());
        assert!(acct
            .require_unlockable(NOW + 2 * SECONDS_PER_DAY)
            .is_ok());
    }

    #[test]
    fn restake_before_expiry_fails() {
        let mut acct = staked(1_000, 2);
        let err = acct.restake(100, NOW + SECONDS_PER_DAY).unwrap_err();
        assert_eq!(err, StakeErrorCode::StakeLocked.into());
        assert_eq!(acct.amount, 1_000);
    }

    #[test]
    fn restake_compounds_and_relocks() {
        let mut acct = staked(100_000_000, 1);
        let after = NOW + SECONDS_PER_DAY;
        let reward = acct.accrued_reward(after, RATE_BPS).unwrap();
        assert_eq!(reward, 10_000_000);

        acct.restake(reward, after).unwrap();
        assert_eq!(acct.amount, 110_000_000);
        assert_eq!(acct.start_time, after);
        assert_eq!(acct.duration, 1);
        assert_eq!(acct.status, StakeStatus::Locked);
        assert_eq!(acct.status_at(after), StakeStatus::Locked);
    }

    #[test]
    fn accrual_is_capped_at_the_lock_period() {
        let acct = staked(100_000_000, 1);
        let at_expiry = acct
            .accrued_reward(NOW + SECONDS_PER_DAY, RATE_BPS)
            .unwrap();
        let long_after = acct
            .accrued_reward(NOW + 100 * SECONDS_PER_DAY, RATE_BPS)
            .unwrap();
        assert_eq!(at_expiry, long_after);
    }

    #[test]
    fn extend_replaces_duration_only() {
        let mut acct = staked(1_000, 7);
        acct.extend(30).unwrap();
        assert_eq!(acct.duration, 30);
        assert_eq!(acct.start_time, NOW);
        assert_eq!(acct.rewards, 0);
        assert_eq!(acct.unlock_at().unwrap(), NOW + 30 * SECONDS_PER_DAY);
    }

    #[test]
    fn extend_enforces_duration_bounds() {
        let mut acct = staked(1_000, 7);
        let err = acct.extend(DURATION_MAX + 1).unwrap_err();
        assert_eq!(err, StakeErrorCode::InvalidDuration.into());
        assert_eq!(acct.duration, 7);
    }

    #[test]
    fn extend_requires_a_live_stake() {
        let err = empty().extend(7).unwrap_err();
        assert_eq!(err, StakeErrorCode::StakeLocked.into());
    }

    #[test]
    fn extend_works_on_an_expired_lock() {
        let mut acct = staked(1_000, 1);
        assert_eq!(
            acct.status_at(NOW + 2 * SECONDS_PER_DAY),
            StakeStatus::Unlockable
        );
        acct.extend(14).unwrap();
        assert_eq!(acct.duration, 14);
    }

    #[test]
    fn close_out_releases_the_account() {
        let mut acct = staked(1_000, 1);
        acct.close_out();
        assert_eq!(acct.amount, 0);
        assert_eq!(acct.rewards, 0);
        assert_eq!(acct.status, StakeStatus::Uninitialized);
        assert_eq!(acct.owner, Pubkey::default());

        // released record accepts a fresh stake
        assert!(acct
            .stake(Pubkey::new_unique(), 2_000, 7, 255, NOW + 10)
            .is_ok());
    }

    #[test]
    fn full_cycle_stake_restake_unstake() {
        let mut acct = staked(100_000_000, 1);

        let t1 = NOW + SECONDS_PER_DAY;
        let reward = acct.accrued_reward(t1, RATE_BPS).unwrap();
        acct.restake(reward, t1).unwrap();

        let t2 = t1 + SECONDS_PER_DAY;
        acct.require_unlockable(t2).unwrap();
        let final_reward = acct.accrued_reward(t2, RATE_BPS).unwrap();
        assert_eq!(final_reward, 11_000_000);

        let payout = acct.amount + final_reward;
        assert_eq!(payout, 121_000_000);
        acct.close_out();
        assert_eq!(acct.status, StakeStatus::Uninitialized);
    }
}
