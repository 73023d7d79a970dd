use crate::account_structs::*;
use crate::error::*;
use crate::events::*;
use crate::state::{REWARD_VAULT_SEED, USER_VAULT_SEED, MAX_REWARD_RATE_BPS};
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

pub fn init(ctx: Context<Init>, reward_rate_bps: u64) -> Result<()> {
    require!(
        !ctx.accounts.vault_info.is_initialized,
        StakeErrorCode::AlreadyInitialized
    );
    require!(
        reward_rate_bps > 0 && reward_rate_bps <= MAX_REWARD_RATE_BPS,
        StakeErrorCode::InvalidRewardRate
    );

    let vault_info = &mut ctx.accounts.vault_info;
    vault_info.reward_token_mint = ctx.accounts.reward_token_mint.key();
    vault_info.reward_vault = ctx.accounts.reward_vault.key();
    vault_info.reward_rate_bps = reward_rate_bps;
    vault_info.total_value_locked = 0;
    vault_info.lifetime_value_locked = 0;
    vault_info.is_initialized = true;
    vault_info.bump = ctx.bumps.vault_info;

    emit!(InitializeEvent {
        payer: ctx.accounts.user.key(),
        reward_token_mint: ctx.accounts.reward_token_mint.key(),
        reward_vault: ctx.accounts.reward_vault.key(),
        reward_rate_bps,
    });

    Ok(())
}

pub fn stake(ctx: Context<Stake>, amount: u64, duration: i64) -> Result<()> {
    require!(
        ctx.accounts.vault_info.is_initialized,
        StakeErrorCode::NotInitialized
    );
    require!(
        ctx.accounts.user_token_account.amount >= amount,
        StakeErrorCode::InsufficientFunds
    );

    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.stake_account.stake(
        ctx.accounts.user.key(),
        amount,
        duration,
        ctx.bumps.user_vault,
        now,
    )?;

    let cpi_accounts = Transfer {
        from: ctx.accounts.user_token_account.to_account_info(),
        to: ctx.accounts.user_vault.to_account_info(),
        authority: ctx.accounts.user.to_account_info(),
    };
    token::transfer(
        CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts),
        amount,
    )?;

    let vault_info = &mut ctx.accounts.vault_info;
    vault_info.total_value_locked = vault_info
        .total_value_locked
        .checked_add(amount)
        .ok_or(StakeErrorCode::ArithmeticOverflow)?;
    vault_info.lifetime_value_locked = vault_info
        .lifetime_value_locked
        .checked_add(amount)
        .ok_or(StakeErrorCode::ArithmeticOverflow)?;

    emit!(StakeEvent {
        user: ctx.accounts.user.key(),
        amount,
        duration,
        mint: ctx.accounts.mint.key(),
        user_vault: ctx.accounts.user_vault.key(),
    });

    Ok(())
}

pub fn restake(ctx: Context<Restake>) -> Result<()> {
    require!(
        ctx.accounts.vault_info.is_initialized,
        StakeErrorCode::NotInitialized
    );

    let now = Clock::get()?.unix_timestamp;
    let stake_account = &ctx.accounts.stake_account;
    stake_account.require_unlockable(now)?;

    let reward =
        stake_account.accrued_reward(now, ctx.accounts.vault_info.reward_rate_bps)?;
    require!(
        ctx.accounts.reward_vault.amount >= reward,
        StakeErrorCode::InsufficientFunds
    );

    // compound the reward into the user's vault, signed by the reward vault PDA
    let signer: &[&[&[u8]]] = &[&[REWARD_VAULT_SEED, &[ctx.bumps.reward_vault]]];
    let cpi_accounts = Transfer {
        from: ctx.accounts.reward_vault.to_account_info(),
        to: ctx.accounts.user_vault.to_account_info(),
        authority: ctx.accounts.reward_vault.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer,
        ),
        reward,
    )?;

    ctx.accounts.stake_account.restake(reward, now)?;

    let vault_info = &mut ctx.accounts.vault_info;
    vault_info.total_value_locked = vault_info
        .total_value_locked
        .checked_add(reward)
        .ok_or(StakeErrorCode::ArithmeticOverflow)?;

    msg!("restaked {} reward units for {}", reward, ctx.accounts.user.key());
    emit!(RestakeEvent {
        user: ctx.accounts.user.key(),
        reward,
        new_amount: ctx.accounts.stake_account.amount,
        user_vault: ctx.accounts.user_vault.key(),
    });

    Ok(())
}

pub fn extend(ctx: Context<Extend>, duration: i64) -> Result<()> {
    let old_duration = ctx.accounts.stake_account.duration;
    ctx.accounts.stake_account.extend(duration)?;

    emit!(ExtendEvent {
        user: ctx.accounts.user.key(),
        old_duration,
        new_duration: duration,
    });

    Ok(())
}

pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
    require!(
        ctx.accounts.vault_info.is_initialized,
        StakeErrorCode::NotInitialized
    );

    let now = Clock::get()?.unix_timestamp;
    let stake_account = &ctx.accounts.stake_account;
    stake_account.require_unlockable(now)?;

    let final_reward =
        stake_account.accrued_reward(now, ctx.accounts.vault_info.reward_rate_bps)?;
    let rewards_due = stake_account
        .rewards
        .checked_add(final_reward)
        .ok_or(StakeErrorCode::ArithmeticOverflow)?;
    let principal = stake_account.amount;

    require!(
        ctx.accounts.user_vault.amount >= principal,
        StakeErrorCode::InsufficientFunds
    );
    require!(
        ctx.accounts.reward_vault.amount >= rewards_due,
        StakeErrorCode::InsufficientFunds
    );

    // return the principal from the user's vault
    let user_key = ctx.accounts.user.key();
    let signer: &[&[&[u8]]] =
        &[&[USER_VAULT_SEED, user_key.as_ref(), &[ctx.bumps.user_vault]]];
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_vault.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.user_vault.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer,
        ),
        principal,
    )?;

    // pay out the accrued rewards from the reward vault
    let signer: &[&[&[u8]]] = &[&[REWARD_VAULT_SEED, &[ctx.bumps.reward_vault]]];
    let cpi_accounts = Transfer {
        from: ctx.accounts.reward_vault.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.reward_vault.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer,
        ),
        rewards_due,
    )?;

    ctx.accounts.stake_account.close_out();

    let vault_info = &mut ctx.accounts.vault_info;
    vault_info.total_value_locked = vault_info
        .total_value_locked
        .checked_sub(principal)
        .ok_or(StakeErrorCode::ArithmeticOverflow)?;

    msg!(
        "unstaked {} principal and {} rewards for {}",
        principal,
        rewards_due,
        user_key
    );
    emit!(UnstakeEvent {
        user: user_key,
        principal,
        rewards: rewards_due,
        mint: ctx.accounts.mint.key(),
    });

    Ok(())
}
