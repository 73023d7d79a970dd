use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct Init<'info> {
    #[account(
        init_if_needed,
        payer = user,
        space = VaultInfo::LEN,
        seeds = [VAULT_INFO_SEED],
        bump
    )]
    pub vault_info: Box<Account<'info, VaultInfo>>,

    /// The reward vault token account lives at its own PDA and is its own
    /// authority, so only this program can sign transfers out of it.
    #[account(
        init_if_needed,
        payer = user,
        seeds = [REWARD_VAULT_SEED],
        bump,
        token::mint = reward_token_mint,
        token::authority = reward_vault
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub reward_token_mint: Account<'info, Mint>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(
        mut,
        seeds = [VAULT_INFO_SEED],
        bump = vault_info.bump,
    )]
    pub vault_info: Box<Account<'info, VaultInfo>>,

    #[account(
        init_if_needed,
        payer = user,
        seeds = [USER_VAULT_SEED, user.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = user_vault
    )]
    pub user_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        space = StakeAccount::LEN,
        seeds = [STAKE_ACCOUNT_SEED, user.key().as_ref()],
        bump,
    )]
    pub stake_account: Box<Account<'info, StakeAccount>>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = user
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        constraint = mint.key() == vault_info.reward_token_mint @ StakeErrorCode::AddressMismatch
    )]
    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Restake<'info> {
    #[account(
        mut,
        seeds = [VAULT_INFO_SEED],
        bump = vault_info.bump,
    )]
    pub vault_info: Box<Account<'info, VaultInfo>>,

    #[account(
        mut,
        seeds = [USER_VAULT_SEED, user.key().as_ref()],
        bump,
    )]
    pub user_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, user.key().as_ref()],
        bump,
        constraint = stake_account.owner == user.key() @ StakeErrorCode::Unauthorized
    )]
    pub stake_account: Box<Account<'info, StakeAccount>>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED],
        bump,
        constraint = reward_vault.key() == vault_info.reward_vault @ StakeErrorCode::AddressMismatch
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Extend<'info> {
    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, user.key().as_ref()],
        bump,
        constraint = stake_account.owner == user.key() @ StakeErrorCode::Unauthorized
    )]
    pub stake_account: Box<Account<'info, StakeAccount>>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Unstake<'info> {
    #[account(
        mut,
        seeds = [VAULT_INFO_SEED],
        bump = vault_info.bump,
    )]
    pub vault_info: Box<Account<'info, VaultInfo>>,

    #[account(
        mut,
        seeds = [USER_VAULT_SEED, user.key().as_ref()],
        bump,
    )]
    pub user_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, user.key().as_ref()],
        bump,
        constraint = stake_account.owner == user.key() @ StakeErrorCode::Unauthorized
    )]
    pub stake_account: Box<Account<'info, StakeAccount>>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = user
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED],
        bump,
        constraint = reward_vault.key() == vault_info.reward_vault @ StakeErrorCode::AddressMismatch
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        constraint = mint.key() == vault_info.reward_token_mint @ StakeErrorCode::AddressMismatch
    )]
    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
