use anchor_lang::prelude::*;

#[event]
pub struct InitializeEvent {
    pub payer: Pubkey,
    pub reward_token_mint: Pubkey,
    pub reward_vault: Pubkey,
    pub reward_rate_bps: u64,
}

#[event]
pub struct StakeEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub duration: i64,
    pub mint: Pubkey,
    pub user_vault: Pubkey,
}

#[event]
pub struct RestakeEvent {
    pub user: Pubkey,
    pub reward: u64,
    pub new_amount: u64,
    pub user_vault: Pubkey,
}

#[event]
pub struct ExtendEvent {
    pub user: Pubkey,
    pub old_duration: i64,
    pub new_duration: i64,
}

#[event]
pub struct UnstakeEvent {
    pub user: Pubkey,
    pub principal: u64,
    pub rewards: u64,
    pub mint: Pubkey,
}
