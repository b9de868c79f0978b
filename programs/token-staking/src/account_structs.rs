use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[allow(deprecated)]
use anchor_lang::solana_program::bpf_loader_upgradeable::{self};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = signer,
        space = StakeConfig::LEN,
        seeds = [b"stake_config"],
        bump
    )]
    pub stake_config: Account<'info, StakeConfig>,

    /// CHECK: This is a PDA that acts as the authority over both vault token
    /// accounts, validated by seeds constraint. Only this program can sign
    /// for it, so only this program can move tokens out of the vaults.
    #[account(
        seeds = [b"vault_authority"],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub staking_mint: Account<'info, Mint>,
    pub reward_mint: Account<'info, Mint>,

    /// Custody for deposited principal.
    #[account(
        init,
        payer = signer,
        token::mint = staking_mint,
        token::authority = vault_authority,
        seeds = [b"staking_vault"],
        bump
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    /// Custody for the reward budget. Funded externally by transferring
    /// reward tokens to it.
    #[account(
        init,
        payer = signer,
        token::mint = reward_mint,
        token::authority = vault_authority,
        seeds = [b"reward_vault"],
        bump
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ StakingError::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(
        seeds = [b"stake_config"],
        bump = stake_config.bump
    )]
    pub stake_config: Account<'info, StakeConfig>,

    #[account(
        init_if_needed,
        payer = user,
        space = StakeRecord::LEN,
        seeds = [b"stake_record", user.key().as_ref()],
        bump
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// CHECK: This is a PDA that acts as vault authority, validated by seeds constraint
    #[account(
        seeds = [b"vault_authority"],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [b"staking_vault"],
        bump,
        constraint = staking_vault.mint == stake_config.staking_mint @ StakingError::InvalidMint
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [b"reward_vault"],
        bump,
        constraint = reward_vault.mint == stake_config.reward_mint @ StakingError::InvalidMint
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        constraint = user_staking_token_account.mint == stake_config.staking_mint @ StakingError::InvalidMint,
        constraint = user_staking_token_account.owner == user.key() @ StakingError::InvalidTokenOwner
    )]
    pub user_staking_token_account: Account<'info, TokenAccount>,

    /// Receives any reward settled while topping up an active position.
    #[account(
        mut,
        constraint = user_reward_token_account.mint == stake_config.reward_mint @ StakingError::InvalidMint,
        constraint = user_reward_token_account.owner == user.key() @ StakingError::InvalidTokenOwner
    )]
    pub user_reward_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(
        seeds = [b"stake_config"],
        bump = stake_config.bump
    )]
    pub stake_config: Account<'info, StakeConfig>,

    #[account(
        mut,
        seeds = [b"stake_record", user.key().as_ref()],
        bump = stake_record.bump
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// CHECK: This is a PDA that acts as vault authority, validated by seeds constraint
    #[account(
        seeds = [b"vault_authority"],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [b"reward_vault"],
        bump,
        constraint = reward_vault.mint == stake_config.reward_mint @ StakingError::InvalidMint
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub user: Signer<'info>,

    #[account(
        mut,
        constraint = user_reward_token_account.mint == stake_config.reward_mint @ StakingError::InvalidMint,
        constraint = user_reward_token_account.owner == user.key() @ StakingError::InvalidTokenOwner
    )]
    pub user_reward_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct Unstake<'info> {
    #[account(
        seeds = [b"stake_config"],
        bump = stake_config.bump
    )]
    pub stake_config: Account<'info, StakeConfig>,

    // The record is kept open and reset to empty so the account survives a
    // later re-stake.
    #[account(
        mut,
        seeds = [b"stake_record", user.key().as_ref()],
        bump = stake_record.bump
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// CHECK: This is a PDA that acts as vault authority, validated by seeds constraint
    #[account(
        seeds = [b"vault_authority"],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [b"staking_vault"],
        bump,
        constraint = staking_vault.mint == stake_config.staking_mint @ StakingError::InvalidMint
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [b"reward_vault"],
        bump,
        constraint = reward_vault.mint == stake_config.reward_mint @ StakingError::InvalidMint
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub user: Signer<'info>,

    #[account(
        mut,
        constraint = user_staking_token_account.mint == stake_config.staking_mint @ StakingError::InvalidMint,
        constraint = user_staking_token_account.owner == user.key() @ StakingError::InvalidTokenOwner
    )]
    pub user_staking_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_reward_token_account.mint == stake_config.reward_mint @ StakingError::InvalidMint,
        constraint = user_reward_token_account.owner == user.key() @ StakingError::InvalidTokenOwner
    )]
    pub user_reward_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Shared context for the four parameter setters. The administrator check
/// runs in the processor against the stored administrator list.
#[derive(Accounts)]
pub struct UpdateStakeConfig<'info> {
    #[account(
        mut,
        seeds = [b"stake_config"],
        bump = stake_config.bump
    )]
    pub stake_config: Account<'info, StakeConfig>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct UpdateAdministrators<'info> {
    #[account(
        mut,
        seeds = [b"stake_config"],
        bump = stake_config.bump
    )]
    pub stake_config: Account<'info, StakeConfig>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ StakingError::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct PendingRewardView<'info> {
    #[account(
        seeds = [b"stake_config"],
        bump = stake_config.bump
    )]
    pub stake_config: Account<'info, StakeConfig>,

    /// CHECK: Read-only owner of the stake record; does not sign.
    pub user: AccountInfo<'info>,

    #[account(
        seeds = [b"stake_record", user.key().as_ref()],
        bump = stake_record.bump
    )]
    pub stake_record: Account<'info, StakeRecord>,
}

// Helper function to derive the program data address
fn get_program_data_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id()).0
}
