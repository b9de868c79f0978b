use crate::account_structs::*;
use crate::error::*;
use crate::events::*;
use crate::guard::validate_program_update_authority;
use crate::state::{MAX_ADMINISTRATORS, MIN_REWARD_PERIOD};
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

pub fn initialize(
    ctx: Context<Initialize>,
    reward_period: i64,
    reward_percent: u64,
    reward_percent_scale: u32,
    minimum_holding_time: i64,
    max_staking_time: i64,
    administrators: Vec<Pubkey>,
) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;
    require!(
        administrators.len() <= MAX_ADMINISTRATORS,
        StakingError::TooManyAdministrators
    );
    require!(
        reward_period >= MIN_REWARD_PERIOD,
        StakingError::InvalidParameter
    );
    require!(minimum_holding_time >= 0, StakingError::InvalidParameter);
    require!(max_staking_time >= 0, StakingError::InvalidParameter);

    let config = &mut ctx.accounts.stake_config;
    config.staking_mint = ctx.accounts.staking_mint.key();
    config.reward_mint = ctx.accounts.reward_mint.key();
    config.reward_period = reward_period;
    config.reward_percent = reward_percent;
    config.reward_percent_scale = reward_percent_scale;
    config.minimum_holding_time = minimum_holding_time;
    config.max_staking_time = max_staking_time;
    config.administrators = administrators;
    config.bump = ctx.bumps.stake_config;

    Ok(())
}

pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    let now = Clock::get()?.unix_timestamp;
    let config = &ctx.accounts.stake_config;
    let record = &mut ctx.accounts.stake_record;

    let mut reward_paid = 0u64;
    if record.is_empty() {
        record.owner = ctx.accounts.user.key();
        record.start_ts = now;
        record.last_claim_ts = now;
        record.bump = ctx.bumps.stake_record;
    } else {
        require_keys_eq!(
            record.owner,
            ctx.accounts.user.key(),
            StakingError::InvalidRecordOwner
        );
        require!(
            !record.limit_reached(config, now),
            StakingError::StakingLimitReached
        );

        // Settle what the position has earned so far before the principal
        // changes; otherwise the pending window would accrue at the new,
        // larger principal. start_ts is left alone so top-ups do not restart
        // the holding clock.
        reward_paid = record.settle(config, now)?;
        if reward_paid > 0 {
            require!(
                ctx.accounts.reward_vault.amount >= reward_paid,
                StakingError::InsufficientRewardBalance
            );
            transfer_from_vault(
                &ctx.accounts.token_program,
                &ctx.accounts.reward_vault,
                &ctx.accounts.user_reward_token_account,
                &ctx.accounts.vault_authority,
                ctx.bumps.vault_authority,
                reward_paid,
            )?;
        }
    }

    let cpi_accounts = Transfer {
        from: ctx.accounts.user_staking_token_account.to_account_info(),
        to: ctx.accounts.staking_vault.to_account_info(),
        authority: ctx.accounts.user.to_account_info(),
    };
    token::transfer(
        CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts),
        amount,
    )?;

    record.principal = record
        .principal
        .checked_add(amount)
        .ok_or(StakingError::Overflow)?;

    msg!("Staked {} tokens, principal now {}", amount, record.principal);
    emit!(StakeEvent {
        user: ctx.accounts.user.key(),
        amount,
        principal: record.principal,
        reward_paid,
        timestamp: now,
    });

    Ok(())
}

pub fn claim(ctx: Context<Claim>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let config = &ctx.accounts.stake_config;
    let record = &mut ctx.accounts.stake_record;

    require_keys_eq!(
        record.owner,
        ctx.accounts.user.key(),
        StakingError::InvalidRecordOwner
    );

    // A failed instruction discards the checkpoint advance along with every
    // other account mutation, so settling before the zero-reward guard is
    // safe.
    let reward = record.settle(config, now)?;
    require!(reward > 0, StakingError::NoReward);
    require!(
        ctx.accounts.reward_vault.amount >= reward,
        StakingError::InsufficientRewardBalance
    );

    transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.reward_vault,
        &ctx.accounts.user_reward_token_account,
        &ctx.accounts.vault_authority,
        ctx.bumps.vault_authority,
        reward,
    )?;

    msg!("Claimed {} reward tokens", reward);
    emit!(ClaimEvent {
        user: ctx.accounts.user.key(),
        reward,
        timestamp: now,
    });

    Ok(())
}

pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let config = &ctx.accounts.stake_config;
    let record = &mut ctx.accounts.stake_record;

    require_keys_eq!(
        record.owner,
        ctx.accounts.user.key(),
        StakingError::InvalidRecordOwner
    );
    require!(!record.is_empty(), StakingError::NoStake);
    require!(
        now.saturating_sub(record.start_ts) >= config.minimum_holding_time,
        StakingError::HoldingPeriodNotElapsed
    );

    // Zero reward is tolerated here; the point of the call is returning the
    // principal.
    let reward = record.settle(config, now)?;
    if reward > 0 {
        require!(
            ctx.accounts.reward_vault.amount >= reward,
            StakingError::InsufficientRewardBalance
        );
        transfer_from_vault(
            &ctx.accounts.token_program,
            &ctx.accounts.reward_vault,
            &ctx.accounts.user_reward_token_account,
            &ctx.accounts.vault_authority,
            ctx.bumps.vault_authority,
            reward,
        )?;
    }

    let principal = record.principal;
    transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.staking_vault,
        &ctx.accounts.user_staking_token_account,
        &ctx.accounts.vault_authority,
        ctx.bumps.vault_authority,
        principal,
    )?;

    record.reset();

    msg!("Unstaked {} tokens, paid {} reward", principal, reward);
    emit!(UnstakeEvent {
        user: ctx.accounts.user.key(),
        principal,
        reward,
        timestamp: now,
    });

    Ok(())
}

pub fn set_reward_period(ctx: Context<UpdateStakeConfig>, period: i64) -> Result<()> {
    let config = &mut ctx.accounts.stake_config;
    require!(
        config.is_administrator(&ctx.accounts.signer.key()),
        StakingError::Unauthorized
    );
    require!(
        period >= MIN_REWARD_PERIOD,
        StakingError::InvalidParameter
    );

    let old_period = config.reward_period;
    config.reward_period = period;

    emit!(RewardPeriodUpdated {
        admin: ctx.accounts.signer.key(),
        old_period,
        new_period: period,
    });

    Ok(())
}

pub fn set_reward_rate(ctx: Context<UpdateStakeConfig>, percent: u64, scale: u32) -> Result<()> {
    let config = &mut ctx.accounts.stake_config;
    require!(
        config.is_administrator(&ctx.accounts.signer.key()),
        StakingError::Unauthorized
    );

    // No magnitude validation: administrators are trusted to keep the
    // effective rate economically sane.
    let old_percent = config.reward_percent;
    let old_scale = config.reward_percent_scale;
    config.reward_percent = percent;
    config.reward_percent_scale = scale;

    emit!(RewardRateUpdated {
        admin: ctx.accounts.signer.key(),
        old_percent,
        old_scale,
        new_percent: percent,
        new_scale: scale,
    });

    Ok(())
}

pub fn set_minimum_holding_time(ctx: Context<UpdateStakeConfig>, duration: i64) -> Result<()> {
    let config = &mut ctx.accounts.stake_config;
    require!(
        config.is_administrator(&ctx.accounts.signer.key()),
        StakingError::Unauthorized
    );
    require!(duration >= 0, StakingError::InvalidParameter);

    let old_duration = config.minimum_holding_time;
    config.minimum_holding_time = duration;

    emit!(MinimumHoldingTimeUpdated {
        admin: ctx.accounts.signer.key(),
        old_duration,
        new_duration: duration,
    });

    Ok(())
}

pub fn set_max_staking_time(ctx: Context<UpdateStakeConfig>, duration: i64) -> Result<()> {
    let config = &mut ctx.accounts.stake_config;
    require!(
        config.is_administrator(&ctx.accounts.signer.key()),
        StakingError::Unauthorized
    );
    require!(duration >= 0, StakingError::InvalidParameter);

    // No check against open positions: accrual always reads the current
    // config, so a reduction takes effect retroactively for pending
    // computations.
    let old_duration = config.max_staking_time;
    config.max_staking_time = duration;

    emit!(MaxStakingTimeUpdated {
        admin: ctx.accounts.signer.key(),
        old_duration,
        new_duration: duration,
    });

    Ok(())
}

pub fn update_administrators(
    ctx: Context<UpdateAdministrators>,
    new_administrators: Vec<Pubkey>,
) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;
    require!(
        new_administrators.len() <= MAX_ADMINISTRATORS,
        StakingError::TooManyAdministrators
    );

    let config = &mut ctx.accounts.stake_config;
    config.administrators = new_administrators;

    msg!(
        "Administrators updated. New count: {}",
        config.administrators.len()
    );
    emit!(AdministratorsUpdated {
        authority: ctx.accounts.signer.key(),
        count: config.administrators.len() as u64,
    });

    Ok(())
}

/// Reward the caller's record would pay out right now.
/// Returns the value via return_data for efficient CPI access.
pub fn pending_reward(ctx: Context<PendingRewardView>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let reward = ctx
        .accounts
        .stake_record
        .pending_reward(&ctx.accounts.stake_config, now)?;

    // Set return data so other programs can read via CPI
    anchor_lang::solana_program::program::set_return_data(&reward.to_le_bytes());

    Ok(reward)
}

fn transfer_from_vault<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    vault_authority: &UncheckedAccount<'info>,
    vault_authority_bump: u8,
    amount: u64,
) -> Result<()> {
    let seeds: &[&[u8]] = &[b"vault_authority", &[vault_authority_bump]];
    let signer = &[&seeds[..]];
    let cpi_accounts = Transfer {
        from: vault.to_account_info(),
        to: to.to_account_info(),
        authority: vault_authority.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            cpi_accounts,
            signer,
        ),
        amount,
    )
}
