//! # Token Staking - Time-Based Reward Accrual
//!
//! ## Business Process Flow
//!
//! 1. Initial Setup:
//!    - The program upgrade authority initializes the program with the
//!      staking mint, the reward mint, the accrual parameters and the
//!      administrator set
//!    - Two vault token accounts are created under a program-derived
//!      authority: one holding deposited principal, one holding the reward
//!      budget (funded externally)
//!
//! 2. User Staking Flow:
//!    a. Deposit Phase:
//!       - User stakes staking tokens; the position starts accruing reward
//!         continuously at `reward_percent / 10^reward_percent_scale`
//!         percent per `reward_period`
//!       - Topping up an active position settles the reward earned so far
//!         and does not restart the staking clock
//!    b. Claiming:
//!       - User claims accrued reward at any time; accrual stops at
//!         `max_staking_time` after the stake started
//!    c. Withdrawal:
//!       - After `minimum_holding_time` has elapsed the user unstakes,
//!         receiving the full principal plus any outstanding reward; the
//!         record resets and a fresh stake may be opened
//!
//! 3. Administrative Functions:
//!    - Administrators tune the accrual rate, accrual period, minimum
//!      holding time and accrual horizon; changes apply immediately to all
//!      open positions
//!    - The upgrade authority manages the administrator set
//!
//! Security is maintained through PDAs (Program Derived Addresses) and
//! strict token authority controls. All token operations are atomic and
//! validated through Solana's transaction model.

pub mod account_structs;
pub mod error;
pub mod events;
mod guard;
pub mod processor;
pub mod state;

use account_structs::*;
use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod token_staking {
    use super::*;

    /// Initializes the staking program:
    /// - staking_mint: the token users deposit
    /// - reward_mint: the token users accrue while staked
    /// - reward_period: seconds per application of the reward rate
    /// - reward_percent / reward_percent_scale: rate of
    ///   `reward_percent / 10^scale` percent per period
    /// - minimum_holding_time: seconds before unstaking is permitted
    /// - max_staking_time: accrual horizon from stake start
    pub fn initialize(
        ctx: Context<Initialize>,
        reward_period: i64,
        reward_percent: u64,
        reward_percent_scale: u32,
        minimum_holding_time: i64,
        max_staking_time: i64,
        administrators: Vec<Pubkey>,
    ) -> Result<()> {
        processor::initialize(
            ctx,
            reward_period,
            reward_percent,
            reward_percent_scale,
            minimum_holding_time,
            max_staking_time,
            administrators,
        )
    }

    /// Deposits staking tokens. Opens a fresh position, or tops up an
    /// active one after settling the reward accrued so far.
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        processor::stake(ctx, amount)
    }

    /// Pays out the reward accrued since the last settlement.
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        processor::claim(ctx)
    }

    /// Returns the full principal plus any outstanding reward and resets
    /// the caller's record. Requires the minimum holding time to have
    /// elapsed.
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        processor::unstake(ctx)
    }

    /// Updates the accrual period. Administrator only; the period must be
    /// positive.
    pub fn set_reward_period(ctx: Context<UpdateStakeConfig>, period: i64) -> Result<()> {
        processor::set_reward_period(ctx, period)
    }

    /// Updates the reward rate (integer percent numerator plus decimal
    /// scale). Administrator only.
    pub fn set_reward_rate(
        ctx: Context<UpdateStakeConfig>,
        percent: u64,
        scale: u32,
    ) -> Result<()> {
        processor::set_reward_rate(ctx, percent, scale)
    }

    /// Updates the minimum holding time. Administrator only; zero means
    /// unstaking is always permitted.
    pub fn set_minimum_holding_time(
        ctx: Context<UpdateStakeConfig>,
        duration: i64,
    ) -> Result<()> {
        processor::set_minimum_holding_time(ctx, duration)
    }

    /// Updates the accrual horizon. Administrator only; applies to open
    /// positions as well.
    pub fn set_max_staking_time(ctx: Context<UpdateStakeConfig>, duration: i64) -> Result<()> {
        processor::set_max_staking_time(ctx, duration)
    }

    /// Replaces the administrator set. Upgrade authority only.
    pub fn update_administrators(
        ctx: Context<UpdateAdministrators>,
        new_administrators: Vec<Pubkey>,
    ) -> Result<()> {
        processor::update_administrators(ctx, new_administrators)
    }

    /// Reward a record would pay out right now.
    pub fn pending_reward(ctx: Context<PendingRewardView>) -> Result<u64> {
        processor::pending_reward(ctx)
    }
}
