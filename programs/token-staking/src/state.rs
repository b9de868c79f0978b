use anchor_lang::prelude::*;

use crate::error::StakingError;

pub const MAX_ADMINISTRATORS: usize = 5; // max number of parameter administrators
pub const MIN_REWARD_PERIOD: i64 = 1; // 1 second

// The rate is expressed in percent, so every reward computation divides by 100
// on top of the configured scale factor.
const PERCENT_DIVISOR: u128 = 100;

#[account]
pub struct StakeConfig {
    pub staking_mint: Pubkey,
    pub reward_mint: Pubkey,
    /// Seconds over which one application of the reward rate accrues.
    pub reward_period: i64,
    /// Rate numerator: the effective rate is
    /// `reward_percent / 10^reward_percent_scale` percent per `reward_period`.
    /// Kept as an integer + scale pair so reward arithmetic stays exact.
    pub reward_percent: u64,
    pub reward_percent_scale: u32,
    /// Seconds since stake start before unstaking is permitted. Zero is legal.
    pub minimum_holding_time: i64,
    /// Accrual horizon: no reward accrues past `start_ts + max_staking_time`.
    pub max_staking_time: i64,
    pub administrators: Vec<Pubkey>,
    pub bump: u8,
}

impl StakeConfig {
    // The administrators vector has a max length of 5 and must include the
    // Borsh overhead of 4 bytes for the length prefix.
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 4 + 8 + 8 + (4 + (32 * MAX_ADMINISTRATORS)) + 1;

    pub fn is_administrator(&self, key: &Pubkey) -> bool {
        self.administrators.contains(key)
    }

    /// Timestamp past which a position opened at `start_ts` accrues nothing.
    pub fn accrual_horizon(&self, start_ts: i64) -> i64 {
        start_ts.saturating_add(self.max_staking_time)
    }
}

/// One record per staker, created on first stake and reset to empty on full
/// unstake. `principal == 0` means no active position.
#[account]
pub struct StakeRecord {
    pub owner: Pubkey,
    pub principal: u64,
    /// When the current staking period began. Not reset by top-ups.
    pub start_ts: i64,
    /// Timestamp through which rewards have already been settled.
    pub last_claim_ts: i64,
    pub bump: u8,
}

impl StakeRecord {
    pub const LEN: usize = 8 + 32 + 8 + 8 + 8 + 1;

    pub fn is_empty(&self) -> bool {
        self.principal == 0
    }

    /// An open position whose accrual horizon has passed (or whose settlement
    /// already reached it) can no longer be topped up; it must be fully
    /// unstaked first. The horizon is evaluated against the current config,
    /// so lowering `max_staking_time` applies to open positions as well.
    pub fn limit_reached(&self, config: &StakeConfig, now: i64) -> bool {
        if self.is_empty() {
            return false;
        }
        let horizon = config.accrual_horizon(self.start_ts);
        now >= horizon || self.last_claim_ts >= horizon
    }

    /// Reward accrued since the last settlement, clamped to the accrual
    /// horizon. Read-only; `settle` advances the checkpoint.
    pub fn pending_reward(&self, config: &StakeConfig, now: i64) -> Result<u64> {
        if self.is_empty() {
            return Ok(0);
        }
        let effective_end = now.min(config.accrual_horizon(self.start_ts));
        let elapsed = effective_end.saturating_sub(self.last_claim_ts);
        calculate_reward(
            self.principal,
            config.reward_percent,
            config.reward_percent_scale,
            elapsed,
            config.reward_period,
        )
    }

    /// Computes the pending reward and advances `last_claim_ts` to the end of
    /// the settled window. The checkpoint never moves backwards, so a
    /// retroactive `max_staking_time` reduction leaves it in place.
    pub fn settle(&mut self, config: &StakeConfig, now: i64) -> Result<u64> {
        let reward = self.pending_reward(config, now)?;
        let effective_end = now.min(config.accrual_horizon(self.start_ts));
        if effective_end > self.last_claim_ts {
            self.last_claim_ts = effective_end;
        }
        Ok(reward)
    }

    pub fn reset(&mut self) {
        self.principal = 0;
        self.start_ts = 0;
        self.last_claim_ts = 0;
    }
}

/// Exact integer reward arithmetic:
///
/// `reward = principal * percent * elapsed / (10^scale * 100 * period)`
///
/// All intermediates are widened to u128 and checked; division truncates
/// toward zero so the ledger never over-pays.
pub fn calculate_reward(
    principal: u64,
    reward_percent: u64,
    reward_percent_scale: u32,
    elapsed: i64,
    reward_period: i64,
) -> Result<u64> {
    if principal == 0 || reward_percent == 0 || elapsed <= 0 {
        return Ok(0);
    }
    require!(reward_period >= MIN_REWARD_PERIOD, StakingError::DivisionByZero);

    let scale = num_traits::checked_pow(10u128, reward_percent_scale as usize)
        .ok_or(StakingError::Overflow)?;

    let numerator = (principal as u128)
        .checked_mul(reward_percent as u128)
        .ok_or(StakingError::Overflow)?
        .checked_mul(elapsed as u128)
        .ok_or(StakingError::Overflow)?;

    let denominator = scale
        .checked_mul(PERCENT_DIVISOR)
        .ok_or(StakingError::Overflow)?
        .checked_mul(reward_period as u128)
        .ok_or(StakingError::Overflow)?;

    let reward = numerator
        .checked_div(denominator)
        .ok_or(StakingError::DivisionByZero)?;

    u64::try_from(reward).map_err(|_| StakingError::Overflow.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(percent: u64, scale: u32, period: i64, holding: i64, max: i64) -> StakeConfig {
        StakeConfig {
            staking_mint: Pubkey::default(),
            reward_mint: Pubkey::default(),
            reward_period: period,
            reward_percent: percent,
            reward_percent_scale: scale,
            minimum_holding_time: holding,
            max_staking_time: max,
            administrators: vec![],
            bump: 255,
        }
    }

    fn record(principal: u64, start_ts: i64) -> StakeRecord {
        StakeRecord {
            owner: Pubkey::default(),
            principal,
            start_ts,
            last_claim_ts: start_ts,
            bump: 255,
        }
    }

    #[test]
    fn reward_matches_direct_formula_evaluation() {
        // 1000 staked for 30 seconds at 20% per 10-second period:
        // 1000 * 20 * 30 / (10^0 * 100 * 10) = 600, and evaluated the long
        // way: 1000 * 20 / 1 / 100 * 30 / 10 = 600.
        assert_eq!(calculate_reward(1000, 20, 0, 30, 10).unwrap(), 600);
    }

    #[test]
    fn reward_division_truncates() {
        // 10000 * 255725 / (10^4 * 100 * 1) = 2557.25 -> 2557
        assert_eq!(calculate_reward(10_000, 255_725, 4, 1, 1).unwrap(), 2557);
        // Sub-unit accrual floors to zero rather than rounding up.
        assert_eq!(calculate_reward(1, 1, 0, 1, 100).unwrap(), 0);
    }

    #[test]
    fn reward_zero_inputs() {
        assert_eq!(calculate_reward(0, 20, 0, 30, 10).unwrap(), 0);
        assert_eq!(calculate_reward(1000, 0, 0, 30, 10).unwrap(), 0);
        assert_eq!(calculate_reward(1000, 20, 0, 0, 10).unwrap(), 0);
        assert_eq!(calculate_reward(1000, 20, 0, -5, 10).unwrap(), 0);
    }

    #[test]
    fn reward_overflow_is_an_error_not_a_panic() {
        assert!(calculate_reward(u64::MAX, u64::MAX, 0, i64::MAX, 1).is_err());
        // 10^60 does not fit in u128 either.
        assert!(calculate_reward(1000, 20, 60, 30, 10).is_err());
    }

    #[test]
    fn pending_reward_is_monotonic_and_capped() {
        let cfg = config(20, 0, 10, 0, 100);
        let rec = record(1000, 50);

        let mut last = 0;
        for now in 50..200 {
            let reward = rec.pending_reward(&cfg, now).unwrap();
            assert!(reward >= last);
            last = reward;
        }
        // Past the horizon the reward is pinned to the capped window.
        let at_horizon = rec.pending_reward(&cfg, 150).unwrap();
        assert_eq!(rec.pending_reward(&cfg, 10_000).unwrap(), at_horizon);
        assert_eq!(at_horizon, calculate_reward(1000, 20, 0, 100, 10).unwrap());
    }

    #[test]
    fn settle_is_idempotent() {
        let cfg = config(20, 0, 10, 0, 100);
        let mut rec = record(1000, 0);

        assert_eq!(rec.settle(&cfg, 30).unwrap(), 600);
        assert_eq!(rec.last_claim_ts, 30);
        // Claiming again at the same instant accrues nothing.
        assert_eq!(rec.settle(&cfg, 30).unwrap(), 0);
        assert_eq!(rec.last_claim_ts, 30);
    }

    #[test]
    fn incremental_settlement_sums_to_one_shot_settlement() {
        let cfg = config(20, 0, 10, 0, 1000);
        let mut incremental = record(1000, 0);
        let mut one_shot = record(1000, 0);

        let mut total = 0u64;
        for now in [100, 250, 400] {
            total += incremental.settle(&cfg, now).unwrap();
        }
        assert_eq!(total, one_shot.settle(&cfg, 400).unwrap());
    }

    #[test]
    fn settle_clamps_checkpoint_to_horizon() {
        let cfg = config(20, 0, 10, 0, 100);
        let mut rec = record(1000, 50);

        rec.settle(&cfg, 500).unwrap();
        assert_eq!(rec.last_claim_ts, 150);
        assert!(rec.start_ts <= rec.last_claim_ts);
        assert!(rec.last_claim_ts <= cfg.accrual_horizon(rec.start_ts));
        // Nothing left once the checkpoint sits on the horizon.
        assert_eq!(rec.settle(&cfg, 1_000_000).unwrap(), 0);
    }

    #[test]
    fn checkpoint_does_not_move_backwards_when_horizon_shrinks() {
        let mut cfg = config(20, 0, 10, 0, 1000);
        let mut rec = record(1000, 0);
        rec.settle(&cfg, 500).unwrap();

        cfg.max_staking_time = 100;
        assert_eq!(rec.pending_reward(&cfg, 600).unwrap(), 0);
        assert_eq!(rec.settle(&cfg, 600).unwrap(), 0);
        assert_eq!(rec.last_claim_ts, 500);
    }

    #[test]
    fn limit_reached_only_after_horizon() {
        let cfg = config(20, 0, 10, 0, 100);
        let mut rec = record(1000, 50);

        assert!(!rec.limit_reached(&cfg, 149));
        assert!(rec.limit_reached(&cfg, 150));
        assert!(rec.limit_reached(&cfg, 151));

        // A settlement that reaches the horizon also exhausts the position.
        rec.settle(&cfg, 150).unwrap();
        assert!(rec.limit_reached(&cfg, 150));

        // Empty records are never limited.
        rec.reset();
        assert!(!rec.limit_reached(&cfg, i64::MAX));
    }

    #[test]
    fn rate_changes_apply_to_open_positions() {
        let mut cfg = config(20, 0, 10, 0, 1000);
        let mut rec = record(1000, 0);

        assert_eq!(rec.settle(&cfg, 10).unwrap(), 200);

        cfg.reward_percent = 40;
        assert_eq!(rec.settle(&cfg, 20).unwrap(), 400);
    }

    #[test]
    fn reset_clears_position() {
        let cfg = config(20, 0, 10, 0, 100);
        let mut rec = record(1000, 50);
        rec.settle(&cfg, 80).unwrap();

        rec.reset();
        assert!(rec.is_empty());
        assert_eq!(rec.start_ts, 0);
        assert_eq!(rec.last_claim_ts, 0);
        assert_eq!(rec.pending_reward(&cfg, 1000).unwrap(), 0);
    }
}
