use anchor_lang::prelude::*;

#[event]
pub struct StakeEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub principal: u64,
    pub reward_paid: u64,
    pub timestamp: i64,
}

#[event]
pub struct ClaimEvent {
    pub user: Pubkey,
    pub reward: u64,
    pub timestamp: i64,
}

#[event]
pub struct UnstakeEvent {
    pub user: Pubkey,
    pub principal: u64,
    pub reward: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardPeriodUpdated {
    pub admin: Pubkey,
    pub old_period: i64,
    pub new_period: i64,
}

#[event]
pub struct RewardRateUpdated {
    pub admin: Pubkey,
    pub old_percent: u64,
    pub old_scale: u32,
    pub new_percent: u64,
    pub new_scale: u32,
}

#[event]
pub struct MinimumHoldingTimeUpdated {
    pub admin: Pubkey,
    pub old_duration: i64,
    pub new_duration: i64,
}

#[event]
pub struct MaxStakingTimeUpdated {
    pub admin: Pubkey,
    pub old_duration: i64,
    pub new_duration: i64,
}

#[event]
pub struct AdministratorsUpdated {
    pub authority: Pubkey,
    pub count: u64,
}
