use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Caller is not an administrator")]
    Unauthorized,
    #[msg("Invalid configuration parameter")]
    InvalidParameter,
    #[msg("Staking has reached the limit")]
    StakingLimitReached,
    #[msg("No reward to claim")]
    NoReward,
    #[msg("No tokens staked")]
    NoStake,
    #[msg("Holding period not elapsed")]
    HoldingPeriodNotElapsed,
    #[msg("Insufficient reward vault balance")]
    InsufficientRewardBalance,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Division by zero")]
    DivisionByZero,
    #[msg("Too many administrators")]
    TooManyAdministrators,
    #[msg("Invalid mint provided")]
    InvalidMint,
    #[msg("Invalid token account owner")]
    InvalidTokenOwner,
    #[msg("Invalid stake record owner")]
    InvalidRecordOwner,
    #[msg("ProgramData account did not match expected PDA.")]
    InvalidProgramData,
    #[msg("Program has no upgrade authority (set to None).")]
    NoUpgradeAuthority,
    #[msg("Signer is not the upgrade authority.")]
    InvalidUpgradeAuthority,
}
