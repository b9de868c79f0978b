use anchor_lang::prelude::*;

#[allow(deprecated)]
use anchor_lang::solana_program::bpf_loader_upgradeable::UpgradeableLoaderState;

use crate::error::StakingError;

/// The program's upgrade authority doubles as the deployment authority: only
/// it may initialize the program and replace the administrator set.
pub fn validate_program_update_authority<'info>(
    program_data: &UncheckedAccount<'info>,
    signer: &Signer<'info>,
) -> Result<()> {
    let data = program_data.try_borrow_data()?;
    let state: UpgradeableLoaderState =
        bincode::deserialize(&data).map_err(|_| StakingError::InvalidProgramData)?;

    match state {
        UpgradeableLoaderState::ProgramData {
            upgrade_authority_address,
            ..
        } => {
            let upgrade_authority =
                upgrade_authority_address.ok_or(StakingError::NoUpgradeAuthority)?;
            require_keys_eq!(
                upgrade_authority,
                signer.key(),
                StakingError::InvalidUpgradeAuthority
            );
            Ok(())
        }
        _ => Err(StakingError::InvalidProgramData.into()),
    }
}
