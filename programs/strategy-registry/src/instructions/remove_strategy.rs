use anchor_lang::prelude::*;

use crate::constants::ROLES_ADMIN_SEED;
use crate::events::StrategyRemovedEvent;
use crate::state::{RolesAdmin, Strategy};

/// Ghost-marks the strategy so array positions elsewhere stay stable. The
/// account itself is never closed and its index is never reused.
#[derive(Accounts)]
pub struct RemoveStrategy<'info> {
    #[account(mut)]
    pub strategy: Account<'info, Strategy>,

    #[account(seeds = [ROLES_ADMIN_SEED.as_bytes()], bump = roles_admin.bump)]
    pub roles_admin: Account<'info, RolesAdmin>,

    #[account(mut, address = roles_admin.account)]
    pub admin: Signer<'info>,
}

pub fn handle_remove_strategy(ctx: Context<RemoveStrategy>) -> Result<()> {
    let strategy = &mut ctx.accounts.strategy;
    strategy.not_removed()?;
    strategy.mark_removed();

    emit!(StrategyRemovedEvent {
        strategy_key: strategy.key(),
    });

    Ok(())
}
