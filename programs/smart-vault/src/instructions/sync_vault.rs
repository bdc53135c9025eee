use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use strategy_registry::state::oracle::usd_value_bulk;
use strategy_registry::state::DhwSnapshot;

use crate::constants::{
    FLUSH_BATCH_SEED, FULL_PERCENT, MAX_ASSETS, SVT_ESCROW_SEED, SVT_MINT_SEED,
    VAULT_AUTHORITY_SEED,
};
use crate::errors::ErrorCode;
use crate::events::{DepositsSyncedEvent, WithdrawalsSyncedEvent};
use crate::state::{FlushBatch, SmartVault};
use crate::utils::registry::vault_authority_seeds;
use crate::utils::token;

/// Settles the in-flight flush against the do-hard-work snapshots it was
/// routed to, one snapshot per routed strategy in slot order through the
/// remaining accounts. Mints SVTs for the batch's depositors and the fee
/// receiver, records the withdrawn assets, then retires the flush. With
/// `revert_if_nothing_to_sync` unset, a caught-up vault and a flush whose
/// do-hard-work round is still outstanding are quiet no-ops.
#[derive(Accounts)]
pub struct SyncVault<'info> {
    #[account(mut)]
    pub vault: Account<'info, SmartVault>,

    #[account(
        mut,
        seeds = [
            FLUSH_BATCH_SEED.as_bytes(),
            vault.key().as_ref(),
            &vault.to_sync_flush_index.to_le_bytes()
        ],
        bump = flush_batch.bump
    )]
    pub flush_batch: Option<Account<'info, FlushBatch>>,

    /// CHECK: PDA with mint authority over the vault's SVT mint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED.as_bytes(), vault.key().as_ref()],
        bump = vault.vault_authority_bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [SVT_MINT_SEED.as_bytes(), vault.key().as_ref()],
        bump = vault.svt_mint_bump
    )]
    pub svt_mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [SVT_ESCROW_SEED.as_bytes(), vault.key().as_ref()],
        bump
    )]
    pub svt_escrow: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = fee_svt_wallet.mint == svt_mint.key()
            && fee_svt_wallet.owner == vault.fee_receiver
            @ ErrorCode::InvalidAccountPairs
    )]
    pub fee_svt_wallet: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_sync_vault<'info>(
    ctx: Context<'_, '_, 'info, 'info, SyncVault<'info>>,
    revert_if_nothing_to_sync: bool,
) -> Result<()> {
    let sync_pending = ctx.accounts.vault.assert_sync_pending().is_ok();
    let batch = match ctx.accounts.flush_batch.as_mut() {
        Some(batch) if sync_pending => batch,
        _ => {
            if revert_if_nothing_to_sync {
                return Err(ErrorCode::NothingToSync.into());
            }
            return Ok(());
        }
    };
    let vault = &mut ctx.accounts.vault;
    let num_assets = vault.assets_len();

    let snapshots = match load_snapshots(ctx.remaining_accounts, vault, batch)? {
        Some(snapshots) => snapshots,
        None => {
            if revert_if_nothing_to_sync {
                return Err(ErrorCode::DhwNotRunYet.into());
            }
            return Ok(());
        }
    };
    let now = Clock::get()?.unix_timestamp;

    if batch.has_deposits() {
        let mut total_usd = 0u128;
        let mut value_before = 0u128;
        let mut yield_usd = 0u128;

        for (slot, snapshot) in snapshots.iter() {
            let distribution = batch.distribution(*slot);
            let usd = usd_value_bulk(
                &distribution[..num_assets],
                &snapshot.exchange_rates[..num_assets],
            );

            let sst_before = vault.strategies[*slot].sst_balance;
            let value = snapshot.share_value_usd(sst_before);
            value_before += value;
            if snapshot.yield_bps > 0 {
                yield_usd += value * snapshot.yield_bps as u128
                    / (FULL_PERCENT as u128 + snapshot.yield_bps as u128);
            }

            let claimed = snapshot.share_of_minted(usd)?;
            vault.credit_sst(*slot, claimed);
            total_usd += usd;
        }

        let outcome = vault.settle_deposit_sync(total_usd, value_before, yield_usd, now);

        let vault_key = vault.key();
        let authority_seeds =
            vault_authority_seeds(vault_key.as_ref(), &vault.vault_authority_bump);
        if outcome.minted_svts > 0 {
            token::mint_with_signer(
                ctx.accounts.token_program.to_account_info(),
                ctx.accounts.svt_mint.to_account_info(),
                ctx.accounts.svt_escrow.to_account_info(),
                ctx.accounts.vault_authority.to_account_info(),
                outcome.minted_svts,
                &authority_seeds,
            )?;
        }
        if outcome.fee_svts() > 0 {
            token::mint_with_signer(
                ctx.accounts.token_program.to_account_info(),
                ctx.accounts.svt_mint.to_account_info(),
                ctx.accounts.fee_svt_wallet.to_account_info(),
                ctx.accounts.vault_authority.to_account_info(),
                outcome.fee_svts(),
                &authority_seeds,
            )?;
        }

        batch.record_deposit_sync(outcome.minted_svts);

        emit!(DepositsSyncedEvent {
            vault_key,
            flush_index: batch.flush_index,
            minted_svts: outcome.minted_svts,
            deposit_fee_svts: outcome.deposit_fee_svts,
            management_fee_svts: outcome.management_fee_svts,
            performance_fee_svts: outcome.performance_fee_svts,
        });
    }

    if batch.has_withdrawals() {
        let mut withdrawn = [0u64; MAX_ASSETS];
        for (slot, snapshot) in snapshots.iter() {
            let shares = batch.strategy_shares[*slot];
            if shares > 0 {
                let amounts = snapshot.claim_withdrawals(shares)?;
                for (total, amount) in withdrawn.iter_mut().zip(amounts.iter()) {
                    *total += amount;
                }
            }
        }

        batch.record_withdrawal_sync(withdrawn);

        emit!(WithdrawalsSyncedEvent {
            vault_key: vault.key(),
            flush_index: batch.flush_index,
            withdrawn_assets: withdrawn,
        });
    }

    vault.advance_sync();

    Ok(())
}

/// One snapshot per routed slot, in slot order. A routed slot whose snapshot
/// account is still empty means do-hard-work has not settled that flush yet;
/// the caller decides whether that is an error.
fn load_snapshots<'info>(
    infos: &'info [AccountInfo<'info>],
    vault: &SmartVault,
    batch: &FlushBatch,
) -> Result<Option<Vec<(usize, Account<'info, DhwSnapshot>)>>> {
    let mut snapshots = Vec::new();
    let mut infos = infos.iter();

    for slot in 0..vault.num_strategies as usize {
        let dhw_index = batch.dhw_indexes[slot];
        if dhw_index == 0 {
            continue;
        }

        let info = infos.next().ok_or(ErrorCode::InvalidAccountPairs)?;
        if info.data_is_empty() {
            return Ok(None);
        }

        let snapshot = Account::<DhwSnapshot>::try_from(info)?;
        if snapshot.strategy != vault.strategies[slot].key {
            return Err(ErrorCode::InvalidAccountPairs.into());
        }
        if snapshot.dhw_index != dhw_index {
            return Err(ErrorCode::DhwNotRunYet.into());
        }
        snapshots.push((slot, snapshot));
    }

    if infos.next().is_some() {
        return Err(ErrorCode::InvalidAccountPairs.into());
    }

    Ok(Some(snapshots))
}
