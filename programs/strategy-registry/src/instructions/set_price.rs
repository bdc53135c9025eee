use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::{DISCRIMINATOR_LEN, PRICE_FEED_SEED, ROLES_SEED};
use crate::events::PriceUpdatedEvent;
use crate::state::{AccountRoles, PriceFeed};

#[derive(Accounts)]
pub struct SetPrice<'info> {
    #[account(
        init_if_needed,
        payer = keeper,
        space = DISCRIMINATOR_LEN + PriceFeed::INIT_SPACE,
        seeds = [PRICE_FEED_SEED.as_bytes(), asset_mint.key().as_ref()],
        bump
    )]
    pub price_feed: Account<'info, PriceFeed>,

    pub asset_mint: Account<'info, Mint>,

    #[account(
        seeds = [ROLES_SEED.as_bytes(), keeper.key().as_ref()],
        bump = roles.bump,
        constraint = roles.is_price_keeper
    )]
    pub roles: Account<'info, AccountRoles>,

    #[account(mut)]
    pub keeper: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_set_price(ctx: Context<SetPrice>, price: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let feed = &mut ctx.accounts.price_feed;
    if feed.asset == Pubkey::default() {
        feed.init(ctx.accounts.asset_mint.key(), ctx.bumps.price_feed);
    }
    feed.set_price(price, now)?;

    emit!(PriceUpdatedEvent {
        asset: feed.asset,
        price,
        timestamp: now,
    });

    Ok(())
}
