use anchor_lang::prelude::*;

#[account]
#[derive(Default, Debug, InitSpace)]
pub struct RolesAdmin {
    pub account: Pubkey,
    pub bump: u8,
}

#[account]
#[derive(Default, Debug, InitSpace)]
pub struct AccountRoles {
    pub account: Pubkey,
    pub is_registry_admin: bool,
    pub is_do_hard_worker: bool,
    pub is_price_keeper: bool,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub enum Role {
    RegistryAdmin,
    DoHardWorker,
    PriceKeeper,
}

impl AccountRoles {
    pub fn set_role(&mut self, role: Role) {
        match role {
            Role::RegistryAdmin => self.is_registry_admin = true,
            Role::DoHardWorker => self.is_do_hard_worker = true,
            Role::PriceKeeper => self.is_price_keeper = true,
        }
    }

    pub fn drop_role(&mut self, role: Role) {
        match role {
            Role::RegistryAdmin => self.is_registry_admin = false,
            Role::DoHardWorker => self.is_do_hard_worker = false,
            Role::PriceKeeper => self.is_price_keeper = false,
        }
    }
}
