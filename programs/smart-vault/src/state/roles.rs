use anchor_lang::prelude::*;

/// Singleton holding the authority allowed to grant and revoke roles.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct RolesAdmin {
    pub account: Pubkey,
    pub bump: u8,
}

/// Per-account role flags for the vault program.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct AccountRoles {
    pub account: Pubkey,
    pub is_vaults_admin: bool,
    pub is_reallocator: bool,
    pub is_guard_manager: bool,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    VaultsAdmin,
    Reallocator,
    GuardManager,
}

impl AccountRoles {
    pub fn set_role(&mut self, role: Role) {
        match role {
            Role::VaultsAdmin => self.is_vaults_admin = true,
            Role::Reallocator => self.is_reallocator = true,
            Role::GuardManager => self.is_guard_manager = true,
        }
    }

    pub fn drop_role(&mut self, role: Role) {
        match role {
            Role::VaultsAdmin => self.is_vaults_admin = false,
            Role::Reallocator => self.is_reallocator = false,
            Role::GuardManager => self.is_guard_manager = false,
        }
    }
}
