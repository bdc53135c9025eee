use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// Request classes a guard can allow or deny.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum RequestType {
    Deposit,
    Redeem,
    ClaimVaultTokens,
    ClaimWithdrawal,
}

impl RequestType {
    pub fn mask(&self) -> u8 {
        match self {
            RequestType::Deposit => 1 << 0,
            RequestType::Redeem => 1 << 1,
            RequestType::ClaimVaultTokens => 1 << 2,
            RequestType::ClaimWithdrawal => 1 << 3,
        }
    }
}

/// Per-(vault, account) allow-list entry for guarded vaults. Absence of the
/// account means the caller is not allowed in at all.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct VaultAccess {
    pub vault: Pubkey,
    pub account: Pubkey,
    pub allowed_requests: u8,
    pub bump: u8,
}

impl VaultAccess {
    pub fn allows(&self, request: RequestType) -> bool {
        self.allowed_requests & request.mask() != 0
    }
}

/// Guard check for one request. Unguarded vaults let everything through;
/// guarded vaults require an access entry covering the request class.
pub fn run_guards(
    guarded: bool,
    access: Option<&VaultAccess>,
    request: RequestType,
) -> Result<()> {
    if !guarded {
        return Ok(());
    }

    match access {
        Some(access) if access.allows(request) => Ok(()),
        _ => Err(ErrorCode::GuardFailed.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unguarded_vaults_skip_the_allow_list() {
        assert!(run_guards(false, None, RequestType::Deposit).is_ok());
    }

    #[test]
    fn guarded_vaults_check_the_request_class() {
        let access = VaultAccess {
            vault: Pubkey::new_unique(),
            account: Pubkey::new_unique(),
            allowed_requests: RequestType::Deposit.mask(),
            bump: 255,
        };

        assert!(run_guards(true, Some(&access), RequestType::Deposit).is_ok());
        assert!(run_guards(true, Some(&access), RequestType::Redeem).is_err());
        assert!(run_guards(true, None, RequestType::Deposit).is_err());
    }

    #[test]
    fn claims_are_their_own_request_classes() {
        let access = VaultAccess {
            vault: Pubkey::new_unique(),
            account: Pubkey::new_unique(),
            allowed_requests: RequestType::ClaimVaultTokens.mask()
                | RequestType::ClaimWithdrawal.mask(),
            bump: 255,
        };

        assert!(run_guards(true, Some(&access), RequestType::ClaimVaultTokens).is_ok());
        assert!(run_guards(true, Some(&access), RequestType::ClaimWithdrawal).is_ok());
        assert!(run_guards(true, Some(&access), RequestType::Deposit).is_err());

        // a deposit-only entry does not cover the claims that follow
        let deposit_only = VaultAccess {
            allowed_requests: RequestType::Deposit.mask(),
            ..access
        };
        assert!(run_guards(true, Some(&deposit_only), RequestType::ClaimVaultTokens).is_err());
    }
}
