use anchor_lang::prelude::*;
use crate::config::VAULT_SEED;

pub fn get_vault_public_key(owner: &Pubkey, program_id: &Pubkey) -> Pubkey {
    let seeds = [
        VAULT_SEED,
        owner.as_ref(),
    ];

    let (vault_pda, _bump) = Pubkey::find_program_address(
        &seeds,
        program_id
    );

    vault_pda
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_pda_matches_program_derivation() {
        let owner = Pubkey::new_unique();
        let (expected, _bump) =
            Pubkey::find_program_address(&[b"vault", owner.as_ref()], &crate::ID);

        assert_eq!(get_vault_public_key(&owner, &crate::ID), expected);
    }

    #[test]
    fn test_vault_pda_differs_per_owner_and_program() {
        let owner_a = Pubkey::new_unique();
        let owner_b = Pubkey::new_unique();
        let other_program = Pubkey::new_unique();

        let vault_a = get_vault_public_key(&owner_a, &crate::ID);
        assert_ne!(vault_a, get_vault_public_key(&owner_b, &crate::ID));
        assert_ne!(vault_a, get_vault_public_key(&owner_a, &other_program));
    }
}
