//! Computer lifecycle status derivation.
//!
//! Status follows assignment state: a set current-user back-reference means
//! `Issued`, no open assignment means `Inventory`, and anything else leaves
//! the administrator-set value (`InRepair`, `Faulty`) untouched. The
//! reconciler is called explicitly from every write path that touches a
//! computer, its assignments or its repair history, inside the same
//! transaction as the triggering write.

use sqlx::{Postgres, Transaction};

use crate::{
    error::AppResult,
    models::computer::ComputerStatus,
    repository::Repository,
};

/// Compute a computer's lifecycle status from its related state.
///
/// Idempotent: feeding a derived status back in with unchanged inputs
/// returns the same status.
pub fn derive_status(
    current: ComputerStatus,
    has_current_user: bool,
    has_open_assignment: bool,
) -> ComputerStatus {
    if has_current_user {
        ComputerStatus::Issued
    } else if !has_open_assignment {
        ComputerStatus::Inventory
    } else {
        // Open assignment without a back-reference: leave manually set
        // repair/fault statuses alone.
        current
    }
}

/// Recompute and re-persist a computer's status inside the caller's
/// transaction. The row is always written, even when unchanged, so
/// downstream watchers observe a consistent value.
pub async fn reconcile_computer(
    repository: &Repository,
    tx: &mut Transaction<'_, Postgres>,
    computer_id: i32,
) -> AppResult<ComputerStatus> {
    let computer = repository.computers.get_for_update(tx, computer_id).await?;
    let has_open = repository
        .assignments
        .open_exists_for_computer(tx, computer_id)
        .await?;

    let status = derive_status(computer.status, computer.current_user_id.is_some(), has_open);

    repository
        .computers
        .set_status(tx, computer_id, status)
        .await?;

    if status != computer.status {
        tracing::debug!(
            computer_id,
            from = %computer.status,
            to = %status,
            "computer status reconciled"
        );
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::computer::ComputerStatus::*;

    #[test]
    fn current_user_means_issued() {
        assert_eq!(derive_status(Inventory, true, true), Issued);
        assert_eq!(derive_status(Faulty, true, false), Issued);
        assert_eq!(derive_status(InRepair, true, true), Issued);
    }

    #[test]
    fn no_user_and_no_open_assignment_means_inventory() {
        assert_eq!(derive_status(Issued, false, false), Inventory);
        assert_eq!(derive_status(InRepair, false, false), Inventory);
        assert_eq!(derive_status(Faulty, false, false), Inventory);
    }

    #[test]
    fn open_assignment_without_user_preserves_manual_status() {
        assert_eq!(derive_status(InRepair, false, true), InRepair);
        assert_eq!(derive_status(Faulty, false, true), Faulty);
        assert_eq!(derive_status(Issued, false, true), Issued);
    }

    #[test]
    fn derivation_is_idempotent() {
        for current in [Issued, InRepair, Inventory, Faulty] {
            for has_user in [true, false] {
                for has_open in [true, false] {
                    let once = derive_status(current, has_user, has_open);
                    let twice = derive_status(once, has_user, has_open);
                    assert_eq!(once, twice);
                }
            }
        }
    }

    #[test]
    fn issued_and_inventory_are_mutually_exclusive() {
        // status == Issued iff a current user is set; Inventory iff neither
        // a user nor an open assignment exists.
        for current in [Issued, InRepair, Inventory, Faulty] {
            for has_open in [true, false] {
                assert_eq!(derive_status(current, true, has_open), Issued);
            }
            assert_eq!(derive_status(current, false, false), Inventory);
        }
    }
}
