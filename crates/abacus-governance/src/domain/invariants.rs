//! # Domain Invariants
//!
//! Rules the governor result must satisfy.

use super::entities::Governor;
use super::errors::GovernanceError;
use super::value_objects::Address;

/// Invariant: a zero address means the domain has no governor.
pub fn invariant_governor_configured(address: &Address) -> bool {
    !address.is_zero()
}

/// Invariant: a deployment has at least one governor.
pub fn invariant_has_governor(governors: &[Governor]) -> Result<(), GovernanceError> {
    if governors.is_empty() {
        return Err(GovernanceError::NoGovernors);
    }
    Ok(())
}

/// Invariant: a single-governor deployment has exactly one non-zero governor.
pub fn invariant_single_governor(governors: &[Governor]) -> Result<(), GovernanceError> {
    invariant_has_governor(governors)?;
    if governors.len() > 1 {
        return Err(GovernanceError::MultipleGovernors {
            count: governors.len(),
        });
    }
    Ok(())
}
