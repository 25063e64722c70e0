//! # Governor Aggregation
//!
//! Pairs router answers with their domains and applies the governor rules.

use crate::domain::{
    invariant_governor_configured, invariant_has_governor, invariant_single_governor, Address,
    Domain, GovernanceError, Governor,
};

/// Pair each domain with the address its router reported.
///
/// `addresses[i]` must be the answer of `domains[i]`. Zero addresses are
/// dropped; the survivors keep the domain order.
pub fn collect_governors(
    domains: &[Domain],
    addresses: &[Address],
) -> Result<Vec<Governor>, GovernanceError> {
    if domains.len() != addresses.len() {
        return Err(GovernanceError::communication(
            domains.first().copied().unwrap_or_default(),
            format!(
                "expected {} router answers, got {}",
                domains.len(),
                addresses.len()
            ),
        ));
    }

    let governors: Vec<Governor> = domains
        .iter()
        .zip(addresses)
        .filter(|(_, address)| invariant_governor_configured(address))
        .map(|(domain, address)| Governor::new(*domain, *address))
        .collect();

    invariant_has_governor(&governors)?;
    Ok(governors)
}

/// The only governor of a single-governor deployment.
pub fn single_governor(governors: Vec<Governor>) -> Result<Governor, GovernanceError> {
    invariant_single_governor(&governors)?;
    governors
        .into_iter()
        .next()
        .ok_or(GovernanceError::NoGovernors)
}
