use std::{collections::HashMap, fmt::Debug};

use zerotoken_key::{JwsAlgorithm, Verifier};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A set of verifiers keyed by the algorithm they check.
///
/// Lets a receiver verify tokens without knowing up front which algorithm signed them: the
/// verifier is picked from the `alg` in the token's header.
#[derive(Default)]
pub struct VerifierSet {
    verifiers: HashMap<JwsAlgorithm, Box<dyn Verifier + Send + Sync>>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl VerifierSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `verifier` for `alg`, replacing any verifier already registered for it.
    pub fn insert(
        &mut self,
        alg: JwsAlgorithm,
        verifier: impl Verifier + Send + Sync + 'static,
    ) -> &mut Self {
        self.verifiers.insert(alg, Box::new(verifier));
        self
    }

    /// Returns the verifier registered for `alg`.
    pub fn get(&self, alg: JwsAlgorithm) -> Option<&(dyn Verifier + Send + Sync)> {
        self.verifiers.get(&alg).map(|verifier| verifier.as_ref())
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Debug for VerifierSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.verifiers.keys()).finish()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
