//! Leaderboard rules on top of a [`ScoreStore`]: wallet validation,
//! score verification, and the admin-only reset.

use tracing::{info, warn};

use crate::error::{LeaderboardError, LeaderboardResult};
use crate::store::{LeaderboardEntry, ScoreStore};
use crate::wallet::{AcceptAll, ScoreVerifier, WalletAddress};

pub struct Leaderboard<S> {
    store: S,
    verifier: Box<dyn ScoreVerifier>,
    admin: Option<WalletAddress>,
}

impl<S: ScoreStore> Leaderboard<S> {
    /// Leaderboard that trusts every score and refuses every reset.
    pub fn new(store: S) -> Self {
        Self {
            store,
            verifier: Box::new(AcceptAll),
            admin: None,
        }
    }

    pub fn with_verifier(mut self, verifier: impl ScoreVerifier + 'static) -> Self {
        self.verifier = Box::new(verifier);
        self
    }

    pub fn with_admin(mut self, admin: Option<WalletAddress>) -> Self {
        self.admin = admin;
        self
    }

    /// Validate and record a score. Returns whether the wallet's best changed.
    pub fn submit(&mut self, wallet: &str, score: u32) -> LeaderboardResult<bool> {
        let wallet = WalletAddress::parse(wallet)?;
        if !self.verifier.verify(&wallet, score) {
            warn!(wallet = %wallet, score, "score rejected by verifier");
            return Err(LeaderboardError::VerificationFailed {
                wallet: wallet.to_string(),
                score,
            });
        }

        let updated = self.store.submit(&wallet, score)?;
        info!(wallet = %wallet.short(), score, updated, "score submitted");
        Ok(updated)
    }

    pub fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        self.store.top(limit)
    }

    /// Clear every score; only the configured admin wallet may do this.
    pub fn reset(&mut self, requester: &str) -> LeaderboardResult<()> {
        let requester = WalletAddress::parse(requester)?;
        if self.admin.as_ref() != Some(&requester) {
            warn!(wallet = %requester.short(), "reset refused");
            return Err(LeaderboardError::Forbidden(requester.to_string()));
        }
        self.store.reset()?;
        info!(wallet = %requester.short(), "leaderboard reset");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
