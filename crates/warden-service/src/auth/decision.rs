//! Access decisions over a set of voters.
//!
//! The manager asks its voters about a token, a list of attributes and an
//! optional subject, and folds their votes into one boolean according to its
//! [`DecisionStrategy`]. Decisions are pure: the manager holds no per-call state.

use std::any::Any;
use std::sync::Arc;

use warden_core::{DecisionStrategy, config::AccessDecisionConfig};

use super::{
    token::Token,
    voter::{Vote, Voter},
};
use crate::error::{ServiceError, ServiceResult};

/// Combines voter outcomes into grant/deny decisions.
pub struct AccessDecisionManager {
    voters: Vec<Arc<dyn Voter>>,
    strategy: DecisionStrategy,
    allow_if_all_abstain: bool,
    allow_if_equal_granted_denied: bool,
}

impl AccessDecisionManager {
    /// ## Summary
    /// Create a manager with explicit tie-break flags.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if `voters` is empty.
    pub fn new(
        voters: Vec<Arc<dyn Voter>>,
        strategy: DecisionStrategy,
        allow_if_all_abstain: bool,
        allow_if_equal_granted_denied: bool,
    ) -> ServiceResult<Self> {
        ensure_voters(&voters)?;

        tracing::debug!(
            strategy = %strategy,
            voter_count = voters.len(),
            allow_if_all_abstain,
            allow_if_equal_granted_denied,
            "Access decision manager created"
        );

        Ok(Self {
            voters,
            strategy,
            allow_if_all_abstain,
            allow_if_equal_granted_denied,
        })
    }

    /// ## Summary
    /// Create a manager from a strategy name such as `"consensus"`.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if `voters` is empty, or a core error
    /// if the strategy name is not supported.
    pub fn with_strategy_name(
        voters: Vec<Arc<dyn Voter>>,
        strategy: &str,
        allow_if_all_abstain: bool,
        allow_if_equal_granted_denied: bool,
    ) -> ServiceResult<Self> {
        let strategy = strategy.parse::<DecisionStrategy>()?;
        Self::new(
            voters,
            strategy,
            allow_if_all_abstain,
            allow_if_equal_granted_denied,
        )
    }

    /// ## Summary
    /// Create a manager from the `access_decision_manager` settings.
    ///
    /// ## Errors
    /// See [`Self::with_strategy_name`].
    pub fn from_config(
        voters: Vec<Arc<dyn Voter>>,
        config: &AccessDecisionConfig,
    ) -> ServiceResult<Self> {
        Self::with_strategy_name(
            voters,
            &config.strategy,
            config.allow_if_all_abstain,
            config.allow_if_equal_granted_denied,
        )
    }

    /// ## Summary
    /// Replace the voters.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if `voters` is empty; the current voters are kept.
    pub fn set_voters(&mut self, voters: Vec<Arc<dyn Voter>>) -> ServiceResult<()> {
        ensure_voters(&voters)?;
        self.voters = voters;
        Ok(())
    }

    #[must_use]
    pub const fn strategy(&self) -> DecisionStrategy {
        self.strategy
    }

    #[must_use]
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Decide whether `token` may access `subject` with all of `attributes`.
    #[must_use]
    pub fn decide(&self, token: &Token, attributes: &[&str], subject: Option<&dyn Any>) -> bool {
        let decision = match self.strategy {
            DecisionStrategy::Affirmative => self.decide_affirmative(token, attributes, subject),
            DecisionStrategy::Consensus => self.decide_consensus(token, attributes, subject),
            DecisionStrategy::Unanimous => self.decide_unanimous(token, attributes, subject),
            DecisionStrategy::Priority => self.decide_priority(token, attributes, subject),
        };

        tracing::debug!(
            strategy = %self.strategy,
            user = %token.user_identifier(),
            attributes = ?attributes,
            granted = decision,
            "Access decision"
        );

        decision
    }

    fn vote(
        voter: &dyn Voter,
        token: &Token,
        subject: Option<&dyn Any>,
        attributes: &[&str],
    ) -> Vote {
        let vote = voter.vote(token, subject, attributes);
        tracing::trace!(
            voter = voter.name(),
            attributes = ?attributes,
            vote = %vote,
            "Voter result"
        );
        vote
    }

    /// First grant wins; any denial denies; otherwise the all-abstain fallback.
    fn decide_affirmative(
        &self,
        token: &Token,
        attributes: &[&str],
        subject: Option<&dyn Any>,
    ) -> bool {
        let mut deny = 0_usize;

        for voter in &self.voters {
            match Self::vote(voter.as_ref(), token, subject, attributes) {
                Vote::Granted => return true,
                Vote::Denied => deny += 1,
                Vote::Abstain => {}
            }
        }

        if deny > 0 {
            return false;
        }

        self.allow_if_all_abstain
    }

    /// Majority of non-abstaining voters; ties use `allow_if_equal_granted_denied`.
    fn decide_consensus(
        &self,
        token: &Token,
        attributes: &[&str],
        subject: Option<&dyn Any>,
    ) -> bool {
        let mut grant = 0_usize;
        let mut deny = 0_usize;

        for voter in &self.voters {
            match Self::vote(voter.as_ref(), token, subject, attributes) {
                Vote::Granted => grant += 1,
                Vote::Denied => deny += 1,
                Vote::Abstain => {}
            }
        }

        if grant > deny {
            return true;
        }
        if deny > grant {
            return false;
        }
        if grant > 0 {
            return self.allow_if_equal_granted_denied;
        }

        self.allow_if_all_abstain
    }

    /// Every voter is asked about each attribute on its own; one denial denies.
    fn decide_unanimous(
        &self,
        token: &Token,
        attributes: &[&str],
        subject: Option<&dyn Any>,
    ) -> bool {
        let mut grant = 0_usize;

        for voter in &self.voters {
            for attribute in attributes {
                match Self::vote(voter.as_ref(), token, subject, &[*attribute]) {
                    Vote::Granted => grant += 1,
                    Vote::Denied => return false,
                    Vote::Abstain => {}
                }
            }
        }

        if grant > 0 {
            return true;
        }

        self.allow_if_all_abstain
    }

    /// The first voter with an opinion decides.
    fn decide_priority(
        &self,
        token: &Token,
        attributes: &[&str],
        subject: Option<&dyn Any>,
    ) -> bool {
        for voter in &self.voters {
            match Self::vote(voter.as_ref(), token, subject, attributes) {
                Vote::Granted => return true,
                Vote::Denied => return false,
                Vote::Abstain => {}
            }
        }

        self.allow_if_all_abstain
    }
}

fn ensure_voters(voters: &[Arc<dyn Voter>]) -> ServiceResult<()> {
    if voters.is_empty() {
        return Err(ServiceError::InvalidConfiguration(
            "You must at least add one voter.".to_string(),
        ));
    }
    Ok(())
}

impl std::fmt::Debug for AccessDecisionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessDecisionManager")
            .field(
                "voters",
                &self.voters.iter().map(|v| v.name()).collect::<Vec<_>>(),
            )
            .field("strategy", &self.strategy)
            .field("allow_if_all_abstain", &self.allow_if_all_abstain)
            .field(
                "allow_if_equal_granted_denied",
                &self.allow_if_equal_granted_denied,
            )
            .finish()
    }
}
