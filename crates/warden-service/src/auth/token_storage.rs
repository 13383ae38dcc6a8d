//! Request-scoped storage for the current token.
//!
//! The storage can be given a lazy initializer which is run at most once, on
//! the first read. Storing a token first runs a pending initializer and then
//! overwrites whatever it stored, so a write always wins over the deferred
//! load it races with. Clearing the token discards a pending initializer
//! without running it.

use std::sync::Arc;

use super::token::Token;

type Initializer = Box<dyn FnOnce(&mut TokenStorage)>;

enum InitializerState {
    Unset,
    Pending(Initializer),
    Fired,
}

impl InitializerState {
    const fn name(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Pending(_) => "pending",
            Self::Fired => "fired",
        }
    }
}

/// Holds the token of the current request. Not meant to be shared between requests.
pub struct TokenStorage {
    token: Option<Arc<Token>>,
    initializer: InitializerState,
}

impl TokenStorage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            token: None,
            initializer: InitializerState::Unset,
        }
    }

    /// Returns the current token, running a pending initializer first.
    pub fn token(&mut self) -> Option<Arc<Token>> {
        self.run_initializer();
        self.token.clone()
    }

    /// Stores `token`, replacing the current one.
    ///
    /// A non-empty token triggers a pending initializer before it is stored;
    /// `None` discards the pending initializer instead.
    pub fn set_token(&mut self, token: Option<Arc<Token>>) {
        if token.is_some() {
            self.run_initializer();
        } else if matches!(self.initializer, InitializerState::Pending(_)) {
            tracing::trace!("Discarding pending token initializer");
            self.initializer = InitializerState::Unset;
        }

        tracing::trace!(
            user = token.as_deref().map(Token::user_identifier),
            "Token stored"
        );
        self.token = token;
    }

    /// Registers a deferred token loader, replacing any pending one.
    pub fn set_initializer(&mut self, initializer: impl FnOnce(&mut Self) + 'static) {
        self.initializer = InitializerState::Pending(Box::new(initializer));
    }

    #[must_use]
    pub const fn has_pending_initializer(&self) -> bool {
        matches!(self.initializer, InitializerState::Pending(_))
    }

    /// Clears the token and any pending initializer.
    pub fn reset(&mut self) {
        self.token = None;
        self.initializer = InitializerState::Unset;
    }

    fn run_initializer(&mut self) {
        if !self.has_pending_initializer() {
            return;
        }
        if let InitializerState::Pending(initializer) =
            std::mem::replace(&mut self.initializer, InitializerState::Fired)
        {
            tracing::trace!("Running token initializer");
            initializer(self);
        }
    }
}

impl Default for TokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokenStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStorage")
            .field("token", &self.token)
            .field("initializer", &self.initializer.name())
            .finish()
    }
}
