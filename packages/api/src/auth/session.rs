//! Client session: the bearer token plus the teardown bookkeeping.
//!
//! Each login starts a new *generation*. Requests capture the generation they
//! were sent under (a [`Ticket`]); when one of them comes back 401/403 the session
//! is ended only if that generation is still current. Any number of concurrent
//! failures therefore tear the session down exactly once.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Why and under which generation a session was torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Teardown {
    pub generation: u64,
    pub status: u16,
}

/// The token and generation a request was dispatched under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub token: Option<String>,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    generation: u64,
}

type Listener = Rc<dyn Fn(Teardown)>;

/// Shared handle to the current session. Clones observe the same state.
#[derive(Clone, Default)]
pub struct Session {
    state: Rc<RefCell<SessionState>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Session")
            .field("active", &state.token.is_some())
            .field("generation", &state.generation)
            .finish()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session with a freshly issued token.
    pub fn begin(&self, token: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        state.token = Some(token.into());
        state.generation += 1;
    }

    /// Swap in a re-issued token for the same login (e.g. after a profile update).
    pub fn replace_token(&self, token: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        if state.token.is_some() {
            state.token = Some(token.into());
        }
    }

    /// Voluntary logout. Listeners are not notified.
    pub fn end(&self) {
        let mut state = self.state.borrow_mut();
        state.token = None;
        state.generation += 1;
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().token.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    pub fn ticket(&self) -> Ticket {
        let state = self.state.borrow();
        Ticket {
            token: state.token.clone(),
            generation: state.generation,
        }
    }

    /// Register a callback run once per forced teardown.
    pub fn on_teardown(&self, listener: impl Fn(Teardown) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// End the session because a request sent under `generation` was rejected.
    ///
    /// Returns `false` when that generation has already been torn down or
    /// replaced by a newer login.
    pub fn expire(&self, generation: u64, status: u16) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.generation != generation {
                return false;
            }
            state.token = None;
            state.generation += 1;
        }

        let teardown = Teardown { generation, status };
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(teardown);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_begin_and_end() {
        let session = Session::new();
        assert!(!session.is_active());
        assert_eq!(session.ticket().token, None);

        session.begin("tok-1");
        assert!(session.is_active());
        assert_eq!(session.token().as_deref(), Some("tok-1"));
        assert_eq!(session.generation(), 1);

        session.end();
        assert!(!session.is_active());
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_expire_is_once_per_generation() {
        let session = Session::new();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        session.on_teardown(move |_| counter.set(counter.get() + 1));

        session.begin("tok");
        let ticket = session.ticket();

        assert!(session.expire(ticket.generation, 401));
        assert!(!session.expire(ticket.generation, 401));
        assert!(!session.expire(ticket.generation, 403));
        assert_eq!(fired.get(), 1);
        assert!(!session.is_active());
    }

    #[test]
    fn test_stale_failure_does_not_end_new_login() {
        let session = Session::new();
        let old = session.ticket();
        session.begin("fresh");

        assert!(!session.expire(old.generation, 401));
        assert_eq!(session.token().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_replace_token_keeps_generation() {
        let session = Session::new();
        session.replace_token("ignored");
        assert!(!session.is_active());

        session.begin("a");
        let generation = session.generation();
        session.replace_token("b");
        assert_eq!(session.token().as_deref(), Some("b"));
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn test_listener_sees_generation_and_status() {
        let session = Session::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        session.on_teardown(move |t| *sink.borrow_mut() = Some(t));

        session.begin("tok");
        session.expire(1, 403);
        assert_eq!(
            *seen.borrow(),
            Some(Teardown {
                generation: 1,
                status: 403
            })
        );
    }
}
