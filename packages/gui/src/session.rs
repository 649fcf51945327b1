//! Account-session flags shared across screens.
//!
//! These used to be the kind of thing that lives in a global. Here they are
//! one value owned by the host and lent to widgets through the GUI context,
//! so whoever changes a flag has to be handed the session to do it.

/// Notification state for the hosted-server UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// News was published that the player hasn't opened yet.
    pub has_unseen_news: bool,
    /// Number of server invitations awaiting a response.
    pub pending_invites: u32,
    /// The player is eligible for a free trial server.
    pub trial_available: bool,
}

impl SessionState {
    pub fn has_pending_invites(&self) -> bool {
        self.pending_invites > 0
    }

    /// Whether the hosted-server button should show an attention badge.
    pub fn needs_attention(&self) -> bool {
        self.has_unseen_news || self.has_pending_invites()
    }

    pub fn mark_news_seen(&mut self) {
        if self.has_unseen_news {
            debug!("news marked seen");
        }
        self.has_unseen_news = false;
    }

    pub fn set_pending_invites(&mut self, n: u32) {
        if n != self.pending_invites {
            debug!(n, "pending invites changed");
        }
        self.pending_invites = n;
    }
}


#[test]
fn test_attention_flags() {
    let mut session = SessionState::default();
    assert!(!session.needs_attention());
    session.set_pending_invites(2);
    assert!(session.needs_attention());
    session.set_pending_invites(0);
    session.has_unseen_news = true;
    assert!(session.needs_attention());
    session.mark_news_seen();
    assert!(!session.needs_attention());
}
