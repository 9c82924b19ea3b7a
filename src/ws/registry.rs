use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::models::{Collaborator, ServerMessage};

/// Send capability handed to the registry at join time. The registry never
/// owns the underlying socket; pushing onto this channel is fire-and-forget.
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

#[derive(Debug)]
struct Participant {
    user_name: String,
    cursor_position: Option<u64>,
    outbox: Outbox,
}

#[derive(Debug, Default)]
struct Session {
    participants: HashMap<String, Participant>,
}

impl Session {
    /// Deliver an event to every participant except `skip`. Returns the ids
    /// of participants whose channel is closed.
    fn broadcast(&self, skip: &str, event: &ServerMessage) -> Vec<String> {
        let mut dead = Vec::new();
        for (user_id, participant) in &self.participants {
            if user_id == skip {
                continue;
            }
            if participant.outbox.send(event.clone()).is_err() {
                dead.push(user_id.clone());
            }
        }
        dead
    }
}

/// Authoritative in-memory table of live collaboration sessions, keyed by
/// document id. All state here is transient: nothing survives a restart,
/// clients simply reconnect and rejoin.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        // Lock poisoning only matters if a holder panicked mid-mutation;
        // the table stays usable either way.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register `user_id` on `document_id`, delivering the current roster
    /// (everyone except the caller) through the caller's own outbox and
    /// notifying the rest of the session.
    ///
    /// Rejoining while already present replaces the stored entry without
    /// duplicating it; the join notice is suppressed in that case because
    /// the other participants already have the user in their roster.
    pub fn join(&self, document_id: &str, user_id: &str, user_name: &str, outbox: Outbox) {
        let mut sessions = self.sessions();
        let session = sessions.entry(document_id.to_string()).or_default();

        let roster: Vec<Collaborator> = session
            .participants
            .iter()
            .filter(|(id, _)| id.as_str() != user_id)
            .map(|(id, p)| Collaborator {
                user_id: id.clone(),
                user_name: p.user_name.clone(),
                cursor_position: p.cursor_position,
            })
            .collect();
        let _ = outbox.send(ServerMessage::CurrentCollaborators {
            collaborators: roster,
        });

        let replaced = session
            .participants
            .insert(
                user_id.to_string(),
                Participant {
                    user_name: user_name.to_string(),
                    cursor_position: None,
                    outbox,
                },
            )
            .is_some();

        info!(
            "{} joined document {} ({} participant(s){})",
            user_id,
            document_id,
            session.participants.len(),
            if replaced { ", replaced prior connection" } else { "" },
        );

        if !replaced {
            let notice = ServerMessage::UserJoined {
                user_id: user_id.to_string(),
                user_name: user_name.to_string(),
            };
            let dead = session.broadcast(user_id, &notice);
            Self::prune(&mut sessions, document_id, dead);
        }
    }

    /// Remove `user_id` from `document_id` and notify the remainder.
    ///
    /// The entry is only removed when `outbox` is the same channel that was
    /// registered for it, so the deferred close of a connection that was
    /// already replaced by a rejoin cannot evict its replacement. Leaving a
    /// session or user that is not present is a no-op.
    pub fn leave(&self, document_id: &str, user_id: &str, outbox: &Outbox) {
        let mut sessions = self.sessions();
        let Some(session) = sessions.get_mut(document_id) else {
            return;
        };
        let current = session
            .participants
            .get(user_id)
            .is_some_and(|p| p.outbox.same_channel(outbox));
        if !current {
            return;
        }
        let removed = session
            .participants
            .remove(user_id)
            .map(|p| p.user_name)
            .unwrap_or_default();

        info!(
            "{} left document {} ({} participant(s) remain)",
            user_id,
            document_id,
            session.participants.len()
        );

        let notice = ServerMessage::UserLeft {
            user_id: user_id.to_string(),
            user_name: removed,
        };
        let dead = session.broadcast(user_id, &notice);
        Self::prune(&mut sessions, document_id, dead);
        if sessions
            .get(document_id)
            .is_some_and(|s| s.participants.is_empty())
        {
            sessions.remove(document_id);
            debug!("Session for document {} dropped (empty)", document_id);
        }
    }

    /// Record a participant's cursor position and relay it to everyone else
    /// in the session. Silently ignored if the participant is not joined;
    /// disconnect races are expected and benign. The position is an opaque
    /// offset, not validated here.
    pub fn update_cursor(&self, document_id: &str, user_id: &str, position: u64) {
        let mut sessions = self.sessions();
        let Some(session) = sessions.get_mut(document_id) else {
            return;
        };
        let Some(participant) = session.participants.get_mut(user_id) else {
            return;
        };
        participant.cursor_position = Some(position);
        let notice = ServerMessage::CursorMoved {
            user_id: user_id.to_string(),
            user_name: participant.user_name.clone(),
            position,
        };
        let dead = session.broadcast(user_id, &notice);
        Self::prune(&mut sessions, document_id, dead);
    }

    /// Relay a content change to every other participant, tagged with the
    /// originating user. The registry stores and diffs nothing; the
    /// authoritative content lives in storage, written via the REST API.
    pub fn broadcast_content_change(
        &self,
        document_id: &str,
        user_id: &str,
        content: &str,
        word_count: u32,
    ) {
        let mut sessions = self.sessions();
        let Some(session) = sessions.get_mut(document_id) else {
            return;
        };
        let Some(participant) = session.participants.get(user_id) else {
            return;
        };
        let notice = ServerMessage::ContentUpdated {
            user_id: user_id.to_string(),
            user_name: participant.user_name.clone(),
            content: content.to_string(),
            word_count,
        };
        let dead = session.broadcast(user_id, &notice);
        Self::prune(&mut sessions, document_id, dead);
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions().len()
    }

    /// Number of participants across all sessions.
    pub fn participant_count(&self) -> usize {
        self.sessions().values().map(|s| s.participants.len()).sum()
    }

    /// Drop participants whose channel turned out to be closed during a
    /// broadcast and tell the survivors they left. A closed channel means
    /// the peer's connection task is gone, so its own leave will never fire
    /// for the entry we still hold.
    fn prune(sessions: &mut HashMap<String, Session>, document_id: &str, mut dead: Vec<String>) {
        while !dead.is_empty() {
            let Some(session) = sessions.get_mut(document_id) else {
                return;
            };
            let mut next = Vec::new();
            for user_id in dead {
                let Some(removed) = session.participants.remove(&user_id) else {
                    continue;
                };
                debug!(
                    "Pruned unreachable participant {} from document {}",
                    user_id, document_id
                );
                let notice = ServerMessage::UserLeft {
                    user_id,
                    user_name: removed.user_name,
                };
                next.extend(session.broadcast("", &notice));
            }
            dead = next;
        }
        if sessions
            .get(document_id)
            .is_some_and(|s| s.participants.is_empty())
        {
            sessions.remove(document_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn join(
        registry: &SessionRegistry,
        doc: &str,
        user: &str,
        name: &str,
    ) -> (Outbox, UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        registry.join(doc, user, name, tx.clone());
        (tx, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    fn roster_ids(msg: &ServerMessage) -> Vec<String> {
        match msg {
            ServerMessage::CurrentCollaborators { collaborators } => {
                let mut ids: Vec<String> =
                    collaborators.iter().map(|c| c.user_id.clone()).collect();
                ids.sort();
                ids
            }
            other => panic!("expected current_collaborators, got {:?}", other),
        }
    }

    #[test]
    fn roster_excludes_caller_and_tracks_membership() {
        let registry = SessionRegistry::new();
        let (_a_tx, mut a_rx) = join(&registry, "doc-1", "a", "Alice");
        assert_eq!(roster_ids(&a_rx.try_recv().unwrap()), Vec::<String>::new());

        let (b_tx, mut b_rx) = join(&registry, "doc-1", "b", "Bob");
        assert_eq!(roster_ids(&b_rx.try_recv().unwrap()), vec!["a"]);

        registry.leave("doc-1", "b", &b_tx);
        let (_c_tx, mut c_rx) = join(&registry, "doc-1", "c", "Cara");
        assert_eq!(roster_ids(&c_rx.try_recv().unwrap()), vec!["a"]);
    }

    #[test]
    fn rejoin_replaces_without_duplicating() {
        let registry = SessionRegistry::new();
        let (_a1_tx, _a1_rx) = join(&registry, "doc-1", "a", "Alice");
        let (_a2_tx, mut a2_rx) = join(&registry, "doc-1", "a", "Alice");
        // The rejoining connection sees a roster without itself.
        assert_eq!(roster_ids(&a2_rx.try_recv().unwrap()), Vec::<String>::new());

        let (_b_tx, mut b_rx) = join(&registry, "doc-1", "b", "Bob");
        assert_eq!(roster_ids(&b_rx.try_recv().unwrap()), vec!["a"]);
        assert_eq!(registry.participant_count(), 2);
    }

    #[test]
    fn rejoin_suppresses_join_notice_to_peers() {
        let registry = SessionRegistry::new();
        let (_a_tx, mut a_rx) = join(&registry, "doc-1", "a", "Alice");
        let (_b1_tx, _b1_rx) = join(&registry, "doc-1", "b", "Bob");
        drain(&mut a_rx);

        let (_b2_tx, _b2_rx) = join(&registry, "doc-1", "b", "Bob");
        assert!(drain(&mut a_rx).is_empty());
    }

    #[test]
    fn stale_connection_cannot_evict_replacement() {
        let registry = SessionRegistry::new();
        let (a1_tx, _a1_rx) = join(&registry, "doc-1", "a", "Alice");
        let (_a2_tx, _a2_rx) = join(&registry, "doc-1", "a", "Alice");

        // The replaced connection closes late; its leave must be a no-op.
        registry.leave("doc-1", "a", &a1_tx);
        assert_eq!(registry.participant_count(), 1);
    }

    #[test]
    fn leave_of_absent_user_is_a_silent_noop() {
        let registry = SessionRegistry::new();
        let (_a_tx, mut a_rx) = join(&registry, "doc-1", "a", "Alice");
        drain(&mut a_rx);

        let (ghost_tx, _ghost_rx) = mpsc::unbounded_channel();
        registry.leave("doc-1", "nobody", &ghost_tx);
        registry.leave("doc-404", "a", &ghost_tx);
        assert!(drain(&mut a_rx).is_empty());
        assert_eq!(registry.participant_count(), 1);
    }

    #[test]
    fn cursor_update_relays_to_others_never_to_sender() {
        let registry = SessionRegistry::new();
        let (_a_tx, mut a_rx) = join(&registry, "doc-1", "a", "Alice");
        let (_b_tx, mut b_rx) = join(&registry, "doc-1", "b", "Bob");
        drain(&mut a_rx);
        drain(&mut b_rx);

        registry.update_cursor("doc-1", "b", 42);
        assert_eq!(
            drain(&mut a_rx),
            vec![ServerMessage::CursorMoved {
                user_id: "b".into(),
                user_name: "Bob".into(),
                position: 42,
            }]
        );
        assert!(drain(&mut b_rx).is_empty());
    }

    #[test]
    fn cursor_update_for_unjoined_user_is_ignored() {
        let registry = SessionRegistry::new();
        let (_a_tx, mut a_rx) = join(&registry, "doc-1", "a", "Alice");
        drain(&mut a_rx);

        registry.update_cursor("doc-1", "nobody", 7);
        registry.update_cursor("doc-404", "a", 7);
        assert!(drain(&mut a_rx).is_empty());
    }

    #[test]
    fn cursor_position_shows_up_in_later_rosters() {
        let registry = SessionRegistry::new();
        let (_a_tx, _a_rx) = join(&registry, "doc-1", "a", "Alice");
        registry.update_cursor("doc-1", "a", 13);

        let (_b_tx, mut b_rx) = join(&registry, "doc-1", "b", "Bob");
        match b_rx.try_recv().unwrap() {
            ServerMessage::CurrentCollaborators { collaborators } => {
                assert_eq!(collaborators.len(), 1);
                assert_eq!(collaborators[0].cursor_position, Some(13));
            }
            other => panic!("expected current_collaborators, got {:?}", other),
        }
    }

    #[test]
    fn content_change_reaches_every_other_participant() {
        let registry = SessionRegistry::new();
        let (_a_tx, mut a_rx) = join(&registry, "doc-1", "a", "Alice");
        let (_b_tx, mut b_rx) = join(&registry, "doc-1", "b", "Bob");
        let (_c_tx, mut c_rx) = join(&registry, "doc-1", "c", "Cara");
        drain(&mut a_rx);
        drain(&mut b_rx);
        drain(&mut c_rx);

        registry.broadcast_content_change("doc-1", "b", "Once upon a time", 4);
        let expected = ServerMessage::ContentUpdated {
            user_id: "b".into(),
            user_name: "Bob".into(),
            content: "Once upon a time".into(),
            word_count: 4,
        };
        assert_eq!(drain(&mut a_rx), vec![expected.clone()]);
        assert_eq!(drain(&mut c_rx), vec![expected]);
        assert!(drain(&mut b_rx).is_empty());
    }

    #[test]
    fn content_change_does_not_cross_documents() {
        let registry = SessionRegistry::new();
        let (_a_tx, mut a_rx) = join(&registry, "doc-1", "a", "Alice");
        let (_b_tx, mut b_rx) = join(&registry, "doc-2", "b", "Bob");
        drain(&mut a_rx);
        drain(&mut b_rx);

        registry.broadcast_content_change("doc-1", "a", "draft", 1);
        assert!(drain(&mut b_rx).is_empty());
    }

    #[test]
    fn emptied_session_leaves_no_ghosts() {
        let registry = SessionRegistry::new();
        let (a_tx, _a_rx) = join(&registry, "doc-1", "a", "Alice");
        let (b_tx, _b_rx) = join(&registry, "doc-1", "b", "Bob");
        registry.leave("doc-1", "a", &a_tx);
        registry.leave("doc-1", "b", &b_tx);
        assert_eq!(registry.session_count(), 0);

        let (_c_tx, mut c_rx) = join(&registry, "doc-1", "c", "Cara");
        assert_eq!(roster_ids(&c_rx.try_recv().unwrap()), Vec::<String>::new());
    }

    #[test]
    fn unreachable_participant_is_pruned_on_broadcast() {
        let registry = SessionRegistry::new();
        let (_a_tx, mut a_rx) = join(&registry, "doc-1", "a", "Alice");
        let (_b_tx, b_rx) = join(&registry, "doc-1", "b", "Bob");
        drain(&mut a_rx);
        drop(b_rx);

        registry.update_cursor("doc-1", "a", 5);
        assert_eq!(registry.participant_count(), 1);
        // The survivor hears that the unreachable peer left.
        assert_eq!(
            drain(&mut a_rx),
            vec![ServerMessage::UserLeft {
                user_id: "b".into(),
                user_name: "Bob".into(),
            }]
        );
    }

    #[test]
    fn full_two_user_exchange() {
        let registry = SessionRegistry::new();

        let (a_tx, mut a_rx) = join(&registry, "doc-1", "a", "Alice");
        assert_eq!(roster_ids(&a_rx.try_recv().unwrap()), Vec::<String>::new());
        assert!(drain(&mut a_rx).is_empty());

        let (b_tx, mut b_rx) = join(&registry, "doc-1", "b", "Bob");
        assert_eq!(roster_ids(&b_rx.try_recv().unwrap()), vec!["a"]);
        assert_eq!(
            drain(&mut a_rx),
            vec![ServerMessage::UserJoined {
                user_id: "b".into(),
                user_name: "Bob".into(),
            }]
        );

        registry.update_cursor("doc-1", "b", 42);
        assert_eq!(
            drain(&mut a_rx),
            vec![ServerMessage::CursorMoved {
                user_id: "b".into(),
                user_name: "Bob".into(),
                position: 42,
            }]
        );

        registry.leave("doc-1", "a", &a_tx);
        assert_eq!(
            drain(&mut b_rx),
            vec![ServerMessage::UserLeft {
                user_id: "a".into(),
                user_name: "Alice".into(),
            }]
        );

        registry.leave("doc-1", "b", &b_tx);
        assert_eq!(registry.session_count(), 0);
        assert_eq!(registry.participant_count(), 0);
    }
}
