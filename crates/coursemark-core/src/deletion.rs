//! Two-phase course deletion.
//!
//! A delete request yields a [`PendingConfirmation`] token; nothing is
//! deleted until that token is confirmed. Whatever asks the author (a dialog,
//! a prompt, a toast) only has to carry the token back.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{Error, Result};

/// Handed out by [`DeletionProtocol::request_delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingConfirmation {
  pub token:     Uuid,
  pub course_id: Uuid,
}

/// How a pending deletion was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionOutcome {
  Deleted(Uuid),
  Cancelled(Uuid),
}

/// Tracks deletions awaiting confirmation.
#[derive(Debug, Default)]
pub struct DeletionProtocol {
  pending: HashMap<Uuid, Uuid>,
}

impl DeletionProtocol {
  pub fn new() -> Self { Self::default() }

  /// Phase one: ask for confirmation to delete `course_id`.
  pub fn request_delete(&mut self, course_id: Uuid) -> PendingConfirmation {
    let token = Uuid::new_v4();
    self.pending.insert(token, course_id);
    PendingConfirmation { token, course_id }
  }

  /// Phase two: the author agreed. The caller performs the actual delete
  /// against the catalog with the returned id.
  pub fn confirm(&mut self, token: Uuid) -> Result<DeletionOutcome> {
    self
      .pending
      .remove(&token)
      .map(DeletionOutcome::Deleted)
      .ok_or(Error::UnknownConfirmation(token))
  }

  /// Phase two: the author backed out.
  pub fn cancel(&mut self, token: Uuid) -> Result<DeletionOutcome> {
    self
      .pending
      .remove(&token)
      .map(DeletionOutcome::Cancelled)
      .ok_or(Error::UnknownConfirmation(token))
  }

  pub fn is_pending(&self, token: Uuid) -> bool { self.pending.contains_key(&token) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn confirm_resolves_to_deleted() {
    let mut protocol = DeletionProtocol::new();
    let course_id = Uuid::new_v4();
    let pending = protocol.request_delete(course_id);

    assert!(protocol.is_pending(pending.token));
    assert_eq!(
      protocol.confirm(pending.token).unwrap(),
      DeletionOutcome::Deleted(course_id)
    );
    assert!(!protocol.is_pending(pending.token));
  }

  #[test]
  fn cancel_resolves_to_cancelled() {
    let mut protocol = DeletionProtocol::new();
    let course_id = Uuid::new_v4();
    let pending = protocol.request_delete(course_id);
    assert_eq!(
      protocol.cancel(pending.token).unwrap(),
      DeletionOutcome::Cancelled(course_id)
    );
  }

  #[test]
  fn tokens_resolve_once() {
    let mut protocol = DeletionProtocol::new();
    let pending = protocol.request_delete(Uuid::new_v4());
    protocol.cancel(pending.token).unwrap();
    assert!(matches!(
      protocol.confirm(pending.token),
      Err(Error::UnknownConfirmation(t)) if t == pending.token
    ));
  }

  #[test]
  fn requests_are_independent() {
    let mut protocol = DeletionProtocol::new();
    let a = protocol.request_delete(Uuid::new_v4());
    let b = protocol.request_delete(Uuid::new_v4());
    protocol.confirm(a.token).unwrap();
    assert!(protocol.is_pending(b.token));
  }
}
