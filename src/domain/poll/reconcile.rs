//! Choice-list reconciliation.
//!
//! Updating a question submits a replacement list of choice entries. Each
//! entry either updates an existing choice (matched by id) or creates a new
//! one; existing choices matched by no entry are deleted. The diff is
//! computed here as a pure function; a store adapter applies the resulting
//! change-set as one logical transaction.

use std::collections::{HashMap, HashSet};

use crate::domain::foundation::{ChoiceId, DomainError};

use super::choice::Choice;

/// A single submitted choice entry.
///
/// `id` binds the entry to an existing choice of the same question; a
/// missing id, or an id matching none of the question's choices, makes the
/// entry a creation. A missing `text` on a matched entry keeps the stored
/// text unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceSpec {
    pub id: Option<ChoiceId>,
    pub text: Option<String>,
}

/// The choices field of an update request.
///
/// A request that omits the field leaves stored choices untouched; a
/// request that provides it, even as an empty list, replaces the stored set
/// via reconciliation. The two cases are distinct on the wire and must stay
/// distinct here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceSubmission {
    Omitted,
    Replace(Vec<ChoiceSpec>),
}

/// Store operations produced by one reconciliation pass.
///
/// `updates` and `creates` preserve submission order; `deletes` holds the
/// stored ids matched by no submitted entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceChangeSet {
    pub updates: Vec<(ChoiceId, String)>,
    pub creates: Vec<String>,
    pub deletes: Vec<ChoiceId>,
}

impl ChoiceChangeSet {
    /// True when applying the change-set would not touch the store.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.creates.is_empty() && self.deletes.is_empty()
    }
}

/// Diffs submitted choice entries against a question's stored choices.
///
/// Entries are processed in submission order. An entry whose id matches a
/// stored choice updates that choice in place (the last write wins when one
/// id appears twice) and retains it; every other entry creates a new choice.
/// Stored choices retained by no entry end up in `deletes`. Duplicate texts
/// are permitted; ids are only ever matched against this question's own
/// choices, never validated globally.
///
/// # Errors
///
/// - `ValidationFailed` if an entry would create a choice without text, or
///   any provided text fails choice validation
pub fn reconcile_choices(
    existing: &[Choice],
    submitted: &[ChoiceSpec],
) -> Result<ChoiceChangeSet, DomainError> {
    let by_id: HashMap<ChoiceId, &Choice> = existing.iter().map(|c| (c.id(), c)).collect();
    let mut retained: HashSet<ChoiceId> = HashSet::new();
    let mut changes = ChoiceChangeSet::default();

    for spec in submitted {
        if let Some(text) = &spec.text {
            Choice::validate_text(text)?;
        }

        match spec.id.filter(|id| by_id.contains_key(id)) {
            Some(id) => {
                if let Some(text) = &spec.text {
                    changes.updates.push((id, text.clone()));
                }
                retained.insert(id);
            }
            None => {
                let text = spec.text.clone().ok_or_else(|| {
                    DomainError::validation("Choice text is required to create a choice")
                })?;
                changes.creates.push(text);
            }
        }
    }

    changes.deletes = existing
        .iter()
        .map(|c| c.id())
        .filter(|id| !retained.contains(id))
        .collect();

    Ok(changes)
}
