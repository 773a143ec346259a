//! Snapshot index for one labor resource.
//!
//! Snapshots are stored by id, in append order, with a separate successor lookup.
//! The current member of a chain is the snapshot nobody succeeds, so "where is this
//! employment now" is a map lookup instead of a walk through live references.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::LaborError;
use super::event::EmploymentEvent;
use super::ids::EmploymentEventId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EmploymentEvent>", into = "Vec<EmploymentEvent>")]
pub struct EmploymentChains {
    snapshots: HashMap<EmploymentEventId, EmploymentEvent>,
    order: Vec<EmploymentEventId>,
    successor_of: HashMap<EmploymentEventId, EmploymentEventId>,
}

impl EmploymentChains {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &EmploymentEventId) -> Option<&EmploymentEvent> {
        self.snapshots.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &EmploymentEventId) -> Option<&mut EmploymentEvent> {
        self.snapshots.get_mut(id)
    }

    /// Every snapshot ever recorded, oldest append first.
    pub fn iter(&self) -> impl Iterator<Item = &EmploymentEvent> + '_ {
        self.order.iter().filter_map(|id| self.snapshots.get(id))
    }

    pub fn successor(&self, id: &EmploymentEventId) -> Option<&EmploymentEvent> {
        self.successor_of
            .get(id)
            .and_then(|next| self.snapshots.get(next))
    }

    pub fn is_current(&self, id: &EmploymentEventId) -> bool {
        self.snapshots.contains_key(id) && !self.successor_of.contains_key(id)
    }

    /// The head of every chain.
    pub fn current(&self) -> impl Iterator<Item = &EmploymentEvent> + '_ {
        self.iter().filter(|event| self.is_current(event.id()))
    }

    /// Follow successors from `id` to the head of its chain.
    pub fn current_member_of(&self, id: &EmploymentEventId) -> Option<&EmploymentEvent> {
        let mut cursor = self.snapshots.get(id)?;
        while let Some(next) = self.successor(cursor.id()) {
            cursor = next;
        }
        Some(cursor)
    }

    /// All members of the chain containing `id`, from its first snapshot to its head.
    pub fn chain(&self, id: &EmploymentEventId) -> Vec<&EmploymentEvent> {
        let Some(mut cursor) = self.snapshots.get(id) else {
            return Vec::new();
        };
        while let Some(previous) = cursor
            .original_event_id()
            .and_then(|prev| self.snapshots.get(prev))
        {
            cursor = previous;
        }

        let mut members = vec![cursor];
        while let Some(next) = self.successor(cursor.id()) {
            members.push(next);
            cursor = next;
        }
        members
    }

    /// Append a snapshot. A successor must extend the current head of its chain.
    pub(crate) fn append(&mut self, snapshot: EmploymentEvent) -> Result<(), LaborError> {
        if self.snapshots.contains_key(snapshot.id()) {
            return Err(LaborError::rule(format!(
                "employment event {} is already recorded",
                snapshot.id()
            )));
        }

        if let Some(previous) = snapshot.original_event_id() {
            if !self.snapshots.contains_key(previous) {
                return Err(LaborError::rule(format!(
                    "predecessor {previous} of employment event {} is unknown",
                    snapshot.id()
                )));
            }
            if let Some(existing) = self.successor_of.get(previous) {
                return Err(LaborError::rule(format!(
                    "employment event {previous} is already superseded by {existing}"
                )));
            }
            self.successor_of
                .insert(previous.clone(), snapshot.id().clone());
        }

        self.order.push(snapshot.id().clone());
        self.snapshots.insert(snapshot.id().clone(), snapshot);
        Ok(())
    }
}

impl TryFrom<Vec<EmploymentEvent>> for EmploymentChains {
    type Error = LaborError;

    fn try_from(snapshots: Vec<EmploymentEvent>) -> Result<Self, Self::Error> {
        let mut chains = Self::default();
        for snapshot in snapshots {
            chains.append(snapshot)?;
        }
        Ok(chains)
    }
}

impl From<EmploymentChains> for Vec<EmploymentEvent> {
    fn from(chains: EmploymentChains) -> Self {
        let EmploymentChains {
            mut snapshots,
            order,
            ..
        } = chains;
        order
            .into_iter()
            .filter_map(|id| snapshots.remove(&id))
            .collect()
    }
}
