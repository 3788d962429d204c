//! In-memory roster store.
//!
//! The store never touches storage. Every mutation records which persisted
//! slice it touched; callers drain those with [`RosterStore::drain_changes`]
//! and hand them to the persistence adapter.

use crate::chart::build_series;
use crate::models::{
    ChartSeries, EditState, Features, LimitAlert, RosterConfig, RosterView, TeamMember,
};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Team,
    LateLimit,
    Punishment,
}

#[derive(Debug, Clone)]
pub struct RosterStore {
    features: Features,
    members: Vec<TeamMember>,
    config: RosterConfig,
    pending_name: String,
    editing: Option<EditState>,
    changes: Vec<Change>,
}

impl RosterStore {
    pub fn new(features: Features) -> Self {
        Self::from_parts(features, Vec::new(), RosterConfig::default())
    }

    /// Builds a store from already-loaded state without recording changes.
    pub fn from_parts(features: Features, members: Vec<TeamMember>, config: RosterConfig) -> Self {
        Self {
            features,
            members,
            config,
            pending_name: String::new(),
            editing: None,
            changes: Vec::new(),
        }
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn pending_name(&self) -> &str {
        &self.pending_name
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    pub fn set_pending_name(&mut self, text: impl Into<String>) {
        self.pending_name = text.into();
    }

    /// Adds the member typed into the pending-name buffer.
    pub fn add_pending_member(&mut self) -> Option<u32> {
        let name = self.pending_name.clone();
        self.add_member(&name)
    }

    /// Returns the new member's id, or `None` when the name is blank or no
    /// id above the current maximum is left.
    pub fn add_member(&mut self, name: &str) -> Option<u32> {
        if name.trim().is_empty() {
            return None;
        }

        let Some(id) = self.next_id() else {
            warn!("member ids exhausted, rejecting new member");
            return None;
        };
        self.members.push(TeamMember {
            id,
            name: name.to_string(),
            points: 0,
        });
        self.pending_name.clear();
        self.record(Change::Team);
        Some(id)
    }

    pub fn remove_member(&mut self, id: u32) {
        self.members.retain(|member| member.id != id);
        self.record(Change::Team);
    }

    pub fn begin_edit(&mut self, id: u32) {
        self.editing = self.member(id).map(|member| EditState {
            id,
            name: member.name.clone(),
        });
    }

    pub fn set_editing_name(&mut self, text: impl Into<String>) {
        if let Some(edit) = self.editing.as_mut() {
            edit.name = text.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Renames without validating the new name; blank names are accepted.
    pub fn rename_member(&mut self, id: u32, new_name: &str) {
        if let Some(member) = self.member_mut(id) {
            member.name = new_name.to_string();
        }
        self.editing = None;
        self.record(Change::Team);
    }

    pub fn add_point(&mut self, id: u32) {
        let has_limit = self.features.has_limit;
        let limit = self.config.late_limit;
        if let Some(member) = self.member_mut(id) {
            if !has_limit || i64::from(member.points) < limit {
                member.points = member.points.saturating_add(1);
            }
        }
        self.record(Change::Team);
    }

    pub fn remove_point(&mut self, id: u32) {
        if let Some(member) = self.member_mut(id) {
            member.points = member.points.saturating_sub(1);
        }
        self.record(Change::Team);
    }

    pub fn reset_all_points(&mut self) {
        if !self.features.has_limit {
            return;
        }
        for member in &mut self.members {
            member.points = 0;
        }
        self.record(Change::Team);
    }

    pub fn set_late_limit(&mut self, limit: i64) {
        self.config.late_limit = limit;
        self.record(Change::LateLimit);
    }

    pub fn set_punishment(&mut self, text: impl Into<String>) {
        self.config.punishment = text.into();
        self.record(Change::Punishment);
    }

    pub fn is_over_limit(&self) -> bool {
        self.features.has_limit
            && self
                .members
                .iter()
                .any(|member| i64::from(member.points) >= self.config.late_limit)
    }

    pub fn over_limit_alert(&self) -> Option<LimitAlert> {
        if !self.is_over_limit() {
            return None;
        }
        Some(LimitAlert {
            late_limit: self.config.late_limit,
            punishment: self.config.punishment.clone(),
            message: format!(
                "One or more members have exceeded the limit of {} delays! The punishment is: {}",
                self.config.late_limit, self.config.punishment
            ),
        })
    }

    pub fn chart_series(&self) -> ChartSeries {
        build_series(self.features, &self.members, self.config.late_limit)
    }

    pub fn view(&self) -> RosterView {
        let has_limit = self.features.has_limit;
        RosterView {
            features: self.features,
            members: self.members.clone(),
            late_limit: has_limit.then_some(self.config.late_limit),
            punishment: has_limit.then(|| self.config.punishment.clone()),
            over_limit: self.is_over_limit(),
            alert: self.over_limit_alert(),
            editing: self.editing.clone(),
            pending_name: self.pending_name.clone(),
        }
    }

    /// Returns the slices touched since the last drain, oldest first.
    pub fn drain_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }

    fn record(&mut self, change: Change) {
        if !self.changes.contains(&change) {
            self.changes.push(change);
        }
    }

    // Max id rather than length so ids never collide after removals.
    fn next_id(&self) -> Option<u32> {
        match self.members.iter().map(|member| member.id).max() {
            Some(id) => id.checked_add(1),
            None => Some(1),
        }
    }

    fn member(&self, id: u32) -> Option<&TeamMember> {
        self.members.iter().find(|member| member.id == id)
    }

    fn member_mut(&mut self, id: u32) -> Option<&mut TeamMember> {
        self.members.iter_mut().find(|member| member.id == id)
    }
}
