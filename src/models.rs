//! Household models - chores and the people who do them
//!
//! Field names in the serialized form follow the household config file
//! (`Name`, `Difficulty`, `Earned`, ...). Snake-case aliases are accepted so
//! TOML and YAML configs read naturally.

use serde::{Deserialize, Serialize};

/// A chore with an effort cost and a reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,

    /// Effort cost, counted against a person's capacity
    #[serde(rename = "Difficulty", alias = "difficulty", alias = "effort")]
    pub effort: u32,

    /// Reward in whole dollars
    #[serde(rename = "Earned", alias = "earned", alias = "reward")]
    pub reward: u32,

    #[serde(
        rename = "Description",
        alias = "description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl Chore {
    pub fn new(name: impl Into<String>, effort: u32, reward: u32) -> Self {
        Self {
            name: name.into(),
            effort,
            reward,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A person who can be assigned chores.
///
/// `chores`, `total_effort` and `total_reward` are working state for a single
/// distribution run and are never read from or written to config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,

    /// Phone number or Apple ID for iMessage
    #[serde(
        rename = "Contact",
        alias = "contact",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub contact: Option<String>,

    /// Maximum total effort; 0 means no limit
    #[serde(
        rename = "EffortCapacity",
        alias = "effort_capacity",
        alias = "capacity",
        default
    )]
    pub capacity: u32,

    /// Chores bound to this person outside the balancer
    #[serde(
        rename = "PreAssignedChores",
        alias = "pre_assigned_chores",
        alias = "pre_assigned",
        default
    )]
    pub pre_assigned: Vec<Chore>,

    /// Chores handed out by the balancer in this run
    #[serde(skip)]
    pub chores: Vec<Chore>,

    /// Running effort total, widened so sums of `u32` chores cannot overflow
    #[serde(skip)]
    pub total_effort: u64,

    #[serde(skip)]
    pub total_reward: u64,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: None,
            capacity: 0,
            pre_assigned: Vec::new(),
            chores: Vec::new(),
            total_effort: 0,
            total_reward: 0,
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Add a pre-assigned chore and fold it into the baseline totals.
    pub fn with_pre_assigned(mut self, chore: Chore) -> Self {
        self.pre_assigned.push(chore);
        self.reset_to_baseline();
        self
    }

    /// Drop any distributed chores and recompute totals from the
    /// pre-assigned chores alone.
    pub fn reset_to_baseline(&mut self) {
        self.chores.clear();
        self.total_effort = self.pre_assigned.iter().map(|c| u64::from(c.effort)).sum();
        self.total_reward = self.pre_assigned.iter().map(|c| u64::from(c.reward)).sum();
    }

    /// Whether `chore` fits under this person's capacity.
    pub fn has_capacity_for(&self, chore: &Chore) -> bool {
        if self.capacity == 0 {
            return true;
        }
        self.total_effort
            .checked_add(u64::from(chore.effort))
            .is_some_and(|effort| effort <= u64::from(self.capacity))
    }

    /// Record a distributed chore and update the running totals.
    pub fn assign(&mut self, chore: Chore) {
        self.total_effort = self.total_effort.saturating_add(u64::from(chore.effort));
        self.total_reward = self.total_reward.saturating_add(u64::from(chore.reward));
        self.chores.push(chore);
    }

    /// Pre-assigned chores followed by distributed ones.
    pub fn all_chores(&self) -> impl Iterator<Item = &Chore> {
        self.pre_assigned.iter().chain(self.chores.iter())
    }

    pub fn has_capacity_limit(&self) -> bool {
        self.capacity > 0
    }
}
