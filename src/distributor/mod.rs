//! Distributor - reward-balancing chore assignment
//!
//! Chores are shuffled, then stable-sorted by reward (highest first), so
//! chores with equal rewards land in a random order while the overall
//! ordering stays fixed. Each chore then goes to the lowest earner who still
//! has capacity for it, with ties between equal earners broken at random.
//!
//! The working totals on each [`Person`] must be at their baseline before a
//! run (see [`Person::reset_to_baseline`]); the config loader does this on
//! load and the CLI does it again before every retry.

pub mod report;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::models::{Chore, Person};

/// Result of a single distribution run.
#[derive(Debug, Clone)]
pub struct Distribution {
    /// People in input order, with their assigned chores and updated totals
    pub people: Vec<Person>,
    /// Chores nobody had capacity for
    pub unassigned: Vec<Chore>,
}

impl Distribution {
    /// Number of chores handed out in this run.
    pub fn assigned_count(&self) -> usize {
        self.people.iter().map(|p| p.chores.len()).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }
}

/// Distribute `chores` among `people` using the thread-local RNG.
pub fn distribute(chores: &[Chore], people: Vec<Person>) -> Distribution {
    distribute_with_rng(chores, people, &mut rand::thread_rng())
}

/// Distribute `chores` among `people` using the given random source.
pub fn distribute_with_rng<R: Rng + ?Sized>(
    chores: &[Chore],
    mut people: Vec<Person>,
    rng: &mut R,
) -> Distribution {
    let mut unassigned = Vec::new();

    for chore in order_chores(chores, rng) {
        let candidates = lowest_earners_with_capacity(&people, &chore);

        let Some(&winner) = candidates.choose(rng) else {
            warn!(chore = %chore.name, "Could not assign chore - no one has capacity");
            unassigned.push(chore);
            continue;
        };

        let person = &mut people[winner];
        debug!(
            chore = %chore.name,
            person = %person.name,
            reward = chore.reward,
            effort = chore.effort,
            "Assigned chore"
        );
        person.assign(chore);
    }

    Distribution { people, unassigned }
}

/// Shuffle a copy of `chores`, then stable-sort it by reward, highest first.
pub fn order_chores<R: Rng + ?Sized>(chores: &[Chore], rng: &mut R) -> Vec<Chore> {
    let mut ordered = chores.to_vec();
    ordered.shuffle(rng);
    // sort_by is stable: equal rewards keep their shuffled order
    ordered.sort_by(|a, b| b.reward.cmp(&a.reward));
    ordered
}

/// Indices of every person who can take `chore` and is tied for the lowest
/// total reward among those who can.
fn lowest_earners_with_capacity(people: &[Person], chore: &Chore) -> Vec<usize> {
    let mut candidates = Vec::new();
    let mut min_reward: Option<u64> = None;

    for (idx, person) in people.iter().enumerate() {
        if !person.has_capacity_for(chore) {
            continue;
        }

        match min_reward {
            Some(min) if person.total_reward > min => {}
            Some(min) if person.total_reward == min => candidates.push(idx),
            _ => {
                min_reward = Some(person.total_reward);
                candidates.clear();
                candidates.push(idx);
            }
        }
    }

    candidates
}
