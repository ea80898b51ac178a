use halaqa_types::enums::VoteKind;
use serde::{Deserialize, Serialize};

use crate::record::ListRecord;

/// Like/dislike counters plus the viewer's own vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub likes: u32,
    pub dislikes: u32,
    pub user_vote: Option<VoteKind>,
}

impl VoteTally {
    /// Casting the current vote again retracts it; casting the other one
    /// moves the vote across.
    #[must_use]
    pub fn cast(self, vote: VoteKind) -> Self {
        let mut next = self;

        if let Some(previous) = self.user_vote {
            let counter = next.counter_mut(previous);
            *counter = counter.saturating_sub(1);
        }

        if self.user_vote == Some(vote) {
            next.user_vote = None;
        } else {
            let counter = next.counter_mut(vote);
            *counter = counter.saturating_add(1);
            next.user_vote = Some(vote);
        }

        next
    }

    fn counter_mut(&mut self, vote: VoteKind) -> &mut u32 {
        match vote {
            VoteKind::Like => &mut self.likes,
            VoteKind::Dislike => &mut self.dislikes,
        }
    }
}

pub trait Votable: ListRecord {
    fn tally_mut(&mut self) -> &mut VoteTally;
}

/// Inverts `flag` and moves `counter` by one in the same direction.
pub fn toggle_counted(flag: &mut bool, counter: &mut u32) {
    *flag = !*flag;
    *counter = if *flag {
        counter.saturating_add(1)
    } else {
        counter.saturating_sub(1)
    };
}
