use tracing::warn;

use crate::models::friend::{Friend, FriendId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FriendDirectory {
    friends: Vec<Friend>,
    active: Option<usize>,
}

impl FriendDirectory {
    pub fn new(friends: Vec<Friend>) -> Self {
        let active = if friends.is_empty() { None } else { Some(0) };
        Self { friends, active }
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }

    pub fn active(&self) -> Option<&Friend> {
        self.active.and_then(|idx| self.friends.get(idx))
    }

    pub fn active_id(&self) -> Option<FriendId> {
        self.active().map(|friend| friend.friend_id)
    }

    pub fn select_by_id(&mut self, id: FriendId) -> bool {
        match self.friends.iter().position(|f| f.friend_id == id) {
            Some(idx) => {
                self.active = Some(idx);
                true
            }
            None => {
                warn!(friend_id = id, "ignoring selection of unknown friend");
                false
            }
        }
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: isize) {
        let len = self.friends.len();
        if len == 0 {
            return;
        }
        let current = self
            .active_id()
            .and_then(|id| self.friends.iter().position(|f| f.friend_id == id))
            .unwrap_or(0);
        let len = len as isize;
        let next = (current as isize + delta).rem_euclid(len);
        self.active = Some(next as usize);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRequest {
    pub generation: u64,
    pub friend_id: FriendId,
}
