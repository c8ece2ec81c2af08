// Player groups and the assignment store.

pub mod group;
pub mod store;

pub use group::{Group, Player, PlayerId};
pub use store::{AssignmentSnapshot, AssignmentStore, GroupCounts};
