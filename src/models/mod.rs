mod item;
mod list;

pub use item::{CandidateItem, Item, ReconciledItem};
pub use list::{ListRecord, Progress};
