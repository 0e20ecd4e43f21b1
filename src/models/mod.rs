pub mod entry;
pub mod key;
pub mod roster;
pub mod shift;

pub use entry::{Entry, load_entries, parse_entries};
pub use key::EntryKey;
pub use roster::{Employee, Roster, Team, TeamLabel};
pub use shift::Shift;
