pub mod ballot;
pub mod contest_state;
pub mod directory;
pub mod score;
pub mod snapshot;
