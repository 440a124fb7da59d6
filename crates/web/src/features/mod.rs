pub mod ballots;
pub mod contests;
pub mod notifications;
pub mod results;
pub mod scores;
