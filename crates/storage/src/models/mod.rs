mod contest;
mod question;
mod score;
mod snapshot;
mod specialty;
mod user;
mod vehicle;

pub use contest::{ContestType, VoteState};
pub use question::JudgeQuestion;
pub use score::{JudgeScore, ScoreWithJudge};
pub use snapshot::{NewSnapshotEntry, SnapshotEntry};
pub use specialty::{Ballot, NewBallot, SpecialtyContest};
pub use user::{User, UserRole};
pub use vehicle::{Car, VehicleClass};
