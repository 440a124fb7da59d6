pub mod results;
pub mod voting;
