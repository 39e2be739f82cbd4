pub mod candidate;
pub mod credential;
pub mod ports;
pub mod tally;
pub mod voter;
