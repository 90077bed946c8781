pub mod ballot;
pub mod election;
pub mod proposal;
pub mod voter;
