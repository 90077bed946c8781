mod desc;
mod results;

pub use desc::ElectionSummary;
pub use results::{ElectionResults, VerificationError};
