pub mod features;
pub mod observation;
pub mod prediction;

pub use features::*;
pub use observation::*;
pub use prediction::*;
