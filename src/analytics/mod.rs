pub mod engagement;
pub mod metrics;
pub mod recommendations;
pub mod seo;

pub use engagement::*;
pub use metrics::*;
pub use recommendations::*;
pub use seo::*;
