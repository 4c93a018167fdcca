pub mod error;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod plot;
pub mod signal;
pub mod sim;

pub use error::*;
pub use metrics::*;
pub use pipeline::*;
pub use signal::*;
