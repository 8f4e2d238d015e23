//! Domain models for the Rações Stock tracker

mod dashboard;
mod movimento;
mod racao;

pub use dashboard::*;
pub use movimento::*;
pub use racao::*;
