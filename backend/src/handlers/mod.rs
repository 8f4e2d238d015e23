//! HTTP handlers for the Rações Stock API

use serde::Serialize;

mod dashboard;
mod health;
mod movimento;
mod racao;

pub use dashboard::*;
pub use health::*;
pub use movimento::*;
pub use racao::*;

/// Success body for updates and deletes
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

/// Success body for creates, carrying the new row id
#[derive(Debug, Serialize)]
pub struct CreatedBody {
    pub status: &'static str,
    pub id: i64,
}
