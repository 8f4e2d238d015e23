//! Business logic services for the Rações Stock API

pub mod dashboard;
pub mod movimento;
pub mod racao;

pub use dashboard::DashboardService;
pub use movimento::MovimentoService;
pub use racao::RacaoService;
