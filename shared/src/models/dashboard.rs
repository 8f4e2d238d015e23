//! Dashboard aggregate models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Motivo, Movimento, Tipo};

/// Totals returned by the dashboard endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardTotais {
    pub valor_em_stock: Decimal,
    pub total_compras: Decimal,
    pub total_vendas: Decimal,
    pub lucro_estimado: Decimal,
    pub consumo_qtd: i64,
    pub consumo_custo: Decimal,
    pub last_updated: Option<String>,
}

/// Inclusive date range restricting the consumption summary
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PeriodoConsumo {
    pub de: Option<NaiveDate>,
    pub ate: Option<NaiveDate>,
}

impl PeriodoConsumo {
    pub fn contem(&self, data: NaiveDate) -> bool {
        if let Some(de) = self.de {
            if data < de {
                return false;
            }
        }
        if let Some(ate) = self.ate {
            if data > ate {
                return false;
            }
        }
        true
    }
}

/// Consumption summary over outbound sale/household movements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumoConsumo {
    pub qtd: i64,
    pub custo: Decimal,
}

/// Sum outbound VENDA/CONSUMO_CASA quantities inside the period, pricing
/// each movement at its product's average cost (zero when unknown).
pub fn resumo_consumo<F>(
    movimentos: &[Movimento],
    periodo: PeriodoConsumo,
    custo_medio: F,
) -> ResumoConsumo
where
    F: Fn(&str) -> Option<Decimal>,
{
    let mut resumo = ResumoConsumo::default();
    for m in movimentos {
        if m.tipo != Tipo::Saida {
            continue;
        }
        if m.motivo != Motivo::Venda && m.motivo != Motivo::ConsumoCasa {
            continue;
        }
        if !periodo.contem(m.data_movimento) {
            continue;
        }
        let custo = custo_medio(&m.sku).unwrap_or(Decimal::ZERO);
        resumo.qtd += i64::from(m.qtd_sacos);
        resumo.custo += Decimal::from(m.qtd_sacos) * custo;
    }
    resumo
}
