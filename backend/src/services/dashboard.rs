//! Dashboard service: whole-history aggregates behind the overview cards
//!
//! Stock valuation and the purchase/sale totals always cover all movements.
//! Only the consumption summary honours the optional date range.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use shared::{
    resumo_consumo, DashboardTotais, Motivo, Movimento, MovimentoTotais, PeriodoConsumo, Tipo,
};

use crate::error::AppResult;

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

/// Per-product aggregate row backing the stock valuation and cost map
#[derive(Debug, sqlx::FromRow)]
struct ValorizacaoRow {
    sku: String,
    preco_venda: Decimal,
    entradas: i64,
    saidas: i64,
    qtd_comprada: i64,
    valor_comprado: Decimal,
}

/// Outbound sale/consumption row feeding revenue, cost of goods and the
/// consumption summary
#[derive(Debug, sqlx::FromRow)]
struct SaidaRow {
    id: i64,
    data_movimento: NaiveDate,
    motivo: String,
    sku: String,
    qtd_sacos: i32,
    preco_venda_unitario: Option<Decimal>,
}

impl SaidaRow {
    fn into_movimento(self) -> Movimento {
        Movimento {
            id: self.id,
            data_movimento: self.data_movimento,
            tipo: Tipo::Saida,
            motivo: Motivo::parse(&self.motivo).unwrap_or(Motivo::Venda),
            sku: self.sku,
            qtd_sacos: self.qtd_sacos,
            custo_unitario: None,
            preco_venda_unitario: self.preco_venda_unitario,
            observacoes: None,
        }
    }
}

impl DashboardService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Compute the dashboard totals
    pub async fn totais(&self, periodo: PeriodoConsumo) -> AppResult<DashboardTotais> {
        let produtos = sqlx::query_as::<_, ValorizacaoRow>(
            r#"
            SELECT r.sku, r.preco_venda,
                   COALESCE(SUM(CASE WHEN m.tipo = 'ENTRADA' THEN m.qtd_sacos ELSE 0 END), 0) AS entradas,
                   COALESCE(SUM(CASE WHEN m.tipo = 'SAÍDA' THEN m.qtd_sacos ELSE 0 END), 0) AS saidas,
                   COALESCE(SUM(CASE WHEN m.tipo = 'ENTRADA' AND m.motivo = 'COMPRA'
                                      AND m.custo_unitario IS NOT NULL
                                     THEN m.qtd_sacos ELSE 0 END), 0) AS qtd_comprada,
                   COALESCE(SUM(CASE WHEN m.tipo = 'ENTRADA' AND m.motivo = 'COMPRA'
                                      AND m.custo_unitario IS NOT NULL
                                     THEN m.qtd_sacos * m.custo_unitario ELSE 0 END), 0) AS valor_comprado
            FROM racoes r
            LEFT JOIN movimentos m ON m.racao_id = r.id
            GROUP BY r.id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let saidas = sqlx::query_as::<_, SaidaRow>(
            r#"
            SELECT m.id, m.data_movimento, m.motivo, r.sku, m.qtd_sacos,
                   m.preco_venda_unitario
            FROM movimentos m
            JOIN racoes r ON r.id = m.racao_id
            WHERE m.tipo = 'SAÍDA' AND m.motivo IN ('VENDA', 'CONSUMO_CASA')
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut valor_em_stock = Decimal::ZERO;
        let mut total_compras = Decimal::ZERO;
        let mut custos: HashMap<String, Decimal> = HashMap::new();

        for produto in produtos {
            let totais = MovimentoTotais {
                entradas: produto.entradas,
                saidas: produto.saidas,
                qtd_comprada: produto.qtd_comprada,
                valor_comprado: produto.valor_comprado,
            };
            let custo_medio = totais.custo_medio();

            // Products never bought are valued at their sale price
            let valor_unitario = custo_medio.unwrap_or(produto.preco_venda);
            valor_em_stock += Decimal::from(totais.stock_atual()) * valor_unitario;
            total_compras += totais.valor_comprado;

            if let Some(custo) = custo_medio {
                custos.insert(produto.sku, custo);
            }
        }

        let movimentos: Vec<Movimento> =
            saidas.into_iter().map(SaidaRow::into_movimento).collect();

        let mut total_vendas = Decimal::ZERO;
        let mut custo_das_vendas = Decimal::ZERO;
        for m in &movimentos {
            if m.motivo != Motivo::Venda {
                continue;
            }
            if let Some(preco) = m.preco_venda_unitario {
                total_vendas += Decimal::from(m.qtd_sacos) * preco;
            }
            let custo = custos.get(&m.sku).copied().unwrap_or(Decimal::ZERO);
            custo_das_vendas += Decimal::from(m.qtd_sacos) * custo;
        }

        let consumo = resumo_consumo(&movimentos, periodo, |sku| custos.get(sku).copied());

        Ok(DashboardTotais {
            valor_em_stock,
            total_compras,
            total_vendas,
            lucro_estimado: total_vendas - custo_das_vendas,
            consumo_qtd: consumo.qtd,
            consumo_custo: consumo.custo,
            last_updated: Some(Utc::now().to_rfc3339()),
        })
    }
}
