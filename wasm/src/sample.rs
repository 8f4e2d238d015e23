//! Bundled sample dataset, shown when the API is unreachable

use chrono::NaiveDate;
use rust_decimal::Decimal;

use shared::{Alerta, Ativo, DashboardTotais, Motivo, Movimento, Racao, RacaoComMetricas, Tipo};

fn data(ano: i32, mes: u32, dia: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(ano, mes, dia).unwrap_or_default()
}

fn racao(
    id: i64,
    sku: &str,
    nome: &str,
    marca: &str,
    peso_kg: Decimal,
    preco_venda: Decimal,
    stock_minimo: i32,
    stock_atual: i64,
    alerta: Alerta,
) -> RacaoComMetricas {
    RacaoComMetricas {
        racao: Racao {
            id,
            sku: sku.to_string(),
            nome: nome.to_string(),
            marca: marca.to_string(),
            variante: None,
            peso_kg,
            fornecedor: None,
            preco_compra: None,
            preco_venda,
            stock_minimo,
            ativo: Ativo::Sim,
        },
        stock_atual,
        alerta,
        custo_medio: None,
    }
}

/// Sample products
pub fn racoes() -> Vec<RacaoComMetricas> {
    vec![
        racao(
            1,
            "RAC-001",
            "Exclusive Fish 3kg",
            "Royal Canin",
            Decimal::from(3),
            Decimal::new(299, 1),
            3,
            12,
            Alerta::Ok,
        ),
        racao(
            2,
            "RAC-002",
            "Junior 12kg",
            "Royal Canin",
            Decimal::from(12),
            Decimal::new(799, 1),
            2,
            4,
            Alerta::Ok,
        ),
        racao(
            3,
            "RAC-003",
            "Fish 12kg",
            "Royal Canin",
            Decimal::from(12),
            Decimal::new(749, 1),
            2,
            1,
            Alerta::Baixo,
        ),
        racao(
            4,
            "RAC-004",
            "Duck 12kg",
            "Royal Canin",
            Decimal::from(12),
            Decimal::new(799, 1),
            2,
            3,
            Alerta::Ok,
        ),
        racao(
            5,
            "RAC-005",
            "Natsbi",
            "Natsbi",
            Decimal::from(15),
            Decimal::new(899, 1),
            1,
            0,
            Alerta::Baixo,
        ),
    ]
}

/// Sample movements: the opening purchase and two sales
pub fn movimentos() -> Vec<Movimento> {
    vec![
        Movimento {
            id: 1,
            data_movimento: data(2024, 1, 2),
            tipo: Tipo::Entrada,
            motivo: Motivo::Compra,
            sku: "RAC-001".to_string(),
            qtd_sacos: 10,
            custo_unitario: Some(Decimal::from(20)),
            preco_venda_unitario: None,
            observacoes: Some("Stock inicial".to_string()),
        },
        Movimento {
            id: 2,
            data_movimento: data(2024, 1, 10),
            tipo: Tipo::Saida,
            motivo: Motivo::Venda,
            sku: "RAC-001".to_string(),
            qtd_sacos: 2,
            custo_unitario: None,
            preco_venda_unitario: Some(Decimal::new(299, 1)),
            observacoes: None,
        },
        Movimento {
            id: 3,
            data_movimento: data(2024, 1, 15),
            tipo: Tipo::Saida,
            motivo: Motivo::Venda,
            sku: "RAC-005".to_string(),
            qtd_sacos: 2,
            custo_unitario: None,
            preco_venda_unitario: Some(Decimal::new(899, 1)),
            observacoes: None,
        },
    ]
}

/// Sample dashboard totals. The consumption summary is recomputed by the
/// store, and the timestamp is filled in at load time.
pub fn totais() -> DashboardTotais {
    DashboardTotais {
        valor_em_stock: Decimal::new(12455, 1),
        total_compras: Decimal::from(890),
        total_vendas: Decimal::new(4896, 1),
        lucro_estimado: Decimal::new(1422, 1),
        consumo_qtd: 0,
        consumo_custo: Decimal::ZERO,
        last_updated: None,
    }
}
