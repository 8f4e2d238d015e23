//! Dashboard aggregate tests
//!
//! Tests for the overview figures including:
//! - Stock valuation with the sale-price fallback
//! - Revenue, cost of goods and estimated profit
//! - The consumption summary and its optional date range

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use chrono::NaiveDate;
use shared::{resumo_consumo, Motivo, Movimento, PeriodoConsumo, Tipo};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// Helper to build an outbound movement on a given day of January 2024
fn saida(dia: u32, motivo: Motivo, sku: &str, qtd: i32, preco: Option<Decimal>) -> Movimento {
    Movimento {
        id: 0,
        data_movimento: NaiveDate::from_ymd_opt(2024, 1, dia).unwrap(),
        tipo: Tipo::Saida,
        motivo,
        sku: sku.to_string(),
        qtd_sacos: qtd,
        custo_unitario: None,
        preco_venda_unitario: preco,
        observacoes: None,
    }
}

fn entrada(dia: u32, motivo: Motivo, sku: &str, qtd: i32, custo: Option<Decimal>) -> Movimento {
    Movimento {
        id: 0,
        data_movimento: NaiveDate::from_ymd_opt(2024, 1, dia).unwrap(),
        tipo: Tipo::Entrada,
        motivo,
        sku: sku.to_string(),
        qtd_sacos: qtd,
        custo_unitario: custo,
        preco_venda_unitario: None,
        observacoes: None,
    }
}

fn periodo(de: Option<(i32, u32, u32)>, ate: Option<(i32, u32, u32)>) -> PeriodoConsumo {
    let parse = |d: (i32, u32, u32)| NaiveDate::from_ymd_opt(d.0, d.1, d.2).unwrap();
    PeriodoConsumo {
        de: de.map(parse),
        ate: ate.map(parse),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Only outbound sale and household rows feed the consumption summary
    #[test]
    fn test_consumo_filtra_motivos() {
        let movimentos = vec![
            saida(10, Motivo::Venda, "RAC-001", 2, Some(dec("29.9"))),
            saida(12, Motivo::ConsumoCasa, "RAC-001", 1, None),
            saida(14, Motivo::Ajuste, "RAC-001", 5, None),
            entrada(2, Motivo::Compra, "RAC-001", 10, Some(dec("20"))),
        ];

        let resumo = resumo_consumo(&movimentos, PeriodoConsumo::default(), |_| None);

        assert_eq!(resumo.qtd, 3);
    }

    /// Consumption is costed at the product's average purchase cost
    #[test]
    fn test_consumo_usa_custo_medio() {
        let movimentos = vec![
            saida(10, Motivo::Venda, "RAC-001", 2, Some(dec("29.9"))),
            saida(12, Motivo::ConsumoCasa, "RAC-001", 1, None),
        ];

        let resumo = resumo_consumo(&movimentos, PeriodoConsumo::default(), |sku| {
            (sku == "RAC-001").then(|| dec("20"))
        });

        assert_eq!(resumo.qtd, 3);
        assert_eq!(resumo.custo, dec("60"));
    }

    /// Unknown average cost counts quantity but contributes zero cost
    #[test]
    fn test_consumo_sem_custo_medio() {
        let movimentos = vec![saida(15, Motivo::Venda, "RAC-005", 2, Some(dec("89.9")))];

        let resumo = resumo_consumo(&movimentos, PeriodoConsumo::default(), |_| None);

        assert_eq!(resumo.qtd, 2);
        assert_eq!(resumo.custo, Decimal::ZERO);
    }

    /// The date range is inclusive on both ends
    #[test]
    fn test_periodo_inclusivo_nas_bordas() {
        let movimentos = vec![
            saida(9, Motivo::Venda, "RAC-001", 1, Some(dec("29.9"))),
            saida(10, Motivo::Venda, "RAC-001", 1, Some(dec("29.9"))),
            saida(15, Motivo::Venda, "RAC-001", 1, Some(dec("29.9"))),
            saida(16, Motivo::Venda, "RAC-001", 1, Some(dec("29.9"))),
        ];

        let dentro = periodo(Some((2024, 1, 10)), Some((2024, 1, 15)));
        let resumo = resumo_consumo(&movimentos, dentro, |_| None);

        assert_eq!(resumo.qtd, 2);
    }

    /// Either end of the range may be open
    #[test]
    fn test_periodo_meio_aberto() {
        let movimentos = vec![
            saida(5, Motivo::Venda, "RAC-001", 1, Some(dec("29.9"))),
            saida(20, Motivo::Venda, "RAC-001", 1, Some(dec("29.9"))),
        ];

        let so_de = periodo(Some((2024, 1, 10)), None);
        assert_eq!(resumo_consumo(&movimentos, so_de, |_| None).qtd, 1);

        let so_ate = periodo(None, Some((2024, 1, 10)));
        assert_eq!(resumo_consumo(&movimentos, so_ate, |_| None).qtd, 1);

        let aberto = PeriodoConsumo::default();
        assert_eq!(resumo_consumo(&movimentos, aberto, |_| None).qtd, 2);
    }

    /// Consumption sums across products, each at its own cost
    #[test]
    fn test_consumo_varios_produtos() {
        let movimentos = vec![
            saida(10, Motivo::Venda, "RAC-001", 2, Some(dec("29.9"))),
            saida(15, Motivo::ConsumoCasa, "RAC-002", 3, None),
        ];

        let resumo = resumo_consumo(&movimentos, PeriodoConsumo::default(), |sku| match sku {
            "RAC-001" => Some(dec("20")),
            "RAC-002" => Some(dec("55")),
            _ => None,
        });

        assert_eq!(resumo.qtd, 5);
        // 2 * 20 + 3 * 55
        assert_eq!(resumo.custo, dec("205"));
    }
}

// ============================================================================
// Aggregation Helpers (the fold the endpoint runs over database rows)
// ============================================================================

#[cfg(test)]
mod aggregation_helpers {
    use super::*;
    use shared::{DashboardTotais, MovimentoTotais};
    use std::collections::HashMap;

    /// A product as the valuation fold sees it: sale price plus its
    /// movement totals.
    pub struct Produto {
        pub sku: &'static str,
        pub preco_venda: Decimal,
        pub totais: MovimentoTotais,
    }

    /// Fold products and outbound movements into the dashboard figures.
    pub fn agregar(
        produtos: &[Produto],
        movimentos: &[Movimento],
        periodo: PeriodoConsumo,
    ) -> DashboardTotais {
        let mut valor_em_stock = Decimal::ZERO;
        let mut total_compras = Decimal::ZERO;
        let mut custos: HashMap<String, Decimal> = HashMap::new();

        for produto in produtos {
            let custo_medio = produto.totais.custo_medio();
            let valor_unitario = custo_medio.unwrap_or(produto.preco_venda);
            valor_em_stock += Decimal::from(produto.totais.stock_atual()) * valor_unitario;
            total_compras += produto.totais.valor_comprado;
            if let Some(custo) = custo_medio {
                custos.insert(produto.sku.to_string(), custo);
            }
        }

        let mut total_vendas = Decimal::ZERO;
        let mut custo_das_vendas = Decimal::ZERO;
        for m in movimentos {
            if m.tipo != Tipo::Saida || m.motivo != Motivo::Venda {
                continue;
            }
            if let Some(preco) = m.preco_venda_unitario {
                total_vendas += Decimal::from(m.qtd_sacos) * preco;
            }
            let custo = custos.get(&m.sku).copied().unwrap_or(Decimal::ZERO);
            custo_das_vendas += Decimal::from(m.qtd_sacos) * custo;
        }

        let consumo = resumo_consumo(movimentos, periodo, |sku| custos.get(sku).copied());

        DashboardTotais {
            valor_em_stock,
            total_compras,
            total_vendas,
            lucro_estimado: total_vendas - custo_das_vendas,
            consumo_qtd: consumo.qtd,
            consumo_custo: consumo.custo,
            last_updated: None,
        }
    }

    fn produto(sku: &'static str, preco_venda: Decimal, movimentos: &[Movimento]) -> Produto {
        Produto {
            sku,
            preco_venda,
            totais: MovimentoTotais::from_movimentos(
                movimentos.iter().filter(|m| m.sku == sku),
            ),
        }
    }

    /// Bought stock is valued at its average cost
    #[test]
    fn test_valor_em_stock_ao_custo_medio() {
        let movimentos = vec![
            entrada(2, Motivo::Compra, "RAC-001", 10, Some(dec("20"))),
            saida(10, Motivo::Venda, "RAC-001", 2, Some(dec("29.9"))),
        ];
        let produtos = vec![produto("RAC-001", dec("29.9"), &movimentos)];

        let totais = agregar(&produtos, &movimentos, PeriodoConsumo::default());

        // 8 bags at the 20 average
        assert_eq!(totais.valor_em_stock, dec("160"));
        assert_eq!(totais.total_compras, dec("200"));
    }

    /// A product never bought is valued at its sale price instead
    #[test]
    fn test_valor_em_stock_recorre_ao_preco_venda() {
        let movimentos = vec![entrada(3, Motivo::Ajuste, "RAC-004", 3, None)];
        let produtos = vec![produto("RAC-004", dec("79.9"), &movimentos)];

        let totais = agregar(&produtos, &movimentos, PeriodoConsumo::default());

        assert_eq!(totais.valor_em_stock, dec("239.7"));
        assert_eq!(totais.total_compras, Decimal::ZERO);
    }

    /// Profit is revenue minus the goods sold at their average cost
    #[test]
    fn test_lucro_estimado() {
        let movimentos = vec![
            entrada(2, Motivo::Compra, "RAC-001", 10, Some(dec("20"))),
            saida(10, Motivo::Venda, "RAC-001", 2, Some(dec("29.9"))),
        ];
        let produtos = vec![produto("RAC-001", dec("29.9"), &movimentos)];

        let totais = agregar(&produtos, &movimentos, PeriodoConsumo::default());

        assert_eq!(totais.total_vendas, dec("59.8"));
        // 59.8 - 2 * 20
        assert_eq!(totais.lucro_estimado, dec("19.8"));
    }

    /// Sales of a product with no purchase history count full revenue as
    /// profit
    #[test]
    fn test_lucro_sem_historico_de_compra() {
        let movimentos = vec![saida(15, Motivo::Venda, "RAC-005", 2, Some(dec("89.9")))];
        let produtos = vec![produto("RAC-005", dec("89.9"), &movimentos)];

        let totais = agregar(&produtos, &movimentos, PeriodoConsumo::default());

        assert_eq!(totais.total_vendas, dec("179.8"));
        assert_eq!(totais.lucro_estimado, dec("179.8"));
    }

    /// The date range narrows the consumption figures only
    #[test]
    fn test_periodo_so_restringe_consumo() {
        let movimentos = vec![
            entrada(2, Motivo::Compra, "RAC-001", 10, Some(dec("20"))),
            saida(10, Motivo::Venda, "RAC-001", 2, Some(dec("29.9"))),
            saida(25, Motivo::Venda, "RAC-001", 1, Some(dec("29.9"))),
        ];
        let produtos = vec![produto("RAC-001", dec("29.9"), &movimentos)];

        let janela = periodo(Some((2024, 1, 1)), Some((2024, 1, 15)));
        let totais = agregar(&produtos, &movimentos, janela);
        let sem_janela = agregar(&produtos, &movimentos, PeriodoConsumo::default());

        assert_eq!(totais.consumo_qtd, 2);
        assert_eq!(sem_janela.consumo_qtd, 3);
        // Revenue and valuation ignore the range
        assert_eq!(totais.total_vendas, sem_janela.total_vendas);
        assert_eq!(totais.valor_em_stock, sem_janela.valor_em_stock);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating bag quantities
    fn qtd_strategy() -> impl Strategy<Value = i32> {
        1i32..=500i32
    }

    /// Strategy for generating unit costs
    fn custo_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100000i64).prop_map(|n| Decimal::new(n, 2)) // 0.01 to 1000.00
    }

    /// Strategy for generating days inside January 2024
    fn dia_strategy() -> impl Strategy<Value = u32> {
        1u32..=31u32
    }

    /// Strategy for generating outbound reasons
    fn motivo_strategy() -> impl Strategy<Value = Motivo> {
        prop_oneof![
            Just(Motivo::Compra),
            Just(Motivo::Venda),
            Just(Motivo::ConsumoCasa),
            Just(Motivo::Ajuste),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The summary counts exactly the sale and household quantities
        #[test]
        fn prop_consumo_soma_motivos_elegiveis(
            linhas in prop::collection::vec((motivo_strategy(), qtd_strategy()), 0..20)
        ) {
            let movimentos: Vec<Movimento> = linhas
                .iter()
                .map(|(motivo, qtd)| saida(10, *motivo, "RAC-001", *qtd, None))
                .collect();

            let esperado: i64 = linhas
                .iter()
                .filter(|(motivo, _)| {
                    *motivo == Motivo::Venda || *motivo == Motivo::ConsumoCasa
                })
                .map(|(_, qtd)| i64::from(*qtd))
                .sum();

            let resumo = resumo_consumo(&movimentos, PeriodoConsumo::default(), |_| None);
            prop_assert_eq!(resumo.qtd, esperado);
        }

        /// Inbound movements never count as consumption
        #[test]
        fn prop_entradas_nunca_contam(
            linhas in prop::collection::vec((motivo_strategy(), qtd_strategy()), 1..20)
        ) {
            let movimentos: Vec<Movimento> = linhas
                .iter()
                .map(|(motivo, qtd)| entrada(10, *motivo, "RAC-001", *qtd, None))
                .collect();

            let resumo = resumo_consumo(&movimentos, PeriodoConsumo::default(), |_| None);
            prop_assert_eq!(resumo.qtd, 0);
        }

        /// At a flat average cost the summary cost is quantity times cost
        #[test]
        fn prop_consumo_custo_proporcional(
            qtds in prop::collection::vec(qtd_strategy(), 1..10),
            custo in custo_strategy()
        ) {
            let movimentos: Vec<Movimento> = qtds
                .iter()
                .map(|qtd| saida(10, Motivo::Venda, "RAC-001", *qtd, Some(dec("29.9"))))
                .collect();

            let resumo =
                resumo_consumo(&movimentos, PeriodoConsumo::default(), |_| Some(custo));

            prop_assert_eq!(resumo.custo, Decimal::from(resumo.qtd) * custo);
        }

        /// Narrowing the range never increases the summary
        #[test]
        fn prop_periodo_nunca_aumenta(
            linhas in prop::collection::vec((dia_strategy(), qtd_strategy()), 0..20),
            de in dia_strategy(),
            ate in dia_strategy()
        ) {
            let movimentos: Vec<Movimento> = linhas
                .iter()
                .map(|(dia, qtd)| saida(*dia, Motivo::Venda, "RAC-001", *qtd, None))
                .collect();

            let (de, ate) = (de.min(ate), de.max(ate));
            let janela = periodo(Some((2024, 1, de)), Some((2024, 1, ate)));

            let restrito = resumo_consumo(&movimentos, janela, |_| None);
            let completo = resumo_consumo(&movimentos, PeriodoConsumo::default(), |_| None);

            prop_assert!(restrito.qtd <= completo.qtd);
        }

        /// A date is inside the range exactly when both bounds allow it
        #[test]
        fn prop_periodo_contem(
            dia in dia_strategy(),
            de in dia_strategy(),
            ate in dia_strategy()
        ) {
            let data = NaiveDate::from_ymd_opt(2024, 1, dia).unwrap();
            let janela = periodo(Some((2024, 1, de)), Some((2024, 1, ate)));

            prop_assert_eq!(janela.contem(data), dia >= de && dia <= ate);
        }
    }
}
