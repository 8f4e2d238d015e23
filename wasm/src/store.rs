//! Client-side store mirroring the API data
//!
//! The page keeps one `Store`, refills it after every mutation and derives
//! every table from it. Filters run over the cached rows, so changing one
//! never costs a network round trip.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use shared::{
    resumo_consumo, Alerta, Ativo, DashboardTotais, Motivo, Movimento, PeriodoConsumo,
    RacaoComMetricas, ResumoConsumo, Tipo,
};

/// Filters applied to the movement table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiltroMovimentos {
    #[serde(default)]
    pub texto: String,
    pub tipo: Option<Tipo>,
    pub motivo: Option<Motivo>,
    #[serde(flatten)]
    pub periodo: PeriodoConsumo,
}

/// Cached API data plus the active filters
#[derive(Debug, Default)]
pub struct Store {
    racoes: Vec<RacaoComMetricas>,
    movimentos: Vec<Movimento>,
    totais: DashboardTotais,
    filtro_racoes: String,
    filtro_movimentos: FiltroMovimentos,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the bundled sample dataset, the offline fallback
    pub fn com_amostra() -> Self {
        Store {
            racoes: crate::sample::racoes(),
            movimentos: crate::sample::movimentos(),
            totais: crate::sample::totais(),
            ..Self::default()
        }
    }

    pub fn set_racoes(&mut self, racoes: Vec<RacaoComMetricas>) {
        self.racoes = racoes;
    }

    pub fn set_movimentos(&mut self, movimentos: Vec<Movimento>) {
        self.movimentos = movimentos;
    }

    pub fn set_totais(&mut self, totais: DashboardTotais) {
        self.totais = totais;
    }

    pub fn totais(&self) -> &DashboardTotais {
        &self.totais
    }

    pub fn set_filtro_racoes(&mut self, texto: &str) {
        self.filtro_racoes = texto.to_string();
    }

    pub fn set_filtro_movimentos(&mut self, filtro: FiltroMovimentos) {
        self.filtro_movimentos = filtro;
    }

    /// Product rows matching the text filter, over SKU and name
    pub fn racoes_filtradas(&self) -> Vec<&RacaoComMetricas> {
        let texto = self.filtro_racoes.trim().to_lowercase();
        if texto.is_empty() {
            return self.racoes.iter().collect();
        }
        self.racoes
            .iter()
            .filter(|r| {
                r.racao.sku.to_lowercase().contains(&texto)
                    || r.racao.nome.to_lowercase().contains(&texto)
            })
            .collect()
    }

    /// Movement rows matching the active filters
    pub fn movimentos_filtrados(&self) -> Vec<&Movimento> {
        let filtro = &self.filtro_movimentos;
        let texto = filtro.texto.trim().to_lowercase();

        self.movimentos
            .iter()
            .filter(|m| {
                if let Some(tipo) = filtro.tipo {
                    if m.tipo != tipo {
                        return false;
                    }
                }
                if let Some(motivo) = filtro.motivo {
                    if m.motivo != motivo {
                        return false;
                    }
                }
                if !filtro.periodo.contem(m.data_movimento) {
                    return false;
                }
                if !texto.is_empty() {
                    let sku = m.sku.to_lowercase();
                    let nome = self
                        .nome_por_sku(&m.sku)
                        .map(str::to_lowercase)
                        .unwrap_or_default();
                    if !sku.contains(&texto) && !nome.contains(&texto) {
                        return false;
                    }
                }
                true
            })
            .collect()
    }

    /// Active products ordered by name, for the stock table
    pub fn stock_ativo(&self) -> Vec<&RacaoComMetricas> {
        let mut ativos: Vec<&RacaoComMetricas> = self
            .racoes
            .iter()
            .filter(|r| r.racao.ativo == Ativo::Sim)
            .collect();
        ativos.sort_by(|a, b| a.racao.nome.to_lowercase().cmp(&b.racao.nome.to_lowercase()));
        ativos
    }

    /// Products whose stock fell under the minimum, for the restock table
    pub fn para_repor(&self) -> Vec<&RacaoComMetricas> {
        self.racoes
            .iter()
            .filter(|r| r.alerta == Alerta::Baixo)
            .collect()
    }

    /// Dashboard totals with the consumption summary recomputed over the
    /// cached movements for the given period
    pub fn totais_com_consumo(&self, periodo: PeriodoConsumo) -> DashboardTotais {
        let resumo = self.consumo(periodo);
        DashboardTotais {
            consumo_qtd: resumo.qtd,
            consumo_custo: resumo.custo,
            ..self.totais.clone()
        }
    }

    /// Consumption summary over the cached movements, priced at each
    /// product's average cost
    pub fn consumo(&self, periodo: PeriodoConsumo) -> ResumoConsumo {
        resumo_consumo(&self.movimentos, periodo, |sku| {
            self.racoes
                .iter()
                .find(|r| r.racao.sku == sku)
                .and_then(|r| r.custo_medio)
        })
    }

    fn nome_por_sku(&self, sku: &str) -> Option<&str> {
        self.racoes
            .iter()
            .find(|r| r.racao.sku == sku)
            .map(|r| r.racao.nome.as_str())
    }
}

/// Inclusive first-to-last-day period of the month `data` falls in
pub fn periodo_do_mes(data: NaiveDate) -> PeriodoConsumo {
    let primeiro = data.with_day(1).unwrap_or(data);
    let (ano, mes) = if data.month() == 12 {
        (data.year() + 1, 1)
    } else {
        (data.year(), data.month() + 1)
    };
    let ultimo = NaiveDate::from_ymd_opt(ano, mes, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(data);

    PeriodoConsumo {
        de: Some(primeiro),
        ate: Some(ultimo),
    }
}
