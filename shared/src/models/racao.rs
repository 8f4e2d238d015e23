//! Product ("ração") models and the derived stock metrics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::NumericInput;

use super::{Motivo, Movimento, Tipo};

/// A stocked pet-food product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Racao {
    pub id: i64,
    pub sku: String,
    pub nome: String,
    pub marca: String,
    pub variante: Option<String>,
    pub peso_kg: Decimal,
    pub fornecedor: Option<String>,
    pub preco_compra: Option<Decimal>,
    pub preco_venda: Decimal,
    pub stock_minimo: i32,
    pub ativo: Ativo,
}

/// A product together with its movement-derived metrics, as returned by the
/// listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RacaoComMetricas {
    #[serde(flatten)]
    pub racao: Racao,
    pub stock_atual: i64,
    pub alerta: Alerta,
    pub custo_medio: Option<Decimal>,
}

/// Whether a product is still carried
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Ativo {
    #[serde(rename = "SIM")]
    Sim,
    #[serde(rename = "NÃO")]
    Nao,
}

impl Ativo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ativo::Sim => "SIM",
            Ativo::Nao => "NÃO",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SIM" => Some(Ativo::Sim),
            "NÃO" => Some(Ativo::Nao),
            _ => None,
        }
    }
}

impl std::fmt::Display for Ativo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Restock alert state derived from stock against the minimum threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Alerta {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "BAIXO")]
    Baixo,
}

impl Alerta {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alerta::Ok => "OK",
            Alerta::Baixo => "BAIXO",
        }
    }
}

impl std::fmt::Display for Alerta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Create/update payload for a product, in the field names the browser
/// form submits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RacaoPayload {
    pub sku: Option<String>,
    pub nome: Option<String>,
    pub marca: Option<String>,
    pub variante: Option<String>,
    #[serde(rename = "pesoKg")]
    pub peso_kg: Option<NumericInput>,
    pub fornecedor: Option<String>,
    #[serde(rename = "precoCompra")]
    pub preco_compra: Option<NumericInput>,
    #[serde(rename = "precoVenda")]
    pub preco_venda: Option<NumericInput>,
    #[serde(rename = "stockMin")]
    pub stock_min: Option<NumericInput>,
    pub ativo: Option<String>,
}

/// A validated product payload, ready for storage
#[derive(Debug, Clone, PartialEq)]
pub struct NovaRacao {
    pub sku: String,
    pub nome: String,
    pub marca: String,
    pub variante: Option<String>,
    pub peso_kg: Decimal,
    pub fornecedor: Option<String>,
    pub preco_compra: Option<Decimal>,
    pub preco_venda: Decimal,
    pub stock_minimo: i32,
    pub ativo: Ativo,
}

/// Signed movement totals for one product, the base of every derived metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovimentoTotais {
    /// Total inbound bags
    pub entradas: i64,
    /// Total outbound bags
    pub saidas: i64,
    /// Bags bought through (ENTRADA, COMPRA) movements carrying a unit cost
    pub qtd_comprada: i64,
    /// Money spent on those bags
    pub valor_comprado: Decimal,
}

impl MovimentoTotais {
    /// Accumulate totals from a product's movements.
    pub fn from_movimentos<'a, I>(movimentos: I) -> Self
    where
        I: IntoIterator<Item = &'a Movimento>,
    {
        let mut totais = MovimentoTotais::default();
        for m in movimentos {
            let qtd = i64::from(m.qtd_sacos);
            match m.tipo {
                Tipo::Entrada => totais.entradas += qtd,
                Tipo::Saida => totais.saidas += qtd,
            }
            if m.tipo == Tipo::Entrada && m.motivo == Motivo::Compra {
                if let Some(custo) = m.custo_unitario {
                    totais.qtd_comprada += qtd;
                    totais.valor_comprado += Decimal::from(m.qtd_sacos) * custo;
                }
            }
        }
        totais
    }

    /// Current stock as the signed sum of movements. Oversold data goes
    /// negative rather than clamping at zero.
    pub fn stock_atual(&self) -> i64 {
        self.entradas - self.saidas
    }

    /// Cumulative weighted average purchase cost, absent without purchases.
    pub fn custo_medio(&self) -> Option<Decimal> {
        if self.qtd_comprada > 0 {
            Some(self.valor_comprado / Decimal::from(self.qtd_comprada))
        } else {
            None
        }
    }

    /// Restock alert against the product's minimum threshold.
    pub fn alerta(&self, stock_minimo: i32) -> Alerta {
        if self.stock_atual() < i64::from(stock_minimo) {
            Alerta::Baixo
        } else {
            Alerta::Ok
        }
    }
}
