//! Stock movement models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::NumericInput;

/// A stock movement joined with its product's SKU, as returned by the
/// listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movimento {
    pub id: i64,
    pub data_movimento: NaiveDate,
    pub tipo: Tipo,
    pub motivo: Motivo,
    pub sku: String,
    pub qtd_sacos: i32,
    pub custo_unitario: Option<Decimal>,
    pub preco_venda_unitario: Option<Decimal>,
    pub observacoes: Option<String>,
}

/// Movement direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tipo {
    #[serde(rename = "ENTRADA")]
    Entrada,
    #[serde(rename = "SAÍDA")]
    Saida,
}

impl Tipo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tipo::Entrada => "ENTRADA",
            Tipo::Saida => "SAÍDA",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ENTRADA" => Some(Tipo::Entrada),
            "SAÍDA" => Some(Tipo::Saida),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tipo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Movement reason
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Motivo {
    #[serde(rename = "COMPRA")]
    Compra,
    #[serde(rename = "VENDA")]
    Venda,
    #[serde(rename = "CONSUMO_CASA")]
    ConsumoCasa,
    #[serde(rename = "AJUSTE")]
    Ajuste,
}

impl Motivo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Motivo::Compra => "COMPRA",
            Motivo::Venda => "VENDA",
            Motivo::ConsumoCasa => "CONSUMO_CASA",
            Motivo::Ajuste => "AJUSTE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "COMPRA" => Some(Motivo::Compra),
            "VENDA" => Some(Motivo::Venda),
            "CONSUMO_CASA" => Some(Motivo::ConsumoCasa),
            "AJUSTE" => Some(Motivo::Ajuste),
            _ => None,
        }
    }
}

impl std::fmt::Display for Motivo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Create/update payload for a movement, in the field names the browser
/// form submits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovimentoPayload {
    pub data: Option<String>,
    pub tipo: Option<String>,
    pub motivo: Option<String>,
    pub sku: Option<String>,
    pub qtd: Option<NumericInput>,
    pub custo: Option<NumericInput>,
    #[serde(rename = "precoVenda")]
    pub preco_venda: Option<NumericInput>,
    pub observacoes: Option<String>,
}

/// A validated movement payload, ready for storage once the SKU resolves
#[derive(Debug, Clone, PartialEq)]
pub struct NovoMovimento {
    pub data: NaiveDate,
    pub tipo: Tipo,
    pub motivo: Motivo,
    pub sku: String,
    pub qtd_sacos: i32,
    pub custo_unitario: Option<Decimal>,
    pub preco_venda_unitario: Option<Decimal>,
    pub observacoes: Option<String>,
}
