//! Input validation for product and movement payloads
//!
//! Turns the loosely-typed JSON the forms submit into validated structs
//! before any storage code runs. The error messages are part of the wire
//! contract and are surfaced verbatim by the browser client.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Ativo, Motivo, MovimentoPayload, NovaRacao, NovoMovimento, RacaoPayload, Tipo};
use crate::types::NumericInput;

/// Why a payload was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Campos obrigatorios em falta")]
    CamposEmFalta { fields: Vec<String> },

    #[error("Campo invalido: {0}")]
    CampoInvalido(&'static str),

    #[error("Valor numerico invalido")]
    NumeroInvalido,

    #[error("Quantidade invalida")]
    QuantidadeInvalida,

    #[error("Custo unitario obrigatorio para compras")]
    CustoObrigatorio,

    #[error("Preco de venda obrigatorio para vendas")]
    PrecoVendaObrigatorio,
}

/// Parse an optional numeric input, treating absent values and the empty
/// string as "not provided".
pub fn numero_opcional(value: Option<&NumericInput>) -> Result<Option<Decimal>, ValidationError> {
    match value {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) => v.to_decimal().map(Some).ok_or(ValidationError::NumeroInvalido),
    }
}

/// Parse a numeric input the required-field check already guaranteed.
pub fn numero_obrigatorio(value: Option<&NumericInput>) -> Result<Decimal, ValidationError> {
    numero_opcional(value)?.ok_or(ValidationError::NumeroInvalido)
}

/// Parse an integer input. Fractional text is truncated, matching the
/// int cast the forms always relied on.
pub fn inteiro_obrigatorio(value: Option<&NumericInput>) -> Result<i32, ValidationError> {
    let n = numero_obrigatorio(value)?;
    n.trunc().to_i32().ok_or(ValidationError::NumeroInvalido)
}

fn texto_em_falta(value: Option<&String>) -> bool {
    match value {
        None => true,
        Some(s) => s.is_empty(),
    }
}

fn numero_em_falta(value: Option<&NumericInput>) -> bool {
    match value {
        None => true,
        Some(v) => v.is_empty(),
    }
}

/// Validate a product payload into storage-ready data.
///
/// Checks run in a fixed order: required fields, the ativo enum, then each
/// numeric field.
pub fn validar_racao(payload: &RacaoPayload) -> Result<NovaRacao, ValidationError> {
    let mut fields = Vec::new();
    if texto_em_falta(payload.sku.as_ref()) {
        fields.push("sku".to_string());
    }
    if texto_em_falta(payload.nome.as_ref()) {
        fields.push("nome".to_string());
    }
    if texto_em_falta(payload.marca.as_ref()) {
        fields.push("marca".to_string());
    }
    if numero_em_falta(payload.peso_kg.as_ref()) {
        fields.push("pesoKg".to_string());
    }
    if numero_em_falta(payload.preco_venda.as_ref()) {
        fields.push("precoVenda".to_string());
    }
    if numero_em_falta(payload.stock_min.as_ref()) {
        fields.push("stockMin".to_string());
    }
    if texto_em_falta(payload.ativo.as_ref()) {
        fields.push("ativo".to_string());
    }
    if !fields.is_empty() {
        return Err(ValidationError::CamposEmFalta { fields });
    }

    let ativo = payload
        .ativo
        .as_deref()
        .and_then(Ativo::parse)
        .ok_or(ValidationError::CampoInvalido("ativo"))?;

    let peso_kg = numero_obrigatorio(payload.peso_kg.as_ref())?;
    let preco_compra = numero_opcional(payload.preco_compra.as_ref())?;
    let preco_venda = numero_obrigatorio(payload.preco_venda.as_ref())?;
    let stock_minimo = inteiro_obrigatorio(payload.stock_min.as_ref())?;

    Ok(NovaRacao {
        sku: payload.sku.clone().unwrap_or_default(),
        nome: payload.nome.clone().unwrap_or_default(),
        marca: payload.marca.clone().unwrap_or_default(),
        variante: payload.variante.clone(),
        peso_kg,
        fornecedor: payload.fornecedor.clone(),
        preco_compra,
        preco_venda,
        stock_minimo,
        ativo,
    })
}

/// Validate a movement payload into storage-ready data.
///
/// Order: required fields, tipo, motivo, quantity, the optional money
/// fields, the conditional cost/price rules, then the date itself. SKU
/// resolution happens in the storage layer.
pub fn validar_movimento(payload: &MovimentoPayload) -> Result<NovoMovimento, ValidationError> {
    let mut fields = Vec::new();
    if texto_em_falta(payload.data.as_ref()) {
        fields.push("data".to_string());
    }
    if texto_em_falta(payload.tipo.as_ref()) {
        fields.push("tipo".to_string());
    }
    if texto_em_falta(payload.motivo.as_ref()) {
        fields.push("motivo".to_string());
    }
    if texto_em_falta(payload.sku.as_ref()) {
        fields.push("sku".to_string());
    }
    if numero_em_falta(payload.qtd.as_ref()) {
        fields.push("qtd".to_string());
    }
    if !fields.is_empty() {
        return Err(ValidationError::CamposEmFalta { fields });
    }

    let tipo = payload
        .tipo
        .as_deref()
        .and_then(Tipo::parse)
        .ok_or(ValidationError::CampoInvalido("tipo"))?;
    let motivo = payload
        .motivo
        .as_deref()
        .and_then(Motivo::parse)
        .ok_or(ValidationError::CampoInvalido("motivo"))?;

    let qtd_sacos = inteiro_obrigatorio(payload.qtd.as_ref())?;
    if qtd_sacos <= 0 {
        return Err(ValidationError::QuantidadeInvalida);
    }

    let custo_unitario = numero_opcional(payload.custo.as_ref())?;
    let preco_venda_unitario = numero_opcional(payload.preco_venda.as_ref())?;

    if tipo == Tipo::Entrada && motivo == Motivo::Compra && custo_unitario.is_none() {
        return Err(ValidationError::CustoObrigatorio);
    }
    if tipo == Tipo::Saida && motivo == Motivo::Venda && preco_venda_unitario.is_none() {
        return Err(ValidationError::PrecoVendaObrigatorio);
    }

    let data = payload.data.as_deref().unwrap_or_default();
    let data = NaiveDate::parse_from_str(data, "%Y-%m-%d")
        .map_err(|_| ValidationError::CampoInvalido("data"))?;

    Ok(NovoMovimento {
        data,
        tipo,
        motivo,
        sku: payload.sku.clone().unwrap_or_default(),
        qtd_sacos,
        custo_unitario,
        preco_venda_unitario,
        observacoes: payload.observacoes.clone(),
    })
}
