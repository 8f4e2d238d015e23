//! WebAssembly module for the Rações Stock browser client
//!
//! Provides client-side computation for:
//! - The cached store every table renders from
//! - Client-side filtering and the consumption summary
//! - pt-PT money and date formatting
//! - Form validation matching the API rules

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

pub mod format;
pub mod sample;
pub mod store;

use store::{periodo_do_mes, FiltroMovimentos, Store};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Client-side store mirroring the API data, driven from JavaScript
#[wasm_bindgen]
pub struct ClientStore {
    store: Store,
}

#[wasm_bindgen]
impl ClientStore {
    /// Empty store; fill it from the API or with `load_sample`
    #[wasm_bindgen(constructor)]
    pub fn new() -> ClientStore {
        ClientStore {
            store: Store::new(),
        }
    }

    /// Replace the cache with the bundled sample dataset
    pub fn load_sample(&mut self) {
        web_sys::console::warn_1(&JsValue::from_str(
            "Falha ao carregar API, usando dados locais",
        ));
        self.store = Store::com_amostra();

        let mut totais = self.store.totais().clone();
        totais.last_updated = Some(String::from(js_sys::Date::new_0().to_iso_string()));
        self.store.set_totais(totais);
    }

    /// Load the product list from an API response
    pub fn set_racoes(&mut self, json: &str) -> Result<(), JsValue> {
        let racoes: Vec<RacaoComMetricas> = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid racoes JSON: {}", e)))?;
        self.store.set_racoes(racoes);
        Ok(())
    }

    /// Load the movement list from an API response
    pub fn set_movimentos(&mut self, json: &str) -> Result<(), JsValue> {
        let movimentos: Vec<Movimento> = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid movimentos JSON: {}", e)))?;
        self.store.set_movimentos(movimentos);
        Ok(())
    }

    /// Load the dashboard totals from an API response
    pub fn set_dashboard(&mut self, json: &str) -> Result<(), JsValue> {
        let totais: DashboardTotais = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid dashboard JSON: {}", e)))?;
        self.store.set_totais(totais);
        Ok(())
    }

    /// Set the product table text filter
    pub fn set_racao_filter(&mut self, texto: &str) {
        self.store.set_filtro_racoes(texto);
    }

    /// Set the movement table filters,
    /// e.g. `{"texto":"fish","tipo":"SAÍDA","de":"2024-01-01"}`
    pub fn set_movimento_filter(&mut self, json: &str) -> Result<(), JsValue> {
        let filtro: FiltroMovimentos = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid filter JSON: {}", e)))?;
        self.store.set_filtro_movimentos(filtro);
        Ok(())
    }

    /// Filtered product rows as JSON
    pub fn racoes(&self) -> Result<String, JsValue> {
        to_json(&self.store.racoes_filtradas())
    }

    /// Filtered movement rows as JSON
    pub fn movimentos(&self) -> Result<String, JsValue> {
        to_json(&self.store.movimentos_filtrados())
    }

    /// Active products ordered by name, for the stock table
    pub fn stock(&self) -> Result<String, JsValue> {
        to_json(&self.store.stock_ativo())
    }

    /// Products below their minimum, for the restock table
    pub fn restock(&self) -> Result<String, JsValue> {
        to_json(&self.store.para_repor())
    }

    /// Dashboard totals as JSON, with the consumption summary recomputed
    /// over the cached movements for the given period
    pub fn dashboard(&self, periodo_json: &str) -> Result<String, JsValue> {
        let periodo: PeriodoConsumo = if periodo_json.trim().is_empty() {
            PeriodoConsumo::default()
        } else {
            serde_json::from_str(periodo_json)
                .map_err(|e| JsValue::from_str(&format!("Invalid period JSON: {}", e)))?
        };
        to_json(&self.store.totais_com_consumo(periodo))
    }
}

/// Validate a product payload, returning the first error message
#[wasm_bindgen]
pub fn validate_racao(payload_json: &str) -> Option<String> {
    let payload: RacaoPayload = match serde_json::from_str(payload_json) {
        Ok(payload) => payload,
        Err(e) => return Some(format!("Invalid JSON: {}", e)),
    };
    validar_racao(&payload).err().map(|e| e.to_string())
}

/// Validate a movement payload, returning the first error message
#[wasm_bindgen]
pub fn validate_movimento(payload_json: &str) -> Option<String> {
    let payload: MovimentoPayload = match serde_json::from_str(payload_json) {
        Ok(payload) => payload,
        Err(e) => return Some(format!("Invalid JSON: {}", e)),
    };
    validar_movimento(&payload).err().map(|e| e.to_string())
}

/// Format a numeric value as pt-PT euros, accepting "29.50" or "29,50"
#[wasm_bindgen]
pub fn format_euro(valor: &str) -> String {
    let decimal = NumericInput::from(valor).to_decimal().unwrap_or(Decimal::ZERO);
    format::euro(decimal)
}

/// Format an ISO date or timestamp as DD/MM/YYYY
#[wasm_bindgen]
pub fn format_date(iso: &str) -> String {
    format::data_de_iso(iso)
}

/// Period covering the current month, for the dashboard date inputs
#[wasm_bindgen]
pub fn current_month_period() -> Result<String, JsValue> {
    let hoje = js_sys::Date::new_0();
    let dia = NaiveDate::from_ymd_opt(
        hoje.get_full_year() as i32,
        hoje.get_month() + 1,
        hoje.get_date(),
    )
    .unwrap_or_default();
    to_json(&periodo_do_mes(dia))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}
