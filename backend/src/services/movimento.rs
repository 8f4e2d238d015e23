//! Stock movement service: the joined listing plus CRUD
//!
//! Movements reference products by id in storage but travel over the wire
//! with the product SKU, so writes resolve the SKU first and reads join it
//! back in.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use shared::{Motivo, Movimento, NovoMovimento, Tipo};

use crate::error::{AppError, AppResult};

/// Movement service
#[derive(Clone)]
pub struct MovimentoService {
    db: PgPool,
}

/// Row shape of the movement listing query, with the SKU joined in
#[derive(Debug, sqlx::FromRow)]
struct MovimentoRow {
    id: i64,
    data_movimento: NaiveDate,
    tipo: String,
    motivo: String,
    sku: String,
    qtd_sacos: i32,
    custo_unitario: Option<Decimal>,
    preco_venda_unitario: Option<Decimal>,
    observacoes: Option<String>,
}

impl MovimentoRow {
    fn into_movimento(self) -> Movimento {
        Movimento {
            id: self.id,
            data_movimento: self.data_movimento,
            // CHECK constraints keep both columns inside the enums
            tipo: Tipo::parse(&self.tipo).unwrap_or(Tipo::Entrada),
            motivo: Motivo::parse(&self.motivo).unwrap_or(Motivo::Compra),
            sku: self.sku,
            qtd_sacos: self.qtd_sacos,
            custo_unitario: self.custo_unitario,
            preco_venda_unitario: self.preco_venda_unitario,
            observacoes: self.observacoes,
        }
    }
}

impl MovimentoService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the newest movements first, capped at 200 rows
    pub async fn list(&self) -> AppResult<Vec<Movimento>> {
        let rows = sqlx::query_as::<_, MovimentoRow>(
            r#"
            SELECT m.id, m.data_movimento, m.tipo, m.motivo, r.sku, m.qtd_sacos,
                   m.custo_unitario, m.preco_venda_unitario, m.observacoes
            FROM movimentos m
            JOIN racoes r ON r.id = m.racao_id
            ORDER BY m.data_movimento DESC, m.id DESC
            LIMIT 200
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(MovimentoRow::into_movimento).collect())
    }

    /// Get one movement by id
    pub async fn get(&self, id: i64) -> AppResult<Movimento> {
        let row = sqlx::query_as::<_, MovimentoRow>(
            r#"
            SELECT m.id, m.data_movimento, m.tipo, m.motivo, r.sku, m.qtd_sacos,
                   m.custo_unitario, m.preco_venda_unitario, m.observacoes
            FROM movimentos m
            JOIN racoes r ON r.id = m.racao_id
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Movimento nao encontrado".to_string()))?;

        Ok(row.into_movimento())
    }

    /// Create a movement
    pub async fn create(&self, novo: NovoMovimento) -> AppResult<i64> {
        let racao_id = self.resolver_sku(&novo.sku).await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO movimentos (data_movimento, tipo, motivo, racao_id, qtd_sacos,
                                    custo_unitario, preco_venda_unitario, observacoes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(novo.data)
        .bind(novo.tipo.as_str())
        .bind(novo.motivo.as_str())
        .bind(racao_id)
        .bind(novo.qtd_sacos)
        .bind(novo.custo_unitario)
        .bind(novo.preco_venda_unitario)
        .bind(&novo.observacoes)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::Storage {
            message: "Nao foi possivel criar o movimento".to_string(),
            source: e,
        })?;

        Ok(id)
    }

    /// Update a movement
    pub async fn update(&self, id: i64, novo: NovoMovimento) -> AppResult<()> {
        let racao_id = self.resolver_sku(&novo.sku).await?;

        let result = sqlx::query(
            r#"
            UPDATE movimentos
            SET data_movimento = $1, tipo = $2, motivo = $3, racao_id = $4,
                qtd_sacos = $5, custo_unitario = $6, preco_venda_unitario = $7,
                observacoes = $8
            WHERE id = $9
            "#,
        )
        .bind(novo.data)
        .bind(novo.tipo.as_str())
        .bind(novo.motivo.as_str())
        .bind(racao_id)
        .bind(novo.qtd_sacos)
        .bind(novo.custo_unitario)
        .bind(novo.preco_venda_unitario)
        .bind(&novo.observacoes)
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(|e| AppError::Storage {
            message: "Nao foi possivel atualizar o movimento".to_string(),
            source: e,
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Movimento nao encontrado".to_string()));
        }

        Ok(())
    }

    /// Delete a movement
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM movimentos WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| AppError::Storage {
                message: "Nao foi possivel apagar o movimento".to_string(),
                source: e,
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Movimento nao encontrado".to_string()));
        }

        Ok(())
    }

    /// Resolve a SKU to the product id it belongs to
    async fn resolver_sku(&self, sku: &str) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM racoes WHERE sku = $1")
            .bind(sku)
            .fetch_optional(&self.db)
            .await?
            .ok_or(AppError::SkuInvalido)
    }
}
