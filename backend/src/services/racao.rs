//! Product service: CRUD plus the movement-derived stock metrics

use rust_decimal::Decimal;
use sqlx::PgPool;

use shared::{Ativo, MovimentoTotais, NovaRacao, Racao, RacaoComMetricas};

use crate::error::{AppError, AppResult};

/// Product service
#[derive(Clone)]
pub struct RacaoService {
    db: PgPool,
}

/// Row shape of the metrics listing query: catalogue columns plus the
/// movement sums each derived metric is computed from
#[derive(Debug, sqlx::FromRow)]
struct RacaoRow {
    id: i64,
    sku: String,
    nome: String,
    marca: String,
    variante: Option<String>,
    peso_kg: Decimal,
    fornecedor: Option<String>,
    preco_compra: Option<Decimal>,
    preco_venda: Decimal,
    stock_minimo: i32,
    ativo: String,
    entradas: i64,
    saidas: i64,
    qtd_comprada: i64,
    valor_comprado: Decimal,
}

impl RacaoRow {
    fn into_metricas(self) -> RacaoComMetricas {
        let totais = MovimentoTotais {
            entradas: self.entradas,
            saidas: self.saidas,
            qtd_comprada: self.qtd_comprada,
            valor_comprado: self.valor_comprado,
        };
        let alerta = totais.alerta(self.stock_minimo);
        RacaoComMetricas {
            racao: Racao {
                id: self.id,
                sku: self.sku,
                nome: self.nome,
                marca: self.marca,
                variante: self.variante,
                peso_kg: self.peso_kg,
                fornecedor: self.fornecedor,
                preco_compra: self.preco_compra,
                preco_venda: self.preco_venda,
                stock_minimo: self.stock_minimo,
                // CHECK constraint keeps the column inside the enum
                ativo: Ativo::parse(&self.ativo).unwrap_or(Ativo::Sim),
            },
            stock_atual: totais.stock_atual(),
            alerta,
            custo_medio: totais.custo_medio(),
        }
    }
}

impl RacaoService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List every product with its derived metrics, ordered by name
    pub async fn list(&self) -> AppResult<Vec<RacaoComMetricas>> {
        let rows = sqlx::query_as::<_, RacaoRow>(
            r#"
            SELECT r.id, r.sku, r.nome, r.marca, r.variante, r.peso_kg, r.fornecedor,
                   r.preco_compra, r.preco_venda, r.stock_minimo, r.ativo,
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
            ORDER BY r.nome ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(RacaoRow::into_metricas).collect())
    }

    /// Get one product with its derived metrics
    pub async fn get(&self, id: i64) -> AppResult<RacaoComMetricas> {
        let row = sqlx::query_as::<_, RacaoRow>(
            r#"
            SELECT r.id, r.sku, r.nome, r.marca, r.variante, r.peso_kg, r.fornecedor,
                   r.preco_compra, r.preco_venda, r.stock_minimo, r.ativo,
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
            WHERE r.id = $1
            GROUP BY r.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ração não encontrada".to_string()))?;

        Ok(row.into_metricas())
    }

    /// Create a product
    pub async fn create(&self, nova: NovaRacao) -> AppResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO racoes (sku, nome, marca, variante, peso_kg, fornecedor,
                                preco_compra, preco_venda, stock_minimo, ativo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&nova.sku)
        .bind(&nova.nome)
        .bind(&nova.marca)
        .bind(&nova.variante)
        .bind(nova.peso_kg)
        .bind(&nova.fornecedor)
        .bind(nova.preco_compra)
        .bind(nova.preco_venda)
        .bind(nova.stock_minimo)
        .bind(nova.ativo.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::Storage {
            message: "Nao foi possivel criar a racao".to_string(),
            source: e,
        })?;

        Ok(id)
    }

    /// Update a product
    pub async fn update(&self, id: i64, nova: NovaRacao) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE racoes
            SET sku = $1, nome = $2, marca = $3, variante = $4, peso_kg = $5,
                fornecedor = $6, preco_compra = $7, preco_venda = $8,
                stock_minimo = $9, ativo = $10
            WHERE id = $11
            "#,
        )
        .bind(&nova.sku)
        .bind(&nova.nome)
        .bind(&nova.marca)
        .bind(&nova.variante)
        .bind(nova.peso_kg)
        .bind(&nova.fornecedor)
        .bind(nova.preco_compra)
        .bind(nova.preco_venda)
        .bind(nova.stock_minimo)
        .bind(nova.ativo.as_str())
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(|e| AppError::Storage {
            message: "Nao foi possivel atualizar a racao".to_string(),
            source: e,
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ração não encontrada".to_string()));
        }

        Ok(())
    }

    /// Delete a product. The movements table references products with
    /// ON DELETE RESTRICT, so a referenced product fails here.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM racoes WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| AppError::Storage {
                message: "Nao foi possivel apagar a racao. Verifica se existem movimentos associados."
                    .to_string(),
                source: e,
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ração não encontrada".to_string()));
        }

        Ok(())
    }
}
