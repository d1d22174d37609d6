use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::excursion::Excursion;
use crate::utils::errors::{AppError, AppResult};

pub struct ExcursionRepository {
    pool: PgPool,
}

impl ExcursionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        nome: String,
        descricao: Option<String>,
        destino: String,
        data_saida: DateTime<Utc>,
        data_retorno: Option<DateTime<Utc>>,
        duracao: Option<String>,
        preco: Decimal,
        condicoes_pagamento: Option<String>,
        inclusoes: Option<String>,
        imagem_capa_url: Option<String>,
    ) -> AppResult<Excursion> {
        let excursion = sqlx::query_as::<_, Excursion>(
            r#"
            INSERT INTO excursoes
                (id, nome, descricao, destino, data_saida, data_retorno, duracao,
                 preco, condicoes_pagamento, inclusoes, imagem_capa_url, criado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nome)
        .bind(descricao)
        .bind(destino)
        .bind(data_saida)
        .bind(data_retorno)
        .bind(duracao)
        .bind(preco)
        .bind(condicoes_pagamento)
        .bind(inclusoes)
        .bind(imagem_capa_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(excursion)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Excursion>> {
        let excursion = sqlx::query_as::<_, Excursion>("SELECT * FROM excursoes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(excursion)
    }

    pub async fn require(&self, id: Uuid) -> AppResult<Excursion> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Excursão não encontrada".to_string()))
    }

    pub async fn list_all(&self) -> AppResult<Vec<Excursion>> {
        let excursions =
            sqlx::query_as::<_, Excursion>("SELECT * FROM excursoes ORDER BY data_saida ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(excursions)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        nome: Option<String>,
        descricao: Option<String>,
        destino: Option<String>,
        data_saida: Option<DateTime<Utc>>,
        data_retorno: Option<DateTime<Utc>>,
        duracao: Option<String>,
        preco: Option<Decimal>,
        condicoes_pagamento: Option<String>,
        inclusoes: Option<String>,
        imagem_capa_url: Option<String>,
    ) -> AppResult<Excursion> {
        let current = self.require(id).await?;

        let excursion = sqlx::query_as::<_, Excursion>(
            r#"
            UPDATE excursoes
            SET nome = $2, descricao = $3, destino = $4, data_saida = $5,
                data_retorno = $6, duracao = $7, preco = $8,
                condicoes_pagamento = $9, inclusoes = $10, imagem_capa_url = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome.unwrap_or(current.nome))
        .bind(descricao.or(current.descricao))
        .bind(destino.unwrap_or(current.destino))
        .bind(data_saida.unwrap_or(current.data_saida))
        .bind(data_retorno.or(current.data_retorno))
        .bind(duracao.or(current.duracao))
        .bind(preco.unwrap_or(current.preco))
        .bind(condicoes_pagamento.or(current.condicoes_pagamento))
        .bind(inclusoes.or(current.inclusoes))
        .bind(imagem_capa_url.or(current.imagem_capa_url))
        .fetch_one(&self.pool)
        .await?;

        Ok(excursion)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.require(id).await?;

        sqlx::query("DELETE FROM excursoes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
