use std::collections::HashMap;

use anyhow::Result;
use diesel::prelude::*;
use diesel::sql_types::Text;
use mg_core::catalog::Model;
use mg_core::ids::ModelId;
use mg_core::ports::ModelRepositoryPort;

use crate::db::models::{ModelRow, NewModelRows, UsernameRow};
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::{t_media_file, t_model, t_post, t_username};

diesel::define_sql_function!(fn lower(x: Text) -> Text);

pub struct DieselModelRepository<E, IM, RM> {
    executor: E,
    insert_mapper: IM,
    row_mapper: RM,
}

impl<E, IM, RM> DieselModelRepository<E, IM, RM> {
    pub fn new(executor: E, insert_mapper: IM, row_mapper: RM) -> Self {
        Self {
            executor,
            insert_mapper,
            row_mapper,
        }
    }
}

/// Usernames of the given models, grouped by model id, primary first.
fn load_usernames(
    conn: &mut SqliteConnection,
    model_ids: &[String],
) -> QueryResult<HashMap<String, Vec<UsernameRow>>> {
    let rows = t_username::table
        .filter(t_username::model_id.eq_any(model_ids))
        .order((t_username::is_primary.desc(), t_username::username.asc()))
        .load::<UsernameRow>(conn)?;

    let mut grouped: HashMap<String, Vec<UsernameRow>> = HashMap::new();
    for row in rows {
        grouped.entry(row.model_id.clone()).or_default().push(row);
    }
    Ok(grouped)
}

impl<E, IM, RM> DieselModelRepository<E, IM, RM>
where
    RM: RowMapper<(ModelRow, Vec<UsernameRow>), Model>,
{
    fn hydrate(&self, conn: &mut SqliteConnection, rows: Vec<ModelRow>) -> Result<Vec<Model>> {
        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let mut usernames = load_usernames(conn, &ids)?;

        rows.into_iter()
            .map(|row| {
                let handles = usernames.remove(&row.id).unwrap_or_default();
                self.row_mapper.to_domain(&(row, handles))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl<E, IM, RM> ModelRepositoryPort for DieselModelRepository<E, IM, RM>
where
    E: DbExecutor,
    IM: InsertMapper<Model, NewModelRows>,
    RM: RowMapper<(ModelRow, Vec<UsernameRow>), Model>,
{
    async fn insert_model(&self, model: &Model) -> Result<()> {
        let rows = self.insert_mapper.to_row(model)?;

        self.executor.run(|conn| {
            conn.transaction::<_, anyhow::Error, _>(|conn| {
                diesel::insert_into(t_model::table)
                    .values(&rows.model)
                    .execute(conn)?;

                diesel::insert_into(t_username::table)
                    .values(&rows.usernames)
                    .execute(conn)?;

                Ok(())
            })
        })
    }

    async fn get_model(&self, model_id: &ModelId) -> Result<Option<Model>> {
        self.executor.run(|conn| {
            let row = t_model::table
                .filter(t_model::id.eq(model_id.as_str()))
                .first::<ModelRow>(conn)
                .optional()?;

            match row {
                Some(row) => Ok(self.hydrate(conn, vec![row])?.pop()),
                None => Ok(None),
            }
        })
    }

    async fn find_by_primary_username(&self, username: &str) -> Result<Option<Model>> {
        let needle = username.trim().to_lowercase();

        self.executor.run(|conn| {
            let row = t_model::table
                .inner_join(t_username::table)
                .filter(t_username::is_primary.eq(true))
                .filter(lower(t_username::username).eq(&needle))
                .select(t_model::all_columns)
                .first::<ModelRow>(conn)
                .optional()?;

            match row {
                Some(row) => Ok(self.hydrate(conn, vec![row])?.pop()),
                None => Ok(None),
            }
        })
    }

    async fn find_existing_usernames(&self, candidates: &[String]) -> Result<Vec<String>> {
        let lowered: Vec<String> = candidates.iter().map(|c| c.to_lowercase()).collect();

        self.executor.run(|conn| {
            let existing = t_username::table
                .filter(lower(t_username::username).eq_any(&lowered))
                .select(t_username::username)
                .load::<String>(conn)?;
            Ok(existing)
        })
    }

    async fn list_models(&self) -> Result<Vec<Model>> {
        self.executor.run(|conn| {
            let rows = t_model::table
                .order(t_model::created_at.desc())
                .load::<ModelRow>(conn)?;
            self.hydrate(conn, rows)
        })
    }

    async fn clear_catalog(&self) -> Result<()> {
        self.executor.run(|conn| {
            conn.transaction::<_, anyhow::Error, _>(|conn| {
                let media = diesel::delete(t_media_file::table).execute(conn)?;
                let posts = diesel::delete(t_post::table).execute(conn)?;
                let usernames = diesel::delete(t_username::table).execute(conn)?;
                let models = diesel::delete(t_model::table).execute(conn)?;

                tracing::info!(media, posts, usernames, models, "Catalog cleared");
                Ok(())
            })
        })
    }
}
