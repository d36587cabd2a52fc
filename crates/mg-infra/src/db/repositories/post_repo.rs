use std::collections::HashMap;

use anyhow::Result;
use diesel::prelude::*;
use mg_core::catalog::Post;
use mg_core::ids::ModelId;
use mg_core::ports::PostRepositoryPort;

use crate::db::models::{MediaFileRow, NewPostRows, PostRow};
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::{t_media_file, t_post};

pub struct DieselPostRepository<E, IM, RM> {
    executor: E,
    insert_mapper: IM,
    row_mapper: RM,
}

impl<E, IM, RM> DieselPostRepository<E, IM, RM> {
    pub fn new(executor: E, insert_mapper: IM, row_mapper: RM) -> Self {
        Self {
            executor,
            insert_mapper,
            row_mapper,
        }
    }
}

fn load_media(
    conn: &mut SqliteConnection,
    post_ids: &[String],
) -> QueryResult<HashMap<String, Vec<MediaFileRow>>> {
    let rows = t_media_file::table
        .filter(t_media_file::post_id.eq_any(post_ids))
        .order((t_media_file::post_id.asc(), t_media_file::position.asc()))
        .load::<MediaFileRow>(conn)?;

    let mut grouped: HashMap<String, Vec<MediaFileRow>> = HashMap::new();
    for row in rows {
        grouped.entry(row.post_id.clone()).or_default().push(row);
    }
    Ok(grouped)
}

impl<E, IM, RM> DieselPostRepository<E, IM, RM>
where
    RM: RowMapper<(PostRow, Vec<MediaFileRow>), Post>,
{
    fn hydrate(&self, conn: &mut SqliteConnection, rows: Vec<PostRow>) -> Result<Vec<Post>> {
        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let mut media = load_media(conn, &ids)?;

        rows.into_iter()
            .map(|row| {
                let files = media.remove(&row.id).unwrap_or_default();
                self.row_mapper.to_domain(&(row, files))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl<E, IM, RM> PostRepositoryPort for DieselPostRepository<E, IM, RM>
where
    E: DbExecutor,
    IM: InsertMapper<Post, NewPostRows>,
    RM: RowMapper<(PostRow, Vec<MediaFileRow>), Post>,
{
    async fn insert_post(&self, post: &Post) -> Result<()> {
        let rows = self.insert_mapper.to_row(post)?;

        self.executor.run(|conn| {
            conn.transaction::<_, anyhow::Error, _>(|conn| {
                diesel::insert_into(t_post::table)
                    .values(&rows.post)
                    .execute(conn)?;

                if !rows.media.is_empty() {
                    diesel::insert_into(t_media_file::table)
                        .values(&rows.media)
                        .execute(conn)?;
                }

                Ok(())
            })
        })
    }

    async fn count_posts(&self) -> Result<usize> {
        self.executor.run(|conn| {
            let count: i64 = t_post::table.count().get_result(conn)?;
            Ok(count as usize)
        })
    }

    async fn count_posts_for_model(&self, model_id: &ModelId) -> Result<usize> {
        self.executor.run(|conn| {
            let count: i64 = t_post::table
                .filter(t_post::model_id.eq(model_id.as_str()))
                .count()
                .get_result(conn)?;
            Ok(count as usize)
        })
    }

    async fn list_post_counts(&self, model_id: &ModelId) -> Result<Vec<u32>> {
        self.executor.run(|conn| {
            let counts = t_post::table
                .filter(t_post::model_id.eq(model_id.as_str()))
                .order(t_post::post_count.desc())
                .select(t_post::post_count)
                .load::<i32>(conn)?;

            Ok(counts.into_iter().map(|c| c.max(0) as u32).collect())
        })
    }

    async fn find_by_post_count(
        &self,
        model_id: &ModelId,
        post_count: u32,
    ) -> Result<Option<Post>> {
        let Ok(post_count) = i32::try_from(post_count) else {
            return Ok(None);
        };

        self.executor.run(|conn| {
            let row = t_post::table
                .filter(t_post::model_id.eq(model_id.as_str()))
                .filter(t_post::post_count.eq(post_count))
                .first::<PostRow>(conn)
                .optional()?;

            match row {
                Some(row) => Ok(self.hydrate(conn, vec![row])?.pop()),
                None => Ok(None),
            }
        })
    }

    async fn list_recent_posts(&self, limit: usize, offset: usize) -> Result<Vec<Post>> {
        self.executor.run(|conn| {
            let rows = t_post::table
                .order((t_post::created_at.desc(), t_post::post_count.desc()))
                .limit(limit as i64)
                .offset(offset as i64)
                .load::<PostRow>(conn)?;
            self.hydrate(conn, rows)
        })
    }

    async fn list_model_posts(
        &self,
        model_id: &ModelId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Post>> {
        self.executor.run(|conn| {
            let rows = t_post::table
                .filter(t_post::model_id.eq(model_id.as_str()))
                .order(t_post::post_count.desc())
                .limit(limit as i64)
                .offset(offset as i64)
                .load::<PostRow>(conn)?;
            self.hydrate(conn, rows)
        })
    }
}
