use anyhow::{Context, Result};
use mg_core::catalog::{MediaFile, MediaType, Post};

use crate::db::models::{MediaFileRow, NewPostRows, PostRow};
use crate::db::ports::{InsertMapper, RowMapper};

pub struct PostRowMapper;

impl InsertMapper<Post, NewPostRows> for PostRowMapper {
    fn to_row(&self, domain: &Post) -> Result<NewPostRows> {
        let post_id = domain.id.as_str().to_string();
        let post_count = i32::try_from(domain.post_count)
            .with_context(|| format!("post number {} out of range", domain.post_count))?;

        Ok(NewPostRows {
            post: PostRow {
                id: post_id.clone(),
                model_id: domain.model_id.as_str().to_string(),
                title: domain.title.clone(),
                thumbnail_url: domain.thumbnail_url.clone(),
                post_count,
                published_at: domain.published_at,
                created_at: domain.created_at,
            },
            media: domain
                .media
                .iter()
                .enumerate()
                .map(|(position, m)| MediaFileRow {
                    id: m.id.as_str().to_string(),
                    post_id: post_id.clone(),
                    url: m.url.clone(),
                    media_type: m.media_type.as_str().to_string(),
                    position: position as i32,
                })
                .collect(),
        })
    }
}

impl RowMapper<(PostRow, Vec<MediaFileRow>), Post> for PostRowMapper {
    fn to_domain(&self, (row, media): &(PostRow, Vec<MediaFileRow>)) -> Result<Post> {
        let media = media
            .iter()
            .map(|m| {
                let media_type: MediaType = m
                    .media_type
                    .parse()
                    .with_context(|| format!("media file {} has a corrupt type", m.id))?;
                Ok(MediaFile {
                    id: m.id.clone().into(),
                    url: m.url.clone(),
                    media_type,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Post {
            id: row.id.clone().into(),
            model_id: row.model_id.clone().into(),
            title: row.title.clone(),
            thumbnail_url: row.thumbnail_url.clone(),
            post_count: u32::try_from(row.post_count)
                .with_context(|| format!("post {} has a negative post number", row.id))?,
            published_at: row.published_at,
            created_at: row.created_at,
            media,
        })
    }
}
