use anyhow::Result;
use mg_core::catalog::{Model, Username};
use mg_core::ids::UsernameId;

use crate::db::models::{ModelRow, NewModelRows, UsernameRow};
use crate::db::ports::{InsertMapper, RowMapper};

pub struct ModelRowMapper;

impl InsertMapper<Model, NewModelRows> for ModelRowMapper {
    fn to_row(&self, domain: &Model) -> Result<NewModelRows> {
        let model_id = domain.id.as_str().to_string();
        Ok(NewModelRows {
            model: ModelRow {
                id: model_id.clone(),
                name: domain.name.clone(),
                avatar_url: domain.avatar_url.clone(),
                location: domain.location.clone(),
                created_at: domain.created_at,
            },
            usernames: domain
                .usernames
                .iter()
                .map(|u| UsernameRow {
                    id: UsernameId::new().into_inner(),
                    model_id: model_id.clone(),
                    username: u.username.clone(),
                    is_primary: u.is_primary,
                })
                .collect(),
        })
    }
}

impl RowMapper<(ModelRow, Vec<UsernameRow>), Model> for ModelRowMapper {
    fn to_domain(&self, (row, usernames): &(ModelRow, Vec<UsernameRow>)) -> Result<Model> {
        Ok(Model {
            id: row.id.clone().into(),
            name: row.name.clone(),
            avatar_url: row.avatar_url.clone(),
            location: row.location.clone(),
            created_at: row.created_at,
            usernames: usernames
                .iter()
                .map(|u| Username {
                    username: u.username.clone(),
                    is_primary: u.is_primary,
                })
                .collect(),
        })
    }
}
