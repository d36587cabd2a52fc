use mg_core::catalog::ModelCard;
use serde::{Deserialize, Serialize};

/// `models/{username}.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub model: ModelCard,
}
