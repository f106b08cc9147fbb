use serde::{Deserialize, Serialize};

use crate::types::deserialize_null_default;

/// One entry of the model discovery listing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HubModel {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "modelId", default)]
    pub model_id: String,
    #[serde(default)]
    pub pipeline_tag: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub tags: Vec<String>,
}
