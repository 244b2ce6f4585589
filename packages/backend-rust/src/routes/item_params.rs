use std::collections::BTreeMap;

use axum::response::{IntoResponse, Response};
use axum::Json;
use brainbolt_algo::item_bank::{self, ParameterDescriptions};
use brainbolt_algo::ItemParameters;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemParamsResponse {
    model: &'static str,
    model_description: &'static str,
    parameters: BTreeMap<u8, ItemParameters>,
    description: ParameterDescriptions,
}

pub async fn get_item_params() -> Response {
    Json(ItemParamsResponse {
        model: item_bank::MODEL_NAME,
        model_description: item_bank::MODEL_DESCRIPTION,
        parameters: item_bank::entries().collect(),
        description: item_bank::PARAMETER_DESCRIPTIONS,
    })
    .into_response()
}
