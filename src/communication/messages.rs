use serde::{Deserialize, Serialize};

use crate::models::vehicle::CarId;

/// Query string of `GET /isFirstInLine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstInLineQuery {
    pub car_id: CarId,
}
