use serde::{Deserialize, Serialize};

/// 提交小票响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

/// 查询积分响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: i64,
}
