// ==========================================
// 森林防火资源调度系统 - 地理坐标
// ==========================================
// 约定: 纬度 [-90, 90],经度 [-180, 180],十进制度
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// GeoPoint - 地理坐标点
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64, // 纬度
    pub lng: f64, // 经度
}

impl GeoPoint {
    /// 构造坐标点（不做校验,校验在输入边界统一进行）
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// 坐标合法性检查
    ///
    /// # 返回
    /// - `true`: |lat|≤90 且 |lng|≤180 且均为有限数
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}
