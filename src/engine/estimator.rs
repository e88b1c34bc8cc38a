// ==========================================
// 森林防火资源调度系统 - 距离/时间估算引擎
// ==========================================
// 职责: 大圆距离与到场时间估算
// 输入: 坐标点 / 资源
// 输出: 距离(km) / 到场时间(分钟)
// 红线: 纯函数,无 I/O,无随机性
// ==========================================

use crate::domain::geo::GeoPoint;
use crate::domain::resource::Resource;

/// 地球半径（公里）
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// ==========================================
// TravelEstimator - 距离/时间估算引擎
// ==========================================
pub struct TravelEstimator {
    // 无状态引擎,不需要注入依赖
}

impl TravelEstimator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// Haversine 大圆距离（公里）
    ///
    /// 性质: 对称; 同点为零; 在球面近似范围内满足三角不等式
    ///
    /// # 参数
    /// - `a`: 起点坐标
    /// - `b`: 终点坐标
    pub fn distance_km(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        let lat1_rad = a.lat.to_radians();
        let lat2_rad = b.lat.to_radians();
        let delta_lat = (b.lat - a.lat).to_radians();
        let delta_lng = (b.lng - a.lng).to_radians();

        let h = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// 到场时间估算（分钟）
    ///
    /// 行进时间按类型速度折算,再叠加资源的固定基础响应时间
    ///
    /// # 参数
    /// - `resource`: 候选资源
    /// - `distance_km`: 到目标区域的距离
    pub fn travel_time_minutes(&self, resource: &Resource, distance_km: f64) -> i64 {
        let speed_kmh = resource.resource_type.speed_kmh();
        let travel_time_hours = distance_km / speed_kmh;
        (travel_time_hours * 60.0) as i64 + resource.base_response_time_minutes
    }
}

impl Default for TravelEstimator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ResourceStatus, ResourceType};
    use chrono::Utc;

    fn make_resource(resource_type: ResourceType, base_minutes: i64) -> Resource {
        Resource {
            resource_id: "r1".to_string(),
            resource_type,
            location: GeoPoint::new(0.0, 0.0),
            capacity: 1.0,
            status: ResourceStatus::Available,
            base_response_time_minutes: base_minutes,
            operational_cost_per_hour: 1000.0,
            effectiveness_rating: 0.8,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let estimator = TravelEstimator::new();
        let p = GeoPoint::new(29.3806, 79.4422);
        assert_eq!(estimator.distance_km(&p, &p), 0.0);
    }

    #[test]
    fn test_distance_symmetry() {
        let estimator = TravelEstimator::new();
        let a = GeoPoint::new(29.3806, 79.4422); // Nainital
        let b = GeoPoint::new(30.3165, 78.0322); // Dehradun
        let ab = estimator.distance_km(&a, &b);
        let ba = estimator.distance_km(&b, &a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_distance_known_magnitude() {
        // Nainital -> Dehradun 直线距离大约 170km 上下
        let estimator = TravelEstimator::new();
        let a = GeoPoint::new(29.3806, 79.4422);
        let b = GeoPoint::new(30.3165, 78.0322);
        let d = estimator.distance_km(&a, &b);
        assert!(d > 150.0 && d < 200.0, "distance = {}", d);
    }

    #[test]
    fn test_travel_time_includes_base_response() {
        let estimator = TravelEstimator::new();
        // 扑火队 60 km/h: 60km -> 60分钟行进 + 15分钟基础响应
        let crew = make_resource(ResourceType::FirefighterCrew, 15);
        assert_eq!(estimator.travel_time_minutes(&crew, 60.0), 75);

        // 直升机 150 km/h: 75km -> 30分钟行进 + 10分钟基础响应
        let helicopter = make_resource(ResourceType::Helicopter, 10);
        assert_eq!(estimator.travel_time_minutes(&helicopter, 75.0), 40);
    }

    #[test]
    fn test_travel_time_zero_distance() {
        let estimator = TravelEstimator::new();
        let drone = make_resource(ResourceType::Drone, 5);
        // 距离为零时只剩基础响应时间
        assert_eq!(estimator.travel_time_minutes(&drone, 0.0), 5);
    }
}
