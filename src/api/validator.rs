// ==========================================
// 森林防火资源调度系统 - 输入校验器
// ==========================================
// 职责: 对外接口的入参校验
// 红线: 任一区域画像不合格则整次调用拒绝,不做部分处理
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::geo::GeoPoint;
use crate::domain::region::RegionRiskDescriptor;

/// 校验整批区域风险画像
///
/// 规则:
/// - region_id 非空
/// - 坐标: |lat|≤90 且 |lng|≤180 且为有限数
/// - risk_score ∈ [0,1]
///
/// # 返回
/// - Ok(()): 全部合格
/// - Err(ValidationError): 首个不合格画像的定位与原因,整次调用拒绝
pub fn validate_regions(regions: &[RegionRiskDescriptor]) -> ApiResult<()> {
    for region in regions {
        if region.region_id.trim().is_empty() {
            return Err(ApiError::ValidationError(
                "region_id 不能为空".to_string(),
            ));
        }

        if !region.coordinates.is_valid() {
            return Err(ApiError::ValidationError(format!(
                "区域{}坐标非法: {}",
                region.region_id, region.coordinates
            )));
        }

        if !region.risk_score.is_finite() || !(0.0..=1.0).contains(&region.risk_score) {
            return Err(ApiError::ValidationError(format!(
                "区域{}风险分值必须在[0,1]区间: {}",
                region.region_id, region.risk_score
            )));
        }
    }
    Ok(())
}

/// 校验状态更新携带的新位置
pub fn validate_location(resource_id: &str, location: &GeoPoint) -> ApiResult<()> {
    if !location.is_valid() {
        return Err(ApiError::ValidationError(format!(
            "资源{}新位置坐标非法: {}",
            resource_id, location
        )));
    }
    Ok(())
}
