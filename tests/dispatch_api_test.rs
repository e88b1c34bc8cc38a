// ==========================================
// 调度接口端到端测试
// ==========================================
// 职责: 验证 API 层的完整业务流程
// 场景: 台账落库 → 优化调用 → 状态更新 → 运行留痕
// ==========================================


use fire_dispatch::api::{ApiError, DispatchApi};
use fire_dispatch::config::StaticDispatchConfig;
use fire_dispatch::domain::geo::GeoPoint;
use fire_dispatch::domain::types::{
    Accessibility, ResourceStatus, ResourceType, TerrainDifficulty, VegetationDensity,
};
use fire_dispatch::engine::events::OptionalEventPublisher;
use fire_dispatch::repository::{DispatchRunLogRepository, ResourceRepository};
use std::sync::Arc;
use test_helpers::{create_test_db, open_test_connection, RegionBuilder, ResourceBuilder};

/// 构造完整的 API 实例（临时库 + 默认配置 + 无事件发布）
fn make_api() -> (tempfile::NamedTempFile, DispatchApi<StaticDispatchConfig>, Arc<ResourceRepository>) {
    let (temp_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let conn = open_test_connection(&db_path).expect("打开测试连接失败");

    let resource_repo = Arc::new(ResourceRepository::from_connection(conn.clone()));
    let run_log_repo = Arc::new(DispatchRunLogRepository::from_connection(conn));

    let api = DispatchApi::new(
        resource_repo.clone(),
        run_log_repo,
        Arc::new(StaticDispatchConfig::default()),
        OptionalEventPublisher::none(),
    );

    (temp_file, api, resource_repo)
}

fn seed_standard_catalog(repo: &ResourceRepository) {
    repo.upsert_batch(&[
        ResourceBuilder::new("crew_1", ResourceType::FirefighterCrew)
            .location(29.38, 79.44)
            .build(),
        ResourceBuilder::new("tanker_1", ResourceType::WaterTank)
            .location(29.38, 79.44)
            .build(),
        ResourceBuilder::new("drone_1", ResourceType::Drone)
            .location(29.38, 79.44)
            .build(),
        ResourceBuilder::new("helicopter_1", ResourceType::Helicopter)
            .location(29.38, 79.44)
            .build(),
    ])
    .expect("写入测试台账失败");
}

#[tokio::test]
async fn test_optimize_end_to_end() {
    let (_guard, api, repo) = make_api();
    seed_standard_catalog(&repo);

    let regions = vec![
        RegionBuilder::new("Nainital", 0.85)
            .coordinates(29.38, 79.44)
            .terrain(TerrainDifficulty::Difficult)
            .vegetation(VegetationDensity::Dense)
            .accessibility(Accessibility::Low)
            .build(),
        RegionBuilder::new("Haridwar", 0.28).build(),
    ];

    let report = api.optimize(regions).await.expect("优化调用失败");

    // 4 个资源全部被推荐,低风险区域无贡献
    assert_eq!(report.recommendations.len(), 4);
    assert!(report
        .recommendations
        .iter()
        .all(|r| r.region_id == "Nainital"));
    assert!(!report.run_id.is_empty());

    // 成本合计与返回列表一致
    let expected: f64 = report
        .recommendations
        .iter()
        .map(|r| r.cost_estimate)
        .sum();
    assert_eq!(report.total_cost, expected);

    // 台账汇总随报告返回
    assert_eq!(report.resource_status.total_resources, 4);
    assert_eq!(report.resource_status.available, 4);

    // 优化是只读计算: 台账状态不变
    for resource in repo.list_all().unwrap() {
        assert_eq!(resource.status, ResourceStatus::Available);
    }

    // 运行留痕
    let runs = api.list_recent_runs(10).await.unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_id, report.run_id);
    assert_eq!(runs[0].recommendation_count, 4);
}

#[tokio::test]
async fn test_invalid_region_rejects_whole_call() {
    let (_guard, api, repo) = make_api();
    seed_standard_catalog(&repo);

    let regions = vec![
        RegionBuilder::new("Good", 0.85).build(),
        RegionBuilder::new("Bad", 1.5).build(), // 风险分值越界
    ];

    let result = api.optimize(regions).await;
    assert!(matches!(result, Err(ApiError::ValidationError(_))));

    // 整次拒绝: 不产生运行记录
    let runs = api.list_recent_runs(10).await.unwrap();
    assert!(runs.is_empty());
}

#[tokio::test]
async fn test_invalid_coordinates_rejected() {
    let (_guard, api, _repo) = make_api();

    let regions = vec![RegionBuilder::new("R1", 0.5).coordinates(95.0, 79.0).build()];
    let result = api.optimize(regions).await;
    assert!(matches!(result, Err(ApiError::ValidationError(_))));
}

#[tokio::test]
async fn test_update_status_not_found_leaves_summary_unchanged() {
    let (_guard, api, repo) = make_api();
    seed_standard_catalog(&repo);

    let before = api.get_resource_status_summary().await.unwrap();

    let result = api
        .update_resource_status("nonexistent", ResourceStatus::Deployed, None)
        .await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));

    let after = api.get_resource_status_summary().await.unwrap();
    assert_eq!(before.total_resources, after.total_resources);
    assert_eq!(before.available, after.available);
    assert_eq!(before.deployed, after.deployed);
    assert_eq!(before.maintenance, after.maintenance);
}

#[tokio::test]
async fn test_update_status_then_resource_leaves_candidate_pool() {
    let (_guard, api, repo) = make_api();
    seed_standard_catalog(&repo);

    // 部署执行方确认后,显式更新状态
    api.update_resource_status(
        "crew_1",
        ResourceStatus::Deployed,
        Some(GeoPoint::new(29.50, 79.50)),
    )
    .await
    .unwrap();

    let summary = api.get_resource_status_summary().await.unwrap();
    assert_eq!(summary.deployed, 1);
    assert_eq!(summary.available, 3);

    // 已部署资源不再出现在后续优化中
    let regions = vec![RegionBuilder::new("R1", 0.85).coordinates(29.38, 79.44).build()];
    let report = api.optimize(regions).await.unwrap();
    assert!(report
        .recommendations
        .iter()
        .all(|r| r.resource_id != "crew_1"));
}

#[tokio::test]
async fn test_summary_average_response_time_guard() {
    let (_guard, api, repo) = make_api();

    // 两支可调度扑火队 + 一架维护中直升机
    repo.upsert_batch(&[
        ResourceBuilder::new("crew_1", ResourceType::FirefighterCrew)
            .base_response_time(10)
            .build(),
        ResourceBuilder::new("crew_2", ResourceType::FirefighterCrew)
            .base_response_time(30)
            .build(),
        ResourceBuilder::new("heli_1", ResourceType::Helicopter)
            .status(ResourceStatus::Maintenance)
            .build(),
    ])
    .unwrap();

    let summary = api.get_resource_status_summary().await.unwrap();

    let crew = &summary.by_type[&ResourceType::FirefighterCrew];
    assert_eq!(crew.avg_response_time_minutes, 20.0);

    // 无可调度直升机: 平均响应时间为 0（除零防护）
    let heli = &summary.by_type[&ResourceType::Helicopter];
    assert_eq!(heli.avg_response_time_minutes, 0.0);
}

#[tokio::test]
async fn test_config_kv_override_shrinks_recommendation_cap() {
    use fire_dispatch::config::{config_keys, ConfigManager};

    let (_guard, db_path) = create_test_db().expect("创建测试数据库失败");
    let conn = open_test_connection(&db_path).expect("打开测试连接失败");

    let resource_repo = Arc::new(ResourceRepository::from_connection(conn.clone()));
    let run_log_repo = Arc::new(DispatchRunLogRepository::from_connection(conn.clone()));
    seed_standard_catalog(&resource_repo);

    // 通过 config_kv 将推荐数量上限覆写为 2
    let config = ConfigManager::from_connection(conn).expect("配置管理器初始化失败");
    config
        .set_config_value(config_keys::MAX_RECOMMENDATIONS, "2")
        .unwrap();

    let api = DispatchApi::new(
        resource_repo,
        run_log_repo,
        Arc::new(config),
        OptionalEventPublisher::none(),
    );

    let regions = vec![
        RegionBuilder::new("R1", 0.85)
            .coordinates(29.38, 79.44)
            .terrain(TerrainDifficulty::Difficult)
            .build(),
    ];
    let report = api.optimize(regions).await.unwrap();

    // 候选推荐 4 条,被截断为 2 条
    assert_eq!(report.recommendations.len(), 2);
}

#[tokio::test]
async fn test_empty_region_list_is_valid_call() {
    let (_guard, api, repo) = make_api();
    seed_standard_catalog(&repo);

    let report = api.optimize(Vec::new()).await.unwrap();
    assert!(report.recommendations.is_empty());
    assert_eq!(report.total_cost, 0.0);
    assert_eq!(report.resource_status.total_resources, 4);
}
