// ==========================================
// 引擎间集成测试
// ==========================================
// 职责: 验证需求规划/分配/排序引擎的协作与数据流转
// 场景: RequirementPlanner → ResourceAllocator → RecommendationRanker
// ==========================================


use fire_dispatch::config::DispatchConfig;
use fire_dispatch::domain::types::{
    Accessibility, Priority, ResourceType, TerrainDifficulty, VegetationDensity,
};
use fire_dispatch::engine::{DispatchOrchestrator, SuitabilityScorer, TravelEstimator};
use std::collections::HashMap;
use test_helpers::{RegionBuilder, ResourceBuilder};

fn orchestrator() -> DispatchOrchestrator {
    DispatchOrchestrator::new(&DispatchConfig::default())
}

// ==========================================
// 标准场景: 极高风险区域 + 每类各一的台账
// ==========================================

#[test]
fn test_scenario_single_region_full_catalog_contention() {
    // 区域: 风险0.85,地形险峻,植被茂密,可达性差,与所有资源同点
    let region = RegionBuilder::new("R1", 0.85)
        .coordinates(29.38, 79.44)
        .terrain(TerrainDifficulty::Difficult)
        .vegetation(VegetationDensity::Dense)
        .accessibility(Accessibility::Low)
        .build();

    // 台账: 每类各一,全部与区域同点
    let snapshot = vec![
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
    ];

    let outcome = orchestrator().optimize(std::slice::from_ref(&region), &snapshot);

    // 需求: 扑火队3(紧急) 水罐车2+1=3(紧急) 直升机1+1=2(抬升为紧急) 无人机2(高)
    let by_type: HashMap<ResourceType, _> = outcome
        .fulfillment
        .iter()
        .map(|f| (f.resource_type, f))
        .collect();

    let crew = by_type[&ResourceType::FirefighterCrew];
    assert_eq!((crew.requested, crew.fulfilled), (3, 1));
    assert_eq!(crew.priority, Priority::Critical);

    let tank = by_type[&ResourceType::WaterTank];
    assert_eq!((tank.requested, tank.fulfilled), (3, 1));
    assert_eq!(tank.priority, Priority::Critical);

    let helicopter = by_type[&ResourceType::Helicopter];
    assert_eq!((helicopter.requested, helicopter.fulfilled), (2, 1));
    assert_eq!(helicopter.priority, Priority::Critical);

    let drone = by_type[&ResourceType::Drone];
    assert_eq!((drone.requested, drone.fulfilled), (2, 1));
    assert_eq!(drone.priority, Priority::High);

    // 4 个资源全部出现,且各出现一次
    assert_eq!(outcome.recommendations.len(), 4);
    let mut ids: Vec<&str> = outcome
        .recommendations
        .iter()
        .map(|r| r.resource_id.as_str())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["crew_1", "drone_1", "helicopter_1", "tanker_1"]);
}

// ==========================================
// 全局互斥
// ==========================================

#[test]
fn test_exclusivity_under_overlapping_demand() {
    // 两个相邻的极高风险区域争夺同一批资源
    let regions = vec![
        RegionBuilder::new("R1", 0.85).coordinates(29.38, 79.44).build(),
        RegionBuilder::new("R2", 0.85).coordinates(29.40, 79.45).build(),
    ];

    let mut snapshot = Vec::new();
    for i in 0..4 {
        snapshot.push(
            ResourceBuilder::new(&format!("crew_{}", i), ResourceType::FirefighterCrew)
                .location(29.39, 79.44)
                .build(),
        );
    }
    for i in 0..3 {
        snapshot.push(
            ResourceBuilder::new(&format!("tanker_{}", i), ResourceType::WaterTank)
                .location(29.39, 79.44)
                .build(),
        );
    }

    let outcome = orchestrator().optimize(&regions, &snapshot);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for rec in &outcome.recommendations {
        *counts.entry(rec.resource_id.as_str()).or_insert(0) += 1;
    }
    for (resource_id, count) in counts {
        assert_eq!(count, 1, "资源{}被推荐{}次", resource_id, count);
    }
}

// ==========================================
// 低风险区域
// ==========================================

#[test]
fn test_low_risk_regions_yield_no_recommendations() {
    let regions = vec![
        RegionBuilder::new("calm_1", 0.05).build(),
        RegionBuilder::new("calm_2", 0.29).build(),
    ];
    let snapshot = vec![
        ResourceBuilder::new("crew_1", ResourceType::FirefighterCrew).build(),
    ];

    let outcome = orchestrator().optimize(&regions, &snapshot);
    assert!(outcome.recommendations.is_empty());
    assert_eq!(outcome.total_cost, 0.0);
}

// ==========================================
// 排序与截断
// ==========================================

#[test]
fn test_output_bounded_and_sorted() {
    // 6 个极高风险区域 + 充足资源: 候选推荐远超 15 条
    let regions: Vec<_> = (0..6)
        .map(|i| {
            RegionBuilder::new(&format!("R{}", i), 0.85)
                .coordinates(29.0 + i as f64 * 0.1, 79.0)
                .build()
        })
        .collect();

    let mut snapshot = Vec::new();
    for i in 0..20 {
        snapshot.push(
            ResourceBuilder::new(&format!("crew_{:02}", i), ResourceType::FirefighterCrew)
                .location(29.2, 79.0)
                .build(),
        );
        if i < 12 {
            snapshot.push(
                ResourceBuilder::new(&format!("tanker_{:02}", i), ResourceType::WaterTank)
                    .location(29.2, 79.0)
                    .build(),
            );
        }
    }

    let outcome = orchestrator().optimize(&regions, &snapshot);

    assert_eq!(outcome.recommendations.len(), 15);
    for pair in outcome.recommendations.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.priority.rank() <= b.priority.rank(),
            "优先级顺序错误: {} 在 {} 之前",
            a.priority,
            b.priority
        );
        if a.priority == b.priority {
            assert!(a.effectiveness_score >= b.effectiveness_score);
        }
    }

    // 成本合计严格等于返回列表的逐项求和
    let expected: f64 = outcome
        .recommendations
        .iter()
        .map(|r| r.cost_estimate)
        .sum();
    assert_eq!(outcome.total_cost, expected);
}

// ==========================================
// 评分性质
// ==========================================

#[test]
fn test_suitability_in_unit_interval_for_whole_catalog() {
    let estimator = TravelEstimator::new();
    let scorer = SuitabilityScorer::default();
    let region = RegionBuilder::new("R1", 0.7).coordinates(29.38, 79.44).build();

    let snapshot = vec![
        ResourceBuilder::new("crew_1", ResourceType::FirefighterCrew)
            .location(29.38, 79.44)
            .build(),
        ResourceBuilder::new("tanker_1", ResourceType::WaterTank)
            .location(30.30, 78.05)
            .cost_per_hour(1200.0)
            .build(),
        ResourceBuilder::new("helicopter_1", ResourceType::Helicopter)
            .location(28.00, 77.00)
            .cost_per_hour(15_000.0)
            .effectiveness(0.95)
            .build(),
    ];

    for resource in &snapshot {
        let distance = estimator.distance_km(&resource.location, &region.coordinates);
        let travel = estimator.travel_time_minutes(resource, distance);
        let score = scorer.score(resource, distance, travel);
        for component in [
            score.distance_score,
            score.time_score,
            score.effectiveness_score,
            score.cost_score,
            score.total,
        ] {
            assert!(
                (0.0..=1.0).contains(&component),
                "资源{}分量越界: {}",
                resource.resource_id,
                component
            );
        }
    }
}

// ==========================================
// 到场时间传导
// ==========================================

#[test]
fn test_arrival_minutes_propagated_into_recommendation() {
    // 直升机在 150km 外: 60 分钟行进 + 10 分钟基础响应
    let region = RegionBuilder::new("R1", 0.85)
        .coordinates(0.0, 0.0)
        .terrain(TerrainDifficulty::Difficult)
        .build();

    // 纬度 1 度约 111.19km; 选取约 150km 的位置
    let snapshot = vec![
        ResourceBuilder::new("helicopter_1", ResourceType::Helicopter)
            .location(1.349, 0.0)
            .base_response_time(10)
            .build(),
    ];

    let outcome = orchestrator().optimize(std::slice::from_ref(&region), &snapshot);
    assert_eq!(outcome.recommendations.len(), 1);

    let rec = &outcome.recommendations[0];
    let estimator = TravelEstimator::new();
    let distance = estimator.distance_km(&snapshot[0].location, &region.coordinates);
    let expected = estimator.travel_time_minutes(&snapshot[0], distance);
    assert_eq!(rec.estimated_arrival_minutes, expected);
    // 数量级校验: 150km/150kmh ≈ 60 分钟 + 10
    assert!((rec.estimated_arrival_minutes - 70).abs() <= 2);
}
