// ==========================================
// 森林防火资源调度系统 - 命令行入口
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统
// 用途: 初始化台账并对演示区域执行一次优化,输出 JSON 报告
// ==========================================

use fire_dispatch::config::ConfigManager;
use fire_dispatch::domain::geo::GeoPoint;
use fire_dispatch::domain::region::RegionRiskDescriptor;
use fire_dispatch::domain::resource::Resource;
use fire_dispatch::domain::types::{
    Accessibility, ResourceStatus, ResourceType, TerrainDifficulty, VegetationDensity,
};
use fire_dispatch::engine::events::OptionalEventPublisher;
use fire_dispatch::importer::CatalogImporter;
use fire_dispatch::repository::{DispatchRunLogRepository, ResourceRepository};
use fire_dispatch::DispatchApi;
use chrono::Utc;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// 获取默认数据库路径（系统数据目录,不可用时退回当前目录）
fn get_default_db_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        let app_dir = data_dir.join("fire-dispatch");
        if std::fs::create_dir_all(&app_dir).is_ok() {
            return app_dir.join("dispatch.db");
        }
    }
    PathBuf::from("fire_dispatch.db")
}

/// 演示用资源台账（确定性固定值）
fn demo_catalog() -> Vec<Resource> {
    let now = Utc::now();
    let make = |id: &str,
                resource_type: ResourceType,
                lat: f64,
                lng: f64,
                capacity: f64,
                base_minutes: i64,
                cost: f64,
                effectiveness: f64| Resource {
        resource_id: id.to_string(),
        resource_type,
        location: GeoPoint::new(lat, lng),
        capacity,
        status: ResourceStatus::Available,
        base_response_time_minutes: base_minutes,
        operational_cost_per_hour: cost,
        effectiveness_rating: effectiveness,
        created_at: now,
        updated_at: now,
    };

    vec![
        // 扑火队（消防站驻地）
        make("crew_1", ResourceType::FirefighterCrew, 29.3806, 79.4422, 15.0, 15, 2500.0, 0.86),
        make("crew_2", ResourceType::FirefighterCrew, 29.5833, 79.6667, 15.0, 17, 2500.0, 0.88),
        make("crew_3", ResourceType::FirefighterCrew, 30.3165, 78.0322, 15.0, 19, 2500.0, 0.90),
        make("crew_4", ResourceType::FirefighterCrew, 29.9458, 78.1642, 15.0, 21, 2500.0, 0.92),
        make("crew_5", ResourceType::FirefighterCrew, 30.0869, 78.2676, 15.0, 23, 2500.0, 0.94),
        // 水罐车
        make("tanker_1", ResourceType::WaterTank, 29.4000, 79.4500, 5000.0, 20, 1200.0, 0.76),
        make("tanker_2", ResourceType::WaterTank, 29.6000, 79.7000, 5000.0, 25, 1200.0, 0.80),
        make("tanker_3", ResourceType::WaterTank, 30.3000, 78.0500, 5000.0, 30, 1200.0, 0.84),
        // 侦察无人机
        make("drone_1", ResourceType::Drone, 29.3500, 79.4000, 4.0, 5, 800.0, 0.72),
        make("drone_2", ResourceType::Drone, 30.3200, 78.0200, 4.0, 7, 800.0, 0.82),
        // 消防直升机
        make("helicopter_1", ResourceType::Helicopter, 30.1850, 78.0420, 2000.0, 10, 15_000.0, 0.91),
        make("helicopter_2", ResourceType::Helicopter, 29.3900, 79.4600, 2000.0, 14, 15_000.0, 0.93),
    ]
}

/// 演示用区域风险画像（确定性固定值）
fn demo_regions() -> Vec<RegionRiskDescriptor> {
    let make = |region_id: &str,
                lat: f64,
                lng: f64,
                risk_score: f64,
                terrain: TerrainDifficulty,
                vegetation: VegetationDensity,
                accessibility: Accessibility| RegionRiskDescriptor {
        region_id: region_id.to_string(),
        coordinates: GeoPoint::new(lat, lng),
        risk_score,
        terrain_difficulty: terrain,
        vegetation_density: vegetation,
        accessibility,
    };

    vec![
        make("Nainital", 29.3806, 79.4422, 0.85, TerrainDifficulty::Difficult, VegetationDensity::Dense, Accessibility::Low),
        make("Almora", 29.5833, 79.6667, 0.68, TerrainDifficulty::Moderate, VegetationDensity::Moderate, Accessibility::Medium),
        make("Dehradun", 30.3165, 78.0322, 0.42, TerrainDifficulty::Easy, VegetationDensity::Moderate, Accessibility::High),
        make("Haridwar", 29.9458, 78.1642, 0.28, TerrainDifficulty::Easy, VegetationDensity::Sparse, Accessibility::High),
        make("Rishikesh", 30.0869, 78.2676, 0.35, TerrainDifficulty::Moderate, VegetationDensity::Moderate, Accessibility::Medium),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // 初始化日志系统
    fire_dispatch::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", fire_dispatch::APP_NAME);
    tracing::info!("系统版本: {}", fire_dispatch::VERSION);
    tracing::info!("==================================================");

    // 打开数据库并初始化 schema
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path.display());

    let db_path_str = db_path.to_string_lossy().to_string();
    let conn = fire_dispatch::db::open_sqlite_connection(&db_path_str)?;
    fire_dispatch::db::init_schema(&conn)?;
    let conn = Arc::new(Mutex::new(conn));

    let resource_repo = Arc::new(ResourceRepository::from_connection(conn.clone()));
    let run_log_repo = Arc::new(DispatchRunLogRepository::from_connection(conn.clone()));

    // 可选: --import <csv路径> 先导入台账花名册
    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 3 && args[1] == "--import" {
        let importer = CatalogImporter::new(&resource_repo);
        let report = importer.import_csv(Path::new(&args[2]))?;
        tracing::info!(imported = report.imported, "花名册导入完成");
    }

    // 空库时写入演示台账
    if resource_repo.count()? == 0 {
        let seeded = resource_repo.upsert_batch(&demo_catalog())?;
        tracing::info!(seeded, "台账为空,已写入演示资源");
    }

    // 配置: 优先使用 config_kv 覆写,缺省回退内置默认值
    let config = Arc::new(ConfigManager::from_connection(conn.clone())?);

    let api = DispatchApi::new(
        resource_repo,
        run_log_repo,
        config,
        OptionalEventPublisher::none(),
    );

    // 对演示区域执行一次优化
    let report = api.optimize(demo_regions()).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    tracing::info!(
        recommendations = report.recommendations.len(),
        total_cost = report.total_cost,
        "优化完成"
    );

    Ok(())
}
