// region:    --- Imports
use std::sync::Arc;
use storefront_service::auth;
use storefront_service::config::Config;
use storefront_service::database::DatabaseManager;
use storefront_service::routes::build_router;
use storefront_service::scheduler::CleanupScheduler;
use storefront_service::state::{build_storage, AppState};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 가 없으면 환경 변수만 사용
    if dotenvy::dotenv().is_err() {
        eprintln!(".env 파일 없음, 환경 변수만 사용합니다.");
    }

    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = Config::load()?;

    // DatabaseManager 생성
    let db_manager =
        Arc::new(DatabaseManager::new(&config.database_url, config.max_connections).await?);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 부트스트랩 관리자
    if let Some(admin) = &config.bootstrap_admin {
        if auth::ensure_admin(&db_manager, &admin.email, &admin.password).await? {
            info!("{:<12} --> 관리자 계정 생성: {}", "Main", admin.email);
        }
    }

    let storage = build_storage(&config.storage);

    // 만료 계정 정리 (설정된 경우만)
    match config.cleanup_interval_secs {
        Some(secs) => {
            CleanupScheduler::new(db_manager.get_pool(), Arc::clone(&storage), secs).start();
        }
        None => warn!(
            "{:<12} --> CLEANUP_INTERVAL_SECS 미설정, 만료 정리는 수동으로 실행해야 합니다.",
            "Main"
        ),
    }

    let port = config.port;
    let routes_all = build_router(AppState::new(db_manager, storage, config));

    // 리스너 생성
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
