use engine::{Engine, EngineError, NewAdmin};
use migration::MigratorTrait;
use sea_orm::Database;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

fn admin(n: u32) -> NewAdmin {
    NewAdmin {
        username: format!("admin{n}"),
        email: format!("admin{n}@example.com"),
        password: "stored-hash".to_string(),
    }
}

#[tokio::test]
async fn first_admin_is_super_later_ones_are_base() {
    let engine = engine_with_db().await;

    let first = engine.register_admin(admin(1)).await.unwrap();
    assert_eq!(first.power, 3);

    let second = engine.register_admin(admin(2)).await.unwrap();
    assert_eq!(second.power, 1);
}

#[tokio::test]
async fn admin_accounts_are_capped_at_three() {
    let engine = engine_with_db().await;

    for n in 1..=3 {
        engine.register_admin(admin(n)).await.unwrap();
    }

    // a fresh email does not help past the cap
    let err = engine.register_admin(admin(4)).await.unwrap_err();
    assert!(matches!(err, EngineError::LimitReached(_)));
    assert_eq!(engine.admins().await.unwrap().len(), 3);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let engine = engine_with_db().await;
    engine.register_admin(admin(1)).await.unwrap();

    let err = engine.register_admin(admin(1)).await.unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
}

#[tokio::test]
async fn empower_stops_at_max_power() {
    let engine = engine_with_db().await;
    engine.register_admin(admin(1)).await.unwrap();
    let base = engine.register_admin(admin(2)).await.unwrap();

    let raised = engine.empower_admin(&base.id).await.unwrap();
    assert_eq!(raised.power, 2);
    let raised = engine.empower_admin(&base.id).await.unwrap();
    assert_eq!(raised.power, 3);

    let err = engine.empower_admin(&base.id).await.unwrap_err();
    assert!(matches!(err, EngineError::LimitReached(_)));

    // the stored power is untouched by the failed attempt
    assert_eq!(engine.admin(&base.id).await.unwrap().power, 3);
}

#[tokio::test]
async fn reduce_stops_at_min_power() {
    let engine = engine_with_db().await;
    engine.register_admin(admin(1)).await.unwrap();
    let base = engine.register_admin(admin(2)).await.unwrap();
    assert_eq!(base.power, 1);

    let err = engine.reduce_admin(&base.id).await.unwrap_err();
    assert!(matches!(err, EngineError::LimitReached(_)));
    assert_eq!(engine.admin(&base.id).await.unwrap().power, 1);
}

#[tokio::test]
async fn delete_admin_frees_a_slot() {
    let engine = engine_with_db().await;
    for n in 1..=3 {
        engine.register_admin(admin(n)).await.unwrap();
    }
    let third = engine.admin_by_email("admin3@example.com").await.unwrap();
    engine.delete_admin(&third.unwrap().id).await.unwrap();

    let fourth = engine.register_admin(admin(4)).await.unwrap();
    assert_eq!(fourth.power, 1);
}
