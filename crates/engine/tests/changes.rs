use engine::{Engine, EngineError, Gender, MoneyCents, NewChange, NewShop};
use migration::MigratorTrait;
use sea_orm::Database;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

async fn shop_fixture(engine: &Engine, email: &str) -> String {
    engine
        .register_shop(NewShop {
            name: "Mama Nkechi".to_string(),
            email: email.to_string(),
            shop_type: "provisions".to_string(),
            description: "provisions and household goods".to_string(),
            city: "Enugu".to_string(),
            phone_number: "08012345678".to_string(),
            password: "stored-hash".to_string(),
        })
        .await
        .unwrap()
        .id
}

fn held_change() -> NewChange {
    NewChange {
        name_of_collector: "Chidi Eze".to_string(),
        gender_of_collector: Gender::Male,
        amount: MoneyCents::new(250),
    }
}

#[tokio::test]
async fn create_change_records_ownership() {
    let engine = engine_with_db().await;
    let shop_id = shop_fixture(&engine, "nkechi@example.com").await;

    let change = engine.create_change(&shop_id, held_change()).await.unwrap();
    assert!(!change.collected);
    assert!(change.date_out.is_none());

    let shop = engine.my_shop(&shop_id).await.unwrap();
    assert!(shop.change_refs.contains(&change.id));

    let mine = engine.my_changes(&shop_id).await.unwrap();
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
async fn collect_is_a_one_way_transition() {
    let engine = engine_with_db().await;
    let shop_id = shop_fixture(&engine, "nkechi@example.com").await;
    let change = engine.create_change(&shop_id, held_change()).await.unwrap();

    let collected = engine.collect_change(&shop_id, &change.id).await.unwrap();
    assert!(collected.collected);
    assert!(collected.date_out.is_some());

    let err = engine
        .collect_change(&shop_id, &change.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    // still collected after the failed second attempt
    let model = engine.change(&shop_id, &change.id).await.unwrap();
    assert!(model.collected);
}

#[tokio::test]
async fn change_ownership_is_membership_not_existence() {
    let engine = engine_with_db().await;
    let owner_id = shop_fixture(&engine, "owner@example.com").await;
    let other_id = shop_fixture(&engine, "other@example.com").await;

    let change = engine.create_change(&owner_id, held_change()).await.unwrap();

    let err = engine
        .collect_change(&other_id, &change.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine.change(&other_id, &change.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn negative_amount_is_rejected() {
    let engine = engine_with_db().await;
    let shop_id = shop_fixture(&engine, "nkechi@example.com").await;

    let mut change = held_change();
    change.amount = MoneyCents::new(-1);
    let err = engine.create_change(&shop_id, change).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn delete_change_removes_reference_and_row() {
    let engine = engine_with_db().await;
    let shop_id = shop_fixture(&engine, "nkechi@example.com").await;
    let change = engine.create_change(&shop_id, held_change()).await.unwrap();

    engine.delete_change(&shop_id, &change.id).await.unwrap();

    let shop = engine.my_shop(&shop_id).await.unwrap();
    assert!(!shop.change_refs.contains(&change.id));
    assert!(engine.my_changes(&shop_id).await.unwrap().is_empty());
}
