use barmate_core::db::open_db_in_memory;
use barmate_core::{
    default_catalog, CatalogService, DrinkId, DrinkRepository, NewDrink, RepoError,
    SqliteDrinkRepository,
};

fn margarita() -> NewDrink {
    NewDrink::new(
        "Margarita",
        "50ml Tequila, 20ml Triple Sec, 20ml Lime juice",
        "Shake with ice.",
        "margarita",
        40,
    )
}

fn mojito() -> NewDrink {
    NewDrink::new("Mojito", "40ml Rum, Soda water", "Muddle mint.", "mojito", 20)
}

#[test]
fn insert_all_and_get_by_name_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();

    let ids = repo.insert_all(&[margarita(), mojito()]).unwrap();
    assert_eq!(ids.len(), 2);
    assert!(ids[0] < ids[1]);

    let loaded = repo.get_drink_by_name("Mojito").unwrap().unwrap();
    assert_eq!(loaded.id, ids[1]);
    assert_eq!(loaded.ingredients, "40ml Rum, Soda water");
    assert_eq!(loaded.image, "mojito");
    assert_eq!(loaded.shaking_time_secs, 20);
    assert!(!loaded.is_favourite);

    assert_eq!(repo.get_drink(ids[0]).unwrap().unwrap().name, "Margarita");
}

#[test]
fn get_by_name_is_exact_and_prefers_lowest_id() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();

    let mut duplicate = margarita();
    duplicate.shaking_time_secs = 99;
    let ids = repo.insert_all(&[margarita(), duplicate]).unwrap();

    assert_eq!(repo.get_drink_by_name("Margarita").unwrap().unwrap().id, ids[0]);
    assert!(repo.get_drink_by_name("margarit").unwrap().is_none());
}

#[test]
fn insert_all_is_atomic_when_one_row_is_invalid() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();

    let invalid = NewDrink::new(" ", "x", "y", "", 10);
    let err = repo.insert_all(&[margarita(), invalid]).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.count_drinks().unwrap(), 0);
}

#[test]
fn insert_all_with_empty_batch_is_noop() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();

    assert!(repo.insert_all(&[]).unwrap().is_empty());
    assert!(repo.list_drinks().unwrap().is_empty());
}

#[test]
fn update_drink_persists_all_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    let ids = repo.insert_all(&[margarita()]).unwrap();

    let mut drink = repo.get_drink(ids[0]).unwrap().unwrap();
    drink.description = "Shake hard.".to_string();
    drink.is_favourite = true;
    drink.shaking_time_secs = 45;
    repo.update_drink(&drink).unwrap();

    let loaded = repo.get_drink(ids[0]).unwrap().unwrap();
    assert_eq!(loaded, drink);
}

#[test]
fn update_missing_drink_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();

    let ghost = margarita().into_drink(DrinkId(404));
    let err = repo.update_drink(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(DrinkId(404))));
}

#[test]
fn update_rejects_invalid_drink() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    let ids = repo.insert_all(&[margarita()]).unwrap();

    let mut drink = repo.get_drink(ids[0]).unwrap().unwrap();
    drink.shaking_time_secs = 0;
    assert!(matches!(
        repo.update_drink(&drink).unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[test]
fn list_favourites_only_returns_flagged_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    let mut favourite = mojito();
    favourite.is_favourite = true;
    repo.insert_all(&[margarita(), favourite]).unwrap();

    let favourites = repo.list_favourites().unwrap();
    assert_eq!(favourites.len(), 1);
    assert_eq!(favourites[0].name, "Mojito");
}

#[test]
fn delete_all_clears_catalog() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    repo.insert_all(&default_catalog()).unwrap();

    assert_eq!(repo.delete_all().unwrap(), 14);
    assert_eq!(repo.count_drinks().unwrap(), 0);
    assert_eq!(repo.delete_all().unwrap(), 0);
}

#[test]
fn corrupted_favourite_flag_is_reported() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO drinks (name, ingredients, description, image, shaking_time, is_favourite)
         VALUES ('Broken', 'x', 'y', '', 10, 7);",
        [],
    )
    .unwrap();

    let repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    let err = repo.list_drinks().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("is_favourite")));
}

#[test]
fn service_seeds_only_empty_catalog() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    let mut service = CatalogService::new(repo);

    assert_eq!(service.seed_if_empty(&default_catalog()).unwrap(), 14);
    assert_eq!(service.seed_if_empty(&default_catalog()).unwrap(), 0);
    assert_eq!(service.list_drinks().unwrap().len(), 14);
}

#[test]
fn service_toggle_favourite_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    let mut service = CatalogService::new(repo);
    service.seed_if_empty(&default_catalog()).unwrap();

    let negroni = service.toggle_favourite_by_name("Negroni").unwrap().unwrap();
    assert!(negroni.is_favourite);
    assert_eq!(service.list_favourites().unwrap(), vec![negroni.clone()]);

    let back = service.toggle_favourite(&negroni).unwrap();
    assert!(!back.is_favourite);
    assert!(service.list_favourites().unwrap().is_empty());

    assert!(service.toggle_favourite_by_name("Unknown").unwrap().is_none());
}

#[test]
fn service_reset_catalog_drops_favourites() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    let mut service = CatalogService::new(repo);
    service.seed_if_empty(&default_catalog()).unwrap();
    service.toggle_favourite_by_name("Mojito").unwrap();

    assert_eq!(service.reset_catalog(&default_catalog()).unwrap(), 14);
    assert!(service.list_favourites().unwrap().is_empty());
    assert_eq!(service.repo().count_drinks().unwrap(), 14);
}

#[test]
fn failed_reset_keeps_existing_catalog() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    let mut service = CatalogService::new(repo);
    service.seed_if_empty(&default_catalog()).unwrap();
    service.toggle_favourite_by_name("Negroni").unwrap();

    let broken = [mojito(), NewDrink::new("", "1 Lime", "Nothing.", "", 10)];
    let err = service.reset_catalog(&broken).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    assert_eq!(service.repo().count_drinks().unwrap(), 14);
    assert_eq!(service.list_favourites().unwrap().len(), 1);
}

#[test]
fn replace_all_swaps_rows_in_one_step() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    repo.insert_all(&[margarita(), mojito()]).unwrap();

    let (removed, ids) = repo.replace_all(&[mojito()]).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(ids.len(), 1);
    let names: Vec<String> = repo
        .list_drinks()
        .unwrap()
        .into_iter()
        .map(|drink| drink.name)
        .collect();
    assert_eq!(names, vec!["Mojito".to_string()]);
    assert!(repo.get_drink_by_name("Margarita").unwrap().is_none());
}
