mod common;

use chrono::NaiveDate;
use client_manager::{
    Client, ClientFields, ClientRepo, HairColor, RecordStore, StoreError, validate_client,
};

use common::{client, open_store};

fn names(clients: &[Client]) -> Vec<&str> {
    clients.iter().map(|c| c.name.as_str()).collect()
}

fn create_all(store: &mut RecordStore, names: &[&str]) -> Vec<i64> {
    names
        .iter()
        .map(|name| ClientRepo::create(store, &client(name)).unwrap())
        .collect()
}

#[test]
fn create_then_read_returns_same_fields() {
    let mut t = open_store();
    let new_client = Client {
        name: "Dupont Marie".into(),
        phone: "04 56 78 90 12".into(),
        address: "8 avenue des Fleurs".into(),
        postal_code: "69002".into(),
        city: "Lyon".into(),
        birth_date: NaiveDate::from_ymd_opt(1992, 7, 22).unwrap(),
        available_credit: 800.5,
        is_good_client: false,
        hair_color: HairColor::Blond,
        ..client("unused")
    };

    let id = ClientRepo::create(&mut t.store, &new_client).unwrap();
    let stored = ClientRepo::read(&mut t.store, id).unwrap();

    assert_eq!(stored, Client { id: Some(id), ..new_client });
}

#[test]
fn ids_are_assigned_by_the_store() {
    let mut t = open_store();
    let mut with_id = client("Martin Jean");
    with_id.id = Some(42);

    let first = ClientRepo::create(&mut t.store, &with_id).unwrap();
    let second = ClientRepo::create(&mut t.store, &with_id).unwrap();

    assert_ne!(first, second);
    assert_eq!(ClientRepo::count(&mut t.store).unwrap(), 2);
}

#[test]
fn read_missing_id_is_not_found() {
    let mut t = open_store();
    let err = ClientRepo::read(&mut t.store, 999_999).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(999_999)), "{err:?}");
}

#[test]
fn update_changes_only_the_target_row() {
    let mut t = open_store();
    let ids = create_all(&mut t.store, &["Martin Jean", "Dupont Marie", "Bernard Sophie"]);
    let before_first = ClientRepo::read(&mut t.store, ids[0]).unwrap();
    let before_last = ClientRepo::read(&mut t.store, ids[2]).unwrap();

    let mut changed = ClientRepo::read(&mut t.store, ids[1]).unwrap();
    changed.city = "Villeurbanne".into();
    changed.postal_code = "69100".into();
    changed.available_credit = 0.0;
    changed.is_good_client = false;
    changed.hair_color = HairColor::Red;
    changed.birth_date = NaiveDate::from_ymd_opt(1993, 1, 2).unwrap();
    ClientRepo::update(&mut t.store, &changed).unwrap();

    assert_eq!(ClientRepo::read(&mut t.store, ids[1]).unwrap(), changed);
    assert_eq!(ClientRepo::read(&mut t.store, ids[0]).unwrap(), before_first);
    assert_eq!(ClientRepo::read(&mut t.store, ids[2]).unwrap(), before_last);
}

#[test]
fn update_missing_row_is_not_found() {
    let mut t = open_store();
    let ghost = Client {
        id: Some(999_999),
        ..client("Nobody")
    };

    let err = ClientRepo::update(&mut t.store, &ghost).unwrap_err();
    assert!(err.is_not_found(), "{err:?}");
}

#[test]
fn update_requires_an_id() {
    let mut t = open_store();
    let err = ClientRepo::update(&mut t.store, &client("Unsaved")).unwrap_err();
    assert!(matches!(err, StoreError::Unsaved), "{err:?}");
}

#[test]
fn update_violating_constraint_leaves_row_untouched() {
    let mut t = open_store();
    let id = ClientRepo::create(&mut t.store, &client("Martin Jean")).unwrap();
    let original = ClientRepo::read(&mut t.store, id).unwrap();

    let bad = Client {
        postal_code: "12".into(),
        ..original.clone()
    };
    let err = ClientRepo::update(&mut t.store, &bad).unwrap_err();

    assert!(err.is_integrity_violation(), "{err:?}");
    assert_eq!(ClientRepo::read(&mut t.store, id).unwrap(), original);
}

#[test]
fn create_bypassing_validation_is_rejected() {
    let mut t = open_store();
    let bad = Client {
        available_credit: -1.0,
        ..client("Petit Robert")
    };

    let err = ClientRepo::create(&mut t.store, &bad).unwrap_err();
    assert!(err.is_integrity_violation(), "{err:?}");
    assert_eq!(ClientRepo::count(&mut t.store).unwrap(), 0);
}

#[test]
fn delete_many_ignores_unknown_ids() {
    let mut t = open_store();
    let ids = create_all(&mut t.store, &["Martin Jean", "Dupont Marie"]);

    let deleted = ClientRepo::delete_many(&mut t.store, &[ids[0], 999_999]).unwrap();

    assert_eq!(deleted, 1);
    assert!(ClientRepo::read(&mut t.store, ids[0]).unwrap_err().is_not_found());
    assert_eq!(ClientRepo::read(&mut t.store, ids[1]).unwrap().name, "Dupont Marie");
}

#[test]
fn delete_many_with_nothing_to_delete() {
    let mut t = open_store();
    create_all(&mut t.store, &["Martin Jean"]);

    assert_eq!(ClientRepo::delete_many(&mut t.store, &[]).unwrap(), 0);
    assert_eq!(ClientRepo::delete_many(&mut t.store, &[999_999]).unwrap(), 0);
    assert_eq!(ClientRepo::count(&mut t.store).unwrap(), 1);
}

#[test]
fn delete_many_handles_more_ids_than_one_statement_binds() {
    let mut t = open_store();
    let ids = create_all(&mut t.store, &["Martin Jean", "Dupont Marie", "Bernard Sophie"]);

    let mut doomed: Vec<i64> = (1_000_000..1_040_000).collect();
    doomed.insert(0, ids[0]);
    doomed.push(ids[2]);

    let deleted = ClientRepo::delete_many(&mut t.store, &doomed).unwrap();

    assert_eq!(deleted, 2);
    assert_eq!(ClientRepo::count(&mut t.store).unwrap(), 1);
    assert_eq!(ClientRepo::read(&mut t.store, ids[1]).unwrap().name, "Dupont Marie");
}

#[test]
fn validated_form_is_accepted_by_the_store() {
    let mut t = open_store();
    let fields = ClientFields {
        name: "Nouveau Client".into(),
        phone: "06 00 00 00 00".into(),
        address: "1 rue Neuve".into(),
        postal_code: "75011".into(),
        city: "Paris".into(),
        birth_date: "1/3/1985".into(),
        available_credit: "12,5".into(),
        is_good_client: true,
        hair_color: "roux".into(),
    };

    let new_client = validate_client(&fields, None).unwrap();
    let id = ClientRepo::create(&mut t.store, &new_client).unwrap();

    let stored = ClientRepo::read(&mut t.store, id).unwrap();
    assert_eq!(stored.storage_birth_date(), "1985-03-01");

    for bad in ["01/01/+12345", "01/01/-0001"] {
        let fields = ClientFields { birth_date: bad.into(), ..fields.clone() };
        assert!(validate_client(&fields, None).is_err(), "{bad}");
    }
}

#[test]
fn search_empty_fragment_lists_everyone_by_id() {
    let mut t = open_store();
    let ids = create_all(
        &mut t.store,
        &["Martin Jean", "Dupont Marie", "Bernard Sophie", "Thomas Pierre"],
    );

    let all = ClientRepo::search(&mut t.store, "").unwrap();

    let found: Vec<i64> = all.iter().filter_map(|c| c.id).collect();
    assert_eq!(found, ids);
}

#[test]
fn search_matches_substring_ignoring_case() {
    let mut t = open_store();
    create_all(
        &mut t.store,
        &["Martin Jean", "Dupont Marie", "Bernard Sophie", "Thomas Pierre"],
    );

    let lower = ClientRepo::search(&mut t.store, "mar").unwrap();
    assert_eq!(names(&lower), vec!["Martin Jean", "Dupont Marie"]);

    let upper = ClientRepo::search(&mut t.store, "MAR").unwrap();
    assert_eq!(upper, lower);

    assert!(ClientRepo::search(&mut t.store, "zz").unwrap().is_empty());
}

#[test]
fn search_treats_wildcards_literally() {
    let mut t = open_store();
    create_all(&mut t.store, &["Martin Jean", "100% Client", "Under_score"]);

    assert_eq!(
        names(&ClientRepo::search(&mut t.store, "%").unwrap()),
        vec!["100% Client"]
    );
    assert_eq!(
        names(&ClientRepo::search(&mut t.store, "_").unwrap()),
        vec!["Under_score"]
    );
}

#[test]
fn count_tracks_rows() {
    let mut t = open_store();
    assert_eq!(ClientRepo::count(&mut t.store).unwrap(), 0);

    let ids = create_all(&mut t.store, &["A", "B", "C"]);
    assert_eq!(ClientRepo::count(&mut t.store).unwrap(), 3);

    ClientRepo::delete_many(&mut t.store, &ids[..2]).unwrap();
    assert_eq!(ClientRepo::count(&mut t.store).unwrap(), 1);
}

#[test]
fn repository_needs_an_open_store() {
    let mut store = RecordStore::new();
    assert!(matches!(
        ClientRepo::count(&mut store),
        Err(StoreError::NotConnected)
    ));
    assert!(matches!(
        ClientRepo::create(&mut store, &client("Martin Jean")),
        Err(StoreError::NotConnected)
    ));
}
