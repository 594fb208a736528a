#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use client_manager::{Client, HairColor, RecordStore};
use tempfile::TempDir;

pub struct TestStore {
    pub store: RecordStore,
    pub dir: TempDir,
}

impl TestStore {
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("clients.sqlite")
    }
}

pub fn open_store() -> TestStore {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecordStore::new();
    store.open(dir.path().join("clients.sqlite")).unwrap();
    TestStore { store, dir }
}

pub fn client(name: &str) -> Client {
    Client {
        id: None,
        name: name.to_string(),
        phone: "01 23 45 67 89".to_string(),
        address: "12 rue de la Paix".to_string(),
        postal_code: "75001".to_string(),
        city: "Paris".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1985, 3, 15).unwrap(),
        available_credit: 1500.0,
        is_good_client: true,
        hair_color: HairColor::Brown,
    }
}
