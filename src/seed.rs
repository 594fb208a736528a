//! Demo data for a fresh client store.

use chrono::NaiveDate;

use crate::db::{ClientRepo, RecordStore};
use crate::error::StoreResult;
use crate::models::{Client, HairColor};

struct DemoClient {
    name: &'static str,
    phone: &'static str,
    address: &'static str,
    postal_code: &'static str,
    city: &'static str,
    birth_date: (i32, u32, u32),
    available_credit: f64,
    is_good_client: bool,
    hair_color: HairColor,
}

const DEMO_CLIENTS: [DemoClient; 10] = [
    DemoClient {
        name: "Martin Jean",
        phone: "01 23 45 67 89",
        address: "12 rue de la Paix",
        postal_code: "75001",
        city: "Paris",
        birth_date: (1985, 3, 15),
        available_credit: 1500.00,
        is_good_client: true,
        hair_color: HairColor::Brown,
    },
    DemoClient {
        name: "Dupont Marie",
        phone: "04 56 78 90 12",
        address: "8 avenue des Fleurs",
        postal_code: "69002",
        city: "Lyon",
        birth_date: (1992, 7, 22),
        available_credit: 800.50,
        is_good_client: false,
        hair_color: HairColor::Blond,
    },
    DemoClient {
        name: "Bernard Sophie",
        phone: "05 67 89 01 23",
        address: "3 place du Capitole",
        postal_code: "31000",
        city: "Toulouse",
        birth_date: (1978, 11, 8),
        available_credit: 2200.00,
        is_good_client: true,
        hair_color: HairColor::Red,
    },
    DemoClient {
        name: "Petit Robert",
        phone: "03 45 67 89 01",
        address: "27 rue du Commerce",
        postal_code: "59000",
        city: "Lille",
        birth_date: (1965, 4, 30),
        available_credit: 0.00,
        is_good_client: false,
        hair_color: HairColor::Bald,
    },
    DemoClient {
        name: "Laurent Claire",
        phone: "02 34 56 78 90",
        address: "15 rue de la Loire",
        postal_code: "44000",
        city: "Nantes",
        birth_date: (1990, 9, 12),
        available_credit: 3500.75,
        is_good_client: true,
        hair_color: HairColor::Blond,
    },
    DemoClient {
        name: "Thomas Pierre",
        phone: "04 89 01 23 45",
        address: "42 boulevard Michelet",
        postal_code: "13008",
        city: "Marseille",
        birth_date: (1982, 1, 25),
        available_credit: 650.00,
        is_good_client: true,
        hair_color: HairColor::Brown,
    },
    DemoClient {
        name: "Robert Anne",
        phone: "03 78 90 12 34",
        address: "5 rue des Halles",
        postal_code: "67000",
        city: "Strasbourg",
        birth_date: (1975, 6, 18),
        available_credit: 120.30,
        is_good_client: false,
        hair_color: HairColor::Red,
    },
    DemoClient {
        name: "Moreau Luc",
        phone: "05 12 34 56 78",
        address: "88 avenue de la Gare",
        postal_code: "33000",
        city: "Bordeaux",
        birth_date: (2000, 12, 5),
        available_credit: 4000.00,
        is_good_client: true,
        hair_color: HairColor::Blond,
    },
    DemoClient {
        name: "Simon Isabelle",
        phone: "01 90 12 34 56",
        address: "19 rue Nationale",
        postal_code: "75013",
        city: "Paris",
        birth_date: (1988, 8, 14),
        available_credit: 275.00,
        is_good_client: false,
        hair_color: HairColor::Brown,
    },
    DemoClient {
        name: "Michel François",
        phone: "04 23 45 67 89",
        address: "7 chemin des Vignes",
        postal_code: "06000",
        city: "Nice",
        birth_date: (1955, 2, 28),
        available_credit: 9999.99,
        is_good_client: true,
        hair_color: HairColor::Bald,
    },
];

/// The demo clients, not yet persisted.
pub fn demo_clients() -> Vec<Client> {
    DEMO_CLIENTS
        .iter()
        .map(|demo| {
            let (year, month, day) = demo.birth_date;
            Client {
                id: None,
                name: demo.name.to_string(),
                phone: demo.phone.to_string(),
                address: demo.address.to_string(),
                postal_code: demo.postal_code.to_string(),
                city: demo.city.to_string(),
                birth_date: NaiveDate::from_ymd_opt(year, month, day)
                    .expect("demo birth dates are calendar dates"),
                available_credit: demo.available_credit,
                is_good_client: demo.is_good_client,
                hair_color: demo.hair_color,
            }
        })
        .collect()
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// `(id, name)` of every client written.
    pub inserted: Vec<(i64, String)>,
    /// `(name, reason)` of every client the store refused.
    pub failed: Vec<(String, String)>,
    /// Set when the store already had clients and the caller declined.
    pub cancelled: bool,
}

/// Writes the demo clients into `store`.
///
/// When the store already holds clients, `confirm` is called with the
/// current count and seeding only goes ahead if it returns `true`. A
/// client the store refuses is recorded in the report and the rest are
/// still attempted.
pub fn populate(
    store: &mut RecordStore,
    confirm: impl FnOnce(i64) -> bool,
) -> StoreResult<SeedReport> {
    let existing = ClientRepo::count(store)?;
    if existing > 0 && !confirm(existing) {
        tracing::info!(existing, "seeding cancelled");
        return Ok(SeedReport {
            cancelled: true,
            ..SeedReport::default()
        });
    }

    let mut report = SeedReport::default();
    for client in demo_clients() {
        match ClientRepo::create(store, &client) {
            Ok(id) => report.inserted.push((id, client.name)),
            Err(e) => {
                tracing::warn!(name = %client.name, error = %e, "demo client rejected");
                report.failed.push((client.name, e.to_string()));
            }
        }
    }

    tracing::info!(
        inserted = report.inserted.len(),
        failed = report.failed.len(),
        "seeded demo clients"
    );
    Ok(report)
}
