use sqlx::FromRow;

use crate::db::schema::CLIENT_COLUMNS;
use crate::db::{RecordStore, SqlValue};
use crate::error::{StoreError, StoreResult};
use crate::models::Client;

/// Most ids bound into one `DELETE`. Below the 999 default of older SQLite
/// builds.
pub const DELETE_BATCH: usize = 500;

/// Maps `Client` values to and from the `Clients` table.
pub struct ClientRepo;

impl ClientRepo {
    /// Clients whose name contains `fragment`, ignoring ASCII case, in
    /// ascending id order. An empty fragment lists every client.
    pub fn search(store: &mut RecordStore, fragment: &str) -> StoreResult<Vec<Client>> {
        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM Clients \
             WHERE nom_client LIKE ? ESCAPE '\\' \
             ORDER BY IDCLIENT ASC"
        );
        let pattern = format!("%{}%", escape_like(fragment));

        store
            .query(&sql, &[pattern.into()])?
            .iter()
            .map(|row| Client::from_row(row).map_err(StoreError::from))
            .collect()
    }

    /// Inserts a new row and returns the id the store assigned. An id
    /// already set on `client` is ignored.
    pub fn create(store: &mut RecordStore, client: &Client) -> StoreResult<i64> {
        let outcome = store.execute(
            "INSERT INTO Clients (nom_client, numero_telephone, adresse, code_postal, \
             ville, date_naissance, credit_disponible, bon_client, couleur_cheveux) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            &field_params(client),
        )?;

        tracing::debug!(id = outcome.last_insert_id, name = %client.name, "created client");
        Ok(outcome.last_insert_id)
    }

    pub fn read(store: &mut RecordStore, id: i64) -> StoreResult<Client> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM Clients WHERE IDCLIENT = ?");
        let rows = store.query(&sql, &[id.into()])?;

        match rows.first() {
            Some(row) => Ok(Client::from_row(row)?),
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Replaces every field of the row matching `client.id`.
    pub fn update(store: &mut RecordStore, client: &Client) -> StoreResult<()> {
        let id = client.id.ok_or(StoreError::Unsaved)?;

        let mut params = field_params(client);
        params.push(id.into());

        let outcome = store.execute(
            "UPDATE Clients SET nom_client = ?, numero_telephone = ?, adresse = ?, \
             code_postal = ?, ville = ?, date_naissance = ?, credit_disponible = ?, \
             bon_client = ?, couleur_cheveux = ? \
             WHERE IDCLIENT = ?",
            &params,
        )?;

        if outcome.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Deletes whichever of `ids` exist and returns how many rows went.
    /// Ids with no row are skipped silently.
    ///
    /// Large id lists are sent in batches of [`DELETE_BATCH`] to stay under
    /// SQLite's bound-parameter limit. Each batch commits on its own.
    pub fn delete_many(store: &mut RecordStore, ids: &[i64]) -> StoreResult<u64> {
        let mut deleted = 0;
        for batch in ids.chunks(DELETE_BATCH) {
            let placeholders = vec!["?"; batch.len()].join(", ");
            let sql = format!("DELETE FROM Clients WHERE IDCLIENT IN ({placeholders})");
            let params: Vec<SqlValue> = batch.iter().map(|&id| id.into()).collect();

            deleted += store.execute(&sql, &params)?.rows_affected;
        }

        tracing::debug!(requested = ids.len(), deleted, "deleted clients");
        Ok(deleted)
    }

    pub fn count(store: &mut RecordStore) -> StoreResult<i64> {
        let rows = store.query("SELECT COUNT(*) FROM Clients", &[])?;
        let total = match rows.first() {
            Some(row) => sqlx::Row::try_get::<i64, _>(row, 0)?,
            None => 0,
        };
        Ok(total)
    }
}

fn field_params(client: &Client) -> Vec<SqlValue> {
    vec![
        client.name.as_str().into(),
        client.phone.as_str().into(),
        client.address.as_str().into(),
        client.postal_code.as_str().into(),
        client.city.as_str().into(),
        client.storage_birth_date().into(),
        client.available_credit.into(),
        client.is_good_client.into(),
        client.hair_color.as_str().into(),
    ]
}

fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
