//! Table layout of the client store.

pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

pub const CREATE_CLIENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Clients (
    IDCLIENT          INTEGER PRIMARY KEY,
    nom_client        TEXT    NOT NULL,
    numero_telephone  TEXT    NOT NULL,
    adresse           TEXT    NOT NULL,
    code_postal       TEXT    NOT NULL
        CHECK (
            length(code_postal) = 5
            AND code_postal GLOB '[0-9][0-9][0-9][0-9][0-9]'
        ),
    ville             TEXT    NOT NULL,
    date_naissance    TEXT    NOT NULL
        CHECK (
            date(julianday(date_naissance)) IS NOT NULL
            AND date(julianday(date_naissance)) = date_naissance
        ),
    credit_disponible REAL    NOT NULL
        CHECK (
            typeof(credit_disponible) IN ('integer', 'real')
            AND credit_disponible >= 0
        ),
    bon_client        INTEGER NOT NULL DEFAULT 0
        CHECK (bon_client IN (0, 1)),
    couleur_cheveux   TEXT    NOT NULL
        CHECK (couleur_cheveux IN ('brun', 'blond', 'roux', 'chauve'))
)
"#;

pub const CLIENT_COLUMNS: &str = "IDCLIENT, nom_client, numero_telephone, adresse, code_postal, \
     ville, date_naissance, credit_disponible, bon_client, couleur_cheveux";
