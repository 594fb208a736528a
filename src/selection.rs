use std::fmt;

use thiserror::Error;

use crate::models::Client;

/// How a client list was opened: full management, or as a picker that
/// hands one or several records back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Standard,
    Single,
    Multi,
}

/// The `(id, name)` pair handed back for a picked client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRef {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for ClientRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.id, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    One(ClientRef),
    Many(Vec<ClientRef>),
}

impl Selection {
    pub fn refs(&self) -> &[ClientRef] {
        match self {
            Selection::One(one) => std::slice::from_ref(one),
            Selection::Many(many) => many,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("this list was not opened for selection")]
    NotSelectable,
    #[error("select exactly one client (got {0})")]
    ExpectedOne(usize),
    #[error("select at least one client")]
    Empty,
    #[error("client `{0}` has not been saved")]
    Unsaved(String),
}

impl SelectionMode {
    /// Turns the picked clients into what the caller receives.
    pub fn resolve(self, picked: &[Client]) -> Result<Selection, SelectionError> {
        let refs = picked
            .iter()
            .map(|client| match client.id {
                Some(id) => Ok(ClientRef {
                    id,
                    name: client.name.clone(),
                }),
                None => Err(SelectionError::Unsaved(client.name.clone())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        match self {
            SelectionMode::Standard => Err(SelectionError::NotSelectable),
            SelectionMode::Single => match <[ClientRef; 1]>::try_from(refs) {
                Ok([one]) => Ok(Selection::One(one)),
                Err(refs) => Err(SelectionError::ExpectedOne(refs.len())),
            },
            SelectionMode::Multi if refs.is_empty() => Err(SelectionError::Empty),
            SelectionMode::Multi => Ok(Selection::Many(refs)),
        }
    }
}
