use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::price::PriceSnapshot;
use crate::models::transaction::Transaction;

/// One user's slice of the data file: who they are and what they bought.
///
/// Matches the on-disk layout of `users.json`. Files written by earlier
/// versions carry extra fields (login credentials, role flags); those are
/// ignored on load and dropped on the next save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Listing view of a user: everything except the transactions themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub tx_count: usize,
}

/// JSON-file-backed store for users, their transaction logs and the
/// shared price snapshot.
///
/// Layout under the data directory:
/// - `users.json`  — array of [`UserRecord`], pretty-printed
/// - `prices.json` — one [`PriceSnapshot`] or `null` when never set
///
/// Every operation reads the full file and writes it back; fine for a
/// handful of household users, not a database.
pub struct DataStore {
    users_path: PathBuf,
    prices_path: PathBuf,
}

impl DataStore {
    /// Open a store rooted at `dir`, creating the directory and seeding
    /// empty data files on first use.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CoreError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let users_path = dir.join("users.json");
        let prices_path = dir.join("prices.json");

        if !users_path.exists() {
            log::debug!("Seeding empty users file at {}", users_path.display());
            std::fs::write(&users_path, "[]")?;
        }
        if !prices_path.exists() {
            log::debug!("Seeding empty prices file at {}", prices_path.display());
            std::fs::write(&prices_path, "null")?;
        }

        Ok(Self {
            users_path,
            prices_path,
        })
    }

    // ── Users ───────────────────────────────────────────────────────

    /// Create a new user with an empty transaction log.
    pub fn create_user(&self, username: &str) -> Result<UserRecord, CoreError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CoreError::ValidationError(
                "Username must not be empty".into(),
            ));
        }

        let mut users = self.load_users()?;
        if users.iter().any(|u| u.username == username) {
            return Err(CoreError::DuplicateUser(username.to_string()));
        }

        let record = UserRecord {
            username: username.to_string(),
            created_at: Utc::now(),
            transactions: Vec::new(),
        };
        users.push(record.clone());
        self.save_users(&users)?;
        Ok(record)
    }

    /// List all users without materializing their transaction logs.
    pub fn list_users(&self) -> Result<Vec<UserInfo>, CoreError> {
        let users = self.load_users()?;
        Ok(users
            .iter()
            .map(|u| UserInfo {
                username: u.username.clone(),
                created_at: u.created_at,
                tx_count: u.transactions.len(),
            })
            .collect())
    }

    /// Delete a user and their transaction log.
    pub fn delete_user(&self, username: &str) -> Result<(), CoreError> {
        let mut users = self.load_users()?;
        let before = users.len();
        users.retain(|u| u.username != username);
        if users.len() == before {
            return Err(CoreError::UserNotFound(username.to_string()));
        }
        self.save_users(&users)
    }

    // ── Transactions ────────────────────────────────────────────────

    /// All transactions for a user, in stored order.
    pub fn transactions(&self, username: &str) -> Result<Vec<Transaction>, CoreError> {
        let users = self.load_users()?;
        users
            .into_iter()
            .find(|u| u.username == username)
            .map(|u| u.transactions)
            .ok_or_else(|| CoreError::UserNotFound(username.to_string()))
    }

    /// Replace a user's whole transaction log.
    pub fn save_transactions(
        &self,
        username: &str,
        transactions: &[Transaction],
    ) -> Result<(), CoreError> {
        self.with_user(username, |user| {
            user.transactions = transactions.to_vec();
        })
    }

    /// Insert a transaction, or replace the stored one with the same id.
    pub fn upsert_transaction(
        &self,
        username: &str,
        transaction: Transaction,
    ) -> Result<(), CoreError> {
        self.with_user(username, |user| {
            match user.transactions.iter().position(|t| t.id == transaction.id) {
                Some(idx) => user.transactions[idx] = transaction,
                None => user.transactions.push(transaction),
            }
        })
    }

    /// Remove a transaction by id.
    pub fn remove_transaction(&self, username: &str, tx_id: &str) -> Result<(), CoreError> {
        let mut found = false;
        self.with_user(username, |user| {
            let before = user.transactions.len();
            user.transactions.retain(|t| t.id != tx_id);
            found = user.transactions.len() != before;
        })?;
        if !found {
            return Err(CoreError::TransactionNotFound(tx_id.to_string()));
        }
        Ok(())
    }

    // ── Price snapshot ──────────────────────────────────────────────

    /// The shared price snapshot, or `None` when never set.
    pub fn load_snapshot(&self) -> Result<Option<PriceSnapshot>, CoreError> {
        let raw = std::fs::read_to_string(&self.prices_path)?;
        let snapshot: Option<PriceSnapshot> = serde_json::from_str(&raw)?;
        Ok(snapshot)
    }

    /// Replace the shared price snapshot.
    pub fn save_snapshot(&self, snapshot: &PriceSnapshot) -> Result<(), CoreError> {
        let raw = serde_json::to_string(snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))?;
        std::fs::write(&self.prices_path, raw)?;
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn load_users(&self) -> Result<Vec<UserRecord>, CoreError> {
        let raw = std::fs::read_to_string(&self.users_path)?;
        let users: Vec<UserRecord> = serde_json::from_str(&raw)?;
        Ok(users)
    }

    fn save_users(&self, users: &[UserRecord]) -> Result<(), CoreError> {
        let raw = serde_json::to_string_pretty(users)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize users: {e}")))?;
        std::fs::write(&self.users_path, raw)?;
        Ok(())
    }

    /// Load, mutate one user in place, save. Errors when the user is missing.
    fn with_user<F>(&self, username: &str, mutate: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut UserRecord),
    {
        let mut users = self.load_users()?;
        let user = users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| CoreError::UserNotFound(username.to_string()))?;
        mutate(user);
        self.save_users(&users)
    }
}
