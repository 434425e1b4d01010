//! Unit of Work - transaction capability for cross-entity writes.
//!
//! The two mutations that touch both stores (create-place and
//! delete-place) must keep `Place::creator` and the owning user's
//! `places` list consistent. They run inside a store transaction:
//! the closure receives a [`TxContext`] whose writes all belong to the
//! same transaction, committed on `Ok` and rolled back on `Err`.
//!
//! `TxContext` is an object-safe capability so tests can substitute an
//! in-memory double that stages writes and aborts on demand.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QuerySelect, Select,
    Set, TransactionTrait,
};
use uuid::Uuid;

use super::repositories::entities::{place, user};
use super::repositories::{PlaceRepository, PlaceStore, UserRepository, UserStore};
use crate::domain::Place;
use crate::errors::{AppError, AppResult};

/// Future returned by a transaction closure.
pub type TxFuture<'a> = BoxFuture<'a, AppResult<()>>;

/// Boxed closure executed within a transaction.
pub type TxClosure = Box<dyn for<'c> FnOnce(&'c mut dyn TxContext) -> TxFuture<'c> + Send>;

/// Writes available inside a transaction.
///
/// Every operation is applied to the same underlying transaction;
/// nothing becomes durable until the unit of work commits.
#[async_trait]
pub trait TxContext: Send {
    /// Insert a new place record
    async fn insert_place(&mut self, new_place: &Place) -> AppResult<()>;

    /// Remove a place record
    async fn remove_place(&mut self, place_id: Uuid) -> AppResult<()>;

    /// Append a place id to a user's place list
    async fn attach_place(&mut self, user_id: Uuid, place_id: Uuid) -> AppResult<()>;

    /// Remove a place id from a user's place list
    async fn detach_place(&mut self, user_id: Uuid, place_id: Uuid) -> AppResult<()>;
}

/// Unit of Work trait for dependency injection.
///
/// Provides repository access for plain reads/writes and the
/// transaction boundary for cross-entity mutations.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get place repository
    fn places(&self) -> Arc<dyn PlaceRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Commits when the closure returns `Ok`, rolls back when it
    /// returns `Err`; either both writes become durable or neither.
    async fn transaction(&self, work: TxClosure) -> AppResult<()>;
}

/// Concrete implementation of UnitOfWork over a SeaORM connection.
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    place_repo: Arc<PlaceStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let place_repo = Arc::new(PlaceStore::new(db.clone()));
        Self {
            db,
            user_repo,
            place_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn places(&self) -> Arc<dyn PlaceRepository> {
        self.place_repo.clone()
    }

    async fn transaction(&self, work: TxClosure) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let mut ctx = SeaTxContext { txn: &txn };
        let outcome = work(&mut ctx).await;

        match outcome {
            Ok(()) => txn.commit().await.map_err(AppError::from),
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction context backed by a live database transaction.
struct SeaTxContext<'t> {
    txn: &'t DatabaseTransaction,
}

#[async_trait]
impl<'t> TxContext for SeaTxContext<'t> {
    async fn insert_place(&mut self, new_place: &Place) -> AppResult<()> {
        place::ActiveModel::from(new_place)
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn remove_place(&mut self, place_id: Uuid) -> AppResult<()> {
        let result = place::Entity::delete_by_id(place_id)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn attach_place(&mut self, user_id: Uuid, place_id: Uuid) -> AppResult<()> {
        let model = user_row_for_update(user_id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut refs = model.places.clone();
        let mut active: user::ActiveModel = model.into();
        if !refs.0.contains(&place_id) {
            refs.0.push(place_id);
        }
        active.places = Set(refs);

        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn detach_place(&mut self, user_id: Uuid, place_id: Uuid) -> AppResult<()> {
        let model = user_row_for_update(user_id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut refs = model.places.clone();
        let mut active: user::ActiveModel = model.into();
        refs.0.retain(|id| *id != place_id);
        active.places = Set(refs);

        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }
}

/// The owning user's row, locked for the rest of the transaction.
///
/// The place list is read, modified and written back; without the
/// lock, two concurrent transactions for the same user could both
/// read the same list and the later commit would drop the earlier
/// one's entry.
fn user_row_for_update(user_id: Uuid) -> Select<user::Entity> {
    user::Entity::find_by_id(user_id).lock_exclusive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn place_list_updates_lock_the_user_row() {
        let sql = user_row_for_update(Uuid::nil())
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.ends_with("FOR UPDATE"), "expected row lock in: {}", sql);
    }
}
