//! In-memory persistence and collaborator doubles for service tests.
//!
//! `MemUow` implements the full unit-of-work contract over a shared
//! `MemState`: transactions stage their writes on a copy and only swap
//! it in on commit, so abort paths can be tested without a database.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use placedex::domain::{GeoPoint, Place, PlaceWithCreator, User};
use placedex::errors::{AppError, AppResult};
use placedex::infra::{
    Geocoder, ImageStore, PlaceRepository, StoredImage, TxClosure, TxContext, UnitOfWork,
    UploadedImage, UserRepository,
};
use placedex::types::PageRequest;

/// The whole store: users, places and the insertion order used to
/// break creation-timestamp ties deterministically.
#[derive(Debug, Default, Clone)]
pub struct MemState {
    pub users: HashMap<Uuid, User>,
    pub places: HashMap<Uuid, Place>,
    pub order: HashMap<Uuid, u64>,
    pub next_seq: u64,
}

/// In-memory unit of work with switchable failure modes.
#[derive(Default)]
pub struct MemUow {
    pub state: Arc<Mutex<MemState>>,
    /// Fail after the closure succeeds, before the staged state lands.
    pub fail_commit: AtomicBool,
    /// Fail the second write inside a transaction closure.
    pub fail_after_first_write: AtomicBool,
}

#[async_trait]
impl UnitOfWork for MemUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(MemUsers {
            state: self.state.clone(),
        })
    }

    fn places(&self) -> Arc<dyn PlaceRepository> {
        Arc::new(MemPlaces {
            state: self.state.clone(),
        })
    }

    async fn transaction(&self, work: TxClosure) -> AppResult<()> {
        let staged = self.state.lock().unwrap().clone();
        let mut tx = MemTx {
            staged,
            writes: 0,
            fail_after_first_write: self.fail_after_first_write.load(Ordering::SeqCst),
        };

        work(&mut tx).await?;

        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(AppError::internal("commit failed"));
        }

        *self.state.lock().unwrap() = tx.staged;
        Ok(())
    }
}

/// Transaction context staging writes on a copied state.
struct MemTx {
    staged: MemState,
    writes: u32,
    fail_after_first_write: bool,
}

impl MemTx {
    fn begin_write(&mut self) -> AppResult<()> {
        if self.fail_after_first_write && self.writes >= 1 {
            return Err(AppError::internal("write failed mid-transaction"));
        }
        self.writes += 1;
        Ok(())
    }
}

#[async_trait]
impl TxContext for MemTx {
    async fn insert_place(&mut self, new_place: &Place) -> AppResult<()> {
        self.begin_write()?;
        let seq = self.staged.next_seq;
        self.staged.next_seq += 1;
        self.staged.order.insert(new_place.id, seq);
        self.staged.places.insert(new_place.id, new_place.clone());
        Ok(())
    }

    async fn remove_place(&mut self, place_id: Uuid) -> AppResult<()> {
        self.begin_write()?;
        self.staged
            .places
            .remove(&place_id)
            .ok_or(AppError::NotFound)?;
        self.staged.order.remove(&place_id);
        Ok(())
    }

    async fn attach_place(&mut self, user_id: Uuid, place_id: Uuid) -> AppResult<()> {
        self.begin_write()?;
        let user = self
            .staged
            .users
            .get_mut(&user_id)
            .ok_or(AppError::NotFound)?;
        if !user.places.contains(&place_id) {
            user.places.push(place_id);
        }
        Ok(())
    }

    async fn detach_place(&mut self, user_id: Uuid, place_id: Uuid) -> AppResult<()> {
        self.begin_write()?;
        let user = self
            .staged
            .users
            .get_mut(&user_id)
            .ok_or(AppError::NotFound)?;
        user.places.retain(|id| *id != place_id);
        Ok(())
    }
}

struct MemUsers {
    state: Arc<Mutex<MemState>>,
}

#[async_trait]
impl UserRepository for MemUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, new_user: User) -> AppResult<User> {
        self.state
            .lock()
            .unwrap()
            .users
            .insert(new_user.id, new_user.clone());
        Ok(new_user)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.state.lock().unwrap().users.values().cloned().collect())
    }
}

struct MemPlaces {
    state: Arc<Mutex<MemState>>,
}

impl MemPlaces {
    /// All places newest first, using insertion order as tie-breaker.
    fn ordered(state: &MemState) -> Vec<Place> {
        let mut places: Vec<(u64, Place)> = state
            .places
            .values()
            .map(|p| (state.order.get(&p.id).copied().unwrap_or(0), p.clone()))
            .collect();
        places.sort_by(|a, b| b.0.cmp(&a.0));
        places.into_iter().map(|(_, p)| p).collect()
    }

    fn window(places: Vec<Place>, page: PageRequest) -> Vec<Place> {
        places
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect()
    }
}

#[async_trait]
impl PlaceRepository for MemPlaces {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Place>> {
        Ok(self.state.lock().unwrap().places.get(&id).cloned())
    }

    async fn update_content(&self, updated: Place) -> AppResult<Place> {
        let mut state = self.state.lock().unwrap();
        let place = state
            .places
            .get_mut(&updated.id)
            .ok_or(AppError::NotFound)?;
        place.title = updated.title.clone();
        place.description = updated.description.clone();
        place.updated_at = updated.updated_at;
        Ok(place.clone())
    }

    async fn list_by_creator(
        &self,
        creator: Uuid,
        page: PageRequest,
    ) -> AppResult<(Vec<Place>, u64)> {
        let state = self.state.lock().unwrap();
        let mine: Vec<Place> = Self::ordered(&state)
            .into_iter()
            .filter(|p| p.creator == creator)
            .collect();
        let total = mine.len() as u64;
        Ok((Self::window(mine, page), total))
    }

    async fn list_all(&self, page: PageRequest) -> AppResult<(Vec<PlaceWithCreator>, u64)> {
        let state = self.state.lock().unwrap();
        let all = Self::ordered(&state);
        let total = all.len() as u64;
        let places = Self::window(all, page)
            .into_iter()
            .map(|place| {
                let creator_username = state
                    .users
                    .get(&place.creator)
                    .map(|u| u.username.clone())
                    .unwrap_or_default();
                PlaceWithCreator {
                    place,
                    creator_username,
                }
            })
            .collect();
        Ok((places, total))
    }
}

/// Geocoder returning a fixed point for every address.
pub struct FixedGeocoder(pub GeoPoint);

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn resolve(&self, _address: &str) -> AppResult<GeoPoint> {
        Ok(self.0)
    }
}

/// Geocoder that never finds anything.
pub struct FailingGeocoder;

#[async_trait]
impl Geocoder for FailingGeocoder {
    async fn resolve(&self, _address: &str) -> AppResult<GeoPoint> {
        Err(AppError::geo_resolution(
            "could not find the location for the given address",
        ))
    }
}

/// Image store recording deletions, with switchable failure modes.
#[derive(Default)]
pub struct MemImages {
    pub deleted: Mutex<Vec<String>>,
    pub fail_upload: AtomicBool,
    pub fail_delete: AtomicBool,
}

#[async_trait]
impl ImageStore for MemImages {
    async fn upload(&self, image: &UploadedImage, folder: &str) -> AppResult<StoredImage> {
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(AppError::upstream("image upload failed"));
        }
        Ok(StoredImage {
            url: format!("https://img.test/{}/{}", folder, image.filename),
            handle: format!("{}/{}", folder, image.filename),
        })
    }

    async fn delete(&self, handle: &str) -> AppResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AppError::upstream("image delete failed"));
        }
        self.deleted.lock().unwrap().push(handle.to_string());
        Ok(())
    }
}

/// A small valid png-ish upload.
pub fn png(name: &str) -> UploadedImage {
    UploadedImage {
        filename: name.to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

/// Insert a user directly into the store, bypassing signup.
pub fn seed_user(state: &Arc<Mutex<MemState>>, username: &str, email: &str) -> User {
    let user = User::new(
        username.to_string(),
        email.to_string(),
        "hash".to_string(),
        "https://img.test/users/avatar.png".to_string(),
        "users/avatar.png".to_string(),
    );
    state.lock().unwrap().users.insert(user.id, user.clone());
    user
}
