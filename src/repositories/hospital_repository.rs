//! Hospital repository for all MongoDB operations related to hospitals.

use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use mongodb::results::{DeleteResult, UpdateResult};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_HOSPITALS;
use crate::errors::ApiError;
use crate::models::Hospital;
use crate::query::{ListQuery, PaginationState};

/// Repository for hospital-related database operations.
pub struct HospitalRepository {
    collection: Collection<Hospital>,
}

impl HospitalRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_HOSPITALS),
        }
    }

    /// Create a unique index on `name`.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for hospitals collection...");

        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }

    pub async fn insert(&self, hospital: &Hospital) -> Result<ObjectId, ApiError> {
        let result = self.collection.insert_one(hospital).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::internal("Inserted hospital has no ObjectId"))
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Hospital>, ApiError> {
        debug!("Repository: Finding hospital by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Hospital>, ApiError> {
        let cursor = self.collection.find(doc! { "_id": { "$in": ids.to_vec() } }).await?;
        Ok(cursor.try_collect().await?)
    }

    /// One page of a translated listing.
    pub async fn find_page(
        &self,
        query: &ListQuery,
        page: &PaginationState,
    ) -> Result<Vec<Hospital>, ApiError> {
        debug!(
            "Repository: Finding hospitals with filter: {:?}, sort: {:?}",
            query.filter, query.sort
        );

        let mut find = self
            .collection
            .find(query.filter.clone())
            .sort(query.sort_document())
            .skip(page.start_index)
            .limit(page.limit_i64());

        if let Some(projection) = query.projection() {
            find = find.projection(projection);
        }

        Ok(find.await?.try_collect().await?)
    }

    /// Count documents matching a filter.
    pub async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        Ok(self.collection.count_documents(filter).await?)
    }

    pub async fn update(&self, id: ObjectId, update: Document) -> Result<UpdateResult, ApiError> {
        Ok(self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": update })
            .await?)
    }

    pub async fn delete(&self, id: ObjectId) -> Result<DeleteResult, ApiError> {
        Ok(self.collection.delete_one(doc! { "_id": id }).await?)
    }
}
